// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn-backed model code and the
// evaluation loop that drives it.
//
// What's in this layer:
//
//   model.rs      — The transformer encoder tagger
//                   Token + positional embeddings, stacked
//                   self-attention encoder blocks, and a linear
//                   per-token classification head
//
//   inferencer.rs — The inference-side wrapper
//                   Rebuilds the network from params.json on the
//                   inference backend, restores a checkpoint, and
//                   adapts it to the EvalModel seam (loss +
//                   detach-to-host included)
//
//   evaluator.rs  — The batched evaluation loop
//                   Pulls a fixed number of batches, records every
//                   metric plus the loss per batch, and averages.
//                   Generic over the Layer 3 traits, so its tests
//                   run with no backend at all.
//
// Reference: Burn Book §3 (Building Blocks)
//            Vaswani et al. (2017) Attention Is All You Need

/// Transformer encoder sequence-tagging architecture
pub mod model;

/// Checkpoint-restoring inference wrapper
pub mod inferencer;

/// Batched metric-aggregation evaluation loop
pub mod evaluator;
