// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// the evaluation loop never touches the numeric framework:
//   - TagInferencer implements EvalModel over burn tensors
//   - BatchGenerator implements BatchSource over the test split
//   - CheckpointManager implements CheckpointStore
// and unit tests substitute plain in-memory stand-ins for all
// three without a device in sight.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::prediction::{TagLabels, TagScores};

// ─── EvalModel ────────────────────────────────────────────────────────────────
/// A trained model under evaluation.
///
/// `Input`, `Labels` and `Output` stay associated types so the
/// device-side representation (tensors, or plain vectors in tests)
/// never leaks into the loop.
pub trait EvalModel {
    type Input;
    type Labels;
    type Output;

    /// Switch into evaluation mode, disabling training-only
    /// stochastic behaviour such as dropout. Called exactly once
    /// before a run, never per batch.
    fn set_eval_mode(&mut self);

    /// Compute model output from one batch of input
    fn forward(&self, input: Self::Input) -> Self::Output;

    /// Scalar loss for one batch of (output, labels)
    fn loss(&self, output: &Self::Output, labels: &Self::Labels) -> f64;

    /// Detach output and labels from the device into plain host
    /// arrays for metric computation. Read-only: must not disturb
    /// the model's internal state.
    fn to_host(&self, output: Self::Output, labels: Self::Labels) -> (TagScores, TagLabels);
}

// ─── BatchSource ──────────────────────────────────────────────────────────────
/// Supplies (input, labels) batches on demand, strictly in order.
///
/// Implementations:
///   - BatchGenerator → slices fixed-size chunks off the test split
///   - test stand-ins → hand a prepared list of batches back
pub trait BatchSource {
    type Input;
    type Labels;

    /// The next batch, or `None` once the source is exhausted
    fn next_batch(&mut self) -> Option<(Self::Input, Self::Labels)>;
}

// ─── CheckpointStore ──────────────────────────────────────────────────────────
/// Restores persisted parameters into a freshly built model.
///
/// Implementations:
///   - CheckpointManager → burn CompactRecorder files on disk
pub trait CheckpointStore<M> {
    /// Load the named checkpoint into `model`, returning the
    /// restored model. Fails if the checkpoint does not exist.
    fn load(&self, name: &str, model: M) -> Result<M>;
}
