// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any business layer:
//
//   params.rs     — Hyperparameter file (params.json)
//                   Loaded once at startup; the only field the
//                   driver writes afterwards is the derived
//                   test-split size.
//
//   checkpoint.rs — Restoring model weights
//                   Uses Burn's CompactRecorder. Verifies the
//                   checkpoint file exists before any load attempt
//                   so a wrong --restore name fails with a clear
//                   message instead of a recorder error.
//
//   results.rs    — Aggregate metrics persistence
//                   Writes the evaluation result as pretty JSON
//                   (metrics_test_<name>.json) and reads it back.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Records and Checkpointing)

/// Hyperparameter JSON file
pub mod params;

/// Model checkpoint loading
pub mod checkpoint;

/// Aggregate metrics JSON writer/reader
pub mod results;
