// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw test-split files on disk to the
// device-ready tensor batches the evaluation loop pulls.
//
// The pipeline flows in this order:
//
//   words.txt / tags.txt
//       │
//       ▼
//   Vocab             → token string ↔ id lookup
//       │
//       ▼
//   read_split        → aligned (word ids, tag ids) per sentence
//       │
//       ▼
//   TagDataset        → implements Burn's Dataset trait
//       │
//       ▼
//   TagBatcher        → pads and stacks samples into tensors
//       │
//       ▼
//   BatchGenerator    → feeds batches to the evaluation loop
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Newline-delimited vocabulary files with UNK / <pad> handling
pub mod vocab;

/// Reads the sentences.txt / labels.txt pair of a split
pub mod loader;

/// Implements Burn's Dataset trait for tag samples
pub mod dataset;

/// Implements Burn's Batcher trait to create padded tensor batches
pub mod batcher;

/// Walks the dataset in fixed-size steps as a BatchSource
pub mod generator;
