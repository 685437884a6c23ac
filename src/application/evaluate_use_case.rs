// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Orchestrates the full evaluation run in order:
//
//   Step 1: Load params.json            (Layer 6 - infra)
//   Step 2: Seed the backend RNG        (Layer 5 - ml)
//   Step 3: Load vocabularies           (Layer 4 - data)
//   Step 4: Read the test split         (Layer 4 - data)
//   Step 5: Build the batch generator   (Layer 4 - data)
//   Step 6: Restore the checkpoint      (Layer 6 - infra / Layer 5 - ml)
//   Step 7: Run the evaluation loop     (Layer 5 - ml)
//   Step 8: Persist the result file     (Layer 6 - infra)
//
// Every failure before Step 8 aborts the run with a context chain
// naming the offending path; no result file is written.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::data::{
    batcher::TagBatcher,
    dataset::TagDataset,
    generator::BatchGenerator,
    loader::read_split,
    vocab::{Vocab, PAD_TAG, PAD_WORD},
};
use crate::domain::metrics::default_metrics;
use crate::infra::{checkpoint::CheckpointManager, params::Params, results};
use crate::ml::evaluator::evaluate;
use crate::ml::inferencer::{EvalBackend, TagInferencer};

// ─── Evaluation Configuration ────────────────────────────────────────────────
// Everything the run needs from the outside world. The checkpoint
// name is explicit and required — there is no sentinel to forget.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub data_dir:  String,
    pub model_dir: String,
    pub restore:   String,
}

// ─── EvaluateUseCase ─────────────────────────────────────────────────────────
// Owns the config and runs the full evaluation pipeline.
pub struct EvaluateUseCase {
    config: EvalConfig,
}

impl EvaluateUseCase {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Execute the full evaluation pipeline end to end.
    /// Returns the path of the written result file.
    pub fn execute(&self) -> Result<PathBuf> {
        use burn::prelude::Backend;

        let cfg       = &self.config;
        let data_dir  = Path::new(&cfg.data_dir);
        let model_dir = Path::new(&cfg.model_dir);

        // ── Step 1: Load hyperparameters ──────────────────────────────────────
        let mut params = Params::load(&model_dir.join("params.json"))?;

        // ── Step 2: Seed the backend RNG ──────────────────────────────────────
        // Explicit startup configuration, not a module-level side effect
        EvalBackend::seed(params.seed);

        // ── Step 3: Load vocabularies ─────────────────────────────────────────
        tracing::info!("Creating the dataset...");
        let words = Vocab::load(&data_dir.join("words.txt"))?;
        let mut tags = Vocab::load(&data_dir.join("tags.txt"))?;

        let pad_word_id = words.require(PAD_WORD)
            .with_context(|| "Word vocabulary is missing the reserved <pad> entry")?;
        // The tag vocabulary gains a padding class when the file
        // does not carry one; the loss and metrics mask it out.
        let pad_tag_id = tags.push_if_absent(PAD_TAG);

        // ── Step 4: Read the test split ───────────────────────────────────────
        let samples = read_split(data_dir, "test", &words, &tags, params.max_seq_len)?;
        params.test_size = Some(samples.len());
        tracing::info!("- done.");

        // ── Step 5: Build the batch generator ─────────────────────────────────
        let test_size = samples.len();
        let dataset   = TagDataset::new(samples);
        let batcher   = TagBatcher::<EvalBackend>::new(
            Default::default(), pad_word_id, pad_tag_id,
        );
        let mut generator = BatchGenerator::new(batcher, dataset, params.batch_size);

        // ── Step 6: Restore the checkpoint ────────────────────────────────────
        tracing::info!("Starting evaluation");
        let ckpt_manager = CheckpointManager::new(&cfg.model_dir);
        ckpt_manager.verify_exists(&cfg.restore)?;
        let mut inferencer = TagInferencer::from_checkpoint(
            &ckpt_manager, &params, words.len(), tags.len(), pad_tag_id, &cfg.restore,
        )?;

        // ── Step 7: Run the evaluation loop ───────────────────────────────────
        let batches = num_batches(test_size, params.batch_size);
        let means = evaluate(&mut inferencer, &mut generator, &default_metrics(), batches)?;

        // ── Step 8: Persist the result file ───────────────────────────────────
        let save_path = model_dir.join(results::result_filename(&cfg.restore));
        results::save_metrics(&means, &save_path)?;

        Ok(save_path)
    }
}

/// Number of evaluation batches for a split of `test_size` sentences
fn num_batches(test_size: usize, batch_size: usize) -> usize {
    (test_size + 1) / batch_size
}
