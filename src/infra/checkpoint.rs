// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Restores model weights saved with Burn's CompactRecorder.
//
// File naming convention:
//   <model_dir>/
//     best.mpk.gz        ← weights of the best validation epoch
//     last.mpk.gz        ← weights of the final epoch
//     params.json        ← model hyperparameters
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip for smaller file size
//   - Type-safe: loading fails if the architecture doesn't match
//
// The recorder appends the .mpk.gz extension itself, so the
// existence check and the load call use different paths on
// purpose.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use burn::module::Module;
use burn::record::{CompactRecorder, Recorder};

use crate::domain::traits::CheckpointStore;
use crate::ml::inferencer::EvalBackend;
use crate::ml::model::TagNet;

/// Restores named checkpoints from a model directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// The on-disk file a checkpoint name resolves to
    pub fn checkpoint_file(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.mpk.gz"))
    }

    /// Fail fast when the named checkpoint is not on disk, so the
    /// caller sees the resolved path instead of a recorder error.
    pub fn verify_exists(&self, name: &str) -> Result<()> {
        let file = self.checkpoint_file(name);
        if !file.is_file() {
            return Err(anyhow!(
                "No checkpoint found at '{}' (restore name '{}')",
                file.display(),
                name,
            ));
        }
        Ok(())
    }
}

impl CheckpointStore<TagNet<EvalBackend>> for CheckpointManager {
    /// Load the named checkpoint into a freshly built network.
    /// The network must match the saved architecture exactly.
    fn load(&self, name: &str, model: TagNet<EvalBackend>) -> Result<TagNet<EvalBackend>> {
        self.verify_exists(name)?;

        let device = burn::backend::wgpu::WgpuDevice::default();
        // Path without extension — the recorder adds it
        let path = self.dir.join(name);
        let record = CompactRecorder::new()
            .load(path.clone(), &device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'", path.display())
            })?;

        tracing::debug!("Checkpoint '{}' loaded", name);
        Ok(model.load_record(record))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_file_naming() {
        let ckpt = CheckpointManager::new("experiments/base_model");
        assert_eq!(
            ckpt.checkpoint_file("best"),
            PathBuf::from("experiments/base_model/best.mpk.gz"),
        );
    }

    #[test]
    fn test_verify_exists_names_resolved_path() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().to_str().unwrap());

        let err = ckpt.verify_exists("best").unwrap_err();
        assert!(err.to_string().contains("best.mpk.gz"));
    }

    #[test]
    fn test_verify_exists_passes_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("best.mpk.gz"), b"stub").unwrap();

        let ckpt = CheckpointManager::new(dir.path().to_str().unwrap());
        assert!(ckpt.verify_exists("best").is_ok());
    }
}
