// ============================================================
// Layer 6 — Hyperparameters
// ============================================================
// The params.json file that travels with a trained model. It holds
// everything needed to rebuild the network for checkpoint restore,
// plus the evaluation batch size and the RNG seed.
//
// Example:
//   {
//     "batch_size": 32,
//     "max_seq_len": 128,
//     "d_model": 128,
//     "num_heads": 4,
//     "num_layers": 2,
//     "d_ff": 512,
//     "dropout": 0.1,
//     "seed": 230
//   }

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_seed() -> u64 {
    230
}

/// Hyperparameters for one trained model.
/// Read-only after loading, except `test_size` which the driver
/// fills in once the test split has been counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Number of sentences per evaluation batch
    pub batch_size: usize,

    /// Longest sentence the position embedding table supports;
    /// longer sentences are truncated at load time
    pub max_seq_len: usize,

    pub d_model:    usize,
    pub num_heads:  usize,
    pub num_layers: usize,
    pub d_ff:       usize,
    pub dropout:    f64,

    /// Backend RNG seed applied once at startup
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of sentences in the test split.
    /// Derived by the driver after loading the data, never read
    /// from the file.
    #[serde(skip)]
    pub test_size: Option<usize>,
}

impl Params {
    /// Load hyperparameters from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| {
                format!("No json configuration file found at '{}'", path.display())
            })?;
        let params: Params = serde_json::from_str(&contents)
            .with_context(|| format!("Cannot parse '{}'", path.display()))?;

        ensure!(params.batch_size >= 1, "batch_size must be at least 1");
        ensure!(params.max_seq_len >= 1, "max_seq_len must be at least 1");

        Ok(params)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            batch_size:  32,
            max_seq_len: 128,
            d_model:     128,
            num_heads:   4,
            num_layers:  2,
            d_ff:        512,
            dropout:     0.1,
            seed:        230,
            test_size:   None,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, serde_json::to_string_pretty(&Params::default()).unwrap())
            .unwrap();

        let params = Params::load(&path).unwrap();
        assert_eq!(params.batch_size, 32);
        assert_eq!(params.seed, 230);
        assert_eq!(params.test_size, None);
    }

    #[test]
    fn test_seed_defaults_when_absent() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(
            &path,
            r#"{"batch_size": 8, "max_seq_len": 64, "d_model": 32,
                "num_heads": 2, "num_layers": 1, "d_ff": 64, "dropout": 0.0}"#,
        )
        .unwrap();

        let params = Params::load(&path).unwrap();
        assert_eq!(params.seed, 230);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Params::load(&dir.path().join("params.json")).unwrap_err();
        assert!(format!("{err:#}").contains("params.json"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(
            &path,
            r#"{"batch_size": 0, "max_seq_len": 64, "d_model": 32,
                "num_heads": 2, "num_layers": 1, "d_ff": 64, "dropout": 0.0}"#,
        )
        .unwrap();

        assert!(Params::load(&path).is_err());
    }
}
