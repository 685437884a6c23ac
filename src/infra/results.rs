// ============================================================
// Layer 6 — Result Persistence
// ============================================================
// Writes the aggregate metrics of an evaluation run to disk as
// pretty JSON, one float per metric name:
//
//   {
//     "accuracy": 0.667,
//     "loss": 0.5
//   }
//
// The file is written in one shot after the full aggregate exists;
// a failed run leaves no file behind.

use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::metrics::MetricsMean;

/// The conventional result filename for a given checkpoint name
pub fn result_filename(restore: &str) -> String {
    format!("metrics_test_{restore}.json")
}

/// Serialise the aggregate mapping to `path`.
pub fn save_metrics(means: &MetricsMean, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(means)?;
    std::fs::write(path, json)
        .with_context(|| format!("Cannot write metrics to '{}'", path.display()))?;

    tracing::info!("Metrics saved to '{}'", path.display());
    Ok(())
}

/// Read an aggregate mapping back from `path`.
pub fn load_metrics(path: &Path) -> Result<MetricsMean> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read metrics from '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Cannot parse metrics from '{}'", path.display()))
}
