// ============================================================
// Layer 3 — Metric Functions
// ============================================================
// A metric is a pure function of (scores, labels) for one batch.
// Metrics are registered by name in a MetricSet; the evaluation
// loop applies every registered metric to every batch and then
// averages per name. The key "loss" is reserved for the model's
// own loss value and must not be used as a metric name.

use std::collections::BTreeMap;

use crate::domain::prediction::{TagLabels, TagScores, PAD_LABEL};

/// Reserved key under which the evaluation loop records the loss
pub const LOSS_KEY: &str = "loss";

/// A pure scalar metric over one batch of host-side arrays
pub type MetricFn = fn(&TagScores, &TagLabels) -> f64;

/// Aggregate result of an evaluation run: metric name → mean value
pub type MetricsMean = BTreeMap<String, f64>;

/// Named metric functions, applied in insertion order.
#[derive(Clone, Default)]
pub struct MetricSet {
    entries: Vec<(String, MetricFn)>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register a metric under a name (builder style)
    pub fn with(mut self, name: impl Into<String>, metric: MetricFn) -> Self {
        self.entries.push((name.into(), metric));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MetricFn)> + '_ {
        self.entries.iter().map(|(n, f)| (n.as_str(), *f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The metrics reported for the tagger.
pub fn default_metrics() -> MetricSet {
    MetricSet::new().with("accuracy", accuracy)
}

/// Fraction of non-padding tokens whose argmax class equals the label.
/// Returns 0.0 when the batch contains only padding.
pub fn accuracy(scores: &TagScores, labels: &TagLabels) -> f64 {
    let mut correct = 0usize;
    let mut total   = 0usize;

    for row in 0..scores.rows() {
        let label = labels.get(row);
        if label == PAD_LABEL {
            continue;
        }
        total += 1;
        if scores.argmax_row(row) as i64 == label {
            correct += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64
}
