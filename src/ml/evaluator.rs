// ============================================================
// Layer 5 — Evaluation Loop
// ============================================================
// Runs a fixed number of inference steps over a model in
// evaluation mode and averages the metrics.
//
// Per batch, strictly in order:
//   1. draw the next (input, labels) pair from the source
//   2. forward pass
//   3. scalar loss
//   4. detach output and labels to host arrays
//   5. every registered metric over the host arrays
//   6. the loss under the reserved "loss" key
//   7. append the record
//
// After the last batch, each key of the first record is averaged
// across all records and the result logged on a single line.
// All records carry the same key set by construction.
//
// Generic over the Layer 3 traits, so everything here is testable
// with plain in-memory stand-ins.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::metrics::{MetricSet, MetricsMean, LOSS_KEY};
use crate::domain::traits::{BatchSource, EvalModel};

/// Failure conditions of an evaluation run. Both are caller
/// contract violations — there is nothing to retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// The batch source ran dry before the requested count was reached.
    /// A mismatch between the reported split size and the actual data.
    #[error("batch source exhausted after {yielded} of {requested} batches")]
    ExhaustedSource { yielded: usize, requested: usize },

    /// Zero batches requested — there would be no record to average
    #[error("evaluation requested over zero batches")]
    EmptyEvaluation,
}

/// Evaluate `model` on exactly `num_batches` batches from `batches`,
/// returning the per-name arithmetic mean of every metric plus the loss.
///
/// The model is switched into evaluation mode once, up front. The
/// source is consumed strictly sequentially with no look-ahead; the
/// loop has no side effect beyond the single summary log line.
pub fn evaluate<M, S>(
    model:       &mut M,
    batches:     &mut S,
    metrics:     &MetricSet,
    num_batches: usize,
) -> Result<MetricsMean, EvalError>
where
    M: EvalModel,
    S: BatchSource<Input = M::Input, Labels = M::Labels>,
{
    if num_batches == 0 {
        return Err(EvalError::EmptyEvaluation);
    }

    model.set_eval_mode();
    let mut summary: Vec<BTreeMap<String, f64>> = Vec::with_capacity(num_batches);

    for drawn in 0..num_batches {
        let (input, labels) = batches.next_batch().ok_or(EvalError::ExhaustedSource {
            yielded:   drawn,
            requested: num_batches,
        })?;

        let output = model.forward(input);
        let loss   = model.loss(&output, &labels);
        let (scores, labels) = model.to_host(output, labels);

        let mut record = BTreeMap::new();
        for (name, metric) in metrics.iter() {
            record.insert(name.to_string(), metric(&scores, &labels));
        }
        record.insert(LOSS_KEY.to_string(), loss);
        summary.push(record);
    }

    let batches_run = summary.len() as f64;
    let mut means = MetricsMean::new();
    for key in summary[0].keys() {
        let total: f64 = summary.iter().map(|record| record[key]).sum();
        means.insert(key.clone(), total / batches_run);
    }

    tracing::info!("Eval metrics: {}", format_metrics_line(&means));
    Ok(means)
}

/// Render the aggregate as `name: 0.000` pairs joined by ` ; `
pub fn format_metrics_line(means: &MetricsMean) -> String {
    means
        .iter()
        .map(|(name, value)| format!("{}: {:05.3}", name, value))
        .collect::<Vec<_>>()
        .join(" ; ")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
// The loop is exercised end to end against stand-ins: a model that
// echoes prepared scores and a source that hands out a fixed list
// of batches. No backend, no tensors.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::{accuracy, default_metrics, MetricSet};
    use crate::domain::prediction::{TagLabels, TagScores};
    use crate::domain::traits::{BatchSource, EvalModel};

    /// Echoes its input scores back as output and reports a fixed loss
    struct StubModel {
        loss_value:      f64,
        eval_mode_calls: usize,
    }

    impl StubModel {
        fn with_loss(loss_value: f64) -> Self {
            Self { loss_value, eval_mode_calls: 0 }
        }
    }

    impl EvalModel for StubModel {
        type Input  = TagScores;
        type Labels = TagLabels;
        type Output = TagScores;

        fn set_eval_mode(&mut self) {
            self.eval_mode_calls += 1;
        }

        fn forward(&self, input: Self::Input) -> Self::Output {
            input
        }

        fn loss(&self, _output: &Self::Output, _labels: &Self::Labels) -> f64 {
            self.loss_value
        }

        fn to_host(&self, output: Self::Output, labels: Self::Labels) -> (TagScores, TagLabels) {
            (output, labels)
        }
    }

    struct StubSource {
        batches: std::collections::VecDeque<(TagScores, TagLabels)>,
    }

    impl StubSource {
        fn of(batches: Vec<(TagScores, TagLabels)>) -> Self {
            Self { batches: batches.into() }
        }
    }

    impl BatchSource for StubSource {
        type Input  = TagScores;
        type Labels = TagLabels;

        fn next_batch(&mut self) -> Option<(Self::Input, Self::Labels)> {
            self.batches.pop_front()
        }
    }

    /// One single-token batch whose scores predict class 1 over two classes
    fn predicts_one(label: i64) -> (TagScores, TagLabels) {
        (
            TagScores::new(2, vec![0.1, 0.9]),
            TagLabels::new(vec![label]),
        )
    }

    /// Three batches with labels 1, 0, 1 against a model always predicting 1
    fn three_batches() -> Vec<(TagScores, TagLabels)> {
        vec![predicts_one(1), predicts_one(0), predicts_one(1)]
    }

    #[test]
    fn test_key_set_is_metrics_plus_loss() {
        let mut model  = StubModel::with_loss(1.0);
        let mut source = StubSource::of(three_batches());

        let means = evaluate(&mut model, &mut source, &default_metrics(), 3).unwrap();
        let keys: Vec<&str> = means.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["accuracy", "loss"]);
    }

    #[test]
    fn test_constant_loss_averages_to_itself() {
        let mut model  = StubModel::with_loss(2.0);
        let mut source = StubSource::of(three_batches());

        let means = evaluate(&mut model, &mut source, &default_metrics(), 3).unwrap();
        assert!((means["loss"] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_and_loss_scenario() {
        // Per-batch accuracies 1.0, 0.0, 1.0 → mean 2/3; loss 0.5 per batch
        let mut model  = StubModel::with_loss(0.5);
        let mut source = StubSource::of(three_batches());

        let means = evaluate(&mut model, &mut source, &default_metrics(), 3).unwrap();
        assert!((means["accuracy"] - 2.0 / 3.0).abs() < 1e-9);
        assert!((means["loss"] - 0.5).abs() < 1e-9);
        assert_eq!(
            format_metrics_line(&means),
            "accuracy: 0.667 ; loss: 0.500",
        );
    }

    #[test]
    fn test_eval_mode_switched_exactly_once() {
        let mut model  = StubModel::with_loss(1.0);
        let mut source = StubSource::of(three_batches());

        evaluate(&mut model, &mut source, &default_metrics(), 3).unwrap();
        assert_eq!(model.eval_mode_calls, 1);
    }

    #[test]
    fn test_consumes_exactly_the_requested_count() {
        let mut model  = StubModel::with_loss(1.0);
        let mut source = StubSource::of(three_batches());

        evaluate(&mut model, &mut source, &default_metrics(), 2).unwrap();
        // The third batch must still be sitting in the source
        assert_eq!(source.batches.len(), 1);
    }

    #[test]
    fn test_zero_batches_rejected() {
        let mut model  = StubModel::with_loss(1.0);
        let mut source = StubSource::of(three_batches());

        let err = evaluate(&mut model, &mut source, &default_metrics(), 0).unwrap_err();
        assert_eq!(err, EvalError::EmptyEvaluation);
    }

    #[test]
    fn test_exhausted_source_propagates() {
        let mut model  = StubModel::with_loss(1.0);
        let mut source = StubSource::of(three_batches());

        let err = evaluate(&mut model, &mut source, &default_metrics(), 5).unwrap_err();
        assert_eq!(err, EvalError::ExhaustedSource { yielded: 3, requested: 5 });
    }

    #[test]
    fn test_idempotent_over_fresh_sources() {
        let mut model = StubModel::with_loss(0.25);
        let metrics   = default_metrics();

        let mut first_source  = StubSource::of(three_batches());
        let first  = evaluate(&mut model, &mut first_source, &metrics, 3).unwrap();
        let mut second_source = StubSource::of(three_batches());
        let second = evaluate(&mut model, &mut second_source, &metrics, 3).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_extra_metric_shows_up_in_result() {
        fn token_count(scores: &TagScores, _: &TagLabels) -> f64 {
            scores.rows() as f64
        }
        let metrics = MetricSet::new()
            .with("accuracy", accuracy)
            .with("tokens", token_count);

        let mut model  = StubModel::with_loss(1.0);
        let mut source = StubSource::of(three_batches());

        let means = evaluate(&mut model, &mut source, &metrics, 3).unwrap();
        assert!((means["tokens"] - 1.0).abs() < 1e-9);
        assert_eq!(means.len(), 3);
    }
}
