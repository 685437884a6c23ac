// ============================================================
// Layer 4 — Batch Generator
// ============================================================
// Walks the dataset front to back in fixed-size steps, handing
// each slice to the batcher. This is the concrete BatchSource the
// evaluation loop consumes: strictly sequential, one pull per
// call, no look-ahead, and a short final batch when the split
// size is not a multiple of the batch size.

use burn::data::dataset::Dataset;
use burn::prelude::*;

use crate::data::batcher::TagBatcher;
use crate::data::dataset::{TagDataset, TagSample};
use crate::domain::traits::BatchSource;

pub struct BatchGenerator<B: Backend> {
    batcher:    TagBatcher<B>,
    dataset:    TagDataset,
    batch_size: usize,
    cursor:     usize,
}

impl<B: Backend> BatchGenerator<B> {
    pub fn new(batcher: TagBatcher<B>, dataset: TagDataset, batch_size: usize) -> Self {
        Self { batcher, dataset, batch_size, cursor: 0 }
    }

    /// Number of pulls this generator can still serve
    pub fn remaining_batches(&self) -> usize {
        let remaining = self.dataset.len().saturating_sub(self.cursor);
        remaining.div_ceil(self.batch_size)
    }
}

impl<B: Backend> BatchSource for BatchGenerator<B> {
    type Input  = Tensor<B, 2, Int>;
    type Labels = Tensor<B, 2, Int>;

    fn next_batch(&mut self) -> Option<(Self::Input, Self::Labels)> {
        use burn::data::dataloader::batcher::Batcher;

        if self.cursor >= self.dataset.len() {
            return None;
        }

        let end = (self.cursor + self.batch_size).min(self.dataset.len());
        let items: Vec<TagSample> = (self.cursor..end)
            .filter_map(|i| self.dataset.get(i))
            .collect();
        self.cursor = end;

        let batch = self.batcher.batch(items);
        Some((batch.input_ids, batch.labels))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn sample(n: usize) -> TagSample {
        TagSample { tokens: vec![n; 2], tags: vec![0; 2] }
    }

    fn generator(count: usize, batch_size: usize) -> BatchGenerator<TestBackend> {
        let batcher = TagBatcher::new(Default::default(), 0, 0);
        let dataset = TagDataset::new((0..count).map(sample).collect());
        BatchGenerator::new(batcher, dataset, batch_size)
    }

    #[test]
    fn test_yields_fixed_size_then_short_tail() {
        let mut gen = generator(5, 2);
        assert_eq!(gen.remaining_batches(), 3);

        let (input, _) = gen.next_batch().unwrap();
        assert_eq!(input.dims(), [2, 2]);
        let (input, _) = gen.next_batch().unwrap();
        assert_eq!(input.dims(), [2, 2]);
        // Tail batch holds the one leftover sample
        let (input, _) = gen.next_batch().unwrap();
        assert_eq!(input.dims(), [1, 2]);

        assert!(gen.next_batch().is_none());
        assert_eq!(gen.remaining_batches(), 0);
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let mut gen = generator(1, 4);
        assert!(gen.next_batch().is_some());
        assert!(gen.next_batch().is_none());
        assert!(gen.next_batch().is_none());
    }
}
