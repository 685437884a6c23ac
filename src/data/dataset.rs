use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One encoded sentence: word ids and tag ids, aligned one-to-one,
/// unpadded. Padding happens per batch in the batcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSample {
    pub tokens: Vec<usize>,
    pub tags:   Vec<usize>,
}

impl TagSample {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub struct TagDataset {
    samples: Vec<TagSample>,
}

impl TagDataset {
    pub fn new(samples: Vec<TagSample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<TagSample> for TagDataset {
    fn get(&self, index: usize) -> Option<TagSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
