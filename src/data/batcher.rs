// ============================================================
// Layer 4 — Tag Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<TagSample>
// into device-ready tensors.
//
// Sentences arrive unpadded, so the batcher pads every sequence
// to the longest one in the batch before stacking:
//   words → pad word id, tags → pad tag id.
// The loss and the metrics both mask those positions later, so
// padding never contributes to a score.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TagSample;

// ─── TagBatch ─────────────────────────────────────────────────────────────────
/// A batch of sentences ready for the model forward pass.
/// Both tensors have shape [batch_size, seq_len].
#[derive(Debug, Clone)]
pub struct TagBatch<B: Backend> {
    /// Word id sequences, padded with the pad word id
    pub input_ids: Tensor<B, 2, Int>,

    /// Tag id sequences, padded with the pad tag id
    pub labels: Tensor<B, 2, Int>,
}

// ─── TagBatcher ───────────────────────────────────────────────────────────────
/// Holds the target device plus the two padding ids so tensors
/// are created on the correct device with consistent padding.
#[derive(Clone, Debug)]
pub struct TagBatcher<B: Backend> {
    pub device:      B::Device,
    pub pad_word_id: usize,
    pub pad_tag_id:  usize,
}

impl<B: Backend> TagBatcher<B> {
    pub fn new(device: B::Device, pad_word_id: usize, pad_tag_id: usize) -> Self {
        Self { device, pad_word_id, pad_tag_id }
    }
}

impl<B: Backend> Batcher<TagSample, TagBatch<B>> for TagBatcher<B> {
    /// Pad every sample to the in-batch maximum length, flatten,
    /// then reshape to [batch_size, seq_len] (Burn uses i32 input
    /// for Int tensors).
    fn batch(&self, items: Vec<TagSample>) -> TagBatch<B> {
        let batch_size = items.len();
        let seq_len = items.iter().map(TagSample::len).max().unwrap_or(0);

        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| pad_ids(&s.tokens, seq_len, self.pad_word_id))
            .collect();

        let label_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| pad_ids(&s.tags, seq_len, self.pad_tag_id))
            .collect();

        let input_ids = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(
            label_flat.as_slice(), &self.device,
        ).reshape([batch_size, seq_len]);

        TagBatch { input_ids, labels }
    }
}

/// Pad an id sequence to `len` with `pad`, converting to i32
fn pad_ids(ids: &[usize], len: usize, pad: usize) -> Vec<i32> {
    let mut out: Vec<i32> = ids.iter().map(|&x| x as i32).collect();
    out.resize(len, pad as i32);
    out
}
