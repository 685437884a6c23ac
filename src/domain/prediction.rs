// ============================================================
// Layer 3 — Host-Side Batch Arrays
// ============================================================
// Once a batch has been through the model, its output and labels
// are detached from the device and flattened into these plain
// numeric arrays so metric functions stay framework-free.

/// Label value marking a padding position.
/// Metric functions must skip tokens carrying this label.
pub const PAD_LABEL: i64 = -1;

/// Per-token class scores for one batch, flattened row-major to
/// `[tokens, classes]`. Scores are log-probabilities, so the
/// predicted class of a row is simply its argmax.
#[derive(Debug, Clone, PartialEq)]
pub struct TagScores {
    classes: usize,
    values:  Vec<f32>,
}

impl TagScores {
    /// Build from a flat row-major buffer.
    /// `values.len()` must be a multiple of `classes`.
    pub fn new(classes: usize, values: Vec<f32>) -> Self {
        debug_assert!(classes > 0);
        debug_assert_eq!(values.len() % classes, 0);
        Self { classes, values }
    }

    pub fn classes(&self) -> usize {
        self.classes
    }

    /// Number of token rows in this batch
    pub fn rows(&self) -> usize {
        self.values.len() / self.classes
    }

    /// The score slice for one token row
    pub fn row(&self, index: usize) -> &[f32] {
        let start = index * self.classes;
        &self.values[start..start + self.classes]
    }

    /// Index of the highest-scoring class for one token row.
    /// Ties resolve to the first maximum.
    pub fn argmax_row(&self, index: usize) -> usize {
        let row = self.row(index);
        let mut best = 0;
        for (i, &v) in row.iter().enumerate() {
            if v > row[best] {
                best = i;
            }
        }
        best
    }
}

/// Ground-truth label ids for one batch, one per token row,
/// with padding positions re-encoded as [`PAD_LABEL`].
#[derive(Debug, Clone, PartialEq)]
pub struct TagLabels {
    ids: Vec<i64>,
}

impl TagLabels {
    pub fn new(ids: Vec<i64>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> i64 {
        self.ids[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }
}
