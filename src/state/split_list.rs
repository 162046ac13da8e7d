//! Ordered list of recorded split times

/// Split times in seconds, in the order they were taken
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitList {
    splits: Vec<f64>,
}

impl SplitList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a split. Callers keep the list in chronological order.
    pub fn push(&mut self, seconds: f64) {
        self.splits.push(seconds);
    }

    pub fn clear(&mut self) {
        self.splits.clear();
    }

    /// Number of splits recorded
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    /// Split at 0-based `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        self.splits.get(index).copied()
    }

    /// Split seconds, oldest first
    pub fn as_slice(&self) -> &[f64] {
        &self.splits
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.splits.iter().copied()
    }
}

impl From<Vec<f64>> for SplitList {
    fn from(splits: Vec<f64>) -> Self {
        Self { splits }
    }
}
