use std::collections::HashMap;

/// Scores collected at a level before a mean is reported.
const WINDOW: usize = 5;

/// Per-level score buckets with non-overlapping windows of [`WINDOW`]
/// trials. A bucket that fills up yields its mean and starts empty; the
/// next score opens a fresh window rather than sliding the old one.
#[derive(Debug, Default)]
pub struct ScoreHistory {
    buckets: HashMap<usize, Vec<u32>>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }

    /// Record a score under `level`. Returns the truncating integer mean
    /// of the window on every WINDOW-th score at that level.
    pub fn record(&mut self, level: usize, score: u32) -> Option<u32> {
        let bucket = self.buckets.entry(level).or_default();
        bucket.push(score);
        if bucket.len() == WINDOW {
            let mean = bucket.iter().sum::<u32>() / WINDOW as u32;
            bucket.clear();
            Some(mean)
        } else {
            None
        }
    }

    /// Scores currently waiting in the window for `level`.
    pub fn pending(&self, level: usize) -> usize {
        self.buckets.get(&level).map_or(0, Vec::len)
    }
}
