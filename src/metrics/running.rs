//! Incremental running mean

/// Running arithmetic mean over a stream of values.
///
/// Updates use incremental weighted averaging:
/// `new = (value + i * old) / (i + 1)` where `i` is the zero-based index
/// of the incoming value. After pushing `i + 1` values the accumulator
/// equals their exact arithmetic mean; with no values pushed it reads
/// zero, which is the defined result for an empty pass.
///
/// Accumulators live for one validation pass: reset (freshly constructed)
/// at pass start, reported at pass end, then discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningMean {
    mean: f64,
    count: u64,
}

impl RunningMean {
    /// Fresh accumulator reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one value into the mean
    pub fn push(&mut self, value: f64) {
        let i = self.count as f64;
        self.mean = (value + i * self.mean) / (i + 1.0);
        self.count += 1;
    }

    /// Current mean; zero when nothing has been pushed
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of values folded in so far
    pub fn count(&self) -> u64 {
        self.count
    }
}
