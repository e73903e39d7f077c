//! Run configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inclusive epoch interval `[start, end]` driving the outer loop.
///
/// Epoch numbers are 1-based. The range is empty when `start > end`;
/// the terminal condition is `epoch > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochRange {
    /// First epoch to run
    pub start: usize,
    /// Last epoch to run, inclusive
    pub end: usize,
}

impl EpochRange {
    /// Create the inclusive range `[start, end]`
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of epochs in the range; zero when `start > end`
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Whether the range contains no epochs
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Iterate the epochs in order
    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Configuration for one training run.
///
/// Serialized verbatim into the run manifest by the file recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Run name; names the run directory
    pub run_name: String,
    /// Epochs to execute
    pub epochs: EpochRange,
    /// Restore weights from this file instead of fresh initialization
    pub weights_file: Option<PathBuf>,
    /// Trace step compute time every N global steps
    pub profile_every: Option<u64>,
    /// Write a training summary row every N global steps
    pub summary_every: Option<u64>,
    /// Ask the input pipeline to log annotated images where supported
    pub log_annotated_images: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_range_len() {
        assert_eq!(EpochRange::new(1, 3).len(), 3);
        assert_eq!(EpochRange::new(5, 5).len(), 1);
        assert_eq!(EpochRange::new(4, 3).len(), 0);
    }

    #[test]
    fn test_empty_range_iterates_nothing() {
        let range = EpochRange::new(10, 2);
        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
    }

    #[test]
    fn test_range_iterates_inclusively() {
        let epochs: Vec<usize> = EpochRange::new(2, 5).iter().collect();
        assert_eq!(epochs, vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_run_config_json_round_trip() {
        let config = RunConfig {
            run_name: "20260806-demo".into(),
            epochs: EpochRange::new(1, 100),
            weights_file: Some(PathBuf::from("weights.json")),
            profile_every: Some(500),
            summary_every: None,
            log_annotated_images: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run_name, config.run_name);
        assert_eq!(back.epochs, config.epochs);
        assert_eq!(back.weights_file, config.weights_file);
    }
}
