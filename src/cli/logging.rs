//! Log level for console output

/// How much the console recorder and wiring are allowed to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_eq() {
        assert_eq!(LogLevel::Quiet, LogLevel::Quiet);
        assert_ne!(LogLevel::Quiet, LogLevel::Verbose);
    }
}
