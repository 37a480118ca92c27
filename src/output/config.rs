//! Configuration for report output.

use std::io::IsTerminal;

/// Configuration for report output.
///
/// Use the builder pattern to configure how report lines are rendered:
///
/// ```rust
/// use tinyexpect::OutputConfig;
///
/// let config = OutputConfig::new().colors(false);
/// ```
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether to use ANSI colors for the PASS/FAIL badge.
    pub colors_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            colors_enabled: std::io::stdout().is_terminal(),
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration with defaults.
    ///
    /// Colors are auto-detected from whether stdout is a TTY.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable ANSI colors.
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    /// A plain configuration with colors off, for captured sinks.
    pub fn plain() -> Self {
        Self {
            colors_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_config() {
        assert!(!OutputConfig::plain().colors_enabled);
    }

    #[test]
    fn test_builder_chain() {
        let config = OutputConfig::new().colors(true);
        assert!(config.colors_enabled);
    }
}
