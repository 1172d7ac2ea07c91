use common_framework::{Result, ScanError};
use serde::{Deserialize, Serialize};

/// Tunables shared by the cursor and the driver built on top of it.
///
/// Hosts that keep their own configuration files can embed this struct
/// directly; missing keys fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of source lines shown around the failing line in a
    /// `SyntaxError`. Must be odd so the failing line can sit in the middle.
    pub context_lines: usize,
    /// Maximum nesting of node parses before the driver gives up with
    /// `ScanError::DepthExceeded`.
    pub max_depth: usize,
}

impl ScanConfig {
    pub const DEFAULT_CONTEXT_LINES: usize = 9;
    pub const DEFAULT_MAX_DEPTH: usize = 1000;

    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.context_lines % 2 == 0 {
            return Err(ScanError::invalid_argument(format!(
                "context_lines should be odd, got {}",
                self.context_lines
            )));
        }
        if self.max_depth == 0 {
            return Err(ScanError::invalid_argument("max_depth should be positive"));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            context_lines: Self::DEFAULT_CONTEXT_LINES,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
