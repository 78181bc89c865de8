//! Interpreter configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::runner::ds::error::JErrorType;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;
pub const DEFAULT_META_SWEEP_THRESHOLD: usize = 64;

/// Tunables for an [`EvalContext`](super::types::EvalContext).
///
/// Every field is optional in the JSON form:
/// ```json
/// {
///     "max_call_depth": 512,
///     "exit_on_fatal": false,
///     "meta_sweep_threshold": 64
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Nested calls allowed before evaluation fails with a stack overflow.
    pub max_call_depth: usize,
    /// Report fatal errors on stderr and exit the process instead of
    /// returning them to the caller.
    pub exit_on_fatal: bool,
    /// Size the meta cache may reach before dead entries are reclaimed.
    pub meta_sweep_threshold: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            exit_on_fatal: false,
            meta_sweep_threshold: DEFAULT_META_SWEEP_THRESHOLD,
        }
    }
}

impl EvalConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, JErrorType> {
        let content = fs::read_to_string(path).map_err(|e| {
            JErrorType::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn parse(content: &str) -> Result<Self, JErrorType> {
        serde_json::from_str(content).map_err(|e| JErrorType::ConfigError(e.to_string()))
    }
}
