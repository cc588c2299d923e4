//! Compile options
//!
//! Options are usually built in code, but can also be loaded from a JSON
//! document such as `{ "strict": true, "maxDepth": 64 }`.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default limit on pattern nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling a destructuring compilation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Strict mode code: `eval`/`arguments` are not assignable and
    /// assignments to unresolvable names are errors
    pub strict: bool,
    /// Maximum nesting depth of sub-patterns
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    /// Options for strict mode code
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Load options from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("Failed to parse compile options: {}", e)))?;
        if options.max_depth == 0 {
            return Err(Error::ConfigError("maxDepth must be at least 1".to_string()));
        }
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
