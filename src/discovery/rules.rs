//! Rule file loading.
//!
//! The rule file is a JSON array of sheet rules:
//!
//! ```json
//! [
//!   { "prefix": "walk", "suffixes": ["n", "e", "s", "w"], "mask": "masks/walk.png" },
//!   { "prefixes": ["idle_1", "idle_2"], "suffixes": ["n", "s"] }
//! ]
//! ```
//!
//! Files ending in `.yaml` or `.yml` are read as YAML with the same schema.

use std::path::Path;

use crate::error::{Result, SplatterError};
use crate::types::SheetRuleSet;

/// Serialization format of a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Json,
    Yaml,
}

impl RuleFormat {
    /// Pick the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => RuleFormat::Yaml,
            _ => RuleFormat::Json,
        }
    }
}

/// Load and parse a rule file.
pub fn load_rules(path: &Path) -> Result<SheetRuleSet> {
    let content = std::fs::read_to_string(path).map_err(|e| SplatterError::Io {
        path: path.to_path_buf(),
        message: format!("Couldn't open definition file: {}", e),
    })?;

    parse_rules(&content, RuleFormat::from_path(path))
}

/// Parse rule file content.
pub fn parse_rules(content: &str, format: RuleFormat) -> Result<SheetRuleSet> {
    match format {
        RuleFormat::Json => serde_json::from_str(content).map_err(|e| SplatterError::Parse {
            message: format!("Couldn't read JSON definitions: {}", e),
            help: Some(
                "Expected an array of objects with \"prefix\"/\"prefixes\", \"suffixes\" and an optional \"mask\""
                    .to_string(),
            ),
        }),
        RuleFormat::Yaml => serde_yaml::from_str(content).map_err(|e| SplatterError::Parse {
            message: format!("Couldn't read YAML definitions: {}", e),
            help: Some("Expected a list of rules with prefix/prefixes, suffixes and an optional mask".to_string()),
        }),
    }
}
