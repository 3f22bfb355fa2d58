//! Sheet rules: which frames go into which sheet.

use serde::{Deserialize, Serialize};

/// One sheet definition from the rule file.
///
/// Every (prefix, suffix) pair names one output sheet, `prefix_suffix`.
/// The legacy singular `prefix` is only consulted when `prefixes` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetRule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,

    pub suffixes: Vec<String>,

    /// Mask image path, relative to the invocation directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

impl SheetRule {
    /// A rule with a single prefix.
    pub fn new(prefix: impl Into<String>, suffixes: &[&str]) -> Self {
        Self {
            prefix: prefix.into(),
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// A rule with several prefixes.
    pub fn with_prefixes(prefixes: &[&str], suffixes: &[&str]) -> Self {
        Self {
            prefixes: prefixes.iter().map(|s| s.to_string()).collect(),
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn mask_path(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// Prefixes in declared order, falling back to the singular `prefix`.
    pub fn effective_prefixes(&self) -> Vec<&str> {
        if self.prefixes.is_empty() {
            vec![self.prefix.as_str()]
        } else {
            self.prefixes.iter().map(|p| p.as_str()).collect()
        }
    }

    /// The mask path, treating an empty string as absent.
    pub fn mask(&self) -> Option<&str> {
        self.mask.as_deref().filter(|m| !m.is_empty())
    }

    /// Every (prefix, suffix) pair this rule defines, prefixes outermost.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for prefix in self.effective_prefixes() {
            for suffix in &self.suffixes {
                pairs.push((prefix, suffix.as_str()));
            }
        }
        pairs
    }
}

/// Name of the sheet built from a (prefix, suffix) pair.
pub fn group_key(prefix: &str, suffix: &str) -> String {
    format!("{}_{}", prefix, suffix)
}

/// The ordered rule list loaded from a definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetRuleSet {
    rules: Vec<SheetRule>,
}

impl SheetRuleSet {
    pub fn new(rules: Vec<SheetRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SheetRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SheetRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<SheetRule>> for SheetRuleSet {
    fn from(rules: Vec<SheetRule>) -> Self {
        Self::new(rules)
    }
}

impl<'a> IntoIterator for &'a SheetRuleSet {
    type Item = &'a SheetRule;
    type IntoIter = std::slice::Iter<'a, SheetRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
