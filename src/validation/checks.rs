//! Validation checks for rule files.
//!
//! Each check returns a `ValidationResult`.

use std::collections::HashMap;
use std::path::Path;

use crate::grouping::ImageSpecMap;
use crate::types::{group_key, SheetRuleSet};

use super::warning::{Diagnostic, ValidationResult};

fn rule_label(index: usize) -> String {
    format!("rule {}", index + 1)
}

/// Rules with no suffixes define no sheets.
pub fn check_suffixes(rules: &SheetRuleSet) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, rule) in rules.iter().enumerate() {
        if rule.suffixes.is_empty() {
            result.push(
                Diagnostic::warning(
                    "splatter::rules::no-suffixes",
                    "Rule has no suffixes and produces no sheets",
                )
                .about(rule_label(i))
                .with_help("Add a \"suffixes\" list"),
            );
        }
    }

    result
}

/// An empty prefix matches every frame with the right suffix.
pub fn check_empty_prefixes(rules: &SheetRuleSet) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, rule) in rules.iter().enumerate() {
        if rule.effective_prefixes().iter().any(|p| p.is_empty()) {
            result.push(
                Diagnostic::warning(
                    "splatter::rules::empty-prefix",
                    "Empty prefix matches every frame ending in one of the suffixes",
                )
                .about(rule_label(i))
                .with_help("Set \"prefix\" or \"prefixes\""),
            );
        }
    }

    result
}

/// Sheets defined by more than one rule: the last rule replaces the others.
pub fn check_duplicate_keys(rules: &SheetRuleSet) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut owners: HashMap<String, usize> = HashMap::new();

    for (i, rule) in rules.iter().enumerate() {
        for (prefix, suffix) in rule.pairs() {
            let key = group_key(prefix, suffix);
            if let Some(previous) = owners.insert(key.clone(), i) {
                if previous != i {
                    result.push(
                        Diagnostic::warning(
                            "splatter::rules::duplicate-key",
                            format!(
                                "Sheet defined by {} is replaced by {}",
                                rule_label(previous),
                                rule_label(i)
                            ),
                        )
                        .about(key)
                        .with_help("Frame lists are not merged; only the last rule applies"),
                    );
                }
            }
        }
    }

    result
}

/// Rule masks must exist. Paths are resolved against `root`.
pub fn check_masks(rules: &SheetRuleSet, root: &Path) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, rule) in rules.iter().enumerate() {
        if let Some(mask) = rule.mask() {
            if !root.join(mask).is_file() {
                result.push(
                    Diagnostic::error(
                        "splatter::rules::missing-mask",
                        format!("Mask '{}' not found", mask),
                    )
                    .about(rule_label(i))
                    .with_help("Mask paths are relative to the directory splatter runs in"),
                );
            }
        }
    }

    result
}

/// Sheets that matched no frames are skipped at build time.
pub fn check_empty_groups(specs: &ImageSpecMap) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, spec) in specs {
        if spec.is_empty() {
            result.push(
                Diagnostic::warning(
                    "splatter::rules::empty-group",
                    "No frames matched; the sheet will be skipped",
                )
                .about(name.clone()),
            );
        }
    }

    result
}
