//! Validation for rule files.
//!
//! Runs a suite of checks against the rules and the sheets they resolve to,
//! without decoding any image. Used by `splatter validate`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use std::path::Path;

use crate::grouping::ImageSpecMap;
use crate::output::{plural, Printer};
use crate::types::SheetRuleSet;

/// Run all validation checks. Mask paths are resolved against `root`.
pub fn validate_rules(rules: &SheetRuleSet, specs: &ImageSpecMap, root: &Path) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_suffixes(rules));
    result.merge(checks::check_empty_prefixes(rules));
    result.merge(checks::check_duplicate_keys(rules));
    result.merge(checks::check_masks(rules, root));
    result.merge(checks::check_empty_groups(specs));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        let subject = d
            .subject
            .as_ref()
            .map(|s| format!("{}: ", s))
            .unwrap_or_default();
        eprintln!("  {}[{}]: {}{}", label, d.code, subject, d.message);
        if let Some(help) = &d.help {
            eprintln!("    {} {}", printer.dim("help:"), help);
        }
    }

    let errors = plural(result.error_count(), "error", "errors");
    let warnings = plural(result.warning_count(), "warning", "warnings");

    if result.has_errors() {
        printer.error("Failed", &format!("{}, {}", errors, warnings));
    } else if result.has_warnings() {
        printer.warning("Passed", &format!("with {}", warnings));
    } else {
        printer.success("Passed", "no problems found");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::match_rules;
    use crate::types::SheetRule;

    #[test]
    fn test_validate_clean_rules() {
        let dir = tempfile::tempdir().unwrap();
        let rules = SheetRuleSet::new(vec![SheetRule::new("foo", &["a"])]);
        let specs = match_rules(&rules, vec!["foo_1_a.png"]);

        let result = validate_rules(&rules, &specs, dir.path());

        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_collects_every_check() {
        let dir = tempfile::tempdir().unwrap();
        let rules = SheetRuleSet::new(vec![
            SheetRule::new("foo", &["a"]).mask_path("missing.png"),
            SheetRule::new("foo", &["a", "b"]),
            SheetRule::new("bar", &[]),
        ]);
        let specs = match_rules(&rules, vec!["foo_1_a.png"]);

        let result = validate_rules(&rules, &specs, dir.path());

        assert!(result.has_errors());
        assert_eq!(result.with_code("splatter::rules::missing-mask").count(), 1);
        assert_eq!(result.with_code("splatter::rules::duplicate-key").count(), 1);
        assert_eq!(result.with_code("splatter::rules::no-suffixes").count(), 1);
        assert_eq!(result.with_code("splatter::rules::empty-group").count(), 1);
    }
}
