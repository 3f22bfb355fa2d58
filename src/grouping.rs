//! Rule matching.
//!
//! Turns a rule set and a flat list of filenames into the sheets to build.
//! Frame order inside a sheet is the byte-wise sort order of the filenames,
//! which is also the top-to-bottom stacking order of the output image.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{group_key, SheetRuleSet};

/// File extension every frame must carry, appended to the rule suffix.
pub const FRAME_EXTENSION: &str = ".png";

/// The resolved inputs of one output sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageSpec {
    /// Matched frame filenames, sorted.
    pub files: Vec<String>,
    /// Mask path from the rule that produced this sheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

impl ImageSpec {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Sheets keyed by group key, iterated in sorted key order.
pub type ImageSpecMap = BTreeMap<String, ImageSpec>;

/// Whether `filename` belongs to the (prefix, suffix) group.
///
/// Exact, case-sensitive substring tests: the name starts with `prefix` and
/// ends with `suffix` followed by `.png`.
pub fn matches_group(filename: &str, prefix: &str, suffix: &str) -> bool {
    filename.starts_with(prefix)
        && filename
            .strip_suffix(FRAME_EXTENSION)
            .is_some_and(|stem| stem.ends_with(suffix))
}

/// Match filenames against every rule.
///
/// Each (prefix, suffix) pair yields exactly one entry, even when nothing
/// matches. A filename may land in several sheets. When two pairs produce
/// the same key, the later one replaces the earlier entry outright.
pub fn match_rules<I, S>(rules: &SheetRuleSet, filenames: I) -> ImageSpecMap
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut files: Vec<String> = filenames.into_iter().map(Into::into).collect();
    files.sort();

    let mut result = ImageSpecMap::new();

    for rule in rules {
        let mask = rule.mask().map(str::to_string);

        for (prefix, suffix) in rule.pairs() {
            let matched = files
                .iter()
                .filter(|f| matches_group(f, prefix, suffix))
                .cloned()
                .collect();

            result.insert(
                group_key(prefix, suffix),
                ImageSpec {
                    files: matched,
                    mask: mask.clone(),
                },
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SheetRule;
    use pretty_assertions::assert_eq;

    fn spec(files: &[&str]) -> ImageSpec {
        ImageSpec {
            files: files.iter().map(|f| f.to_string()).collect(),
            mask: None,
        }
    }

    fn unordered_files() -> Vec<&'static str> {
        vec!["foo_2_a.png", "foo_1_b.png", "foo_1_a.png", "foo_2_b.png"]
    }

    #[test]
    fn test_ordered_file_list() {
        let rules = SheetRuleSet::new(vec![SheetRule::new("foo", &["a", "b"])]);
        let files = vec!["foo_1_a.png", "foo_1_b.png", "foo_2_a.png", "foo_2_b.png"];

        let result = match_rules(&rules, files);

        let mut expected = ImageSpecMap::new();
        expected.insert("foo_a".to_string(), spec(&["foo_1_a.png", "foo_2_a.png"]));
        expected.insert("foo_b".to_string(), spec(&["foo_1_b.png", "foo_2_b.png"]));
        assert_eq!(result, expected);
    }

    #[test]
    fn test_unordered_file_list_is_sorted() {
        let rules = SheetRuleSet::new(vec![SheetRule::new("foo", &["a", "b"])]);

        let result = match_rules(&rules, unordered_files());

        let mut expected = ImageSpecMap::new();
        expected.insert("foo_a".to_string(), spec(&["foo_1_a.png", "foo_2_a.png"]));
        expected.insert("foo_b".to_string(), spec(&["foo_1_b.png", "foo_2_b.png"]));
        assert_eq!(result, expected);
    }

    #[test]
    fn test_prefix_array() {
        let rules = SheetRuleSet::new(vec![SheetRule::with_prefixes(
            &["foo_1", "foo_2"],
            &["a", "b"],
        )]);

        let result = match_rules(&rules, unordered_files());

        let mut expected = ImageSpecMap::new();
        expected.insert("foo_1_a".to_string(), spec(&["foo_1_a.png"]));
        expected.insert("foo_1_b".to_string(), spec(&["foo_1_b.png"]));
        expected.insert("foo_2_a".to_string(), spec(&["foo_2_a.png"]));
        expected.insert("foo_2_b".to_string(), spec(&["foo_2_b.png"]));
        assert_eq!(result, expected);
    }

    #[test]
    fn test_empty_groups_still_present() {
        let rules = SheetRuleSet::new(vec![SheetRule::new("bar", &["a", "z"])]);

        let result = match_rules(&rules, unordered_files());

        assert_eq!(result.len(), 2);
        assert!(result["bar_a"].is_empty());
        assert!(result["bar_z"].is_empty());
    }

    #[test]
    fn test_file_lands_in_every_matching_group() {
        let rules = SheetRuleSet::new(vec![
            SheetRule::new("foo", &["a"]),
            SheetRule::new("foo_1", &["a"]),
        ]);

        let result = match_rules(&rules, unordered_files());

        assert_eq!(result["foo_a"].files, vec!["foo_1_a.png", "foo_2_a.png"]);
        assert_eq!(result["foo_1_a"].files, vec!["foo_1_a.png"]);
    }

    #[test]
    fn test_duplicate_key_last_rule_wins() {
        let rules = SheetRuleSet::new(vec![
            SheetRule::new("foo", &["a"]).mask_path("first.png"),
            SheetRule::new("foo", &["a"]).mask_path("second.png"),
        ]);

        let result = match_rules(&rules, unordered_files());

        assert_eq!(result.len(), 1);
        assert_eq!(result["foo_a"].mask.as_deref(), Some("second.png"));
        assert_eq!(result["foo_a"].files, vec!["foo_1_a.png", "foo_2_a.png"]);
    }

    #[test]
    fn test_rule_without_suffixes_contributes_nothing() {
        let rules = SheetRuleSet::new(vec![SheetRule::new("foo", &[])]);
        assert!(match_rules(&rules, unordered_files()).is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive_and_needs_png() {
        assert!(matches_group("foo_1_a.png", "foo", "a"));
        assert!(!matches_group("Foo_1_a.png", "foo", "a"));
        assert!(!matches_group("foo_1_a.PNG", "foo", "a"));
        assert!(!matches_group("foo_1_a.gif", "foo", "a"));
        assert!(!matches_group("foo_1_a.png.bak", "foo", "a"));
    }

    #[test]
    fn test_mask_carried_from_rule() {
        let rules = SheetRuleSet::new(vec![
            SheetRule::new("foo", &["a"]).mask_path("masks/row.png")
        ]);

        let result = match_rules(&rules, unordered_files());

        assert_eq!(result["foo_a"].mask.as_deref(), Some("masks/row.png"));
    }

    #[test]
    fn test_deterministic() {
        let rules = SheetRuleSet::new(vec![SheetRule::with_prefixes(
            &["foo_2", "foo"],
            &["b", "a"],
        )]);

        let first = match_rules(&rules, unordered_files());
        let mut reversed = unordered_files();
        reversed.reverse();
        let second = match_rules(&rules, reversed);

        assert_eq!(first, second);
        let keys: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["foo_2_a", "foo_2_b", "foo_a", "foo_b"]);
    }
}
