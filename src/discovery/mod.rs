//! Input discovery.
//!
//! Lists candidate frame files, loads the rule file and the optional
//! `splatter.yaml` project manifest.

mod manifest;
mod rules;

pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use rules::{load_rules, parse_rules, RuleFormat};

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SplatterError};

/// List the names of regular files directly inside `dir`.
///
/// Subdirectories are not entered and names that are not valid UTF-8 are
/// skipped. The returned order is unspecified; the matcher sorts.
pub fn list_directory(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(SplatterError::Io {
            path: dir.to_path_buf(),
            message: "Input directory does not exist or is not a directory".to_string(),
        });
    }

    let mut names = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry.map_err(|e| SplatterError::Io {
            path: dir.to_path_buf(),
            message: format!("Couldn't read directory: {}", e),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}
