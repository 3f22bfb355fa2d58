//! Project manifest (splatter.yaml) parsing.
//!
//! The manifest stores per-project defaults for the build command. Command
//! line flags override manifest values, which override built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplatterError};

/// Manifest filename looked up in the working directory.
pub const MANIFEST_FILENAME: &str = "splatter.yaml";

/// Project manifest loaded from splatter.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory to scan for frames.
    pub input_dir: Option<PathBuf>,

    /// Directory sheets are written to.
    pub output_dir: Option<PathBuf>,

    /// Rule file.
    pub definition: Option<PathBuf>,

    /// Mask applied to sheets whose rule has none.
    pub mask: Option<PathBuf>,

    /// Vertical gap after each frame.
    pub margin: Option<u32>,

    /// Write frame metadata JSON next to each sheet.
    pub metadata: Option<bool>,
}

impl Manifest {
    /// Load manifest from a splatter.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SplatterError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| SplatterError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Load `explicit` when given, otherwise `splatter.yaml` in `dir` if it exists.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(MANIFEST_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("margin: 2").unwrap();

        assert_eq!(manifest.margin, Some(2));
        assert!(manifest.input_dir.is_none());
        assert!(manifest.definition.is_none());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
input_dir: frames/
output_dir: dist/sheets
definition: sheets.json
mask: masks/row.png
margin: 4
metadata: true
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.input_dir, Some(PathBuf::from("frames/")));
        assert_eq!(manifest.output_dir, Some(PathBuf::from("dist/sheets")));
        assert_eq!(manifest.definition, Some(PathBuf::from("sheets.json")));
        assert_eq!(manifest.mask, Some(PathBuf::from("masks/row.png")));
        assert_eq!(manifest.margin, Some(4));
        assert_eq!(manifest.metadata, Some(true));
    }

    #[test]
    fn test_parse_empty_manifest() {
        assert_eq!(Manifest::parse("").unwrap(), Manifest::default());
    }

    #[test]
    fn test_parse_invalid_manifest() {
        let err = Manifest::parse("margin: lots").unwrap_err();
        assert!(matches!(err, SplatterError::Parse { .. }));
    }

    #[test]
    fn test_discover_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Manifest::discover(None, dir.path()).unwrap(),
            Manifest::default()
        );

        fs::write(dir.path().join(MANIFEST_FILENAME), "margin: 3\n").unwrap();
        assert_eq!(
            Manifest::discover(None, dir.path()).unwrap().margin,
            Some(3)
        );
    }

    #[test]
    fn test_discover_explicit_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("other.yaml");
        assert!(Manifest::discover(Some(&missing), dir.path()).is_err());
    }
}
