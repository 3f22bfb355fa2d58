//! Sheet batch pipeline.
//!
//! Lists the input directory, matches it against the rule file, then builds
//! every sheet in sorted name order: decode frames and mask, compose, encode.
//!
//! A broken frame, mask or output path only fails its own sheet; the batch
//! carries on and reports every failure at the end. Problems with the input
//! directory, rule file or output directory abort the run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::{list_directory, load_rules};
use crate::error::{Result, SplatterError};
use crate::grouping::{match_rules, ImageSpec, ImageSpecMap};
use crate::output::{display_path, plural, Printer};
use crate::render::{compose, read_png, write_png, write_sheet_json, SheetMeta};
use crate::types::{SheetRuleSet, SourceImage};

/// Default rule file name.
pub const DEFAULT_DEFINITION: &str = "def.json";

/// Settings for one run, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory scanned for frames.
    pub input_dir: PathBuf,
    /// Directory sheets are written to.
    pub output_dir: PathBuf,
    /// Rule file.
    pub definition: PathBuf,
    /// Mask for sheets whose rule names none.
    pub mask: Option<PathBuf>,
    /// Vertical gap after each frame, in pixels.
    pub margin: u32,
    /// Write `<sheet>.json` frame metadata alongside each sheet.
    pub metadata: bool,
    /// Abort on the first failing sheet instead of continuing.
    pub fail_fast: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            definition: PathBuf::from(DEFAULT_DEFINITION),
            mask: None,
            margin: 0,
            metadata: false,
            fail_fast: false,
        }
    }
}

impl BuildConfig {
    /// Where the sheet named `name` is written.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.png", name))
    }

    /// Where the frame metadata of sheet `name` is written.
    pub fn metadata_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", name))
    }

    /// Full path of a matched frame.
    pub fn frame_path(&self, filename: &str) -> PathBuf {
        self.input_dir.join(filename)
    }

    /// The rule's mask, else the global one.
    pub fn mask_for(&self, spec: &ImageSpec) -> Option<PathBuf> {
        spec.mask
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| self.mask.clone())
    }
}

/// Load the rule file, list the input directory and match them.
pub fn resolve(config: &BuildConfig) -> Result<(SheetRuleSet, ImageSpecMap)> {
    let rules = load_rules(&config.definition)?;
    let files = list_directory(&config.input_dir)?;
    let specs = match_rules(&rules, files);
    Ok((rules, specs))
}

/// A sheet that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltSheet {
    pub name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub frames: usize,
    pub indexed: bool,
}

/// A sheet that could not be built.
#[derive(Debug)]
pub struct SheetFailure {
    pub name: String,
    pub error: SplatterError,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub built: Vec<BuiltSheet>,
    /// Sheets with no matching frames.
    pub skipped: Vec<String>,
    pub failed: Vec<SheetFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fold failures into a single error for the CLI exit status.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        let names: Vec<&str> = self.failed.iter().map(|f| f.name.as_str()).collect();
        Err(SplatterError::Build {
            message: format!(
                "{} of {} failed: {}",
                plural(self.failed.len(), "sheet", "sheets"),
                self.built.len() + self.failed.len(),
                names.join(", ")
            ),
            help: Some("See the errors above for the failing paths".to_string()),
        })
    }
}

/// Decoded masks, shared by every sheet that names the same path.
#[derive(Default)]
struct MaskCache {
    masks: HashMap<PathBuf, SourceImage>,
}

impl MaskCache {
    fn get(&mut self, path: &Path) -> Result<&SourceImage> {
        if !self.masks.contains_key(path) {
            let mask = read_png(path)?;
            self.masks.insert(path.to_path_buf(), mask);
        }
        Ok(&self.masks[path])
    }
}

/// Run the whole batch.
pub fn run_batch(config: &BuildConfig, printer: &Printer) -> Result<BatchReport> {
    printer.status("Scanning", &display_path(&config.input_dir));
    let (rules, specs) = resolve(config)?;
    printer.info(
        "Matched",
        &format!(
            "{} from {}",
            plural(specs.len(), "sheet", "sheets"),
            plural(rules.len(), "rule", "rules")
        ),
    );

    build_sheets(config, &specs, printer)
}

/// Build already-resolved sheets.
pub fn build_sheets(
    config: &BuildConfig,
    specs: &ImageSpecMap,
    printer: &Printer,
) -> Result<BatchReport> {
    if !config.output_dir.exists() {
        fs::create_dir_all(&config.output_dir).map_err(|e| SplatterError::Io {
            path: config.output_dir.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let mut report = BatchReport::default();
    let mut masks = MaskCache::default();

    for (name, spec) in specs {
        if spec.is_empty() {
            printer.warning("Skipping", &format!("{} (no matching frames)", name));
            report.skipped.push(name.clone());
            continue;
        }

        match build_sheet(config, name, spec, &mut masks, printer) {
            Ok(sheet) => report.built.push(sheet),
            Err(error) if error.is_sheet_local() && !config.fail_fast => {
                printer.error("Failed", &format!("{}: {}", name, error));
                report.failed.push(SheetFailure {
                    name: name.clone(),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    printer.success(
        "Finished",
        &format!(
            "{} to {}",
            plural(report.built.len(), "sheet", "sheets"),
            display_path(&config.output_dir)
        ),
    );

    Ok(report)
}

fn build_sheet(
    config: &BuildConfig,
    name: &str,
    spec: &ImageSpec,
    masks: &mut MaskCache,
    printer: &Printer,
) -> Result<BuiltSheet> {
    printer.status(
        "Composing",
        &format!("{} ({})", name, plural(spec.files.len(), "frame", "frames")),
    );

    let mut images = Vec::with_capacity(spec.files.len());
    for file in &spec.files {
        let path = config.frame_path(file);
        printer.verbose("Reading", &display_path(&path));
        images.push(read_png(&path)?);
    }

    let mask = match config.mask_for(spec) {
        Some(path) => {
            printer.verbose("Mask", &display_path(&path));
            Some(masks.get(&path)?)
        }
        None => None,
    };

    let canvas = compose(&images, mask, config.margin)?;

    let path = config.output_path(name);
    printer.status("Writing", &display_path(&path));
    write_png(&canvas, &path)?;

    if config.metadata {
        let image = format!("{}.png", name);
        let meta = SheetMeta::for_stack(&image, &spec.files, &images, config.margin)?;
        write_sheet_json(&meta, &config.metadata_path(name))?;
    }

    Ok(BuiltSheet {
        name: name.to_string(),
        path,
        width: canvas.width(),
        height: canvas.height(),
        frames: images.len(),
        indexed: canvas.is_indexed(),
    })
}
