//! splatter - Spritesheet batcher
//!
//! A library for grouping PNG frames by filename rules and stacking each
//! group vertically into a single spritesheet.

pub mod batch;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod grouping;
pub mod output;
pub mod render;
pub mod types;
pub mod validation;

pub use batch::{build_sheets, resolve, run_batch, BatchReport, BuildConfig, BuiltSheet, SheetFailure};
pub use discovery::{list_directory, load_rules, parse_rules, Manifest, RuleFormat};
pub use error::{Result, SplatterError};
pub use grouping::{match_rules, ImageSpec, ImageSpecMap};
pub use output::{Printer, Verbosity};
pub use render::{compose, read_png, write_png, write_sheet_json, ColorModel, SheetMeta};
pub use types::{Canvas, Colour, Palette, PixelData, Raster, SheetRule, SheetRuleSet, SourceImage};
pub use validation::{validate_rules, Diagnostic, Severity, ValidationResult};
