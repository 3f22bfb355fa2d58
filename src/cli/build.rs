//! Build command implementation.
//!
//! Matches the input directory against the rule file and writes one PNG per
//! sheet to the output directory.

use std::path::PathBuf;

use clap::Args;

use crate::batch::{run_batch, BatchReport, BuildConfig};
use crate::discovery::Manifest;
use crate::error::Result;
use crate::output::Printer;

use super::SourceArgs;

/// Build spritesheets from the frames in a directory
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory to output files to (default: current directory)
    #[arg(long, short = 'o', alias = "output_dir")]
    pub output_dir: Option<PathBuf>,

    /// PNG mask for sheets whose rule names no mask
    #[arg(long, short = 'k')]
    pub mask: Option<PathBuf>,

    /// Vertical margin to leave after each frame
    #[arg(long, short = 'm')]
    pub margin: Option<u32>,

    /// Also write <sheet>.json frame metadata
    #[arg(long)]
    pub metadata: bool,

    /// Stop at the first sheet that fails
    #[arg(long)]
    pub fail_fast: bool,
}

impl BuildArgs {
    /// Resolve the run's configuration: flags, then manifest, then defaults.
    pub fn config(&self, manifest: &Manifest) -> BuildConfig {
        let base = self.source.layer(manifest);

        BuildConfig {
            output_dir: self.output_dir.clone().unwrap_or(base.output_dir),
            mask: self.mask.clone().or(base.mask),
            margin: self.margin.unwrap_or(base.margin),
            metadata: self.metadata || base.metadata,
            fail_fast: self.fail_fast,
            ..base
        }
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<BatchReport> {
    let manifest = args.source.load_manifest()?;
    let config = args.config(&manifest);

    run_batch(&config, printer)?.into_result()
}
