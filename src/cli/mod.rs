pub mod build;
pub mod completions;
pub mod list;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::batch::BuildConfig;
use crate::discovery::Manifest;
use crate::error::Result;
use crate::output::{Printer, Verbosity};

/// splatter - Stack PNG frames into spritesheets
///
/// Without a subcommand, runs `build` with the given flags.
#[derive(Parser, Debug)]
#[command(name = "splatter")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Only print errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print every frame and mask as it is read
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub build: build::BuildArgs,
}

impl Cli {
    /// The subcommand to run; a bare `splatter <flags>` is a build.
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Build(self.build))
    }

    pub fn printer(&self) -> Printer {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Printer::with_verbosity(verbosity)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build spritesheets from the frames in a directory (the default)
    Build(build::BuildArgs),

    /// Show the sheets the rules resolve to, without rendering
    List(list::ListArgs),

    /// Check the rule file against the input directory
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Where frames and rules come from. Shared by every command that resolves sheets.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Directory to scan for image files (default: current directory)
    #[arg(long, short = 'i', alias = "input_dir")]
    pub input_dir: Option<PathBuf>,

    /// JSON or YAML file containing the spritesheet definitions (default: def.json)
    #[arg(long, short = 'd')]
    pub definition: Option<PathBuf>,

    /// Project manifest (default: ./splatter.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// The manifest named by `--config`, else `./splatter.yaml` when present.
    pub fn load_manifest(&self) -> Result<Manifest> {
        Manifest::discover(self.config.as_deref(), Path::new("."))
    }

    /// Layer these flags over the manifest, and the manifest over the defaults.
    pub fn layer(&self, manifest: &Manifest) -> BuildConfig {
        let defaults = BuildConfig::default();

        BuildConfig {
            input_dir: self
                .input_dir
                .clone()
                .or_else(|| manifest.input_dir.clone())
                .unwrap_or(defaults.input_dir),
            definition: self
                .definition
                .clone()
                .or_else(|| manifest.definition.clone())
                .unwrap_or(defaults.definition),
            output_dir: manifest.output_dir.clone().unwrap_or(defaults.output_dir),
            mask: manifest.mask.clone(),
            margin: manifest.margin.unwrap_or(defaults.margin),
            metadata: manifest.metadata.unwrap_or(defaults.metadata),
            fail_fast: defaults.fail_fast,
        }
    }
}
