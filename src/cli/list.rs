//! List command implementation.
//!
//! Resolves the rules against the input directory and prints the sheets
//! that a build would produce, without decoding any image.

use clap::Args;

use crate::batch::resolve;
use crate::error::{Result, SplatterError};
use crate::grouping::ImageSpecMap;
use crate::output::{plural, Printer};

use super::SourceArgs;

/// Show the sheets the rules resolve to, without rendering
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the resolved sheets as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<ImageSpecMap> {
    let manifest = args.source.load_manifest()?;
    let config = args.source.layer(&manifest);
    let (_, specs) = resolve(&config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&specs).map_err(|e| SplatterError::Build {
            message: format!("Failed to serialize sheets: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        print_sheets(&specs, printer);
    }

    Ok(specs)
}

fn print_sheets(specs: &ImageSpecMap, printer: &Printer) {
    for (name, spec) in specs {
        let mut line = format!(
            "{} {}",
            printer.bold(name),
            printer.dim(&format!("({})", plural(spec.files.len(), "frame", "frames")))
        );
        if let Some(mask) = &spec.mask {
            line.push_str(&format!(" {} {}", printer.dim("mask"), mask));
        }

        if spec.is_empty() {
            printer.warning("Empty", &line);
        } else {
            printer.info("Sheet", &line);
        }

        for file in &spec.files {
            printer.verbose("Frame", file);
        }
    }

    printer.info("Total", &plural(specs.len(), "sheet", "sheets"));
}
