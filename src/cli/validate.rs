use std::path::Path;

use clap::Args;

use crate::batch::resolve;
use crate::error::{Result, SplatterError};
use crate::output::{display_path, Printer};
use crate::validation::{print_diagnostics, validate_rules, Diagnostic, ValidationResult};

use super::SourceArgs;

/// Check the rule file against the input directory
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<ValidationResult> {
    let manifest = args.source.load_manifest()?;
    let config = args.source.layer(&manifest);

    printer.status("Checking", &display_path(&config.definition));
    let (rules, specs) = resolve(&config)?;

    let mut result = validate_rules(&rules, &specs, Path::new("."));
    if let Some(mask) = &config.mask {
        if !mask.is_file() {
            result.push(
                Diagnostic::error(
                    "splatter::rules::missing-mask",
                    format!("Mask '{}' not found", mask.display()),
                )
                .about("manifest"),
            );
        }
    }

    print_diagnostics(&result, printer);

    if result.has_errors() || (args.strict && result.has_warnings()) {
        return Err(SplatterError::Validation {
            message: format!(
                "{} error(s), {} warning(s)",
                result.error_count(),
                result.warning_count()
            ),
            help: None,
        });
    }

    Ok(result)
}
