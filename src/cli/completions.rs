//! `splatter completions <shell>`: print or save a completion script.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::error::{Result, SplatterError};

use super::Cli;

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Write the completion script for `shell` to `writer`.
pub fn write_completions(shell: Shell, writer: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "splatter", writer);
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    match &args.out {
        Some(path) => {
            let mut file = File::create(path).map_err(|e| SplatterError::Io {
                path: path.clone(),
                message: format!("Failed to create completion script: {}", e),
            })?;
            write_completions(args.shell, &mut file);
        }
        None => write_completions(args.shell, &mut io::stdout()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_bash_script_names_subcommands() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf);

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("splatter"));
        assert!(script.contains("validate"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("splatter.fish");

        run(CompletionsArgs {
            shell: Shell::Fish,
            out: Some(path.clone()),
        })
        .unwrap();

        assert!(std::fs::read_to_string(path).unwrap().contains("fail-fast"));
    }
}
