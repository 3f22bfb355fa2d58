use clap::Parser;
use miette::Result;
use splatter::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = cli.printer();

    match cli.into_command() {
        Commands::Build(args) => {
            splatter::cli::build::run(args, &printer)?;
        }
        Commands::List(args) => {
            splatter::cli::list::run(args, &printer)?;
        }
        Commands::Validate(args) => {
            splatter::cli::validate::run(args, &printer)?;
        }
        Commands::Completions(args) => splatter::cli::completions::run(args)?,
    }

    Ok(())
}
