//! RW CLI - Cacoo diagram images for documentation builds.
//!
//! Provides commands for:
//! - `cacoo resolve`: Download Cacoo diagrams into the image cache
//! - `cacoo info`: Show metadata of a Cacoo diagram

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::CacooCommand;
use output::Output;

/// RW - Cacoo diagram images for documentation builds.
#[derive(Parser)]
#[command(name = "rw", version, about)]
struct Cli {
    /// Enable info-level logging (otherwise `RUST_LOG` applies).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cacoo diagram commands.
    #[command(subcommand)]
    Cacoo(CacooCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to ERROR
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Cacoo(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "rw",
            "cacoo",
            "resolve",
            "https://cacoo.com/diagrams/A",
            "https://cacoo.com/diagrams/B#sheet2",
            "--output-dir",
            "out",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Cacoo(CacooCommand::Resolve(_))
        ));
    }

    #[test]
    fn test_resolve_requires_uri() {
        assert!(Cli::try_parse_from(["rw", "cacoo", "resolve"]).is_err());
    }

    #[test]
    fn test_parse_info() {
        let args = ["rw", "cacoo", "info", "https://cacoo.com/diagrams/A"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Cacoo(CacooCommand::Info(_))));
    }
}
