//! Command-line interface for Holonet.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::{cmd_init, cmd_routes, cmd_seed, cmd_serve};

/// Holonet - People, Planets and Favorites REST API
#[derive(Parser)]
#[command(name = "holonet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to load instead of the default search paths
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (default)
    Serve,

    /// Create a default config.toml if none exists
    Init,

    /// Load users, people and planets from a JSON fixture
    Seed {
        /// Path to the fixture file
        file: PathBuf,
    },

    /// Print every route the API serves
    Routes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["holonet"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["holonet", "seed", "fixtures.json", "-c", "x.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Seed { ref file }) if file.ends_with("fixtures.json")));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));

        assert!(Cli::try_parse_from(["holonet", "seed"]).is_err());
    }
}
