//! CLI argument definitions using clap
//!
//! Commands:
//! - roster read --config <path>
//! - roster write --config <path>
//! - roster serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// roster - validate, store and query student records
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read one query object from stdin and print the matching records
    Read {
        /// Path to configuration file
        #[arg(long, default_value = "./roster.json")]
        config: PathBuf,
    },

    /// Read one student record from stdin, validate and store it
    Write {
        /// Path to configuration file
        #[arg(long, default_value = "./roster.json")]
        config: PathBuf,
    },

    /// Answer line-delimited read/write envelopes until stdin closes
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./roster.json")]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["roster", "read", "--config", "/etc/roster.json"]).unwrap();
        assert!(matches!(cli.command, Command::Read { config } if config == PathBuf::from("/etc/roster.json")));

        let cli = Cli::try_parse_from(["roster", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { config } if config == PathBuf::from("./roster.json")));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["roster", "explain"]).is_err());
    }
}
