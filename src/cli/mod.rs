//! CLI module for roster
//!
//! Provides command-line interface for:
//! - read: answer one query object from stdin
//! - write: validate and store one record from stdin
//! - serve: answer line-delimited read/write envelopes

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{read, run, run_command, serve, serve_lines, write, Envelope, Operation, Roster};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{next_line, read_request, write_json};
