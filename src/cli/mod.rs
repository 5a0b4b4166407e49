//! CLI module
//!
//! Provides the command-line interface and composition root:
//! - serve: bind a port and serve requests
//! - invoke: dispatch one request in-process and exit

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_states, invoke, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_invocation;
