//! CLI argument definitions using clap
//!
//! Commands:
//! - realtime-keyword serve [--host H] [--port P] [--fixture FILE]
//! - realtime-keyword invoke <METHOD> <PATH> [--body JSON] [--fixture FILE]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trending keywords read API and contact mailer
#[derive(Parser, Debug)]
#[command(name = "realtime-keyword")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bind a port and serve until interrupted
    Serve {
        /// Host to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Serve records from a JSON fixture instead of MongoDB
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Handle exactly one request and exit
    Invoke {
        /// HTTP method, e.g. GET
        method: String,

        /// Request path, e.g. /api/trends/kr
        path: String,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,

        /// Serve records from a JSON fixture instead of MongoDB
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
