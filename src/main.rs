//! realtime-keyword entry point
//!
//! Everything, `.env` loading included, happens in `cli::run`.

use realtime_keyword::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
