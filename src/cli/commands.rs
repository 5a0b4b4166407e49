//! CLI command implementations
//!
//! This is the composition root: configuration is read once, the store,
//! mailer and page states are built here and handed to the HTTP server.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request};
use tower::ServiceExt;

use crate::config::{load_env_file, AppConfig, AppMode};
use crate::contact::{create_contact_mailer, ContactService};
use crate::http_server::{ContactState, HttpServer, PagesState, ServerStates, TrendsState};
use crate::observability::init_logging;
use crate::trends::{InMemoryTrendStore, MongoTrendStore, TrendStore, TrendsConnection};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_invocation;

/// Upper bound on a buffered `invoke` response body
const MAX_INVOKE_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Parse arguments, load configuration, run the command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    load_env_file(None)?;
    let config = AppConfig::from_env()?;
    init_logging(&config.logging)?;
    run_command(cli.command, config).await
}

/// Run the appropriate command based on CLI args
pub async fn run_command(cmd: Command, config: AppConfig) -> CliResult<()> {
    match cmd {
        Command::Serve {
            host,
            port,
            fixture,
        } => serve(config, host, port, fixture.as_deref()).await,
        Command::Invoke {
            method,
            path,
            body,
            fixture,
        } => invoke(config, &method, &path, body, fixture.as_deref()).await,
    }
}

/// Build the shared handler states.
///
/// With `eager_connect`, the datastore is reached before returning so that a
/// misconfigured endpoint fails startup instead of the first request.
pub async fn build_states(
    config: &AppConfig,
    fixture: Option<&Path>,
    eager_connect: bool,
) -> CliResult<ServerStates> {
    let store: Arc<dyn TrendStore> = match fixture {
        Some(path) => {
            let store = InMemoryTrendStore::from_file(path).await?;
            tracing::info!(
                fixture = %path.display(),
                records = store.len(),
                "serving trends from fixture"
            );
            Arc::new(store)
        }
        None => {
            let connection = Arc::new(TrendsConnection::new(config.database.clone()));
            if eager_connect {
                connection.handle().await?;
            }
            Arc::new(MongoTrendStore::new(connection))
        }
    };

    let mailer = create_contact_mailer(&config.mail);

    Ok(ServerStates {
        trends: Arc::new(TrendsState::new(store, config.sort_policy)),
        contact: Arc::new(ContactState::new(ContactService::new(
            mailer,
            config.mail.clone(),
        ))),
        pages: Arc::new(PagesState::new(config.public_dir.clone())),
    })
}

/// Bind a port and serve
pub async fn serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    fixture: Option<&Path>,
) -> CliResult<()> {
    if let Some(host) = host {
        config.http.host = host;
    }
    if let Some(port) = port {
        config.http.port = port;
    }

    tracing::info!(
        mode = ?config.mode,
        sort = config.sort_policy.as_str(),
        "starting trends server"
    );

    let states = build_states(&config, fixture, config.mode == AppMode::Local).await?;
    HttpServer::new(config.http.clone(), states)
        .start()
        .await
        .map_err(|e| CliError::io_error(format!("http server error: {}", e)))
}

/// Dispatch a single request through the router and print the response.
///
/// Returns an error (non-zero exit) when the response is a 5xx.
pub async fn invoke(
    config: AppConfig,
    method: &str,
    path: &str,
    body: Option<String>,
    fixture: Option<&Path>,
) -> CliResult<()> {
    let method: Method = method
        .to_ascii_uppercase()
        .parse()
        .map_err(|e| CliError::invocation_failed(format!("invalid method: {}", e)))?;

    let mut builder = Request::builder().method(method).uri(path);
    if body.is_some() {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .map_err(|e| CliError::invocation_failed(format!("invalid request: {}", e)))?;

    let states = build_states(&config, fixture, false).await?;
    let router = HttpServer::new(config.http.clone(), states).router();

    let response = router
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), MAX_INVOKE_BODY_BYTES)
        .await
        .map_err(|e| CliError::invocation_failed(format!("failed to read response: {}", e)))?;

    write_invocation(status.as_u16(), &bytes)?;

    if status.is_server_error() {
        return Err(CliError::invocation_failed(format!(
            "request returned {}",
            status
        )));
    }
    Ok(())
}
