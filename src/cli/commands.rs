//! CLI command implementations
//!
//! `serve` wires the stack together: logging, store, HTTP server. All
//! other logic lives in the subsystem modules.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::http::{AppState, HttpServer, HttpServerConfig};
use crate::store::{CadastreStore, MemoryCadastreStore, PgCadastreStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parses arguments and dispatches to the selected command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Serve {
            host,
            port,
            database_url,
            cors_origins,
            memory,
        } => serve(host, port, database_url, cors_origins, memory).await,
    }
}

/// Starts the HTTP server
pub async fn serve(
    host: String,
    port: u16,
    database_url: Option<String>,
    cors_origins: Vec<String>,
    memory: bool,
) -> CliResult<()> {
    init_tracing();

    let config = AppConfig::default();

    let store: Arc<dyn CadastreStore> = if memory {
        info!("serving from an empty in-memory store");
        Arc::new(MemoryCadastreStore::new())
    } else {
        let url = database_url
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or(CliError::MissingDatabaseUrl)?;
        Arc::new(PgCadastreStore::connect(&url, config.crs).await?)
    };

    let http_config = HttpServerConfig {
        host,
        port,
        cors_origins,
    };
    let server = HttpServer::with_config(http_config, AppState::new(store, config));
    server.start().await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cadastre=info,tower_http=info")),
        )
        .init();
}
