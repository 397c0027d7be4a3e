//! CLI argument definitions using clap
//!
//! Commands:
//! - cadastre serve [--host] [--port] [--database-url] [--cors-origin]... [--memory]

use clap::{Parser, Subcommand};

/// cadastre - PostGIS cadastral data served as GeoJSON
#[derive(Parser, Debug)]
#[command(name = "cadastre")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 8000)]
        port: u16,

        /// Postgres connection string (falls back to DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,

        /// Allowed CORS origin, repeatable; permissive when omitted
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,

        /// Serve from an empty in-memory store instead of Postgres
        #[arg(long)]
        memory: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
