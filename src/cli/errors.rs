//! CLI-specific error types

use thiserror::Error;

use crate::store::StoreError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors; all fatal, printed to stderr by `main`
#[derive(Debug, Error)]
pub enum CliError {
    /// No connection string available
    #[error("no database URL supplied; pass --database-url or set DATABASE_URL")]
    MissingDatabaseUrl,

    /// Store connection failed at startup
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Server bind or serve failure
    #[error("server failed: {0}")]
    Io(#[from] std::io::Error),
}
