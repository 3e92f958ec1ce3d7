//! Startup and runtime error types for the socket server.

use std::io;
use std::path::PathBuf;

/// Faults that end a server instance.
///
/// All of these are fatal to the running instance; the supervisory loop in
/// `main` rebuilds a fresh server and retries, so none of them take the
/// process down short of an external interrupt.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("socket path {path} exists and could not be removed: {source}")]
    StalePath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind socket at {path}: {source}")]
    Bind {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
