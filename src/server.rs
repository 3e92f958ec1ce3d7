//! Unix socket server: accept loop and per-connection handlers.
//!
//! The accept loop only accepts; every connection is handed to its own
//! spawned task immediately, so a slow probe never starves new clients.
//! Each connection carries exactly one request and one reply.

use std::io;
use std::path::Path;
use std::time::Instant;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, info, warn};

use crate::dto::{Command, UnshortenResponse};
use crate::error::ServerError;
use crate::state::AppState;

/// Hard cap on a single command read. There is no framing on this
/// protocol; a command larger than the cap is truncated and will fail to
/// decode.
const MAX_COMMAND_BYTES: usize = 1024;

/// Fixed plain-text reply for undecodable commands.
const MISUNDERSTOOD_REPLY: &[u8] = b"ERROR: Command misunderstood";

/// One bound listener plus the shared state its handlers run against.
pub struct Server {
    listener: UnixListener,
    state: AppState,
}

impl Server {
    /// Binds the listener, unlinking a stale socket file first.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::StalePath`] when an existing path cannot be
    /// removed and still exists, and [`ServerError::Bind`] on bind failure.
    pub fn bind(path: &Path, state: AppState) -> Result<Self, ServerError> {
        match std::fs::remove_file(path) {
            Ok(()) => debug!("removed stale socket file {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                if path.exists() {
                    return Err(ServerError::StalePath {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            }
        }

        let listener = UnixListener::bind(path).map_err(|e| ServerError::Bind {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!("listening on {}", path.display());

        Ok(Self { listener, state })
    }

    /// Accepts connections forever, spawning one handler task each.
    ///
    /// Returns only on an accept failure; in-flight handler tasks are not
    /// joined when the caller drops this future.
    pub async fn run(self) -> Result<(), ServerError> {
        loop {
            let (stream, _addr) = self.listener.accept().await.map_err(ServerError::Accept)?;
            let state = self.state.clone();
            tokio::spawn(handle_connection(stream, state));
        }
    }
}

/// Drives one connection to completion and always shuts it down.
///
/// Any handler fault after decoding degrades to a best-effort `{}` reply;
/// a failure to write even that is swallowed after logging.
async fn handle_connection(mut stream: UnixStream, state: AppState) {
    if let Err(e) = serve_request(&mut stream, &state).await {
        warn!("connection handler failed: {e}");
        if let Err(write_error) = stream.write_all(b"{}").await {
            debug!("could not send failure reply: {write_error}");
        }
    }
    let _ = stream.shutdown().await;
}

/// Reads one command, resolves it, and writes one reply.
async fn serve_request(stream: &mut UnixStream, state: &AppState) -> io::Result<()> {
    let mut buf = vec![0u8; MAX_COMMAND_BYTES];
    let n = stream.read(&mut buf).await?;

    let command: Command = match serde_json::from_slice(&buf[..n]) {
        Ok(command) => command,
        Err(e) => {
            warn!("command misunderstood: {e}");
            stream.write_all(MISUNDERSTOOD_REPLY).await?;
            return Ok(());
        }
    };

    let started = Instant::now();
    let outcome = state.unshortener.unshorten(&command.text).await;
    let response = UnshortenResponse {
        unshorten_info: outcome.info,
        is_cached: outcome.was_cached,
        time_taken: started.elapsed().as_secs_f64(),
    };

    let body = serde_json::to_vec(&response).map_err(io::Error::other)?;
    stream.write_all(&body).await?;
    Ok(())
}
