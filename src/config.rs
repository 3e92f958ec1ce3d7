//! Service configuration parsed from the command line.
//!
//! ```bash
//! url-unshortener \
//!     --socket-file /run/unshortener.sock \
//!     --max-cache-size 1024 \
//!     --max-timeout 2
//! ```
//!
//! Log level is controlled separately through `RUST_LOG`.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;

/// Service that resolves shortened URLs over a local Unix socket.
#[derive(Debug, Parser)]
#[command(name = "url-unshortener", version)]
pub struct Config {
    /// The socket file path on which the service will listen.
    #[arg(long = "socket-file", value_name = "PATH")]
    pub socket_file: PathBuf,

    /// Maximal amount of time in seconds to wait for the HEAD request to
    /// return results.
    #[arg(long = "max-timeout", value_name = "SECONDS", default_value_t = 1)]
    pub max_timeout: u64,

    /// Maximum number of entries to hold in the cache.
    #[arg(long = "max-cache-size", value_name = "ENTRIES")]
    pub max_cache_size: NonZeroUsize,
}

impl Config {
    /// Validates settings that clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or the socket path resolves
    /// to the server executable itself (a sign of a shifted argument list).
    pub fn validate(&self) -> Result<()> {
        if self.max_timeout == 0 {
            bail!("--max-timeout must be greater than 0");
        }

        let socket_path = std::path::absolute(&self.socket_file)
            .context("failed to resolve --socket-file to an absolute path")?;
        let exe_path =
            std::env::current_exe().context("failed to resolve the executable path")?;
        if socket_path == exe_path {
            bail!(
                "--socket-file points at the server executable itself; \
                 check the argument list"
            );
        }

        Ok(())
    }

    /// Timeout applied to each outbound probe.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.max_timeout)
    }

    /// Logs the effective settings.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Socket file: {}", self.socket_file.display());
        tracing::info!("  Probe timeout: {}s", self.max_timeout);
        tracing::info!("  Cache capacity: {}", self.max_cache_size);
    }
}
