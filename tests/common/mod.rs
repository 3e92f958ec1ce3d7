#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

use url_unshortener::dto::UnshortenInfo;
use url_unshortener::probe::RedirectProbe;
use url_unshortener::server::Server;
use url_unshortener::service::UnshortenService;
use url_unshortener::state::AppState;

/// Probe stub that returns a canned outcome and counts invocations.
pub struct StubProbe {
    outcome: Option<UnshortenInfo>,
    calls: AtomicUsize,
}

impl StubProbe {
    pub fn new(outcome: Option<UnshortenInfo>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RedirectProbe for StubProbe {
    async fn probe(&self, _url: &str) -> Option<UnshortenInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

pub fn redirect_info(target: &str, same_host: bool) -> UnshortenInfo {
    UnshortenInfo {
        redirects_to: target.to_string(),
        redirected_to_same_host: same_host,
    }
}

/// Binds a server on a fresh socket path and runs its accept loop in the
/// background. The returned `TempDir` keeps the path alive for the test.
pub fn start_server(probe: Arc<StubProbe>, cache_capacity: usize) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unshortener.sock");

    let service = UnshortenService::new(NonZeroUsize::new(cache_capacity).unwrap(), probe);
    let server = Server::bind(&path, AppState::new(Arc::new(service))).unwrap();
    tokio::spawn(server.run());

    (dir, path)
}

/// Writes one raw command and reads the reply until the server closes the
/// connection.
pub async fn send_command(path: &Path, payload: &[u8]) -> Vec<u8> {
    let mut stream = UnixStream::connect(path).await.unwrap();
    stream.write_all(payload).await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    reply
}

/// As [`send_command`], decoding the reply as JSON.
pub async fn send_json_command(path: &Path, payload: &[u8]) -> serde_json::Value {
    let reply = send_command(path, payload).await;
    serde_json::from_slice(&reply).unwrap()
}
