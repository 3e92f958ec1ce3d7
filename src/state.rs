use std::sync::Arc;

use crate::service::UnshortenService;

/// Shared state handed to every connection handler.
#[derive(Clone)]
pub struct AppState {
    pub unshortener: Arc<UnshortenService>,
}

impl AppState {
    pub fn new(unshortener: Arc<UnshortenService>) -> Self {
        Self { unshortener }
    }
}
