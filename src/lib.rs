//! # URL Unshortener
//!
//! A local daemon that resolves shortened URLs to their final destination.
//! Clients connect over a Unix domain socket, send one JSON command, and
//! receive one JSON reply.
//!
//! ## Architecture
//!
//! - [`cache`] - Bounded, thread-safe LRU cache ([`cache::BoundedCache`])
//! - [`probe`] - Outbound HEAD probe with redirect classification
//! - [`service`] - Cache + probe composition ([`service::UnshortenService`])
//! - [`server`] - Accept loop and per-connection handlers
//! - [`dto`] - Wire protocol messages
//! - [`config`] - CLI configuration
//!
//! ## Protocol
//!
//! One request/reply pair per connection:
//!
//! ```json
//! {"text": "http://short.example/x"}
//! ```
//!
//! ```json
//! {"unshorten_info": {"redirects_to": "http://real.example/y",
//!   "redirected_to_same_host": false},
//!  "is_cached": false,
//!  "time_taken": 0.131}
//! ```
//!
//! A command that cannot be decoded is answered with the plain-text string
//! `ERROR: Command misunderstood`.

pub mod cache;
pub mod config;
pub mod dto;
pub mod error;
pub mod probe;
pub mod server;
pub mod service;
pub mod state;

pub use error::ServerError;
pub use state::AppState;
