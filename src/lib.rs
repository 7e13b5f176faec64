//! Lynapp SDK for Rust.
//!
//! A client for the Lynapp real-estate listings service. Listings are
//! fetched over the service's REST API, filtered and paged locally, and
//! each listing's price history can be turned into derived financial
//! metrics (trend, returns, volatility) with [`metrics::compute_metrics`].
//!
//! # Quick start
//!
//! ```no_run
//! use lynapp_sdk::LynappClient;
//!
//! let client = LynappClient::builder()
//!     .base_url("http://127.0.0.1:8000/api")
//!     .build()
//!     .unwrap();
//!
//! let listings = client.listings().search_by_city("Toronto").unwrap();
//! if let Some(listing) = listings.first() {
//!     let metrics = lynapp_sdk::metrics::compute_metrics(listing.price_history());
//!     println!("{:?}", metrics);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod metrics;
pub mod models;
pub mod queries;
pub mod validation;

#[cfg(feature = "async")]
pub use async_client::AsyncLynappClient;
pub use cache::CacheManager;
pub use connection::Connection;
pub use error::{LynappError, Result, ValidationError};
pub use metrics::compute_metrics;
pub use models::{Listing, MetricsResult, NewListing, PricePoint, Trend};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// LynappClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`LynappClient`].
///
/// Use [`LynappClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](LynappClientBuilder::build) to create the client.
pub struct LynappClientBuilder {
    base_url: Option<String>,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for LynappClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl LynappClientBuilder {
    /// Set the API base URL (e.g. `http://127.0.0.1:8000/api`).
    ///
    /// If not set, `LYNAPP_API_URL` is consulted, then
    /// [`config::DEFAULT_API_BASE`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a custom directory for offline snapshots.
    ///
    /// Defaults to the platform cache directory (e.g. `~/.cache/lynapp-sdk`
    /// on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, reads are served from the last stored snapshot and
    /// writes fail. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// Creates the cache directory but performs no network traffic.
    pub fn build(self) -> Result<LynappClient> {
        if self.timeout.is_zero() {
            return Err(LynappError::InvalidArgument(
                "timeout must be greater than zero".to_string(),
            ));
        }
        let base_url = config::resolve_api_base(self.base_url.as_deref());
        let cache = CacheManager::new(self.cache_dir, self.offline)?;
        let conn = Connection::new(base_url, cache, self.timeout)?;
        tracing::debug!(base_url = conn.base_url(), offline = self.offline, "client ready");
        Ok(LynappClient { conn })
    }
}

// ---------------------------------------------------------------------------
// LynappClient
// ---------------------------------------------------------------------------

/// The main entry point for the Lynapp SDK.
///
/// Owns a [`Connection`] and hands out lightweight borrowing query wrappers.
/// Created via [`LynappClient::builder()`] and released with
/// [`close()`](LynappClient::close) or by dropping it.
pub struct LynappClient {
    conn: Connection,
}

impl LynappClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> LynappClientBuilder {
        LynappClientBuilder::default()
    }

    /// Access the listing query interface.
    pub fn listings(&self) -> queries::ListingQuery<'_> {
        queries::ListingQuery::new(&self.conn)
    }

    /// Whether the client serves reads from snapshots only.
    pub fn is_offline(&self) -> bool {
        self.conn.is_offline()
    }

    /// Remove every stored offline snapshot.
    pub fn clear_cache(&self) -> Result<()> {
        self.conn.cache.clear()
    }

    /// Consume the client and release all resources.
    ///
    /// Drops the HTTP client. This also happens when the client is dropped,
    /// but can be invoked explicitly for deterministic cleanup.
    pub fn close(self) {
        self.conn.close();
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for LynappClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = &self.conn.cache;
        write!(
            f,
            "LynappClient(base_url={}, cache_dir={}, offline={})",
            self.conn.base_url(),
            cache.cache_dir.display(),
            cache.offline
        )
    }
}
