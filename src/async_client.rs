//! Async wrapper around [`LynappClient`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every SDK call on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use lynapp_sdk::AsyncLynappClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncLynappClient::builder().build().await.unwrap();
//!
//!     let listings = client.run(|c| c.listings().search_by_city("Calgary")).await.unwrap();
//!     let metrics = client.metrics(1).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{LynappError, Result};
use crate::models::{Listing, MetricsResult};
use crate::LynappClient;

// ---------------------------------------------------------------------------
// AsyncLynappClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncLynappClient`].
pub struct AsyncLynappClientBuilder {
    base_url: Option<String>,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for AsyncLynappClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(30),
        }
    }
}

impl AsyncLynappClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async client on the blocking pool.
    pub async fn build(self) -> Result<AsyncLynappClient> {
        tokio::task::spawn_blocking(move || {
            let mut builder = LynappClient::builder();
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            let client = builder.offline(self.offline).timeout(self.timeout).build()?;
            Ok(AsyncLynappClient {
                inner: Arc::new(Mutex::new(client)),
            })
        })
        .await
        .map_err(|e| LynappError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncLynappClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`LynappClient`].
///
/// The inner client uses `RefCell` internally, so it sits behind a
/// [`Mutex`] and calls are serialized.
pub struct AsyncLynappClient {
    inner: Arc<Mutex<LynappClient>>,
}

impl AsyncLynappClient {
    pub fn builder() -> AsyncLynappClientBuilder {
        AsyncLynappClientBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&LynappClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = client
                .lock()
                .map_err(|_| LynappError::InvalidArgument("client lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| LynappError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn list(&self) -> Result<Vec<Listing>> {
        self.run(|c| c.listings().list()).await
    }

    pub async fn get(&self, id: i64) -> Result<Listing> {
        self.run(move |c| c.listings().get(id)).await
    }

    pub async fn search_by_city(&self, city: &str) -> Result<Vec<Listing>> {
        let city = city.to_string();
        self.run(move |c| c.listings().search_by_city(&city)).await
    }

    pub async fn metrics(&self, id: i64) -> Result<Option<MetricsResult>> {
        self.run(move |c| c.listings().metrics(id)).await
    }

    /// Close the client, releasing the HTTP connection pool.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let client = self
                .inner
                .lock()
                .map_err(|_| LynappError::InvalidArgument("client lock poisoned".into()))?;
            client.connection().close();
            Ok(())
        })
        .await
        .map_err(|e| LynappError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
