//! Blocking HTTP connection to the listings service.
//!
//! Wraps a lazily built `reqwest` client, maps non-success responses onto
//! [`LynappError`], and falls back to the snapshot cache when offline.

use crate::cache::CacheManager;
use crate::error::{LynappError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A configured connection to one listings service.
pub struct Connection {
    base_url: String,
    timeout: Duration,
    client: RefCell<Option<Client>>,
    /// The snapshot cache used for offline reads.
    pub cache: CacheManager,
}

impl Connection {
    /// Create a connection for `base_url` (no trailing slash).
    ///
    /// No network traffic happens until the first request.
    pub fn new(base_url: impl Into<String>, cache: CacheManager, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(LynappError::InvalidArgument(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: RefCell::new(None),
            cache,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_offline(&self) -> bool {
        self.cache.offline
    }

    /// Absolute URL for an endpoint path such as `/listings/1/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<Client> {
        if let Some(client) = self.client.borrow().as_ref() {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        *self.client.borrow_mut() = Some(client.clone());
        Ok(client)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        if self.is_offline() {
            return Err(LynappError::NotFound(format!(
                "{} {} is unavailable in offline mode",
                method, path
            )));
        }
        let url = self.url(path);
        debug!(%method, %url, "request");
        Ok(self.client()?.request(method, url))
    }

    /// GET a JSON resource with optional query parameters.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let resp = self.request(Method::GET, path)?.query(query).send()?;
        Ok(check_status(resp)?.json()?)
    }

    /// Send a JSON body and decode the JSON response.
    pub fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.request(method, path)?.json(body).send()?;
        Ok(check_status(resp)?.json()?)
    }

    /// Send a DELETE; succeeds on any 2xx response.
    pub fn delete(&self, path: &str) -> Result<()> {
        let resp = self.request(Method::DELETE, path)?.send()?;
        check_status(resp)?;
        Ok(())
    }

    /// GET a JSON resource and keep a snapshot of it for offline use.
    ///
    /// Offline, or when the service is unreachable and a snapshot exists,
    /// the snapshot is returned instead.
    pub fn get_with_snapshot(&self, path: &str, snapshot: &str) -> Result<serde_json::Value> {
        if self.is_offline() {
            debug!(snapshot, "offline, reading snapshot");
            return self.cache.load_snapshot(snapshot);
        }

        match self.get_json::<serde_json::Value>(path, &[]) {
            Ok(value) => {
                if let Err(e) = self.cache.store_snapshot(snapshot, &value) {
                    warn!(snapshot, error = %e, "failed to store snapshot");
                }
                Ok(value)
            }
            Err(LynappError::Http(e)) if self.cache.has_snapshot(snapshot) => {
                info!(snapshot, error = %e, "service unreachable, serving cached snapshot");
                self.cache.load_snapshot(snapshot)
            }
            Err(e) => Err(e),
        }
    }

    /// Drop the HTTP client; a new one is built on the next request.
    pub fn close(&self) {
        self.client.borrow_mut().take();
    }
}

/// Map non-success responses onto [`LynappError`].
///
/// The service reports errors as `{"message": ...}` or `{"detail": ...}`.
fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().to_string();
    let body = resp.text().unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.trim().to_string()
        }
    });

    if status == StatusCode::NOT_FOUND {
        Err(LynappError::NotFound(format!("{} ({})", message, url)))
    } else {
        Err(LynappError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("detail"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}
