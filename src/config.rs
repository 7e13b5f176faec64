use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// Environment variable that overrides [`DEFAULT_API_BASE`].
pub const API_BASE_ENV: &str = "LYNAPP_API_URL";

pub const LISTINGS_PATH: &str = "listings";

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Listings per page for each grid layout.
pub const TWO_COLUMN_PAGE_SIZE: usize = 6;
pub const THREE_COLUMN_PAGE_SIZE: usize = 9;

/// Snapshot files written by the offline cache, keyed by logical name.
pub fn snapshot_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([("listings", "listings.json.gz")])
}

/// Resolve the API base URL: explicit value, then the environment, then the default.
pub fn resolve_api_base(explicit: Option<&str>) -> String {
    let raw = match explicit {
        Some(url) => url.to_string(),
        None => std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
    };
    raw.trim_end_matches('/').to_string()
}

pub fn listings_endpoint() -> String {
    format!("/{}/", LISTINGS_PATH)
}

pub fn listing_endpoint(id: i64) -> String {
    format!("/{}/{}/", LISTINGS_PATH, id)
}

pub fn create_endpoint() -> String {
    format!("/{}/create/", LISTINGS_PATH)
}

pub fn update_endpoint(id: i64) -> String {
    format!("/{}/{}/update/", LISTINGS_PATH, id)
}

pub fn delete_endpoint(id: i64) -> String {
    format!("/{}/{}/delete/", LISTINGS_PATH, id)
}

pub fn search_endpoint() -> String {
    format!("/{}/search/", LISTINGS_PATH)
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("lynapp-sdk")
    } else {
        PathBuf::from(".lynapp-sdk-cache")
    }
}
