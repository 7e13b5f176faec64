//! Local snapshot cache for offline browsing.
//!
//! The last successful listings response is written to disk as gzip-compressed
//! JSON. In offline mode the connection serves reads from these snapshots
//! instead of the network.

use crate::config;
use crate::error::{LynappError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Reads and writes JSON snapshots of API responses.
pub struct CacheManager {
    /// Directory where snapshots are stored.
    pub cache_dir: PathBuf,
    /// If true, the connection never goes to the network.
    pub offline: bool,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
        })
    }

    fn snapshot_path(&self, name: &str) -> Result<PathBuf> {
        let files = config::snapshot_files();
        let filename = files.get(name).ok_or_else(|| {
            LynappError::NotFound(format!("Unknown snapshot: {}", name))
        })?;
        Ok(self.cache_dir.join(filename))
    }

    /// Whether a snapshot (compressed or plain) exists for `name`.
    pub fn has_snapshot(&self, name: &str) -> bool {
        match self.snapshot_path(name) {
            Ok(path) => path.exists() || plain_variant(&path).exists(),
            Err(_) => false,
        }
    }

    /// Write a snapshot atomically.
    ///
    /// The data is compressed into a temp file in the cache directory and
    /// renamed over the old snapshot, so readers never see a partial file.
    pub fn store_snapshot(&self, name: &str, value: &serde_json::Value) -> Result<()> {
        let path = self.snapshot_path(name)?;
        let bytes = serde_json::to_vec(value)?;

        let tmp = NamedTempFile::new_in(&self.cache_dir)?;
        let mut encoder = GzEncoder::new(tmp, Compression::default());
        encoder.write_all(&bytes)?;
        let tmp = encoder.finish()?;
        tmp.persist(&path).map_err(|e| LynappError::Io(e.error))?;

        debug!(snapshot = name, path = %path.display(), size = bytes.len(), "stored snapshot");
        Ok(())
    }

    /// Load a snapshot, handling `.gz` transparently.
    ///
    /// A corrupt snapshot is deleted so the next online fetch replaces it.
    pub fn load_snapshot(&self, name: &str) -> Result<serde_json::Value> {
        let gz_path = self.snapshot_path(name)?;
        let path = if gz_path.exists() {
            gz_path
        } else {
            let plain = plain_variant(&gz_path);
            if !plain.exists() {
                return Err(LynappError::NotFound(format!(
                    "No cached snapshot for '{}' in {}",
                    name,
                    self.cache_dir.display()
                )));
            }
            plain
        };

        let parse_result = read_json(&path);
        match parse_result {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt snapshot, removing");
                let _ = fs::remove_file(&path);
                Err(LynappError::NotFound(format!(
                    "Snapshot '{}' was corrupt and has been removed. \
                     Fetch online to rebuild it. Original error: {}",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown"),
                    e
                )))
            }
        }
    }

    /// Remove all snapshots and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let mut contents = String::new();
    let file = fs::File::open(path)?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let mut reader = BufReader::new(GzDecoder::new(BufReader::new(file)));
        reader.read_to_string(&mut contents)?;
    } else {
        BufReader::new(file).read_to_string(&mut contents)?;
    }
    Ok(serde_json::from_str(&contents)?)
}

/// `listings.json.gz` -> `listings.json`
fn plain_variant(path: &Path) -> PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}
