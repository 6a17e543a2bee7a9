//! Basket cache persistence
//!
//! Ingesting a large CSV is the slowest part of a run, so the baskets can be
//! materialized once and reloaded on later runs. The store is an injectable
//! collaborator with a `load`/`save` contract; the mining core never touches
//! it. The file format is a version-stamped MessagePack envelope.

use crate::basket::Basket;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Envelope format version; bump on incompatible layout changes
const CACHE_FORMAT_VERSION: u32 = 1;

/// Errors that can occur during basket cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode basket cache: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("failed to decode basket cache: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("basket cache format mismatch: expected v{expected}, found v{found}")]
    FormatMismatch { expected: u32, found: u32 },
}

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// A place baskets can be saved to and reloaded from
pub trait BasketStore {
    /// Load previously saved baskets, or `None` when nothing is stored
    fn load(&self) -> Result<Option<Vec<Basket>>>;

    /// Persist `baskets`, replacing any previous contents
    fn save(&self, baskets: &[Basket]) -> Result<()>;
}

/// On-disk envelope; baskets are stored as sorted item vectors so the file
/// bytes are stable for identical input
#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    format_version: u32,
    tool_version: String,
    created_at: u64,
    baskets: Vec<Vec<String>>,
}

/// File-backed [`BasketStore`]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BasketStore for FileStore {
    fn load(&self) -> Result<Option<Vec<Basket>>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "basket cache miss");
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let envelope: CacheEnvelope = rmp_serde::from_read(BufReader::new(file))?;
        if envelope.format_version != CACHE_FORMAT_VERSION {
            return Err(CacheError::FormatMismatch {
                expected: CACHE_FORMAT_VERSION,
                found: envelope.format_version,
            });
        }
        debug!(
            path = %self.path.display(),
            baskets = envelope.baskets.len(),
            "basket cache hit"
        );
        let baskets = envelope
            .baskets
            .into_iter()
            .map(|items| items.into_iter().collect())
            .collect();
        Ok(Some(baskets))
    }

    fn save(&self, baskets: &[Basket]) -> Result<()> {
        let envelope = CacheEnvelope {
            format_version: CACHE_FORMAT_VERSION,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: unix_timestamp(),
            baskets: baskets
                .iter()
                .map(|basket| {
                    let mut items: Vec<String> = basket.iter().cloned().collect();
                    items.sort();
                    items
                })
                .collect(),
        };
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, &envelope)?;
        debug!(path = %self.path.display(), baskets = baskets.len(), "basket cache written");
        Ok(())
    }
}

/// Lightweight timestamp without a chrono dependency
fn unix_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn basket(items: &[&str]) -> Basket {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.msgpack"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("baskets.msgpack"));
        let baskets = vec![basket(&["a", "b"]), basket(&["c"]), Basket::new()];

        store.save(&baskets).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, baskets);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("baskets.msgpack"));

        store.save(&[basket(&["old"])]).unwrap();
        store.save(&[basket(&["new"])]).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, vec![basket(&["new"])]);
    }

    #[test]
    fn test_load_garbage_is_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.msgpack");
        std::fs::write(&path, b"not msgpack at all").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_format_version_mismatch_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stale.msgpack");
        let envelope = CacheEnvelope {
            format_version: CACHE_FORMAT_VERSION + 1,
            tool_version: "9.9.9".to_string(),
            created_at: 0,
            baskets: vec![vec!["a".to_string()]],
        };
        let file = File::create(&path).unwrap();
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, &envelope).unwrap();
        drop(writer);

        let store = FileStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(CacheError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_round_trip_preserves_basket_order() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("ordered.msgpack"));
        let baskets = vec![basket(&["z"]), basket(&["a"]), basket(&["m"])];

        store.save(&baskets).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, baskets);
    }
}
