//! Durable storage for the watchlist

use crate::client::watchlist::Watchlist;
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Loads and saves the watchlist as a single serialized blob
pub trait WatchlistStore: Send + Sync {
    /// Load the stored watchlist; missing or malformed data yields an empty list
    fn load(&self) -> Result<Watchlist>;

    /// Replace the stored watchlist
    fn save(&self, watchlist: &Watchlist) -> Result<()>;
}

fn parse_blob(blob: &str, origin: &str) -> Watchlist {
    match serde_json::from_str(blob) {
        Ok(watchlist) => watchlist,
        Err(e) => {
            tracing::warn!("Discarding malformed watchlist in {}: {}", origin, e);
            Watchlist::default()
        }
    }
}

/// In-memory store holding the serialized blob
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Raw blob as last saved
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl WatchlistStore for MemoryStore {
    fn load(&self) -> Result<Watchlist> {
        Ok(self
            .blob()
            .map(|blob| parse_blob(&blob, "memory"))
            .unwrap_or_default())
    }

    fn save(&self, watchlist: &Watchlist) -> Result<()> {
        let blob = serde_json::to_string(watchlist)?;
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = Some(blob);
        Ok(())
    }
}

/// Store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WatchlistStore for JsonFileStore {
    fn load(&self) -> Result<Watchlist> {
        if !self.path.exists() {
            tracing::debug!("No watchlist at {}, starting empty", self.path.display());
            return Ok(Watchlist::default());
        }

        let blob = std::fs::read_to_string(&self.path)?;
        Ok(parse_blob(&blob, &self.path.display().to_string()))
    }

    fn save(&self, watchlist: &Watchlist) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let blob = serde_json::to_string_pretty(watchlist)?;
        std::fs::write(&self.path, blob)?;
        tracing::debug!("Saved {} symbols to {}", watchlist.len(), self.path.display());
        Ok(())
    }
}
