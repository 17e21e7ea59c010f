//! The bounded, durable clipboard history store.
//!
//! An ordered most-recent-first log of items with a fixed capacity,
//! immediate-predecessor deduplication and synchronous JSON persistence.
//! Safe for concurrent use: writers serialize on the lock for the whole
//! mutate-and-persist step, readers take cheap snapshot copies.

use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::types::{Item, ItemKind};
use crate::error::Error;

const HISTORY_FILE: &str = "history.json";

pub struct HistoryStore {
    items: RwLock<Vec<Item>>,
    file_path: PathBuf,
    max_items: usize,
}

impl HistoryStore {
    /// Open the store rooted at `data_dir`.
    ///
    /// Creates the directory if missing (failure is fatal: the store cannot
    /// exist without a writable location). A missing or malformed history
    /// file starts the store empty; it is never a startup error.
    pub fn open(data_dir: &Path, max_items: usize) -> Result<Self, Error> {
        fs::create_dir_all(data_dir).map_err(|source| Error::Setup {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let file_path = data_dir.join(HISTORY_FILE);
        let items = load(&file_path);

        Ok(HistoryStore {
            items: RwLock::new(items),
            file_path,
            max_items,
        })
    }

    /// Insert `item` at the front of the history.
    ///
    /// If `item` has the same kind and content as the current most-recent
    /// entry the call is a no-op (older duplicates further down are left
    /// alone). Otherwise the item is prepended, entries beyond capacity are
    /// evicted (deleting the backing file of evicted image entries,
    /// best-effort), and the whole sequence is rewritten to disk before the
    /// call returns.
    ///
    /// On a persist failure the in-memory mutation is kept and
    /// [`Error::Persistence`] is returned; memory stays authoritative until
    /// the next successful persist.
    pub fn add(&self, item: Item) -> Result<(), Error> {
        let mut items = self.items.write();

        if let Some(last) = items.first() {
            if item.is_duplicate_of(last) {
                debug!("Duplicate of most recent entry, ignored");
                return Ok(());
            }
        }

        items.insert(0, item);

        if items.len() > self.max_items {
            for evicted in items.split_off(self.max_items) {
                if evicted.kind == ItemKind::Image {
                    match fs::remove_file(&evicted.content) {
                        Ok(()) => debug!(path = %evicted.content, "Removed evicted image blob"),
                        Err(e) => warn!(
                            path = %evicted.content,
                            error = %e,
                            "Failed to remove evicted image blob"
                        ),
                    }
                }
            }
        }

        self.persist(&items)
    }

    /// Independent copy of the current sequence, most recent first. Safe to
    /// iterate without holding any lock; unaffected by later `add` calls.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.read().clone()
    }

    /// Serialize the full sequence and overwrite the history file.
    fn persist(&self, items: &[Item]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(items).map_err(|e| Error::Persistence {
            path: self.file_path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&self.file_path, json).map_err(|e| Error::Persistence {
            path: self.file_path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

/// Read the durable image, treating anything unreadable as empty history.
fn load(path: &Path) -> Vec<Item> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => {
            debug!(path = %path.display(), "No history file yet, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Item>>(&data) {
        Ok(items) => {
            info!(count = items.len(), "Loaded clipboard history");
            items
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "History file malformed, starting empty"
            );
            Vec::new()
        }
    }
}
