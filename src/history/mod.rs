//! History subsystem
//!
//! The bounded, persistent clipboard log and its supporting pieces.
//!
//! ## Module structure
//! - `types`: the captured item value and preview derivation
//! - `store`: the durable most-recent-first log (dedup, eviction, persistence)
//! - `blob_store`: per-capture image files referenced by image items

mod blob_store;
mod store;
mod types;

pub use blob_store::BlobStore;
pub use store::HistoryStore;
pub use types::{derive_preview, Item, ItemKind, PREVIEW_MAX_CHARS};
