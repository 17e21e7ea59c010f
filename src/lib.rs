//! clipstash - bounded, persistent clipboard history.
//!
//! A background capture session watches the system clipboard (text and
//! images) and records changes into a durable, size-bounded,
//! most-recent-first history; a one-shot selection mode presents that
//! history in a rofi menu and pastes the chosen entry.
//!
//! ## Module structure
//! - `history`: item model, bounded durable store, image blob files
//! - `capture`: the cancellable session turning clipboard events into inserts
//! - `watcher`: polling clipboard backend feeding the capture session
//! - `selection`: snapshot -> menu -> paste flow
//! - `config`: settings and on-disk locations
//! - `error`: domain error type
//! - `logging`: tracing init

pub mod capture;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod selection;
pub mod watcher;

pub use error::{Error, Result};
