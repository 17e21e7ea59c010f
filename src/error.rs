use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific errors for clipstash
#[derive(Error, Debug)]
pub enum Error {
    /// No writable location for durable state. Fatal at construction time;
    /// the store cannot exist without it.
    #[error("Failed to create data directory {path:?}: {source}")]
    Setup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Durable write failed after the in-memory mutation already took effect.
    /// Memory is authoritative until the next successful persist.
    #[error("Failed to persist history to {path:?}: {message}")]
    Persistence { path: PathBuf, message: String },

    /// Could not materialize an image blob file for a capture event.
    #[error("Failed to store image blob at {path:?}: {source}")]
    Blob {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Menu service failed: {0}")]
    Menu(String),

    #[error("Paste service failed: {0}")]
    Paste(String),
}

pub type Result<T> = std::result::Result<T, Error>;
