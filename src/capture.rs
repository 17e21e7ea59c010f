//! Capture session
//!
//! Turns clipboard-change events into history insertions for the lifetime of
//! a cancellable session. One logical selector over three sources: text
//! events, image events, cancellation. Exactly one event is processed at a
//! time; per-event failures are logged and never terminate the loop.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::history::{BlobStore, HistoryStore, Item};

pub struct CaptureSession {
    store: Arc<HistoryStore>,
    blobs: BlobStore,
}

impl CaptureSession {
    pub fn new(store: Arc<HistoryStore>, blobs: BlobStore) -> Self {
        CaptureSession { store, blobs }
    }

    /// Run until cancelled or until an event source closes (backend gone).
    ///
    /// No flush step is needed on exit: every accepted event was already
    /// persisted synchronously by the store.
    pub async fn run(
        self,
        mut text_rx: mpsc::Receiver<String>,
        mut image_rx: mpsc::Receiver<Vec<u8>>,
        cancel: CancellationToken,
    ) {
        info!("Capture session started");
        let mut text_open = true;
        let mut image_open = true;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Capture session cancelled");
                    break;
                }
                text = text_rx.recv(), if text_open => match text {
                    Some(content) => self.on_text(content),
                    None => text_open = false,
                },
                image = image_rx.recv(), if image_open => match image {
                    Some(bytes) => self.on_image(bytes),
                    None => image_open = false,
                },
            }

            if !text_open && !image_open {
                debug!("Event sources closed, stopping capture");
                break;
            }
        }
    }

    /// Empty or whitespace-only payloads never reach the store.
    fn on_text(&self, content: String) {
        if content.trim().is_empty() {
            debug!("Ignoring empty/whitespace-only text event");
            return;
        }

        match self.store.add(Item::text(content)) {
            Ok(()) => info!("Captured text"),
            Err(e) => error!(error = %e, "Failed to record text capture"),
        }
    }

    /// Materialize the blob first; an item only enters the store once its
    /// file exists. A failed blob write abandons the event.
    fn on_image(&self, bytes: Vec<u8>) {
        let path = match self.blobs.store(&bytes) {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, "Failed to store image blob, dropping event");
                return;
            }
        };

        match self.store.add(Item::image(&path)) {
            Ok(()) => info!("Captured image"),
            Err(e) => error!(error = %e, "Failed to record image capture"),
        }
    }
}
