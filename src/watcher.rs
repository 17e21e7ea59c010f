//! Polling clipboard backend.
//!
//! `arboard` has no change notifications, so a dedicated blocking thread
//! polls the system clipboard and forwards new text/image payloads into the
//! capture session's channels. Change detection is a cheap hash comparison
//! against the last observation; emitting a payload identical to the current
//! top of history is allowed (the store's dedup rule is the defense).

use arboard::Clipboard;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Remembers the last observed clipboard contents per channel so the poll
/// loop only forwards actual changes.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    last_text: Option<u64>,
    last_image: Option<u64>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        ChangeTracker::default()
    }

    /// True if `text` differs from the last observed text. The first
    /// observation always counts as a change.
    pub fn text_changed(&mut self, text: &str) -> bool {
        let hash = hash_bytes(text.as_bytes());
        let changed = self.last_text != Some(hash);
        self.last_text = Some(hash);
        changed
    }

    /// True if the raw image bytes differ from the last observed image.
    pub fn image_changed(&mut self, width: usize, height: usize, bytes: &[u8]) -> bool {
        let hash = hash_image(width, height, bytes);
        let changed = self.last_image != Some(hash);
        self.last_image = Some(hash);
        changed
    }
}

fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// Hash dimensions plus a pixel sample; enough to tell captures apart
/// without walking multi-megabyte buffers every poll.
fn hash_image(width: usize, height: usize, bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    width.hash(&mut hasher);
    height.hash(&mut hasher);
    let sample = 1024.min(bytes.len());
    bytes[..sample].hash(&mut hasher);
    hasher.finish()
}

/// Spawn the polling thread. It exits when the token is cancelled or when
/// the capture side drops its receivers.
pub fn spawn(
    text_tx: mpsc::Sender<String>,
    image_tx: mpsc::Sender<Vec<u8>>,
    cancel: CancellationToken,
    poll_interval_ms: u64,
) -> thread::JoinHandle<()> {
    thread::spawn(move || poll_loop(text_tx, image_tx, cancel, poll_interval_ms))
}

fn poll_loop(
    text_tx: mpsc::Sender<String>,
    image_tx: mpsc::Sender<Vec<u8>>,
    cancel: CancellationToken,
    poll_interval_ms: u64,
) {
    let mut clipboard = match Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            warn!(error = %e, "System clipboard unavailable, watcher exiting");
            return;
        }
    };

    let mut tracker = ChangeTracker::new();
    let interval = Duration::from_millis(poll_interval_ms);
    info!(poll_interval_ms, "Clipboard watcher started");

    while !cancel.is_cancelled() {
        // Text takes priority; only probe for an image when no text is present
        if let Ok(text) = clipboard.get_text() {
            if !text.is_empty() && tracker.text_changed(&text) {
                debug!(text_len = text.len(), "New text on clipboard");
                if text_tx.blocking_send(text).is_err() {
                    break;
                }
            }
        } else if let Ok(image) = clipboard.get_image() {
            if tracker.image_changed(image.width, image.height, &image.bytes) {
                debug!(
                    width = image.width,
                    height = image.height,
                    "New image on clipboard"
                );
                match encode_png(&image) {
                    Ok(png) => {
                        if image_tx.blocking_send(png).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "Failed to encode clipboard image"),
                }
            }
        }

        thread::sleep(interval);
    }

    info!("Clipboard watcher stopped");
}

/// Encode arboard's raw RGBA buffer as PNG.
fn encode_png(image: &arboard::ImageData<'_>) -> anyhow::Result<Vec<u8>> {
    use anyhow::Context;

    let rgba = image::RgbaImage::from_raw(
        image.width as u32,
        image.height as u32,
        image.bytes.to_vec(),
    )
    .context("Clipboard image buffer does not match its dimensions")?;

    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("Failed to encode clipboard image as PNG")?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_observation_counts_as_change() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.text_changed("hello"));
    }

    #[test]
    fn test_repeated_text_is_not_a_change() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.text_changed("hello"));
        assert!(!tracker.text_changed("hello"));
        assert!(tracker.text_changed("world"));
        assert!(tracker.text_changed("hello"), "Reverting is a change again");
    }

    #[test]
    fn test_image_change_considers_dimensions() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.image_changed(2, 2, &[0u8; 16]));
        assert!(!tracker.image_changed(2, 2, &[0u8; 16]));
        assert!(
            tracker.image_changed(4, 1, &[0u8; 16]),
            "Same bytes, different shape is a different image"
        );
    }

    #[test]
    fn test_text_and_image_are_tracked_independently() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.text_changed("a"));
        assert!(tracker.image_changed(1, 1, &[1, 2, 3, 4]));
        assert!(!tracker.text_changed("a"));
        assert!(!tracker.image_changed(1, 1, &[1, 2, 3, 4]));
    }

    #[test]
    fn test_encode_png_produces_valid_header() {
        let image = arboard::ImageData {
            width: 2,
            height: 2,
            bytes: vec![255u8; 16].into(),
        };
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encode_png_rejects_mismatched_buffer() {
        let image = arboard::ImageData {
            width: 10,
            height: 10,
            bytes: vec![0u8; 4].into(),
        };
        assert!(encode_png(&image).is_err());
    }
}
