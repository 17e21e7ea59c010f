//! clipstash binary.
//!
//! `clipstash --daemon` runs the background capture session; plain
//! `clipstash` opens the selection menu for a one-shot paste.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use clipstash::capture::CaptureSession;
use clipstash::config::{self, Config};
use clipstash::history::{BlobStore, HistoryStore};
use clipstash::{logging, selection, watcher};

#[derive(Parser, Debug)]
#[command(name = "clipstash", about = "Bounded persistent clipboard history", version)]
struct Cli {
    /// Run the background capture session instead of the selection menu
    #[arg(long)]
    daemon: bool,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let data_dir =
        config::data_dir().context("Could not determine a config directory on this platform")?;
    let config = Config::load(&data_dir);
    let store = Arc::new(HistoryStore::open(&data_dir, config.max_items)?);

    if cli.daemon {
        run_daemon(store, &data_dir, &config)
    } else {
        selection::run(&store, &config).map_err(Into::into)
    }
}

/// Wire watcher -> capture session -> store, with Ctrl-C cancellation.
fn run_daemon(store: Arc<HistoryStore>, data_dir: &Path, config: &Config) -> Result<()> {
    let blobs = BlobStore::open(config::image_dir(data_dir))?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let cancel = CancellationToken::new();

    let (text_tx, text_rx) = mpsc::channel(16);
    let (image_tx, image_rx) = mpsc::channel(4);
    let watcher_handle = watcher::spawn(text_tx, image_tx, cancel.clone(), config.poll_interval_ms);

    runtime.block_on(async {
        let interrupt_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, shutting down");
                interrupt_cancel.cancel();
            }
        });

        CaptureSession::new(store, blobs)
            .run(text_rx, image_rx, cancel.clone())
            .await;
    });

    // Make sure the watcher sees the shutdown even when the session ended
    // because an event source closed
    cancel.cancel();
    let _ = watcher_handle.join();

    info!("Daemon stopped");
    Ok(())
}
