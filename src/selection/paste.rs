//! Clipboard load + paste synthesis: the external paste service.
//!
//! `xclip` owns putting content on the system clipboard (text from stdin,
//! images by file path as image/png); `xdotool` synthesizes the Ctrl+V.
//! Neither step is retried.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::error::Error;
use crate::history::{Item, ItemKind};

/// Delay between loading the clipboard and sending the keystroke, so focus
/// can return to the target window after the menu closes.
const SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Load `item` into the system clipboard and synthesize one paste.
pub fn paste_item(item: &Item) -> Result<(), Error> {
    load_clipboard(item)?;
    thread::sleep(SETTLE_DELAY);
    send_paste_keystroke()
}

fn load_clipboard(item: &Item) -> Result<(), Error> {
    match item.kind {
        ItemKind::Text => {
            let mut child = Command::new("xclip")
                .args(["-selection", "clipboard", "-in"])
                .stdin(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| Error::Paste(format!("failed to spawn xclip: {}", e)))?;

            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| Error::Paste("xclip stdin unavailable".to_string()))?;
            stdin
                .write_all(item.content.as_bytes())
                .map_err(|e| Error::Paste(format!("failed to pipe text to xclip: {}", e)))?;
            drop(stdin);

            check_output("xclip", child)
        }
        ItemKind::Image => {
            let child = Command::new("xclip")
                .args(["-selection", "clipboard", "-t", "image/png", "-in"])
                .arg(&item.content)
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| Error::Paste(format!("failed to spawn xclip: {}", e)))?;

            check_output("xclip", child)
        }
    }
}

fn send_paste_keystroke() -> Result<(), Error> {
    debug!("Synthesizing Ctrl+V");
    let child = Command::new("xdotool")
        .args(["key", "ctrl+v"])
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Paste(format!("failed to spawn xdotool: {}", e)))?;

    check_output("xdotool", child)
}

fn check_output(tool: &str, child: std::process::Child) -> Result<(), Error> {
    let output = child
        .wait_with_output()
        .map_err(|e| Error::Paste(format!("failed to wait for {}: {}", tool, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Paste(format!(
            "{} exited with {}: {}",
            tool,
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}
