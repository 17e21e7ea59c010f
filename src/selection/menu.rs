//! rofi menu wrapper: the "present N labeled choices" service.
//!
//! Previews are piped to `rofi -dmenu` one per line; image entries carry the
//! rofi icon metadata so the menu can render a thumbnail. rofi prints the
//! selected 0-based index (`-format i`); a dismissal (ESC) exits non-zero.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::Error;
use crate::history::{Item, ItemKind};

/// Show the menu and return the selected index, or `None` if the user
/// dismissed it (or rofi answered with something unusable).
pub fn present(items: &[Item], theme: Option<&Path>) -> Result<Option<usize>, Error> {
    if items.is_empty() {
        return Ok(None);
    }

    let mut input = String::new();
    for item in items {
        input.push_str(&item.preview);
        if item.kind == ItemKind::Image {
            // rofi row option: null byte, "icon", unit separator, icon path
            input.push_str("\x00icon\x1f");
            input.push_str(&item.content);
        }
        input.push('\n');
    }

    let mut command = Command::new("rofi");
    command.args([
        "-dmenu",
        "-i",
        "-p",
        "Clipboard",
        "-format",
        "i",
        "-show-icons",
    ]);
    if let Some(theme) = theme {
        command.arg("-theme").arg(theme);
    }

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Menu(format!("failed to spawn rofi: {}", e)))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::Menu("rofi stdin unavailable".to_string()))?;
    stdin
        .write_all(input.as_bytes())
        .map_err(|e| Error::Menu(format!("failed to write menu entries: {}", e)))?;
    drop(stdin); // EOF so rofi renders

    let output = child
        .wait_with_output()
        .map_err(|e| Error::Menu(format!("failed to read rofi output: {}", e)))?;

    if !output.status.success() {
        // Non-zero exit is how rofi reports a dismissed menu
        debug!(status = %output.status, "Menu dismissed");
        return Ok(None);
    }

    Ok(parse_selection(
        &String::from_utf8_lossy(&output.stdout),
        items.len(),
    ))
}

/// Out-of-range or non-numeric answers count as "nothing selected".
fn parse_selection(output: &str, len: usize) -> Option<usize> {
    let index: usize = output.trim().parse().ok()?;
    (index < len).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_in_range() {
        assert_eq!(parse_selection("0\n", 3), Some(0));
        assert_eq!(parse_selection(" 2 ", 3), Some(2));
    }

    #[test]
    fn test_parse_selection_out_of_range_is_none() {
        assert_eq!(parse_selection("3", 3), None);
        assert_eq!(parse_selection("100", 3), None);
    }

    #[test]
    fn test_parse_selection_garbage_is_none() {
        assert_eq!(parse_selection("", 3), None);
        assert_eq!(parse_selection("abc", 3), None);
        assert_eq!(parse_selection("-1", 3), None);
    }
}
