//! Core history types: the captured item and its display preview.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Display bound for previews, in characters. Truncated previews get a
/// marker appended on top of this.
pub const PREVIEW_MAX_CHARS: usize = 60;

const TRUNCATION_MARKER: &str = "...";

/// Content type of a captured clipboard item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    Image,
}

/// A single entry in the clipboard history.
///
/// For `Text` items `content` holds the raw captured string; for `Image`
/// items it holds the path of the PNG file written by the capture path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub content: String,
    pub preview: String,
    pub captured_at: DateTime<Local>,
}

impl Item {
    /// Build a text item, deriving its preview. Callers are expected to have
    /// rejected empty/whitespace-only payloads already.
    pub fn text(content: String) -> Self {
        let preview = derive_preview(&content);
        Item {
            kind: ItemKind::Text,
            content,
            preview,
            captured_at: Local::now(),
        }
    }

    /// Build an image item referencing an already-written blob file.
    pub fn image(path: &Path) -> Self {
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Item {
            kind: ItemKind::Image,
            content: path.to_string_lossy().into_owned(),
            preview: format!("[Image] {}", basename),
            captured_at: Local::now(),
        }
    }

    /// Immediate-predecessor dedup test: same kind and identical content.
    pub fn is_duplicate_of(&self, other: &Item) -> bool {
        self.kind == other.kind && self.content == other.content
    }
}

/// Derive a single-line preview: embedded newlines become spaces, and
/// anything past [`PREVIEW_MAX_CHARS`] is cut at a char boundary with a
/// truncation marker appended.
pub fn derive_preview(content: &str) -> String {
    let flat: String = content
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.chars().count() <= PREVIEW_MAX_CHARS {
        flat
    } else {
        let truncated: String = flat.chars().take(PREVIEW_MAX_CHARS).collect();
        format!("{}{}", truncated, TRUNCATION_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_short_preview_is_unchanged() {
        assert_eq!(derive_preview("hello world"), "hello world");
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(derive_preview("a\nb\r\nc"), "a b  c");
    }

    #[test]
    fn test_long_preview_is_truncated_with_marker() {
        let long = "x".repeat(100);
        let preview = derive_preview(&long);
        assert_eq!(
            preview.chars().count(),
            PREVIEW_MAX_CHARS + TRUNCATION_MARKER.len(),
            "Preview should be bound plus marker"
        );
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_truncation_is_char_safe() {
        // Multibyte chars near the boundary must not split
        let long = "é".repeat(80);
        let preview = derive_preview(&long);
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
        assert!(preview.starts_with("é"));
    }

    #[test]
    fn test_text_item_has_nonempty_preview() {
        let item = Item::text("some clipboard text".to_string());
        assert_eq!(item.kind, ItemKind::Text);
        assert!(!item.preview.is_empty());
    }

    #[test]
    fn test_image_item_preview_uses_basename() {
        let path = PathBuf::from("/tmp/clipstash/images/img_12345.png");
        let item = Item::image(&path);
        assert_eq!(item.kind, ItemKind::Image);
        assert_eq!(item.content, "/tmp/clipstash/images/img_12345.png");
        assert_eq!(item.preview, "[Image] img_12345.png");
    }

    #[test]
    fn test_duplicate_check_matches_kind_and_content() {
        let a = Item::text("same".to_string());
        let b = Item::text("same".to_string());
        let c = Item::text("other".to_string());
        assert!(a.is_duplicate_of(&b));
        assert!(!a.is_duplicate_of(&c));

        let img = Item::image(Path::new("same"));
        assert!(
            !img.is_duplicate_of(&a),
            "Different kinds never count as duplicates"
        );
    }

    #[test]
    fn test_item_json_roundtrip_ignores_unknown_fields() {
        let json = r#"{
            "kind": "text",
            "content": "hello",
            "preview": "hello",
            "captured_at": "2024-03-01T10:30:00+01:00",
            "some_future_field": 42
        }"#;
        let item: Item = serde_json::from_str(json).expect("Unknown fields should be ignored");
        assert_eq!(item.kind, ItemKind::Text);
        assert_eq!(item.content, "hello");
    }
}
