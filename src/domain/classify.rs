//! Content classification
//!
//! Pure mapping from a raw clipboard item (an ordered set of format
//! representations as offered by the OS) to a typed payload. No I/O and
//! no panics: malformed data falls through to `Unknown`.

use std::path::PathBuf;

use crate::domain::snapshot::{ClipboardPayload, ImageEncoding};

/// Well-known representation tags
pub mod tag {
    /// File reference as a `file://` URI
    pub const FILE_URL: &str = "text/uri-list";
    /// Plain UTF-8 text
    pub const TEXT: &str = "text/plain";
}

/// One representation of a clipboard item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Representation {
    Text(String),
    Bytes(Vec<u8>),
}

/// A raw clipboard item: ordered (format tag, data) pairs.
///
/// An OS clipboard change can offer several simultaneous representations
/// of the same logical content; order is preserved as offered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawClipboardItem {
    representations: Vec<(String, Representation)>,
}

impl RawClipboardItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        let mut item = Self::new();
        item.push_text(tag, text);
        item
    }

    pub fn with_bytes(tag: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mut item = Self::new();
        item.push_bytes(tag, bytes);
        item
    }

    pub fn push_text(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        self.representations
            .push((tag.into(), Representation::Text(text.into())));
    }

    pub fn push_bytes(&mut self, tag: impl Into<String>, bytes: Vec<u8>) {
        self.representations
            .push((tag.into(), Representation::Bytes(bytes)));
    }

    pub fn is_empty(&self) -> bool {
        self.representations.is_empty()
    }

    /// All declared tags, in offer order
    pub fn tags(&self) -> Vec<String> {
        self.representations
            .iter()
            .map(|(tag, _)| tag.clone())
            .collect()
    }

    /// First text representation carrying the given tag
    pub fn text_for(&self, wanted: &str) -> Option<&str> {
        self.representations.iter().find_map(|(tag, repr)| {
            match repr {
                Representation::Text(text) if tag == wanted => Some(text.as_str()),
                _ => None,
            }
        })
    }

    /// First byte representation carrying the given tag
    pub fn bytes_for(&self, wanted: &str) -> Option<&[u8]> {
        self.representations.iter().find_map(|(tag, repr)| {
            match repr {
                Representation::Bytes(bytes) if tag == wanted => Some(bytes.as_slice()),
                _ => None,
            }
        })
    }

    /// First byte representation of any tag, for unknown-content capture
    fn first_bytes(&self) -> Option<&[u8]> {
        self.representations.iter().find_map(|(_, repr)| match repr {
            Representation::Bytes(bytes) => Some(bytes.as_slice()),
            _ => None,
        })
    }
}

/// Classify a raw item into a typed payload.
///
/// Priority for items offering multiple simultaneous representations:
/// file reference, then plain text, then the known image encodings in
/// order, then `Unknown`. File paths arrive as strings on most
/// platforms, so they are checked before text.
pub fn classify(item: &RawClipboardItem) -> ClipboardPayload {
    if let Some(path) = file_reference_in(item) {
        return ClipboardPayload::FileReference(path);
    }

    if let Some(text) = item.text_for(tag::TEXT) {
        return ClipboardPayload::Text(text.to_owned());
    }

    for format in ImageEncoding::ALL {
        if let Some(bytes) = item.bytes_for(format.tag()) {
            return ClipboardPayload::Image {
                bytes: bytes.to_vec(),
                format,
            };
        }
    }

    ClipboardPayload::Unknown {
        bytes: item.first_bytes().map(<[u8]>::to_vec).unwrap_or_default(),
        tags: item.tags(),
    }
}

/// Extract a filesystem reference, either from a declared file-URL
/// representation or from a text representation that is itself a
/// `file://` URI.
fn file_reference_in(item: &RawClipboardItem) -> Option<PathBuf> {
    if let Some(uri) = item.text_for(tag::FILE_URL) {
        if let Some(path) = parse_file_uri(uri) {
            return Some(path);
        }
    }
    item.text_for(tag::TEXT).and_then(parse_file_uri)
}

/// Parse a `file://` URI into a path, percent-decoding as needed.
/// Returns `None` for anything that is not a single file URI.
fn parse_file_uri(uri: &str) -> Option<PathBuf> {
    let trimmed = uri.trim();
    let rest = trimmed.strip_prefix("file://")?;
    // Reject multi-line URI lists and URIs with an embedded host part
    if rest.is_empty() || rest.contains('\n') || !rest.starts_with('/') {
        return None;
    }
    Some(PathBuf::from(percent_decode(rest)))
}

/// Minimal percent-decoding; invalid escapes pass through verbatim.
/// Works on raw bytes, so a `%` followed by a multi-byte character is an
/// invalid escape, not a slicing hazard.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Preview-safe one-line summary of a payload.
///
/// Text is truncated to `max_text` characters on a char boundary; binary
/// payloads render size and format only, never raw bytes.
pub fn summarize(payload: &ClipboardPayload, max_text: usize) -> String {
    match payload {
        ClipboardPayload::Text(text) => truncate_chars(text, max_text),
        ClipboardPayload::Image { bytes, format } => {
            format!("[image {} ({} bytes)]", format, bytes.len())
        }
        ClipboardPayload::FileReference(path) => format!("[file {}]", path.display()),
        ClipboardPayload::Unknown { bytes, tags } => {
            if tags.is_empty() {
                format!("[unknown ({} bytes)]", bytes.len())
            } else {
                format!("[unknown ({} bytes, {})]", bytes.len(), tags.join(", "))
            }
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let flat = text.replace(['\r', '\n'], " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max - 1).collect();
    format!("{}\u{2026}", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_round_trips() {
        let item = RawClipboardItem::with_text(tag::TEXT, "hello");
        assert_eq!(classify(&item), ClipboardPayload::Text("hello".into()));
    }

    #[test]
    fn unrecognized_tag_falls_through_to_unknown() {
        let item = RawClipboardItem::with_bytes("application/x-custom", vec![0xde, 0xad]);
        match classify(&item) {
            ClipboardPayload::Unknown { bytes, tags } => {
                assert_eq!(bytes, vec![0xde, 0xad]);
                assert_eq!(tags, vec!["application/x-custom".to_string()]);
            }
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn empty_item_is_unknown() {
        let item = RawClipboardItem::new();
        match classify(&item) {
            ClipboardPayload::Unknown { bytes, tags } => {
                assert!(bytes.is_empty());
                assert!(tags.is_empty());
            }
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn file_url_wins_over_text_and_image() {
        let mut item = RawClipboardItem::new();
        item.push_bytes(ImageEncoding::Png.tag(), vec![1, 2, 3]);
        item.push_text(tag::TEXT, "thumbnail.png");
        item.push_text(tag::FILE_URL, "file:///home/user/thumbnail.png");
        assert_eq!(
            classify(&item),
            ClipboardPayload::FileReference(PathBuf::from("/home/user/thumbnail.png"))
        );
    }

    #[test]
    fn text_that_is_a_file_uri_classifies_as_file() {
        let item = RawClipboardItem::with_text(tag::TEXT, "file:///tmp/report%20final.pdf");
        assert_eq!(
            classify(&item),
            ClipboardPayload::FileReference(PathBuf::from("/tmp/report final.pdf"))
        );
    }

    #[test]
    fn percent_before_multibyte_char_passes_through_verbatim() {
        let item = RawClipboardItem::with_text(tag::TEXT, "file:///tmp/%€.txt");
        assert_eq!(
            classify(&item),
            ClipboardPayload::FileReference(PathBuf::from("/tmp/%€.txt"))
        );
    }

    #[test]
    fn truncated_escape_at_end_of_path_is_kept() {
        let item = RawClipboardItem::with_text(tag::TEXT, "file:///tmp/trailing%2");
        assert_eq!(
            classify(&item),
            ClipboardPayload::FileReference(PathBuf::from("/tmp/trailing%2"))
        );
    }

    #[test]
    fn text_wins_over_image() {
        let mut item = RawClipboardItem::new();
        item.push_bytes(ImageEncoding::Tiff.tag(), vec![7, 7]);
        item.push_text(tag::TEXT, "caption");
        assert_eq!(classify(&item), ClipboardPayload::Text("caption".into()));
    }

    #[test]
    fn image_encodings_match_in_priority_order() {
        let mut item = RawClipboardItem::new();
        item.push_bytes(ImageEncoding::Bmp.tag(), vec![1]);
        item.push_bytes(ImageEncoding::Png.tag(), vec![2]);
        match classify(&item) {
            ClipboardPayload::Image { bytes, format } => {
                assert_eq!(format, ImageEncoding::Png);
                assert_eq!(bytes, vec![2]);
            }
            other => panic!("expected Image, got {:?}", other),
        }
    }

    #[test]
    fn malformed_file_uri_degrades_to_text() {
        let item = RawClipboardItem::with_text(tag::TEXT, "file://");
        assert_eq!(classify(&item), ClipboardPayload::Text("file://".into()));
    }

    #[test]
    fn summaries_are_single_line_and_bounded() {
        let long = "x".repeat(500);
        let summary = summarize(&ClipboardPayload::Text(long), 40);
        assert!(summary.chars().count() <= 40);

        let multi = summarize(&ClipboardPayload::Text("a\nb\r\nc".into()), 40);
        assert!(!multi.contains('\n'));

        let image = summarize(
            &ClipboardPayload::Image {
                bytes: vec![0; 16],
                format: ImageEncoding::Png,
            },
            40,
        );
        assert!(image.contains("image/png"));
        assert!(image.contains("16 bytes"));
    }

    #[test]
    fn zero_width_summary_is_empty() {
        assert_eq!(summarize(&ClipboardPayload::Text("hello".into()), 0), "");
    }
}
