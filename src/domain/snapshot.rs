//! Clipboard snapshot value objects

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Opaque identifier, unique per insertion.
///
/// Two captures of identical content get distinct ids; dedup in the
/// history store collapses the entries, not the ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(u64);

static NEXT_SNAPSHOT_ID: AtomicU64 = AtomicU64::new(1);

impl SnapshotId {
    /// Allocate the next process-unique id
    pub fn next() -> Self {
        Self(NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for diagnostics
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Known image encodings, checked in declaration order during
/// classification. The list is extensible; it is not a promise that
/// every encoding a platform can offer is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    Png,
    Tiff,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageEncoding {
    /// All known encodings, in classification priority order
    pub const ALL: [ImageEncoding; 5] = [
        Self::Png,
        Self::Tiff,
        Self::Jpeg,
        Self::Gif,
        Self::Bmp,
    ];

    /// The MIME-style format tag for this encoding
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Tiff => "image/tiff",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }
}

impl std::fmt::Display for ImageEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One captured clipboard payload.
///
/// A closed sum type: every consumer (classifier, preview, write-back)
/// matches exhaustively, so adding a variant forces an audit of all of
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    /// Plain text
    Text(String),
    /// Raw encoded image bytes with a format hint
    Image {
        bytes: Vec<u8>,
        format: ImageEncoding,
    },
    /// A filesystem reference; existence is not verified at capture time
    FileReference(PathBuf),
    /// Anything the classifier could not place, kept for diagnostics
    Unknown { bytes: Vec<u8>, tags: Vec<String> },
}

impl ClipboardPayload {
    /// Content-based sameness test used for dedup.
    ///
    /// Narrower than format equality: text compares by string, image and
    /// unknown by raw bytes (the same image re-encoded differently is a
    /// distinct entry), file references by normalized path.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Image { bytes: a, .. }, Self::Image { bytes: b, .. }) => a == b,
            (Self::FileReference(a), Self::FileReference(b)) => {
                normalize_path(a) == normalize_path(b)
            }
            (Self::Unknown { bytes: a, .. }, Self::Unknown { bytes: b, .. }) => a == b,
            _ => false,
        }
    }

    /// Short variant name, for diagnostics and status lines
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image { .. } => "image",
            Self::FileReference(_) => "file",
            Self::Unknown { .. } => "unknown",
        }
    }
}

/// Strip `.` components and resolve `..` lexically so that equivalent
/// spellings of the same path dedup against each other. No filesystem
/// access happens here.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// One immutable observed clipboard state.
///
/// Payloads never mutate after construction; a clipboard change always
/// produces a new snapshot.
#[derive(Debug, Clone)]
pub struct ClipboardSnapshot {
    id: SnapshotId,
    payload: ClipboardPayload,
    captured_at: Instant,
}

impl ClipboardSnapshot {
    /// Capture a payload into a snapshot with a fresh id
    pub fn capture(payload: ClipboardPayload) -> Self {
        Self {
            id: SnapshotId::next(),
            payload,
            captured_at: Instant::now(),
        }
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }

    pub fn payload(&self) -> &ClipboardPayload {
        &self.payload
    }

    /// Monotonic capture time. Diagnostics only, never used for ordering.
    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    /// Equivalence delegated to the payload
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        self.payload.is_equivalent(&other.payload)
    }
}
