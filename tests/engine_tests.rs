//! Engine integration tests
//!
//! Drives the full engine against a scripted clipboard and the real
//! chunked file cache, exercising the watch-browse-paste cycle end to
//! end.

use std::io::Write as _;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use clipstack::application::ports::{
    ClipboardError, IndexStore, IndexStoreError, SystemClipboard,
};
use clipstack::application::{ClipboardEngine, CommitOutcome, EngineConfig};
use clipstack::domain::classify::{tag, RawClipboardItem};
use clipstack::domain::history::{StoreEvent, CAPACITY};
use clipstack::domain::snapshot::{ClipboardPayload, SnapshotId};
use clipstack::infrastructure::{ChunkFileCache, NoOpAudioCue, NoopNotifier};

#[derive(Default)]
struct ScriptedState {
    count: u64,
    items: Vec<RawClipboardItem>,
    written: Vec<ClipboardPayload>,
}

/// In-memory clipboard following the change-counter protocol
#[derive(Clone, Default)]
struct ScriptedClipboard {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedClipboard {
    fn offer_text(&self, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.count += 1;
        state.items = vec![RawClipboardItem::with_text(tag::TEXT, text)];
    }

    fn offer_file(&self, uri: &str) {
        let mut state = self.state.lock().unwrap();
        state.count += 1;
        state.items = vec![RawClipboardItem::with_text(tag::FILE_URL, uri)];
    }

    fn written(&self) -> Vec<ClipboardPayload> {
        self.state.lock().unwrap().written.clone()
    }
}

#[async_trait]
impl SystemClipboard for ScriptedClipboard {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        Ok(self.state.lock().unwrap().count)
    }

    async fn read_items(&self) -> Result<Vec<RawClipboardItem>, ClipboardError> {
        Ok(self.state.lock().unwrap().items.clone())
    }

    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardError> {
        let mut state = self.state.lock().unwrap();
        state.count += 1;
        state.written.push(payload.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemoryIndexStore {
    saved: Arc<Mutex<Option<usize>>>,
}

#[async_trait]
impl IndexStore for MemoryIndexStore {
    async fn save_index(&self, index: usize) -> Result<(), IndexStoreError> {
        *self.saved.lock().unwrap() = Some(index);
        Ok(())
    }

    async fn load_index(&self) -> Result<Option<usize>, IndexStoreError> {
        Ok(*self.saved.lock().unwrap())
    }

    async fn clear_index(&self) -> Result<(), IndexStoreError> {
        *self.saved.lock().unwrap() = None;
        Ok(())
    }
}

type TestEngine =
    ClipboardEngine<ScriptedClipboard, MemoryIndexStore, ChunkFileCache, NoopNotifier, NoOpAudioCue>;

fn engine() -> (TestEngine, ScriptedClipboard) {
    let clipboard = ScriptedClipboard::default();
    let engine = ClipboardEngine::new(
        clipboard.clone(),
        MemoryIndexStore::default(),
        Arc::new(ChunkFileCache::new()),
        NoopNotifier,
        NoOpAudioCue::new(),
        EngineConfig {
            enable_cue: false,
            ..EngineConfig::default()
        },
    );
    (engine, clipboard)
}

fn text_at(engine: &TestEngine, index: usize) -> String {
    match engine.snapshot(index).unwrap().payload() {
        ClipboardPayload::Text(text) => text.clone(),
        other => panic!("expected text at {}, got {:?}", index, other),
    }
}

#[tokio::test]
async fn copies_surface_most_recent_first() {
    let (mut engine, clipboard) = engine();

    for text in ["A", "B", "C"] {
        clipboard.offer_text(text);
        engine.tick().await.unwrap();
    }

    assert_eq!(engine.length(), 3);
    assert_eq!(text_at(&engine, 0), "C");
    assert_eq!(text_at(&engine, 1), "B");
    assert_eq!(text_at(&engine, 2), "A");
}

#[tokio::test]
async fn duplicate_copy_promotes_under_a_new_identity() {
    let (mut engine, clipboard) = engine();

    for text in ["A", "B", "C"] {
        clipboard.offer_text(text);
        engine.tick().await.unwrap();
    }
    let original_id = engine.snapshot(2).unwrap().id();

    clipboard.offer_text("A");
    engine.tick().await.unwrap();

    // Promoted to the front, no duplicate left behind
    assert_eq!(engine.length(), 3);
    assert_eq!(text_at(&engine, 0), "A");
    assert_eq!(text_at(&engine, 1), "C");
    assert_eq!(text_at(&engine, 2), "B");
    assert_ne!(engine.snapshot(0).unwrap().id(), original_id);
}

#[tokio::test]
async fn overflow_evicts_the_oldest_and_reports_it() {
    let (mut engine, clipboard) = engine();

    let evicted: Arc<Mutex<Vec<SnapshotId>>> = Arc::new(Mutex::new(Vec::new()));
    let evicted_log = Arc::clone(&evicted);
    engine.observe(move |event| {
        if let StoreEvent::Evicted { id, .. } = event {
            evicted_log.lock().unwrap().push(*id);
        }
    });

    for i in 0..CAPACITY {
        clipboard.offer_text(&format!("entry-{}", i));
        engine.tick().await.unwrap();
    }
    let oldest_id = engine.snapshot(CAPACITY - 1).unwrap().id();

    clipboard.offer_text("one too many");
    engine.tick().await.unwrap();

    assert_eq!(engine.length(), CAPACITY);
    assert_eq!(text_at(&engine, 0), "one too many");
    assert_eq!(text_at(&engine, CAPACITY - 1), "entry-1");
    assert_eq!(*evicted.lock().unwrap(), vec![oldest_id]);
}

#[tokio::test]
async fn full_browse_and_paste_cycle() {
    let (mut engine, clipboard) = engine();

    for text in ["first", "second", "third"] {
        clipboard.offer_text(text);
        engine.tick().await.unwrap();
    }

    engine.open_browser().await.unwrap();
    engine.move_right().await;
    engine.move_right().await;

    let outcome = engine.commit_selection().await.unwrap();
    assert!(matches!(outcome, CommitOutcome::Written { index: 2, .. }));
    assert_eq!(
        clipboard.written(),
        vec![ClipboardPayload::Text("first".into())]
    );

    // The write-back settles without re-entering the history
    engine.tick().await.unwrap();
    assert_eq!(engine.length(), 3);

    // A genuinely new copy afterwards is still picked up
    clipboard.offer_text("fourth");
    engine.tick().await.unwrap();
    assert_eq!(engine.length(), 4);
    assert_eq!(text_at(&engine, 0), "fourth");
}

#[tokio::test]
async fn file_preview_reads_through_the_real_cache() {
    let (mut engine, clipboard) = engine();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "grocery list").unwrap();
    let uri = format!("file://{}", file.path().display());

    clipboard.offer_file(&uri);
    engine.tick().await.unwrap();

    let preview = engine.preview(0).await.unwrap();
    assert!(preview.contains(&file.path().display().to_string()));
    assert!(preview.contains("grocery list"));
}

#[tokio::test]
async fn evicted_file_entry_is_reread_on_return() {
    let (mut engine, clipboard) = engine();

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "version one").unwrap();
    file.flush().unwrap();
    let uri = format!("file://{}", file.path().display());

    clipboard.offer_file(&uri);
    engine.tick().await.unwrap();
    assert!(engine.preview(0).await.unwrap().contains("version one"));

    // Push the file entry out of the window
    for i in 0..CAPACITY {
        clipboard.offer_text(&format!("filler-{}", i));
        engine.tick().await.unwrap();
    }

    // Rewrite the file; the cache entry must have died with the eviction
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(file.path())
        .unwrap();
    write!(file, "version two").unwrap();
    drop(file);

    clipboard.offer_file(&uri);
    engine.tick().await.unwrap();
    assert!(engine.preview(0).await.unwrap().contains("version two"));
}

#[tokio::test]
async fn unparseable_content_still_lands_in_history() {
    let (mut engine, clipboard) = engine();

    {
        let mut state = clipboard.state.lock().unwrap();
        state.count += 1;
        state.items = vec![RawClipboardItem::with_bytes(
            "application/x-proprietary",
            vec![0xde, 0xad, 0xbe, 0xef],
        )];
    }
    engine.tick().await.unwrap();

    assert_eq!(engine.length(), 1);
    assert!(matches!(
        engine.snapshot(0).unwrap().payload(),
        ClipboardPayload::Unknown { .. }
    ));
}
