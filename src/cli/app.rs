//! Daemon app runner

use std::process::ExitCode;
use std::sync::Arc;

use tokio::time::MissedTickBehavior;

use crate::application::ports::{AudioCue, ConfigStore, FileContentCache, IndexStore, Notifier, SystemClipboard};
use crate::application::{ClipboardEngine, CommitOutcome, EngineConfig};
use crate::domain::config::AppConfig;
use crate::domain::selection::MoveOutcome;
use crate::domain::session::BrowseState;
use crate::infrastructure::{
    create_audio_cue, create_clipboard, create_notifier, ChunkFileCache, XdgConfigStore,
    XdgIndexStore,
};

use super::args::DaemonOptions;
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::{DaemonSignal, DaemonSignalHandler};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run daemon mode
pub async fn run_daemon(options: DaemonOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another daemon is already running (PID: {})", pid));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    // Create adapters
    let clipboard = create_clipboard();
    let index_store = XdgIndexStore::new();
    let cache = Arc::new(ChunkFileCache::new());
    let notifier = create_notifier(options.notify);
    let cue = create_audio_cue(options.cue);

    let config = EngineConfig {
        enable_notify: options.notify,
        enable_cue: options.cue,
        max_text_preview: options.max_text_preview,
    };

    let engine = ClipboardEngine::new(clipboard, index_store, cache, notifier, cue, config);

    // Setup signal handler (returns handler + sender for other sources)
    let (mut signals, _signal_tx) = match DaemonSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.daemon_status("Started, watching clipboard...");
    presenter.info(&format!(
        "PID: {} | Poll: {} | SIGUSR1: browse | SIGUSR2: paste | SIGINT: exit",
        std::process::id(),
        options.poll_interval
    ));

    let result = daemon_loop(engine, &mut signals, &presenter, &options).await;

    let _ = pid_file.release();

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

async fn daemon_loop<C, I, F, N, A>(
    mut engine: ClipboardEngine<C, I, F, N, A>,
    signals: &mut DaemonSignalHandler,
    presenter: &Presenter,
    options: &DaemonOptions,
) -> bool
where
    C: SystemClipboard,
    I: IndexStore,
    F: FileContentCache + 'static,
    N: Notifier,
    A: AudioCue,
{
    let mut ticker = tokio::time::interval(options.poll_interval.as_std());
    // A slow tick must not queue catch-up ticks behind it
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Poll failures are transient (clipboard owner busy);
                // keep the loop alive and retry next tick
                if let Err(e) = engine.tick().await {
                    presenter.warn(&format!("Clipboard poll failed: {}", e));
                }
            }
            signal = signals.recv() => {
                match signal {
                    Some(DaemonSignal::Activate) => {
                        handle_activate(&mut engine, presenter).await;
                    }
                    Some(DaemonSignal::Commit) => {
                        handle_commit(&mut engine, presenter).await;
                    }
                    Some(DaemonSignal::Shutdown) => {
                        presenter.daemon_status("Shutting down...");
                        engine.shutdown().await;
                        return true;
                    }
                    None => {
                        // Channel closed
                        return false;
                    }
                }
            }
        }
    }
}

/// Chord press: open the browser, or step one entry older if already open
async fn handle_activate<C, I, F, N, A>(
    engine: &mut ClipboardEngine<C, I, F, N, A>,
    presenter: &Presenter,
) where
    C: SystemClipboard,
    I: IndexStore,
    F: FileContentCache + 'static,
    N: Notifier,
    A: AudioCue,
{
    if engine.state() == BrowseState::Idle {
        match engine.open_browser().await {
            Ok(index) => show_position(engine, presenter, index).await,
            Err(e) => presenter.error(&format!("Failed to open browser: {}", e)),
        }
        return;
    }

    match engine.move_right().await {
        MoveOutcome::Moved(index) => show_position(engine, presenter, index).await,
        MoveOutcome::Boundary => presenter.info("At the oldest entry"),
    }
}

/// Chord release: commit whatever is selected and close the session
async fn handle_commit<C, I, F, N, A>(
    engine: &mut ClipboardEngine<C, I, F, N, A>,
    presenter: &Presenter,
) where
    C: SystemClipboard,
    I: IndexStore,
    F: FileContentCache + 'static,
    N: Notifier,
    A: AudioCue,
{
    if engine.state() != BrowseState::Browsing {
        presenter.warn("Not browsing, nothing to paste");
        return;
    }

    match engine.commit_selection().await {
        Ok(CommitOutcome::Written { summary, .. }) => {
            presenter.output(&summary);
            presenter.daemon_status("Idle");
        }
        Ok(CommitOutcome::Empty) => {
            presenter.info("History is empty");
        }
        Ok(CommitOutcome::WriteFailed { reason, .. }) => {
            presenter.error(&format!("Paste failed: {}", reason));
            presenter.daemon_status("Idle (error)");
        }
        Err(e) => {
            presenter.error(&format!("Failed to commit: {}", e));
        }
    }
}

async fn show_position<C, I, F, N, A>(
    engine: &ClipboardEngine<C, I, F, N, A>,
    presenter: &Presenter,
    index: usize,
) where
    C: SystemClipboard,
    I: IndexStore,
    F: FileContentCache + 'static,
    N: Notifier,
    A: AudioCue,
{
    let len = engine.length();
    if len == 0 {
        presenter.info("History is empty");
        return;
    }
    match engine.preview(index).await {
        Ok(preview) => presenter.browse_position(index, len, &preview),
        Err(e) => presenter.error(&e.to_string()),
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}
