//! Signal handlers for the daemon loop
//!
//! Hotkey edges arrive as Unix signals: SIGUSR1 maps to the chord press
//! (advance the selection, opening the browser on the first press) and
//! SIGUSR2 maps to the chord release (commit the current selection).

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// Daemon signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonSignal {
    /// Chord press: open the browser or step to an older entry (SIGUSR1)
    Activate,
    /// Chord release: commit the selected entry (SIGUSR2)
    Commit,
    /// Shutdown daemon (SIGINT/SIGTERM)
    Shutdown,
}

/// Daemon signal handler
///
/// Translates OS signals into browse commands and provides a channel for
/// the daemon loop to consume them in arrival order.
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<DaemonSignal>,
}

impl DaemonSignalHandler {
    /// Create a new daemon signal handler and start listening.
    ///
    /// Returns the handler and a sender that other sources can use to
    /// inject commands into the daemon loop.
    pub async fn new() -> Result<(Self, mpsc::Sender<DaemonSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        // SIGUSR1: chord press
        let tx_usr1 = tx.clone();
        let mut sigusr1 = signal(SignalKind::user_defined1())?;
        tokio::spawn(async move {
            loop {
                if sigusr1.recv().await.is_none() {
                    break;
                }
                if tx_usr1.send(DaemonSignal::Activate).await.is_err() {
                    break;
                }
            }
        });

        // SIGUSR2: chord release
        let tx_usr2 = tx.clone();
        let mut sigusr2 = signal(SignalKind::user_defined2())?;
        tokio::spawn(async move {
            loop {
                if sigusr2.recv().await.is_none() {
                    break;
                }
                if tx_usr2.send(DaemonSignal::Commit).await.is_err() {
                    break;
                }
            }
        });

        // SIGINT: shutdown
        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
            let _ = tx_int.send(DaemonSignal::Shutdown).await;
        });

        // SIGTERM: shutdown
        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            let _ = tx_term.send(DaemonSignal::Shutdown).await;
        });

        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<DaemonSignal> {
        self.receiver.recv().await
    }
}
