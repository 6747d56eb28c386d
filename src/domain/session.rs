//! Browse session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrowseState {
    #[default]
    Idle,
    Browsing,
}

impl BrowseState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Browsing => "browsing",
        }
    }
}

impl fmt::Display for BrowseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: BrowseState,
    pub action: String,
}

/// Browse session entity.
/// Manages state transitions for one hotkey-driven browsing pass.
///
/// State machine:
///   IDLE -> BROWSING (open, on the activate chord)
///   BROWSING -> IDLE (commit, on the deactivate chord)
///   BROWSING -> IDLE (cancel, without write-back)
#[derive(Debug, Default)]
pub struct BrowseSession {
    state: BrowseState,
}

impl BrowseSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: BrowseState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> BrowseState {
        self.state
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == BrowseState::Idle
    }

    /// Check if currently browsing
    pub fn is_browsing(&self) -> bool {
        self.state == BrowseState::Browsing
    }

    /// Transition from IDLE to BROWSING
    pub fn open(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != BrowseState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "open browser".to_string(),
            });
        }
        self.state = BrowseState::Browsing;
        Ok(())
    }

    /// Transition from BROWSING to IDLE, committing the selection
    pub fn commit(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != BrowseState::Browsing {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "commit selection".to_string(),
            });
        }
        self.state = BrowseState::Idle;
        Ok(())
    }

    /// Transition from BROWSING to IDLE without committing
    pub fn cancel(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != BrowseState::Browsing {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "cancel browsing".to_string(),
            });
        }
        self.state = BrowseState::Idle;
        Ok(())
    }
}
