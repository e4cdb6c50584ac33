//! Connectivity guard
//!
//! Two-state machine fed by the connectivity monitor. Losing the network
//! pauses remote playback; regaining it resumes playback. Local files keep
//! playing offline.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Network reachability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            Connectivity::Connected
        } else {
            Connectivity::Disconnected
        }
    }
}

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connectivity::Connected => write!(f, "connected"),
            Connectivity::Disconnected => write!(f, "disconnected"),
        }
    }
}

/// What the player must do after a connectivity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    Pause,
    Resume,
    None,
}

/// Connectivity guard
#[derive(Debug, Clone)]
pub struct ConnectivityGuard {
    state: Connectivity,
    local_source: bool,
}

impl ConnectivityGuard {
    /// Guards start connected; the monitor corrects that on its first report
    pub fn new(local_source: bool) -> Self {
        Self {
            state: Connectivity::Connected,
            local_source,
        }
    }

    pub fn state(&self) -> Connectivity {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == Connectivity::Connected
    }

    /// Track whether the current source is on-device
    pub fn set_local_source(&mut self, local_source: bool) {
        self.local_source = local_source;
    }

    /// Apply a monitor report. Repeated reports of the same state are no-ops.
    pub fn on_change(&mut self, connected: bool) -> GuardAction {
        let next = Connectivity::from_connected(connected);
        if next == self.state {
            return GuardAction::None;
        }

        info!(from = %self.state, to = %next, local = self.local_source, "Connectivity changed");
        self.state = next;

        match next {
            Connectivity::Connected => GuardAction::Resume,
            Connectivity::Disconnected if self.local_source => GuardAction::None,
            Connectivity::Disconnected => GuardAction::Pause,
        }
    }

    /// Remote source without network: playback must stay paused and the
    /// offline banner replaces the controls
    pub fn is_offline(&self) -> bool {
        self.state == Connectivity::Disconnected && !self.local_source
    }
}
