//! Player events
//!
//! Every input the player reacts to: user taps, decoder callbacks,
//! connectivity reports, screen changes, and host prop updates.

use crate::{
    error::DecoderError,
    types::{Dimensions, SourceDescriptor},
};
use serde::{Deserialize, Serialize};

/// Input to [`VideoPlayer::dispatch`](crate::player::VideoPlayer::dispatch)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlayerEvent {
    // User input
    Play,
    Pause,
    TogglePlay,
    Seek { position: f64 },
    SkipForward,
    SkipBackward,
    /// Rate picked from the speed menu
    SelectRate { rate: f64 },
    ToggleMute,
    ToggleSpeedMenu,
    TapOverlay,
    ToggleFullscreen,
    HardwareBack,

    // Host props
    ExternalPause { paused: bool },
    ChangeRate { rate: f64 },
    ChangeSource { source: SourceDescriptor },

    // Decoder callbacks
    Loaded { duration: f64 },
    Progress { time: f64 },
    Buffering { is_buffering: bool },
    DecoderError { error: DecoderError },
    Ended,
    ControlsVisibility { visible: bool },

    // Device listeners
    ConnectivityChanged { connected: bool },
    DimensionsChanged { dimensions: Dimensions },
}

impl PlayerEvent {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            PlayerEvent::Play => "play",
            PlayerEvent::Pause => "pause",
            PlayerEvent::TogglePlay => "toggle_play",
            PlayerEvent::Seek { .. } => "seek",
            PlayerEvent::SkipForward => "skip_forward",
            PlayerEvent::SkipBackward => "skip_backward",
            PlayerEvent::SelectRate { .. } => "select_rate",
            PlayerEvent::ToggleMute => "toggle_mute",
            PlayerEvent::ToggleSpeedMenu => "toggle_speed_menu",
            PlayerEvent::TapOverlay => "tap_overlay",
            PlayerEvent::ToggleFullscreen => "toggle_fullscreen",
            PlayerEvent::HardwareBack => "hardware_back",
            PlayerEvent::ExternalPause { .. } => "external_pause",
            PlayerEvent::ChangeRate { .. } => "change_rate",
            PlayerEvent::ChangeSource { .. } => "change_source",
            PlayerEvent::Loaded { .. } => "loaded",
            PlayerEvent::Progress { .. } => "progress",
            PlayerEvent::Buffering { .. } => "buffering",
            PlayerEvent::DecoderError { .. } => "decoder_error",
            PlayerEvent::Ended => "ended",
            PlayerEvent::ControlsVisibility { .. } => "controls_visibility",
            PlayerEvent::ConnectivityChanged { .. } => "connectivity_changed",
            PlayerEvent::DimensionsChanged { .. } => "dimensions_changed",
        }
    }

    /// Events fired many times per second
    pub fn is_high_frequency(&self) -> bool {
        matches!(self, PlayerEvent::Progress { .. })
    }

    /// Touches on overlay controls that the offline banner replaces
    pub fn is_overlay_control(&self) -> bool {
        matches!(
            self,
            PlayerEvent::Play
                | PlayerEvent::Pause
                | PlayerEvent::TogglePlay
                | PlayerEvent::Seek { .. }
                | PlayerEvent::SkipForward
                | PlayerEvent::SkipBackward
                | PlayerEvent::SelectRate { .. }
                | PlayerEvent::ToggleMute
                | PlayerEvent::ToggleSpeedMenu
        )
    }
}

/// Parse a JSON array of events
pub fn parse_script(json: &str) -> crate::Result<Vec<PlayerEvent>> {
    Ok(serde_json::from_str(json)?)
}
