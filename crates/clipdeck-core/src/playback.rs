//! Playback state
//!
//! Position, duration, rate, mute and the paused flag. Positions are always
//! kept within `[0, duration]`.

use crate::config::NORMAL_RATE;
use serde::{Deserialize, Serialize};

/// Playback state holder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Playback paused
    pub paused: bool,
    /// Current position in seconds
    pub current_time: f64,
    /// Content duration in seconds (0 until loaded)
    pub duration: f64,
    /// Speed multiplier
    pub playback_rate: f64,
    /// Audio muted
    pub muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            paused: true,
            current_time: 0.0,
            duration: 0.0,
            playback_rate: NORMAL_RATE,
            muted: false,
        }
    }
}

impl PlaybackState {
    /// Clamp a position to `[0, duration]`. NaN maps to 0.
    pub fn clamp(&self, position: f64) -> f64 {
        if position.is_nan() {
            return 0.0;
        }
        position.clamp(0.0, self.duration.max(0.0))
    }

    /// Set position, clamped. Returns the stored value.
    pub fn set_position(&mut self, position: f64) -> f64 {
        self.current_time = self.clamp(position);
        self.current_time
    }

    /// Playhead sits at (or past) the end of loaded content
    pub fn is_at_end(&self) -> bool {
        self.duration > 0.0 && self.current_time >= self.duration
    }

    /// Fraction of content played, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            self.current_time / self.duration
        } else {
            0.0
        }
    }

    /// State for a freshly selected source: position 0, normal rate, paused.
    /// Mute is a user preference and survives.
    pub fn reset_for_source(&mut self) {
        self.paused = true;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.playback_rate = NORMAL_RATE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(duration: f64) -> PlaybackState {
        PlaybackState {
            duration,
            ..Default::default()
        }
    }

    #[test]
    fn test_clamp() {
        let state = loaded(120.0);
        assert_eq!(state.clamp(500.0), 120.0);
        assert_eq!(state.clamp(-3.0), 0.0);
        assert_eq!(state.clamp(42.5), 42.5);
        assert_eq!(state.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn test_clamp_before_load() {
        let state = PlaybackState::default();
        assert_eq!(state.clamp(30.0), 0.0);
    }

    #[test]
    fn test_is_at_end() {
        let mut state = loaded(60.0);
        assert!(!state.is_at_end());
        state.set_position(60.0);
        assert!(state.is_at_end());
        assert!(!PlaybackState::default().is_at_end());
    }

    #[test]
    fn test_reset_keeps_mute() {
        let mut state = loaded(60.0);
        state.paused = false;
        state.muted = true;
        state.playback_rate = 2.0;
        state.set_position(30.0);

        state.reset_for_source();

        assert!(state.paused);
        assert!(state.muted);
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.playback_rate, 1.0);
    }

    #[test]
    fn test_progress() {
        let mut state = loaded(200.0);
        state.set_position(50.0);
        assert_eq!(state.progress(), 0.25);
        assert_eq!(PlaybackState::default().progress(), 0.0);
    }
}
