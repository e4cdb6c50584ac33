//! Player configuration
//!
//! Everything the host supplies on mount apart from the source and the
//! handlers. Missing JSON fields fall back to the defaults.

use crate::{theme::ControlColors, types::BufferConfig, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Rates offered by the speed menu when the host does not supply a set
pub const DEFAULT_PLAYBACK_RATES: [f64; 6] = [0.5, 1.0, 1.25, 1.5, 1.75, 2.0];

/// Rate every source starts at
pub const NORMAL_RATE: f64 = 1.0;

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Start playing as soon as the source loads
    pub autoplay: bool,
    /// Position (seconds) to jump to once the source loads
    pub start_offset: f64,
    /// Rates selectable from the speed menu
    pub playback_rates: Vec<f64>,
    /// Hide the mute button
    pub hide_mute_button: bool,
    /// Hide the speed button and menu
    pub hide_playback_button: bool,
    /// Seconds skipped by the rewind/forward buttons
    pub skip_interval: f64,
    /// Spinner and seek bar colors
    pub colors: ControlColors,
    /// Decoder buffering hints
    pub buffer: BufferConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            start_offset: 0.0,
            playback_rates: DEFAULT_PLAYBACK_RATES.to_vec(),
            hide_mute_button: false,
            hide_playback_button: false,
            skip_interval: 10.0,
            colors: ControlColors::default(),
            buffer: BufferConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading player config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.playback_rates.is_empty() {
            return Err(Error::InvalidConfig("playback_rates must not be empty".to_string()));
        }
        if let Some(rate) = self
            .playback_rates
            .iter()
            .find(|r| !r.is_finite() || **r <= 0.0)
        {
            return Err(Error::InvalidConfig(format!(
                "playback rate {} must be positive",
                rate
            )));
        }
        if !self.start_offset.is_finite() || self.start_offset < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "start_offset {} must be a non-negative number",
                self.start_offset
            )));
        }
        if !self.skip_interval.is_finite() || self.skip_interval <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "skip_interval {} must be positive",
                self.skip_interval
            )));
        }
        let missing = self.colors.missing();
        if !missing.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "empty colors: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Whether `rate` is one of the selectable rates
    pub fn allows_rate(&self, rate: f64) -> bool {
        self.playback_rates
            .iter()
            .any(|allowed| (allowed - rate).abs() < f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert!(config.autoplay);
        assert_eq!(config.start_offset, 0.0);
        assert_eq!(config.playback_rates, vec![0.5, 1.0, 1.25, 1.5, 1.75, 2.0]);
        assert_eq!(config.skip_interval, 10.0);
        assert_eq!(config.buffer.min_buffer_ms, 15_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = PlayerConfig::from_json(
            r#"{"autoplay": false, "playback_rates": [0.5, 1.0, 1.5]}"#,
        )
        .unwrap();
        assert!(!config.autoplay);
        assert_eq!(config.playback_rates, vec![0.5, 1.0, 1.5]);
        assert!(!config.hide_mute_button);
    }

    #[test]
    fn test_rejects_bad_rates() {
        assert!(PlayerConfig::from_json(r#"{"playback_rates": []}"#).is_err());
        assert!(PlayerConfig::from_json(r#"{"playback_rates": [1.0, -2.0]}"#).is_err());
    }

    #[test]
    fn test_rejects_negative_offset() {
        let err = PlayerConfig::from_json(r#"{"start_offset": -5}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_allows_rate() {
        let config = PlayerConfig::default();
        assert!(config.allows_rate(1.25));
        assert!(!config.allows_rate(3.0));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PlayerConfig::default();
        let parsed = PlayerConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed, config);
    }
}
