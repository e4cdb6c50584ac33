//! Control colors
//!
//! Hosts customize the loading spinner and the seek bar; everything else in
//! the overlay uses the fixed palette below.
//!
//! # Usage
//!
//! ```rust
//! use clipdeck_core::theme::ControlColors;
//!
//! let colors = ControlColors::default().with_thumb("#F3983E");
//! assert_eq!(colors.seek_thumb, "#F3983E");
//! ```

use serde::{Deserialize, Serialize};

/// Overlay button background
pub const CONTROL_BACKDROP: &str = "rgba(0,0,0,.5)";
/// Icon and label color
pub const ICON_COLOR: &str = "#fff";
/// Video surface background
pub const SURFACE_BACKGROUND: &str = "black";

/// Host-customizable colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlColors {
    /// Loading spinner
    pub loading: String,
    /// Seek bar track left of the thumb
    pub seek_track_min: String,
    /// Seek bar track right of the thumb
    pub seek_track_max: String,
    /// Seek bar thumb
    pub seek_thumb: String,
}

impl Default for ControlColors {
    fn default() -> Self {
        Self {
            loading: "#fff".to_string(),
            seek_track_min: "#fff".to_string(),
            seek_track_max: "grey".to_string(),
            seek_thumb: "dodgerblue".to_string(),
        }
    }
}

impl ControlColors {
    pub fn with_loading(mut self, color: impl Into<String>) -> Self {
        self.loading = color.into();
        self
    }

    pub fn with_thumb(mut self, color: impl Into<String>) -> Self {
        self.seek_thumb = color.into();
        self
    }

    pub fn with_tracks(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.seek_track_min = min.into();
        self.seek_track_max = max.into();
        self
    }

    /// Names of fields holding an empty color
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("loading", &self.loading),
            ("seek_track_min", &self.seek_track_min),
            ("seek_track_max", &self.seek_track_max),
            ("seek_thumb", &self.seek_thumb),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        let colors = ControlColors::default();
        assert_eq!(colors.loading, "#fff");
        assert_eq!(colors.seek_track_max, "grey");
        assert_eq!(colors.seek_thumb, "dodgerblue");
        assert!(colors.missing().is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let colors: ControlColors = serde_json::from_str(r#"{"seek_thumb": "red"}"#).unwrap();
        assert_eq!(colors.seek_thumb, "red");
        assert_eq!(colors.loading, "#fff");
    }

    #[test]
    fn test_missing_colors() {
        let colors = ControlColors::default().with_loading("");
        assert_eq!(colors.missing(), vec!["loading"]);
    }
}
