//! Core types for Clipdeck

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Unique identifier for a mounted player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Container/streaming format hint passed to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    Mp4,
    Hls,
    Dash,
    Webm,
}

impl MediaFormat {
    /// Detect format from a URI or file path extension
    pub fn detect(uri: &str) -> Self {
        // Query strings and fragments carry signing tokens, not the extension
        let path = match Url::parse(uri) {
            Ok(url) => url.path().to_lowercase(),
            Err(_) => uri
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_lowercase(),
        };

        if path.ends_with(".m3u8") || path.ends_with(".m3u") {
            MediaFormat::Hls
        } else if path.ends_with(".mpd") {
            MediaFormat::Dash
        } else if path.ends_with(".webm") {
            MediaFormat::Webm
        } else {
            MediaFormat::Mp4
        }
    }

    /// Type tag understood by the decoder library
    pub fn decoder_tag(&self) -> &'static str {
        match self {
            MediaFormat::Mp4 => "mp4",
            MediaFormat::Hls => "m3u8",
            MediaFormat::Dash => "mpd",
            MediaFormat::Webm => "webm",
        }
    }
}

impl std::str::FromStr for MediaFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mp4" => Ok(MediaFormat::Mp4),
            "hls" | "m3u8" => Ok(MediaFormat::Hls),
            "dash" | "mpd" => Ok(MediaFormat::Dash),
            "webm" => Ok(MediaFormat::Webm),
            other => Err(Error::InvalidSource(format!("unknown media format '{}'", other))),
        }
    }
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaFormat::Mp4 => write!(f, "MP4"),
            MediaFormat::Hls => write!(f, "HLS"),
            MediaFormat::Dash => write!(f, "DASH"),
            MediaFormat::Webm => write!(f, "WebM"),
        }
    }
}

/// DRM system types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrmSystem {
    Widevine,
}

/// DRM request handed to the decoder; license negotiation happens there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrmRequest {
    pub system: DrmSystem,
    pub license_server: Url,
}

/// Decoder buffering hints, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Minimum buffered duration
    pub min_buffer_ms: u32,
    /// Maximum buffered duration
    pub max_buffer_ms: u32,
    /// Buffer required to start playback
    pub buffer_for_playback_ms: u32,
    /// Buffer required to resume after a rebuffer
    pub buffer_for_playback_after_rebuffer_ms: u32,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            min_buffer_ms: 15_000,
            max_buffer_ms: 50_000,
            buffer_for_playback_ms: 2_500,
            buffer_for_playback_after_rebuffer_ms: 5_000,
        }
    }
}

/// What the host wants to play.
///
/// Replacing the descriptor with one that has a different `uri` triggers a
/// reload and resets playback position and rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Remote URL, or an on-device path when `is_local_file` is set
    pub uri: String,
    /// File already resident on the device
    #[serde(default)]
    pub is_local_file: bool,
    /// Explicit format; detected from the URI when absent
    #[serde(default)]
    pub format: Option<MediaFormat>,
    /// Widevine license endpoint for protected remote content
    #[serde(default)]
    pub drm_license_url: Option<Url>,
}

impl SourceDescriptor {
    /// Remote source; the URI must parse as a URL
    pub fn remote(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        Url::parse(&uri)?;
        Ok(Self {
            uri,
            is_local_file: false,
            format: None,
            drm_license_url: None,
        })
    }

    /// On-device file
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            uri: path.into(),
            is_local_file: true,
            format: None,
            drm_license_url: None,
        }
    }

    pub fn with_format(mut self, format: MediaFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_drm_license(mut self, license_url: &str) -> Result<Self> {
        self.drm_license_url = Some(Url::parse(license_url)?);
        Ok(self)
    }

    /// Effective media format
    pub fn media_format(&self) -> MediaFormat {
        self.format.unwrap_or_else(|| MediaFormat::detect(&self.uri))
    }

    /// Check the descriptor is loadable
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(Error::InvalidSource("empty uri".to_string()));
        }
        if !self.is_local_file {
            Url::parse(&self.uri)?;
        }
        Ok(())
    }

    /// Build the load request for the decoder.
    ///
    /// Local files are addressed with `file://` and carry neither a format
    /// hint nor DRM.
    pub fn to_media_source(&self, buffer: BufferConfig) -> Result<MediaSource> {
        self.validate()?;

        if self.is_local_file {
            let uri = if self.uri.starts_with("file://") {
                self.uri.clone()
            } else {
                format!("file://{}", self.uri)
            };
            return Ok(MediaSource {
                uri,
                format: None,
                drm: None,
                buffer,
            });
        }

        Ok(MediaSource {
            uri: self.uri.clone(),
            format: Some(self.media_format()),
            drm: self.drm_license_url.clone().map(|license_server| DrmRequest {
                system: DrmSystem::Widevine,
                license_server,
            }),
            buffer,
        })
    }
}

/// Load request issued to the decoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    pub uri: String,
    pub format: Option<MediaFormat>,
    pub drm: Option<DrmRequest>,
    pub buffer: BufferConfig,
}

/// Device orientation as reported by the orientation library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    LandscapeLeft,
    LandscapeRight,
}

impl Orientation {
    pub fn is_landscape(&self) -> bool {
        matches!(self, Orientation::LandscapeLeft | Orientation::LandscapeRight)
    }
}

/// Window dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Tablets and landscape TVs get larger controls
    pub fn is_large(&self) -> bool {
        self.width > 1000.0
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(390.0, 844.0)
    }
}

/// Answer to a hardware back press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackAction {
    /// The player handled it; stop propagation
    Consumed,
    /// Let the host navigate back
    Propagate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(MediaFormat::detect("https://cdn.example.com/master.m3u8"), MediaFormat::Hls);
        assert_eq!(MediaFormat::detect("https://cdn.example.com/manifest.mpd?token=abc"), MediaFormat::Dash);
        assert_eq!(MediaFormat::detect("/sdcard/clip.WEBM"), MediaFormat::Webm);
        assert_eq!(MediaFormat::detect("https://cdn.example.com/video.mp4"), MediaFormat::Mp4);
        assert_eq!(MediaFormat::detect("https://cdn.example.com/stream"), MediaFormat::Mp4);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("m3u8".parse::<MediaFormat>().unwrap(), MediaFormat::Hls);
        assert_eq!("DASH".parse::<MediaFormat>().unwrap(), MediaFormat::Dash);
        assert!("avi".parse::<MediaFormat>().is_err());
    }

    #[test]
    fn test_remote_source_requires_url() {
        assert!(SourceDescriptor::remote("not a url").is_err());
        assert!(SourceDescriptor::remote("https://example.com/a.mp4").is_ok());
    }

    #[test]
    fn test_local_media_source() {
        let source = SourceDescriptor::local("/data/videos/clip.mp4")
            .with_format(MediaFormat::Hls);
        let media = source.to_media_source(BufferConfig::default()).unwrap();
        assert_eq!(media.uri, "file:///data/videos/clip.mp4");
        assert_eq!(media.format, None);
        assert_eq!(media.drm, None);
    }

    #[test]
    fn test_remote_media_source_with_drm() {
        let source = SourceDescriptor::remote("https://example.com/manifest.mpd")
            .unwrap()
            .with_drm_license("https://license.example.com/widevine")
            .unwrap();
        let media = source.to_media_source(BufferConfig::default()).unwrap();
        assert_eq!(media.format, Some(MediaFormat::Dash));
        let drm = media.drm.unwrap();
        assert_eq!(drm.system, DrmSystem::Widevine);
        assert_eq!(drm.license_server.as_str(), "https://license.example.com/widevine");
    }

    #[test]
    fn test_empty_source_rejected() {
        assert!(SourceDescriptor::local("  ").validate().is_err());
    }
}
