//! Clipdeck Core - headless controller for a mobile video playback screen
//!
//! This crate holds the state behind a playback screen with overlay controls:
//! - Playback state (play/pause, seek, rate, mute)
//! - Overlay visibility, speed menu, and the render plan
//! - Fullscreen with orientation lock and back-navigation handling
//! - A connectivity guard that pauses remote playback offline
//!
//! Decoding, orientation sensing and network sensing stay in external
//! libraries behind the [`Decoder`] and [`DeviceScreen`] traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Clipdeck Core                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │   Playback   │  │   Overlay    │  │ Connectivity │           │
//! │  │    State     │  │  Visibility  │  │    Guard     │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │   Video     │                              │
//! │                    │   Player    │                              │
//! │                    └──────┬──────┘                              │
//! │                           │                                     │
//! │  ┌──────────────┐  ┌──────┴──────┐  ┌──────────────┐            │
//! │  │   Decoder    │  │   Runtime   │  │   Device     │            │
//! │  │   (trait)    │  │ event loop  │  │   Screen     │            │
//! │  └──────────────┘  └─────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use clipdeck_core::{
//!     HeadlessDecoder, HeadlessScreen, PlayerCallbacks, PlayerConfig,
//!     SourceDescriptor, VideoPlayer,
//! };
//!
//! let source = SourceDescriptor::remote("https://cdn.example.com/video.mp4").unwrap();
//! let mut player = VideoPlayer::mount(
//!     PlayerConfig::default(),
//!     source,
//!     HeadlessDecoder::new(),
//!     HeadlessScreen::default(),
//!     PlayerCallbacks::default(),
//! )
//! .unwrap();
//!
//! player.on_loaded(120.0);
//! assert!(!player.playback().paused);
//! assert_eq!(player.seek(500.0), 120.0);
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod theme;
pub mod playback;
pub mod overlay;
pub mod connectivity;
pub mod callbacks;
pub mod backend;
pub mod event;
pub mod player;
pub mod runtime;
pub mod headless;

pub use error::{DecoderError, Error, Result};
pub use types::*;
pub use config::{PlayerConfig, DEFAULT_PLAYBACK_RATES};
pub use theme::ControlColors;
pub use playback::PlaybackState;
pub use overlay::{format_time, OverlayMode, RenderPlan, UiVisibility};
pub use connectivity::{Connectivity, ConnectivityGuard};
pub use callbacks::PlayerCallbacks;
pub use backend::{Decoder, DeviceScreen};
pub use event::PlayerEvent;
pub use player::{PlayerSnapshot, VideoPlayer};
pub use runtime::{Listeners, MountedPlayer, PlayerHandle};
pub use headless::{DecoderCommand, HeadlessDecoder, HeadlessScreen, ScreenCommand};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library initialization
pub fn init() {
    tracing::info!(version = VERSION, "Clipdeck Core initialized");
}
