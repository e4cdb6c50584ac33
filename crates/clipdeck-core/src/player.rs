//! Video Player - the playback screen state machine
//!
//! Owns:
//! - Playback state (paused, position, duration, rate, mute)
//! - Overlay visibility and fullscreen
//! - The connectivity guard
//!
//! Commands go out to the [`Decoder`] and [`DeviceScreen`]; their callbacks
//! come back in through [`VideoPlayer::dispatch`].

use crate::{
    backend::{Decoder, DeviceScreen},
    callbacks::PlayerCallbacks,
    config::{PlayerConfig, NORMAL_RATE},
    connectivity::{Connectivity, ConnectivityGuard, GuardAction},
    error::DecoderError,
    event::PlayerEvent,
    overlay::{render_plan, OverlayMode, RenderPlan, UiVisibility},
    playback::PlaybackState,
    types::{BackAction, Dimensions, SessionId, SourceDescriptor},
    Error, Result,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, trace, warn};

/// Serializable view of the whole player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub session_id: SessionId,
    pub mounted_at: DateTime<Utc>,
    pub source: SourceDescriptor,
    pub playback: PlaybackState,
    pub ui: UiVisibility,
    pub connectivity: Connectivity,
    pub overlay: OverlayMode,
    pub awaiting_load: bool,
}

/// Playback screen controller
pub struct VideoPlayer<D: Decoder, S: DeviceScreen> {
    id: SessionId,
    mounted_at: DateTime<Utc>,
    config: PlayerConfig,
    source: SourceDescriptor,
    decoder: D,
    screen: S,
    callbacks: PlayerCallbacks,
    playback: PlaybackState,
    ui: UiVisibility,
    guard: ConnectivityGuard,
    dimensions: Dimensions,
    /// Source handed to the decoder, load not yet reported
    awaiting_load: bool,
}

impl<D: Decoder, S: DeviceScreen> VideoPlayer<D, S> {
    /// Mount the player and start loading `source`.
    ///
    /// Playback stays paused until the decoder reports the load; autoplay
    /// then decides whether it starts.
    pub fn mount(
        config: PlayerConfig,
        source: SourceDescriptor,
        mut decoder: D,
        screen: S,
        callbacks: PlayerCallbacks,
    ) -> Result<Self> {
        config.validate()?;
        let media = source.to_media_source(config.buffer)?;

        let id = SessionId::new();
        info!(
            session_id = %id,
            uri = %source.uri,
            local = source.is_local_file,
            format = %source.media_format(),
            autoplay = config.autoplay,
            "Mounting player"
        );

        decoder.load(&media);
        decoder.set_rate(NORMAL_RATE);
        decoder.set_muted(false);
        decoder.pause();

        let mut ui = UiVisibility::default();
        ui.set_loading(true);

        Ok(Self {
            id,
            mounted_at: Utc::now(),
            guard: ConnectivityGuard::new(source.is_local_file),
            dimensions: screen.dimensions(),
            config,
            source,
            decoder,
            screen,
            callbacks,
            playback: PlaybackState::default(),
            ui,
            awaiting_load: true,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn ui(&self) -> &UiVisibility {
        &self.ui
    }

    pub fn is_connected(&self) -> bool {
        self.guard.is_connected()
    }

    /// Remote source without network
    pub fn is_offline(&self) -> bool {
        self.guard.is_offline()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn overlay_mode(&self) -> OverlayMode {
        OverlayMode::derive(&self.ui, self.guard.is_offline())
    }

    /// What the view layer should draw right now
    pub fn render_plan(&self) -> RenderPlan {
        render_plan(
            &self.playback,
            &self.ui,
            self.guard.is_offline(),
            &self.config,
            self.dimensions,
        )
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            session_id: self.id,
            mounted_at: self.mounted_at,
            source: self.source.clone(),
            playback: self.playback.clone(),
            ui: self.ui.clone(),
            connectivity: self.guard.state(),
            overlay: self.overlay_mode(),
            awaiting_load: self.awaiting_load,
        }
    }

    /// Route one event to its handler.
    ///
    /// While offline with a remote source only the fullscreen toggle, the
    /// back button and overlay taps get through from the user; host props
    /// and decoder or device callbacks are always applied.
    ///
    /// Returns the back-navigation answer for [`PlayerEvent::HardwareBack`],
    /// `None` for everything else.
    pub fn dispatch(&mut self, event: PlayerEvent) -> Result<Option<BackAction>> {
        if event.is_high_frequency() {
            trace!(event = event.name(), "Dispatch");
        } else {
            debug!(event = event.name(), "Dispatch");
        }

        if event.is_overlay_control() && self.guard.is_offline() {
            warn!(event = event.name(), "Offline with a remote source, control ignored");
            return Ok(None);
        }

        match event {
            PlayerEvent::Play => self.play(),
            PlayerEvent::Pause => self.pause(),
            PlayerEvent::TogglePlay => self.toggle_play(),
            PlayerEvent::Seek { position } => {
                self.seek(position);
            }
            PlayerEvent::SkipForward => {
                self.skip_forward();
            }
            PlayerEvent::SkipBackward => {
                self.skip_backward();
            }
            PlayerEvent::SelectRate { rate } => self.select_rate(rate)?,
            PlayerEvent::ToggleMute => self.toggle_mute(),
            PlayerEvent::ToggleSpeedMenu => {
                self.toggle_speed_menu();
            }
            PlayerEvent::TapOverlay => self.tap_overlay(),
            PlayerEvent::ToggleFullscreen => self.toggle_fullscreen(),
            PlayerEvent::HardwareBack => return Ok(Some(self.handle_back())),
            PlayerEvent::ExternalPause { paused } => self.set_external_pause(paused),
            PlayerEvent::ChangeRate { rate } => self.change_rate(rate)?,
            PlayerEvent::ChangeSource { source } => self.change_source(source)?,
            PlayerEvent::Loaded { duration } => self.on_loaded(duration),
            PlayerEvent::Progress { time } => self.on_progress(time),
            PlayerEvent::Buffering { is_buffering } => self.on_buffering_changed(is_buffering),
            PlayerEvent::DecoderError { error } => self.on_error(error),
            PlayerEvent::Ended => self.on_ended(),
            PlayerEvent::ControlsVisibility { visible } => self.set_controls_visible(visible),
            PlayerEvent::ConnectivityChanged { connected } => self.on_connectivity_changed(connected),
            PlayerEvent::DimensionsChanged { dimensions } => self.on_dimensions_changed(dimensions),
        }

        Ok(None)
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Set the paused flag and command the decoder. Returns false when the
    /// flag already had that value.
    fn apply_paused(&mut self, paused: bool) -> bool {
        if self.playback.paused == paused {
            return false;
        }
        self.playback.paused = paused;
        if paused {
            self.decoder.pause();
        } else {
            self.decoder.play();
        }
        true
    }

    /// Whether playback may start right now
    fn can_play(&self) -> bool {
        if self.guard.is_offline() {
            warn!("Offline with a remote source, staying paused");
            return false;
        }
        if self.awaiting_load {
            warn!("Source still loading, staying paused");
            return false;
        }
        true
    }

    /// Resume playback. Ignored while offline or while a source is loading.
    pub fn play(&mut self) {
        if !self.can_play() {
            return;
        }
        self.ui.hide_speed_menu();
        if !self.playback.paused {
            return;
        }

        // Replaying finished content starts over
        if self.playback.is_at_end() {
            self.decoder.seek(0.0);
            self.playback.set_position(0.0);
        }

        self.apply_paused(false);
        info!(position = self.playback.current_time, "Playing");
        self.callbacks.playing();
    }

    pub fn pause(&mut self) {
        self.ui.hide_speed_menu();
        if self.apply_paused(true) {
            info!(position = self.playback.current_time, "Paused");
            self.callbacks.paused();
        }
    }

    /// Play/pause button
    pub fn toggle_play(&mut self) {
        if self.playback.paused {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Host-driven pause prop. Does not echo back through the handlers.
    pub fn set_external_pause(&mut self, paused: bool) {
        if !paused && !self.can_play() {
            return;
        }
        if self.apply_paused(paused) {
            info!(paused, "Pause set by host");
        }
    }

    /// Seek to `position`, clamped to `[0, duration]`. Returns the position
    /// actually used.
    pub fn seek(&mut self, position: f64) -> f64 {
        let target = self.playback.clamp(position);
        if target != position {
            debug!(requested = position, clamped = target, "Seek clamped");
        }
        self.decoder.seek(target);
        self.playback.set_position(target);
        self.ui.hide_speed_menu();
        target
    }

    /// Fast-forward button
    pub fn skip_forward(&mut self) -> f64 {
        self.seek(self.playback.current_time + self.config.skip_interval)
    }

    /// Rewind button
    pub fn skip_backward(&mut self) -> f64 {
        self.seek(self.playback.current_time - self.config.skip_interval)
    }

    /// Apply a playback rate from the allowed set
    pub fn change_rate(&mut self, rate: f64) -> Result<()> {
        if !self.config.allows_rate(rate) {
            warn!(rate, "Rejected playback rate");
            return Err(Error::UnsupportedRate { rate });
        }
        self.playback.playback_rate = rate;
        self.decoder.set_rate(rate);
        info!(rate, "Playback rate changed");
        Ok(())
    }

    /// Rate picked from the speed menu; closes the menu
    pub fn select_rate(&mut self, rate: f64) -> Result<()> {
        self.change_rate(rate)?;
        self.ui.hide_speed_menu();
        Ok(())
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.playback.muted = muted;
        self.decoder.set_muted(muted);
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.playback.muted);
        info!(muted = self.playback.muted, "Mute toggled");
    }

    /// Replace the source. A different URI reloads: position 0, normal
    /// rate, paused until the decoder reports the new load.
    #[instrument(skip(self, source), fields(uri = %source.uri))]
    pub fn change_source(&mut self, source: SourceDescriptor) -> Result<()> {
        if source.uri == self.source.uri {
            source.validate()?;
            debug!("Same URI, no reload");
            self.guard.set_local_source(source.is_local_file);
            self.source = source;
            if self.guard.is_offline() {
                self.ui.hide_speed_menu();
                self.apply_paused(true);
            }
            return Ok(());
        }

        let media = source.to_media_source(self.config.buffer)?;
        info!(from = %self.source.uri, "Changing source");

        self.playback.reset_for_source();
        self.ui.set_loading(true);
        self.awaiting_load = true;
        self.guard.set_local_source(source.is_local_file);
        self.source = source;

        self.decoder.pause();
        self.decoder.load(&media);
        self.decoder.set_rate(NORMAL_RATE);
        Ok(())
    }

    // =========================================================================
    // Decoder callbacks
    // =========================================================================

    /// Source finished loading
    pub fn on_loaded(&mut self, duration: f64) {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            warn!(duration, "Decoder reported unusable duration");
            0.0
        };

        self.playback.duration = duration;
        self.ui.set_loading(false);
        self.awaiting_load = false;
        info!(duration, "Source loaded");
        self.callbacks.duration_known(duration);

        let offset = self.config.start_offset;
        if offset < duration {
            self.decoder.seek(offset);
            self.playback.set_position(offset);
        } else {
            self.playback.set_position(self.playback.current_time);
        }

        if self.config.autoplay && !self.guard.is_offline() {
            self.apply_paused(false);
        }
    }

    pub fn on_progress(&mut self, time: f64) {
        if self.awaiting_load {
            trace!(time, "Progress from previous source ignored");
            return;
        }
        let position = self.playback.set_position(time);
        self.callbacks.progress_time(position);
    }

    /// Loading indicator follows decoder buffering; a pending load keeps it on
    pub fn on_buffering_changed(&mut self, is_buffering: bool) {
        debug!(is_buffering, "Buffering changed");
        self.ui.set_loading(is_buffering || self.awaiting_load);
    }

    /// Forward a decoder failure to the host. No retry.
    pub fn on_error(&mut self, error: DecoderError) {
        warn!(error = %error, uri = %self.source.uri, "Decoder error");
        self.callbacks.error(error);
    }

    /// Content played to the end: rewind and pause
    pub fn on_ended(&mut self) {
        self.apply_paused(true);
        self.decoder.seek(0.0);
        self.playback.set_position(0.0);
        info!("Playback ended");
        self.callbacks.ended();
    }

    // =========================================================================
    // Overlay
    // =========================================================================

    pub fn tap_overlay(&mut self) {
        let visible = self.ui.toggle_controls();
        debug!(visible, "Controls toggled");
    }

    /// Decoder-reported control visibility
    pub fn set_controls_visible(&mut self, visible: bool) {
        self.ui.set_controls_visible(visible);
    }

    /// Speed button. Returns whether the menu is open afterwards.
    pub fn toggle_speed_menu(&mut self) -> bool {
        if self.config.hide_playback_button || self.guard.is_offline() {
            return false;
        }
        self.ui.toggle_speed_menu()
    }

    pub fn toggle_fullscreen(&mut self) {
        self.ui.hide_speed_menu();
        let fullscreen = !self.ui.fullscreen();
        if fullscreen {
            self.screen.lock_landscape();
        } else {
            self.screen.lock_portrait();
        }
        self.screen.set_status_bar_hidden(fullscreen);
        self.ui.set_fullscreen(fullscreen);
        self.dimensions = self.screen.dimensions();
        info!(fullscreen, "Fullscreen toggled");
    }

    /// Hardware back: leaves fullscreen instead of navigating away
    pub fn handle_back(&mut self) -> BackAction {
        if !self.ui.fullscreen() {
            return BackAction::Propagate;
        }
        self.screen.lock_portrait();
        self.screen.set_status_bar_hidden(false);
        self.ui.set_fullscreen(false);
        self.dimensions = self.screen.dimensions();
        info!("Back pressed in fullscreen, returning to portrait");
        BackAction::Consumed
    }

    // =========================================================================
    // Device listeners
    // =========================================================================

    pub fn on_connectivity_changed(&mut self, connected: bool) {
        match self.guard.on_change(connected) {
            GuardAction::Pause => {
                self.ui.hide_speed_menu();
                self.apply_paused(true);
            }
            GuardAction::Resume => {
                // A pending load decides on its own via autoplay
                if !self.awaiting_load {
                    self.apply_paused(false);
                }
            }
            GuardAction::None => {}
        }
    }

    pub fn on_dimensions_changed(&mut self, dimensions: Dimensions) {
        debug!(width = dimensions.width, height = dimensions.height, "Dimensions changed");
        self.dimensions = dimensions;
    }

    /// Tear down. Returns the collaborators to the host.
    pub fn unmount(self) -> (D, S) {
        info!(session_id = %self.id, "Unmounting player");
        (self.decoder, self.screen)
    }
}

impl<D: Decoder, S: DeviceScreen> std::fmt::Debug for VideoPlayer<D, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoPlayer")
            .field("id", &self.id)
            .field("source", &self.source.uri)
            .field("playback", &self.playback)
            .field("ui", &self.ui)
            .field("connectivity", &self.guard.state())
            .finish()
    }
}
