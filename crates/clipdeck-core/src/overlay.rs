//! Overlay controls
//!
//! Visibility of the control overlay and the speed menu, fullscreen layout,
//! and the render plan a view layer draws from.

use crate::{
    config::PlayerConfig,
    playback::PlaybackState,
    theme::{ControlColors, CONTROL_BACKDROP, ICON_COLOR, SURFACE_BACKGROUND},
    types::Dimensions,
};
use serde::{Deserialize, Serialize};

/// Share of the screen height used by the inline (portrait) player
pub const INLINE_HEIGHT_RATIO: f64 = 0.3;

/// UI visibility holder.
///
/// The speed menu can only be open while the controls are visible; every
/// mutator keeps that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiVisibility {
    controls_visible: bool,
    speed_menu_visible: bool,
    fullscreen: bool,
    loading: bool,
}

impl Default for UiVisibility {
    fn default() -> Self {
        Self {
            controls_visible: true,
            speed_menu_visible: false,
            fullscreen: false,
            loading: false,
        }
    }
}

impl UiVisibility {
    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn speed_menu_visible(&self) -> bool {
        self.speed_menu_visible
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Overlay tap
    pub fn toggle_controls(&mut self) -> bool {
        self.set_controls_visible(!self.controls_visible);
        self.controls_visible
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
        if !visible {
            self.speed_menu_visible = false;
        }
    }

    /// Open or close the speed menu. Returns whether it is open afterwards.
    pub fn toggle_speed_menu(&mut self) -> bool {
        self.speed_menu_visible = !self.speed_menu_visible && self.controls_visible;
        self.speed_menu_visible
    }

    pub fn hide_speed_menu(&mut self) {
        self.speed_menu_visible = false;
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// Which overlay is drawn on top of the video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    /// Spinner in place of the center controls
    Loading,
    /// Offline banner; only the fullscreen toggle remains
    Offline,
    /// Regular controls
    Normal,
}

impl OverlayMode {
    /// Offline wins over loading: without network the spinner would never stop
    pub fn derive(ui: &UiVisibility, offline: bool) -> Self {
        if offline {
            OverlayMode::Offline
        } else if ui.loading() {
            OverlayMode::Loading
        } else {
            OverlayMode::Normal
        }
    }
}

impl std::fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayMode::Loading => write!(f, "loading"),
            OverlayMode::Offline => write!(f, "offline"),
            OverlayMode::Normal => write!(f, "normal"),
        }
    }
}

/// Height of the video surface
pub fn surface_height(dimensions: Dimensions, fullscreen: bool) -> f64 {
    if fullscreen {
        dimensions.height
    } else {
        dimensions.height * INLINE_HEIGHT_RATIO
    }
}

/// Format seconds as `MM:SS`
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a rate as shown on the speed button, e.g. `1.5x`
pub fn format_rate(rate: f64) -> String {
    format!("{}x", rate)
}

/// An icon button in the overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconButton {
    pub icon: &'static str,
    pub size: u32,
    pub color: &'static str,
    pub backdrop: &'static str,
}

impl IconButton {
    fn new(icon: &'static str, size: u32) -> Self {
        Self {
            icon,
            size,
            color: ICON_COLOR,
            backdrop: CONTROL_BACKDROP,
        }
    }
}

/// Loading spinner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spinner {
    pub color: String,
    pub size: u32,
}

/// One entry of the speed menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedOption {
    pub rate: f64,
    pub label: String,
    pub selected: bool,
}

/// Seek bar with its time labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeekBar {
    pub position: f64,
    pub duration: f64,
    /// Played fraction, 0.0 to 1.0
    pub progress: f64,
    pub elapsed_label: String,
    pub duration_label: String,
    pub track_min_color: String,
    pub track_max_color: String,
    pub thumb_color: String,
}

impl SeekBar {
    fn new(playback: &PlaybackState, colors: &ControlColors) -> Self {
        Self {
            position: playback.current_time,
            duration: playback.duration,
            progress: playback.progress(),
            elapsed_label: format_time(playback.current_time),
            duration_label: format_time(playback.duration),
            track_min_color: colors.seek_track_min.clone(),
            track_max_color: colors.seek_track_max.clone(),
            thumb_color: colors.seek_thumb.clone(),
        }
    }
}

/// Everything a view layer needs to draw the overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub mode: OverlayMode,
    pub surface_height: f64,
    pub surface_background: &'static str,
    pub fullscreen_toggle: Option<IconButton>,
    pub offline_banner: bool,
    pub spinner: Option<Spinner>,
    pub play_pause: Option<IconButton>,
    /// Rewind and fast-forward buttons
    pub skip_buttons: Option<(IconButton, IconButton)>,
    pub mute_button: Option<IconButton>,
    /// Label of the speed button
    pub speed_button: Option<String>,
    pub speed_menu: Vec<SpeedOption>,
    pub seek_bar: Option<SeekBar>,
}

/// Icon sizes, regular and large screens
struct IconScale {
    large: bool,
}

impl IconScale {
    fn pick(&self, regular: u32, large: u32) -> u32 {
        if self.large {
            large
        } else {
            regular
        }
    }
}

/// Derive the render plan from player state
pub fn render_plan(
    playback: &PlaybackState,
    ui: &UiVisibility,
    offline: bool,
    config: &PlayerConfig,
    dimensions: Dimensions,
) -> RenderPlan {
    let mode = OverlayMode::derive(ui, offline);
    let scale = IconScale {
        large: dimensions.is_large(),
    };

    let fullscreen_icon = if ui.fullscreen() {
        "fullscreen-exit"
    } else {
        "fullscreen"
    };

    let mut plan = RenderPlan {
        mode,
        surface_height: surface_height(dimensions, ui.fullscreen()),
        surface_background: SURFACE_BACKGROUND,
        fullscreen_toggle: None,
        offline_banner: false,
        spinner: None,
        play_pause: None,
        skip_buttons: None,
        mute_button: None,
        speed_button: None,
        speed_menu: Vec::new(),
        seek_bar: None,
    };

    if mode == OverlayMode::Offline {
        plan.offline_banner = true;
        plan.fullscreen_toggle = Some(IconButton::new(fullscreen_icon, scale.pick(30, 35)));
        return plan;
    }

    if mode == OverlayMode::Loading {
        plan.spinner = Some(Spinner {
            color: config.colors.loading.clone(),
            size: scale.pick(50, 80),
        });
    }

    if !ui.controls_visible() {
        return plan;
    }

    plan.fullscreen_toggle = Some(IconButton::new(fullscreen_icon, scale.pick(30, 35)));
    plan.seek_bar = Some(SeekBar::new(playback, &config.colors));

    if mode == OverlayMode::Normal {
        let icon = if playback.paused { "play" } else { "pause" };
        plan.play_pause = Some(IconButton::new(icon, scale.pick(50, 80)));
        plan.skip_buttons = Some((
            IconButton::new("rewind-10", scale.pick(20, 30)),
            IconButton::new("fast-forward-10", scale.pick(20, 30)),
        ));
    }

    if !config.hide_mute_button {
        let icon = if playback.muted { "volume-off" } else { "volume-high" };
        plan.mute_button = Some(IconButton::new(icon, scale.pick(25, 30)));
    }

    if !config.hide_playback_button {
        plan.speed_button = Some(format_rate(playback.playback_rate));
        if ui.speed_menu_visible() {
            plan.speed_menu = config
                .playback_rates
                .iter()
                .map(|&rate| SpeedOption {
                    rate,
                    label: format_rate(rate),
                    selected: (rate - playback.playback_rate).abs() < f64::EPSILON,
                })
                .collect();
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiding_controls_hides_speed_menu() {
        let mut ui = UiVisibility::default();
        assert!(ui.toggle_speed_menu());
        assert!(!ui.toggle_controls());
        assert!(!ui.speed_menu_visible());
    }

    #[test]
    fn test_speed_menu_needs_controls() {
        let mut ui = UiVisibility::default();
        ui.set_controls_visible(false);
        assert!(!ui.toggle_speed_menu());
        assert!(!ui.speed_menu_visible());
    }

    #[test]
    fn test_overlay_mode_priority() {
        let mut ui = UiVisibility::default();
        assert_eq!(OverlayMode::derive(&ui, false), OverlayMode::Normal);
        ui.set_loading(true);
        assert_eq!(OverlayMode::derive(&ui, false), OverlayMode::Loading);
        assert_eq!(OverlayMode::derive(&ui, true), OverlayMode::Offline);
    }

    #[test]
    fn test_surface_height() {
        let dims = Dimensions::new(400.0, 800.0);
        assert_eq!(surface_height(dims, true), 800.0);
        assert_eq!(surface_height(dims, false), 240.0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.9), "01:05");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(-4.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(1.0), "1x");
        assert_eq!(format_rate(1.25), "1.25x");
    }

    #[test]
    fn test_offline_plan_only_has_fullscreen() {
        let plan = render_plan(
            &PlaybackState::default(),
            &UiVisibility::default(),
            true,
            &PlayerConfig::default(),
            Dimensions::default(),
        );
        assert!(plan.offline_banner);
        assert!(plan.fullscreen_toggle.is_some());
        assert!(plan.play_pause.is_none());
        assert!(plan.seek_bar.is_none());
        assert!(plan.mute_button.is_none());
        assert!(plan.speed_button.is_none());
    }

    #[test]
    fn test_loading_plan_hides_center_controls() {
        let mut ui = UiVisibility::default();
        ui.set_loading(true);
        let plan = render_plan(
            &PlaybackState::default(),
            &ui,
            false,
            &PlayerConfig::default(),
            Dimensions::default(),
        );
        assert_eq!(plan.spinner.as_ref().map(|s| s.size), Some(50));
        assert!(plan.play_pause.is_none());
        assert!(plan.skip_buttons.is_none());
        assert!(plan.seek_bar.is_some());
    }

    #[test]
    fn test_normal_plan_on_large_screen() {
        let mut ui = UiVisibility::default();
        ui.toggle_speed_menu();
        let playback = PlaybackState {
            duration: 90.0,
            playback_rate: 1.5,
            ..Default::default()
        };
        let plan = render_plan(
            &playback,
            &ui,
            false,
            &PlayerConfig::default(),
            Dimensions::new(1280.0, 800.0),
        );

        assert_eq!(plan.play_pause, Some(IconButton::new("play", 80)));
        assert_eq!(plan.speed_button.as_deref(), Some("1.5x"));
        assert_eq!(plan.speed_menu.len(), 6);
        assert!(plan.speed_menu.iter().any(|o| o.selected && o.rate == 1.5));
        assert_eq!(plan.surface_background, SURFACE_BACKGROUND);
        let play = plan.play_pause.as_ref().unwrap();
        assert_eq!(play.color, ICON_COLOR);
        assert_eq!(play.backdrop, CONTROL_BACKDROP);
        assert_eq!(plan.seek_bar.unwrap().duration_label, "01:30");
    }

    #[test]
    fn test_seek_bar_progress() {
        let playback = PlaybackState {
            current_time: 30.0,
            duration: 120.0,
            ..Default::default()
        };
        let plan = render_plan(
            &playback,
            &UiVisibility::default(),
            false,
            &PlayerConfig::default(),
            Dimensions::default(),
        );
        let bar = plan.seek_bar.unwrap();
        assert_eq!(bar.progress, 0.25);
        assert_eq!(bar.elapsed_label, "00:30");
    }

    #[test]
    fn test_hidden_buttons() {
        let config = PlayerConfig {
            hide_mute_button: true,
            hide_playback_button: true,
            ..Default::default()
        };
        let plan = render_plan(
            &PlaybackState::default(),
            &UiVisibility::default(),
            false,
            &config,
            Dimensions::default(),
        );
        assert!(plan.mute_button.is_none());
        assert!(plan.speed_button.is_none());
        assert!(plan.play_pause.is_some());
    }
}
