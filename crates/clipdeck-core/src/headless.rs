//! Headless collaborators
//!
//! Decoder and screen implementations that record the commands they receive
//! instead of driving real hardware. Used for simulation and tests.

use crate::{
    backend::{DeviceScreen, Decoder},
    types::{Dimensions, MediaSource, Orientation},
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Command received by a [`HeadlessDecoder`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum DecoderCommand {
    Load { source: MediaSource },
    Play,
    Pause,
    Seek { position: f64 },
    SetRate { rate: f64 },
    SetMuted { muted: bool },
}

/// Shared, clonable command log
#[derive(Debug, Clone)]
pub struct CommandLog<T> {
    entries: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for CommandLog<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone> CommandLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: T) {
        // A poisoned log only means a test panicked mid-push; keep recording
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(entry);
    }

    /// Copy of everything recorded so far
    pub fn entries(&self) -> Vec<T> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn last(&self) -> Option<T> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

/// Decoder that records commands
#[derive(Debug, Clone, Default)]
pub struct HeadlessDecoder {
    log: CommandLog<DecoderCommand>,
}

impl HeadlessDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the command log; stays valid after the decoder is moved
    pub fn log(&self) -> CommandLog<DecoderCommand> {
        self.log.clone()
    }

    fn record(&self, command: DecoderCommand) {
        debug!(?command, "Decoder command");
        self.log.push(command);
    }
}

impl Decoder for HeadlessDecoder {
    fn load(&mut self, source: &MediaSource) {
        self.record(DecoderCommand::Load {
            source: source.clone(),
        });
    }

    fn play(&mut self) {
        self.record(DecoderCommand::Play);
    }

    fn pause(&mut self) {
        self.record(DecoderCommand::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.record(DecoderCommand::Seek { position });
    }

    fn set_rate(&mut self, rate: f64) {
        self.record(DecoderCommand::SetRate { rate });
    }

    fn set_muted(&mut self, muted: bool) {
        self.record(DecoderCommand::SetMuted { muted });
    }
}

/// Command received by a [`HeadlessScreen`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ScreenCommand {
    LockPortrait,
    LockLandscape,
    StatusBarHidden { hidden: bool },
}

/// Screen that records orientation and status-bar commands
#[derive(Debug, Clone)]
pub struct HeadlessScreen {
    orientation: Orientation,
    dimensions: Dimensions,
    log: CommandLog<ScreenCommand>,
}

impl Default for HeadlessScreen {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}

impl HeadlessScreen {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            orientation: Orientation::Portrait,
            dimensions,
            log: CommandLog::new(),
        }
    }

    pub fn log(&self) -> CommandLog<ScreenCommand> {
        self.log.clone()
    }
}

impl DeviceScreen for HeadlessScreen {
    fn lock_portrait(&mut self) {
        self.orientation = Orientation::Portrait;
        self.log.push(ScreenCommand::LockPortrait);
    }

    fn lock_landscape(&mut self) {
        self.orientation = Orientation::LandscapeLeft;
        self.log.push(ScreenCommand::LockLandscape);
    }

    fn current_orientation(&self) -> Orientation {
        self.orientation
    }

    fn dimensions(&self) -> Dimensions {
        // Locking rotates the window
        match self.orientation {
            Orientation::Portrait => self.dimensions,
            _ => Dimensions::new(self.dimensions.height, self.dimensions.width),
        }
    }

    fn set_status_bar_hidden(&mut self, hidden: bool) {
        self.log.push(ScreenCommand::StatusBarHidden { hidden });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_log_survives_move() {
        let decoder = HeadlessDecoder::new();
        let log = decoder.log();
        let mut boxed: Box<dyn Decoder> = Box::new(decoder);

        boxed.play();
        boxed.seek(12.0);

        assert_eq!(
            log.entries(),
            vec![DecoderCommand::Play, DecoderCommand::Seek { position: 12.0 }]
        );
        assert_eq!(log.drain().len(), 2);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_screen_rotates_on_lock() {
        let mut screen = HeadlessScreen::new(Dimensions::new(400.0, 800.0));
        screen.lock_landscape();
        assert!(screen.current_orientation().is_landscape());
        assert_eq!(screen.dimensions(), Dimensions::new(800.0, 400.0));
        screen.lock_portrait();
        assert_eq!(screen.dimensions(), Dimensions::new(400.0, 800.0));
        assert_eq!(
            screen.log().entries(),
            vec![ScreenCommand::LockLandscape, ScreenCommand::LockPortrait]
        );
    }
}
