//! Host notification handlers
//!
//! Every handler defaults to a no-op, so hosts only register what they use.

use crate::error::DecoderError;

type Handler<T> = Box<dyn FnMut(T) + Send>;
type Notify = Box<dyn FnMut() + Send>;

/// Handler table
pub struct PlayerCallbacks {
    on_error: Handler<DecoderError>,
    on_progress_time: Handler<f64>,
    on_duration_known: Handler<f64>,
    on_ended: Notify,
    on_paused: Notify,
    on_playing: Notify,
}

impl Default for PlayerCallbacks {
    fn default() -> Self {
        Self {
            on_error: Box::new(|_| {}),
            on_progress_time: Box::new(|_| {}),
            on_duration_known: Box::new(|_| {}),
            on_ended: Box::new(|| {}),
            on_paused: Box::new(|| {}),
            on_playing: Box::new(|| {}),
        }
    }
}

impl std::fmt::Debug for PlayerCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerCallbacks").finish_non_exhaustive()
    }
}

impl PlayerCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder or network failure
    pub fn on_error(mut self, f: impl FnMut(DecoderError) + Send + 'static) -> Self {
        self.on_error = Box::new(f);
        self
    }

    /// Playback position update, in seconds
    pub fn on_progress_time(mut self, f: impl FnMut(f64) + Send + 'static) -> Self {
        self.on_progress_time = Box::new(f);
        self
    }

    /// Duration reported by a finished load, in seconds
    pub fn on_duration_known(mut self, f: impl FnMut(f64) + Send + 'static) -> Self {
        self.on_duration_known = Box::new(f);
        self
    }

    pub fn on_ended(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_ended = Box::new(f);
        self
    }

    pub fn on_paused(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_paused = Box::new(f);
        self
    }

    pub fn on_playing(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_playing = Box::new(f);
        self
    }

    pub(crate) fn error(&mut self, error: DecoderError) {
        (self.on_error)(error)
    }

    pub(crate) fn progress_time(&mut self, seconds: f64) {
        (self.on_progress_time)(seconds)
    }

    pub(crate) fn duration_known(&mut self, seconds: f64) {
        (self.on_duration_known)(seconds)
    }

    pub(crate) fn ended(&mut self) {
        (self.on_ended)()
    }

    pub(crate) fn paused(&mut self) {
        (self.on_paused)()
    }

    pub(crate) fn playing(&mut self) {
        (self.on_playing)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    #[test]
    fn test_defaults_are_noops() {
        let mut callbacks = PlayerCallbacks::default();
        callbacks.error(DecoderError::new("ignored"));
        callbacks.progress_time(1.0);
        callbacks.ended();
    }

    #[test]
    fn test_registered_handler_fires() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let mut callbacks = PlayerCallbacks::new().on_ended(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        callbacks.ended();
        callbacks.paused();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
