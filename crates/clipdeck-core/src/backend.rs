//! Collaborator traits
//!
//! The decoder and the device screen are external libraries. The player
//! only issues commands to them; their callbacks come back as
//! [`PlayerEvent`](crate::event::PlayerEvent)s.

use crate::types::{Dimensions, MediaSource, Orientation};

/// Video decoding/playback library
pub trait Decoder: Send {
    /// Start loading a source, replacing the current one
    fn load(&mut self, source: &MediaSource);

    fn play(&mut self);

    fn pause(&mut self);

    /// Jump to a position in seconds
    fn seek(&mut self, position: f64);

    fn set_rate(&mut self, rate: f64);

    fn set_muted(&mut self, muted: bool);
}

/// Orientation lock and window chrome
pub trait DeviceScreen: Send {
    fn lock_portrait(&mut self);

    fn lock_landscape(&mut self);

    fn current_orientation(&self) -> Orientation;

    /// Current window size
    fn dimensions(&self) -> Dimensions;

    /// Hide or show the system status bar
    fn set_status_bar_hidden(&mut self, _hidden: bool) {}
}

impl<T: Decoder + ?Sized> Decoder for Box<T> {
    fn load(&mut self, source: &MediaSource) {
        (**self).load(source)
    }

    fn play(&mut self) {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn seek(&mut self, position: f64) {
        (**self).seek(position)
    }

    fn set_rate(&mut self, rate: f64) {
        (**self).set_rate(rate)
    }

    fn set_muted(&mut self, muted: bool) {
        (**self).set_muted(muted)
    }
}

impl<T: DeviceScreen + ?Sized> DeviceScreen for Box<T> {
    fn lock_portrait(&mut self) {
        (**self).lock_portrait()
    }

    fn lock_landscape(&mut self) {
        (**self).lock_landscape()
    }

    fn current_orientation(&self) -> Orientation {
        (**self).current_orientation()
    }

    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }

    fn set_status_bar_hidden(&mut self, hidden: bool) {
        (**self).set_status_bar_hidden(hidden)
    }
}
