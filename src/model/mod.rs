//! asconfig's Model and Event to drive the application's MVC pattern

use std::cell::RefCell;
use std::rc::Rc;

mod event;
mod options;

pub use event::Event;
pub use options::*;

use crate::hardware::PcmDevice;
use tracing::debug;

/// Shared handle to the model, cloned into every UI callback
pub type Model = Rc<RefCell<ModelInner>>;

/// Central Model of the MVC layout of the application,
/// you should only ever make one of these and pass
/// references around to it.
#[derive(Debug)]
pub struct ModelInner {
    playback: Vec<PcmDevice>,
    capture: Vec<PcmDevice>,
    options: Options,
}

impl ModelInner {
    /// Returns a new model with empty device lists
    pub fn new(options: Options) -> Model {
        Rc::new(RefCell::new(ModelInner {
            playback: Vec::new(),
            capture: Vec::new(),
            options,
        }))
    }

    pub fn update(&mut self, evt: Event) {
        match evt {
            Event::Refresh { playback, capture } => {
                debug!(
                    "refreshed {} playback and {} capture devices",
                    playback.len(),
                    capture.len()
                );
                self.playback = playback;
                self.capture = capture;
            }
            Event::SetResampler(r) => self.options.resampler = r,
            Event::SetPlaybackInterface(p) => self.options.set_playback(p),
            Event::SetCaptureInterface(c) => self.options.capture = c,
            Event::SetStream(on) => self.options.set_stream(on),
            Event::SetStreamDefault(on) => self.options.set_stream_default(on),
        }
    }

    pub fn playback(&self) -> &[PcmDevice] {
        &self.playback
    }

    pub fn capture(&self) -> &[PcmDevice] {
        &self.capture
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}
