//! Event types used for controlling the Model.

use super::{CaptureInterface, PlaybackInterface, Resampler};
use crate::hardware::PcmDevice;

/// Event type represents methods that can be called on the model.
#[derive(Debug)]
pub enum Event {
    /// Replace both device lists with a fresh scan
    Refresh {
        playback: Vec<PcmDevice>,
        capture: Vec<PcmDevice>,
    },
    SetResampler(Resampler),
    SetPlaybackInterface(PlaybackInterface),
    SetCaptureInterface(CaptureInterface),
    /// Called when the user toggles the stream pcm
    SetStream(bool),
    /// Called when the user toggles whether the stream is the default
    SetStreamDefault(bool),
}
