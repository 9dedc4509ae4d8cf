use crate::{
    hardware::DefaultParams,
    model::{CaptureInterface, Options, PlaybackInterface, Resampler},
};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::stream::StreamSettings;

/// asconfig application settings tree
///
/// These settings modify the base behaviour of the application and
/// user preferences.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Where the configuration is written, `~/.asoundrc` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Parameters tried first when negotiating with a card
    pub defaults: DefaultParams,
    /// Initial state of the option controls
    pub ui: UiDefaults,
    /// The stream pcm
    pub stream: StreamSettings,
}

impl AppSettings {
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output
            .clone()
            .or_else(|| BaseDirs::new().map(|dirs| dirs.home_dir().join(".asoundrc")))
    }
}

/// Option choices selected when the window opens
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiDefaults {
    pub resampler: Resampler,
    pub playback_interface: PlaybackInterface,
    pub capture_interface: CaptureInterface,
}

impl Default for UiDefaults {
    fn default() -> Self {
        Self {
            resampler: Resampler::SpeexrateMedium,
            playback_interface: PlaybackInterface::Plug,
            capture_interface: CaptureInterface::Plug,
        }
    }
}

impl UiDefaults {
    pub fn options(&self) -> Options {
        Options::new(
            self.resampler,
            self.playback_interface,
            self.capture_interface,
        )
    }
}
