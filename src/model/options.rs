use serde::{Deserialize, Serialize};

/// Rate converters offered for `defaults.pcm.rate_converter`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resampler {
    Speexrate,
    SpeexrateMedium,
    SpeexrateBest,
}

impl Resampler {
    pub const ALL: [Resampler; 3] = [
        Resampler::Speexrate,
        Resampler::SpeexrateMedium,
        Resampler::SpeexrateBest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Speexrate => "speexrate",
            Self::SpeexrateMedium => "speexrate_medium",
            Self::SpeexrateBest => "speexrate_best",
        }
    }
}

/// How applications reach the playback device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackInterface {
    /// Direct hardware access
    Hw,
    /// Format and rate conversion
    Plug,
    /// Software mixing of several applications
    Dmix,
}

impl PlaybackInterface {
    pub const ALL: [PlaybackInterface; 3] = [
        PlaybackInterface::Hw,
        PlaybackInterface::Plug,
        PlaybackInterface::Dmix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hw => "hw",
            Self::Plug => "plug",
            Self::Dmix => "dmix",
        }
    }
}

/// How applications reach the capture device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureInterface {
    Hw,
    Plug,
    /// Shared capture by several applications
    Dsnoop,
}

impl CaptureInterface {
    pub const ALL: [CaptureInterface; 3] = [
        CaptureInterface::Hw,
        CaptureInterface::Plug,
        CaptureInterface::Dsnoop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hw => "hw",
            Self::Plug => "plug",
            Self::Dsnoop => "dsnoop",
        }
    }
}

/// User choices read when the configuration is saved
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub resampler: Resampler,
    pub playback: PlaybackInterface,
    pub capture: CaptureInterface,
    /// Add a `stream` pcm piping into the stream command
    pub stream: bool,
    /// Make the `stream` pcm the default playback device
    stream_default: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::new(
            Resampler::SpeexrateMedium,
            PlaybackInterface::Plug,
            CaptureInterface::Plug,
        )
    }
}

impl Options {
    pub fn new(resampler: Resampler, playback: PlaybackInterface, capture: CaptureInterface) -> Self {
        Self {
            resampler,
            playback,
            capture,
            stream: false,
            stream_default: false,
        }
    }

    /// The stream can only become the default for hw and plug output,
    /// dmix always writes straight to the hardware.
    pub fn stream_default_available(&self) -> bool {
        self.stream && self.playback != PlaybackInterface::Dmix
    }

    pub fn stream_default(&self) -> bool {
        self.stream_default
    }

    pub fn set_stream_default(&mut self, on: bool) {
        self.stream_default = on && self.stream_default_available();
    }

    pub fn set_stream(&mut self, on: bool) {
        self.stream = on;
        self.enforce();
    }

    pub fn set_playback(&mut self, playback: PlaybackInterface) {
        self.playback = playback;
        self.enforce();
    }

    fn enforce(&mut self) {
        if !self.stream_default_available() {
            self.stream_default = false;
        }
    }
}
