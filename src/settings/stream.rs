use serde::{Deserialize, Serialize};

/// `%b`, `%c` and `%r` are expanded by the alsa file plugin to bit
/// width, channels and rate.
pub const DEFAULT_STREAM_COMMAND: &str = "| lame -r --bitwidth %b -s %r -m j -q6 --cbr -b 192 - - \
| /usr/local/bin/ezstream -c /path/to/config";

/// Settings for the `stream` pcm written through the file plugin
///
/// With `wav` input an ffmpeg pipe works too, e.g.
/// `| ffmpeg -hide_banner -nostats -re -i - -c:a flac -f ogg icecast://...`.
/// Drop `-re` when the stream is the default device or the pipe blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    pub input_format: StreamFormat,
    /// File name, or a pipe into the encoder when prefixed with `|`
    pub command: String,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            input_format: StreamFormat::Raw,
            command: DEFAULT_STREAM_COMMAND.to_owned(),
        }
    }
}

/// Output format of the alsa file plugin
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamFormat {
    Raw,
    Wav,
}

impl StreamFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Wav => "wav",
        }
    }
}
