use crate::hardware::{DeviceStatus, Stream};
use std::{fmt, io, path::PathBuf};

/// A recoverable failure while enumerating hardware
///
/// These never abort a scan: the card or device is skipped (or
/// marked unusable) and the error is logged.
#[derive(Debug)]
pub enum ScanError {
    /// The card control interface could not be opened or queried
    Card {
        stream: Stream,
        path: String,
        source: alsa::Error,
    },
    /// The PCM info for a device could not be read
    Device {
        stream: Stream,
        path: String,
        source: alsa::Error,
    },
    /// The PCM could not be opened for a reason other than being busy
    Open {
        stream: Stream,
        path: String,
        source: alsa::Error,
    },
    /// The hardware parameter space could not be read
    Params { stream: Stream, path: String },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card {
                stream,
                path,
                source,
            } => write!(f, "{}: Error opening card {}: {}", stream, path, source),
            Self::Device {
                stream,
                path,
                source,
            } => write!(f, "{}: Error opening device {}: {}", stream, path, source),
            Self::Open {
                stream,
                path,
                source,
            } => write!(f, "{}: Error opening pcm device {}: {}", stream, path, source),
            Self::Params { stream, path } => {
                write!(f, "{}: Error obtaining device {} parameters", stream, path)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Reasons a configuration file is not written
#[derive(Debug)]
pub enum SaveError {
    /// Nothing is selected in the playback list
    NoPlayback,
    /// The selected playback device is busy or failed to enumerate
    PlaybackUnavailable(DeviceStatus),
    /// Writing the output file failed
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPlayback => write!(
                f,
                "No selected playback device: please select a playback device \
                 from the list: not writing asoundrc!"
            ),
            Self::PlaybackUnavailable(DeviceStatus::Error) => write!(
                f,
                "The selected playback device could not be opened: \
                 not writing asoundrc!"
            ),
            Self::PlaybackUnavailable(_) => write!(
                f,
                "The selected playback device is currently in use (blocked): \
                 not writing asoundrc!"
            ),
            Self::Io { path, source } => write!(
                f,
                "Error opening {} for writing: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings i/o error: {}", e),
            Self::Parse(e) => write!(f, "invalid settings file: {}", e),
            Self::Serialize(e) => write!(f, "failed to serialise settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}
