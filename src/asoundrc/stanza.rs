//! Typed stanzas of the alsa-lib configuration language
//!
//! Each variant renders to the exact text written into the file,
//! including its leading comment.  Indentation is three spaces.

use std::fmt;

const DMIX_IPC_KEY: u32 = 16022021;
const DSNOOP_IPC_KEY: u32 = 17022021;

#[derive(Clone, Debug, PartialEq)]
pub enum Stanza {
    /// Comment lines, written verbatim with a `# ` prefix
    Note(&'static [&'static str]),
    /// A raw hardware device
    Hw {
        comment: &'static str,
        name: String,
        card: u32,
        device: u32,
    },
    /// Forced parameters merged into an existing pcm
    Override {
        name: String,
        format: String,
        channels: u32,
        rate: u32,
    },
    /// Format and rate conversion
    Plug { name: String, slave: String },
    /// Software mixing
    Dmix {
        name: String,
        slave: String,
        format: String,
        channels: u32,
        rate: u32,
    },
    /// Shared capture
    Dsnoop {
        name: String,
        slave: String,
        format: String,
        channels: u32,
        rate: u32,
    },
    /// Volume control in front of dmix for the stream pcm
    Softvol {
        name: String,
        slave: String,
        /// pcm applications must be pointed at
        stream: String,
    },
    /// Tee into a file or pipe
    File {
        name: String,
        format: String,
        slave: String,
        command: String,
    },
    RateConverter(String),
    /// Mixer controls of the selected card
    Ctl { card: u32 },
    /// `pcm.!default`, split with asym when there is a capture pcm
    Default {
        playback: String,
        capture: Option<String>,
    },
}

impl fmt::Display for Stanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note(lines) => {
                for l in lines.iter() {
                    writeln!(f, "# {}", l)?;
                }
                Ok(())
            }
            Self::Hw {
                comment,
                name,
                card,
                device,
            } => {
                writeln!(f, "# {}", comment)?;
                writeln!(f, "pcm.!{} {{", name)?;
                writeln!(f, "   type hw")?;
                writeln!(f, "   card {}", card)?;
                writeln!(f, "   device {}", device)?;
                writeln!(f, "}}")
            }
            Self::Override {
                name,
                format,
                channels,
                rate,
            } => {
                writeln!(f, "# Force parameters for playback on single rate cards")?;
                writeln!(f, "# Required for some cards, e.g bytcrrt5640")?;
                writeln!(f, "pcm.+{} {{", name)?;
                writeln!(f, "   format {}", format)?;
                writeln!(f, "   channels {}", channels)?;
                writeln!(f, "   rate {}", rate)?;
                writeln!(f, "}}")
            }
            Self::Plug { name, slave } => {
                writeln!(f, "# Convert formats (bit depth) and sample rates.")?;
                writeln!(f, "pcm.!{} {{", name)?;
                writeln!(f, "   type plug")?;
                writeln!(f, "   slave {{")?;
                writeln!(f, "      pcm {}", slave)?;
                writeln!(f, "   }}")?;
                writeln!(f, "}}")
            }
            Self::Dmix {
                name,
                slave,
                format,
                channels,
                rate,
            } => {
                writeln!(f, "# Mix streams from several sources.")?;
                writeln!(f, "pcm.!{} {{", name)?;
                writeln!(f, "   type dmix")?;
                writeln!(f, "   ipc_key {}", DMIX_IPC_KEY)?;
                writeln!(f, "   ipc_key_add_uid yes")?;
                writeln!(f, "   slave {{")?;
                writeln!(f, "      pcm {}", slave)?;
                writeln!(f, "      format {}", format)?;
                writeln!(f, "      channels {}", channels)?;
                writeln!(f, "      rate {}", rate)?;
                writeln!(f, "   }}")?;
                writeln!(f, "}}")
            }
            Self::Dsnoop {
                name,
                slave,
                format,
                channels,
                rate,
            } => {
                writeln!(f, "# Allow capture by multiple applications.")?;
                writeln!(f, "pcm.!{} {{", name)?;
                writeln!(f, "   type dsnoop")?;
                writeln!(f, "   ipc_key {}", DSNOOP_IPC_KEY)?;
                writeln!(f, "   ipc_key_add_uid yes")?;
                writeln!(f, "   slave {{")?;
                writeln!(f, "      pcm \"{}\"", slave)?;
                writeln!(f, "      period_size 1024")?;
                writeln!(f, "      buffer_size 4096")?;
                writeln!(f, "      format {}", format)?;
                writeln!(f, "      rate {}", rate)?;
                writeln!(f, "      channels {}", channels)?;
                writeln!(f, "      periods 0")?;
                writeln!(f, "      period_time 0")?;
                writeln!(f, "   }}")?;
                // TODO: derive bindings from the capture channel count
                writeln!(f, "   bindings {{")?;
                writeln!(f, "      0 0")?;
                writeln!(f, "      1 1")?;
                writeln!(f, "   }}")?;
                writeln!(f, "}}")
            }
            Self::Softvol {
                name,
                slave,
                stream,
            } => {
                writeln!(f, "# NOTE: dmix can only output to a hardware device.")?;
                writeln!(f, "# To use the stream pcm, the program whose output ")?;
                writeln!(f, "# is to be streamed must be told to use the {} pcm", stream)?;
                writeln!(f, "# e.g.")?;
                writeln!(f, "#    mplayer -ao alsa:device={}", stream)?;
                writeln!(f, "#    chromium --alsa-output-device='{}'", stream)?;
                writeln!(f, "#    AUDIODEV={} ffplay", stream)?;
                writeln!(f, "# Local volume control for stream input to dmix.")?;
                writeln!(f, "pcm.!{} {{", name)?;
                writeln!(f, "   type softvol")?;
                writeln!(f, "   slave {{")?;
                writeln!(f, "      pcm {}", slave)?;
                writeln!(f, "   }}")?;
                writeln!(f, "   control {{")?;
                writeln!(f, "      name Stream")?;
                writeln!(f, "      card 0")?;
                writeln!(f, "   }}")?;
                writeln!(f, "}}")
            }
            Self::File {
                name,
                format,
                slave,
                command,
            } => {
                writeln!(f, "# Stream output.")?;
                writeln!(f, "pcm.!{} {{", name)?;
                writeln!(f, "   type file")?;
                writeln!(f, "   format \"{}\"", format)?;
                writeln!(f, "   slave {{")?;
                writeln!(f, "      pcm {}", slave)?;
                writeln!(f, "   }}")?;
                writeln!(f, "   file \"{}\"", command)?;
                writeln!(f, "}}")
            }
            Self::RateConverter(resampler) => {
                writeln!(f, "# Default rate converter for plug and dmix")?;
                writeln!(f, "# Make sure package alsa-plugins is installed to use")?;
                writeln!(f, "# higher quality speexrate_medium resampling.")?;
                writeln!(f, "defaults.pcm.rate_converter \"{}\"", resampler)
            }
            Self::Ctl { card } => {
                writeln!(f, "# Selected card mixer controls")?;
                writeln!(f, "ctl.!default {{")?;
                writeln!(f, "   type hw")?;
                writeln!(f, "   card {}", card)?;
                writeln!(f, "}}")
            }
            Self::Default {
                playback,
                capture: None,
            } => writeln!(f, "pcm.!default pcm.{}", playback),
            Self::Default {
                playback,
                capture: Some(capture),
            } => {
                writeln!(f, "pcm.!default {{")?;
                writeln!(f, "   type asym")?;
                writeln!(f, "   playback.pcm \"{}\"", playback)?;
                writeln!(f, "   capture.pcm \"{}\"", capture)?;
                writeln!(f, "}}")
            }
        }
    }
}
