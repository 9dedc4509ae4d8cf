//! Build a configuration document from the user's selection

use super::stanza::Stanza;
use crate::{
    hardware::{DefaultParams, PcmDevice},
    model::{CaptureInterface, Options, PlaybackInterface},
    settings::StreamSettings,
};
use std::fmt;

const HEADER: &str = "# User asoundrc file written by asconfig";

const PLAYBACK: &str = "playback";
const CAPTURE: &str = "capture";
const MATCH: &str = "match";
const MATCH_CAPTURE: &str = "matchCapture";
const SNOOP_CAPTURE: &str = "snoopCapture";
const MIX: &str = "mix";
const STREAM: &str = "stream";
const STREAM_VOL: &str = "streamvol";
const NULL: &str = "null";

const HW_PLAYBACK_NOTE: &[&str] = &[
    "Direct hardware access selected - no software conversions.",
    "Only one application can use the playback device at a time.",
    "Playback sample rates / formats / channels *MUST* match",
    "the cards native ranges, otherwise playback will fail.",
];
const PLUG_PLAYBACK_NOTE: &[&str] = &[
    "Access hardware via plug: The playback format (bit depth)",
    "may be changed and / or resampling may take place in order",
    "to match the hardware requirements. Only one application ",
    "can use the playback device at a time.",
];
const DMIX_NOTE: &[&str] = &[
    "Allow playback from multiple applications at once. Input",
    "streams may be converted to a common format (bit depth)",
    "and sample rate using plug (dmix doesn't do conversions).",
];
const HW_CAPTURE_NOTE: &[&str] = &[
    "Direct hardware access selected - no software conversions.",
    "Only one application can use the capture device at a time.",
    "Capture sample rates / formats / channels *MUST* match",
    "the cards native ranges, otherwise capturing will fail.",
];
const PLUG_CAPTURE_NOTE: &[&str] = &[
    "Access hardware via plug: The capture format (bit depth)",
    "may be changed and / or resampling may take place in order",
    "to match the hardware requirements. Only one application ",
    "can use the capture device at a time.",
];
const DSNOOP_NOTE: &[&str] = &[
    "Allow multiple applications to capture at once. Output",
    "streams may be converted to a common format (bit depth)",
    "and sample rate using plug (dsnoop doesn't do conversions).",
];

/// A selected device reduced to what the configuration needs
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    pub card: u32,
    pub device: u32,
    pub rate: u32,
    pub format: String,
    pub channels: u32,
    pub single_rate: bool,
}

impl Endpoint {
    /// Take the negotiated parameters of a device, filling gaps from
    /// the configured defaults
    pub fn from_device(dev: &PcmDevice, fallback: &DefaultParams) -> Self {
        let negotiated = dev.caps.as_ref().map(|c| &c.defaults);

        let rate = negotiated
            .map(|n| n.rate)
            .filter(|r| *r != 0)
            .unwrap_or(fallback.rate);
        let format = negotiated
            .map(|n| n.format.clone())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| fallback.format.clone());
        let channels = negotiated
            .map(|n| n.channels)
            .filter(|c| *c != 0)
            .unwrap_or(fallback.channels);

        Self {
            card: dev.card,
            device: dev.device,
            rate,
            format,
            channels,
            single_rate: dev.is_single_rate(),
        }
    }
}

/// An ordered list of stanzas
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    stanzas: Vec<Stanza>,
}

impl Document {
    fn push(&mut self, s: Stanza) {
        self.stanzas.push(s);
    }

    #[cfg(test)]
    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        for s in self.stanzas.iter() {
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}

/// Lay out the pcm topology for the selected devices and options
pub fn compose(
    playback: &Endpoint,
    capture: Option<&Endpoint>,
    options: &Options,
    stream: &StreamSettings,
) -> Document {
    let mut doc = Document::default();

    let default_capture = capture.map(|cap| compose_capture(&mut doc, cap, options.capture));

    doc.push(Stanza::Hw {
        comment: "Selected playback device",
        name: PLAYBACK.into(),
        card: playback.card,
        device: playback.device,
    });

    if playback.single_rate {
        doc.push(Stanza::Override {
            name: PLAYBACK.into(),
            format: playback.format.clone(),
            channels: playback.channels,
            rate: playback.rate,
        });
    }

    doc.push(Stanza::RateConverter(options.resampler.name().into()));
    doc.push(Stanza::Ctl {
        card: playback.card,
    });

    let file = |slave: &str| Stanza::File {
        name: STREAM.into(),
        format: stream.input_format.name().into(),
        slave: slave.into(),
        command: stream.command.clone(),
    };

    let default_playback = match options.playback {
        PlaybackInterface::Hw | PlaybackInterface::Plug => {
            doc.push(Stanza::Note(match options.playback {
                PlaybackInterface::Hw => HW_PLAYBACK_NOTE,
                _ => PLUG_PLAYBACK_NOTE,
            }));

            let mut target = PLAYBACK;
            if options.stream {
                let slave = if options.stream_default() {
                    target = STREAM;
                    PLAYBACK
                } else {
                    NULL
                };
                doc.push(file(slave));
            }

            if options.playback == PlaybackInterface::Plug {
                doc.push(Stanza::Plug {
                    name: MATCH.into(),
                    slave: target.into(),
                });
                MATCH
            } else {
                target
            }
        }
        PlaybackInterface::Dmix => {
            doc.push(Stanza::Note(DMIX_NOTE));
            if options.stream {
                doc.push(Stanza::Softvol {
                    name: STREAM_VOL.into(),
                    slave: MIX.into(),
                    stream: STREAM.into(),
                });
                doc.push(file(STREAM_VOL));
            }
            doc.push(Stanza::Plug {
                name: MATCH.into(),
                slave: MIX.into(),
            });
            doc.push(Stanza::Dmix {
                name: MIX.into(),
                slave: PLAYBACK.into(),
                format: playback.format.clone(),
                channels: playback.channels,
                rate: playback.rate,
            });
            MATCH
        }
    };

    doc.push(Stanza::Default {
        playback: default_playback.into(),
        capture: default_capture.map(Into::into),
    });

    doc
}

/// Capture stanzas come first; returns the pcm the default points at
fn compose_capture(doc: &mut Document, cap: &Endpoint, iface: CaptureInterface) -> &'static str {
    doc.push(Stanza::Hw {
        comment: "Selected capture device",
        name: CAPTURE.into(),
        card: cap.card,
        device: cap.device,
    });

    match iface {
        CaptureInterface::Hw => {
            doc.push(Stanza::Note(HW_CAPTURE_NOTE));
            CAPTURE
        }
        CaptureInterface::Plug => {
            doc.push(Stanza::Note(PLUG_CAPTURE_NOTE));
            doc.push(Stanza::Plug {
                name: MATCH_CAPTURE.into(),
                slave: CAPTURE.into(),
            });
            MATCH_CAPTURE
        }
        CaptureInterface::Dsnoop => {
            doc.push(Stanza::Note(DSNOOP_NOTE));
            doc.push(Stanza::Plug {
                name: MATCH_CAPTURE.into(),
                slave: SNOOP_CAPTURE.into(),
            });
            doc.push(Stanza::Dsnoop {
                name: SNOOP_CAPTURE.into(),
                slave: CAPTURE.into(),
                format: cap.format.clone(),
                channels: cap.channels,
                rate: cap.rate,
            });
            MATCH_CAPTURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{tests::ready_device, Capabilities, DeviceStatus, Negotiated};
    use crate::model::Resampler;

    fn endpoint(card: u32, single_rate: bool) -> Endpoint {
        Endpoint {
            card,
            device: 0,
            rate: 48000,
            format: "S16_LE".into(),
            channels: 2,
            single_rate,
        }
    }

    fn options(playback: PlaybackInterface, capture: CaptureInterface) -> Options {
        Options::new(Resampler::SpeexrateMedium, playback, capture)
    }

    fn stream_settings() -> StreamSettings {
        StreamSettings {
            command: "| enc".into(),
            ..Default::default()
        }
    }

    fn render(playback: &Endpoint, capture: Option<&Endpoint>, o: &Options) -> String {
        compose(playback, capture, o, &stream_settings()).to_string()
    }

    #[test]
    fn plug_playback_without_capture() {
        let text = render(
            &endpoint(1, false),
            None,
            &options(PlaybackInterface::Plug, CaptureInterface::Plug),
        );
        let expected = "\
# User asoundrc file written by asconfig
# Selected playback device
pcm.!playback {
   type hw
   card 1
   device 0
}
# Default rate converter for plug and dmix
# Make sure package alsa-plugins is installed to use
# higher quality speexrate_medium resampling.
defaults.pcm.rate_converter \"speexrate_medium\"
# Selected card mixer controls
ctl.!default {
   type hw
   card 1
}
# Access hardware via plug: The playback format (bit depth)
# may be changed and / or resampling may take place in order
# to match the hardware requirements. Only one application\x20
# can use the playback device at a time.
# Convert formats (bit depth) and sample rates.
pcm.!match {
   type plug
   slave {
      pcm playback
   }
}
pcm.!default pcm.match
";
        assert_eq!(text, expected);
    }

    #[test]
    fn hw_playback_defaults_to_hardware() {
        let text = render(
            &endpoint(0, false),
            None,
            &options(PlaybackInterface::Hw, CaptureInterface::Plug),
        );
        assert!(text.contains("# Direct hardware access selected - no software conversions.\n"));
        assert!(!text.contains("type plug"));
        assert!(text.ends_with("pcm.!default pcm.playback\n"));
    }

    #[test]
    fn single_rate_card_gets_override_after_hw() {
        let text = render(
            &endpoint(0, true),
            None,
            &options(PlaybackInterface::Hw, CaptureInterface::Plug),
        );
        let hw = text.find("pcm.!playback {").unwrap();
        let ov = text.find("pcm.+playback {").unwrap();
        let rc = text.find("defaults.pcm.rate_converter").unwrap();
        assert!(hw < ov && ov < rc);
        assert!(text.contains("pcm.+playback {\n   format S16_LE\n   channels 2\n   rate 48000\n}\n"));
    }

    #[test]
    fn multi_rate_card_has_no_override() {
        let text = render(
            &endpoint(0, false),
            None,
            &options(PlaybackInterface::Plug, CaptureInterface::Plug),
        );
        assert!(!text.contains("pcm.+playback"));
    }

    #[test]
    fn dmix_topology() {
        let text = render(
            &endpoint(2, false),
            None,
            &options(PlaybackInterface::Dmix, CaptureInterface::Plug),
        );
        assert!(text.contains("pcm.!match {\n   type plug\n   slave {\n      pcm mix\n   }\n}\n"));
        assert!(text.contains("pcm.!mix {\n   type dmix\n"));
        assert!(text.contains("      pcm playback\n      format S16_LE\n      channels 2\n      rate 48000\n"));
        assert!(!text.contains("streamvol"));
        assert!(text.ends_with("pcm.!default pcm.match\n"));
    }

    #[test]
    fn dmix_with_stream_goes_through_softvol() {
        let mut o = options(PlaybackInterface::Dmix, CaptureInterface::Plug);
        o.set_stream(true);
        let doc = compose(&endpoint(0, false), None, &o, &stream_settings());
        let kinds: Vec<&str> = doc
            .stanzas()
            .iter()
            .map(|s| match s {
                Stanza::Note(_) => "note",
                Stanza::Hw { .. } => "hw",
                Stanza::Override { .. } => "override",
                Stanza::Plug { .. } => "plug",
                Stanza::Dmix { .. } => "dmix",
                Stanza::Dsnoop { .. } => "dsnoop",
                Stanza::Softvol { .. } => "softvol",
                Stanza::File { .. } => "file",
                Stanza::RateConverter(_) => "rate",
                Stanza::Ctl { .. } => "ctl",
                Stanza::Default { .. } => "default",
            })
            .collect();
        assert_eq!(
            kinds,
            ["hw", "rate", "ctl", "note", "softvol", "file", "plug", "dmix", "default"]
        );

        let text = doc.to_string();
        assert!(text.contains("pcm.!stream {\n   type file\n   format \"raw\"\n   slave {\n      pcm streamvol\n   }\n   file \"| enc\"\n}\n"));
    }

    #[test]
    fn hw_stream_not_default_writes_to_null() {
        let mut o = options(PlaybackInterface::Hw, CaptureInterface::Plug);
        o.set_stream(true);
        let text = render(&endpoint(0, false), None, &o);
        assert!(text.contains("      pcm null\n"));
        assert!(text.ends_with("pcm.!default pcm.playback\n"));
    }

    #[test]
    fn hw_stream_default_replaces_playback() {
        let mut o = options(PlaybackInterface::Hw, CaptureInterface::Plug);
        o.set_stream(true);
        o.set_stream_default(true);
        let text = render(&endpoint(0, false), None, &o);
        assert!(text.contains("pcm.!stream {\n   type file\n   format \"raw\"\n   slave {\n      pcm playback\n"));
        assert!(text.ends_with("pcm.!default pcm.stream\n"));
    }

    #[test]
    fn plug_stream_default_plugs_into_stream() {
        let mut o = options(PlaybackInterface::Plug, CaptureInterface::Plug);
        o.set_stream(true);
        o.set_stream_default(true);
        let text = render(&endpoint(0, false), None, &o);
        let file = text.find("pcm.!stream {").unwrap();
        let plug = text.find("pcm.!match {").unwrap();
        assert!(file < plug);
        assert!(text.contains("pcm.!match {\n   type plug\n   slave {\n      pcm stream\n"));
        assert!(text.ends_with("pcm.!default pcm.match\n"));
    }

    #[test]
    fn wav_stream_format() {
        let mut o = options(PlaybackInterface::Plug, CaptureInterface::Plug);
        o.set_stream(true);
        let stream = StreamSettings {
            input_format: crate::settings::StreamFormat::Wav,
            command: "out.wav".into(),
        };
        let text = compose(&endpoint(0, false), None, &o, &stream).to_string();
        assert!(text.contains("   format \"wav\"\n"));
        assert!(text.contains("   file \"out.wav\"\n"));
    }

    #[test]
    fn hw_capture_uses_asym_on_capture() {
        let text = render(
            &endpoint(0, false),
            Some(&endpoint(1, false)),
            &options(PlaybackInterface::Plug, CaptureInterface::Hw),
        );
        assert!(text.starts_with(
            "# User asoundrc file written by asconfig\n# Selected capture device\npcm.!capture {\n   type hw\n   card 1\n   device 0\n}\n"
        ));
        assert!(text.contains("# Capture sample rates / formats / channels *MUST* match\n"));
        assert!(text.ends_with(
            "pcm.!default {\n   type asym\n   playback.pcm \"match\"\n   capture.pcm \"capture\"\n}\n"
        ));
    }

    #[test]
    fn plug_capture() {
        let text = render(
            &endpoint(0, false),
            Some(&endpoint(0, false)),
            &options(PlaybackInterface::Hw, CaptureInterface::Plug),
        );
        assert!(text.contains("pcm.!matchCapture {\n   type plug\n   slave {\n      pcm capture\n"));
        assert!(text.ends_with("   playback.pcm \"playback\"\n   capture.pcm \"matchCapture\"\n}\n"));
    }

    #[test]
    fn dsnoop_capture_precedes_playback() {
        let mut cap = endpoint(1, false);
        cap.rate = 44100;
        cap.channels = 1;
        let text = render(
            &endpoint(0, false),
            Some(&cap),
            &options(PlaybackInterface::Dmix, CaptureInterface::Dsnoop),
        );
        let snoop = text.find("pcm.!snoopCapture {").unwrap();
        let playback = text.find("pcm.!playback {").unwrap();
        assert!(snoop < playback);
        assert!(text.contains("pcm.!matchCapture {\n   type plug\n   slave {\n      pcm snoopCapture\n"));
        assert!(text.contains("      rate 44100\n      channels 1\n"));
        assert!(text.ends_with("capture.pcm \"matchCapture\"\n}\n"));
    }

    #[test]
    fn endpoint_fills_missing_parameters() {
        let defaults = DefaultParams::default();
        let caps = Capabilities {
            min_channels: 0,
            max_channels: 0,
            min_rate: 0,
            max_rate: 0,
            formats: vec![],
            defaults: Negotiated {
                rate: 0,
                format: String::new(),
                channels: 0,
            },
        };
        let e = Endpoint::from_device(&ready_device(3, 1, caps), &defaults);
        assert_eq!(e.card, 3);
        assert_eq!(e.device, 1);
        assert_eq!(e.rate, 48000);
        assert_eq!(e.format, "S16_LE");
        assert_eq!(e.channels, 2);
        assert!(!e.single_rate);

        let mut busy = ready_device(0, 0, Capabilities {
            min_channels: 1,
            max_channels: 2,
            min_rate: 8000,
            max_rate: 8000,
            formats: vec!["U8".into()],
            defaults: Negotiated {
                rate: 8000,
                format: "U8".into(),
                channels: 1,
            },
        });
        let e = Endpoint::from_device(&busy, &defaults);
        assert_eq!((e.rate, e.format.as_str(), e.channels), (8000, "U8", 1));
        assert!(e.single_rate);

        busy.status = DeviceStatus::Busy;
        busy.caps = None;
        let e = Endpoint::from_device(&busy, &defaults);
        assert_eq!((e.rate, e.format.as_str(), e.channels), (48000, "S16_LE", 2));
    }
}
