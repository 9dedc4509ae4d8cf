//! Sound card enumeration
//!
//! The scanner walks every card and every PCM device on it for one
//! stream direction and returns a flat list of [`PcmDevice`] records.
//! Negotiating the default rate/format/channel count only needs the
//! [`ParamSpace`] operations, so it is kept independent of ALSA.

use serde::{Deserialize, Serialize};
use std::fmt;

mod alsa_card;

pub use alsa_card::AlsaScanner;

/// Rate used when a card does not report anything better
pub const DEFAULT_RATE: u32 = 48000;
pub const DEFAULT_FORMAT: &str = "S16_LE";
pub const DEFAULT_CHANNELS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Playback,
    Capture,
}

impl From<Stream> for alsa::Direction {
    fn from(s: Stream) -> Self {
        match s {
            Stream::Playback => alsa::Direction::Playback,
            Stream::Capture => alsa::Direction::Capture,
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playback => write!(f, "Playback"),
            Self::Capture => write!(f, "Capture"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    /// Opened and enumerated
    Ready,
    /// Another application holds the device
    Busy,
    /// Opening or querying the device failed
    Error,
}

impl DeviceStatus {
    /// Text shown in the first column of the device lists
    pub fn marker(self) -> &'static str {
        match self {
            Self::Ready => "",
            Self::Busy => "*",
            Self::Error => "E",
        }
    }
}

/// Preferred hardware parameters, tried before falling back
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultParams {
    pub rate: u32,
    pub format: String,
    pub channels: u32,
}

impl Default for DefaultParams {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            format: DEFAULT_FORMAT.to_owned(),
            channels: DEFAULT_CHANNELS,
        }
    }
}

/// Parameters negotiated with the hardware
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Negotiated {
    pub rate: u32,
    pub format: String,
    pub channels: u32,
}

/// Capability ranges reported by an opened PCM
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    pub min_channels: u32,
    pub max_channels: u32,
    pub min_rate: u32,
    pub max_rate: u32,
    /// ALSA format names, in ALSA enumeration order
    pub formats: Vec<String>,
    pub defaults: Negotiated,
}

/// One PCM endpoint of a sound card
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PcmDevice {
    pub card: u32,
    pub card_id: String,
    pub card_name: String,
    pub device: u32,
    pub device_id: String,
    pub device_name: String,
    /// `hw:C,D`
    pub hw_path: String,
    pub status: DeviceStatus,
    /// Only present for [`DeviceStatus::Ready`] devices
    pub caps: Option<Capabilities>,
}

impl PcmDevice {
    pub fn is_usable(&self) -> bool {
        self.status == DeviceStatus::Ready
    }

    /// Cards which only run at one sample rate need forced parameters
    pub fn is_single_rate(&self) -> bool {
        match &self.caps {
            Some(c) => c.min_rate > 0 && c.min_rate == c.max_rate,
            None => false,
        }
    }

    pub fn formats_csv(&self) -> String {
        self.caps
            .as_ref()
            .map(|c| c.formats.join(", "))
            .unwrap_or_default()
    }
}

/// Enumerate all PCM devices for one direction
pub trait DeviceScanner {
    fn scan(&self, stream: Stream) -> Vec<PcmDevice>;
}

/// Devices of both directions, as printed by `--list`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceListing {
    pub playback: Vec<PcmDevice>,
    pub capture: Vec<PcmDevice>,
}

impl DeviceListing {
    pub fn scan(scanner: &dyn DeviceScanner) -> Self {
        Self {
            playback: scanner.scan(Stream::Playback),
            capture: scanner.scan(Stream::Capture),
        }
    }
}

/// The hardware parameter operations used during negotiation
///
/// Every successful call narrows the space for later calls, exactly
/// like an ALSA `hw_params` object.
pub trait ParamSpace {
    type Error;

    fn set_rate_near(&self, rate: u32) -> Result<u32, Self::Error>;
    fn set_format(&self, format: &str) -> Result<(), Self::Error>;
    fn set_channels(&self, channels: u32) -> Result<(), Self::Error>;
}

/// Pick default rate, format and channel count for a device
///
/// Rate first, then format, then channels.  Each falls back to the
/// device's own minimum (or first format) when the preference is
/// rejected.
pub fn negotiate<P: ParamSpace>(
    space: &P,
    min_rate: u32,
    min_channels: u32,
    formats: &[String],
    prefs: &DefaultParams,
) -> Negotiated {
    let rate = space.set_rate_near(prefs.rate).unwrap_or(min_rate);

    let format = match space.set_format(&prefs.format) {
        Ok(()) => prefs.format.clone(),
        Err(_) => formats
            .first()
            .cloned()
            .unwrap_or_else(|| prefs.format.clone()),
    };

    let channels = match space.set_channels(prefs.channels) {
        Ok(()) => prefs.channels,
        Err(_) => min_channels,
    };

    Negotiated {
        rate,
        format,
        channels,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// A parameter space with discrete rates and a fixed format list
    pub(crate) struct FakeSpace {
        pub rates: Vec<u32>,
        pub formats: Vec<&'static str>,
        pub channels: (u32, u32),
        pub calls: RefCell<Vec<&'static str>>,
    }

    impl FakeSpace {
        pub fn new(rates: &[u32], formats: &[&'static str], channels: (u32, u32)) -> Self {
            Self {
                rates: rates.to_vec(),
                formats: formats.to_vec(),
                channels,
                calls: RefCell::new(vec![]),
            }
        }
    }

    impl ParamSpace for FakeSpace {
        type Error = ();

        fn set_rate_near(&self, rate: u32) -> Result<u32, ()> {
            self.calls.borrow_mut().push("rate");
            self.rates
                .iter()
                .min_by_key(|r| (**r as i64 - rate as i64).abs())
                .copied()
                .ok_or(())
        }

        fn set_format(&self, format: &str) -> Result<(), ()> {
            self.calls.borrow_mut().push("format");
            if self.formats.contains(&format) {
                Ok(())
            } else {
                Err(())
            }
        }

        fn set_channels(&self, channels: u32) -> Result<(), ()> {
            self.calls.borrow_mut().push("channels");
            if channels >= self.channels.0 && channels <= self.channels.1 {
                Ok(())
            } else {
                Err(())
            }
        }
    }

    fn names(f: &[&str]) -> Vec<String> {
        f.iter().map(|s| s.to_string()).collect()
    }

    pub(crate) fn ready_device(card: u32, device: u32, caps: Capabilities) -> PcmDevice {
        PcmDevice {
            card,
            card_id: format!("Card{}", card),
            card_name: format!("Test card {}", card),
            device,
            device_id: "PCM".into(),
            device_name: "Test PCM".into(),
            hw_path: format!("hw:{},{}", card, device),
            status: DeviceStatus::Ready,
            caps: Some(caps),
        }
    }

    #[test]
    fn preferred_params_are_kept_when_supported() {
        let space = FakeSpace::new(&[44100, 48000, 96000], &["S16_LE", "S32_LE"], (1, 8));
        let n = negotiate(&space, 44100, 1, &names(&["S16_LE", "S32_LE"]), &DefaultParams::default());
        assert_eq!(
            n,
            Negotiated {
                rate: 48000,
                format: "S16_LE".into(),
                channels: 2
            }
        );
    }

    #[test]
    fn nearest_rate_is_used() {
        let space = FakeSpace::new(&[44100], &["S16_LE"], (2, 2));
        let n = negotiate(&space, 44100, 2, &names(&["S16_LE"]), &DefaultParams::default());
        assert_eq!(n.rate, 44100);
    }

    #[test]
    fn rate_falls_back_to_minimum() {
        let space = FakeSpace::new(&[], &["S16_LE"], (2, 2));
        let n = negotiate(&space, 8000, 2, &names(&["S16_LE"]), &DefaultParams::default());
        assert_eq!(n.rate, 8000);
    }

    #[test]
    fn format_falls_back_to_first_supported() {
        let space = FakeSpace::new(&[48000], &["S24_3LE", "S32_LE"], (2, 2));
        let n = negotiate(&space, 48000, 2, &names(&["S24_3LE", "S32_LE"]), &DefaultParams::default());
        assert_eq!(n.format, "S24_3LE");
    }

    #[test]
    fn format_without_any_supported_keeps_preference() {
        let space = FakeSpace::new(&[48000], &[], (2, 2));
        let n = negotiate(&space, 48000, 2, &[], &DefaultParams::default());
        assert_eq!(n.format, "S16_LE");
    }

    #[test]
    fn channels_fall_back_to_minimum() {
        let space = FakeSpace::new(&[48000], &["S32_LE"], (4, 10));
        let n = negotiate(&space, 48000, 4, &names(&["S32_LE"]), &DefaultParams::default());
        assert_eq!(n.channels, 4);
    }

    #[test]
    fn negotiation_order_is_rate_format_channels() {
        let space = FakeSpace::new(&[48000], &["S16_LE"], (2, 2));
        negotiate(&space, 48000, 2, &names(&["S16_LE"]), &DefaultParams::default());
        assert_eq!(*space.calls.borrow(), vec!["rate", "format", "channels"]);
    }

    #[test]
    fn custom_preferences_are_honoured() {
        let prefs = DefaultParams {
            rate: 96000,
            format: "S32_LE".into(),
            channels: 6,
        };
        let space = FakeSpace::new(&[44100, 96000], &["S16_LE", "S32_LE"], (2, 8));
        let n = negotiate(&space, 44100, 2, &names(&["S16_LE", "S32_LE"]), &prefs);
        assert_eq!(n.rate, 96000);
        assert_eq!(n.format, "S32_LE");
        assert_eq!(n.channels, 6);
    }

    #[test]
    fn single_rate_detection() {
        let mut caps = Capabilities {
            min_channels: 2,
            max_channels: 2,
            min_rate: 48000,
            max_rate: 48000,
            formats: names(&["S16_LE"]),
            defaults: Negotiated {
                rate: 48000,
                format: "S16_LE".into(),
                channels: 2,
            },
        };
        assert!(ready_device(0, 0, caps.clone()).is_single_rate());

        caps.max_rate = 96000;
        assert!(!ready_device(0, 0, caps.clone()).is_single_rate());

        caps.min_rate = 0;
        caps.max_rate = 0;
        assert!(!ready_device(0, 0, caps).is_single_rate());
    }

    /// Hands out canned devices per direction
    struct FakeScanner {
        calls: RefCell<Vec<Stream>>,
    }

    impl DeviceScanner for FakeScanner {
        fn scan(&self, stream: Stream) -> Vec<PcmDevice> {
            self.calls.borrow_mut().push(stream);
            match stream {
                Stream::Playback => {
                    let mut busy = ready_device(1, 3, fixed_caps());
                    busy.status = DeviceStatus::Busy;
                    busy.caps = None;
                    vec![ready_device(0, 0, fixed_caps()), busy]
                }
                Stream::Capture => vec![ready_device(0, 0, fixed_caps())],
            }
        }
    }

    fn fixed_caps() -> Capabilities {
        Capabilities {
            min_channels: 2,
            max_channels: 2,
            min_rate: 48000,
            max_rate: 48000,
            formats: names(&["S16_LE", "S32_LE"]),
            defaults: Negotiated {
                rate: 48000,
                format: "S16_LE".into(),
                channels: 2,
            },
        }
    }

    #[test]
    fn listing_scans_both_directions() {
        let scanner = FakeScanner {
            calls: RefCell::new(vec![]),
        };
        let listing = DeviceListing::scan(&scanner);
        assert_eq!(*scanner.calls.borrow(), vec![Stream::Playback, Stream::Capture]);
        assert_eq!(listing.playback.len(), 2);
        assert_eq!(listing.capture.len(), 1);
        assert_eq!(listing.playback[1].hw_path, "hw:1,3");
    }

    #[test]
    fn listing_json_shape() {
        let scanner = FakeScanner {
            calls: RefCell::new(vec![]),
        };
        let listing = DeviceListing::scan(&scanner);
        let json = serde_json::to_value(&listing).unwrap();

        let first = &json["playback"][0];
        assert_eq!(first["hw_path"], "hw:0,0");
        assert_eq!(first["status"], "ready");
        assert_eq!(first["caps"]["formats"][1], "S32_LE");
        assert_eq!(first["caps"]["defaults"]["rate"], 48000);
        assert_eq!(json["playback"][1]["status"], "busy");
        assert!(json["playback"][1]["caps"].is_null());

        let back: DeviceListing = serde_json::from_value(json).unwrap();
        assert_eq!(back, listing);
    }

    #[test]
    fn status_markers() {
        assert_eq!(DeviceStatus::Ready.marker(), "");
        assert_eq!(DeviceStatus::Busy.marker(), "*");
        assert_eq!(DeviceStatus::Error.marker(), "E");
    }
}
