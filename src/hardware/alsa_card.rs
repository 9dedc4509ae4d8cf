use super::{
    negotiate, Capabilities, DefaultParams, DeviceScanner, DeviceStatus, ParamSpace, PcmDevice,
    Stream,
};
use crate::error::ScanError;
use alsa::card::Iter as CardIter;
use alsa::ctl::{Ctl, DeviceIter};
use alsa::pcm::{Format, HwParams, PCM};
use alsa::ValueOr;
use tracing::{debug, warn};

/// Scan sound cards through alsa-lib
pub struct AlsaScanner {
    prefs: DefaultParams,
}

struct CardInfo {
    index: u32,
    id: String,
    name: String,
}

impl AlsaScanner {
    pub fn new(prefs: DefaultParams) -> Self {
        Self { prefs }
    }

    fn open_card(stream: Stream, index: i32) -> Result<(Ctl, CardInfo), ScanError> {
        let path = format!("hw:{}", index);
        let card_err = |source| ScanError::Card {
            stream,
            path: path.clone(),
            source,
        };

        let ctl = Ctl::new(&path, false).map_err(card_err)?;
        let info = ctl.card_info().map_err(card_err)?;
        let card = CardInfo {
            index: index as u32,
            id: info.get_id().unwrap_or_default().to_owned(),
            name: info.get_name().unwrap_or_default().to_owned(),
        };
        Ok((ctl, card))
    }

    /// Read the identity of one device, then probe its capabilities
    fn enumerate_device(
        &self,
        stream: Stream,
        ctl: &Ctl,
        card: &CardInfo,
        device: u32,
    ) -> Result<PcmDevice, ScanError> {
        let hw_path = format!("hw:{},{}", card.index, device);
        let info = ctl
            .pcm_info(device, 0, stream.into())
            .map_err(|source| ScanError::Device {
                stream,
                path: hw_path.clone(),
                source,
            })?;

        let mut pcm_device = PcmDevice {
            card: card.index,
            card_id: card.id.clone(),
            card_name: card.name.clone(),
            device,
            device_id: info.get_id().unwrap_or_default().to_owned(),
            device_name: info.get_name().unwrap_or_default().to_owned(),
            hw_path,
            status: DeviceStatus::Error,
            caps: None,
        };

        match self.probe(stream, &pcm_device.hw_path) {
            Ok(caps) => {
                pcm_device.status = DeviceStatus::Ready;
                pcm_device.caps = Some(caps);
            }
            Err(Probe::Busy) => {
                debug!("{}: {} is busy", stream, pcm_device.hw_path);
                pcm_device.status = DeviceStatus::Busy;
            }
            Err(Probe::Failed(e)) => {
                warn!("{}", e);
                pcm_device.status = DeviceStatus::Error;
            }
        }

        Ok(pcm_device)
    }

    fn probe(&self, stream: Stream, hw_path: &str) -> Result<Capabilities, Probe> {
        let pcm = PCM::new(hw_path, stream.into(), true).map_err(|source| {
            if source.errno() == libc::EBUSY {
                Probe::Busy
            } else {
                Probe::Failed(ScanError::Open {
                    stream,
                    path: hw_path.to_owned(),
                    source,
                })
            }
        })?;

        let params_err = || {
            Probe::Failed(ScanError::Params {
                stream,
                path: hw_path.to_owned(),
            })
        };
        let hwp = HwParams::any(&pcm).map_err(|_| params_err())?;

        let min_channels = hwp.get_channels_min().map_err(|_| params_err())?;
        let max_channels = hwp.get_channels_max().map_err(|_| params_err())?;
        let min_rate = hwp.get_rate_min().map_err(|_| params_err())?;
        let max_rate = hwp.get_rate_max().map_err(|_| params_err())?;

        let formats = supported_formats(|f| hwp.test_format(f).is_ok());

        let defaults = negotiate(
            &AlsaParams(&hwp),
            min_rate,
            min_channels,
            &formats,
            &self.prefs,
        );

        Ok(Capabilities {
            min_channels,
            max_channels,
            min_rate,
            max_rate,
            formats,
            defaults,
        })
    }
}

/// Names of the formats accepted by `test`, in ALSA enumeration order
///
/// Only formats known to `alsa::pcm::Format` are tried.  The 20 bit
/// formats in a 32 bit container (`S20_LE`, `S20_BE`, `U20_LE`,
/// `U20_BE`) are missing there and never show up in the list.
fn supported_formats(test: impl Fn(Format) -> bool) -> Vec<String> {
    Format::all()
        .iter()
        .copied()
        .filter(|f| *f != Format::Unknown)
        .filter(|f| test(*f))
        .map(|f| f.to_string())
        .collect()
}

enum Probe {
    Busy,
    Failed(ScanError),
}

impl DeviceScanner for AlsaScanner {
    fn scan(&self, stream: Stream) -> Vec<PcmDevice> {
        let mut devices = Vec::new();

        for card in CardIter::new() {
            let card = match card {
                Ok(card) => card,
                Err(e) => {
                    warn!("{}: Error iterating cards: {}", stream, e);
                    break;
                }
            };

            let (ctl, info) = match Self::open_card(stream, card.get_index()) {
                Ok(c) => c,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            for device in DeviceIter::new(&ctl) {
                match self.enumerate_device(stream, &ctl, &info, device as u32) {
                    Ok(d) => devices.push(d),
                    Err(e) => warn!("{}", e),
                }
            }
        }

        debug!("{}: found {} devices", stream, devices.len());
        devices
    }
}

/// Adapter from an ALSA parameter space to negotiation
struct AlsaParams<'a, 'p>(&'a HwParams<'p>);

impl ParamSpace for AlsaParams<'_, '_> {
    type Error = alsa::Error;

    fn set_rate_near(&self, rate: u32) -> alsa::Result<u32> {
        self.0.set_rate_near(rate, ValueOr::Nearest)
    }

    fn set_format(&self, format: &str) -> alsa::Result<()> {
        // Unrecognised names parse to `Unknown`, which ALSA rejects
        let format: Format = format.parse().unwrap_or(Format::Unknown);
        self.0.set_format(format)
    }

    fn set_channels(&self, channels: u32) -> alsa::Result<()> {
        self.0.set_channels(channels)
    }
}
