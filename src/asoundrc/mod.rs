//! Generating and writing the user's `.asoundrc`
//!
//! [`prepare_save`] checks the selection held by the model and turns
//! it into the text of the file; [`write_config`] puts it on disk.
//! Asking the user before overwriting is left to the UI.

mod compose;
mod stanza;

use compose::{compose, Endpoint};

use crate::{error::SaveError, model::ModelInner, settings::AppSettings};
use std::{fs::OpenOptions, io::Write, path::Path};
use tracing::{debug, info};

/// Validate the selected rows and render the configuration
///
/// `playback` and `capture` are indices into the model's device
/// lists.  A capture device is optional; it is used whatever its
/// status, with the configured defaults standing in for anything it
/// could not report.
pub fn prepare_save(
    model: &ModelInner,
    playback: Option<usize>,
    capture: Option<usize>,
    settings: &AppSettings,
) -> Result<String, SaveError> {
    let pb = playback
        .and_then(|idx| model.playback().get(idx))
        .ok_or(SaveError::NoPlayback)?;

    if !pb.is_usable() {
        return Err(SaveError::PlaybackUnavailable(pb.status));
    }

    let playback = Endpoint::from_device(pb, &settings.defaults);
    let capture = capture
        .and_then(|idx| model.capture().get(idx))
        .map(|dev| Endpoint::from_device(dev, &settings.defaults));

    debug!(
        "composing config for {} (capture: {:?})",
        pb.hw_path,
        capture.as_ref().map(|c| (c.card, c.device))
    );

    Ok(compose(&playback, capture.as_ref(), model.options(), &settings.stream).to_string())
}

/// Create or truncate `path` and write `text` to it
pub fn write_config(path: &Path, text: &str) -> Result<(), SaveError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .and_then(|mut f| f.write_all(text.as_bytes()))
        .map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Wrote {}", path.display());
    Ok(())
}
