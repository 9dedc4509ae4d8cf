//! asconfig settings handling
//!
//! The settings live in a single TOML file under the user's config
//! directory.  They hold:
//!
//! - the output path of the generated configuration
//! - the rate/format/channels tried first on every card
//! - the initial state of the option controls
//! - the stream pcm format and command
//!
//! ## Usage
//!
//! First initialise the settings tree by calling
//! `Settings::init(...)`, giving it a path under which the
//! configuration is stored.  Afterwards you can read settings via
//! [`Settings::r()`](Settings::r()).  A missing file is created
//! from the defaults so the user has something to edit.  A broken
//! file is reported and the defaults are used for that run only.

mod app;
mod stream;

pub use app::AppSettings;
pub use stream::{StreamFormat, StreamSettings};

use crate::error::SettingsError;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Read, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, warn};

const SETTINGS_FILE: &str = "asconfig.toml";

/// Create the required directories
pub fn scaffold() -> Option<ProjectDirs> {
    let dir = ProjectDirs::from("org", "asconfig", "asconfig")?;
    if let Err(e) = fs::create_dir_all(dir.config_dir()) {
        warn!("Can't create {}: {}", dir.config_dir().display(), e);
    }
    Some(dir)
}

/// Main settings tree
#[derive(Default, Debug)]
pub struct Settings {
    base: PathBuf,
    app: AppSettings,
}

impl Settings {
    /// Create a new settings tree from a config path
    ///
    /// Defaults are only written back when there was no file yet, a
    /// file that fails to parse is left for the user to fix.
    pub fn init<'p>(path: impl Into<&'p Path>) -> Result<Arc<Settings>, SettingsError> {
        let base = path.into().to_path_buf();
        let (app, state) = load_path(base.join(SETTINGS_FILE));

        let this = Arc::new(Self { app, base });
        if state == FileState::Missing {
            this.sync()?;
        }
        Ok(this)
    }

    /// Settings which are never read from or written to disk
    pub fn ephemeral() -> Arc<Settings> {
        Arc::new(Self::default())
    }

    fn sync(&self) -> Result<(), SettingsError> {
        let contents = toml::to_string_pretty(&self.app)?;
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.base.join(SETTINGS_FILE))
            .and_then(|mut f| f.write_all(contents.as_bytes()))?;
        Ok(())
    }

    /// The application settings
    pub fn r(&self) -> &AppSettings {
        &self.app
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FileState {
    Loaded,
    Missing,
    /// Unreadable or invalid, defaults are used for this run
    Broken,
}

fn load_path<T: Default + DeserializeOwned>(path: PathBuf) -> (T, FileState) {
    let contents = File::open(&path).and_then(|mut f| {
        let mut c = String::new();
        f.read_to_string(&mut c).map(|_| c)
    });

    match contents {
        Ok(c) => match toml::from_str(&c) {
            Ok(t) => (t, FileState::Loaded),
            Err(e) => {
                warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                (T::default(), FileState::Broken)
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No settings at {}, using defaults", path.display());
            (T::default(), FileState::Missing)
        }
        Err(e) => {
            warn!("Can't read {}: {}", path.display(), e);
            (T::default(), FileState::Broken)
        }
    }
}
