mod asoundrc;
mod error;
mod hardware;
mod log;
mod model;
mod settings;
mod ui;

use hardware::{AlsaScanner, DeviceListing, DeviceScanner};
use settings::Settings;
use std::{rc::Rc, sync::Arc};
use tracing::{error, info, warn};

const USAGE: &str = "\
Usage: asconfig [OPTION]

Pick the default ALSA playback and capture devices and write ~/.asoundrc.

Options:
  --list       print all playback and capture devices as JSON and exit
  --help       print this help and exit
  --version    print the version and exit

The log level is read from ASCONFIG_LOG (e.g. ASCONFIG_LOG=debug).";

enum Mode {
    Gui,
    List,
}

fn main() {
    let mode = match parse_args(std::env::args().skip(1)) {
        Ok(Some(mode)) => mode,
        Ok(None) => return,
        Err(arg) => {
            eprintln!("asconfig: unknown argument '{}'\n\n{}", arg, USAGE);
            std::process::exit(2);
        }
    };

    log::parse_log_level();
    let settings = load_settings();
    let scanner = AlsaScanner::new(settings.r().defaults.clone());

    match mode {
        Mode::List => list(&scanner),
        Mode::Gui => run_gui(settings, scanner),
    }
}

/// `Ok(None)` means the request was already answered
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Mode>, String> {
    let mode = match args.next().as_deref() {
        None => Mode::Gui,
        Some("--list") => Mode::List,
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(None);
        }
        Some("--version") | Some("-V") => {
            println!("asconfig {}", env!("CARGO_PKG_VERSION"));
            return Ok(None);
        }
        Some(other) => return Err(other.to_owned()),
    };

    match args.next() {
        Some(extra) => Err(extra),
        None => Ok(Some(mode)),
    }
}

fn load_settings() -> Arc<Settings> {
    let dirs = match settings::scaffold() {
        Some(d) => d,
        None => {
            warn!("No home directory found, settings will not be stored");
            return Settings::ephemeral();
        }
    };

    Settings::init(dirs.config_dir()).unwrap_or_else(|e| {
        warn!("Failed to store settings: {}", e);
        Settings::ephemeral()
    })
}

fn list(scanner: &dyn DeviceScanner) {
    match serde_json::to_string_pretty(&DeviceListing::scan(scanner)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::oops(format!("Failed to serialise device list: {}", e), 1),
    }
}

fn run_gui(settings: Arc<Settings>, scanner: AlsaScanner) {
    if gtk::init().is_err() {
        log::oops(
            "Failed to start GTK, please ensure all dependencies are installed",
            1,
        );
    }

    let (tx, rx) = glib::MainContext::channel(glib::PRIORITY_DEFAULT);
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = tx.send(());
    }) {
        error!("Error setting Ctrl-C handler: {}", e);
    }
    rx.attach(None, |()| {
        info!("Interrupted");
        gtk::main_quit();
        glib::Continue(false)
    });

    let window = ui::create_ui(settings, Rc::new(scanner));
    window.show();
    gtk::main();

    info!("asconfig exiting, goodbye");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(a: &[&str]) -> impl Iterator<Item = String> {
        a.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn no_arguments_start_the_gui() {
        assert!(matches!(parse_args(args(&[])), Ok(Some(Mode::Gui))));
    }

    #[test]
    fn list_flag() {
        assert!(matches!(parse_args(args(&["--list"])), Ok(Some(Mode::List))));
    }

    #[test]
    fn help_and_version_are_answered() {
        assert!(matches!(parse_args(args(&["--help"])), Ok(None)));
        assert!(matches!(parse_args(args(&["--version"])), Ok(None)));
    }

    #[test]
    fn unknown_and_extra_arguments_are_rejected() {
        assert_eq!(parse_args(args(&["--frobnicate"])).err(), Some("--frobnicate".into()));
        assert_eq!(parse_args(args(&["--list", "x"])).err(), Some("x".into()));
    }
}
