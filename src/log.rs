//! Logging utilities

use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

const LOG_ENV: &str = "ASCONFIG_LOG";

pub(crate) fn parse_log_level() {
    let filter = log_filter(std::env::var(LOG_ENV).ok());

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    info!("Initialised logger: welcome to asconfig!");
}

/// INFO unless `spec` holds a valid filter
fn log_filter(spec: Option<String>) -> EnvFilter {
    spec.and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
}

/// Create an oops (a fatal crash) with an associated error message
pub(crate) fn oops<S: Into<String>>(msg: S, code: u16) -> ! {
    error!("{}", msg.into());
    std::process::exit(code.into());
}
