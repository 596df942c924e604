//! Logger setup and plain-string logging helpers for the binary.

use log::{log, log_enabled, Level};

/// Target used by the helpers, so `RUST_LOG=sml=debug` selects them.
const TARGET: &str = "sml";

/// Initializes the logger with the `env_logger` crate.
///
/// The level is taken from `RUST_LOG`; without it only warnings and errors
/// are shown, so skipped entries and rejected messages stay visible.
/// Calling it more than once is harmless.
pub fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

/// Logs `message` at `level` if that level is enabled.
pub fn log_at(level: Level, message: &str) {
    if log_enabled!(target: TARGET, level) {
        log!(target: TARGET, level, "{message}");
    }
}

pub fn log_error(message: &str) {
    log_at(Level::Error, message);
}

pub fn log_warn(message: &str) {
    log_at(Level::Warn, message);
}

pub fn log_info(message: &str) {
    log_at(Level::Info, message);
}

pub fn log_debug(message: &str) {
    log_at(Level::Debug, message);
}
