//! # Logging Utilities
//!
//! Rate limiting and hex dumps for protocol debugging.
//!
//! ```rust
//! use std::time::Duration;
//! use sml_decoder::util::logging::{log_frame_hex, LogThrottle};
//!
//! let mut throttle = LogThrottle::new(Duration::from_secs(1), 5);
//! if throttle.allow() {
//!     log::warn!("Malformed datagram, resynchronizing");
//! }
//!
//! log_frame_hex("SML datagram", &[0x1b, 0x1b, 0x1b, 0x1b]);
//! ```

use std::time::{Duration, Instant};

use crate::util::hex::format_hex_compact;

/// Longest prefix of a datagram written to the debug log.
const MAX_LOG_BYTES: usize = 64;

/// Fixed-window rate limiter for log messages.
///
/// A noisy optical head produces a resync warning for every byte that looks
/// like a start sequence; the throttle keeps those from flooding the log and
/// counts what it held back.
#[derive(Debug)]
pub struct LogThrottle {
    window: Duration,
    limit: u32,
    emitted: u32,
    suppressed: u64,
    window_start: Instant,
}

impl LogThrottle {
    /// At most `limit` messages per `window`.
    pub fn new(window: Duration, limit: u32) -> Self {
        Self {
            window,
            limit,
            emitted: 0,
            suppressed: 0,
            window_start: Instant::now(),
        }
    }

    /// Returns `true` if the next message may be logged.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.window_start) > self.window {
            self.window_start = now;
            self.emitted = 0;
        }

        if self.emitted < self.limit {
            self.emitted += 1;
            true
        } else {
            self.suppressed += 1;
            false
        }
    }

    /// Number of messages held back since the last call.
    pub fn take_suppressed(&mut self) -> u64 {
        std::mem::take(&mut self.suppressed)
    }

    /// Starts a new window immediately.
    pub fn reset(&mut self) {
        self.window_start = Instant::now();
        self.emitted = 0;
    }
}

/// Writes `data` to the debug log as compact hex, cut after 64 bytes.
pub fn log_frame_hex(prefix: &str, data: &[u8]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let shown = &data[..data.len().min(MAX_LOG_BYTES)];
    if shown.len() < data.len() {
        log::debug!(
            "{prefix} ({} bytes): {} ...",
            data.len(),
            format_hex_compact(shown)
        );
    } else {
        log::debug!("{prefix} ({} bytes): {}", data.len(), format_hex_compact(shown));
    }
}
