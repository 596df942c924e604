//! Logging helpers and the resync warning throttle.

use std::time::Duration;

use sml_decoder::logging::{init_logger, log_debug, log_error, log_info, log_warn};
use sml_decoder::util::logging::{log_frame_hex, LogThrottle};

#[test]
fn test_helpers_after_init() {
    init_logger();
    log_error("error");
    log_warn("warning");
    log_info("info");
    log_debug("debug");
    log_frame_hex("SML datagram", &[0x1B; 100]);
}

/// A second initialization must not panic; the binary and tests may both call it.
#[test]
fn test_init_logger_twice() {
    init_logger();
    init_logger();
}

#[test]
fn test_throttle_counts_suppressed() {
    let mut throttle = LogThrottle::new(Duration::from_secs(60), 3);
    let allowed = (0..10).filter(|_| throttle.allow()).count();
    assert_eq!(allowed, 3);
    assert_eq!(throttle.take_suppressed(), 7);
}
