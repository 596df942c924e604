#![no_main]

use libfuzzer_sys::fuzz_target;
use sml_decoder::transport::{frame, wrap};

fuzz_target!(|data: &[u8]| {
    let _ = frame(data);

    // anything we wrap must come back unchanged
    let wrapped = wrap(data);
    match frame(&wrapped) {
        Ok(payload) => assert_eq!(&payload[..], data),
        Err(err) => panic!("wrapped payload rejected: {err}"),
    }

    // a corrupted checksum must never pass
    let mut corrupted = wrapped.to_vec();
    if let Some(last) = corrupted.last_mut() {
        *last = last.wrapping_add(1);
        assert!(frame(&corrupted).is_err());
    }
});
