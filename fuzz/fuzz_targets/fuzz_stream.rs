#![no_main]

use libfuzzer_sys::fuzz_target;
use sml_decoder::{DatagramScanner, SmlDecoder};

fuzz_target!(|data: &[u8]| {
    let mut scanner = DatagramScanner::new(data);
    let mut last = 0;
    while scanner.next().is_some() {
        assert!(scanner.position() > last);
        last = scanner.position();
    }

    let _ = SmlDecoder::default().decode_stream(data);
});
