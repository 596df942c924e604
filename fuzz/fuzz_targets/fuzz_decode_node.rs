#![no_main]

use libfuzzer_sys::fuzz_target;
use sml_decoder::payload::{decode_node, Cursor};
use sml_decoder::{build_file, extract};

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::new(data);
    while !cursor.is_empty() {
        let before = cursor.position();
        if decode_node(&mut cursor).is_err() {
            break;
        }
        assert!(cursor.position() > before);
    }

    if let Ok(file) = build_file(data) {
        for reading in extract(&file) {
            let _ = reading.to_string();
        }
    }
});
