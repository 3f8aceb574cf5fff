#![no_main]

use flate2::write::GzEncoder;
use flate2::Compression;
use gzinflate::inflate;
use libfuzzer_sys::fuzz_target;
use std::io::{Cursor, Write};

fuzz_target!(|data: &[u8]| {
    // Build a well-formed single-member gzip file around arbitrary payload
    // bytes, then inflate it: the result must always equal the payload.

    if data.is_empty() {
        return;
    }

    let data = if data.len() > 64 * 1024 { &data[..64 * 1024] } else { data };

    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    if encoder.write_all(data).is_err() {
        return;
    }
    let gzip_data = match encoder.finish() {
        Ok(d) => d,
        Err(_) => return,
    };

    let mut output = Vec::new();
    match inflate(Cursor::new(&gzip_data), &mut output) {
        Ok(report) => {
            assert_eq!(output, data, "round-trip mismatch");
            assert_eq!(report.bytes_written as usize, data.len());
        }
        Err(e) => panic!("inflate failed on well-formed gzip: {}", e),
    }
});
