#![no_main]
use libfuzzer_sys::fuzz_target;
use packed_asset::{decode_rlw, ChunkedReader};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let size = u16::from_le_bytes([data[0], data[1]]) as usize;
    let capacity = 2 + (data[2] % 32) as usize;
    let payload = &data[3..];

    let mut reader = ChunkedReader::with_capacity(Cursor::new(payload), capacity);
    let mut out = vec![0u8; size];
    if let Ok(written) = decode_rlw(&mut reader, &mut out, payload.len() as u64) {
        assert!(written <= size);
    }
});
