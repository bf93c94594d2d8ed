#![no_main]
use libfuzzer_sys::fuzz_target;
use packed_asset::{decode_rlb, ChunkedReader};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // First two bytes pick the output size, the third the chunk size.
    let size = u16::from_le_bytes([data[0], data[1]]) as usize;
    let capacity = 2 + data[2] as usize;

    let mut reader = ChunkedReader::with_capacity(Cursor::new(&data[3..]), capacity);
    let mut out = vec![0u8; size];
    let _ = decode_rlb(&mut reader, &mut out);
});
