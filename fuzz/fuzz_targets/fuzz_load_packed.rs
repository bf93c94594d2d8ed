#![no_main]
use libfuzzer_sys::fuzz_target;
use packed_asset::{LoadOptions, PackedFileLoader};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Cap the declared size to avoid OOM
    let mut loader = PackedFileLoader::with_options(LoadOptions {
        chunk_capacity: 64,
        max_decompressed_size: Some(16 * 1024 * 1024),
    });
    if let Ok(loaded) = loader.load_from_reader(Cursor::new(data)) {
        assert_eq!(loaded.data.len(), loaded.header.decompressed_size as usize);
    }
});
