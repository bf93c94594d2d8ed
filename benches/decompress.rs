//! Benchmarks for packed file decoding.
//!
//! Run with: `cargo bench`
//! Compare with baseline: `cargo bench -- --save-baseline main`
//! Compare against baseline: `cargo bench -- --baseline main`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use packed_asset::{decode_rlb, decode_rlw, ChunkedReader, PackedFileLoader};
use std::io::Cursor;

const UNPACKED_SIZE: usize = 256 * 1024;

/// Sprite-like data: long runs of background with short noisy spans.
fn sample_image() -> Vec<u8> {
    let mut state = 0x1234_5678u32;
    let mut data = Vec::with_capacity(UNPACKED_SIZE);
    while data.len() < UNPACKED_SIZE {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        let span = 4 + (state >> 24) as usize % 60;
        if state & 1 == 0 {
            data.extend(std::iter::repeat(0u8).take(span));
        } else {
            data.extend((0..span).map(|i| (state >> (i % 24)) as u8));
        }
    }
    data.truncate(UNPACKED_SIZE);
    data
}

/// Greedy RLB encoding: packed for repeats, literal otherwise.
fn encode_rlb(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let same = data[i..].iter().take(129).take_while(|&&b| b == data[i]).count();
        if same >= 2 {
            out.push((257 - same) as u8);
            out.push(data[i]);
            i += same;
        } else {
            let start = i;
            while i < data.len() && i - start < 128 {
                if i + 1 < data.len() && data[i] == data[i + 1] {
                    break;
                }
                i += 1;
            }
            out.push((i - start - 1) as u8);
            out.extend_from_slice(&data[start..i]);
        }
    }
    out
}

/// Greedy RLW encoding over big-endian word pairs.
fn encode_rlw(data: &[u8]) -> Vec<u8> {
    let words: Vec<[u8; 2]> = data.chunks(2).map(|w| [w[0], w[1]]).collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let same = words[i..].iter().take(128).take_while(|&&w| w == words[i]).count();
        if same >= 2 {
            out.push(0x80 | (same - 1) as u8);
            out.extend_from_slice(&words[i]);
            i += same;
        } else {
            let start = i;
            while i < words.len() && i - start < 128 {
                if i + 1 < words.len() && words[i] == words[i + 1] {
                    break;
                }
                i += 1;
            }
            out.push((i - start - 1) as u8);
            for w in &words[start..i] {
                out.extend_from_slice(w);
            }
        }
    }
    out
}

fn packed_file(tag: u32, payload: &[u8]) -> Vec<u8> {
    let mut file = Vec::with_capacity(payload.len() + 8);
    file.extend_from_slice(&(UNPACKED_SIZE as u32).to_be_bytes());
    file.extend_from_slice(&tag.to_be_bytes());
    file.extend_from_slice(payload);
    file
}

fn bench_rlb(c: &mut Criterion) {
    let packed = encode_rlb(&sample_image());

    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(UNPACKED_SIZE as u64));

    group.bench_function("rlb", |b| {
        b.iter(|| {
            let mut reader = ChunkedReader::new(Cursor::new(black_box(&packed)));
            let mut out = vec![0u8; UNPACKED_SIZE];
            decode_rlb(&mut reader, &mut out).unwrap();
            black_box(out)
        });
    });

    group.finish();
}

fn bench_rlw(c: &mut Criterion) {
    let packed = encode_rlw(&sample_image());

    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(UNPACKED_SIZE as u64));

    group.bench_function("rlw", |b| {
        b.iter(|| {
            let mut reader = ChunkedReader::new(Cursor::new(black_box(&packed)));
            let mut out = vec![0u8; UNPACKED_SIZE];
            let written = decode_rlw(&mut reader, &mut out, packed.len() as u64).unwrap();
            black_box(written)
        });
    });

    group.finish();
}

/// Chunk size against throughput for the whole load path
fn bench_chunk_sizes(c: &mut Criterion) {
    let file = packed_file(0, &encode_rlb(&sample_image()));

    let mut group = c.benchmark_group("chunk_size");
    group.throughput(Throughput::Bytes(UNPACKED_SIZE as u64));

    for capacity in [512usize, 4096, 20000, 65536] {
        group.bench_function(format!("rlb_{}", capacity), |b| {
            b.iter(|| {
                let mut loader = PackedFileLoader::with_options(packed_asset::LoadOptions {
                    chunk_capacity: capacity,
                    ..Default::default()
                });
                let loaded = loader
                    .load_from_reader(Cursor::new(black_box(&file)))
                    .unwrap();
                black_box(loaded.data)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rlb, bench_rlw, bench_chunk_sizes);
criterion_main!(benches);
