//! Benchmarks for gzinflate decompression throughput.
//!
//! Tests various data patterns and sizes to measure inflation throughput.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flate2::write::GzEncoder;
use flate2::Compression;
use gzinflate::inflate;
use std::io::{Cursor, Write};

/// Generate random (incompressible) data
fn generate_random_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut data = Vec::with_capacity(size);
    let mut hasher = DefaultHasher::new();

    for i in 0..size {
        i.hash(&mut hasher);
        data.push((hasher.finish() & 0xFF) as u8);
    }
    data
}

/// Generate repetitive (highly compressible) data
fn generate_repetitive_data(size: usize) -> Vec<u8> {
    let pattern = b"ABCDABCDABCDABCD";
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        let remaining = size - data.len();
        let chunk_size = remaining.min(pattern.len());
        data.extend_from_slice(&pattern[..chunk_size]);
    }
    data
}

fn gzip_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn bench_inflate(c: &mut Criterion) {
    let sizes = [4 * 1024, 64 * 1024, 1024 * 1024];

    let mut group = c.benchmark_group("inflate_random");
    for &size in &sizes {
        let compressed = gzip_compress(&generate_random_data(size));
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &compressed, |b, compressed| {
            b.iter(|| {
                let mut out = Vec::with_capacity(size);
                inflate(Cursor::new(compressed.as_slice()), &mut out).unwrap();
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("inflate_repetitive");
    for &size in &sizes {
        let compressed = gzip_compress(&generate_repetitive_data(size));
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &compressed, |b, compressed| {
            b.iter(|| {
                let mut out = Vec::with_capacity(size);
                inflate(Cursor::new(compressed.as_slice()), &mut out).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_inflate);
criterion_main!(benches);
