// Benchmarks for the Quark chain and its component functions
// Run with: cargo bench --bench bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mch_hashes::quark::{blake512, bmw512, groestl512, jh512, keccak512, quark_hash, skein512};
use mch_hashes::{double_sha256, merkle_root, Hash};

fn header_bytes(nonce: u32) -> [u8; 80] {
    let mut header = [0u8; 80];
    header[0] = 1;
    header[68..72].copy_from_slice(&1610161184u32.to_le_bytes());
    header[72..76].copy_from_slice(&0x1e0ffff0u32.to_le_bytes());
    header[76..80].copy_from_slice(&nonce.to_le_bytes());
    header
}

fn bench_quark_header(c: &mut Criterion) {
    let header = header_bytes(1736228);
    c.bench_function("quark_hash::header", |b| b.iter(|| quark_hash(black_box(&header))));
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives_64_bytes");
    let input = [0x5au8; 64];
    let functions: [(&str, fn(&[u8]) -> [u8; 64]); 6] = [
        ("blake512", blake512),
        ("bmw512", bmw512),
        ("groestl512", groestl512),
        ("jh512", jh512),
        ("keccak512", keccak512),
        ("skein512", skein512),
    ];
    for (name, f) in functions {
        group.bench_with_input(BenchmarkId::new(name, 64), &input, |b, input| b.iter(|| f(black_box(input))));
    }
    group.finish();
}

fn bench_nonce_scan(c: &mut Criterion) {
    c.bench_function("quark_hash::scan_100_nonces", |b| {
        b.iter(|| {
            for nonce in 0..100u32 {
                let _ = quark_hash(black_box(&header_bytes(nonce)));
            }
        });
    });
}

fn bench_merkle(c: &mut Criterion) {
    let leaves: Vec<Hash> = (0..256u32).map(|i| double_sha256(&i.to_le_bytes())).collect();
    c.bench_function("merkle_root::256_leaves", |b| b.iter(|| merkle_root(black_box(&leaves))));
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .warm_up_time(std::time::Duration::from_secs(1));
    targets =
        bench_quark_header,
        bench_primitives,
        bench_nonce_scan,
        bench_merkle
);

criterion_main!(benches);
