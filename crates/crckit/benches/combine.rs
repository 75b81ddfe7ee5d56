//! Combine, unshift and inversion benchmarks.
//!
//! Run: `cargo bench -p crckit -- combine`
//!
//! Combine is O(log n) in the suffix length, so throughput is counted in
//! operations rather than bytes.

use crckit::{Seed, catalog};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_combine(c: &mut Criterion) {
  let mut group = c.benchmark_group("combine");

  for name in ["CRC-32C", "CRC-64-XZ", "CRC-16-CCITT-FALSE"] {
    let Some(preset) = catalog::find(name) else { continue };
    let crc = preset.engine();

    for len in [64u64, 4096, 1 << 20, 1 << 40] {
      group.throughput(Throughput::Elements(1));

      group.bench_with_input(BenchmarkId::new(name, len), &len, |b, &len| {
        let crc_a = 0x1234_5678 & crc.model().mask();
        let crc_b = 0x8765_4321 & crc.model().mask();
        b.iter(|| core::hint::black_box(crc.combine(crc_a, crc_b, len)));
      });
    }
  }

  group.finish();
}

fn bench_unshift(c: &mut Criterion) {
  let mut group = c.benchmark_group("combine/unshift");
  let Some(preset) = catalog::find("CRC-32") else { return };
  let crc = preset.engine();

  for size in [64usize, 1024, 16384] {
    let data = vec![0x5Au8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(crc.unshift_bytes(0xDEAD_BEEF, data)));
    });
  }

  group.finish();
}

fn bench_acrc(c: &mut Criterion) {
  let mut group = c.benchmark_group("combine/acrc");
  let Some(preset) = catalog::find("CRC-64-XZ") else { return };
  let crc = preset.engine();

  for size in [0usize, 64, 4096] {
    let suffix = vec![0x3Cu8; size];

    group.bench_with_input(BenchmarkId::from_parameter(size), &suffix, |b, suffix| {
      b.iter(|| core::hint::black_box(crc.acrc(Seed::Bytes(b"prefix"), suffix, 0x0123_4567_89AB_CDEF)));
    });
  }

  group.finish();
}

criterion_group!(benches, bench_combine, bench_unshift, bench_acrc);
criterion_main!(benches);
