//! Benchmark of sequential scalar reads through `ByteCursor` versus direct
//! slice decoding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bytefluo::{ByteCursor, ByteOrder, Scalar};

const PAYLOAD_LEN: usize = 1 << 20;

/// Deterministic, non-repeating enough payload of `len` bytes.
fn make_payload(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect()
}

/// Sum every scalar in `data` through a bounds-checked cursor.
fn cursor_sum<T: Scalar + Into<u64>>(data: &[u8], order: ByteOrder) -> u64 {
    let mut cursor = ByteCursor::new(data, order);
    let mut sum = 0u64;
    while let Ok(value) = cursor.read::<T>() {
        sum = sum.wrapping_add(value.into());
    }
    sum
}

/// Sum every scalar in `data` by decoding fixed-size chunks directly.
fn direct_sum<T: Scalar + Into<u64>>(data: &[u8], order: ByteOrder) -> u64 {
    data.chunks_exact(T::SIZE)
        .filter_map(|chunk| T::decode(chunk, order))
        .map(Into::into)
        .fold(0u64, u64::wrapping_add)
}

type SumFn = fn(&[u8], ByteOrder) -> u64;

fn bench_sequential_reads(c: &mut Criterion) {
    let payload = make_payload(PAYLOAD_LEN);

    let cases: [(&str, SumFn, SumFn); 3] = [
        ("u16", cursor_sum::<u16>, direct_sum::<u16>),
        ("u32", cursor_sum::<u32>, direct_sum::<u32>),
        ("u64", cursor_sum::<u64>, direct_sum::<u64>),
    ];

    for (width, cursor_fn, direct_fn) in cases {
        for order in [ByteOrder::Big, ByteOrder::Little] {
            // Both paths must agree before their timings are comparable.
            assert_eq!(cursor_fn(&payload, order), direct_fn(&payload, order));

            let mut group = c.benchmark_group(format!("sequential_{width}_{order}"));
            group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));
            group.bench_with_input(BenchmarkId::new("cursor", PAYLOAD_LEN), &payload, |b, p| {
                b.iter(|| cursor_fn(black_box(p), order))
            });
            group.bench_with_input(BenchmarkId::new("direct", PAYLOAD_LEN), &payload, |b, p| {
                b.iter(|| direct_fn(black_box(p), order))
            });
            group.finish();
        }
    }
}

criterion_group!(benches, bench_sequential_reads);
criterion_main!(benches);
