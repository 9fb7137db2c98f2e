//! Performance benchmarks for RegionDepth
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use region_depth::core::{accumulate_from_sources, accumulate_source_into, IntervalRecord, RegionSet};
use region_depth::MemorySource;

/// Per-base style coverage: contiguous runs of varying depth along one chromosome
fn synthetic_records(chrom_len: u64, run: u64, seed: u64) -> Vec<IntervalRecord> {
    (0..chrom_len / run)
        .map(|i| {
            let start = i * run;
            let value = (i * 31 + seed * 7) % 60;
            IntervalRecord::new("chr1", start, start + run, value.to_string())
        })
        .collect()
}

fn synthetic_regions(count: u64, len: u64, spacing: u64) -> RegionSet {
    RegionSet::new(
        (0..count)
            .map(|i| ("chr1".to_string(), i * spacing, i * spacing + len))
            .collect(),
    )
    .unwrap()
}

/// Benchmark one source over region sets of growing size
fn bench_single_source(c: &mut Criterion) {
    let mut source = MemorySource::from_records("bench", synthetic_records(5_000_000, 25, 1));

    let mut group = c.benchmark_group("single_source");
    for count in [100u64, 1_000, 10_000].iter() {
        let template = synthetic_regions(*count, 300, 450);
        group.throughput(Throughput::Elements(template.total_bases()));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                let mut regions = template.empty_like();
                let stats = accumulate_source_into(&mut source, &mut regions).unwrap();
                black_box((regions, stats))
            })
        });
    }
    group.finish();
}

/// Benchmark accumulation across many sources
fn bench_many_sources(c: &mut Criterion) {
    let template = synthetic_regions(1_000, 300, 4_500);

    let mut group = c.benchmark_group("many_sources");
    for n in [2u64, 8, 32].iter() {
        let mut sources: Vec<MemorySource> = (0..*n)
            .map(|seed| MemorySource::from_records(format!("s{}", seed), synthetic_records(5_000_000, 40, seed)))
            .collect();
        group.throughput(Throughput::Elements(template.total_bases() * n));
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| {
                let result = accumulate_from_sources(&mut sources, template.empty_like()).unwrap();
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_source, bench_many_sources);
criterion_main!(benches);
