//! End-to-end tests: region file + directory of coverage files -> rendered depths

use region_depth::core::io::{open_text, LineIterator};
use region_depth::core::{
    accumulate_from_paths, parse_bedgraph_line, AccumulateOptions, CoverageError, CoverageResult,
    IntervalRecord,
};
use region_depth::formats::{load_region_set, write_depths, DepthFormat};
use region_depth::sources::{discover_sources, DEFAULT_PATTERN};
use region_depth::MemorySource;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write_gz(path: &Path, lines: &[&str]) {
    let mut enc = flate2::write::GzEncoder::new(File::create(path).unwrap(), flate2::Compression::default());
    for line in lines {
        writeln!(enc, "{}", line).unwrap();
    }
    enc.finish().unwrap();
}

/// Loads a whole bedGraph into memory; stands in for an indexed reader
fn open_in_memory(path: &Path) -> CoverageResult<MemorySource> {
    let label = path.display().to_string();
    let reader = open_text(path).map_err(|e| CoverageError::source_unavailable(&label, e.to_string()))?;
    let mut lines = LineIterator::new(reader);
    let mut records: Vec<IntervalRecord> = Vec::new();
    while let Some(line) = lines.next_line() {
        let line = line.map_err(|e| CoverageError::source_unavailable(&label, e.to_string()))?;
        let rec = parse_bedgraph_line(line.as_bytes()).map_err(|e| {
            CoverageError::source_unavailable(&label, e.reason)
        })?;
        records.push(rec);
    }
    Ok(MemorySource::from_records(label, records))
}

fn setup(dir: &Path) -> std::path::PathBuf {
    let regions = dir.join("targets.bed");
    let mut f = File::create(&regions).unwrap();
    writeln!(f, "chr1\t100\t105").unwrap();
    writeln!(f, "chr1\t10\t12").unwrap();
    writeln!(f, "chr2\t0\t0").unwrap();
    drop(f);

    let cov = dir.join("cov");
    std::fs::create_dir(&cov).unwrap();
    write_gz(
        &cov.join("s1.per-base.bed.gz"),
        &["chr1\t0\t10\t7", "chr1\t10\t98\t1", "chr1\t98\t102\t3", "chr1\t102\t200\t0"],
    );
    write_gz(&cov.join("s2.per-base.bed.gz"), &["chr1\t100\t105\t2"]);
    write_gz(&cov.join("ignored.regions.bed.gz"), &["chr1\t0\t1000\t100"]);
    regions
}

#[test]
fn test_pipeline_array_output() {
    let dir = tempdir().unwrap();
    let regions_path = setup(dir.path());

    let regions = load_region_set(&regions_path).unwrap();
    let files = discover_sources(&dir.path().join("cov"), DEFAULT_PATTERN).unwrap();
    assert_eq!(files.len(), 2);

    let (regions, stats) =
        accumulate_from_paths(&files, regions, open_in_memory, AccumulateOptions::default()).unwrap();
    assert_eq!(stats.sources, 2);

    let mut out = Vec::new();
    write_depths(&mut out, &regions, DepthFormat::Array).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Region 0: chr1:100-105, Depth: [5, 5, 2, 2, 2]\n\
         Region 1: chr1:10-12, Depth: [1, 1]\n\
         Region 2: chr2:0-0, Depth: []\n"
    );
}

#[test]
fn test_pipeline_parallel_equals_sequential() {
    let dir = tempdir().unwrap();
    let regions_path = setup(dir.path());
    let files = discover_sources(&dir.path().join("cov"), DEFAULT_PATTERN).unwrap();

    let (seq, _) = accumulate_from_paths(
        &files,
        load_region_set(&regions_path).unwrap(),
        open_in_memory,
        AccumulateOptions { threads: 1 },
    )
    .unwrap();
    let (par, _) = accumulate_from_paths(
        &files,
        load_region_set(&regions_path).unwrap(),
        open_in_memory,
        AccumulateOptions { threads: 4 },
    )
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn test_pipeline_bad_value_fails_whole_run() {
    let dir = tempdir().unwrap();
    let regions_path = setup(dir.path());
    write_gz(
        &dir.path().join("cov").join("s3.per-base.bed.gz"),
        &["chr1\t101\t103\tNaN"],
    );
    let files = discover_sources(&dir.path().join("cov"), DEFAULT_PATTERN).unwrap();

    for threads in [1, 3] {
        let result = accumulate_from_paths(
            &files,
            load_region_set(&regions_path).unwrap(),
            open_in_memory,
            AccumulateOptions { threads },
        );
        match result {
            Err(CoverageError::MalformedInterval { source_name, .. }) => {
                assert!(source_name.ends_with("s3.per-base.bed.gz"));
            }
            other => panic!("expected MalformedInterval, got {:?}", other.map(|(_, s)| s)),
        }
    }
}

#[cfg(feature = "tabix")]
#[test]
fn test_pipeline_missing_index_is_unavailable() {
    use region_depth::TabixSource;

    let dir = tempdir().unwrap();
    let regions_path = setup(dir.path());
    let files = discover_sources(&dir.path().join("cov"), DEFAULT_PATTERN).unwrap();

    let err = accumulate_from_paths(
        &files,
        load_region_set(&regions_path).unwrap(),
        |p: &Path| TabixSource::open(p),
        AccumulateOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CoverageError::SourceUnavailable { .. }));
}
