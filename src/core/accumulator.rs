//! Depth accumulation
//!
//! Clips every interval a source reports for a region into region-local
//! half-open offsets and adds its value into the region's accumulator.
//! Addition is commutative, so sources and regions can be processed in any
//! order, including in parallel over private buffers.

use crate::core::error::{CoverageError, CoverageResult};
use crate::core::interval::{IntervalRecord, IntervalSource};
use crate::core::region::{Depth, Region, RegionSet};
use rayon::prelude::*;
use std::ops::AddAssign;
use std::path::Path;

/// Settings for multi-source accumulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulateOptions {
    /// Number of sources processed concurrently (1 = sequential)
    pub threads: usize,
}

impl Default for AccumulateOptions {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// Per-call accounting
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AccumulateStats {
    /// Records returned by the source
    pub seen: usize,
    /// Records that overlapped the region and were added
    pub applied: usize,
    /// Records the source over-reported (no overlap after clipping)
    pub clipped: usize,
    /// Regions processed
    pub regions: usize,
    /// Sources processed
    pub sources: usize,
}

impl AddAssign for AccumulateStats {
    fn add_assign(&mut self, rhs: Self) {
        self.seen += rhs.seen;
        self.applied += rhs.applied;
        self.clipped += rhs.clipped;
        self.regions += rhs.regions;
        self.sources += rhs.sources;
    }
}

/// Clip `[start, end)` to region-local offsets, `None` when nothing overlaps
#[inline]
pub fn normalize(region_start: u64, region_len: usize, start: u64, end: u64) -> Option<(usize, usize)> {
    let norm_start = start.saturating_sub(region_start);
    let norm_end = end.saturating_sub(region_start).min(region_len as u64);
    if norm_end <= norm_start {
        None
    } else {
        Some((norm_start as usize, norm_end as usize))
    }
}

fn malformed(source: &str, region: &Region, rec: &IntervalRecord, reason: String) -> CoverageError {
    CoverageError::MalformedInterval {
        source_name: source.to_string(),
        region: region.to_string(),
        chrom: rec.chrom.clone(),
        start: rec.start,
        end: rec.end,
        reason,
    }
}

/// Add one source's contribution to one region
///
/// Zero-length regions return immediately without querying the source.
/// Records with `end <= start` or a non-integer value fail the call; records
/// that do not overlap after clipping (or sit on another chromosome) are
/// skipped.
pub fn accumulate_from_source<S: IntervalSource + ?Sized>(
    source: &mut S,
    region: &mut Region,
) -> CoverageResult<AccumulateStats> {
    let mut stats = AccumulateStats {
        regions: 1,
        ..Default::default()
    };
    if region.is_empty() {
        return Ok(stats);
    }

    let records = source.query(region.chrom(), region.start(), region.stop())?;
    stats.seen = records.len();

    for rec in &records {
        if rec.end <= rec.start {
            return Err(malformed(
                source.label(),
                region,
                rec,
                "non-positive interval width".to_string(),
            ));
        }
        let value: Depth = rec.value.trim().parse().map_err(|_| {
            malformed(
                source.label(),
                region,
                rec,
                format!("value '{}' is not an integer", rec.value),
            )
        })?;

        let span = if rec.chrom == region.chrom() {
            normalize(region.start(), region.len(), rec.start, rec.end)
        } else {
            None
        };
        let Some((norm_start, norm_end)) = span else {
            stats.clipped += 1;
            continue;
        };

        let (region_start, region_stop) = (region.start(), region.stop());
        for (offset, slot) in region.depth_mut()[norm_start..norm_end].iter_mut().enumerate() {
            *slot = slot.checked_add(value).ok_or_else(|| CoverageError::DepthOverflow {
                region: format!("{}:{}-{}", rec.chrom, region_start, region_stop),
                offset: norm_start + offset,
            })?;
        }
        stats.applied += 1;
    }

    log::trace!(
        "{}: {} -> {} applied, {} clipped",
        source.label(),
        region,
        stats.applied,
        stats.clipped
    );
    Ok(stats)
}

/// Add one source's contribution to every region of a set
pub fn accumulate_source_into<S: IntervalSource + ?Sized>(
    source: &mut S,
    regions: &mut RegionSet,
) -> CoverageResult<AccumulateStats> {
    let mut stats = AccumulateStats {
        sources: 1,
        ..Default::default()
    };
    for (_, region) in regions.iter_mut() {
        stats += accumulate_from_source(source, region)?;
    }
    log::debug!(
        "{}: {} records seen, {} applied over {} regions",
        source.label(),
        stats.seen,
        stats.applied,
        stats.regions
    );
    Ok(stats)
}

/// Accumulate every source into every region
///
/// The set is returned only when every source succeeded, so a failed run
/// never yields partially aggregated depths.
pub fn accumulate_from_sources<S: IntervalSource>(
    sources: &mut [S],
    mut regions: RegionSet,
) -> CoverageResult<(RegionSet, AccumulateStats)> {
    let mut stats = AccumulateStats::default();
    for source in sources.iter_mut() {
        stats += accumulate_source_into(source, &mut regions)?;
    }
    Ok((regions, stats))
}

/// Open each path with `opener`, accumulate it, and drop the handle
///
/// With `options.threads > 1` sources are processed concurrently. Each worker
/// accumulates into a private zeroed copy of the set and the copies are summed
/// afterwards, so no accumulator is ever shared between threads.
/// The first open or accumulation failure aborts the whole run.
pub fn accumulate_from_paths<P, S, F>(
    paths: &[P],
    regions: RegionSet,
    opener: F,
    options: AccumulateOptions,
) -> CoverageResult<(RegionSet, AccumulateStats)>
where
    P: AsRef<Path> + Sync,
    S: IntervalSource,
    F: Fn(&Path) -> CoverageResult<S> + Sync,
{
    if options.threads > 1 && paths.len() > 1 {
        accumulate_from_paths_parallel(paths, regions, &opener, options.threads)
    } else {
        accumulate_from_paths_sequential(paths, regions, &opener)
    }
}

fn accumulate_from_paths_sequential<P, S, F>(
    paths: &[P],
    mut regions: RegionSet,
    opener: &F,
) -> CoverageResult<(RegionSet, AccumulateStats)>
where
    P: AsRef<Path>,
    S: IntervalSource,
    F: Fn(&Path) -> CoverageResult<S>,
{
    let mut stats = AccumulateStats::default();
    for (i, path) in paths.iter().enumerate() {
        log::info!("[{}/{}] {}", i + 1, paths.len(), path.as_ref().display());
        let mut source = opener(path.as_ref())?;
        stats += accumulate_source_into(&mut source, &mut regions)?;
    }
    Ok((regions, stats))
}

fn accumulate_from_paths_parallel<P, S, F>(
    paths: &[P],
    mut regions: RegionSet,
    opener: &F,
    threads: usize,
) -> CoverageResult<(RegionSet, AccumulateStats)>
where
    P: AsRef<Path> + Sync,
    S: IntervalSource,
    F: Fn(&Path) -> CoverageResult<S> + Sync,
{
    let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("Failed to create thread pool ({}), running sequentially", e);
            return accumulate_from_paths_sequential(paths, regions, opener);
        }
    };

    // One private buffer per worker split, summed pairwise at the end
    let (private, stats) = pool.install(|| {
        paths
            .par_iter()
            .try_fold(
                || (regions.empty_like(), AccumulateStats::default()),
                |(mut private, mut stats), path| -> CoverageResult<(RegionSet, AccumulateStats)> {
                    log::info!("{}", path.as_ref().display());
                    let mut source = opener(path.as_ref())?;
                    stats += accumulate_source_into(&mut source, &mut private)?;
                    Ok((private, stats))
                },
            )
            .try_reduce(
                || (regions.empty_like(), AccumulateStats::default()),
                |(mut left, mut left_stats), (right, right_stats)| {
                    left.merge_from(&right)?;
                    left_stats += right_stats;
                    Ok((left, left_stats))
                },
            )
    })?;

    regions.merge_from(&private)?;
    Ok((regions, stats))
}
