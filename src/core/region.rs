//! Target regions and their depth accumulators

use crate::core::error::{CoverageError, CoverageResult};
use std::fmt;

/// Per-base depth counter
pub type Depth = i64;

/// A caller-defined span with its per-base depth accumulator
///
/// Coordinates are 0-based half-open: `[start, stop)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    chrom: String,
    start: u64,
    stop: u64,
    depth: Vec<Depth>,
}

impl Region {
    /// Create a region with a zeroed accumulator
    pub fn new(chrom: impl Into<String>, start: u64, stop: u64) -> CoverageResult<Self> {
        Self::checked(0, chrom.into(), start, stop)
    }

    fn checked(index: usize, chrom: String, start: u64, stop: u64) -> CoverageResult<Self> {
        let invalid = |chrom: String, reason: &str| CoverageError::InvalidRegion {
            index,
            chrom,
            start,
            stop,
            reason: reason.to_string(),
        };
        if stop < start {
            return Err(invalid(chrom, "stop is before start"));
        }
        let len = match usize::try_from(stop - start) {
            Ok(len) => len,
            Err(_) => return Err(invalid(chrom, "length exceeds addressable memory")),
        };
        let mut depth = Vec::new();
        if depth.try_reserve_exact(len).is_err() {
            return Err(invalid(chrom, "cannot allocate depth accumulator"));
        }
        depth.resize(len, 0);
        Ok(Self {
            chrom,
            start,
            stop,
            depth,
        })
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// 0-based inclusive start
    pub fn start(&self) -> u64 {
        self.start
    }

    /// 0-based exclusive stop
    pub fn stop(&self) -> u64 {
        self.stop
    }

    /// Number of bases covered by the region
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Accumulated depth, one value per base offset
    pub fn depth(&self) -> &[Depth] {
        &self.depth
    }

    /// Mutable view of the accumulator. The slice cannot be resized.
    pub fn depth_mut(&mut self) -> &mut [Depth] {
        &mut self.depth
    }

    /// Same coordinates, zeroed accumulator
    pub fn empty_like(&self) -> Self {
        Self {
            chrom: self.chrom.clone(),
            start: self.start,
            stop: self.stop,
            depth: vec![0; self.depth.len()],
        }
    }

    /// Add another region's accumulator pointwise
    pub fn merge_from(&mut self, other: &Region) -> CoverageResult<()> {
        if self.chrom != other.chrom || self.start != other.start || self.stop != other.stop {
            return Err(CoverageError::ShapeMismatch(format!(
                "cannot merge {} into {}",
                other, self
            )));
        }
        for (offset, (dst, src)) in self.depth.iter_mut().zip(&other.depth).enumerate() {
            *dst = dst.checked_add(*src).ok_or_else(|| CoverageError::DepthOverflow {
                region: format!("{}:{}-{}", self.chrom, self.start, self.stop),
                offset,
            })?;
        }
        Ok(())
    }

    pub fn into_depth(self) -> Vec<Depth> {
        self.depth
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.stop)
    }
}

/// Ordered collection of regions
///
/// Insertion order is the output order. Regions may overlap or repeat; each
/// one accumulates independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Build a region set from `(chrom, start, stop)` triples
    ///
    /// Fails on the first entry with `stop < start`; no partial set is returned.
    pub fn new<S: Into<String>>(triples: Vec<(S, u64, u64)>) -> CoverageResult<Self> {
        let regions = triples
            .into_iter()
            .enumerate()
            .map(|(index, (chrom, start, stop))| Region::checked(index, chrom.into(), start, stop))
            .collect::<CoverageResult<Vec<_>>>()?;
        Ok(Self { regions })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// `(index, region)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Region)> + '_ {
        self.regions.iter().enumerate()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Region)> + '_ {
        self.regions.iter_mut().enumerate()
    }

    /// Sum of all region lengths
    pub fn total_bases(&self) -> u64 {
        self.regions.iter().map(|r| r.len() as u64).sum()
    }

    /// Same regions with fresh zeroed accumulators
    pub fn empty_like(&self) -> Self {
        Self {
            regions: self.regions.iter().map(Region::empty_like).collect(),
        }
    }

    /// Pointwise sum of another set with the same layout into this one
    pub fn merge_from(&mut self, other: &RegionSet) -> CoverageResult<()> {
        if self.len() != other.len() {
            return Err(CoverageError::ShapeMismatch(format!(
                "expected {} regions, got {}",
                self.len(),
                other.len()
            )));
        }
        for (dst, src) in self.regions.iter_mut().zip(&other.regions) {
            dst.merge_from(src)?;
        }
        Ok(())
    }

    /// Accumulators in input order
    pub fn depths(&self) -> impl Iterator<Item = &[Depth]> + '_ {
        self.regions.iter().map(Region::depth)
    }

    pub fn into_depths(self) -> Vec<Vec<Depth>> {
        self.regions.into_iter().map(Region::into_depth).collect()
    }
}
