//! RegionDepth - per-base depth over target regions
//!
//! Sums interval coverage values (bedGraph / mosdepth `per-base.bed.gz`)
//! from any number of indexed coverage files into one fixed-length depth
//! array per target region.
//!
//! # Features
//!
//! - Random access through tabix/CSI indices, never re-reading whole chromosomes
//! - Exact half-open clipping of intervals to region-local offsets
//! - Parallel multi-file accumulation with rayon
//! - Plain, gzip and bzip2 region files
//!
//! # Example
//!
//! ```ignore
//! use region_depth::{accumulate_from_paths, AccumulateOptions, RegionSet, TabixSource};
//!
//! let regions = RegionSet::new(vec![("chr1", 100, 105)])?;
//! let files = region_depth::sources::discover_sources("coverage/".as_ref(), "*.per-base.bed.gz")?;
//! let opener = |path: &std::path::Path| TabixSource::open(path);
//! let (regions, _stats) = accumulate_from_paths(&files, regions, opener, AccumulateOptions::default())?;
//! ```

pub mod core;
pub mod formats;
pub mod sources;

// Re-export commonly used types
pub use core::{
    accumulate_from_paths, accumulate_from_source, accumulate_from_sources, AccumulateOptions,
    AccumulateStats, CoverageError, Depth, IntervalRecord, IntervalSource, Region,
    RegionDepthError, RegionSet,
};
pub use sources::MemorySource;
#[cfg(feature = "tabix")]
pub use sources::TabixSource;
