//! Core depth aggregation functionality
//!
//! This module contains the region model, the interval source contract,
//! and the accumulation algorithms.

mod accumulator;
mod error;
mod interval;
pub mod io;
mod region;

pub use accumulator::{
    accumulate_from_paths, accumulate_from_source, accumulate_from_sources,
    accumulate_source_into, normalize, AccumulateOptions, AccumulateStats,
};
pub use error::{
    CoverageError, CoverageResult, RegionDepthError, RegionFileError, RegionFileResult, Result,
};
pub use interval::{parse_bedgraph_line, IntervalRecord, IntervalSource, LineParseError};
pub use region::{Depth, Region, RegionSet};
