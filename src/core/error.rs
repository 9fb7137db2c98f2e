//! Error types for RegionDepth
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for RegionDepth operations
#[derive(Debug, Error)]
pub enum RegionDepthError {
    /// Depth aggregation errors
    #[error("Coverage error: {0}")]
    Coverage(#[from] CoverageError),

    /// Region definition file errors
    #[error("Region file error: {0}")]
    RegionFile(#[from] RegionFileError),
}

/// Errors that can occur while building region sets or accumulating depth
#[derive(Debug, Error)]
pub enum CoverageError {
    /// Region with stop < start, or too long to hold in memory
    #[error("Invalid region #{index} {chrom}:{start}-{stop}: {reason}")]
    InvalidRegion {
        index: usize,
        chrom: String,
        start: u64,
        stop: u64,
        reason: String,
    },

    /// Interval source cannot be opened, lacks an index, or failed a query
    #[error("Interval source unavailable: {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// Interval record with an unparseable value or non-positive width
    #[error("Malformed interval from {source_name} ({chrom}:{start}-{end}) while processing region {region}: {reason}")]
    MalformedInterval {
        source_name: String,
        region: String,
        chrom: String,
        start: u64,
        end: u64,
        reason: String,
    },

    /// Depth counter overflow
    #[error("Depth overflow in region {region} at offset {offset}")]
    DepthOverflow { region: String, offset: usize },

    /// Two region sets with different layouts were merged
    #[error("Region set shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Errors that can occur while reading region definitions
#[derive(Debug, Error)]
pub enum RegionFileError {
    /// Invalid BED record
    #[error("Invalid BED format at line {line}: {message}")]
    InvalidBed { line: usize, message: String },

    /// Region file not found
    #[error("Region file not found: {0}")]
    FileNotFound(std::path::PathBuf),

    /// I/O error while reading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoverageError {
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CoverageError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// True for the variants that indicate bad interval data rather than bad wiring
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CoverageError::MalformedInterval { .. } | CoverageError::InvalidRegion { .. }
        )
    }
}

/// Result type alias for RegionDepth operations
pub type Result<T> = std::result::Result<T, RegionDepthError>;

/// Result type alias for accumulation operations
pub type CoverageResult<T> = std::result::Result<T, CoverageError>;

/// Result type alias for region file parsing
pub type RegionFileResult<T> = std::result::Result<T, RegionFileError>;
