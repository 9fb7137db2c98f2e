//! Interval source implementations
//!
//! Sources backing the [`IntervalSource`](crate::core::IntervalSource) contract
//! (tabix-indexed bedGraph files, in-memory records) and coverage file discovery.

pub mod discover;
mod memory;
#[cfg(feature = "tabix")]
pub mod tabix;

pub use discover::{discover_sources, has_index, DEFAULT_PATTERN};
pub use memory::MemorySource;
#[cfg(feature = "tabix")]
pub use tabix::TabixSource;
