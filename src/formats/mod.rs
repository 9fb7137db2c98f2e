//! File format adapters
//!
//! Region definition input (BED) and depth result output.

pub mod bed;
pub mod render;

pub use bed::{load_region_set, read_region_file, read_regions, BedRegionView, RegionTriple};
pub use render::{write_depths, DepthFormat, RenderStats};
