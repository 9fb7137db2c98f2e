//! Depth result writers

use crate::core::RegionSet;
use std::io::{self, Write};

/// Output layout for accumulated depths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthFormat {
    /// One line per region: `Region {i}: chrom:start-stop, Depth: [..]`
    #[default]
    Array,
    /// One `chrom\tpos\tdepth` line per base, 0-based positions
    Tsv,
}

/// Output statistics
#[derive(Debug, Default, Clone)]
pub struct RenderStats {
    pub regions: usize,
    pub bases: u64,
}

/// Write every region's depth in input order
pub fn write_depths<W: Write>(
    writer: &mut W,
    regions: &RegionSet,
    format: DepthFormat,
) -> io::Result<RenderStats> {
    let mut stats = RenderStats::default();

    for (i, region) in regions.iter() {
        match format {
            DepthFormat::Array => {
                write!(writer, "Region {}: {}, Depth: [", i, region)?;
                for (offset, depth) in region.depth().iter().enumerate() {
                    if offset > 0 {
                        writer.write_all(b", ")?;
                    }
                    write!(writer, "{}", depth)?;
                }
                writer.write_all(b"]\n")?;
            }
            DepthFormat::Tsv => {
                for (pos, depth) in (region.start()..region.stop()).zip(region.depth()) {
                    writeln!(writer, "{}\t{}\t{}", region.chrom(), pos, depth)?;
                }
            }
        }
        stats.regions += 1;
        stats.bases += region.len() as u64;
    }

    writer.flush()?;
    Ok(stats)
}
