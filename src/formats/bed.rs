//! Region definition reader
//!
//! Reads BED3+ region files (plain, gzip or bzip2) into `(chrom, start, stop)`
//! triples. Only the first three columns are interpreted.

use crate::core::io::{open_text, LineIterator};
use crate::core::{RegionFileError, RegionFileResult, RegionSet, Result};
use memchr::memchr;
use std::io::BufRead;
use std::path::Path;

/// A region definition as read from a BED line
pub type RegionTriple = (String, u64, u64);

/// BED coordinates borrowed from a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedRegionView<'a> {
    pub chrom: &'a str,
    pub start: u64,
    pub end: u64,
}

impl<'a> BedRegionView<'a> {
    /// Parse the first three tab-separated fields of a BED line
    pub fn parse(line: &'a str) -> std::result::Result<Self, String> {
        let bytes = line.as_bytes();
        let mut bounds = [(0usize, 0usize); 3];
        let mut pos = 0;

        for (i, bound) in bounds.iter_mut().enumerate() {
            if pos > bytes.len() {
                return Err(format!("expected at least 3 fields, found {}", i));
            }
            let end = match memchr(b'\t', &bytes[pos..]) {
                Some(tab) => pos + tab,
                None if i == 2 => bytes.len(),
                None => return Err(format!("expected at least 3 fields, found {}", i + 1)),
            };
            *bound = (pos, end);
            pos = end + 1;
        }

        let field = |i: usize| &line[bounds[i].0..bounds[i].1];
        let chrom = field(0);
        if chrom.is_empty() {
            return Err("empty chromosome name".to_string());
        }
        let start: u64 = field(1)
            .trim()
            .parse()
            .map_err(|_| format!("invalid start '{}'", field(1)))?;
        let end: u64 = field(2)
            .trim()
            .parse()
            .map_err(|_| format!("invalid end '{}'", field(2)))?;
        if end < start {
            return Err(format!("end ({}) is before start ({})", end, start));
        }

        Ok(Self { chrom, start, end })
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

/// Read region triples from a BED stream, preserving order
pub fn read_regions<R: BufRead>(reader: R) -> RegionFileResult<Vec<RegionTriple>> {
    let mut lines = LineIterator::new(reader);
    let mut regions = Vec::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line() {
        let line = line?;
        line_number += 1;
        let trimmed = line.trim_end();
        if trimmed.trim().is_empty() || is_header(trimmed) {
            continue;
        }
        let view = BedRegionView::parse(trimmed).map_err(|message| RegionFileError::InvalidBed {
            line: line_number,
            message,
        })?;
        regions.push((view.chrom.to_string(), view.start, view.end));
    }

    Ok(regions)
}

/// Read region triples from a BED file
pub fn read_region_file<P: AsRef<Path>>(path: P) -> RegionFileResult<Vec<RegionTriple>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RegionFileError::FileNotFound(path.to_path_buf()));
    }
    let regions = read_regions(open_text(path)?)?;
    log::info!("Loaded {} regions from {}", regions.len(), path.display());
    Ok(regions)
}

/// Read a BED file straight into a zeroed [`RegionSet`]
pub fn load_region_set<P: AsRef<Path>>(path: P) -> Result<RegionSet> {
    let triples = read_region_file(path)?;
    Ok(RegionSet::new(triples)?)
}
