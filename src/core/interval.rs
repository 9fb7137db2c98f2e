//! Interval records and the indexed interval source contract

use crate::core::error::CoverageResult;
use memchr::memchr;

/// A coverage record as returned by an interval source
///
/// The value is kept as raw text; the accumulator parses it so that a bad
/// value surfaces as a malformed interval with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub value: String,
}

impl IntervalRecord {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, value: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            value: value.into(),
        }
    }
}

/// Random-access range queries over a sorted, indexed interval dataset
///
/// `query` must return every record whose `[start, end)` intersects
/// `[start, stop)` on `chrom`. Returning extra records (e.g. ones that only
/// touch the boundary) is allowed; missing one is not. Repeated queries on the
/// same handle must be supported.
pub trait IntervalSource {
    /// Name used in logs and error messages (usually the file path)
    fn label(&self) -> &str;

    fn query(&mut self, chrom: &str, start: u64, stop: u64) -> CoverageResult<Vec<IntervalRecord>>;
}

impl<S: IntervalSource + ?Sized> IntervalSource for Box<S> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn query(&mut self, chrom: &str, start: u64, stop: u64) -> CoverageResult<Vec<IntervalRecord>> {
        (**self).query(chrom, start, stop)
    }
}

/// Why a bedGraph line could not be turned into an [`IntervalRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineParseError {
    /// Whatever coordinates could be recovered, for error reporting
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub reason: String,
}

/// Split a bedGraph line (`chrom\tstart\tend\tvalue[\t...]`) into a record
pub fn parse_bedgraph_line(line: &[u8]) -> Result<IntervalRecord, LineParseError> {
    let mut fields: [&[u8]; 4] = [&[]; 4];
    let mut pos = 0;
    for i in 0..fields.len() {
        let rest = &line[pos.min(line.len())..];
        match memchr(b'\t', rest) {
            Some(tab) => {
                fields[i] = &rest[..tab];
                pos += tab + 1;
            }
            None if i == 3 => {
                fields[i] = rest;
            }
            None => {
                return Err(LineParseError {
                    chrom: String::from_utf8_lossy(if i == 0 { rest } else { fields[0] }).into_owned(),
                    start: 0,
                    end: 0,
                    reason: format!("expected at least 4 fields, found {}", i + 1),
                });
            }
        }
    }

    let chrom = String::from_utf8_lossy(fields[0]).into_owned();
    let coord = |raw: &[u8], name: &str| -> Result<u64, String> {
        std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .ok_or_else(|| format!("invalid {} '{}'", name, String::from_utf8_lossy(raw)))
    };
    let start = coord(fields[1], "start").map_err(|reason| LineParseError {
        chrom: chrom.clone(),
        start: 0,
        end: 0,
        reason,
    })?;
    let end = coord(fields[2], "end").map_err(|reason| LineParseError {
        chrom: chrom.clone(),
        start,
        end: 0,
        reason,
    })?;
    let value = String::from_utf8_lossy(fields[3]).trim_end().to_string();

    Ok(IntervalRecord {
        chrom,
        start,
        end,
        value,
    })
}
