//! In-memory interval source
//!
//! Uses rust-lapper for O(log n + k) interval queries.

use crate::core::{CoverageResult, IntervalRecord, IntervalSource};
use rust_lapper::{Interval, Lapper};
use std::collections::HashMap;

/// Interval source over records already held in memory
///
/// Handy for tests, benchmarks and small pre-filtered inputs. Records are
/// returned as given, including malformed ones, so the accumulator sees
/// exactly what a file-backed source would hand it.
pub struct MemorySource {
    label: String,
    maps: HashMap<String, Lapper<u64, String>>,
    /// Records with `end <= start` cannot live in the tree
    degenerate: HashMap<String, Vec<IntervalRecord>>,
}

impl MemorySource {
    pub fn from_records(label: impl Into<String>, records: Vec<IntervalRecord>) -> Self {
        let mut by_chrom: HashMap<String, Vec<Interval<u64, String>>> = HashMap::new();
        let mut degenerate: HashMap<String, Vec<IntervalRecord>> = HashMap::new();

        for rec in records {
            if rec.end <= rec.start {
                degenerate.entry(rec.chrom.clone()).or_default().push(rec);
                continue;
            }
            by_chrom.entry(rec.chrom).or_default().push(Interval {
                start: rec.start,
                stop: rec.end,
                val: rec.value,
            });
        }

        let maps = by_chrom
            .into_iter()
            .map(|(chrom, intervals)| (chrom, Lapper::new(intervals)))
            .collect();

        Self {
            label: label.into(),
            maps,
            degenerate,
        }
    }
}

impl IntervalSource for MemorySource {
    fn label(&self) -> &str {
        &self.label
    }

    fn query(&mut self, chrom: &str, start: u64, stop: u64) -> CoverageResult<Vec<IntervalRecord>> {
        let mut out: Vec<IntervalRecord> = match self.maps.get(chrom) {
            Some(lapper) => lapper
                .find(start, stop)
                .map(|iv| IntervalRecord::new(chrom, iv.start, iv.stop, iv.val.clone()))
                .collect(),
            None => Vec::new(),
        };
        if let Some(bad) = self.degenerate.get(chrom) {
            out.extend(
                bad.iter()
                    .filter(|r| r.start >= start && r.start <= stop)
                    .cloned(),
            );
        }
        Ok(out)
    }
}
