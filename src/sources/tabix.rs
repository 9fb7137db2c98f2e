//! Tabix/CSI indexed bedGraph source
//!
//! Uses rust-htslib for random access into bgzip-compressed coverage files
//! such as mosdepth `*.per-base.bed.gz`.

use crate::core::{parse_bedgraph_line, CoverageError, CoverageResult, IntervalRecord, IntervalSource};
use crate::sources::discover::has_index;
use rust_htslib::tbx::{self, Read as TbxRead};
use std::collections::HashSet;
use std::path::Path;

/// An open, indexed bedGraph file
pub struct TabixSource {
    label: String,
    reader: tbx::Reader,
    line: Vec<u8>,
    missing_chroms: HashSet<String>,
}

impl TabixSource {
    /// Open a bgzip-compressed bedGraph with an index next to it
    ///
    /// Fails with `SourceUnavailable` when the file or its `.csi`/`.tbi`
    /// index is missing, or htslib cannot open them.
    pub fn open<P: AsRef<Path>>(path: P) -> CoverageResult<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();

        if !path.is_file() {
            return Err(CoverageError::source_unavailable(label, "file not found"));
        }
        if !has_index(path) {
            return Err(CoverageError::source_unavailable(label, "missing .csi/.tbi index"));
        }

        let reader = tbx::Reader::from_path(path)
            .map_err(|e| CoverageError::source_unavailable(&label, e.to_string()))?;
        log::debug!("Opened {}", label);

        Ok(Self {
            label,
            reader,
            line: Vec::with_capacity(256),
            missing_chroms: HashSet::new(),
        })
    }

    /// Sequence names present in the index
    pub fn seqnames(&self) -> Vec<String> {
        self.reader.seqnames()
    }
}

impl IntervalSource for TabixSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn query(&mut self, chrom: &str, start: u64, stop: u64) -> CoverageResult<Vec<IntervalRecord>> {
        // A chromosome the file never saw has zero coverage
        let tid = match self.reader.tid(chrom) {
            Ok(tid) => tid,
            Err(_) => {
                if self.missing_chroms.insert(chrom.to_string()) {
                    log::warn!("{}: no records for chromosome {}", self.label, chrom);
                }
                return Ok(Vec::new());
            }
        };

        self.reader
            .fetch(tid, start, stop)
            .map_err(|e| CoverageError::source_unavailable(&self.label, format!("fetch {}:{}-{}: {}", chrom, start, stop, e)))?;

        let mut records = Vec::new();
        loop {
            self.line.clear();
            let more = self
                .reader
                .read(&mut self.line)
                .map_err(|e| CoverageError::source_unavailable(&self.label, e.to_string()))?;
            if !more {
                break;
            }
            let rec = parse_bedgraph_line(&self.line).map_err(|e| CoverageError::MalformedInterval {
                source_name: self.label.clone(),
                region: format!("{}:{}-{}", chrom, start, stop),
                chrom: e.chrom,
                start: e.start,
                end: e.end,
                reason: e.reason,
            })?;
            records.push(rec);
        }
        Ok(records)
    }
}
