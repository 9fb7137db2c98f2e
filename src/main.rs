//! RegionDepth CLI entry point
//!
//! Sums per-base coverage from a directory of indexed coverage files over the
//! regions of a BED file.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use region_depth::core::{accumulate_from_paths, AccumulateOptions, CoverageResult};
use region_depth::formats::{self, DepthFormat};
use region_depth::sources::{self, DEFAULT_PATTERN};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Output layout (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum FormatArg {
    /// One line per region with the full depth array
    #[default]
    #[value(name = "array")]
    Array,
    /// One chrom/pos/depth line per base
    #[value(name = "tsv")]
    Tsv,
}

impl From<FormatArg> for DepthFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Array => DepthFormat::Array,
            FormatArg::Tsv => DepthFormat::Tsv,
        }
    }
}

#[derive(Parser)]
#[command(name = "region-depth")]
#[command(about = "Per-base depth over target regions from indexed coverage files")]
#[command(version)]
#[command(author = "RegionDepth Contributors")]
struct Cli {
    /// Region definitions (BED, optionally gzip/bzip2 compressed)
    regions: PathBuf,
    /// Directory holding the bgzipped, indexed coverage files
    coverage_dir: PathBuf,
    /// File name pattern for coverage files
    #[arg(short = 'p', long, default_value = DEFAULT_PATTERN)]
    pattern: String,
    /// Number of coverage files processed concurrently
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,
    /// Output format
    #[arg(short = 'f', long, default_value = "array")]
    format: FormatArg,
    /// Output file (optional, stdout if not specified)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Log debug messages
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[cfg(feature = "tabix")]
fn open_source(path: &Path) -> CoverageResult<sources::TabixSource> {
    sources::TabixSource::open(path)
}

#[cfg(not(feature = "tabix"))]
fn open_source(path: &Path) -> CoverageResult<region_depth::MemorySource> {
    Err(region_depth::CoverageError::source_unavailable(
        path.display().to_string(),
        "built without the `tabix` feature",
    ))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
    let start = Instant::now();

    let regions = formats::load_region_set(&cli.regions)
        .with_context(|| format!("Failed to load regions from {:?}", cli.regions))?;

    let files = sources::discover_sources(&cli.coverage_dir, &cli.pattern)?;
    if files.is_empty() {
        bail!(
            "No coverage files matching '{}' in {:?}",
            cli.pattern,
            cli.coverage_dir
        );
    }
    eprintln!(
        "Accumulating {} coverage files over {} regions ({} bases)",
        files.len(),
        regions.len(),
        regions.total_bases()
    );

    let options = AccumulateOptions { threads: cli.threads };
    let (regions, stats) = match accumulate_from_paths(&files, regions, open_source, options) {
        Ok(done) => done,
        Err(e) => {
            if e.is_data_error() {
                log::error!("Coverage data is malformed; fix the input files and re-run");
            }
            return Err(anyhow::Error::new(e).context("Depth accumulation failed; no output written"));
        }
    };

    let render = match &cli.output {
        Some(path) => {
            let mut writer = BufWriter::with_capacity(128 * 1024, File::create(path)?);
            formats::write_depths(&mut writer, &regions, cli.format.into())?
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let stats = formats::write_depths(&mut writer, &regions, cli.format.into())?;
            writer.flush()?;
            stats
        }
    };

    eprintln!("\n=== Accumulation Statistics ===");
    eprintln!("Coverage files:  {}", stats.sources);
    eprintln!("Regions:         {}", render.regions);
    eprintln!("Bases:           {}", render.bases);
    eprintln!("Intervals seen:  {}", stats.seen);
    eprintln!("Applied:         {}", stats.applied);
    eprintln!("Clipped:         {}", stats.clipped);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
