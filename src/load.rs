use crate::builder::{build_hierarchy, Resolved};
use crate::config::Config;
use crate::detect::{detect_input_kind, Compression};
use crate::dump::write_tsv;
use crate::error::Result;
use crate::hierarchy::HierarchyStats;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Summary of a resolver run.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    /// Wall clock time spent reading, resolving and writing.
    pub elapsed: Duration,
    /// Lines read from the input.
    pub lines: usize,
    /// Lines dropped or only partly used.
    pub warnings: usize,
    /// Shape of the resolved hierarchy.
    pub hierarchy: HierarchyStats,
}

/// Reads and resolves the configured input.
///
/// # Errors
///
/// Fails on unsupported extensions, I/O errors and gene lines without an
/// identifier.
///
/// # Example
///
/// ```rust, ignore
/// use gxftree::{load, Config};
///
/// let resolved = load(&Config::new("annotation.gff3"))?;
/// for (contig, _) in resolved.hierarchy.contigs() {
///     println!("{contig}");
/// }
/// ```
pub fn load(config: &Config) -> Result<Resolved> {
    let kind = detect_input_kind(&config.input)?;
    log::info!(
        "Reading {} input from {}",
        kind.format,
        config.input.display()
    );

    let reader = open_reader(&config.input, kind.compression)?;
    let mut resolved = build_hierarchy(reader, config.builder)?;

    if config.sort {
        resolved.hierarchy.sort_locations();
    }

    Ok(resolved)
}

/// Runs a full conversion: load, then dump when an output is configured.
pub fn run(config: &Config) -> Result<RunStats> {
    let start = Instant::now();

    let resolved = load(config)?;
    if let Some(output) = &config.output {
        write_output(output, &resolved)?;
    }

    Ok(RunStats {
        elapsed: start.elapsed(),
        lines: resolved.lines,
        warnings: resolved.warnings.len(),
        hierarchy: resolved.hierarchy.stats(),
    })
}

/// Opens a buffered reader, decompressing gzip input on the fly.
fn open_reader(path: &Path, compression: Compression) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if compression.is_compressed() {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

fn write_output(path: &Path, resolved: &Resolved) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(256 * 1024, file);
    write_tsv(&resolved.hierarchy, &mut writer)?;
    writer.flush()?;
    Ok(())
}
