//! # gxftree
//!
//! Rebuild gene/transcript/CDS/exon hierarchies from GFF3 and GTF files.
//!
//! ## Usage
//!
//! ```bash
//! gxftree -i <INPUT> [OPTIONS]
//!
//! Required arguments:
//!   -i, --input <GXF>          Path to GFF3/GTF file (optionally .gz)
//!
//! Optional arguments:
//!   -o, --output <TSV>         Dump the hierarchy as TSV, one row per location
//!       --pseudogene-scope <SCOPE>  global | contig [default: global]
//!   -s, --sort                 Sort locations before writing
//!   -v, --verbose              Log every skipped line
//!   -h, --help                 Print help
//!   -V, --version              Print version
//! ```
//!
//! ## Examples
//!
//! ```bash
//! gxftree -i annotation.gff3 -o tree.tsv
//! gxftree -i augustus.gtf.gz --pseudogene-scope contig
//! ```
use clap::Parser;
use colored::Colorize;
use gxftree::{run, Args, Config};
use log::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { Level::Debug } else { Level::Info };
    simple_logger::init_with_level(level)?;
    log::debug!("{:?}", args);

    args.check()?;
    let config = Config::from_args(&args);

    let stats = run(&config)?;
    log::info!("{}", format!("Resolved {}", stats.hierarchy).green());
    if stats.warnings > 0 {
        log::warn!(
            "{}",
            format!("{} of {} lines dropped or incomplete", stats.warnings, stats.lines).yellow()
        );
    }
    log::info!("Elapsed: {:.4?} secs", stats.elapsed.as_secs_f32());

    Ok(())
}
