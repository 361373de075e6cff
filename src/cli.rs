//! Rebuild gene/transcript/CDS/exon hierarchies from GFF3 and GTF files
//! Alejandro Gonzales-Irribarren, 2025

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::builder::PseudogeneScope;

#[derive(Parser, Debug)]
#[clap(
    name = "gxftree",
    version = env!("CARGO_PKG_VERSION"),
    author = "Alejandro Gonzales-Irribarren <alejandrxgzi@gmail.com>",
    about = "rebuild gene/transcript/CDS/exon hierarchies from GFF3 and GTF files"
)]
pub struct Args {
    /// Annotation to resolve.
    ///
    /// GFF3 (.gff, .gff3) or GTF (.gtf), optionally gzipped (.gz).
    #[clap(
        short = 'i',
        long = "input",
        help = "Path to GFF3/GTF file",
        value_name = "GXF",
        required = true
    )]
    pub input: PathBuf,

    /// Optional TSV dump of the hierarchy, one row per location.
    #[clap(
        short = 'o',
        long = "output",
        help = "Path to output TSV file",
        value_name = "TSV"
    )]
    pub output: Option<PathBuf>,

    /// How pseudogene ids are remembered across contigs.
    #[clap(
        long = "pseudogene-scope",
        help = "Key pseudogene ids globally or per contig",
        value_enum,
        default_value_t = PseudogeneScope::Global
    )]
    pub pseudogene_scope: PseudogeneScope,

    /// Sort location lists by coordinate before writing.
    #[clap(short = 's', long = "sort", help = "Sort locations before writing")]
    pub sort: bool,

    /// Log every skipped line.
    #[clap(short = 'v', long = "verbose", help = "Enable debug logging")]
    pub verbose: bool,
}

impl Args {
    /// Checks all the arguments for validity using validate_args()
    pub fn check(&self) -> Result<(), ArgError> {
        self.validate_args()
    }

    /// The input file must exist and not be empty.
    fn check_input(&self) -> Result<(), ArgError> {
        match std::fs::metadata(&self.input) {
            Err(_) => Err(ArgError::InvalidInput(format!(
                "file {:?} does not exist",
                self.input
            ))),
            Ok(meta) if meta.len() == 0 => Err(ArgError::InvalidInput(format!(
                "file {:?} is empty",
                self.input
            ))),
            Ok(_) => Ok(()),
        }
    }

    /// The output file, if any, must be a TSV file.
    fn check_output(&self) -> Result<(), ArgError> {
        let Some(output) = &self.output else {
            return Ok(());
        };

        match output.extension().and_then(|ext| ext.to_str()) {
            Some("tsv") => Ok(()),
            _ => Err(ArgError::InvalidOutput(format!(
                "file {:?} is not a TSV file",
                output
            ))),
        }
    }

    /// Validates all the arguments
    fn validate_args(&self) -> Result<(), ArgError> {
        self.check_input()?;
        self.check_output()?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ArgError {
    /// The input file does not exist or is empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The output file is not a TSV file.
    #[error("Invalid output: {0}")]
    InvalidOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["gxftree", "-i", "annotation.gff3"]);
        assert_eq!(args.pseudogene_scope, PseudogeneScope::Global);
        assert!(args.output.is_none());
        assert!(!args.sort);
    }

    #[test]
    fn test_scope_and_output() {
        let args = Args::parse_from([
            "gxftree",
            "-i",
            "annotation.gtf",
            "-o",
            "tree.bed",
            "--pseudogene-scope",
            "contig",
        ]);
        assert_eq!(args.pseudogene_scope, PseudogeneScope::Contig);
        assert!(matches!(args.check_output(), Err(ArgError::InvalidOutput(_))));
    }

    #[test]
    fn test_missing_input() {
        let args = Args::parse_from(["gxftree", "-i", "/nonexistent/annotation.gff3"]);
        assert!(matches!(args.check(), Err(ArgError::InvalidInput(_))));
    }
}
