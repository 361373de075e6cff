use crate::builder::{BuilderOptions, PseudogeneScope};
use crate::cli::Args;
use std::path::PathBuf;

/// Normalized configuration for a resolver run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Input GFF3/GTF path, optionally gzipped.
    pub input: PathBuf,
    /// Optional TSV dump of the resolved hierarchy.
    pub output: Option<PathBuf>,
    /// Resolver options.
    pub builder: BuilderOptions,
    /// Sort every location list before dumping.
    pub sort: bool,
}

impl Config {
    /// Builds a run config from CLI arguments.
    ///
    /// # Example
    ///
    /// ```rust, ignore
    /// use clap::Parser;
    /// use gxftree::{Args, Config};
    ///
    /// let args = Args::parse_from(["gxftree", "-i", "annotation.gff3"]);
    /// let config = Config::from_args(&args);
    /// ```
    pub fn from_args(args: &Args) -> Self {
        Self {
            input: args.input.clone(),
            output: args.output.clone(),
            builder: BuilderOptions {
                pseudogene_scope: args.pseudogene_scope,
            },
            sort: args.sort,
        }
    }

    /// Config reading `input` with default options and no dump.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            builder: BuilderOptions {
                pseudogene_scope: PseudogeneScope::Global,
            },
            sort: false,
        }
    }
}
