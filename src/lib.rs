//! # gxftree
//!
//! Rebuild the gene → transcript → CDS/exon hierarchy that a GFF3 or GTF file
//! only encodes implicitly, line by line.
//!
//! The resolver is a single forward pass. Each line is classified by its
//! feature type, its attribute column is parsed (GFF3 `key=value`, GTF
//! `key "value"` or a bare Augustus-style id), and its parent is found
//! through `Parent`/`transcript_id` and a running transcript → gene table.
//! Multi-line CDS and exon features accumulate their locations in file order.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use gxftree::{build_hierarchy, BuilderOptions, GeneClass, TranscriptKind};
//!
//! let gff = "chr1\tsrc\tgene\t1\t500\t.\t+\t.\tID=g1\n\
//!            chr1\tsrc\tmRNA\t1\t500\t.\t+\t.\tID=g1.t1;Parent=g1\n\
//!            chr1\tsrc\tCDS\t100\t200\t.\t+\t0\tParent=g1.t1;protein_id=P1\n";
//!
//! let resolved = build_hierarchy(gff.as_bytes(), BuilderOptions::default())?;
//! let tx = resolved
//!     .hierarchy
//!     .contig("chr1")
//!     .and_then(|c| c.gene(GeneClass::Gene, "g1"))
//!     .and_then(|g| g.transcript(TranscriptKind::Mrna, "g1.t1"))
//!     .unwrap();
//! assert_eq!(tx.cds().unwrap().protein_id(), Some("P1"));
//! ```
//!
//! ### Reading a file
//!
//! ```rust, ignore
//! use gxftree::{run, Config};
//!
//! let mut config = Config::new("annotation.gff3.gz");
//! config.output = Some("tree.tsv".into());
//!
//! let stats = run(&config)?;
//! println!("{} ({} lines dropped)", stats.hierarchy, stats.warnings);
//! ```

pub mod builder;
pub mod classify;
pub mod cli;
pub mod config;
pub mod detect;
pub mod dump;
pub mod error;
pub mod gxf;
pub mod hierarchy;
pub mod load;
pub mod resolve;

pub use builder::{
    build_hierarchy, BuilderOptions, HierarchyBuilder, PseudogeneScope, Resolved, Warning,
    WarningKind,
};
pub use cli::Args;
pub use config::Config;
pub use error::{GxfTreeError, Result};
pub use gxf::{Location, Strand};
pub use hierarchy::{
    ContigRecord, FeatureHierarchy, GeneClass, GeneRecord, HierarchyStats, SegmentKind,
    SegmentRecord, TranscriptKind, TranscriptRecord,
};
pub use load::{load, run, RunStats};
pub use resolve::{ParentResolution, TranscriptLookup};
