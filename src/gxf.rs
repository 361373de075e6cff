mod attr;
pub use attr::*;

use thiserror::Error;

/// Minimum number of tab-separated columns of a feature line.
pub const MIN_COLUMNS: usize = 9;

/// One tab-separated feature line, borrowed from the input buffer.
///
/// Only the columns the hierarchy needs are kept; coordinates stay as raw
/// text until [`GxfRecord::location`] is asked for them.
#[derive(Debug, PartialEq)]
pub struct GxfRecord<'a> {
    pub seqid: &'a str,
    pub feature: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub strand: Strand,
    pub attributes: &'a str,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
}

impl Strand {
    pub fn from_column(column: &str) -> Self {
        match column.chars().next() {
            Some('+') => Strand::Forward,
            Some('-') => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}

/// A single interval as written in the file (1-based, closed).
///
/// Gene and RNA lines carry their strand; CDS, exon and bare transcript
/// lines do not.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Location {
    pub start: u64,
    pub end: u64,
    pub strand: Option<Strand>,
}

impl Location {
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            strand: None,
        }
    }

    pub fn stranded(start: u64, end: u64, strand: Strand) -> Self {
        Self {
            start,
            end,
            strand: Some(strand),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("expected at least 9 columns, found {0}")]
    TooFewColumns(usize),
    #[error("invalid coordinate: {0:?}")]
    Coordinate(String),
}

impl<'a> GxfRecord<'a> {
    pub fn parse(line: &'a str) -> Result<Self, LineError> {
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < MIN_COLUMNS {
            return Err(LineError::TooFewColumns(fields.len()));
        }

        Ok(Self {
            seqid: fields[0],
            feature: fields[2],
            start: fields[3],
            end: fields[4],
            strand: Strand::from_column(fields[6]),
            attributes: fields[8],
        })
    }

    /// Lookup key of the sequence this feature sits on.
    pub fn contig(&self) -> &'a str {
        contig_key(self.seqid)
    }

    /// Parses the coordinate columns, keeping the strand only when asked.
    pub fn location(&self, with_strand: bool) -> Result<Location, LineError> {
        let start = parse_coordinate(self.start)?;
        let end = parse_coordinate(self.end)?;

        Ok(Location {
            start,
            end,
            strand: with_strand.then_some(self.strand),
        })
    }
}

/// Strips any descriptive text following the sequence name.
///
/// Some assemblies ship seqids such as `Chr1 Arabidopsis chromosome 1`;
/// only `Chr1` identifies the contig.
pub fn contig_key(seqid: &str) -> &str {
    seqid
        .split_once(char::is_whitespace)
        .map_or(seqid, |(contig, _)| contig)
}

#[inline(always)]
fn parse_coordinate(column: &str) -> Result<u64, LineError> {
    column
        .trim()
        .parse::<u64>()
        .map_err(|_| LineError::Coordinate(column.to_string()))
}
