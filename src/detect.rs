use crate::error::{GxfTreeError, Result};
use std::path::{Path, PathBuf};

/// Supported annotation formats.
///
/// Both are read by the same resolver; the format is only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Gtf,
    Gff,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InputFormat::Gtf => write!(f, "GTF"),
            InputFormat::Gff => write!(f, "GFF3"),
        }
    }
}

/// Supported compression formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    /// Returns true when the input is compressed.
    pub fn is_compressed(self) -> bool {
        !matches!(self, Compression::None)
    }
}

/// Describes the detected input kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputKind {
    pub format: InputFormat,
    pub compression: Compression,
}

/// Detects input format and compression from the file extension(s).
///
/// Handles nested extensions like `.gff3.gz`.
///
/// # Errors
///
/// Returns [`GxfTreeError::UnsupportedExtension`] for anything other than
/// `.gtf`, `.gff` or `.gff3`, optionally followed by `.gz`.
///
/// # Example
///
/// ```rust, ignore
/// use gxftree::detect::detect_input_kind;
/// use std::path::Path;
///
/// let kind = detect_input_kind(Path::new("file.gff3.gz"))?;
/// assert!(kind.compression.is_compressed());
/// ```
pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    let unsupported = || GxfTreeError::UnsupportedExtension(path.display().to_string());
    let ext = extension_lowercase(path).ok_or_else(unsupported)?;

    let (ext, compression) = match ext.as_str() {
        "gz" | "gzip" => (nested_extension(path).ok_or_else(unsupported)?, Compression::Gzip),
        _ => (ext, Compression::None),
    };

    let format = format_from_extension(&ext).ok_or_else(unsupported)?;
    Ok(InputKind {
        format,
        compression,
    })
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn format_from_extension(ext: &str) -> Option<InputFormat> {
    match ext {
        "gtf" => Some(InputFormat::Gtf),
        "gff" | "gff3" => Some(InputFormat::Gff),
        _ => None,
    }
}

/// Inner extension of a compressed file (`.gtf.gz` -> `gtf`).
fn nested_extension(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    extension_lowercase(&PathBuf::from(stem))
}
