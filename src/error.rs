use thiserror::Error;

/// Error type for gxftree operations.
#[derive(Debug, Error)]
pub enum GxfTreeError {
    /// A gene or pseudogene line carries attributes but no `ID`.
    #[error("line {line}: gene feature without an ID attribute: {attributes:?}")]
    MissingGeneId { line: usize, attributes: String },
    /// Input extension is missing or not supported.
    #[error("unsupported input extension: {0}")]
    UnsupportedExtension(String),
    /// Wraps standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for gxftree operations.
pub type Result<T> = std::result::Result<T, GxfTreeError>;
