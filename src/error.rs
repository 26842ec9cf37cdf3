//! Error types for package writing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("No version given for package '{id}'")]
    MissingVersion { id: String },

    #[error("Could not find source file or directory: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Cannot create output file {}: {source}", path.display())]
    OutputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Timestamp outside the ZIP date range: {0}")]
    InvalidTimestamp(String),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for PackError {
    fn from(err: quick_xml::Error) -> Self {
        PackError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
