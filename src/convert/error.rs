//! Conversion errors

use std::path::PathBuf;

use thiserror::Error;

use crate::xspf::XspfError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input {} doesn't exist", .0.display())]
    MissingInput(PathBuf),

    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("row on line {line} has {columns} columns, expected at least {expected}")]
    MalformedRow {
        line: u64,
        columns: usize,
        expected: usize,
    },

    #[error("failed to read playlist document {}", path.display())]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid playlist document: {0}")]
    Metadata(#[source] XspfError),

    #[error("failed to build playlist: {0}")]
    Playlist(#[source] XspfError),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
