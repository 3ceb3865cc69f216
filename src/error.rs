use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
/// Error raised while writing CSV records
pub enum CsvWriterError {
    /// The file write primitive reported a failure.
    #[error("Failed to write to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A field value could not be turned into text.
    #[error("Failed to stringify field '{field}': {source}")]
    Stringify {
        field: String,
        #[source]
        source: StringifyError,
    },

    #[error("Writer is closed")]
    Closed,

    #[error("Write worker terminated: {0}")]
    Worker(String),

    #[error("Invalid writer configuration: {0}")]
    Config(String),
}

impl CsvWriterError {
    /// Returns the underlying I/O error when this is a write failure.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            CsvWriterError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error returned by a [`Stringifier`](crate::core::item::Stringifier).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct StringifyError(pub String);

impl StringifyError {
    pub fn new(message: impl Into<String>) -> Self {
        StringifyError(message.into())
    }
}
