//! Errors reported by the evaluator entry points.

use std::path::PathBuf;

use thiserror::Error;

use crate::board::{Color, FenError};
use crate::nnue::NetworkError;

#[derive(Debug, Error)]
pub enum Error {
    /// The network file is unreadable or does not match the expected format.
    #[error("corrupt network file {}", path.display())]
    CorruptFile {
        path: PathBuf,
        #[source]
        source: NetworkError,
    },
    /// The file is an NNUE network of a format version this crate cannot read.
    #[error("network file {} uses unsupported format version 0x{version:08X}", path.display())]
    UnsupportedVersion { path: PathBuf, version: u32 },
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenError),
    #[error("evaluator is not initialized")]
    NotInitialized,
    #[error("evaluator is already initialized")]
    AlreadyInitialized,
    /// A board handed to the evaluator breaks the one-king-per-side rule.
    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },
    #[error("invalid piece list: {reason}")]
    InvalidPieceList { reason: String },
}

impl Error {
    /// Attach `path` to a loader failure.
    pub(crate) fn from_network(path: impl Into<PathBuf>, err: NetworkError) -> Self {
        let path = path.into();
        match err {
            NetworkError::UnsupportedVersion { found } => Error::UnsupportedVersion {
                path,
                version: found,
            },
            source => Error::CorruptFile { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
