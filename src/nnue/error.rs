//! Network file errors.

use std::fmt;
use std::io;

use thiserror::Error;

/// Section of a network file, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Header,
    Description,
    Transformer,
    /// Affine layer `n` (0-based)
    Layer(usize),
    LayerStack,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header => f.write_str("header"),
            Section::Description => f.write_str("description"),
            Section::Transformer => f.write_str("feature transformer"),
            Section::Layer(n) => write!(f, "layer {n}"),
            Section::LayerStack => f.write_str("layer stack"),
        }
    }
}

/// Why a network file could not be loaded.
///
/// Everything except [`NetworkError::UnsupportedVersion`] means the file is
/// corrupt or unreadable.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("cannot read network file: {0}")]
    Unreadable(#[source] io::Error),
    #[error("not an NNUE file (header word 0x{found:08X})")]
    BadMagic { found: u32 },
    #[error("unsupported NNUE format version 0x{found:08X}")]
    UnsupportedVersion { found: u32 },
    #[error("{section} hash mismatch: expected 0x{expected:08X}, found 0x{found:08X}")]
    HashMismatch {
        section: Section,
        expected: u32,
        found: u32,
    },
    #[error("{section} needs {needed} bytes but only {remaining} remain")]
    Truncated {
        section: Section,
        needed: u64,
        remaining: u64,
    },
    #[error("description length {len} exceeds the {max} byte limit")]
    DescriptionTooLong { len: u64, max: u64 },
    #[error("{trailing} unexpected bytes after the last layer")]
    TrailingBytes { trailing: u64 },
    #[error("invalid architecture: {reason}")]
    InvalidArchitecture { reason: String },
}

impl NetworkError {
    #[must_use]
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, NetworkError::UnsupportedVersion { .. })
    }
}
