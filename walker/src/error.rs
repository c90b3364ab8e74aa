use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or saving a map file.
///
/// I/O problems carry the offending path so the frontend can report which
/// file was involved; format problems carry enough position information to
/// point at the bad input.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write map file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: row has {found} tiles, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized tile character {0:?}")]
    UnknownTile(char),

    #[error("map contains more than one start tile")]
    DuplicateStart,

    #[error("map contains more than one target tile")]
    DuplicateTarget,
}

/// Failures of boundary operations on a [`Walker`](crate::Walker).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalkError {
    #[error("cannot move! starting position is missing")]
    MissingStart,

    #[error("cannot move! target is missing")]
    MissingTarget,

    #[error("tile selector {0} is out of range")]
    InvalidTileSelector(usize),

    #[error("move delay must be positive, got {0} ms")]
    InvalidDelay(u64),

    #[error("no path has been searched yet")]
    NoPath,
}
