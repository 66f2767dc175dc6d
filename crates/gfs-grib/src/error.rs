//! Error types for GRIB2 indexing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GribIndexError {
    #[error("failed to read GRIB2 file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GRIB2 data: {0}")]
    Parse(String),

    #[error("submessage covers {found} of the 4 grid points around the site")]
    IncompleteNeighborhood { found: usize },

    #[error("submessage has {points} grid points but {values} values")]
    LengthMismatch { points: usize, values: usize },

    #[error("failed to decode submessage: {0}")]
    Decode(String),
}

pub type GribIndexResult<T> = Result<T, GribIndexError>;
