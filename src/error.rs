use crate::transport::error::TransportError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Archive returned no responses")]
    EmptyResponse,

    #[error("Archive response has no hourly data")]
    MissingHourlyData,

    #[error("Archive response has a non-positive interval of {0} seconds")]
    InvalidInterval(i64),

    #[error("Hourly variable '{0}' is missing from the archive response")]
    MissingVariable(String),

    #[error("Hourly variable '{variable}' has {found} values, expected {expected}")]
    LengthMismatch {
        variable: String,
        expected: usize,
        found: usize,
    },

    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),

    #[error("Failed to write output file '{0}'")]
    OutputWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse date")]
    DateParse(#[from] chrono::ParseError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine the system cache directory")]
    CacheDirResolution,
}
