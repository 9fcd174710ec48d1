//! Download historical hourly weather for a coordinate from the Open-Meteo
//! archive into a time-indexed Polars frame, and write it out as CSV.

mod error;
mod export;
mod historical_weather;
mod transport;
mod types;

#[cfg(test)]
mod test_support;

pub use error::ArchiveError;
pub use export::{output_file_name, output_path};
pub use historical_weather::*;

pub use transport::cache::CachedTransport;
pub use transport::error::TransportError;
pub use transport::http::{HttpTransport, ARCHIVE_URL};
pub use transport::ArchiveTransport;

pub use types::hourly_frame::{HourlyFrame, INDEX_COLUMN};
pub use types::hourly_variables::HOURLY_VARIABLES;
pub use types::request::ArchiveRequest;
pub use types::response::{ArchiveResponse, HourlyData, HourlyVariable};
