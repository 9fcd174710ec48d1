//! This module provides the main entry point for fetching historical hourly
//! weather for a coordinate from the Open-Meteo archive.

use crate::error::ArchiveError;
use crate::transport::cache::CachedTransport;
use crate::transport::http::HttpTransport;
use crate::transport::ArchiveTransport;
use crate::types::hourly_frame::HourlyFrame;
use crate::types::request::ArchiveRequest;
use bon::bon;
use chrono::NaiveDate;
use log::{debug, info};
use std::io;
use std::path::PathBuf;
use tokio::fs;

const CACHE_DIR_NAME: &str = "meteo_archive_cache";

/// The client for fetching historical hourly weather.
///
/// The client owns its transport, and with it the cache handle, so nothing
/// is shared through globals. [`HistoricalWeather::new()`] and
/// [`HistoricalWeather::with_cache_folder()`] build the default stack: an
/// HTTP transport with retries behind a file cache that never expires.
/// [`HistoricalWeather::with_transport()`] accepts any other
/// [`ArchiveTransport`].
///
/// # Examples
///
/// ```no_run
/// # use meteo_archive::{HistoricalWeather, ArchiveError};
/// use chrono::NaiveDate;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), ArchiveError> {
/// let client = HistoricalWeather::new().await?;
/// let hourly = client
///     .fetch()
///     .latitude(37.656)
///     .longitude(21.3174)
///     .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
///     .call()
///     .await?;
/// println!("{}", hourly.frame);
/// # Ok(())
/// # }
/// ```
pub struct HistoricalWeather<T = CachedTransport<HttpTransport>> {
    transport: T,
}

impl HistoricalWeather<CachedTransport<HttpTransport>> {
    /// Creates a client caching into the specified directory.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::CacheDirCreation`] if the directory cannot be created
    /// or the path is taken by something other than a directory, and
    /// [`ArchiveError::Transport`] if the HTTP client cannot be built.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, ArchiveError> {
        match fs::metadata(&cache_folder).await {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(ArchiveError::CacheDirCreation(
                    cache_folder,
                    io::Error::new(io::ErrorKind::AlreadyExists, "path is not a directory"),
                ));
            }
            Err(_) => {
                info!("Creating cache directory {}", cache_folder.display());
                fs::create_dir_all(&cache_folder)
                    .await
                    .map_err(|e| ArchiveError::CacheDirCreation(cache_folder.clone(), e))?;
            }
        }
        let http = HttpTransport::builder().build()?;
        Ok(Self {
            transport: CachedTransport::new(http, &cache_folder),
        })
    }

    /// Creates a client caching into the default cache directory
    /// (e.g. `~/.cache/meteo_archive_cache` on Linux).
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::CacheDirResolution`] if the default cache directory cannot be found,
    /// otherwise the errors of [`HistoricalWeather::with_cache_folder()`].
    pub async fn new() -> Result<Self, ArchiveError> {
        let cache_folder = dirs::cache_dir()
            .ok_or(ArchiveError::CacheDirResolution)?
            .join(CACHE_DIR_NAME);
        Self::with_cache_folder(cache_folder).await
    }
}

#[bon]
impl<T: ArchiveTransport> HistoricalWeather<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches every variable of [`crate::HOURLY_VARIABLES`] for a coordinate
    /// and date range.
    ///
    /// This method uses a builder pattern. All arguments are required.
    ///
    /// # Arguments
    ///
    /// * `.latitude(f64)`, `.longitude(f64)`: Degrees. Not range checked; the API
    ///   rejects values it cannot serve.
    /// * `.start_date(NaiveDate)`, `.end_date(NaiveDate)`: Calendar dates of the period.
    ///
    /// # Errors
    ///
    /// * [`ArchiveError::Transport`] if the request fails after retries or the API rejects it.
    /// * [`ArchiveError::EmptyResponse`] if the archive returned no response.
    /// * Frame construction errors, see [`HourlyFrame::from_hourly()`].
    #[builder]
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HourlyFrame, ArchiveError> {
        let request = ArchiveRequest::new(latitude, longitude, start_date, end_date);
        self.fetch_request(&request).await
    }

    /// Fetches an arbitrary request and builds a frame from its first response.
    pub async fn fetch_request(&self, request: &ArchiveRequest) -> Result<HourlyFrame, ArchiveError> {
        let responses = self.transport.fetch(request).await?;
        debug!("Archive returned {} response(s)", responses.len());

        let response = responses
            .into_iter()
            .next()
            .ok_or(ArchiveError::EmptyResponse)?;
        let hourly = response.hourly.ok_or(ArchiveError::MissingHourlyData)?;
        HourlyFrame::from_hourly(&hourly, &request.hourly)
    }
}
