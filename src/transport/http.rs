//! HTTP transport for the Open-Meteo archive endpoint.

use crate::transport::error::TransportError;
use crate::transport::ArchiveTransport;
use crate::types::request::ArchiveRequest;
use crate::types::response::{ArchiveResponse, HourlyData, HourlyVariable};
use bon::bon;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

const DEFAULT_RETRIES: u32 = 5;
const DEFAULT_BACKOFF_FACTOR: f64 = 0.2;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
const BACKOFF_MAX_SECONDS: f64 = 120.0;
// Used when a response has fewer than two samples to derive a step from.
const DEFAULT_INTERVAL_SECONDS: i64 = 3600;
const RETRY_STATUSES: [StatusCode; 3] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Talks to the archive endpoint over HTTP and retries transient failures.
///
/// Connection errors, timeouts and the statuses 500, 502 and 504 are retried
/// up to `retries` times. Any other error status is returned straight away,
/// with the API's `reason` when the body carries one.
///
/// # Examples
///
/// ```no_run
/// use meteo_archive::HttpTransport;
///
/// # fn run() -> Result<(), meteo_archive::TransportError> {
/// let transport = HttpTransport::builder()
///     .retries(3)
///     .backoff_factor(0.5)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    retries: u32,
    backoff_factor: f64,
}

#[bon]
impl HttpTransport {
    /// Creates a transport.
    ///
    /// # Arguments
    ///
    /// * `.endpoint(String)`: Optional. Archive URL. Defaults to [`ARCHIVE_URL`].
    /// * `.retries(u32)`: Optional. Extra attempts after the first one. Defaults to `5`.
    /// * `.backoff_factor(f64)`: Optional. Seconds multiplied into the exponential
    ///   delay between attempts. Defaults to `0.2`.
    /// * `.connect_timeout(Duration)`: Optional. Limit on establishing a connection.
    ///   Defaults to 60 seconds. There is no limit on the whole request, so a slow
    ///   download that keeps making progress is never cut off. Ignored when
    ///   `.client()` is given.
    /// * `.client(Client)`: Optional. A preconfigured reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the reqwest client cannot be built.
    #[builder]
    pub fn new(
        #[builder(into)] endpoint: Option<String>,
        retries: Option<u32>,
        backoff_factor: Option<f64>,
        connect_timeout: Option<Duration>,
        client: Option<Client>,
    ) -> Result<Self, TransportError> {
        let client = match client {
            Some(client) => client,
            None => client_builder(connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT))
                .build()
                .map_err(TransportError::ClientBuild)?,
        };
        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| ARCHIVE_URL.to_string()),
            retries: retries.unwrap_or(DEFAULT_RETRIES),
            backoff_factor: backoff_factor.unwrap_or(DEFAULT_BACKOFF_FACTOR),
        })
    }

    /// Sends one request and returns the raw body of a successful response.
    async fn send_once(&self, query: &[(String, String)]) -> Result<String, TransportError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| TransportError::NetworkRequest(self.endpoint.clone(), e))?;

        let status = response.status();
        let failure = response.error_for_status_ref().err();
        if let Some(source) = failure {
            let url = self.endpoint.clone();
            if RETRY_STATUSES.contains(&status) {
                return Err(TransportError::HttpStatus {
                    url,
                    status,
                    source,
                });
            }
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<WireError>(&body) {
                Ok(api) => TransportError::Api {
                    status,
                    reason: api.reason,
                },
                Err(_) => TransportError::HttpStatus {
                    url,
                    status,
                    source,
                },
            });
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::NetworkRequest(self.endpoint.clone(), e))
    }
}

impl ArchiveTransport for HttpTransport {
    async fn fetch(
        &self,
        request: &ArchiveRequest,
    ) -> Result<Vec<ArchiveResponse>, TransportError> {
        let query = request.query_pairs();
        info!(
            "Requesting archive data for ({}, {}) from {} to {}",
            request.latitude, request.longitude, request.start_date, request.end_date
        );

        let mut attempt: u32 = 0;
        loop {
            match self.send_once(&query).await {
                Ok(body) => {
                    debug!("Received {} bytes from {}", body.len(), self.endpoint);
                    return decode_body(&self.endpoint, &body, &request.hourly);
                }
                Err(e) if attempt < self.retries && is_retryable(&e) => {
                    attempt += 1;
                    let delay = backoff_delay(self.backoff_factor, attempt);
                    warn!(
                        "Attempt {} of {} failed ({}), retrying in {:?}",
                        attempt,
                        self.retries + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// Only connecting is bounded. A body that keeps arriving is read to the end,
// however long that takes.
fn client_builder(connect_timeout: Duration) -> reqwest::ClientBuilder {
    Client::builder().connect_timeout(connect_timeout)
}

fn is_retryable(error: &TransportError) -> bool {
    match error {
        TransportError::NetworkRequest(_, e) => !e.is_builder(),
        TransportError::HttpStatus { status, .. } => RETRY_STATUSES.contains(status),
        _ => false,
    }
}

/// Delay before retry number `attempt` (1-based).
///
/// The first retry happens immediately, later ones wait
/// `backoff_factor * 2^(attempt - 1)` seconds, capped at two minutes.
pub(crate) fn backoff_delay(backoff_factor: f64, attempt: u32) -> Duration {
    if attempt <= 1 {
        return Duration::ZERO;
    }
    let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
    let seconds = backoff_factor * 2f64.powi(exponent);
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(seconds.min(BACKOFF_MAX_SECONDS))
}

#[derive(Deserialize)]
struct WireError {
    reason: String,
}

// A single location answers with an object, several with an array.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireBody {
    Many(Vec<WireResponse>),
    One(WireResponse),
}

#[derive(Deserialize)]
struct WireResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation: Option<f64>,
    #[serde(default)]
    utc_offset_seconds: i32,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    hourly: Option<WireHourly>,
}

#[derive(Deserialize)]
struct WireHourly {
    time: Vec<i64>,
    #[serde(flatten)]
    values: HashMap<String, Vec<Option<f64>>>,
}

impl WireHourly {
    fn into_hourly(mut self, requested: &[String]) -> HourlyData {
        let time = self.time.first().copied().unwrap_or(0);
        let interval = match self.time.as_slice() {
            [first, second, ..] => second - first,
            _ => DEFAULT_INTERVAL_SECONDS,
        };
        let time_end = self.time.last().map_or(time, |last| last + interval);

        let variables = requested
            .iter()
            .filter_map(|name| {
                self.values.remove(name).map(|values| HourlyVariable {
                    name: name.clone(),
                    values,
                })
            })
            .collect();

        HourlyData {
            time,
            time_end,
            interval,
            variables,
        }
    }
}

/// Decodes a JSON body into responses, keeping only the requested variables
/// in request order. Requested variables absent from the body are left out.
pub(crate) fn decode_body(
    url: &str,
    body: &str,
    requested: &[String],
) -> Result<Vec<ArchiveResponse>, TransportError> {
    let wire = serde_json::from_str::<WireBody>(body)
        .map_err(|e| TransportError::ResponseDecode(url.to_string(), e))?;
    let responses = match wire {
        WireBody::Many(responses) => responses,
        WireBody::One(response) => vec![response],
    };
    Ok(responses
        .into_iter()
        .map(|r| ArchiveResponse {
            latitude: r.latitude,
            longitude: r.longitude,
            elevation: r.elevation,
            utc_offset_seconds: r.utc_offset_seconds,
            timezone: r.timezone,
            hourly: r.hourly.map(|h| h.into_hourly(requested)),
        })
        .collect())
}
