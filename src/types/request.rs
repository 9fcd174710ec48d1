//! Defines the parameters of a single archive request.

use crate::types::hourly_variables::HOURLY_VARIABLES;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters for one call to the archive endpoint.
///
/// Coordinates are not range checked; out of range values are forwarded and
/// left for the API to reject.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use meteo_archive::ArchiveRequest;
///
/// let request = ArchiveRequest::new(
///     37.656,
///     21.3174,
///     NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
/// );
/// assert_eq!(request.hourly.len(), 32);
/// assert_eq!(request.timezone, "auto");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Hourly variable identifiers, in the order the output columns should have.
    pub hourly: Vec<String>,
    pub timezone: String,
}

impl ArchiveRequest {
    /// Creates a request for all of [`HOURLY_VARIABLES`] with `timezone=auto`.
    pub fn new(latitude: f64, longitude: f64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            latitude,
            longitude,
            start_date,
            end_date,
            hourly: HOURLY_VARIABLES.iter().map(|v| v.to_string()).collect(),
            timezone: "auto".to_string(),
        }
    }

    /// Replaces the requested hourly variables.
    pub fn with_hourly<I, S>(mut self, hourly: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hourly = hourly.into_iter().map(Into::into).collect();
        self
    }

    /// Renders the request as URL query pairs.
    ///
    /// Times are requested as unix seconds so the response can be turned into
    /// a uniform index without parsing local time strings.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("latitude".to_string(), self.latitude.to_string()),
            ("longitude".to_string(), self.longitude.to_string()),
            (
                "start_date".to_string(),
                self.start_date.format(DATE_FORMAT).to_string(),
            ),
            (
                "end_date".to_string(),
                self.end_date.format(DATE_FORMAT).to_string(),
            ),
            ("hourly".to_string(), self.hourly.join(",")),
            ("timezone".to_string(), self.timezone.clone()),
            ("timeformat".to_string(), "unixtime".to_string()),
        ]
    }

    /// Name of the cache file holding the response for this request.
    pub(crate) fn cache_file_name(&self) -> String {
        format!(
            "archive_{}_{}_{}_{}.bin",
            self.latitude,
            self.longitude,
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> ArchiveRequest {
        ArchiveRequest::new(
            37.656,
            21.3174,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        )
    }

    #[test]
    fn test_query_pairs() {
        let pairs = sample_request().query_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "latitude",
                "longitude",
                "start_date",
                "end_date",
                "hourly",
                "timezone",
                "timeformat"
            ]
        );
        assert_eq!(pairs[0].1, "37.656");
        assert_eq!(pairs[1].1, "21.3174");
        assert_eq!(pairs[2].1, "2000-01-01");
        assert_eq!(pairs[3].1, "2024-07-01");
        assert_eq!(pairs[5].1, "auto");
    }

    #[test]
    fn test_hourly_keeps_order() {
        let pairs = sample_request().query_pairs();
        let hourly = &pairs[4].1;
        assert!(hourly.starts_with("temperature_2m,relative_humidity_2m,"));
        assert!(hourly.ends_with(",is_day,sunshine_duration"));
        assert_eq!(hourly.split(',').count(), HOURLY_VARIABLES.len());
    }

    #[test]
    fn test_with_hourly() {
        let request = sample_request().with_hourly(["rain", "snowfall"]);
        assert_eq!(request.hourly, vec!["rain", "snowfall"]);
        assert_eq!(request.query_pairs()[4].1, "rain,snowfall");
    }

    #[test]
    fn test_cache_file_name() {
        assert_eq!(
            sample_request().cache_file_name(),
            "archive_37.656_21.3174_2000-01-01_2024-07-01.bin"
        );
    }
}
