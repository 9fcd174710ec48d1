//! Naming of the CSV files written by the command line program.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "historical_data_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H-%M";

/// File name for an export created at `timestamp`.
///
/// The name only has minute precision, so two exports within the same minute
/// get the same name and the later one overwrites the earlier.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use meteo_archive::output_file_name;
///
/// let at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 5, 42).unwrap();
/// assert_eq!(output_file_name(&at), "historical_data_20240701_09-05.csv");
/// ```
pub fn output_file_name<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}{}.csv", FILE_PREFIX, timestamp.format(TIMESTAMP_FORMAT))
}

/// Full path of an export in `dir` created at `timestamp`.
pub fn output_path<Tz>(dir: &Path, timestamp: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dir.join(output_file_name(timestamp))
}
