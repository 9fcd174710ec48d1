//! Contains the `HourlyFrame` structure holding a time-indexed table of hourly samples.

use crate::error::ArchiveError;
use crate::types::response::HourlyData;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Name of the index column.
pub const INDEX_COLUMN: &str = "datetime";
const CSV_SEPARATOR: u8 = b';';
const INDEX_TIME_ZONE: &str = "UTC";
const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// A time-indexed table of hourly weather variables.
///
/// The first column, `datetime`, holds UTC timestamps
/// (`Datetime(Milliseconds, Some("UTC"))`) spaced by the response interval. Every
/// following column is one requested variable as `Float64`, in request order.
/// All columns have the same length.
#[derive(Debug, Clone)]
pub struct HourlyFrame {
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl HourlyFrame {
    /// Builds a frame from the hourly block of a response.
    ///
    /// The index runs from `hourly.time` (inclusive) to `hourly.time_end`
    /// (exclusive) in steps of `hourly.interval` seconds. Each name in
    /// `variables` is looked up in the response by name and becomes a column.
    ///
    /// # Errors
    ///
    /// * [`ArchiveError::InvalidInterval`] if the interval is zero or negative.
    /// * [`ArchiveError::MissingVariable`] if a requested variable is absent.
    /// * [`ArchiveError::LengthMismatch`] if a variable's length differs from the index.
    /// * [`ArchiveError::TimestampOutOfRange`] if a timestamp cannot be represented in milliseconds.
    pub fn from_hourly(hourly: &HourlyData, variables: &[String]) -> Result<Self, ArchiveError> {
        let index = time_index(hourly.time, hourly.time_end, hourly.interval)?;
        let height = index.len();

        let mut columns = Vec::with_capacity(variables.len() + 1);
        columns.push(Column::from(
            Int64Chunked::from_vec(INDEX_COLUMN.into(), index)
                .into_datetime(TimeUnit::Milliseconds, Some(INDEX_TIME_ZONE.into()))
                .into_series(),
        ));

        for name in variables {
            let variable = hourly
                .variable(name)
                .ok_or_else(|| ArchiveError::MissingVariable(name.clone()))?;
            if variable.values.len() != height {
                return Err(ArchiveError::LengthMismatch {
                    variable: name.clone(),
                    expected: height,
                    found: variable.values.len(),
                });
            }
            columns.push(Column::new(name.as_str().into(), &variable.values));
        }

        Ok(Self {
            frame: DataFrame::new(columns)?,
        })
    }

    /// Number of time steps.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Names of the variable columns, without the index.
    pub fn variable_names(&self) -> Vec<&str> {
        self.frame
            .get_column_names_str()
            .into_iter()
            .filter(|name| *name != INDEX_COLUMN)
            .collect()
    }

    /// Writes the frame as `;` separated CSV with a header row and the
    /// `datetime` index as first column, e.g. `2000-01-01 00:00:00+00:00`.
    ///
    /// The parent directory is not created.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::OutputWrite`] if the file cannot be created and
    /// [`ArchiveError::Polars`] if serialization fails.
    pub fn write_csv(&mut self, path: &Path) -> Result<(), ArchiveError> {
        let file =
            File::create(path).map_err(|e| ArchiveError::OutputWrite(path.to_path_buf(), e))?;
        CsvWriter::new(file)
            .include_header(true)
            .with_separator(CSV_SEPARATOR)
            .with_datetime_format(Some(CSV_DATETIME_FORMAT.to_string()))
            .finish(&mut self.frame)?;
        info!("Wrote {} rows to {}", self.height(), path.display());
        Ok(())
    }
}

/// Generates the half-open range `[start, end)` stepping by `interval`
/// seconds, as unix milliseconds.
fn time_index(start: i64, end: i64, interval: i64) -> Result<Vec<i64>, ArchiveError> {
    let step = usize::try_from(interval)
        .ok()
        .filter(|step| *step > 0)
        .ok_or(ArchiveError::InvalidInterval(interval))?;
    (start..end)
        .step_by(step)
        .map(|seconds| {
            seconds
                .checked_mul(1000)
                .ok_or(ArchiveError::TimestampOutOfRange(seconds))
        })
        .collect()
}
