//! Decoded archive responses.
//!
//! These are the structures the transport hands back to the client. They carry
//! explicit time metadata and name each variable, so the client never has to
//! rely on the position of a values array.

use serde::{Deserialize, Serialize};

/// One location's answer from the archive endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub utc_offset_seconds: i32,
    pub timezone: String,
    pub hourly: Option<HourlyData>,
}

/// Hourly block of a response.
///
/// `time` is inclusive and `time_end` exclusive, both unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyData {
    pub time: i64,
    pub time_end: i64,
    /// Step between samples, in seconds.
    pub interval: i64,
    pub variables: Vec<HourlyVariable>,
}

/// A named series of samples. Missing samples are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyVariable {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl HourlyData {
    /// Looks up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&HourlyVariable> {
        self.variables.iter().find(|v| v.name == name)
    }
}
