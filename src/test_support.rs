//! Shared fixtures for unit tests.

use crate::transport::error::TransportError;
use crate::transport::ArchiveTransport;
use crate::types::request::ArchiveRequest;
use crate::types::response::{ArchiveResponse, HourlyData, HourlyVariable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Transport returning canned responses and counting how often it was asked.
pub struct MockTransport {
    responses: Vec<ArchiveResponse>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ArchiveRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<ArchiveResponse>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ArchiveRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl ArchiveTransport for MockTransport {
    async fn fetch(
        &self,
        request: &ArchiveRequest,
    ) -> Result<Vec<ArchiveResponse>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(self.responses.clone())
    }
}

/// Hourly block covering `[time, time_end)` with one ramp series per name.
pub fn sample_hourly(time: i64, time_end: i64, interval: i64, names: &[&str]) -> HourlyData {
    let steps = if interval > 0 && time_end > time {
        ((time_end - time + interval - 1) / interval) as usize
    } else {
        0
    };
    let variables = names
        .iter()
        .enumerate()
        .map(|(offset, name)| HourlyVariable {
            name: name.to_string(),
            values: (0..steps).map(|i| Some((i + offset) as f64)).collect(),
        })
        .collect();
    HourlyData {
        time,
        time_end,
        interval,
        variables,
    }
}

pub fn sample_response(time: i64, time_end: i64, interval: i64, names: &[&str]) -> ArchiveResponse {
    ArchiveResponse {
        latitude: 37.65,
        longitude: 21.32,
        elevation: Some(12.0),
        utc_offset_seconds: 7200,
        timezone: "Europe/Athens".to_string(),
        hourly: Some(sample_hourly(time, time_end, interval, names)),
    }
}
