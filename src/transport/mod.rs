//! Transport collaborators that turn an [`ArchiveRequest`] into decoded responses.
//!
//! [`HttpTransport`] talks to the archive endpoint and retries transient
//! failures. [`CachedTransport`] wraps any other transport with a file backed
//! cache that never expires.

pub mod cache;
pub mod error;
pub mod http;

use crate::types::request::ArchiveRequest;
use crate::types::response::ArchiveResponse;
use error::TransportError;
use std::future::Future;

/// Something that can answer an archive request.
///
/// Implementations return every response the endpoint produced; callers
/// decide what an empty set means.
pub trait ArchiveTransport {
    fn fetch(
        &self,
        request: &ArchiveRequest,
    ) -> impl Future<Output = Result<Vec<ArchiveResponse>, TransportError>> + Send;
}
