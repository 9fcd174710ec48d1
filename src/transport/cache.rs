//! File backed response cache.

use crate::transport::error::TransportError;
use crate::transport::ArchiveTransport;
use crate::types::request::ArchiveRequest;
use crate::types::response::ArchiveResponse;
use bincode::config::{Configuration, Fixint, LittleEndian};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    query: Vec<(String, String)>,
    responses: Vec<ArchiveResponse>,
}

/// Wraps a transport with an on-disk cache whose entries never expire.
///
/// Entries are keyed by coordinate and date range. The full query is stored
/// with each entry, so a request for the same place and dates but different
/// variables misses and replaces the entry. Unreadable entries are treated as
/// misses.
pub struct CachedTransport<T> {
    inner: T,
    cache_dir: PathBuf,
}

impl<T> CachedTransport<T> {
    pub fn new(inner: T, cache_dir: &Path) -> Self {
        Self {
            inner,
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    async fn read_entry(
        &self,
        path: &Path,
        query: &[(String, String)],
    ) -> Option<Vec<ArchiveResponse>> {
        if fs::metadata(path).await.is_err() {
            return None;
        }
        let path_buf = path.to_path_buf();
        let entry = match task::spawn_blocking(move || decode_entry(&path_buf)).await {
            Ok(Ok(entry)) => entry,
            Ok(Err(e)) => {
                warn!("Ignoring unreadable cache entry {:?}: {}", path, e);
                return None;
            }
            Err(e) => {
                warn!("Cache read task for {:?} failed: {}", path, e);
                return None;
            }
        };
        if entry.query != query {
            warn!("Cache entry {:?} was stored for a different query", path);
            return None;
        }
        Some(entry.responses)
    }

    async fn write_entry(&self, path: &Path, entry: CacheEntry) -> Result<(), TransportError> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| TransportError::CacheDirCreation(self.cache_dir.clone(), e))?;

        let dir = self.cache_dir.clone();
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let bytes = bincode::serde::encode_to_vec(&entry, BINCODE_CONFIG)
                .map_err(|e| TransportError::CacheEncode(Box::new(e)))?;
            let mut temp_file = NamedTempFile::new_in(&dir)
                .map_err(|e| TransportError::CacheWrite(path_buf.clone(), e))?;
            temp_file
                .write_all(&bytes)
                .map_err(|e| TransportError::CacheWrite(path_buf.clone(), e))?;
            temp_file
                .persist(&path_buf)
                .map_err(|e| TransportError::CacheWrite(path_buf.clone(), e.error))?;
            Ok::<(), TransportError>(())
        })
        .await??;
        Ok(())
    }
}

fn decode_entry(path: &Path) -> Result<CacheEntry, TransportError> {
    let bytes =
        std::fs::read(path).map_err(|e| TransportError::CacheRead(path.to_path_buf(), e))?;
    let (entry, _) = bincode::serde::decode_from_slice::<CacheEntry, _>(&bytes, BINCODE_CONFIG)
        .map_err(|e| TransportError::CacheDecode(path.to_path_buf(), Box::new(e)))?;
    Ok(entry)
}

impl<T: ArchiveTransport + Sync> ArchiveTransport for CachedTransport<T> {
    async fn fetch(
        &self,
        request: &ArchiveRequest,
    ) -> Result<Vec<ArchiveResponse>, TransportError> {
        let path = self.cache_dir.join(request.cache_file_name());
        let query = request.query_pairs();

        if let Some(responses) = self.read_entry(&path, &query).await {
            info!("Cache hit for archive request at {:?}", path);
            return Ok(responses);
        }

        warn!("Cache miss for archive request, fetching from transport");
        let responses = self.inner.fetch(request).await?;
        self.write_entry(
            &path,
            CacheEntry {
                query,
                responses: responses.clone(),
            },
        )
        .await?;
        info!("Cached archive response to {:?}", path);
        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_response, MockTransport};
    use chrono::NaiveDate;

    fn request() -> ArchiveRequest {
        ArchiveRequest::new(
            37.656,
            21.3174,
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        )
        .with_hourly(["temperature_2m", "rain"])
    }

    fn mock() -> MockTransport {
        MockTransport::new(vec![sample_response(
            946_684_800,
            946_771_200,
            3600,
            &["temperature_2m", "rain"],
        )])
    }

    #[tokio::test]
    async fn test_second_fetch_hits_cache() -> Result<(), TransportError> {
        let dir = tempfile::tempdir().unwrap();
        let transport = CachedTransport::new(mock(), dir.path());

        let first = transport.fetch(&request()).await?;
        let second = transport.fetch(&request()).await?;

        assert_eq!(transport.inner.calls(), 1);
        assert_eq!(first, second);
        assert!(dir.path().join(request().cache_file_name()).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_cache_survives_new_transport() -> Result<(), TransportError> {
        let dir = tempfile::tempdir().unwrap();
        CachedTransport::new(mock(), dir.path())
            .fetch(&request())
            .await?;

        let reopened = CachedTransport::new(mock(), dir.path());
        let responses = reopened.fetch(&request()).await?;

        assert_eq!(reopened.inner.calls(), 0);
        assert_eq!(responses.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_different_variables_miss() -> Result<(), TransportError> {
        let dir = tempfile::tempdir().unwrap();
        let transport = CachedTransport::new(mock(), dir.path());

        transport.fetch(&request()).await?;
        transport
            .fetch(&request().with_hourly(["rain"]))
            .await?;

        assert_eq!(transport.inner.calls(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_refetched() -> Result<(), TransportError> {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(request().cache_file_name()), b"garbage").unwrap();
        let transport = CachedTransport::new(mock(), dir.path());

        let responses = transport.fetch(&request()).await?;

        assert_eq!(transport.inner.calls(), 1);
        assert_eq!(responses.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_creates_missing_cache_dir() -> Result<(), TransportError> {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("cache");
        let transport = CachedTransport::new(mock(), &nested);

        transport.fetch(&request()).await?;

        assert!(nested.join(request().cache_file_name()).exists());
        Ok(())
    }
}
