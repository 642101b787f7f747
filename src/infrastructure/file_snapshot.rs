use std::path::PathBuf;
use tokio_retry::{
    strategy::{jitter, ExponentialBackoff},
    Retry,
};

use crate::domain::errors::SnapshotError;

use super::snapshot::{BountySnapshot, SnapshotSource};

/// A snapshot source backed by a JSON document on the local filesystem.
///
/// The publisher replaces the file atomically between sync rounds; reads are
/// retried with backoff to ride out a replacement in progress.
#[derive(Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
    num_retries: usize,
}

impl FileSnapshotSource {
    /// Creates a new `FileSnapshotSource` for the given snapshot path.
    pub fn from_path(path: impl Into<PathBuf>, num_retries: usize) -> Self {
        Self {
            path: path.into(),
            num_retries,
        }
    }
}

#[async_trait::async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<BountySnapshot, SnapshotError> {
        let retry_strategy = ExponentialBackoff::from_millis(500)
            .map(jitter)
            .take(self.num_retries);

        let bytes = Retry::spawn(retry_strategy, || tokio::fs::read(&self.path))
            .await
            .map_err(|e| SnapshotError::FailedToReadSnapshot(e.to_string()))?;

        let snapshot = serde_json::from_slice(&bytes)
            .map_err(|e| SnapshotError::FailedToParseSnapshot(e.to_string()))?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn fetches_and_parses_a_snapshot_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "actions": [{{
                    "public_id": "a1",
                    "channel_id": 10,
                    "country_alpha2": "KE",
                    "transaction_type": "p2p",
                    "bounty_is_open": true,
                    "bounty_amount": 100
                }}],
                "channels": [{{"id": 10, "name": "M-PESA", "country_alpha2": "KE"}}]
            }}"#
        )
        .unwrap();

        let source = FileSnapshotSource::from_path(file.path(), 1);
        let snapshot = source.fetch().await.unwrap();

        assert_eq!(snapshot.actions.len(), 1);
        assert_eq!(snapshot.actions[0].public_id, "a1");
        assert!(snapshot.transactions.is_none());
        assert_eq!(snapshot.channels[0].id, 10);
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let source = FileSnapshotSource::from_path("/nonexistent/snapshot.json", 0);

        let result = source.fetch().await;

        assert!(matches!(
            result,
            Err(SnapshotError::FailedToReadSnapshot(_))
        ));
    }

    #[tokio::test]
    async fn malformed_document_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = FileSnapshotSource::from_path(file.path(), 0);
        let result = source.fetch().await;

        assert!(matches!(
            result,
            Err(SnapshotError::FailedToParseSnapshot(_))
        ));
    }
}
