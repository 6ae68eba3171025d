use crate::error::{MarketError, Result};
use crate::models::ingest::{parse_listings, LISTING_KEYS};
use crate::models::PropertyRecord;
use crate::sources::traits::ListingSource;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Listings read from a JSON export on disk, in any payload shape the
/// backend produces.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    async fn fetch_listings(&self) -> Result<Vec<PropertyRecord>> {
        info!("Reading listings from {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path).await?;
        debug!("Read {} bytes", content.len());

        let payload = serde_json::from_str(&content)
            .map_err(|e| MarketError::json(self.path.display().to_string(), e))?;
        parse_listings(&payload, &LISTING_KEYS)
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_payload_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"properties": [{{"id": 9, "name": "Wooded Retreat Land", "price": "180,000"}}]}}"#
        )
        .unwrap();

        let records = JsonFileSource::new(file.path()).fetch_listings().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Wooded Retreat Land");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = JsonFileSource::new("/nonexistent/listings.json")
            .fetch_listings()
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::Io { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = JsonFileSource::new(file.path()).fetch_listings().await.unwrap_err();
        assert!(matches!(err, MarketError::Json { .. }));
    }
}
