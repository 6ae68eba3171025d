use super::{filter_properties, Criteria, CriteriaDraft};
use crate::error::{FilterError, Result};
use crate::models::{PropertyId, PropertyRecord};
use crate::sources::{BuyerId, ListingSource, Shortlist, ShortlistStore};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// State owned by a listing page: the loaded records plus the criteria
/// currently applied to them. The visible list is derived on demand and
/// never stored.
#[derive(Debug, Default, Clone)]
pub struct ListingBoard {
    records: Vec<PropertyRecord>,
    criteria: Criteria,
    form_error: Option<FilterError>,
    load_error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
}

impl ListingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PropertyRecord>) -> Self {
        let mut board = Self::new();
        board.replace_records(records);
        board
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Message for the filter form, set by the last rejected submission
    pub fn form_error(&self) -> Option<&FilterError> {
        self.form_error.as_ref()
    }

    /// Message for the page, set when the last load failed
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Replace the records with whatever `source` returns. The last load
    /// to complete wins. A failed load leaves an empty list and a page
    /// error instead of stale or partial data.
    pub async fn load(&mut self, source: &dyn ListingSource) {
        match source.fetch_listings().await {
            Ok(records) => {
                info!(
                    "Loaded {} listings from {}",
                    records.len(),
                    source.source_name()
                );
                self.replace_records(records);
            }
            Err(e) => {
                warn!("Loading from {} failed: {}", source.source_name(), e);
                self.records.clear();
                self.load_error = Some(e.to_string());
                self.loaded_at = None;
            }
        }
    }

    pub fn replace_records(&mut self, records: Vec<PropertyRecord>) {
        self.records = records;
        self.load_error = None;
        self.loaded_at = Some(Utc::now());
    }

    /// Commit a filter form. A rejected form keeps the previous criteria.
    pub fn submit(&mut self, draft: &CriteriaDraft) -> std::result::Result<(), FilterError> {
        match draft.validate() {
            Ok(criteria) => {
                debug!("Applying {} active criteria", criteria.active_count());
                self.criteria = criteria;
                self.form_error = None;
                Ok(())
            }
            Err(e) => {
                debug!("Filter form rejected: {}", e);
                self.form_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Apply criteria that were validated elsewhere.
    pub fn set_criteria(&mut self, criteria: Criteria) {
        self.criteria = criteria;
        self.form_error = None;
    }

    pub fn clear_filters(&mut self) {
        self.set_criteria(Criteria::default());
    }

    pub fn visible(&self) -> Vec<&PropertyRecord> {
        filter_properties(&self.records, &self.criteria)
    }

    pub fn find(&self, id: &PropertyId) -> Option<&PropertyRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Drop a record from the local list only.
    pub fn remove_local(&mut self, id: &PropertyId) -> Option<PropertyRecord> {
        let pos = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(pos))
    }

    /// Remove a listing from the buyer's shortlist. The local list only
    /// shrinks once the store confirms.
    pub async fn remove_from_shortlist(
        &mut self,
        store: &dyn ShortlistStore,
        kind: Shortlist,
        buyer: BuyerId,
        id: &PropertyId,
    ) -> Result<Option<PropertyRecord>> {
        store.remove(kind, buyer, id).await?;
        info!("Removed listing {} from {}", id, kind);
        Ok(self.remove_local(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketError;
    use crate::sources::{AddOutcome, DemoListings};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FailingSource;

    #[async_trait]
    impl ListingSource for FailingSource {
        async fn fetch_listings(&self) -> Result<Vec<PropertyRecord>> {
            Err(MarketError::malformed("expected one of [\"properties\"]"))
        }

        fn source_name(&self) -> &'static str {
            "failing"
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        removed: Mutex<Vec<PropertyId>>,
        reject: bool,
    }

    #[async_trait]
    impl ShortlistStore for RecordingStore {
        async fn add(&self, _: Shortlist, _: BuyerId, _: &PropertyId) -> Result<AddOutcome> {
            Ok(AddOutcome::Added)
        }

        async fn list(&self, _: Shortlist, _: BuyerId) -> Result<Vec<PropertyRecord>> {
            Ok(Vec::new())
        }

        async fn remove(&self, _: Shortlist, _: BuyerId, id: &PropertyId) -> Result<()> {
            if self.reject {
                return Err(MarketError::not_found("Cart item not found"));
            }
            self.removed.lock().unwrap().push(id.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_then_filter() {
        let mut board = ListingBoard::new();
        board.load(&DemoListings::new()).await;
        assert_eq!(board.visible().len(), 5);
        assert!(board.loaded_at().is_some());

        let draft = CriteriaDraft {
            search_text: "plot".to_string(),
            ..Default::default()
        };
        board.submit(&draft).unwrap();
        assert_eq!(board.visible().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_substitutes_empty_list() {
        let mut board = ListingBoard::new();
        board.load(&DemoListings::new()).await;
        board.load(&FailingSource).await;

        assert!(board.records().is_empty());
        assert!(board.visible().is_empty());
        assert!(board.load_error().unwrap().contains("Malformed payload"));

        board.load(&DemoListings::new()).await;
        assert!(board.load_error().is_none());
    }

    #[test]
    fn test_rejected_form_keeps_previous_criteria() {
        let mut board = ListingBoard::with_records(DemoListings::new().records());
        let good = CriteriaDraft {
            location: "Chennai, Tamil Nadu".to_string(),
            ..Default::default()
        };
        board.submit(&good).unwrap();
        let before: Vec<_> = board.visible().into_iter().cloned().collect();

        let bad = CriteriaDraft {
            size: "ten".to_string(),
            ..good.clone()
        };
        assert!(board.submit(&bad).is_err());
        assert_eq!(board.form_error().unwrap().to_string(), "Size must be a number");
        assert_eq!(board.criteria().location, "Chennai, Tamil Nadu");
        assert!(board.criteria().size.is_empty());

        let after: Vec<_> = board.visible().into_iter().cloned().collect();
        assert_eq!(before, after);

        board.submit(&good).unwrap();
        assert!(board.form_error().is_none());
    }

    #[test]
    fn test_clear_filters() {
        let mut board = ListingBoard::with_records(DemoListings::new().records());
        board
            .submit(&CriteriaDraft {
                price_max: Some(100_000.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(board.visible().len(), 1);
        board.clear_filters();
        assert_eq!(board.visible().len(), 5);
    }

    #[tokio::test]
    async fn test_remove_from_shortlist_after_confirmation() {
        let mut board = ListingBoard::with_records(DemoListings::new().records());
        let store = RecordingStore::default();
        let id = PropertyId::Numeric(2);

        let removed = board
            .remove_from_shortlist(&store, Shortlist::Favorites, 1, &id)
            .await
            .unwrap();
        assert_eq!(removed.unwrap().name, "Lakeside Residential Plot");
        assert_eq!(board.records().len(), 4);
        assert!(board.find(&id).is_none());
        assert_eq!(*store.removed.lock().unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn test_rejected_removal_keeps_record() {
        let mut board = ListingBoard::with_records(DemoListings::new().records());
        let store = RecordingStore {
            reject: true,
            ..Default::default()
        };
        let id = PropertyId::Numeric(3);

        let result = board
            .remove_from_shortlist(&store, Shortlist::Favorites, 1, &id)
            .await;
        assert!(result.is_err());
        assert_eq!(board.records().len(), 5);
    }
}
