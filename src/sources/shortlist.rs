use crate::error::Result;
use crate::models::PropertyRecord;
use crate::sources::traits::{ListingSource, ShortlistStore};
use crate::sources::types::{BuyerId, Shortlist};
use async_trait::async_trait;
use std::sync::Arc;

/// Exposes one of a buyer's shortlists as a listing source, so the
/// favorites and interests pages run on the same board as explore.
pub struct ShortlistSource {
    store: Arc<dyn ShortlistStore>,
    kind: Shortlist,
    buyer: BuyerId,
}

impl ShortlistSource {
    pub fn new(store: Arc<dyn ShortlistStore>, kind: Shortlist, buyer: BuyerId) -> Self {
        Self { store, kind, buyer }
    }
}

#[async_trait]
impl ListingSource for ShortlistSource {
    async fn fetch_listings(&self) -> Result<Vec<PropertyRecord>> {
        self.store.list(self.kind, self.buyer).await
    }

    fn source_name(&self) -> &'static str {
        match self.kind {
            Shortlist::Favorites => "favorites",
            Shortlist::Interests => "interests",
        }
    }
}
