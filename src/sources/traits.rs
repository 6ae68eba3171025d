use super::types::{AddOutcome, BuyerId, Shortlist};
use crate::error::Result;
use crate::models::{PropertyId, PropertyRecord};
use async_trait::async_trait;

/// Anything that can hand the board a list of listings: the marketplace
/// backend, a JSON export on disk, or the built-in demo catalog.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the complete listing list
    async fn fetch_listings(&self) -> Result<Vec<PropertyRecord>>;

    /// Name shown in logs
    fn source_name(&self) -> &'static str;
}

/// A buyer's favorites and interests lists held by the backend
#[async_trait]
pub trait ShortlistStore: Send + Sync {
    async fn add(&self, kind: Shortlist, buyer: BuyerId, property: &PropertyId)
        -> Result<AddOutcome>;

    async fn list(&self, kind: Shortlist, buyer: BuyerId) -> Result<Vec<PropertyRecord>>;

    async fn remove(&self, kind: Shortlist, buyer: BuyerId, property: &PropertyId) -> Result<()>;
}
