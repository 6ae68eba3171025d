//! Property filter engine.
//!
//! A pure function of `(records, criteria)`: every active criterion must
//! hold for a record to be visible, inactive criteria impose nothing, and
//! the source order is preserved.

pub mod board;
pub mod draft;
pub mod locations;

use crate::models::{Amenity, PropertyRecord, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use board::ListingBoard;
pub use draft::CriteriaDraft;
pub use locations::LocationCatalog;

/// Validated filter criteria. `Default` is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    /// Case-insensitive substring matched against name or location
    pub search_text: String,
    pub property_type: Option<PropertyType>,
    /// Inclusive lower bound; `None` is open
    pub price_min: Option<f64>,
    /// Inclusive upper bound; `None` is open
    pub price_max: Option<f64>,
    /// Exact location match
    pub location: String,
    /// Exact size match, no unit normalization
    pub size: String,
    /// Every amenity listed here must be present on the record
    pub amenities: BTreeSet<Amenity>,
}

impl Criteria {
    pub fn price_active(&self) -> bool {
        self.price_min.is_some() || self.price_max.is_some()
    }

    /// Number of criteria currently constraining the result
    pub fn active_count(&self) -> usize {
        [
            !self.search_text.is_empty(),
            self.property_type.is_some(),
            self.price_active(),
            !self.location.is_empty(),
            !self.size.is_empty(),
            !self.amenities.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_identity(&self) -> bool {
        self.active_count() == 0
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            if !record.name.to_lowercase().contains(&needle)
                && !record.location.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(wanted) = self.property_type {
            if record.property_type != Some(wanted) {
                return false;
            }
        }

        if self.price_active() && !record.price.within(self.price_min, self.price_max) {
            return false;
        }

        if !self.location.is_empty() && record.location != self.location {
            return false;
        }

        if !self.size.is_empty() && record.size != self.size {
            return false;
        }

        self.amenities.is_subset(&record.amenities)
    }
}

/// Records matching every active criterion, in source order.
pub fn filter_properties<'a>(
    records: &'a [PropertyRecord],
    criteria: &Criteria,
) -> Vec<&'a PropertyRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
