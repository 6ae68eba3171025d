//! Seller listing form.

use crate::error::{MarketError, Result};
use crate::models::{Amenity, PropertyType};
use crate::sources::UploadRequest;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Most images a single listing may carry
pub const MAX_IMAGES: usize = 10;

/// Seller form as filled in. Images are URLs already hosted on the image
/// CDN.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingDraft {
    pub seller_id: u64,
    pub name: String,
    pub owner_name: String,
    pub location: String,
    pub address: String,
    pub price_range: String,
    pub negotiable: bool,
    pub size: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: String,
    pub contacts: String,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
}

impl ListingDraft {
    pub fn validate(&self) -> Result<UploadRequest> {
        let required = [
            ("name", &self.name),
            ("owner_name", &self.owner_name),
            ("location", &self.location),
            ("price_range", &self.price_range),
            ("description", &self.description),
            ("size", &self.size),
            ("contacts", &self.contacts),
            ("type", &self.property_type),
        ];
        let mut missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        // 0 is what an absent seller_id deserializes to
        if self.seller_id == 0 {
            missing.insert(0, "seller_id");
        }
        if !missing.is_empty() {
            return Err(MarketError::invalid_listing(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let mut images: Vec<String> = self
            .images
            .iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if images.is_empty() {
            return Err(MarketError::invalid_listing("at least one image is required"));
        }
        if images.len() > MAX_IMAGES {
            warn!(
                "Keeping the first {} of {} images",
                MAX_IMAGES,
                images.len()
            );
            images.truncate(MAX_IMAGES);
        }

        let property_type = self
            .property_type
            .parse::<PropertyType>()
            .map_err(|value| MarketError::invalid_listing(format!("unknown type '{}'", value)))?;

        let amenities = self
            .amenities
            .iter()
            .map(|name| {
                name.parse::<Amenity>().map_err(|value| {
                    MarketError::invalid_listing(format!("unknown amenity '{}'", value))
                })
            })
            .collect::<Result<BTreeSet<_>>>()?;

        Ok(UploadRequest {
            seller_id: self.seller_id,
            name: self.name.trim().to_string(),
            owner_name: self.owner_name.trim().to_string(),
            location: self.location.trim().to_string(),
            address: self.address.trim().to_string(),
            price_range: self.price_range.trim().to_string(),
            negotiable: self.negotiable,
            size: self.size.trim().to_string(),
            property_type,
            description: self.description.trim().to_string(),
            images,
            amenities,
            contacts: self.contacts.trim().to_string(),
        })
    }
}
