use crate::error::Result;
use crate::models::{Amenity, PropertyRecord, PropertyType};
use crate::sources::traits::ListingSource;
use async_trait::async_trait;
use tracing::info;

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/300x200";

/// Built-in catalog for demo pages and offline runs
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoListings;

impl DemoListings {
    pub fn new() -> Self {
        Self
    }

    pub fn records(&self) -> Vec<PropertyRecord> {
        let image = || vec![PLACEHOLDER_IMAGE.to_string()];

        vec![
            PropertyRecord::new(1u64, "Serene Countryside Land")
                .with_location("Mumbai, Maharashtra")
                .with_price("150,000")
                .with_size("10 acres")
                .with_type(PropertyType::AgriculturalLand)
                .with_amenities([Amenity::Water, Amenity::Electricity])
                .with_images(image()),
            PropertyRecord::new(2u64, "Lakeside Residential Plot")
                .with_location("Bangalore, Karnataka")
                .with_price("200,000")
                .with_size("5 acres")
                .with_type(PropertyType::ResidentialLand)
                .with_amenities([Amenity::Water, Amenity::Electricity, Amenity::Park])
                .with_images(image()),
            PropertyRecord::new(3u64, "Fertile Agricultural Land")
                .with_location("Hyderabad, Telangana")
                .with_price("95,000")
                .with_size("20 acres")
                .with_type(PropertyType::AgriculturalLand)
                .with_amenities([Amenity::Water])
                .with_images(image()),
            PropertyRecord::new(4u64, "Commercial Land Near Highway")
                .with_location("Delhi, Delhi")
                .with_price("300,000")
                .with_size("2 acres")
                .with_type(PropertyType::CommercialLand)
                .with_amenities([Amenity::Water, Amenity::Electricity, Amenity::Parking])
                .with_images(image()),
            PropertyRecord::new(5u64, "Luxury Beachfront Plot")
                .with_location("Chennai, Tamil Nadu")
                .with_price("750,000")
                .with_size("1 acre")
                .with_type(PropertyType::ResidentialLand)
                .with_amenities([Amenity::Water, Amenity::Electricity, Amenity::Pool])
                .with_images(image()),
        ]
    }
}

#[async_trait]
impl ListingSource for DemoListings {
    async fn fetch_listings(&self) -> Result<Vec<PropertyRecord>> {
        info!("📋 Serving built-in demo listings");
        Ok(self.records())
    }

    fn source_name(&self) -> &'static str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalog() {
        let records = DemoListings::new().fetch_listings().await.unwrap();
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.price.amount().is_some()));
        assert!(records.iter().all(|r| !r.images.is_empty()));
    }
}
