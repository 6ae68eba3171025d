//! Boundary between loosely shaped backend JSON and strict records.
//!
//! The marketplace backend has shipped several payload shapes over time
//! (`price` vs `price_range`, CSV vs array images, `size` vs `area`).
//! Everything is folded into [`PropertyRecord`] here so the filter engine
//! never sees untyped values.

use super::{Amenity, Price, PropertyDetails, PropertyId, PropertyRecord, PropertyType};
use crate::error::{MarketError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Array keys under which the backend nests listing lists
pub const LISTING_KEYS: [&str; 3] = ["properties", "cart", "interests"];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl RawText {
    fn into_string(self) -> String {
        match self {
            RawText::Text(s) => s,
            RawText::Number(n) if n.fract() == 0.0 => format!("{:.0}", n),
            RawText::Number(n) => n.to_string(),
            RawText::Flag(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawList {
    Items(Vec<String>),
    Csv(String),
}

impl RawList {
    fn into_vec(self) -> Vec<String> {
        let items = match self {
            RawList::Items(items) => items,
            RawList::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawListing {
    id: Option<PropertyId>,
    #[serde(alias = "title")]
    name: Option<String>,
    location: Option<String>,
    #[serde(alias = "price_range")]
    price: Option<RawText>,
    #[serde(alias = "image")]
    images: Option<RawList>,
    #[serde(alias = "area")]
    size: Option<RawText>,
    amenities: Option<RawList>,
    #[serde(rename = "type", alias = "property_type")]
    property_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDetails {
    location: Option<String>,
    address: Option<String>,
    #[serde(rename = "type")]
    property_type: Option<String>,
    owner: Option<String>,
    negotiable: Option<bool>,
    price: Option<RawText>,
    size: Option<RawText>,
    contacts: Option<RawText>,
    amenities: Option<RawList>,
    description: Option<String>,
    images: Option<RawList>,
}

fn ingest_price(raw: Option<RawText>) -> Price {
    match raw {
        Some(RawText::Number(n)) => Price::from(n),
        Some(other) => Price::parse(&other.into_string()),
        None => Price::Invalid(String::new()),
    }
}

fn ingest_amenities(raw: Option<RawList>) -> BTreeSet<Amenity> {
    raw.map(RawList::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|name| match name.parse::<Amenity>() {
            Ok(a) => Some(a),
            Err(unknown) => {
                warn!("Dropping unknown amenity '{}'", unknown);
                None
            }
        })
        .collect()
}

fn ingest_type(raw: Option<String>) -> Option<PropertyType> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse::<PropertyType>() {
        Ok(t) => Some(t),
        Err(unknown) => {
            debug!("Unrecognized property type '{}'", unknown);
            None
        }
    }
}

fn into_record(raw: RawListing) -> Result<PropertyRecord> {
    let id = raw.id.ok_or(MarketError::MissingField { field: "id" })?;
    let name = raw
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(MarketError::MissingField { field: "name" })?;

    Ok(PropertyRecord {
        id,
        name,
        location: raw.location.unwrap_or_default(),
        price: ingest_price(raw.price),
        images: raw.images.map(RawList::into_vec).unwrap_or_default(),
        size: raw.size.map(RawText::into_string).unwrap_or_default(),
        amenities: ingest_amenities(raw.amenities),
        property_type: ingest_type(raw.property_type),
    })
}

/// Parse one listing object into a record.
pub fn parse_listing(value: &Value) -> Result<PropertyRecord> {
    let raw: RawListing =
        serde_json::from_value(value.clone()).map_err(|e| MarketError::json("listing", e))?;
    into_record(raw)
}

/// Parse a listing payload: a bare array, or an object nesting the array
/// under one of `keys`. An object carrying only a `message` is the
/// backend's way of saying the list is empty.
///
/// Individual listings that fail to parse are skipped with a warning; a
/// payload without the expected array shape is an error.
pub fn parse_listings(payload: &Value, keys: &[&str]) -> Result<Vec<PropertyRecord>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match keys.iter().find_map(|k| map.get(*k)) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(MarketError::malformed(format!(
                    "listing field is {} instead of an array",
                    json_kind(other)
                )))
            }
            None if map.contains_key("message") => {
                let message = map.get("message").unwrap_or(&serde_json::Value::Null);
                debug!("Payload carries no listings: {}", message);
                return Ok(Vec::new());
            }
            None => {
                return Err(MarketError::malformed(format!(
                    "expected one of {:?} in payload",
                    keys
                )))
            }
        },
        other => {
            return Err(MarketError::malformed(format!(
                "expected array or object, got {}",
                json_kind(other)
            )))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match parse_listing(item) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping listing {}: {}", idx, e),
        }
    }

    debug!("Ingested {} of {} listings", records.len(), items.len());
    Ok(records)
}

/// Parse the single-listing detail payload.
pub fn parse_details(value: &Value) -> Result<PropertyDetails> {
    let raw: RawDetails =
        serde_json::from_value(value.clone()).map_err(|e| MarketError::json("details", e))?;

    Ok(PropertyDetails {
        location: raw.location.unwrap_or_default(),
        address: raw.address.unwrap_or_default(),
        property_type: raw.property_type.unwrap_or_default(),
        owner: raw.owner.unwrap_or_default(),
        negotiable: raw.negotiable.unwrap_or(false),
        price: ingest_price(raw.price),
        size: raw.size.map(RawText::into_string).unwrap_or_default(),
        contacts: raw.contacts.map(RawText::into_string).unwrap_or_default(),
        amenities: ingest_amenities(raw.amenities),
        description: raw.description.unwrap_or_default(),
        images: raw.images.map(RawList::into_vec).unwrap_or_default(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explore_payload() {
        let payload = json!({
            "properties": [{
                "id": 1,
                "name": "Serene Countryside Land",
                "location": "Mumbai, Maharashtra",
                "price": "150,000",
                "images": ["https://img/1.jpg", "https://img/2.jpg"],
                "size": "10 acres",
                "amenities": ["Water", "Electricity"]
            }]
        });

        let records = parse_listings(&payload, &LISTING_KEYS).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, PropertyId::Numeric(1));
        assert_eq!(r.price, Price::Amount(150_000.0));
        assert_eq!(r.images.len(), 2);
        assert_eq!(r.size, "10 acres");
        assert!(r.amenities.contains(&Amenity::Electricity));
        assert_eq!(r.property_type, None);
    }

    #[test]
    fn test_legacy_shape_with_csv_fields() {
        let payload = json!([{
            "id": 4,
            "name": "Commercial Land Near Highway",
            "location": "Delhi, Delhi",
            "price_range": "300,000",
            "area": "2 acres",
            "images": "https://img/a.jpg, https://img/b.jpg,",
            "amenities": "Water,Parking",
            "type": "Commercial Land"
        }]);

        let records = parse_listings(&payload, &LISTING_KEYS).unwrap();
        let r = &records[0];
        assert_eq!(r.price, Price::Amount(300_000.0));
        assert_eq!(r.size, "2 acres");
        assert_eq!(r.images, vec!["https://img/a.jpg", "https://img/b.jpg"]);
        assert_eq!(
            r.amenities,
            [Amenity::Water, Amenity::Parking].into_iter().collect()
        );
        assert_eq!(r.property_type, Some(PropertyType::CommercialLand));
    }

    #[test]
    fn test_title_alias_and_numeric_price() {
        let r = parse_listing(&json!({"id": "demo-1", "title": "Plot", "price": 95000}))
            .unwrap();
        assert_eq!(r.name, "Plot");
        assert_eq!(r.id, PropertyId::Text("demo-1".to_string()));
        assert_eq!(r.price, Price::Amount(95_000.0));
    }

    #[test]
    fn test_unknown_amenities_dropped() {
        let r = parse_listing(&json!({
            "id": 1, "name": "x", "amenities": ["Water", "Helipad"]
        }))
        .unwrap();
        assert_eq!(r.amenities, [Amenity::Water].into_iter().collect());
    }

    #[test]
    fn test_bad_listing_skipped_not_fatal() {
        let payload = json!({"properties": [
            {"name": "no id"},
            {"id": 2, "name": "ok"},
            {"id": 3}
        ]});
        let records = parse_listings(&payload, &LISTING_KEYS).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, PropertyId::Numeric(2));
    }

    #[test]
    fn test_message_only_is_empty_list() {
        let records = parse_listings(&json!({"message": "Cart is empty"}), &LISTING_KEYS).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = parse_listings(&json!({"properties": "nope"}), &LISTING_KEYS).unwrap_err();
        assert!(matches!(err, MarketError::MalformedPayload { .. }));

        let err = parse_listings(&json!({"listings": []}), &LISTING_KEYS).unwrap_err();
        assert!(matches!(err, MarketError::MalformedPayload { .. }));

        let err = parse_listings(&json!(42), &LISTING_KEYS).unwrap_err();
        assert!(matches!(err, MarketError::MalformedPayload { .. }));
    }

    #[test]
    fn test_missing_price_is_invalid() {
        let r = parse_listing(&json!({"id": 1, "name": "x"})).unwrap();
        assert!(matches!(r.price, Price::Invalid(_)));
    }

    #[test]
    fn test_details_payload() {
        let details = parse_details(&json!({
            "location": "Chennai, Tamil Nadu",
            "address": "12 Beach Road",
            "type": "Residential Land",
            "owner": "Priya Sharma",
            "negotiable": true,
            "price": "750,000",
            "size": "1 acre",
            "contacts": "+91 9876543214",
            "amenities": ["Water", "Pool"],
            "description": "Beachfront plot",
            "images": []
        }))
        .unwrap();
        assert_eq!(details.owner, "Priya Sharma");
        assert!(details.negotiable);
        assert_eq!(details.price, Price::Amount(750_000.0));
        assert!(details.amenities.contains(&Amenity::Pool));
    }
}
