pub mod ingest;
pub mod price;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub use price::Price;

/// Listing identifier as issued by the backend (integer) or a demo page (string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyId::Numeric(n) => write!(f, "{}", n),
            PropertyId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for PropertyId {
    type Err = std::convert::Infallible;

    /// Digits become a numeric id; anything else is kept as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<u64>() {
            Ok(n) => PropertyId::Numeric(n),
            Err(_) => PropertyId::Text(s.to_string()),
        })
    }
}

impl From<u64> for PropertyId {
    fn from(n: u64) -> Self {
        PropertyId::Numeric(n)
    }
}

impl From<&str> for PropertyId {
    fn from(s: &str) -> Self {
        PropertyId::Text(s.to_string())
    }
}

/// Listing category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "Agricultural Land")]
    AgriculturalLand,
    #[serde(rename = "Residential Land")]
    ResidentialLand,
    #[serde(rename = "Commercial Land")]
    CommercialLand,
    #[serde(rename = "Recreational Land")]
    RecreationalLand,
    Houses,
    Rentals,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::AgriculturalLand,
        PropertyType::ResidentialLand,
        PropertyType::CommercialLand,
        PropertyType::RecreationalLand,
        PropertyType::Houses,
        PropertyType::Rentals,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::AgriculturalLand => "Agricultural Land",
            PropertyType::ResidentialLand => "Residential Land",
            PropertyType::CommercialLand => "Commercial Land",
            PropertyType::RecreationalLand => "Recreational Land",
            PropertyType::Houses => "Houses",
            PropertyType::Rentals => "Rentals",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PropertyType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| wanted.to_string())
    }
}

/// Amenity vocabulary shared by the upload form and the filter checkboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Amenity {
    Water,
    Electricity,
    Parking,
    Pool,
    Gym,
    Security,
    Park,
    Forest,
}

impl Amenity {
    pub const ALL: [Amenity; 8] = [
        Amenity::Water,
        Amenity::Electricity,
        Amenity::Parking,
        Amenity::Pool,
        Amenity::Gym,
        Amenity::Security,
        Amenity::Park,
        Amenity::Forest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Amenity::Water => "Water",
            Amenity::Electricity => "Electricity",
            Amenity::Parking => "Parking",
            Amenity::Pool => "Pool",
            Amenity::Gym => "Gym",
            Amenity::Security => "Security",
            Amenity::Park => "Park",
            Amenity::Forest => "Forest",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Amenity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Amenity::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| wanted.to_string())
    }
}

/// Core listing record the filter engine works over
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub name: String,
    pub location: String,
    pub price: Price,
    pub images: Vec<String>,
    pub size: String,
    pub amenities: BTreeSet<Amenity>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
}

impl PropertyRecord {
    /// Record with only the required fields set; everything else empty.
    pub fn new(id: impl Into<PropertyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: String::new(),
            price: Price::Invalid(String::new()),
            images: Vec::new(),
            size: String::new(),
            amenities: BTreeSet::new(),
            property_type: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_price(mut self, price: &str) -> Self {
        self.price = Price::parse(price);
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn with_amenities(mut self, amenities: impl IntoIterator<Item = Amenity>) -> Self {
        self.amenities = amenities.into_iter().collect();
        self
    }

    pub fn with_images(mut self, images: impl IntoIterator<Item = String>) -> Self {
        self.images = images.into_iter().collect();
        self
    }
}

/// Full detail view of a single listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDetails {
    pub location: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub owner: String,
    pub negotiable: bool,
    pub price: Price,
    pub size: String,
    pub contacts: String,
    pub amenities: BTreeSet<Amenity>,
    pub description: String,
    pub images: Vec<String>,
}
