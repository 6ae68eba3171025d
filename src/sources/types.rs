use crate::models::{Amenity, PropertyId, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Backend buyer account id
pub type BuyerId = u64;

/// Which of a buyer's lists an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortlist {
    /// Stored by the backend as the buyer's cart
    Favorites,
    Interests,
}

impl Shortlist {
    pub(crate) fn add_path(&self) -> &'static str {
        match self {
            Shortlist::Favorites => "/cart/add",
            Shortlist::Interests => "/interest/add",
        }
    }

    pub(crate) fn list_path(&self) -> &'static str {
        match self {
            Shortlist::Favorites => "/cart",
            Shortlist::Interests => "/interest",
        }
    }

    pub(crate) fn list_key(&self) -> &'static str {
        match self {
            Shortlist::Favorites => "cart",
            Shortlist::Interests => "interests",
        }
    }
}

impl fmt::Display for Shortlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortlist::Favorites => f.write_str("favorites"),
            Shortlist::Interests => f.write_str("interests"),
        }
    }
}

/// Result of adding a listing to a shortlist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Result of asking the backend to share contact emails for a favorite.
/// The backend releases them once per favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    Emails {
        buyer_email: String,
        seller_email: String,
    },
    LimitReached,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ShortlistEntry<'a> {
    pub buyer_id: BuyerId,
    pub property_id: &'a PropertyId,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct BuyerQuery {
    pub buyer_id: BuyerId,
}

/// `{message}` / `{error}` envelope the backend wraps status replies in
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiMessage {
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContactReply {
    pub buyer_email: Option<String>,
    pub seller_email: Option<String>,
    pub message: Option<String>,
}

/// Body of `POST /upload`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRequest {
    pub seller_id: u64,
    pub name: String,
    pub owner_name: String,
    pub location: String,
    pub address: String,
    /// Price exactly as the seller typed it
    pub price_range: String,
    pub negotiable: bool,
    pub size: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub description: String,
    pub images: Vec<String>,
    pub amenities: BTreeSet<Amenity>,
    pub contacts: String,
}
