//! Property listing search for the TerraLink marketplace.
//!
//! Listings come from a [`sources::ListingSource`], are normalized into
//! strict [`models::PropertyRecord`]s, and are narrowed by the pure
//! [`filter::filter_properties`] engine. [`filter::ListingBoard`] holds the
//! page state around it.

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod sources;
pub mod upload;

pub use error::{FilterError, MarketError, Result};
pub use filter::{filter_properties, Criteria, CriteriaDraft, ListingBoard};
pub use models::{Amenity, Price, PropertyId, PropertyRecord, PropertyType};
