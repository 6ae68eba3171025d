pub mod api;
pub mod demo;
pub mod file;
pub mod shortlist;
pub mod traits;
pub mod types;

pub use api::MarketplaceClient;
pub use demo::DemoListings;
pub use file::JsonFileSource;
pub use shortlist::ShortlistSource;
pub use traits::{ListingSource, ShortlistStore};
pub use types::{AddOutcome, BuyerId, ContactOutcome, Shortlist, UploadRequest};
