use crate::config::Config;
use crate::error::{MarketError, Result};
use crate::models::ingest::{parse_details, parse_listings, LISTING_KEYS};
use crate::models::{PropertyDetails, PropertyId, PropertyRecord};
use crate::sources::traits::{ListingSource, ShortlistStore};
use crate::sources::types::{
    AddOutcome, ApiMessage, BuyerId, BuyerQuery, ContactOutcome, ContactReply, Shortlist,
    ShortlistEntry, UploadRequest,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// REST client for the marketplace backend
pub struct MarketplaceClient {
    client: Client,
    base_url: String,
}

impl MarketplaceClient {
    /// Create a client for `base_url` with default timeouts
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let config = Config {
            api_base_url: base_url.into(),
            ..Config::default()
        };
        Self::from_config(&config)
    }

    /// Create a client from runtime configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| MarketError::http("building HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the JSON reply. Non-success statuses are
    /// turned into errors carrying the backend's `error` text.
    async fn send(&self, request: RequestBuilder, context: &str) -> Result<(StatusCode, Value)> {
        debug!("Sending request: {}", context);

        let response = request
            .send()
            .await
            .map_err(|e| MarketError::http(context, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MarketError::http(context, e))?;

        if !status.is_success() {
            return Err(status_error(status, &body, context));
        }

        let value: Value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).map_err(|e| MarketError::json(context, e))?
        };
        Ok((status, value))
    }

    /// Detail view of a single listing
    pub async fn property_details(&self, id: &PropertyId) -> Result<PropertyDetails> {
        let request = self.client.get(self.url(&format!("/explore/{}", id)));
        let (_, value) = self.send(request, "fetching listing details").await?;
        parse_details(&value)
    }

    /// Ask the backend to exchange buyer and seller emails for a favorite
    pub async fn contact(&self, buyer: BuyerId, id: &PropertyId) -> Result<ContactOutcome> {
        let request = self
            .client
            .get(self.url(&format!("/email/{}/{}", buyer, id)));
        let (_, value) = self.send(request, "requesting contact emails").await?;

        let reply: ContactReply =
            serde_json::from_value(value).map_err(|e| MarketError::json("contact reply", e))?;
        match (reply.buyer_email, reply.seller_email) {
            (Some(buyer_email), Some(seller_email)) => Ok(ContactOutcome::Emails {
                buyer_email,
                seller_email,
            }),
            _ => {
                debug!("Contact reply without emails: {:?}", reply.message);
                Ok(ContactOutcome::LimitReached)
            }
        }
    }

    /// Publish a seller's listing
    pub async fn upload(&self, listing: &UploadRequest) -> Result<()> {
        let request = self.client.post(self.url("/upload")).json(listing);
        self.send(request, "uploading listing").await?;
        info!("Uploaded listing '{}'", listing.name);
        Ok(())
    }
}

/// Error for a non-success reply. The body may be the backend's JSON
/// envelope or an HTML page from a proxy or the framework.
fn status_error(status: StatusCode, body: &str, context: &str) -> MarketError {
    let reply: ApiMessage = serde_json::from_str(body).unwrap_or_default();
    let message = reply
        .error
        .or(reply.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    warn!("{} failed with status {}: {}", context, status, message);
    if status == StatusCode::NOT_FOUND {
        MarketError::not_found(message)
    } else {
        MarketError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ListingSource for MarketplaceClient {
    async fn fetch_listings(&self) -> Result<Vec<PropertyRecord>> {
        info!("Fetching listings from {}", self.base_url);

        let request = self.client.get(self.url("/explore"));
        let (_, value) = self.send(request, "fetching listings").await?;
        let records = parse_listings(&value, &LISTING_KEYS)?;

        info!("Fetched {} listings", records.len());
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "marketplace"
    }
}

#[async_trait]
impl ShortlistStore for MarketplaceClient {
    async fn add(
        &self,
        kind: Shortlist,
        buyer: BuyerId,
        property: &PropertyId,
    ) -> Result<AddOutcome> {
        let body = ShortlistEntry {
            buyer_id: buyer,
            property_id: property,
        };
        let request = self.client.post(self.url(kind.add_path())).json(&body);
        let (status, _) = self.send(request, &format!("adding to {}", kind)).await?;

        // 201 for a new entry, 200 when it was already there
        if status == StatusCode::CREATED {
            Ok(AddOutcome::Added)
        } else {
            Ok(AddOutcome::AlreadyPresent)
        }
    }

    async fn list(&self, kind: Shortlist, buyer: BuyerId) -> Result<Vec<PropertyRecord>> {
        let request = self
            .client
            .post(self.url(kind.list_path()))
            .json(&BuyerQuery { buyer_id: buyer });
        let (_, value) = self.send(request, &format!("listing {}", kind)).await?;
        parse_listings(&value, &[kind.list_key()])
    }

    async fn remove(&self, kind: Shortlist, buyer: BuyerId, property: &PropertyId) -> Result<()> {
        match kind {
            Shortlist::Favorites => {
                let request = self
                    .client
                    .delete(self.url(&format!("/cart/{}/{}", buyer, property)));
                self.send(request, "removing favorite").await?;
                Ok(())
            }
            Shortlist::Interests => Err(MarketError::Unsupported {
                what: "removing an interest".to_string(),
            }),
        }
    }
}
