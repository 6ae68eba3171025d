/// Structured error types for the terralink library.
///
/// The binary wraps these in `anyhow` with context; library callers get
/// variants they can match on.
use thiserror::Error;

/// Rejection of a filter form submission. The previously applied criteria
/// stay in effect whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Size must be a number")]
    SizeNotNumeric { value: String },

    #[error("Minimum price {min} is greater than maximum price {max}")]
    InvertedPriceRange { min: f64, max: f64 },

    #[error("Price bounds must be finite numbers (got {value})")]
    NonFinitePrice { value: f64 },

    #[error("Price bounds cannot be negative (got {value})")]
    NegativePrice { value: f64 },

    #[error("Unknown property type '{value}'")]
    UnknownType { value: String },

    #[error("Unknown amenity '{value}'")]
    UnknownAmenity { value: String },
}

/// Main error type for terralink operations
#[derive(Error, Debug)]
pub enum MarketError {
    /// Transport-level HTTP failure
    #[error("HTTP request failed ({context}): {source}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Requested listing or shortlist entry does not exist
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// Payload did not have the expected listing array shape
    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    /// A single listing is missing a required field
    #[error("Missing required field '{field}' in listing")]
    MissingField { field: &'static str },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Seller listing form is incomplete or invalid
    #[error("Invalid listing form: {reason}")]
    InvalidListing { reason: String },

    /// Operation the backend does not offer
    #[error("Unsupported operation: {what}")]
    Unsupported { what: String },

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Result type alias for terralink operations
pub type Result<T> = std::result::Result<T, MarketError>;

impl MarketError {
    pub fn http(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn invalid_listing(reason: impl Into<String>) -> Self {
        Self::InvalidListing {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_error_message() {
        let err = FilterError::SizeNotNumeric {
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "Size must be a number");
    }

    #[test]
    fn test_filter_error_converts() {
        let err: MarketError = FilterError::UnknownAmenity {
            value: "Helipad".to_string(),
        }
        .into();
        assert!(matches!(err, MarketError::Filter(_)));
        assert_eq!(err.to_string(), "Unknown amenity 'Helipad'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "listings.json");
        let err: MarketError = io_err.into();
        assert!(matches!(err, MarketError::Io { .. }));
    }
}
