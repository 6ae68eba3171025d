use super::Criteria;
use crate::error::FilterError;
use crate::models::{Amenity, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Raw values of the filter form before they are committed.
///
/// Text fields are kept exactly as typed; `validate` decides whether the
/// form can become [`Criteria`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaDraft {
    pub search_text: String,
    /// Category label; empty means any
    pub property_type: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub location: String,
    pub size: String,
    pub amenities: Vec<String>,
}

impl CriteriaDraft {
    /// Start a draft from the criteria currently in effect.
    pub fn from_criteria(criteria: &Criteria) -> Self {
        Self {
            search_text: criteria.search_text.clone(),
            property_type: criteria
                .property_type
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            price_min: criteria.price_min,
            price_max: criteria.price_max,
            location: criteria.location.clone(),
            size: criteria.size.clone(),
            amenities: criteria
                .amenities
                .iter()
                .map(|a| a.label().to_string())
                .collect(),
        }
    }

    /// Check-box toggle: add the amenity if absent, remove it if present.
    pub fn toggle_amenity(&mut self, amenity: Amenity) {
        let label = amenity.label();
        if let Some(pos) = self
            .amenities
            .iter()
            .position(|a| a.eq_ignore_ascii_case(label))
        {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(label.to_string());
        }
    }

    pub fn validate(&self) -> Result<Criteria, FilterError> {
        if !self.size.is_empty() && !is_number(&self.size) {
            return Err(FilterError::SizeNotNumeric {
                value: self.size.clone(),
            });
        }

        for bound in [self.price_min, self.price_max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(FilterError::NonFinitePrice { value: bound });
            }
            if bound < 0.0 {
                return Err(FilterError::NegativePrice { value: bound });
            }
        }
        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(FilterError::InvertedPriceRange { min, max });
            }
        }

        let property_type = if self.property_type.trim().is_empty() {
            None
        } else {
            Some(
                self.property_type
                    .parse::<PropertyType>()
                    .map_err(|value| FilterError::UnknownType { value })?,
            )
        };

        let amenities = self
            .amenities
            .iter()
            .map(|name| {
                name.parse::<Amenity>()
                    .map_err(|value| FilterError::UnknownAmenity { value })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Criteria {
            search_text: self.search_text.clone(),
            property_type,
            price_min: self.price_min,
            price_max: self.price_max,
            location: self.location.clone(),
            size: self.size.clone(),
            amenities,
        })
    }
}

/// Numeric test for the size box. Surrounding whitespace is ignored and
/// non-finite spellings like `inf` are rejected.
fn is_number(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}
