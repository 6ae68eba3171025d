use serde::{Serialize, Serializer};
use std::fmt;

/// Listing price, normalized once when the record is ingested.
///
/// Backends send prices as display strings such as `"150,000"`. Commas are
/// stripped and the rest must parse as a finite number; anything else is
/// kept verbatim as `Invalid` so it can still be shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Price {
    Amount(f64),
    Invalid(String),
}

impl Price {
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => Price::Amount(value),
            _ => Price::Invalid(raw.to_string()),
        }
    }

    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Amount(v) => Some(*v),
            Price::Invalid(_) => None,
        }
    }

    /// Inclusive range test; an absent bound is open. Invalid prices never
    /// fall inside a range.
    pub fn within(&self, min: Option<f64>, max: Option<f64>) -> bool {
        match self {
            Price::Amount(v) => min.map_or(true, |m| *v >= m) && max.map_or(true, |m| *v <= m),
            Price::Invalid(_) => false,
        }
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Price::Amount(value)
        } else {
            Price::Invalid(value.to_string())
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Amount(v) => serializer.serialize_f64(*v),
            Price::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(v) => f.write_str(&group_thousands(*v)),
            Price::Invalid(raw) if raw.is_empty() => f.write_str("n/a"),
            Price::Invalid(raw) => f.write_str(raw),
        }
    }
}

fn group_thousands(value: f64) -> String {
    let rendered = if value.fract() == 0.0 {
        format!("{:.0}", value.abs())
    } else {
        format!("{:.2}", value.abs())
    };
    let (whole, frac) = match rendered.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::with_capacity(rendered.len() + whole.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_thousands_separators() {
        assert_eq!(Price::parse("150,000"), Price::Amount(150_000.0));
        assert_eq!(Price::parse(" 1,250,000.50 "), Price::Amount(1_250_000.5));
    }

    #[test]
    fn test_unparseable_is_invalid() {
        assert_eq!(
            Price::parse("150k"),
            Price::Invalid("150k".to_string())
        );
        assert!(matches!(Price::parse(""), Price::Invalid(_)));
        assert!(matches!(Price::parse("NaN"), Price::Invalid(_)));
        assert!(matches!(Price::parse("$200,000"), Price::Invalid(_)));
    }

    #[test]
    fn test_within_is_inclusive() {
        let p = Price::Amount(100_000.0);
        assert!(p.within(Some(100_000.0), Some(300_000.0)));
        assert!(p.within(Some(50_000.0), Some(100_000.0)));
        assert!(p.within(None, None));
        assert!(!p.within(Some(100_000.01), None));
    }

    #[test]
    fn test_invalid_never_within() {
        assert!(!Price::Invalid("call".to_string()).within(None, None));
    }

    #[test]
    fn test_display_groups_digits() {
        assert_eq!(Price::Amount(750_000.0).to_string(), "750,000");
        assert_eq!(Price::Amount(95.0).to_string(), "95");
        assert_eq!(Price::Amount(1_000.5).to_string(), "1,000.50");
        assert_eq!(Price::Invalid("ask".to_string()).to_string(), "ask");
    }

    #[test]
    fn test_serializes_to_number_or_raw() {
        assert_eq!(serde_json::to_string(&Price::Amount(5.0)).unwrap(), "5.0");
        assert_eq!(
            serde_json::to_string(&Price::Invalid("ask".into())).unwrap(),
            "\"ask\""
        );
    }
}
