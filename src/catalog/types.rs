use serde::{Deserialize, Serialize};

/// Raw listing filter exactly as it arrives from a query string or form.
/// Every field is opaque text and may fail to parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Property category (`house`, `apartment`, `duplex`)
    #[serde(default, rename = "type")]
    pub property_type: Option<String>,
    /// Minimum monthly price
    #[serde(default)]
    pub min_price: Option<String>,
    /// Maximum monthly price
    #[serde(default)]
    pub max_price: Option<String>,
    /// Minimum number of bedrooms
    #[serde(default)]
    pub bedrooms: Option<String>,
}

/// Normalized listing filter. `None` means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i64>,
}

impl FilterCriteria {
    /// Normalize raw parameters. Empty or unparsable values become absent
    /// constraints instead of errors, so malformed form input still lists.
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            category: params
                .property_type
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            min_price: lenient_int(params.min_price.as_deref()),
            max_price: lenient_int(params.max_price.as_deref()),
            min_bedrooms: lenient_int(params.bedrooms.as_deref()),
        }
    }
}

impl From<&FilterParams> for FilterCriteria {
    fn from(params: &FilterParams) -> Self {
        Self::from_params(params)
    }
}

/// Parse an optional integer, treating failure as absence
pub fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse::<i64>().ok())
}

/// Which way the featured rotation moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(t: &str, min: &str, max: &str, beds: &str) -> FilterParams {
        let opt = |s: &str| Some(s.to_string());
        FilterParams {
            property_type: opt(t),
            min_price: opt(min),
            max_price: opt(max),
            bedrooms: opt(beds),
        }
    }

    #[test]
    fn parses_well_formed_params() {
        let criteria = FilterCriteria::from_params(&params("house", "1000", "2000", "2"));
        assert_eq!(
            criteria,
            FilterCriteria {
                category: Some("house".to_string()),
                min_price: Some(1000),
                max_price: Some(2000),
                min_bedrooms: Some(2),
            }
        );
    }

    #[test]
    fn malformed_and_empty_values_are_absent() {
        let criteria = FilterCriteria::from_params(&params("", "abc", " 5", "2.5"));
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn missing_params_are_absent() {
        assert_eq!(
            FilterCriteria::from_params(&FilterParams::default()),
            FilterCriteria::default()
        );
    }

    #[test]
    fn signed_integers_parse() {
        assert_eq!(lenient_int(Some("-3")), Some(-3));
        assert_eq!(lenient_int(Some("+7")), Some(7));
        assert_eq!(lenient_int(None), None);
    }
}
