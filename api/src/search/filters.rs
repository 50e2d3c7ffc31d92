use crate::domain::{BusinessType, PartCondition, SortOrder};
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const MAX_QUERY_CHARS: usize = 200;
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("minPrice `{min}` is greater than maxPrice `{max}`")]
    InvertedPriceRange { min: f64, max: f64 },
    #[error("price must be a finite, non-negative number, got `{0}`")]
    InvalidPrice(f64),
    #[error("year must be between 1900 and 2100, got `{0}`")]
    YearOutOfRange(i32),
    #[error("query is longer than 200 characters")]
    QueryTooLong,
}

/// Marketplace search request body. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Matched against part name, description and part number.
    pub query: Option<String>,
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub conditions: Vec<PartCondition>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub seller_types: Vec<BusinessType>,
    pub sort: SortOrder,
    /// Clamped to at least 1.
    pub page: Option<i64>,
    /// Clamped to 1..=100, defaults to 20.
    pub page_size: Option<i64>,
}

impl SearchFilters {
    /// Rejects malformed filters and normalises the rest: text is trimmed, blank text and
    /// empty sets become absent, duplicate set members are dropped.
    pub fn validate(mut self) -> Result<Self, FilterError> {
        self.query = normalize_text(self.query);
        self.make = normalize_text(self.make);
        self.model = normalize_text(self.model);
        self.province = normalize_text(self.province);
        self.city = normalize_text(self.city);
        dedup(&mut self.conditions);
        dedup(&mut self.seller_types);

        if let Some(query) = &self.query {
            if query.chars().count() > MAX_QUERY_CHARS {
                return Err(FilterError::QueryTooLong);
            }
        }
        if let Some(year) = self.year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(FilterError::YearOutOfRange(year));
            }
        }
        for price in [self.min_price, self.max_price].into_iter().flatten() {
            if !price.is_finite() || price < 0.0 {
                return Err(FilterError::InvalidPrice(price));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(FilterError::InvertedPriceRange { min, max });
            }
        }

        Ok(self)
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn dedup<T: PartialEq + Copy>(values: &mut Vec<T>) {
    let mut seen = Vec::with_capacity(values.len());
    values.retain(|v| {
        if seen.contains(v) {
            false
        } else {
            seen.push(*v);
            true
        }
    });
}
