//! Incoming book payloads and their validation.
//!
//! Both the JSON API and the web forms reduce their request body to a
//! [`BookPayload`]: every field is optional and untyped until
//! [`BookPayload::validate`] has looked at it. [`BookPayload::into_input`]
//! is the only way to obtain a typed [`BookInput`], so nothing reaches the
//! repository without passing through the same rules.

use serde_json::Value;
use utoipa::ToSchema;

use super::book::{parse_iso8601, BookInput};

pub const NAME_REQUIRED: &str = "Name is required and must be a non-empty string";
pub const AUTHOR_REQUIRED: &str = "Author is required and must be a non-empty string";
pub const PRICE_REQUIRED: &str = "Price is required and must be a non-negative number";
pub const PRICE_INVALID: &str = "Price must be a valid number";
pub const DATE_INVALID: &str = "Published date must be a valid date";

/// Raw create/update request body
#[derive(Debug, Clone, Default, PartialEq, ToSchema)]
pub struct BookPayload {
    #[schema(value_type = String, example = "Dune")]
    pub name: Option<Value>,
    #[schema(value_type = String, example = "Frank Herbert")]
    pub author: Option<Value>,
    #[schema(value_type = f64, example = 12.5)]
    pub price: Option<Value>,
    /// ISO-8601 date or date/time; defaults to now on create, kept on update
    #[schema(value_type = Option<String>, example = "1965-08-01")]
    pub published_date: Option<Value>,
}

enum Price {
    Missing,
    Invalid,
    Number(f64),
}

impl BookPayload {
    /// Build a payload from an arbitrary JSON document.
    /// Anything that is not an object yields an empty payload; nulls count as missing.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());

        Self {
            name: take("name"),
            author: take("author"),
            price: take("price"),
            published_date: take("publishedDate"),
        }
    }

    /// Check every field and collect all failures, in field order
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if non_blank(&self.name).is_none() {
            errors.push(NAME_REQUIRED.to_string());
        }
        if non_blank(&self.author).is_none() {
            errors.push(AUTHOR_REQUIRED.to_string());
        }
        match self.price() {
            Price::Missing => errors.push(PRICE_REQUIRED.to_string()),
            Price::Invalid => errors.push(PRICE_INVALID.to_string()),
            Price::Number(price) if price < 0.0 => errors.push(PRICE_REQUIRED.to_string()),
            Price::Number(_) => {}
        }
        if let Err(()) = self.published_date() {
            errors.push(DATE_INVALID.to_string());
        }

        errors
    }

    /// Validate and coerce into typed fields
    pub fn into_input(self) -> Result<BookInput, Vec<String>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        match (
            non_blank(&self.name),
            non_blank(&self.author),
            self.price(),
            self.published_date(),
        ) {
            (Some(name), Some(author), Price::Number(price), Ok(published_date)) => Ok(BookInput {
                name: name.to_string(),
                author: author.to_string(),
                price,
                published_date,
            }),
            _ => Err(errors),
        }
    }

    fn price(&self) -> Price {
        let parsed = match &self.price {
            None => return Price::Missing,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) if s.trim().is_empty() => return Price::Missing,
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };
        match parsed {
            Some(price) if price.is_finite() => Price::Number(price),
            _ => Price::Invalid,
        }
    }

    /// `Ok(None)` when absent or blank, `Err` when present but unparseable
    fn published_date(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>, ()> {
        match &self.published_date {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => parse_iso8601(s).map(Some).ok_or(()),
            Some(_) => Err(()),
        }
    }
}

fn non_blank(value: &Option<Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}
