//! Book model

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book record as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Generated identifier, never reused
    pub book_id: i64,
    pub name: String,
    pub author: String,
    pub price: f64,
    #[serde(serialize_with = "serialize_iso8601")]
    #[schema(value_type = String, format = DateTime, example = "2008-05-01T00:00:00.000Z")]
    pub published_date: DateTime<Utc>,
}

/// Validated, typed book fields ready to be written
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BookInput {
    #[validate(length(min = 1, message = "Name is required and must be a non-empty string"))]
    pub name: String,
    #[validate(length(min = 1, message = "Author is required and must be a non-empty string"))]
    pub author: String,
    #[validate(range(min = 0.0, message = "Price is required and must be a non-negative number"))]
    pub price: f64,
    /// `None` means "now" on create and "keep" on update
    pub published_date: Option<DateTime<Utc>>,
}

/// Format a timestamp the way the catalog exposes it (UTC, millisecond precision)
pub fn format_iso8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso8601<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso8601(date))
}

/// Parse an ISO-8601 date or date/time. Values without an offset are taken as UTC.
///
/// Dates are kept at millisecond precision, the precision they are written out with.
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    parse_any(value.trim()).map(|date| date.trunc_subsecs(3))
}

/// Current time at the precision stored dates carry
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn parse_any(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}
