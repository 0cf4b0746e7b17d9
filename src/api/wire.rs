//! Lenient decoders for the shapes the backend actually emits.
//!
//! Documents that pass through MongoDB extended JSON arrive with ids as
//! `{"$oid": "..."}` and dates as `{"$date": ...}`. Documents produced by
//! FastAPI use plain strings, and naive timestamps carry no offset.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectIdRepr {
    Plain(String),
    Extended {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DateValue {
    Text(String),
    Millis(i64),
    Long {
        #[serde(rename = "$numberLong")]
        number_long: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DateRepr {
    Text(String),
    Extended {
        #[serde(rename = "$date")]
        date: DateValue,
    },
}

/// Parse RFC 3339, falling back to a naive ISO timestamp taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn resolve_date<E: serde::de::Error>(repr: DateRepr) -> Result<DateTime<Utc>, E> {
    let value = match repr {
        DateRepr::Text(text) => DateValue::Text(text),
        DateRepr::Extended { date } => date,
    };

    match value {
        DateValue::Text(text) => parse_timestamp(&text)
            .ok_or_else(|| E::custom(format!("invalid timestamp: {}", text))),
        DateValue::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| E::custom(format!("timestamp out of range: {}", ms))),
        DateValue::Long { number_long } => {
            let ms: i64 = number_long
                .parse()
                .map_err(|_| E::custom(format!("invalid $numberLong: {}", number_long)))?;
            Utc.timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| E::custom(format!("timestamp out of range: {}", ms)))
        }
    }
}

pub fn object_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ObjectIdRepr::deserialize(deserializer)? {
        ObjectIdRepr::Plain(id) => id,
        ObjectIdRepr::Extended { oid } => oid,
    })
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    resolve_date(DateRepr::deserialize(deserializer)?)
}

pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<DateRepr>::deserialize(deserializer)? {
        Some(repr) => resolve_date(repr).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Doc {
        #[serde(deserialize_with = "object_id")]
        id: String,
        #[serde(deserialize_with = "timestamp")]
        at: DateTime<Utc>,
        #[serde(default, deserialize_with = "optional_timestamp")]
        maybe: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_plain_id_and_naive_timestamp() {
        let doc: Doc =
            serde_json::from_str(r#"{"id": "abc", "at": "2025-03-04T09:00:00"}"#).unwrap();
        assert_eq!(doc.id, "abc");
        assert_eq!(doc.at.hour(), 9);
        assert!(doc.maybe.is_none());
    }

    #[test]
    fn test_extended_json_shapes() {
        let doc: Doc = serde_json::from_str(
            r#"{"id": {"$oid": "65f0c0ffee"}, "at": {"$date": 1700000000000}, "maybe": {"$date": "2024-01-02T03:04:05.123Z"}}"#,
        )
        .unwrap();
        assert_eq!(doc.id, "65f0c0ffee");
        assert_eq!(doc.at.timestamp(), 1_700_000_000);
        assert_eq!(doc.maybe.unwrap().day(), 2);
    }

    #[test]
    fn test_number_long_date() {
        let doc: Doc = serde_json::from_str(
            r#"{"id": "x", "at": {"$date": {"$numberLong": "1700000000000"}}}"#,
        )
        .unwrap();
        assert_eq!(doc.at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_garbage_timestamp_is_rejected() {
        let result = serde_json::from_str::<Doc>(r#"{"id": "x", "at": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_offset_timestamp_normalized_to_utc() {
        let parsed = parse_timestamp("2025-06-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed.hour(), 8);
    }
}
