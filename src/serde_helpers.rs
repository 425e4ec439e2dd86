//! Serde adapters shared by the request and response types, plus the decode
//! step used by the request executor.
//!
//! With the `tracing` feature enabled, decoding reports response fields that no
//! record captures, which is the earliest signal that the API has grown.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserializer, Serializer};
use serde_json::Value;

/// `strftime` pattern for date filters on the wire: UTC, second precision and a
/// literal `Z`.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A `serde_as` adapter that writes a [`DateTime<Utc>`] as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Sub-second precision is dropped rather than rounded.
pub struct WireDate;

impl serde_with::SerializeAs<DateTime<Utc>> for WireDate {
    fn serialize_as<S>(source: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&source.format(WIRE_DATE_FORMAT))
    }
}

/// A `serde_as` adapter that accepts either a JSON string or integer as `String`.
///
/// The API is not consistent about quoting identifiers, e.g. tag ids arrive as
/// `"100"` from one endpoint and `100` from another.
pub struct StringFromAny;

impl<'de> serde_with::DeserializeAs<'de, String> for StringFromAny {
    fn deserialize_as<D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AnyId;

        impl Visitor<'_> for AnyId {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string or integer identifier")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
                Ok(v.to_owned())
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
                Ok(v)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
                Ok(v.to_string())
            }
        }

        deserializer.deserialize_any(AnyId)
    }
}

impl serde_with::SerializeAs<String> for StringFromAny {
    fn serialize_as<S>(source: &String, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(source)
    }
}

/// Decodes a JSON body into `T`, logging every field `T` does not capture.
///
/// Unknown fields never fail the decode. When the decode does fail, the path
/// of the offending value is logged before the error is returned.
#[cfg(feature = "tracing")]
pub fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    use std::any::type_name;

    let original = value.clone();
    let mut ignored: Vec<String> = Vec::new();

    let decoded: std::result::Result<T, serde_json::Error> =
        serde_ignored::deserialize(value, |path| ignored.push(path.to_string()));

    let decoded = match decoded {
        Ok(decoded) => decoded,
        Err(e) => {
            let text = original.to_string();
            let jd = &mut serde_json::Deserializer::from_str(&text);
            let located: std::result::Result<T, _> = serde_path_to_error::deserialize(jd);
            if let Err(located) = located {
                let path = located.path().to_string();
                tracing::error!(
                    type_name = %type_name::<T>(),
                    path = %path,
                    value = %describe(value_at(&original, &path)),
                    error = %located.inner(),
                    "response did not match the requested type"
                );
            }
            return Err(e.into());
        }
    };

    for path in ignored {
        tracing::warn!(
            type_name = %type_name::<T>(),
            field = %path,
            value = %describe(value_at(&original, &path)),
            "unknown field in API response"
        );
    }

    Ok(decoded)
}

#[cfg(not(feature = "tracing"))]
pub fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Walks `path` (as printed by `serde_ignored` or `serde_path_to_error`, e.g.
/// `markets[3].?.tags.0.slug`) through `value`.
#[cfg(feature = "tracing")]
fn value_at<'value>(value: &'value Value, path: &str) -> Option<&'value Value> {
    path.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty() && *segment != "?")
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
            _ => None,
        })
}

#[cfg(feature = "tracing")]
fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "<missing>".to_owned(), Value::to_string)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use serde::{Deserialize, Serialize};
    use serde_with::serde_as;

    use super::*;

    #[serde_as]
    #[derive(Debug, Serialize)]
    struct DateFilter {
        #[serde_as(as = "WireDate")]
        end_date_max: DateTime<Utc>,
        #[serde_as(as = "Option<WireDate>")]
        start_date_min: Option<DateTime<Utc>>,
    }

    #[serde_as]
    #[derive(Debug, Deserialize)]
    struct Identified {
        #[serde_as(as = "StringFromAny")]
        id: String,
        #[serde_as(as = "Option<StringFromAny>")]
        #[serde(default)]
        parent: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Record {
        label: String,
    }

    #[test]
    fn wire_date_uses_second_precision_utc() {
        let filter = DateFilter {
            end_date_max: Utc
                .with_ymd_and_hms(2025, 12, 31, 23, 59, 59)
                .single()
                .expect("valid date"),
            start_date_min: Some(
                Utc.with_ymd_and_hms(2025, 10, 15, 0, 0, 0)
                    .single()
                    .expect("valid date"),
            ),
        };

        let encoded = serde_html_form::to_string(&filter).expect("encodes");

        assert_eq!(
            encoded,
            "end_date_max=2025-12-31T23%3A59%3A59Z&start_date_min=2025-10-15T00%3A00%3A00Z"
        );
    }

    #[test]
    fn wire_date_drops_subseconds() {
        let date = Utc
            .timestamp_millis_opt(1_700_000_000_999)
            .single()
            .expect("valid timestamp");

        assert_eq!(
            date.format(WIRE_DATE_FORMAT).to_string(),
            "2023-11-14T22:13:20Z"
        );
    }

    #[test]
    fn string_from_any_accepts_numbers_and_strings() {
        let quoted: Identified =
            serde_json::from_value(serde_json::json!({ "id": "100", "parent": 7 }))
                .expect("decodes");
        let bare: Identified =
            serde_json::from_value(serde_json::json!({ "id": 100 })).expect("decodes");

        assert_eq!(quoted.id, "100");
        assert_eq!(quoted.parent.as_deref(), Some("7"));
        assert_eq!(bare.id, "100");
        assert_eq!(bare.parent, None);
    }

    #[test]
    fn string_from_any_rejects_objects() {
        let result = serde_json::from_value::<Identified>(serde_json::json!({ "id": {} }));

        assert!(result.is_err(), "object ids must not decode");
    }

    #[test]
    fn deserialize_tolerates_unknown_fields() {
        let record: Record = deserialize_with_warnings(serde_json::json!({
            "label": "NFL",
            "forceShow": true
        }))
        .expect("decodes");

        assert_eq!(record.label, "NFL");
    }

    #[test]
    fn deserialize_reports_type_mismatch_as_decode_error() {
        let error = deserialize_with_warnings::<Vec<Record>>(serde_json::json!({ "label": 1 }))
            .expect_err("object is not a list");

        assert_eq!(error.kind(), crate::error::Kind::Decode);
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn value_at_follows_mixed_paths() {
        let json = serde_json::json!({
            "markets": [{ "tags": [{ "slug": "nfl" }] }]
        });

        assert_eq!(
            value_at(&json, "markets[0].?.tags.0.slug"),
            Some(&Value::String("nfl".to_owned()))
        );
        assert_eq!(value_at(&json, "markets.9"), None);
        assert_eq!(value_at(&json, ""), Some(&json));
        assert_eq!(describe(None), "<missing>");
    }
}
