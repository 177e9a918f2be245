//! JSON body codec.
//!
//! Request bodies are encoded with [`encode`], response bodies decoded with
//! [`decode`]. Timestamps use one fixed representation in both directions,
//! ISO-8601 (RFC 3339) in UTC, through the [`iso8601`] serde helpers.

use bytes::Bytes;
use derive_more::{Display, Error};

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns [`Error::Encoding`](crate::Error::Encoding) if the value cannot be
/// represented as JSON (e.g. a map with non-string keys).
///
/// # Example
///
/// ```
/// use courier_core::codec::encode;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Repo { name: String }
///
/// let bytes = encode(&Repo { name: "x".to_string() }).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"x"}"#);
/// ```
pub fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// A response body that did not match the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("JSON deserialization error at '{path}': {message}")]
pub struct DecodeError {
    path: String,
    message: String,
}

impl DecodeError {
    /// JSON path of the offending field (e.g. `[0].name`), `.` for the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Underlying serde message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the exact field that failed.
///
/// # Example
///
/// ```
/// use courier_core::codec::decode;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Repo { id: u64 }
///
/// let repo: Repo = decode(br#"{"id":1}"#).expect("deserialize");
/// assert_eq!(repo, Repo { id: 1 });
///
/// let err = decode::<Vec<Repo>>(br#"[{"id":"one"}]"#).expect_err("type mismatch");
/// assert_eq!(err.path(), "[0].id");
/// ```
pub fn decode<T: serde::de::DeserializeOwned>(
    bytes: &[u8],
) -> std::result::Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| DecodeError {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })?;
    deserializer.end().map_err(|e| DecodeError {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    Ok(value)
}

/// ISO-8601 timestamps for `chrono::DateTime<Utc>` fields.
///
/// Always written in UTC with a `Z` suffix; sub-second digits are only
/// written when the value has them, so every value survives a round trip.
///
/// ```
/// use chrono::{DateTime, Utc};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "courier_core::codec::iso8601")]
///     at: DateTime<Utc>,
///     #[serde(default, with = "courier_core::codec::iso8601::option")]
///     closed_at: Option<DateTime<Utc>>,
/// }
/// ```
pub mod iso8601 {
    use std::ops::RangeInclusive;

    use chrono::{DateTime, Datelike, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de, ser};

    /// Years an RFC 3339 timestamp can carry; anything else cannot be read back.
    pub const YEARS: RangeInclusive<i32> = 0..=9999;

    fn check_year(value: &DateTime<Utc>) -> Result<(), String> {
        if YEARS.contains(&value.year()) {
            Ok(())
        } else {
            Err(format!("year {} of {value} is outside RFC 3339 range 0000-9999", value.year()))
        }
    }

    /// Format a timestamp.
    #[must_use]
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Parse a timestamp, normalizing any offset to UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not RFC 3339.
    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
    }

    /// Serialize with [`format`].
    ///
    /// Fails for years outside [`YEARS`].
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        check_year(value).map_err(ser::Error::custom)?;
        serializer.serialize_str(&format(value))
    }

    /// Deserialize with [`parse`].
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    /// Same format for `Option<DateTime<Utc>>`; `null` maps to `None`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer, de, ser};

        /// Serialize `Some` with [`super::format`], `None` as `null`.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => {
                    super::check_year(value).map_err(ser::Error::custom)?;
                    serializer.serialize_some(&super::format(value))
                }
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize with [`super::parse`].
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::parse(&raw).map_err(de::Error::custom))
                .transpose()
        }
    }
}
