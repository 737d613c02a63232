//! Query-string codec for the page URL and the plan endpoint.
//!
//! Keys and values are percent-encoded as URI components: `+` is a literal
//! plus sign, never a space.

use std::borrow::Cow;
use std::collections::HashMap;

use planner_logging::{planner_debug, planner_warn};
use url::Url;

use crate::fields::{FieldName, FieldState};

/// Path of the planning endpoint on the backend.
pub const PLAN_ENDPOINT: &str = "/plan";

const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// Decoded query string: repeatable keys, values kept in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParameters {
    values: HashMap<String, Vec<String>>,
    skipped: Vec<String>,
}

impl QueryParameters {
    /// Decodes a raw query string (without the leading `?`).
    ///
    /// Pieces without `=` or with undecodable escapes are skipped and
    /// reported, never fatal. Empty pieces are ignored.
    pub fn decode(query: &str) -> Self {
        let mut parameters = Self::default();
        for piece in query.split('&') {
            if piece.is_empty() {
                continue;
            }
            let Some((raw_key, raw_value)) = piece.split_once('=') else {
                planner_warn!("bad parameter string {piece:?}");
                parameters.skipped.push(piece.to_owned());
                continue;
            };
            match (urlencoding::decode(raw_key), urlencoding::decode(raw_value)) {
                (Ok(key), Ok(value)) => parameters
                    .values
                    .entry(key.into_owned())
                    .or_default()
                    .push(value.into_owned()),
                (Err(err), _) | (_, Err(err)) => {
                    planner_warn!("undecodable parameter {piece:?}: {err}");
                    parameters.skipped.push(piece.to_owned());
                }
            }
        }
        planner_debug!(
            "decoded {} parameter keys, {} skipped pieces",
            parameters.values.len(),
            parameters.skipped.len()
        );
        parameters
    }

    /// Values for `key` in encounter order; empty when the key is absent.
    pub fn values(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Raw pieces that were dropped while decoding.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

/// Encodes one field as `&key=line` fragments, one per line, empty lines
/// included.
pub fn encode_field<S: AsRef<str>>(key: &str, lines: &[S]) -> String {
    let key = urlencoding::encode(key);
    lines.iter().fold(String::new(), |mut out, line| {
        out.push('&');
        out.push_str(&key);
        out.push('=');
        out.push_str(&urlencoding::encode(line.as_ref()));
        out
    })
}

/// Canonical query string for the current fields: targets, then recipes,
/// then externals, without a leading `&`.
pub fn canonical_query(fields: &FieldState) -> String {
    let encoded: String = FieldName::ALL
        .iter()
        .map(|field| encode_field(field.query_key(), &fields.lines(*field)))
        .collect();
    match encoded.strip_prefix('&') {
        Some(stripped) => stripped.to_owned(),
        None => encoded,
    }
}

/// Address-bar path for a canonical query.
pub fn location_path(query: &str) -> String {
    format!("/?{query}")
}

/// Plan endpoint path for a canonical query.
pub fn plan_path(query: &str) -> String {
    format!("{PLAN_ENDPOINT}?{query}")
}

/// Extracts the raw (still encoded) query of a page location.
///
/// Accepts absolute URLs as well as paths such as `/?target=a`. A location
/// without a query yields an empty string.
pub fn query_of_location(location: &str) -> Cow<'_, str> {
    let parsed =
        Url::parse(location).or_else(|_| Url::parse(PLACEHOLDER_ORIGIN)?.join(location));
    match parsed {
        Ok(url) => Cow::Owned(url.query().unwrap_or_default().to_owned()),
        Err(err) => {
            planner_warn!("could not parse location {location:?}: {err}");
            let query = location.split_once('?').map_or("", |(_, query)| query);
            Cow::Borrowed(query.split('#').next().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_field_keeps_empty_lines() {
        assert_eq!(encode_field("recipe", &["", "a b"]), "&recipe=&recipe=a%20b");
    }

    #[test]
    fn location_without_query_is_empty() {
        assert_eq!(query_of_location("/"), "");
        assert_eq!(query_of_location("http://example.com/index.html"), "");
    }

    #[test]
    fn location_query_ignores_fragment() {
        assert_eq!(query_of_location("/?target=a#plan"), "target=a");
    }
}
