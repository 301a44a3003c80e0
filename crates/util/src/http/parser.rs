//! Body decoding for page sources.
//!
//! Any JSON value is accepted. A body that is not JSON becomes a
//! [`JsonDecodeError`] that remembers the response status and the first
//! [`BODY_PREVIEW_LIMIT`] characters of the body on a single line.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::text::single_line;

/// Characters of the body kept for the error message.
pub const BODY_PREVIEW_LIMIT: usize = 200;

const EMPTY_BODY: &str = "<empty>";

/// Decode a response body as JSON.
///
/// ```rust
/// use jitpages_util::http::decode_json_body;
///
/// assert_eq!(decode_json_body(r#"{"name": "repo"}"#, None).ok().map(|value| value["name"].clone()), Some("repo".into()));
/// assert!(decode_json_body("<html></html>", None).is_err());
/// ```
pub fn decode_json_body(body: &str, status: Option<StatusCode>) -> Result<Value, JsonDecodeError> {
    serde_json::from_str(body).map_err(|source| JsonDecodeError {
        status,
        source,
        preview: body_preview(body),
    })
}

fn body_preview(body: &str) -> String {
    let flat = single_line(body);
    let flat = flat.trim();
    if flat.is_empty() {
        return EMPTY_BODY.to_string();
    }
    match flat.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat.to_string(),
    }
}

/// A page source answered with something other than JSON.
#[derive(Debug, Error)]
#[error("response ({}) is not JSON: {source}; body: {preview}", status_label(.status))]
pub struct JsonDecodeError {
    status: Option<StatusCode>,
    #[source]
    source: serde_json::Error,
    preview: String,
}

impl JsonDecodeError {
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Start of the body, flattened to one line.
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

fn status_label(status: &Option<StatusCode>) -> String {
    status.map_or_else(|| "unknown status".to_string(), |code| format!("status {code}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_json_value_decodes() {
        assert_eq!(decode_json_body("[1,2]", None).unwrap(), serde_json::json!([1, 2]));
        assert_eq!(decode_json_body("\"hi\"", None).unwrap(), serde_json::json!("hi"));
        assert_eq!(decode_json_body("null", None).unwrap(), Value::Null);
    }

    #[test]
    fn errors_carry_status_and_flattened_body() {
        let error = decode_json_body("not\njson\tat all", Some(StatusCode::BAD_GATEWAY)).unwrap_err();
        assert_eq!(error.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(error.preview(), "not json at all");
        assert!(error.to_string().contains("status 502 Bad Gateway"));
    }

    #[test]
    fn blank_bodies_show_a_placeholder() {
        let error = decode_json_body("   ", None).unwrap_err();
        assert_eq!(error.preview(), EMPTY_BODY);
        assert!(error.to_string().contains("unknown status"));
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundaries() {
        let body = "é".repeat(BODY_PREVIEW_LIMIT + 50);
        let preview = body_preview(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 3);
    }
}
