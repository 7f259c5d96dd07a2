//! The response shape assertions run against.

use api_harness_json::convert_to_json;
use serde_json::Value;

/// A received HTTP response, already read into memory.
///
/// Whatever client sent the request builds one of these; assertions never
/// touch the network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body as JSON, or `None` (logged) when it does not parse.
    pub fn json(&self) -> Option<Value> {
        convert_to_json(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = ApiResponse::new(200, "{}")
            .with_header("Content-Type", "application/json")
            .with_header("X-Request-Id", "abc");
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-request-id"), Some("abc"));
        assert_eq!(response.header("missing"), None);
    }

    #[test]
    fn test_json_is_lenient() {
        assert_eq!(ApiResponse::new(200, r#"{"a":1}"#).json(), Some(json!({"a": 1})));
        assert_eq!(ApiResponse::new(502, "Bad Gateway").json(), None);
    }
}
