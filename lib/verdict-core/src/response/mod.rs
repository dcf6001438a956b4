//! Typed access to a single completed HTTP response.

use std::sync::OnceLock;

use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::AssertionError;

mod path;

/// Read-only view over one completed HTTP response.
///
/// `ResponseAccessor` wraps the status code, headers, and raw body bytes of a
/// response produced by an external HTTP client, and offers typed extraction
/// from the JSON body: loosely-typed field access by path, or strongly-typed
/// deserialization into a caller-supplied shape.
///
/// The body is parsed at most once (lazily); navigation and deserialization
/// re-run on every extraction, so repeated checks always observe the same
/// immutable data. The accessor is never mutated after construction.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, StatusCode};
/// use verdict_core::ResponseAccessor;
///
/// # fn example() -> Result<(), verdict_core::AssertionError> {
/// let response = ResponseAccessor::new(
///     StatusCode::OK,
///     HeaderMap::new(),
///     r#"{"token":"abc.def.ghi"}"#,
/// );
///
/// assert_eq!(response.status_code(), StatusCode::OK);
/// let token: String = response.extract_as_at("token")?;
/// assert_eq!(token, "abc.def.ghi");
/// # Ok(())
/// # }
/// ```
#[derive(derive_more::Debug)]
pub struct ResponseAccessor {
    status: StatusCode,
    headers: HeaderMap,
    #[debug(ignore)]
    body: Bytes,
    #[debug(ignore)]
    parsed: OnceLock<Value>,
}

impl ResponseAccessor {
    /// Creates an accessor from the parts of a completed response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            parsed: OnceLock::new(),
        }
    }

    /// Returns the HTTP status code of the wrapped response.
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Returns a response header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Returns the unparsed response body.
    ///
    /// Used for binary payload comparisons, e.g. downloaded-file integrity.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Parses the body as JSON, caching the tree on first success.
    fn parsed_body(&self) -> Result<&Value, AssertionError> {
        if let Some(value) = self.parsed.get() {
            return Ok(value);
        }
        let value = serde_json::from_slice(&self.body)?;
        Ok(self.parsed.get_or_init(|| value))
    }

    /// Navigates the parsed body per a dot-separated field path.
    ///
    /// The empty path (or `.`) addresses the whole body; numeric segments
    /// index into arrays.
    ///
    /// # Errors
    ///
    /// - [`AssertionError::Parse`] when the body is not well-formed JSON
    /// - [`AssertionError::FieldNotFound`] when a path segment does not exist
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::{HeaderMap, StatusCode};
    /// use verdict_core::ResponseAccessor;
    ///
    /// # fn example() -> Result<(), verdict_core::AssertionError> {
    /// let response = ResponseAccessor::new(
    ///     StatusCode::CREATED,
    ///     HeaderMap::new(),
    ///     r#"{"info":{"message":"User created"}}"#,
    /// );
    ///
    /// let message = response.extract_field("info.message")?;
    /// assert_eq!(message.as_str(), Some("User created"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_field(&self, path: &str) -> Result<&Value, AssertionError> {
        debug!(%path, "extracting field");
        path::resolve(self.parsed_body()?, path)
    }

    /// Deserializes the whole body into the requested shape.
    ///
    /// # Errors
    ///
    /// - [`AssertionError::Parse`] when the body is not well-formed JSON
    /// - [`AssertionError::Deserialization`] on shape mismatch (missing
    ///   required field, wrong primitive type)
    pub fn extract_as<T>(&self) -> Result<T, AssertionError>
    where
        T: DeserializeOwned,
    {
        self.extract_as_at("")
    }

    /// Deserializes the node addressed by `path` into the requested shape.
    ///
    /// # Errors
    ///
    /// Same as [`extract_field`](Self::extract_field), plus
    /// [`AssertionError::Deserialization`] on shape mismatch.
    pub fn extract_as_at<T>(&self, path: &str) -> Result<T, AssertionError>
    where
        T: DeserializeOwned,
    {
        let node = self.extract_field(path)?;
        deserialize_node(node, path)
    }

    /// Deserializes the node addressed by `path` as an ordered sequence.
    ///
    /// The addressed node must be a JSON array; each element is deserialized
    /// into the requested shape, preserving order.
    ///
    /// # Errors
    ///
    /// Same as [`extract_as_at`](Self::extract_as_at); a non-array node
    /// surfaces as a [`AssertionError::Deserialization`].
    pub fn extract_list_as<T>(&self, path: &str) -> Result<Vec<T>, AssertionError>
    where
        T: DeserializeOwned,
    {
        let node = self.extract_field(path)?;
        deserialize_node(node, path)
    }
}

impl From<Response<Bytes>> for ResponseAccessor {
    fn from(response: Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self::new(parts.status, parts.headers, body)
    }
}

/// Deserializes one JSON node, reporting the failing path on error.
fn deserialize_node<T>(node: &Value, at: &str) -> Result<T, AssertionError>
where
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize(node).map_err(|err| {
        let serde_path = err.path().to_string();
        let path = match (at.is_empty(), serde_path.as_str()) {
            (true, _) => serde_path,
            (false, ".") => at.to_string(),
            (false, _) => format!("{at}.{serde_path}"),
        };
        AssertionError::Deserialization {
            path,
            error: err.into_inner(),
            body: node.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Deserialize)]
    struct Info {
        message: String,
    }

    fn response(status: StatusCode, body: &str) -> ResponseAccessor {
        ResponseAccessor::new(status, HeaderMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_status_code_is_always_present() {
        let response = response(StatusCode::NO_CONTENT, "");

        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_raw_bytes_returns_unparsed_body() {
        let payload = [0xFF_u8, 0xFE, 0xFD, 0xFC];
        let response =
            ResponseAccessor::new(StatusCode::OK, HeaderMap::new(), payload.to_vec());

        assert_eq!(response.raw_bytes(), &payload);
    }

    #[test]
    fn test_header_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        let response = ResponseAccessor::new(StatusCode::OK, headers, "{}");

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-request-id"), None);
    }

    #[test]
    fn test_extract_field_on_invalid_json_is_parse_error() {
        let response = response(StatusCode::OK, "not json");

        let error = response.extract_field("info").expect_err("should fail");

        assert!(matches!(error, AssertionError::Parse(_)));
    }

    #[test]
    fn test_extract_as_round_trip() {
        let response = response(StatusCode::OK, r#"{"message":"User created"}"#);

        let info: Info = response.extract_as().expect("should deserialize");

        assert_eq!(
            info,
            Info {
                message: "User created".to_string()
            }
        );
    }

    #[test]
    fn test_extract_as_at_sub_path() {
        let response = response(StatusCode::CREATED, r#"{"info":{"message":"User created"}}"#);

        let info: Info = response.extract_as_at("info").expect("should deserialize");

        assert_eq!(info.message, "User created");
    }

    #[test]
    fn test_extract_as_at_shape_mismatch_names_failing_path() {
        let response = response(StatusCode::OK, r#"{"info":{"message":42}}"#);

        let error = response
            .extract_as_at::<Info>("info")
            .expect_err("should fail");

        let AssertionError::Deserialization { path, body, .. } = error else {
            panic!("expected a deserialization error, got {error}");
        };
        assert_eq!(path, "info.message");
        assert_eq!(body, r#"{"message":42}"#);
    }

    #[test]
    fn test_extract_list_preserves_order() {
        let response = response(StatusCode::OK, r#"["alfa","bravo","charlie"]"#);

        let items: Vec<String> = response.extract_list_as("").expect("should deserialize");

        assert_eq!(items, ["alfa", "bravo", "charlie"]);
    }

    #[test]
    fn test_extract_list_on_non_array_node_fails() {
        let response = response(StatusCode::OK, r#"{"users":{"admin":true}}"#);

        let error = response
            .extract_list_as::<String>("users")
            .expect_err("should fail");

        assert!(matches!(error, AssertionError::Deserialization { .. }));
    }

    #[test]
    fn test_repeated_extraction_observes_same_data() {
        let response = response(StatusCode::OK, r#"{"token":"abc.def.ghi"}"#);

        let first: String = response.extract_as_at("token").expect("should deserialize");
        let second: String = response.extract_as_at("token").expect("should deserialize");

        assert_eq!(first, second);
    }

    #[test]
    fn test_from_http_response() {
        let http_response = Response::builder()
            .status(StatusCode::CREATED)
            .header("x-request-id", "abc-123")
            .body(Bytes::from_static(br#"{"info":{"message":"User created"}}"#))
            .expect("should build response");

        let accessor = ResponseAccessor::from(http_response);

        assert_eq!(accessor.status_code(), StatusCode::CREATED);
        assert_eq!(accessor.header("x-request-id"), Some("abc-123"));
    }
}
