//! Reusable, named conditions checked against a response.
//!
//! A [`Condition`] is a value object holding one expected value plus its
//! comparison semantics. Conditions are stateless after construction, cache
//! nothing, and re-extract from the response on every check, so chained
//! checks cannot mask mutation bugs. The factory functions ([`has_message`],
//! [`has_status_code`], ...) are the readable entry point of the DSL.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AssertionError;
use crate::response::ResponseAccessor;

/// Default field path of the status payload returned by mutation endpoints.
const INFO_PATH: &str = "info";

/// A named predicate check against a completed HTTP response.
///
/// Implementors evaluate one expectation and report a descriptive failure.
/// The set of built-in conditions is closed but extensible: add new
/// implementors rather than modifying existing ones, or reach for
/// [`field_satisfies`] when no built-in fits.
pub trait Condition {
    /// Evaluates the condition against the response.
    ///
    /// Returns `Ok(())` with no observable effect when the condition holds.
    ///
    /// # Errors
    ///
    /// [`AssertionError::Mismatch`] when the condition does not hold, or any
    /// extraction error ([`AssertionError::FieldNotFound`],
    /// [`AssertionError::Parse`], [`AssertionError::Deserialization`]) when
    /// the compared value cannot be obtained.
    fn check(&self, response: &ResponseAccessor) -> Result<(), AssertionError>;
}

/// Shape of the status payload carried by the demo APIs.
#[derive(Debug, Deserialize)]
struct Info {
    message: String,
}

/// Asserts that the status payload at a field path carries an exact message.
///
/// Equality is exact: case-sensitive, byte-for-byte, no trimming.
/// Created through [`has_message`] (default `info` path) or
/// [`has_message_at`].
#[derive(Debug, Clone)]
pub struct MessageCondition {
    path: String,
    expected: String,
}

impl Condition for MessageCondition {
    fn check(&self, response: &ResponseAccessor) -> Result<(), AssertionError> {
        debug!(path = %self.path, expected = %self.expected, "checking message");
        let info: Info = response.extract_as_at(&self.path)?;
        if info.message == self.expected {
            Ok(())
        } else {
            Err(AssertionError::Mismatch {
                subject: "message".to_string(),
                expected: self.expected.clone(),
                actual: info.message,
            })
        }
    }
}

/// Asserts that the response status code equals an expected value.
///
/// Created through [`has_status_code`].
#[derive(Debug, Clone, Copy)]
pub struct StatusCodeCondition {
    expected: u16,
}

impl Condition for StatusCodeCondition {
    fn check(&self, response: &ResponseAccessor) -> Result<(), AssertionError> {
        debug!(expected = self.expected, "checking status code");
        let actual = response.status_code().as_u16();
        if actual == self.expected {
            Ok(())
        } else {
            Err(AssertionError::Mismatch {
                subject: "status".to_string(),
                expected: self.expected.to_string(),
                actual: actual.to_string(),
            })
        }
    }
}

/// Asserts that the JSON value at a field path satisfies a caller predicate.
///
/// The extension point for expectations the built-in conditions do not
/// cover. Created through [`field_satisfies`].
#[derive(derive_more::Debug)]
pub struct FieldCondition {
    path: String,
    description: String,
    #[debug(ignore)]
    predicate: Box<dyn Fn(&Value) -> bool>,
}

impl Condition for FieldCondition {
    fn check(&self, response: &ResponseAccessor) -> Result<(), AssertionError> {
        debug!(path = %self.path, description = %self.description, "checking field predicate");
        let value = response.extract_field(&self.path)?;
        if (self.predicate)(value) {
            Ok(())
        } else {
            Err(AssertionError::Mismatch {
                subject: format!("field '{}' satisfying", self.path),
                expected: self.description.clone(),
                actual: value.to_string(),
            })
        }
    }
}

/// Condition: the `info` payload carries exactly this message.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, StatusCode};
/// use verdict_core::{AssertableResponse, ResponseAccessor, has_message};
///
/// # fn example() -> Result<(), verdict_core::AssertionError> {
/// let response = ResponseAccessor::new(
///     StatusCode::CREATED,
///     HeaderMap::new(),
///     r#"{"info":{"message":"User created"}}"#,
/// );
///
/// AssertableResponse::new(response).should(has_message("User created"))?;
/// # Ok(())
/// # }
/// ```
pub fn has_message(expected: impl Into<String>) -> MessageCondition {
    has_message_at(INFO_PATH, expected)
}

/// Condition: the payload at `path` carries exactly this message.
///
/// Generalizes [`has_message`] for responses that do not nest their status
/// payload under `info`.
pub fn has_message_at(path: impl Into<String>, expected: impl Into<String>) -> MessageCondition {
    MessageCondition {
        path: path.into(),
        expected: expected.into(),
    }
}

/// Condition: the response status code equals `expected`.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, StatusCode};
/// use verdict_core::{AssertableResponse, ResponseAccessor, has_status_code};
///
/// # fn example() -> Result<(), verdict_core::AssertionError> {
/// let response = ResponseAccessor::new(StatusCode::OK, HeaderMap::new(), "{}");
///
/// AssertableResponse::new(response).should(has_status_code(200))?;
/// # Ok(())
/// # }
/// ```
pub fn has_status_code(expected: u16) -> StatusCodeCondition {
    StatusCodeCondition { expected }
}

/// Condition: the JSON value at `path` satisfies `predicate`.
///
/// `description` names the expectation in the failure report.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, StatusCode};
/// use verdict_core::{AssertableResponse, ResponseAccessor, field_satisfies};
///
/// # fn example() -> Result<(), verdict_core::AssertionError> {
/// let response = ResponseAccessor::new(
///     StatusCode::OK,
///     HeaderMap::new(),
///     r#"{"token":"abc.def.ghi"}"#,
/// );
///
/// AssertableResponse::new(response).should(field_satisfies(
///     "token",
///     "a non-empty token",
///     |value| value.as_str().is_some_and(|token| !token.is_empty()),
/// ))?;
/// # Ok(())
/// # }
/// ```
pub fn field_satisfies(
    path: impl Into<String>,
    description: impl Into<String>,
    predicate: impl Fn(&Value) -> bool + 'static,
) -> FieldCondition {
    FieldCondition {
        path: path.into(),
        description: description.into(),
        predicate: Box::new(predicate),
    }
}
