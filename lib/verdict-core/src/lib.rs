//! # Verdict Core
//!
//! Fluent, reusable assertions over HTTP responses for API test suites.
//!
//! The crate wraps one completed HTTP response — obtained from whatever
//! client the test suite uses — and lets tests chain named conditions
//! against it instead of repeating raw assertions inline:
//!
//! - **[`ResponseAccessor`]** — typed extraction from the response body
//!   (whole body, by field path, or as a list)
//! - **[`Condition`]** — a named check with a descriptive failure message
//!   ([`has_message`], [`has_status_code`], [`field_satisfies`])
//! - **[`AssertableResponse`]** / **[`GenericAssertableResponse`]** — the
//!   chainable `should(...)` wrappers and terminal extractions
//!
//! ## Quick Start
//!
//! ```rust
//! use http::{HeaderMap, StatusCode};
//! use verdict_core::{AssertableResponse, ResponseAccessor, has_message, has_status_code};
//!
//! # fn main() -> Result<(), verdict_core::AssertionError> {
//! // A response handed over by the HTTP client once the call completed.
//! let response = ResponseAccessor::new(
//!     StatusCode::CREATED,
//!     HeaderMap::new(),
//!     r#"{"info":{"message":"User created"}}"#,
//! );
//!
//! AssertableResponse::new(response)
//!     .should(has_status_code(201))?
//!     .should(has_message("User created"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Extracting values
//!
//! Chains terminate in an extraction when the test needs the value:
//!
//! ```rust
//! use http::{HeaderMap, StatusCode};
//! use verdict_core::{AssertableResponse, ResponseAccessor, has_status_code};
//!
//! # fn main() -> Result<(), verdict_core::AssertionError> {
//! let response = ResponseAccessor::new(
//!     StatusCode::OK,
//!     HeaderMap::new(),
//!     r#"{"token":"abc.def.ghi"}"#,
//! );
//!
//! let token = AssertableResponse::new(response)
//!     .should(has_status_code(200))?
//!     .as_jwt()?;
//! assert_eq!(token, "abc.def.ghi");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Every check and extraction reports through [`AssertionError`]: condition
//! mismatches, missing field paths, unparseable bodies, and shape
//! mismatches. `should` is fail-fast by design; use
//! [`AssertableResponse::check_all`] to collect several failures instead of
//! aborting at the first one.

mod assert;
mod error;
mod response;

pub use self::assert::{
    AssertableResponse, Condition, FieldCondition, GenericAssertableResponse, MessageCondition,
    StatusCodeCondition, field_satisfies, has_message, has_message_at, has_status_code,
};
pub use self::error::AssertionError;
pub use self::response::ResponseAccessor;
