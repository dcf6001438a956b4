//! Fluent assertion wrappers over a [`ResponseAccessor`].

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AssertionError;
use crate::response::ResponseAccessor;

mod conditions;
pub use self::conditions::{
    Condition, FieldCondition, MessageCondition, StatusCodeCondition, field_satisfies,
    has_message, has_message_at, has_status_code,
};

/// Field holding the authentication token in login responses.
const TOKEN_PATH: &str = "token";

/// Fluent, fail-fast assertion wrapper over one HTTP response.
///
/// Owns a single [`ResponseAccessor`] for its lifetime. Conditions are
/// chained with [`should`](Self::should) and the `?` operator; the chain
/// aborts at the first failing condition. Terminal operations extract typed
/// values from the body for further use.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, StatusCode};
/// use verdict_core::{AssertableResponse, ResponseAccessor, has_message, has_status_code};
///
/// # fn example() -> Result<(), verdict_core::AssertionError> {
/// let response = ResponseAccessor::new(
///     StatusCode::CREATED,
///     HeaderMap::new(),
///     r#"{"info":{"message":"User created"}}"#,
/// );
///
/// AssertableResponse::new(response)
///     .should(has_status_code(201))?
///     .should(has_message("User created"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AssertableResponse {
    accessor: ResponseAccessor,
}

impl AssertableResponse {
    /// Wraps a response for fluent assertions.
    ///
    /// Accepts anything convertible into a [`ResponseAccessor`], e.g. an
    /// `http::Response<Bytes>` handed over by the HTTP client.
    pub fn new(response: impl Into<ResponseAccessor>) -> Self {
        Self {
            accessor: response.into(),
        }
    }

    /// Checks one condition, returning the same wrapper for chaining.
    ///
    /// Fail-fast: the condition's failure propagates unchanged, terminating
    /// the chain. The wrapped response never changes identity across a chain
    /// of `should` calls.
    ///
    /// # Errors
    ///
    /// Whatever [`Condition::check`] reports.
    pub fn should(self, condition: impl Condition) -> Result<Self, AssertionError> {
        condition.check(&self.accessor)?;
        Ok(self)
    }

    /// Checks every condition, collecting all failures.
    ///
    /// The soft alternative to [`should`](Self::should): no
    /// short-circuiting, every condition is evaluated against the same
    /// response, and the returned list is empty when all of them hold.
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::{HeaderMap, StatusCode};
    /// use verdict_core::{AssertableResponse, Condition, ResponseAccessor};
    /// use verdict_core::{has_message, has_status_code};
    ///
    /// let response = ResponseAccessor::new(
    ///     StatusCode::CREATED,
    ///     HeaderMap::new(),
    ///     r#"{"info":{"message":"User created"}}"#,
    /// );
    ///
    /// let status = has_status_code(201);
    /// let message = has_message("User created");
    /// let failures = AssertableResponse::new(response)
    ///     .check_all([&status as &dyn Condition, &message]);
    /// assert!(failures.is_empty());
    /// ```
    pub fn check_all<'a>(
        &self,
        conditions: impl IntoIterator<Item = &'a dyn Condition>,
    ) -> Vec<AssertionError> {
        conditions
            .into_iter()
            .filter_map(|condition| condition.check(&self.accessor).err())
            .collect()
    }

    /// Terminal: deserializes the whole body into the requested shape.
    ///
    /// # Errors
    ///
    /// See [`ResponseAccessor::extract_as`].
    pub fn as_object<T>(&self) -> Result<T, AssertionError>
    where
        T: DeserializeOwned,
    {
        self.accessor.extract_as()
    }

    /// Terminal: deserializes the node at `path` into the requested shape.
    ///
    /// # Errors
    ///
    /// See [`ResponseAccessor::extract_as_at`].
    pub fn as_object_at<T>(&self, path: &str) -> Result<T, AssertionError>
    where
        T: DeserializeOwned,
    {
        self.accessor.extract_as_at(path)
    }

    /// Terminal: deserializes the whole body as an ordered sequence.
    ///
    /// # Errors
    ///
    /// See [`ResponseAccessor::extract_list_as`].
    pub fn as_list<T>(&self) -> Result<Vec<T>, AssertionError>
    where
        T: DeserializeOwned,
    {
        self.accessor.extract_list_as("")
    }

    /// Terminal: deserializes the node at `path` as an ordered sequence.
    ///
    /// # Errors
    ///
    /// See [`ResponseAccessor::extract_list_as`].
    pub fn as_list_at<T>(&self, path: &str) -> Result<Vec<T>, AssertionError>
    where
        T: DeserializeOwned,
    {
        self.accessor.extract_list_as(path)
    }

    /// Terminal: extracts the authentication token from a login response.
    ///
    /// # Errors
    ///
    /// [`AssertionError::FieldNotFound`] when the body carries no `token`
    /// field, [`AssertionError::Deserialization`] when it is not a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use http::{HeaderMap, StatusCode};
    /// use verdict_core::{AssertableResponse, ResponseAccessor};
    ///
    /// # fn example() -> Result<(), verdict_core::AssertionError> {
    /// let response = ResponseAccessor::new(
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     r#"{"token":"abc.def.ghi"}"#,
    /// );
    ///
    /// let token = AssertableResponse::new(response).as_jwt()?;
    /// assert_eq!(token, "abc.def.ghi");
    /// # Ok(())
    /// # }
    /// ```
    pub fn as_jwt(&self) -> Result<String, AssertionError> {
        debug!("extracting jwt");
        self.accessor.extract_as_at(TOKEN_PATH)
    }

    /// Escape hatch: hands back the wrapped accessor for capabilities beyond
    /// the DSL.
    pub fn as_response(self) -> ResponseAccessor {
        self.accessor
    }

    /// Binds a target shape, yielding a typed wrapper whose extraction
    /// methods need no type annotation at each call site.
    pub fn typed<T>(self) -> GenericAssertableResponse<T>
    where
        T: DeserializeOwned,
    {
        GenericAssertableResponse::new(self.accessor)
    }
}

/// Assertion wrapper bound to a known target shape.
///
/// Behaves like [`AssertableResponse`], but carries the target type `T` so
/// extraction methods ([`as_object`](Self::as_object),
/// [`as_list`](Self::as_list)) need no shape argument at the call site —
/// useful when several extractions share one shape.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, StatusCode};
/// use serde::Deserialize;
/// use verdict_core::{GenericAssertableResponse, ResponseAccessor, has_status_code};
///
/// #[derive(Debug, Deserialize)]
/// struct Info {
///     message: String,
/// }
///
/// # fn example() -> Result<(), verdict_core::AssertionError> {
/// let response = ResponseAccessor::new(
///     StatusCode::CREATED,
///     HeaderMap::new(),
///     r#"{"info":{"message":"User created"}}"#,
/// );
///
/// let info = GenericAssertableResponse::<Info>::new(response)
///     .should(has_status_code(201))?
///     .as_object_at("info")?;
/// assert_eq!(info.message, "User created");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GenericAssertableResponse<T> {
    accessor: ResponseAccessor,
    _target: PhantomData<T>,
}

impl<T> GenericAssertableResponse<T>
where
    T: DeserializeOwned,
{
    /// Wraps a response, binding `T` as the extraction target shape.
    pub fn new(response: impl Into<ResponseAccessor>) -> Self {
        Self {
            accessor: response.into(),
            _target: PhantomData,
        }
    }

    /// Checks one condition, returning the same wrapper for chaining.
    ///
    /// # Errors
    ///
    /// Whatever [`Condition::check`] reports.
    pub fn should(self, condition: impl Condition) -> Result<Self, AssertionError> {
        condition.check(&self.accessor)?;
        Ok(self)
    }

    /// Checks every condition, collecting all failures.
    pub fn check_all<'a>(
        &self,
        conditions: impl IntoIterator<Item = &'a dyn Condition>,
    ) -> Vec<AssertionError> {
        conditions
            .into_iter()
            .filter_map(|condition| condition.check(&self.accessor).err())
            .collect()
    }

    /// Terminal: deserializes the whole body into the bound shape.
    ///
    /// # Errors
    ///
    /// See [`ResponseAccessor::extract_as`].
    pub fn as_object(&self) -> Result<T, AssertionError> {
        self.accessor.extract_as()
    }

    /// Terminal: deserializes the node at `path` into the bound shape.
    ///
    /// # Errors
    ///
    /// See [`ResponseAccessor::extract_as_at`].
    pub fn as_object_at(&self, path: &str) -> Result<T, AssertionError> {
        self.accessor.extract_as_at(path)
    }

    /// Terminal: deserializes the whole body as a sequence of the bound shape.
    ///
    /// # Errors
    ///
    /// See [`ResponseAccessor::extract_list_as`].
    pub fn as_list(&self) -> Result<Vec<T>, AssertionError> {
        self.accessor.extract_list_as("")
    }

    /// Terminal: deserializes the node at `path` as a sequence of the bound
    /// shape.
    ///
    /// # Errors
    ///
    /// See [`ResponseAccessor::extract_list_as`].
    pub fn as_list_at(&self, path: &str) -> Result<Vec<T>, AssertionError> {
        self.accessor.extract_list_as(path)
    }

    /// Escape hatch: hands back the wrapped accessor.
    pub fn as_response(self) -> ResponseAccessor {
        self.accessor
    }
}
