/// Errors raised while checking conditions or extracting values from a response.
///
/// This enum covers the whole failure taxonomy of the crate: condition
/// mismatches (the intended "test failed" signal), missing field paths, and
/// bodies that cannot be parsed or coerced into the requested shape.
/// All variants implement `std::error::Error` and carry enough context for a
/// test report.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum AssertionError {
    /// A condition did not hold against the response.
    ///
    /// Carries the condition subject (what was compared) together with the
    /// expected and actual values. This is the signal a failing test should
    /// surface; it is never recovered locally.
    #[display("expected {subject} `{expected}`, got `{actual}`")]
    #[from(skip)]
    Mismatch {
        /// What the condition compared, e.g. `message` or `status`.
        subject: String,
        /// The expected value, rendered for the report.
        expected: String,
        /// The actual value found in the response.
        actual: String,
    },

    /// A requested field path does not exist in the parsed body.
    ///
    /// Reported distinctly from a value mismatch: a missing field in an API
    /// test usually indicates a contract break, not a wrong value.
    #[display("field not found at '{path}'")]
    #[from(skip)]
    FieldNotFound {
        /// The dot-separated path that could not be resolved.
        path: String,
    },

    /// The response body is not well-formed JSON.
    ///
    /// Occurs when a non-empty extraction is requested on an unparseable body.
    #[display("response body is not valid JSON: {_0}")]
    Parse(serde_json::Error),

    /// The addressed JSON node does not match the requested shape.
    ///
    /// Occurs when a required field is missing or a primitive has the wrong
    /// type. The path pinpoints where deserialization failed and the body is
    /// included to debug schema drift.
    #[display("failed to deserialize at '{path}': {error}\n{body}")]
    #[from(skip)]
    Deserialization {
        /// Path to the value that failed to deserialize.
        path: String,
        /// The underlying JSON deserialization error.
        error: serde_json::Error,
        /// The JSON node that failed to match the requested shape.
        body: String,
    },
}
