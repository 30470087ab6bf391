//! Mismatch diagnostics for issue payloads.
//!
//! This module provides [`SchemaError`] for a single place where the parsed
//! JSON departs from the issue grammar and [`SchemaErrors`] for accumulating
//! all of them across one payload.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// Machine-readable kind of a [`SchemaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchCode {
    /// The value has the wrong JSON type.
    InvalidType,
    /// A required field is absent.
    Required,
    /// The `code` field names no recognized issue kind.
    UnknownCode,
    /// Right JSON type, but not an allowed value.
    InvalidValue,
    /// None of several alternative shapes matched.
    NoAlternativeMatched,
    /// Nested issue groups went deeper than the configured limit.
    MaxDepthExceeded,
}

impl MismatchCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MismatchCode::InvalidType => "invalid_type",
            MismatchCode::Required => "required",
            MismatchCode::UnknownCode => "unknown_code",
            MismatchCode::InvalidValue => "invalid_value",
            MismatchCode::NoAlternativeMatched => "no_alternative_matched",
            MismatchCode::MaxDepthExceeded => "max_depth_exceeded",
        }
    }
}

impl Display for MismatchCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single mismatch between a payload and the issue grammar.
///
/// - **path**: where in the payload the mismatch sits (e.g. `[0].unionErrors[1].issues`)
/// - **message**: human-readable description
/// - **got** / **expected**: optional short renderings of both sides
/// - **code**: a [`MismatchCode`] for programmatic handling
///
/// # Example
///
/// ```rust
/// use zodlens::{JsonPath, MismatchCode, SchemaError};
///
/// let error = SchemaError::new(
///     JsonPath::root().push_index(0).push_field("code"),
///     "unrecognized issue code",
/// )
/// .with_code(MismatchCode::UnknownCode)
/// .with_got("\"invalid_thing\"");
///
/// assert_eq!(error.to_string(), "[0].code: unrecognized issue code (got: \"invalid_thing\")");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Location of the offending value inside the payload.
    pub path: JsonPath,
    pub message: String,
    pub got: Option<String>,
    pub expected: Option<String>,
    pub code: MismatchCode,
}

impl SchemaError {
    /// Creates a new error; the code defaults to [`MismatchCode::InvalidValue`].
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: MismatchCode::InvalidValue,
        }
    }

    pub fn with_code(mut self, code: MismatchCode) -> Self {
        self.code = code;
        self
    }

    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// A non-empty collection of payload mismatches.
///
/// Wraps a `NonEmptyVec<SchemaError>` so a failed `Validation` always carries
/// at least one reason. Collections combine through `Semigroup`:
///
/// ```rust
/// use zodlens::{JsonPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let first = SchemaErrors::single(SchemaError::new(JsonPath::from_field("message"), "expected string"));
/// let second = SchemaErrors::single(SchemaError::new(JsonPath::from_field("path"), "expected array"));
///
/// assert_eq!(first.combine(second).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Builds a collection from a vec, or `None` when the vec is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = Self::single(errors.next()?);
        Some(errors.fold(head, |acc, error| acc.combine(Self::single(error))))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Returns all errors located at `path`.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors with the given code.
    pub fn with_code(&self, code: MismatchCode) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mismatch(es)", self.len())?;
        for (i, error) in self.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};
