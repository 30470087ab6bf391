//! String and string-enumeration schemas.

use std::marker::PhantomData;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{MismatchCode, SchemaError, SchemaErrors};
use crate::issue::Vocabulary;
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::traits::SchemaLike;
use super::{preview_value, type_error};

/// A schema accepting any JSON string.
///
/// # Example
///
/// ```rust
/// use zodlens::{JsonPath, Schema, SchemaLike, ValidationContext};
/// use serde_json::json;
///
/// let ctx = ValidationContext::default();
/// assert!(Schema::string().validate(&json!("Required"), &JsonPath::root(), &ctx).is_success());
/// assert!(Schema::string().validate(&json!(42), &JsonPath::root(), &ctx).is_failure());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSchema;

impl StringSchema {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<String, SchemaErrors> {
        match value.as_str() {
            Some(s) => Validation::Success(s.to_string()),
            None => Validation::Failure(type_error(path, "string", value)),
        }
    }
}

/// A schema accepting only the wire names of a [`Vocabulary`].
///
/// Non-strings fail with [`MismatchCode::InvalidType`]; strings outside the
/// vocabulary fail with [`MismatchCode::InvalidValue`], or with
/// [`MismatchCode::UnknownCode`] when the vocabulary is the issue code set.
pub struct EnumSchema<T> {
    code: MismatchCode,
    _vocabulary: PhantomData<fn() -> T>,
}

impl<T: Vocabulary> EnumSchema<T> {
    pub fn new() -> Self {
        Self {
            code: MismatchCode::InvalidValue,
            _vocabulary: PhantomData,
        }
    }

    /// Reports out-of-vocabulary strings with `code` instead of `invalid_value`.
    pub fn with_code(mut self, code: MismatchCode) -> Self {
        self.code = code;
        self
    }

    fn allowed() -> String {
        T::all()
            .iter()
            .map(|v| format!("'{}'", v.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl<T: Vocabulary> Default for EnumSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Vocabulary> SchemaLike for EnumSchema<T> {
    type Output = T;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        _context: &ValidationContext,
    ) -> Validation<T, SchemaErrors> {
        let Some(name) = value.as_str() else {
            return Validation::Failure(type_error(path, "string", value));
        };

        match T::from_name(name) {
            Some(member) => Validation::Success(member),
            None => Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), format!("unrecognized {}", T::NAME))
                    .with_code(self.code)
                    .with_expected(Self::allowed())
                    .with_got(preview_value(value)),
            )),
        }
    }
}
