//! Schema combinators for composing validation logic.
//!
//! [`AnyOfSchema`] tries alternatives in order and keeps the first that
//! matches; it backs the places where the issue grammar allows more than one
//! shape (e.g. `invalid_string.validation`).

use serde_json::Value;
use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{MismatchCode, SchemaError, SchemaErrors};
use crate::path::JsonPath;
use crate::validation::ValidationContext;

use super::preview_value;
use super::traits::SchemaLike;

/// At least one alternative must match.
///
/// Alternatives are tried in order, short-circuiting on the first match. If
/// none match, a single `no_alternative_matched` error is reported, followed
/// by the errors of each alternative so the report shows why each failed.
///
/// # Example
///
/// ```rust
/// use zodlens::{AnyOfSchema, JsonPath, MapExt, Primitive, Schema, SchemaLike, ValidationContext};
/// use serde_json::json;
///
/// let bool_or_string = AnyOfSchema::new(vec![
///     Box::new(Schema::boolean().map(Primitive::Bool)) as Box<dyn SchemaLike<Output = Primitive>>,
///     Box::new(Schema::string().map(Primitive::String)),
/// ]);
///
/// let ctx = ValidationContext::default();
/// assert!(bool_or_string.validate(&json!("x"), &JsonPath::root(), &ctx).is_success());
/// assert!(bool_or_string.validate(&json!(1), &JsonPath::root(), &ctx).is_failure());
/// ```
pub struct AnyOfSchema<T> {
    alternatives: Vec<Box<dyn SchemaLike<Output = T>>>,
}

impl<T> AnyOfSchema<T> {
    pub fn new(alternatives: Vec<Box<dyn SchemaLike<Output = T>>>) -> Self {
        Self { alternatives }
    }
}

impl<T> SchemaLike for AnyOfSchema<T> {
    type Output = T;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<T, SchemaErrors> {
        let mut branch_errors = Vec::new();

        for alternative in &self.alternatives {
            match alternative.validate(value, path, context) {
                Validation::Success(v) => return Validation::Success(v),
                Validation::Failure(e) => branch_errors.extend(e),
            }
        }

        let summary = SchemaError::new(
            path.clone(),
            format!(
                "value did not match any of {} schemas",
                self.alternatives.len()
            ),
        )
        .with_code(MismatchCode::NoAlternativeMatched)
        .with_got(preview_value(value));

        let mut errors = SchemaErrors::single(summary);
        if let Some(branches) = SchemaErrors::from_vec(branch_errors) {
            errors = errors.combine(branches);
        }
        Validation::Failure(errors)
    }
}

/// Adapter that converts a schema's output, built by [`MapExt::map`].
pub struct Mapped<S, F> {
    inner: S,
    f: F,
}

impl<S, F, U> SchemaLike for Mapped<S, F>
where
    S: SchemaLike,
    F: Fn(S::Output) -> U + Send + Sync,
{
    type Output = U;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<U, SchemaErrors> {
        match self.inner.validate(value, path, context) {
            Validation::Success(v) => Validation::Success((self.f)(v)),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }
}

/// Output conversion for any sized schema.
pub trait MapExt: SchemaLike + Sized {
    /// Converts successful outputs with `f`.
    fn map<F, U>(self, f: F) -> Mapped<Self, F>
    where
        F: Fn(Self::Output) -> U + Send + Sync,
    {
        Mapped { inner: self, f }
    }
}

impl<S: SchemaLike + Sized> MapExt for S {}
