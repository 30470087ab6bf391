//! Traits for schema polymorphism.
//!
//! This module provides the [`SchemaLike`] trait shared by the leaf schemas,
//! the array and object building blocks, and the recursive issue schemas.

use std::marker::PhantomData;

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::JsonPath;
use crate::validation::ValidationContext;

/// A schema that turns an untyped JSON value into a typed output.
///
/// Implementations never stop at the first problem: all mismatches below
/// `value` are collected into the failure.
///
/// The `Send + Sync` bounds let schemas be boxed into alternatives and shared
/// across threads.
///
/// # Example
///
/// ```rust
/// use zodlens::{JsonPath, Schema, SchemaLike, ValidationContext};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string());
/// let result = schema.validate(&json!(["a", "b"]), &JsonPath::root(), &ValidationContext::default());
/// assert!(result.is_success());
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates `value`, found at `path` inside the payload.
    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Self::Output, SchemaErrors>;
}

impl<S: SchemaLike + ?Sized> SchemaLike for Box<S> {
    type Output = S::Output;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<Self::Output, SchemaErrors> {
        (**self).validate(value, path, context)
    }
}

/// A schema backed by a plain function.
///
/// Used to give one-off shapes (such as the object forms of
/// `invalid_string.validation`) a place among boxed alternatives.
pub struct FnSchema<F, T> {
    f: F,
    _output: PhantomData<fn() -> T>,
}

impl<F, T> FnSchema<F, T>
where
    F: Fn(&Value, &JsonPath, &ValidationContext) -> Validation<T, SchemaErrors> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _output: PhantomData,
        }
    }
}

impl<F, T> SchemaLike for FnSchema<F, T>
where
    F: Fn(&Value, &JsonPath, &ValidationContext) -> Validation<T, SchemaErrors> + Send + Sync,
{
    type Output = T;

    fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        context: &ValidationContext,
    ) -> Validation<T, SchemaErrors> {
        (self.f)(value, path, context)
    }
}
