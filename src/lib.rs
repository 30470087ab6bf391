//! # Zodlens
//!
//! Turns the printed text of a `ZodError` into a typed, navigable tree of
//! validation issues.
//!
//! ## Overview
//!
//! Real-world error text arrives wrapped in stack traces and log prefixes.
//! zodlens isolates the JSON issue array inside it, validates that array
//! against the full Zod issue grammar (including recursive union branches),
//! and renders the result as a collapsible tree. Validation accumulates every
//! mismatch, so a payload that does not fit the grammar is reported in full
//! rather than one problem at a time.
//!
//! ## Core Types
//!
//! - [`explain`]: raw text to `Vec<Issue>`, or exactly one [`ExplainError`]
//! - [`Issue`] / [`IssueKind`]: the typed issue model, one variant per `code`
//! - [`render_tree`]: issue list to a [`Container`] tree
//! - [`RawPreview`]: clipped view of the raw input with an expand toggle
//! - [`Session`]: ordered submissions, mirrored into a shareable address
//!
//! ## Example
//!
//! ```rust
//! use zodlens::{explain, render_tree, Config};
//!
//! let raw = r#"ZodError: [{"code":"too_small","minimum":1,"type":"number","inclusive":true,"exact":false,"message":"Number must be greater than or equal to 1","path":["maxTokens"]}]"#;
//!
//! let issues = explain(raw, &Config::default()).unwrap();
//! let tree = render_tree(&issues);
//!
//! assert_eq!(tree.summary(), "1 issue");
//! assert_eq!(tree.items[0].path.to_string(), "$.maxTokens");
//! ```

pub mod config;
pub mod error;
pub mod explain;
pub mod extract;
pub mod issue;
pub mod path;
pub mod preview;
pub mod render;
pub mod schema;
pub mod session;
pub mod share;
pub mod validation;

pub use config::Config;
pub use error::{ExplainError, MismatchCode, SchemaError, SchemaErrors};
pub use explain::{explain, issues_from_value};
pub use issue::{
    Bound, Issue, IssueCode, IssueGroup, IssueKind, ParsedType, Primitive, SizeLimit, SizeType,
    StringFormat, StringValidation, Vocabulary,
};
pub use path::{JsonPath, PathSegment};
pub use preview::RawPreview;
pub use render::{render_tree, Container, Detail, IssueNode, PathMarker, Theme};
pub use schema::{
    AnyOfSchema, ArraySchema, IssueListSchema, MapExt, ObjectFields, Schema, SchemaLike,
};
pub use session::{RenderedEntry, Session};
pub use share::ShareError;
pub use validation::ValidationContext;

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
