//! Text Extractor.
//!
//! Pulls the JSON array out of a printed `ZodError`: everything before the
//! first `[` is dropped, and a trailing `] errors:` trailer (as printed by some
//! frameworks after the array) is cut off right after its `]`. No bracket
//! matching is attempted; any other trailing text makes parsing fail.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::ExplainError;

static TRAILER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\]\s+errors:").expect("trailer pattern is a valid regex")
});

/// Returns the candidate JSON text inside `raw`, without parsing it.
///
/// # Errors
///
/// Returns [`ExplainError::NoJsonFound`] if `raw` contains no `[`.
///
/// # Example
///
/// ```rust
/// use zodlens::extract::isolate_json;
///
/// let text = "Error: [{\"a\":1}]\n  errors: see above";
/// assert_eq!(isolate_json(text).unwrap(), "[{\"a\":1}]");
/// ```
pub fn isolate_json(raw: &str) -> Result<&str, ExplainError> {
    let start = raw.find('[').ok_or(ExplainError::NoJsonFound)?;
    let candidate = &raw[start..];
    trace!(start, "found opening bracket");

    match TRAILER.find(candidate) {
        Some(trailer) => {
            debug!(at = trailer.start(), "trimming errors trailer");
            Ok(&candidate[..=trailer.start()])
        }
        None => Ok(candidate),
    }
}

/// Locates and strictly parses the JSON array inside `raw`.
///
/// # Errors
///
/// - [`ExplainError::NoJsonFound`] if `raw` contains no `[`
/// - [`ExplainError::JsonSyntax`] if the isolated text is not valid JSON
pub fn extract_json(raw: &str) -> Result<Value, ExplainError> {
    let candidate = isolate_json(raw)?;
    let value = serde_json::from_str(candidate)?;
    debug!(len = candidate.len(), "parsed issue JSON");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_bracket() {
        assert_eq!(extract_json("not json at all"), Err(ExplainError::NoJsonFound));
        assert_eq!(extract_json(""), Err(ExplainError::NoJsonFound));
    }

    #[test]
    fn test_prefix_is_dropped() {
        let value = extract_json("ZodError: [1, 2]").unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_errors_trailer_is_trimmed() {
        let raw = "Failed: [{\"x\": [1]}]  \n\t errors: [object Object]";
        assert_eq!(isolate_json(raw).unwrap(), "[{\"x\": [1]}]");
        assert_eq!(extract_json(raw).unwrap(), json!([{"x": [1]}]));
    }

    #[test]
    fn test_trailer_needs_whitespace() {
        let raw = "[1]errors: nope";
        assert_eq!(isolate_json(raw).unwrap(), raw);
        assert!(matches!(extract_json(raw), Err(ExplainError::JsonSyntax(_))));
    }

    #[test]
    fn test_other_trailing_text_is_a_syntax_error() {
        let result = extract_json("ZodError: [1, 2]\n    at parse (index.js:1:1)");
        match result {
            Err(ExplainError::JsonSyntax(detail)) => assert!(detail.contains("trailing")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_first_bracket_wins() {
        // the prefix bracket is not JSON, so the whole tail fails to parse
        let result = extract_json("at [eval] ZodError: [1]");
        assert!(matches!(result, Err(ExplainError::JsonSyntax(_))));
    }

    #[test]
    fn test_multibyte_prefix() {
        let value = extract_json("エラー → [\"ü\"]").unwrap();
        assert_eq!(value, json!(["ü"]));
    }
}
