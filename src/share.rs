//! Shareable-state encoding.
//!
//! The last submitted input travels in the `err` query parameter of an
//! address as base64 of its UTF-8 bytes. Encoding uses the URL-safe alphabet
//! without padding; decoding also accepts the standard alphabet, padded or
//! not, so addresses produced by other tools still restore.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use tracing::debug;
use url::Url;

/// Query parameter that carries the encoded input.
pub const PARAM: &str = "err";

/// Errors from building or reading a shared address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    #[error("invalid address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("shared input is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("shared input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Encodes `raw` for use in an address.
///
/// # Example
///
/// ```rust
/// use zodlens::share::{decode, encode};
///
/// let encoded = encode("ZodError: [] ✓");
/// assert_eq!(decode(&encoded).unwrap(), "ZodError: [] ✓");
/// ```
pub fn encode(raw: &str) -> String {
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

/// Decodes a value produced by [`encode`] (or plain standard base64).
pub fn decode(encoded: &str) -> Result<String, ShareError> {
    let encoded = encoded.trim();
    let bytes = match URL_SAFE_NO_PAD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(first) => [&URL_SAFE, &STANDARD, &STANDARD_NO_PAD]
            .into_iter()
            .find_map(|engine| engine.decode(encoded).ok())
            .ok_or(first)?,
    };
    Ok(String::from_utf8(bytes)?)
}

/// Returns `base` with the `err` parameter set to the encoding of `raw`.
/// Other query parameters are kept.
pub fn with_input(base: &Url, raw: &str) -> Url {
    let mut url = base.clone();
    let mut pairs = retained_pairs(base);
    pairs.push((PARAM.to_string(), encode(raw)));
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url
}

/// Returns `base` without the `err` parameter.
pub fn without_input(base: &Url) -> Url {
    let mut url = base.clone();
    let pairs = retained_pairs(base);
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    url
}

/// Reads the shared input from `url`, or `None` when the parameter is absent.
pub fn input_from_url(url: &Url) -> Result<Option<String>, ShareError> {
    match url.query_pairs().find(|(key, _)| key == PARAM) {
        Some((_, value)) => {
            let raw = decode(&value)?;
            debug!(bytes = raw.len(), "restored shared input");
            Ok(Some(raw))
        }
        None => Ok(None),
    }
}

/// Parses `base` and attaches `raw` to it.
pub fn share_url(base: &str, raw: &str) -> Result<Url, ShareError> {
    Ok(with_input(&Url::parse(base)?, raw))
}

fn retained_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .filter(|(key, _)| key != PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}
