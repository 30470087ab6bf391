//! The list of submitted inputs.
//!
//! A [`Session`] holds raw inputs in submission order and optionally mirrors
//! the most recent one into a shareable address. Rendering the list evaluates
//! every entry independently, in parallel, so a malformed entry only replaces
//! its own output with an error.

use parking_lot::RwLock;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::ExplainError;
use crate::explain::explain;
use crate::preview::RawPreview;
use crate::render::text::{write_tree, TextOptions};
use crate::render::{render_tree, Container};
use crate::share::{self, ShareError};

type InputList = Arc<RwLock<Vec<String>>>;

/// One rendered entry: its preview and either a tree or the failure that
/// replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEntry {
    pub preview: RawPreview,
    pub outcome: Result<Container, ExplainError>,
}

impl RenderedEntry {
    /// Runs the full pipeline over one raw input.
    pub fn from_raw(raw: &str, config: &Config) -> Self {
        Self {
            preview: RawPreview::from_config(raw, config),
            outcome: explain(raw, config).map(|issues| render_tree(&issues)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The tree, or the error's display text, as plain text.
    pub fn to_text(&self, options: TextOptions) -> String {
        let mut out = String::new();
        match &self.outcome {
            Ok(tree) => {
                // writing into a String cannot fail
                let _ = write_tree(&mut out, tree, options);
            }
            Err(error) => {
                out.push_str(&format!("error: {}\n", error));
            }
        }
        out
    }
}

/// Thread-safe, ordered list of submitted raw inputs.
///
/// Clones share the same list.
///
/// # Example
///
/// ```rust
/// use zodlens::{Config, Session};
///
/// let session = Session::new(Config::default());
/// session.submit("not json at all");
/// session.submit(r#"[{"code":"invalid_date","message":"Invalid date","path":[]}]"#);
///
/// let rendered = session.render_all();
/// assert!(!rendered[0].is_success());
/// assert!(rendered[1].is_success());
/// ```
#[derive(Clone)]
pub struct Session {
    config: Config,
    inputs: InputList,
    address: Arc<RwLock<Option<Url>>>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            inputs: Arc::new(RwLock::new(Vec::new())),
            address: Arc::new(RwLock::new(None)),
        }
    }

    /// A session whose submissions are mirrored into `address`.
    pub fn with_address(config: Config, address: Url) -> Self {
        let session = Self::new(config);
        *session.address.write() = Some(address);
        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Appends `raw` and mirrors it into the address. Empty input is ignored.
    ///
    /// Returns whether the input was appended.
    pub fn submit(&self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if raw.is_empty() {
            return false;
        }

        // Lock order is address, then inputs, so the mirrored parameter
        // always names the last entry.
        let mut address = self.address.write();
        let mut inputs = self.inputs.write();
        if let Some(current) = address.as_mut() {
            *current = share::with_input(current, &raw);
        }
        inputs.push(raw);
        debug!(entries = inputs.len(), "input submitted");
        true
    }

    /// Empties the list and removes the shared parameter from the address.
    pub fn clear(&self) {
        let mut address = self.address.write();
        self.inputs.write().clear();
        if let Some(current) = address.as_mut() {
            *current = share::without_input(current);
        }
        debug!("session cleared");
    }

    /// Replaces the list with the input carried by `url`: one entry when the
    /// parameter is present, none otherwise.
    ///
    /// A session without an address adopts `url`; one with an address mirrors
    /// the restored input into it.
    ///
    /// # Errors
    ///
    /// Returns a [`ShareError`] if the parameter cannot be decoded; the
    /// session is left unchanged.
    pub fn restore(&self, url: &Url) -> Result<usize, ShareError> {
        let restored = share::input_from_url(url)?.filter(|raw| !raw.is_empty());

        let mut address = self.address.write();
        let mut inputs = self.inputs.write();
        let mirrored = match (address.take(), &restored) {
            (None, _) => url.clone(),
            (Some(current), Some(raw)) => share::with_input(&current, raw),
            (Some(current), None) => share::without_input(&current),
        };
        *address = Some(mirrored);

        inputs.clear();
        inputs.extend(restored);

        debug!(entries = inputs.len(), "session restored from address");
        Ok(inputs.len())
    }

    /// Snapshot of the submitted inputs, oldest first.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inputs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.read().is_empty()
    }

    /// The mirrored address, if the session has one.
    pub fn address(&self) -> Option<Url> {
        self.address.read().clone()
    }

    /// Renders every entry, in submission order.
    pub fn render_all(&self) -> Vec<RenderedEntry> {
        let inputs = self.inputs();
        let config = self.config;

        let rendered: Vec<RenderedEntry> = inputs
            .par_iter()
            .map(|raw| RenderedEntry::from_raw(raw, &config))
            .collect();

        debug!(
            entries = rendered.len(),
            failed = rendered.iter().filter(|e| !e.is_success()).count(),
            "session rendered"
        );
        rendered
    }
}
