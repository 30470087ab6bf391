//! Raw-Text Preview.
//!
//! Shows the submitted text clipped to its first characters and lines, with
//! an expand/collapse toggle when clipping actually removed something. Each
//! preview owns its `expanded` flag.

use crate::config::{Config, DEFAULT_PREVIEW_CHARS, DEFAULT_PREVIEW_LINES};

/// Appended to collapsed text, ahead of the toggle.
const ELLIPSIS: &str = "… ";

/// A clipped view of one raw input.
///
/// # Example
///
/// ```rust
/// use zodlens::RawPreview;
///
/// let mut preview = RawPreview::new("a\nb\nc\nd");
/// assert_eq!(preview.text(), "a\nb\nc… ");
/// assert_eq!(preview.toggle_label(), Some("Expand"));
///
/// preview.toggle();
/// assert_eq!(preview.text(), "a\nb\nc\nd");
/// assert_eq!(preview.toggle_label(), Some("Collapse"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPreview {
    full: String,
    clipped: String,
    expanded: bool,
}

impl RawPreview {
    /// Preview with the default 256 character / 3 line limits.
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_limits(raw, DEFAULT_PREVIEW_CHARS, DEFAULT_PREVIEW_LINES)
    }

    pub fn from_config(raw: impl Into<String>, config: &Config) -> Self {
        Self::with_limits(raw, config.preview_chars, config.preview_lines)
    }

    pub fn with_limits(raw: impl Into<String>, max_chars: usize, max_lines: usize) -> Self {
        let full = raw.into();
        let clipped = clip(&full, max_chars, max_lines);
        Self {
            full,
            clipped,
            expanded: false,
        }
    }

    /// True when the clipped text is shorter than the input.
    pub fn is_clipped(&self) -> bool {
        self.clipped.chars().count() < self.full.chars().count()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flips the expanded flag. Has no visible effect on unclipped input.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// The text to show in the current state.
    pub fn text(&self) -> String {
        if !self.is_clipped() || self.expanded {
            self.full.clone()
        } else {
            format!("{}{}", self.clipped, ELLIPSIS)
        }
    }

    /// `Expand` / `Collapse`, or `None` when there is nothing to toggle.
    pub fn toggle_label(&self) -> Option<&'static str> {
        match (self.is_clipped(), self.expanded) {
            (false, _) => None,
            (true, false) => Some("Expand"),
            (true, true) => Some("Collapse"),
        }
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn clipped(&self) -> &str {
        &self.clipped
    }
}

/// First `max_chars` characters, trimmed, then at most `max_lines` lines.
fn clip(raw: &str, max_chars: usize, max_lines: usize) -> String {
    let head = match raw.char_indices().nth(max_chars) {
        Some((end, _)) => &raw[..end],
        None => raw,
    };
    let head = head.trim();

    let lines: Vec<&str> = head.split('\n').collect();
    if lines.len() > max_lines {
        lines[..max_lines].join("\n")
    } else {
        head.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_is_not_clipped() {
        let preview = RawPreview::new("ZodError: []");
        assert!(!preview.is_clipped());
        assert_eq!(preview.text(), "ZodError: []");
        assert_eq!(preview.toggle_label(), None);
    }

    #[test]
    fn test_clips_to_char_limit() {
        let raw = "x".repeat(300);
        let preview = RawPreview::new(raw.clone());
        assert!(preview.is_clipped());
        assert_eq!(preview.clipped().len(), 256);
        assert_eq!(preview.text(), format!("{}… ", "x".repeat(256)));
    }

    #[test]
    fn test_clips_to_line_limit() {
        let preview = RawPreview::new("1\n2\n3\n4\n5");
        assert_eq!(preview.clipped(), "1\n2\n3");
    }

    #[test]
    fn test_exactly_three_lines_fit() {
        let preview = RawPreview::new("1\n2\n3");
        assert!(!preview.is_clipped());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let raw = "é".repeat(256);
        assert!(!RawPreview::new(raw.clone()).is_clipped());

        let longer = format!("{}é", raw);
        let preview = RawPreview::new(longer);
        assert!(preview.is_clipped());
        assert_eq!(preview.clipped().chars().count(), 256);
    }

    #[test]
    fn test_trimmed_whitespace_counts_as_clipping() {
        let preview = RawPreview::new("  [1]  ");
        assert_eq!(preview.clipped(), "[1]");
        assert!(preview.is_clipped());
    }

    #[test]
    fn test_toggle_round_trip() {
        let raw = "a\nb\nc\nd\ne";
        let mut preview = RawPreview::new(raw);
        preview.toggle();
        assert_eq!(preview.text(), raw);
        preview.toggle();
        assert_eq!(preview.text(), "a\nb\nc… ");
        assert!(!preview.is_expanded());
    }

    #[test]
    fn test_custom_limits() {
        let config = Config::new().with_preview(4, 10);
        let preview = RawPreview::from_config("abcdef", &config);
        assert_eq!(preview.clipped(), "abcd");
    }
}
