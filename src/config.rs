//! Tunable limits and display options.

/// Default limit on nested issue groups (union branches, argument and return
/// type errors).
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Characters kept by the raw-text preview before line clipping.
pub const DEFAULT_PREVIEW_CHARS: usize = 256;

/// Lines kept by the raw-text preview.
pub const DEFAULT_PREVIEW_LINES: usize = 3;

/// Options shared by the pipeline, the preview and the text writer.
///
/// # Example
///
/// ```rust
/// use zodlens::Config;
///
/// let config = Config::new().with_max_depth(8).with_expand_all(true);
/// assert_eq!(config.max_depth, 8);
/// assert_eq!(config.preview_chars, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Deepest allowed nesting of issue groups before validation fails.
    pub max_depth: usize,
    pub preview_chars: usize,
    pub preview_lines: usize,
    /// Print bodies of containers that default to collapsed.
    pub expand_all: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            preview_lines: DEFAULT_PREVIEW_LINES,
            expand_all: false,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_preview(mut self, chars: usize, lines: usize) -> Self {
        self.preview_chars = chars;
        self.preview_lines = lines;
        self
    }

    pub fn with_expand_all(mut self, expand_all: bool) -> Self {
        self.expand_all = expand_all;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
