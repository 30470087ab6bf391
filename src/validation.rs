//! Validation context for the recursive issue grammar.
//!
//! Issue groups nest issue lists which nest issue groups again. The
//! [`ValidationContext`] travels down that recursion and stops it at a
//! configured depth.

use crate::config::DEFAULT_MAX_DEPTH;

/// Depth tracking carried through every schema call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    depth: usize,
    max_depth: usize,
}

impl ValidationContext {
    /// Creates a root context allowing `max_depth` levels of nested groups.
    pub fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Creates a new context one nesting level deeper.
    pub fn increment_depth(&self) -> Self {
        Self {
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
    }

    /// Returns the current nesting level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the maximum allowed nesting level.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// True once a further nested group would exceed the limit.
    pub fn exhausted(&self) -> bool {
        self.depth >= self.max_depth
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
