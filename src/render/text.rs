//! Plain-text printer for rendered issue trees.
//!
//! Containers print as a `▾`/`▸` summary line; collapsed containers print
//! nothing else. Union branches are indented behind a gutter whose glyph
//! follows the branch theme, so alternating levels stay distinguishable
//! without color.

use std::fmt::{self, Write};

use super::{Container, Detail, IssueNode, Theme};

const INDENT: &str = "  ";
const LABEL_WIDTH: usize = 7;

/// Options for [`write_tree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Print every container as open, ignoring its default state.
    pub expand_all: bool,
}

impl Theme {
    /// Gutter glyph for branches drawn on this theme.
    pub fn gutter(self) -> char {
        match self {
            Theme::Stone => '│',
            Theme::Slate => '┆',
        }
    }
}

/// Prints `tree` to a string.
///
/// # Example
///
/// ```rust
/// use zodlens::{explain, render_tree, Config};
/// use zodlens::render::text::{to_text, TextOptions};
///
/// let raw = r#"[{"code":"invalid_type","expected":"string","received":"undefined","path":["prompt"],"message":"Required"}]"#;
/// let text = to_text(&render_tree(&explain(raw, &Config::default()).unwrap()), TextOptions::default());
///
/// assert!(text.starts_with("▾ 1 issue\n"));
/// assert!(text.contains("$.prompt: Required"));
/// ```
pub fn to_text(tree: &Container, options: TextOptions) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_tree(&mut out, tree, options);
    out
}

/// Writes `tree` into any [`fmt::Write`] sink.
pub fn write_tree<W: Write>(out: &mut W, tree: &Container, options: TextOptions) -> fmt::Result {
    for line in container_lines(tree, options) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn container_lines(container: &Container, options: TextOptions) -> Vec<String> {
    let open = options.expand_all || container.open;
    let marker = if open { '▾' } else { '▸' };
    let mut lines = vec![format!("{} {}", marker, container.summary())];

    if open {
        for item in &container.items {
            lines.extend(issue_lines(item, options).into_iter().map(|l| format!("{INDENT}{l}")));
        }
    }
    lines
}

fn issue_lines(item: &IssueNode, options: TextOptions) -> Vec<String> {
    let head = match item.ordinal {
        Some(n) => format!("Issue {}  {}: {}", n, item.path, item.message),
        None => format!("{}: {}", item.path, item.message),
    };
    let mut lines = vec![head];

    match &item.detail {
        Detail::None => {}
        Detail::Diff(diff) => {
            lines.extend(
                diff.rows()
                    .map(|row| format!("{INDENT}{:>LABEL_WIDTH$}  {}", row.label, row.value)),
            );
        }
        Detail::Union(union) => {
            lines.push(format!("{INDENT}{}", union.intro));
            for branch in &union.branches {
                let gutter = branch.theme.gutter();
                lines.extend(
                    container_lines(branch, options)
                        .into_iter()
                        .map(|l| format!("{INDENT}{gutter} {l}")),
                );
            }
        }
    }
    lines
}
