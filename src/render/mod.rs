//! Issue Tree Renderer.
//!
//! [`render_tree`] walks a validated issue list and builds a [`Container`]
//! tree: one collapsible container per issue list, one [`IssueNode`] per
//! issue, and a nested container per union branch. Building the tree is a pure
//! function of its input; the [`text`] module prints it.
//!
//! Union branches alternate between two [`Theme`]s. The theme is an explicit
//! argument of every recursive call: a union drawn on theme `t` hands
//! `t.next()` to its branches.

pub mod text;

use serde_json::Value;

use crate::issue::{Issue, IssueKind, Primitive};
use crate::path::JsonPath;

/// Background theme of a nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Stone,
    Slate,
}

impl Theme {
    /// The other theme of the two-element rotation.
    pub fn next(self) -> Self {
        match self {
            Theme::Stone => Theme::Slate,
            Theme::Slate => Theme::Stone,
        }
    }
}

/// A collapsible group of issues.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// `Schema i of N: ` for union branches, empty at the root.
    pub title_prefix: String,
    pub level: usize,
    /// Open by default only at the root.
    pub open: bool,
    pub theme: Theme,
    pub items: Vec<IssueNode>,
}

impl Container {
    /// `1 issue` / `N issues`.
    pub fn count_label(&self) -> String {
        match self.items.len() {
            1 => "1 issue".to_string(),
            n => format!("{} issues", n),
        }
    }

    /// The summary line: prefix plus count label.
    pub fn summary(&self) -> String {
        format!("{}{}", self.title_prefix, self.count_label())
    }

    /// Containers nested directly under this one's issues, in order.
    pub fn children(&self) -> impl Iterator<Item = &Container> {
        self.items.iter().flat_map(|item| match &item.detail {
            Detail::Union(union) => union.branches.as_slice(),
            _ => &[],
        })
    }
}

/// One rendered issue.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueNode {
    /// 1-based position, present only when the container holds several issues.
    pub ordinal: Option<usize>,
    pub path: PathMarker,
    pub message: String,
    pub detail: Detail,
}

/// The rendered route to the offending value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMarker {
    /// The validated value itself: `$`.
    Root,
    /// A single segment: `$.` then the highlighted segment.
    Leaf { leaf: String },
    /// Several segments: `$.a.b.` then the highlighted last segment.
    Nested { parent: String, leaf: String },
}

impl PathMarker {
    pub fn from_path(path: &JsonPath) -> Self {
        match path.last() {
            None => PathMarker::Root,
            Some(last) if path.len() == 1 => PathMarker::Leaf {
                leaf: last.to_string(),
            },
            Some(last) => {
                let parents: Vec<String> =
                    path.parent_segments().iter().map(|s| s.to_string()).collect();
                PathMarker::Nested {
                    parent: parents.join("."),
                    leaf: last.to_string(),
                }
            }
        }
    }

    /// The plain part in front of the highlighted segment.
    pub fn prefix(&self) -> String {
        match self {
            PathMarker::Root => String::new(),
            PathMarker::Leaf { .. } => "$.".to_string(),
            PathMarker::Nested { parent, .. } => format!("$.{}.", parent),
        }
    }

    /// The highlighted segment (`$` for the root).
    pub fn highlight(&self) -> &str {
        match self {
            PathMarker::Root => "$",
            PathMarker::Leaf { leaf } | PathMarker::Nested { leaf, .. } => leaf,
        }
    }
}

impl std::fmt::Display for PathMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.prefix(), self.highlight())
    }
}

/// Code-specific body under an issue's path and message.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    None,
    Diff(Diff),
    Union(UnionDetail),
}

/// A want/got comparison; either side may be omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Diff {
    pub want: Option<DiffRow>,
    pub got: Option<DiffRow>,
}

impl Diff {
    /// Iterates over the rows that are present, want first.
    pub fn rows(&self) -> impl Iterator<Item = &DiffRow> {
        self.want.iter().chain(self.got.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffRow {
    pub label: &'static str,
    pub value: DisplayValue,
}

impl DiffRow {
    fn new(label: &'static str, value: DisplayValue) -> Self {
        Self { label, value }
    }
}

/// A value shown in a detail body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    /// Canonical JSON text.
    Json(String),
    /// A type name or type phrase, shown verbatim.
    TypeName(String),
    Null,
    /// The field was absent.
    Undefined,
}

impl DisplayValue {
    /// `null` and absent values get their own labels; everything else is JSON.
    pub fn stringify(value: Option<&Value>) -> Self {
        match value {
            None => DisplayValue::Undefined,
            Some(Value::Null) => DisplayValue::Null,
            Some(other) => DisplayValue::Json(other.to_string()),
        }
    }
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayValue::Json(text) | DisplayValue::TypeName(text) => f.write_str(text),
            DisplayValue::Null => f.write_str("null"),
            DisplayValue::Undefined => f.write_str("undefined"),
        }
    }
}

/// Body of an `invalid_union` issue.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDetail {
    pub intro: String,
    /// Theme of the region holding the branches (the issue's own level).
    pub theme: Theme,
    /// One container per alternative, labeled `Schema i of N`.
    pub branches: Vec<Container>,
}

/// Renders a top-level issue list: level 0, open, default theme.
///
/// # Example
///
/// ```rust
/// use zodlens::{explain, render_tree, Config};
///
/// let raw = r#"[{"code":"not_finite","message":"Number must be finite","path":["a","b"]}]"#;
/// let tree = render_tree(&explain(raw, &Config::default()).unwrap());
///
/// assert!(tree.open);
/// assert_eq!(tree.summary(), "1 issue");
/// assert_eq!(tree.items[0].path.to_string(), "$.a.b");
/// ```
pub fn render_tree(issues: &[Issue]) -> Container {
    render_container(issues, 0, Theme::default(), String::new())
}

/// Renders one issue list at `level`, drawn on `theme`.
pub fn render_container(
    issues: &[Issue],
    level: usize,
    theme: Theme,
    title_prefix: String,
) -> Container {
    let numbered = issues.len() > 1;
    let items = issues
        .iter()
        .enumerate()
        .map(|(index, issue)| IssueNode {
            ordinal: numbered.then_some(index + 1),
            path: PathMarker::from_path(&issue.path),
            message: issue.message.clone(),
            detail: render_detail(&issue.kind, level, theme),
        })
        .collect();

    Container {
        title_prefix,
        level,
        open: level == 0,
        theme,
        items,
    }
}

fn render_detail(kind: &IssueKind, level: usize, theme: Theme) -> Detail {
    match kind {
        IssueKind::InvalidLiteral { expected, received } => Detail::Diff(Diff {
            want: Some(DiffRow::new(
                "want",
                DisplayValue::stringify(expected.as_ref()),
            )),
            got: Some(DiffRow::new(
                "got",
                DisplayValue::stringify(received.as_ref()),
            )),
        }),
        IssueKind::InvalidType { expected, received } => Detail::Diff(Diff {
            want: Some(DiffRow::new(
                "want",
                DisplayValue::TypeName(expected.clone()),
            )),
            got: Some(DiffRow::new(
                "got",
                DisplayValue::TypeName(received.to_string()),
            )),
        }),
        IssueKind::UnrecognizedKeys { keys } => {
            let keys = Value::Array(keys.iter().cloned().map(Value::String).collect());
            Detail::Diff(Diff {
                want: None,
                got: Some(DiffRow::new("keys", DisplayValue::stringify(Some(&keys)))),
            })
        }
        IssueKind::InvalidEnumValue { options, received } => Detail::Diff(Diff {
            want: Some(DiffRow::new(
                "allowed",
                DisplayValue::Json(unbracketed(options)),
            )),
            got: Some(DiffRow::new(
                "got",
                DisplayValue::stringify(Some(&received.to_value())),
            )),
        }),
        IssueKind::InvalidUnionDiscriminator { options } => Detail::Diff(Diff {
            want: Some(DiffRow::new(
                "allowed",
                DisplayValue::stringify(Some(&options_value(options))),
            )),
            got: None,
        }),
        IssueKind::InvalidUnion { union_errors } => {
            let total = union_errors.len();
            let branches = union_errors
                .iter()
                .enumerate()
                .map(|(i, group)| {
                    render_container(
                        &group.issues,
                        level + 1,
                        theme.next(),
                        format!("Schema {} of {}: ", i + 1, total),
                    )
                })
                .collect();
            Detail::Union(UnionDetail {
                intro: format!(
                    "Failed to validate data against one of {} schemas in a Zod union:",
                    total
                ),
                theme,
                branches,
            })
        }
        _ => Detail::None,
    }
}

fn options_value(options: &[Primitive]) -> Value {
    Value::Array(options.iter().map(Primitive::to_value).collect())
}

/// The options as a JSON array without its surrounding brackets.
fn unbracketed(options: &[Primitive]) -> String {
    let text = options_value(options).to_string();
    text.strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(&text)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{IssueGroup, ParsedType};
    use serde_json::json;

    fn issue(path: JsonPath, kind: IssueKind) -> Issue {
        Issue::new(path, "message", kind)
    }

    fn union_of(groups: Vec<Vec<Issue>>) -> Issue {
        issue(
            JsonPath::root(),
            IssueKind::InvalidUnion {
                union_errors: groups.into_iter().map(IssueGroup::new).collect(),
            },
        )
    }

    fn detail_of(kind: IssueKind) -> Detail {
        render_tree(&[issue(JsonPath::root(), kind)]).items[0]
            .detail
            .clone()
    }

    #[test]
    fn test_theme_rotation() {
        assert_eq!(Theme::Stone.next(), Theme::Slate);
        assert_eq!(Theme::Slate.next(), Theme::Stone);
        assert_eq!(Theme::default(), Theme::Stone);
    }

    #[test]
    fn test_count_labels() {
        let one = render_tree(&[issue(JsonPath::root(), IssueKind::NotFinite)]);
        assert_eq!(one.summary(), "1 issue");
        assert_eq!(one.items[0].ordinal, None);

        let two = render_tree(&[
            issue(JsonPath::root(), IssueKind::NotFinite),
            issue(JsonPath::root(), IssueKind::InvalidDate),
        ]);
        assert_eq!(two.summary(), "2 issues");
        assert_eq!(two.items[1].ordinal, Some(2));

        assert_eq!(render_tree(&[]).summary(), "0 issues");
    }

    #[test]
    fn test_path_markers() {
        assert_eq!(PathMarker::from_path(&JsonPath::root()), PathMarker::Root);
        assert_eq!(PathMarker::Root.to_string(), "$");
        assert_eq!(PathMarker::Root.prefix(), "");

        let leaf = PathMarker::from_path(&JsonPath::from_field("maxTokens"));
        assert_eq!(leaf.prefix(), "$.");
        assert_eq!(leaf.highlight(), "maxTokens");

        let nested =
            PathMarker::from_path(&JsonPath::root().push_field("items").push_index(3).push_field("name"));
        assert_eq!(nested.prefix(), "$.items.3.");
        assert_eq!(nested.highlight(), "name");
        assert_eq!(nested.to_string(), "$.items.3.name");
    }

    #[test]
    fn test_stringify() {
        assert_eq!(DisplayValue::stringify(None), DisplayValue::Undefined);
        assert_eq!(DisplayValue::stringify(Some(&Value::Null)), DisplayValue::Null);
        assert_eq!(
            DisplayValue::stringify(Some(&json!({"a": [1, "b"]}))),
            DisplayValue::Json("{\"a\":[1,\"b\"]}".to_string())
        );
        assert_eq!(DisplayValue::Undefined.to_string(), "undefined");
    }

    #[test]
    fn test_invalid_type_diff() {
        let detail = detail_of(IssueKind::InvalidType {
            expected: "string".to_string(),
            received: ParsedType::Undefined,
        });
        let Detail::Diff(diff) = detail else {
            panic!("expected a diff");
        };
        let rows: Vec<_> = diff.rows().map(|r| (r.label, r.value.to_string())).collect();
        assert_eq!(
            rows,
            vec![("want", "string".to_string()), ("got", "undefined".to_string())]
        );
    }

    #[test]
    fn test_enum_and_discriminator_diffs() {
        let detail = detail_of(IssueKind::InvalidEnumValue {
            options: vec![
                Primitive::String("en".to_string()),
                Primitive::String("es".to_string()),
            ],
            received: Primitive::String("pt".to_string()),
        });
        let Detail::Diff(diff) = detail else {
            panic!("expected a diff");
        };
        assert_eq!(diff.want.as_ref().map(|r| r.label), Some("allowed"));
        assert_eq!(
            diff.want.map(|r| r.value.to_string()),
            Some("\"en\",\"es\"".to_string())
        );
        assert_eq!(diff.got.map(|r| r.value.to_string()), Some("\"pt\"".to_string()));

        let detail = detail_of(IssueKind::InvalidUnionDiscriminator {
            options: vec![Primitive::String("a".to_string()), Primitive::Null],
        });
        let Detail::Diff(diff) = detail else {
            panic!("expected a diff");
        };
        assert!(diff.got.is_none());
        assert_eq!(
            diff.want.map(|r| r.value.to_string()),
            Some("[\"a\",null]".to_string())
        );
    }

    #[test]
    fn test_unrecognized_keys_only_got_side() {
        let Detail::Diff(diff) = detail_of(IssueKind::UnrecognizedKeys {
            keys: vec!["colour".to_string(), "size".to_string()],
        }) else {
            panic!("expected a diff");
        };
        assert!(diff.want.is_none());
        let got = diff.got.expect("keys row");
        assert_eq!(got.label, "keys");
        assert_eq!(got.value.to_string(), "[\"colour\",\"size\"]");
    }

    #[test]
    fn test_codes_without_detail() {
        assert_eq!(detail_of(IssueKind::InvalidDate), Detail::None);
        assert_eq!(
            detail_of(IssueKind::InvalidArguments {
                arguments_error: IssueGroup::default()
            }),
            Detail::None
        );
    }

    #[test]
    fn test_union_branches() {
        let tree = render_tree(&[union_of(vec![
            vec![issue(JsonPath::root(), IssueKind::InvalidDate)],
            vec![],
            vec![
                issue(JsonPath::root(), IssueKind::NotFinite),
                issue(JsonPath::root(), IssueKind::NotFinite),
            ],
        ])]);

        let Detail::Union(union) = &tree.items[0].detail else {
            panic!("expected a union");
        };
        assert_eq!(
            union.intro,
            "Failed to validate data against one of 3 schemas in a Zod union:"
        );
        assert_eq!(union.theme, Theme::Stone);

        let summaries: Vec<_> = tree.children().map(Container::summary).collect();
        assert_eq!(
            summaries,
            vec![
                "Schema 1 of 3: 1 issue",
                "Schema 2 of 3: 0 issues",
                "Schema 3 of 3: 2 issues"
            ]
        );
        for branch in tree.children() {
            assert!(!branch.open);
            assert_eq!(branch.level, 1);
            assert_eq!(branch.theme, Theme::Slate);
        }
    }

    #[test]
    fn test_themes_alternate_with_depth() {
        let inner = union_of(vec![vec![issue(JsonPath::root(), IssueKind::InvalidDate)]]);
        let outer = union_of(vec![vec![inner]]);
        let tree = render_tree(&[outer]);

        let level1 = tree.children().next().expect("level 1");
        let level2 = level1.children().next().expect("level 2");
        assert_eq!(
            (tree.theme, level1.theme, level2.theme),
            (Theme::Stone, Theme::Slate, Theme::Stone)
        );
        assert_eq!(level2.level, 2);
        assert!(!level2.open);
    }
}
