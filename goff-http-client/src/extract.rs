//! Puzzle-page tree walking: part text rendering and availability scanning
//!
//! A puzzle page carries one `<article class="description">` per published
//! part, each tagged with an `<h3 id="part-N">` heading. Rendering walks the
//! article's subtree and collapses layout whitespace while leaving `<pre>`
//! blocks untouched.

use crate::error::GoffError;
use ego_tree::NodeRef;
use scraper::Html;
use scraper::node::{Element, Node};
use std::collections::BTreeSet;

/// Render the requested part's article to normalized plain text.
///
/// Fails with [`GoffError::PartNotFound`] (carrying the parts that do exist,
/// for diagnostics) when no matching article is present, and with
/// [`GoffError::EmptySection`] when the article renders to nothing.
pub fn extract_part_text(html: &Html, part: u8) -> Result<String, GoffError> {
    let part_id = format!("part-{part}");
    let article = find_article_with_part(html.tree.root(), &part_id).ok_or_else(|| {
        GoffError::PartNotFound {
            part,
            available: available_parts(html),
        }
    })?;

    let mut sink = TextSink::new();
    render_node(&mut sink, article, false);
    let text = sink.into_text();
    if text.is_empty() {
        return Err(GoffError::EmptySection { part });
    }

    Ok(text)
}

/// Collect the distinct positive part numbers published on a puzzle page,
/// ascending. A `part-0` prologue heading is not an available part.
pub fn available_parts(html: &Html) -> Vec<u8> {
    let mut parts = BTreeSet::new();
    collect_parts(html.tree.root(), &mut parts);
    parts.into_iter().collect()
}

fn collect_parts(node: NodeRef<'_, Node>, parts: &mut BTreeSet<u8>) {
    if let Node::Element(el) = node.value()
        && el.name() == "h3"
        && let Some(id) = el.attr("id")
        && let Some(digits) = id.strip_prefix("part-")
        && !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && let Ok(part) = digits.parse::<u8>()
        && part > 0
    {
        parts.insert(part);
    }

    for child in node.children() {
        collect_parts(child, parts);
    }
}

/// Depth-first search for the first `article.description` containing an
/// `h3` whose id equals `part_id`.
fn find_article_with_part<'a>(
    node: NodeRef<'a, Node>,
    part_id: &str,
) -> Option<NodeRef<'a, Node>> {
    if let Node::Element(el) = node.value()
        && el.name() == "article"
        && has_class(&el, "description")
        && contains_part_heading(node, part_id)
    {
        return Some(node);
    }

    node.children()
        .find_map(|child| find_article_with_part(child, part_id))
}

fn contains_part_heading(node: NodeRef<'_, Node>, part_id: &str) -> bool {
    if let Node::Element(el) = node.value()
        && el.name() == "h3"
        && el.attr("id") == Some(part_id)
    {
        return true;
    }

    node.children()
        .any(|child| contains_part_heading(child, part_id))
}

fn has_class(el: &Element, class_name: &str) -> bool {
    el.classes().any(|class| class == class_name)
}

fn render_node(sink: &mut TextSink, node: NodeRef<'_, Node>, in_pre: bool) {
    match node.value() {
        Node::Text(text) => {
            if in_pre {
                sink.push_verbatim(&text.text);
            } else {
                sink.push_collapsed(&text.text);
            }
            return;
        }
        Node::Element(el) => match el.name() {
            "script" | "style" => return,
            "br" => {
                sink.push_newline();
                return;
            }
            "p" | "h3" => {
                sink.push_paragraph_break();
                for child in node.children() {
                    render_node(sink, child, in_pre);
                }
                return;
            }
            "pre" => {
                sink.push_paragraph_break();
                for child in node.children() {
                    render_node(sink, child, true);
                }
                return;
            }
            _ => {}
        },
        _ => {}
    }

    for child in node.children() {
        render_node(sink, child, in_pre);
    }
}

/// Class of the last character written, so the renderer never has to
/// re-inspect the accumulated buffer's suffix.
#[derive(Clone, Copy, PartialEq, Eq)]
enum LastChar {
    /// Nothing written yet
    None,
    /// A space or newline
    Whitespace,
    /// Anything else
    Other,
}

/// Text accumulator that collapses inter-node whitespace to single spaces
struct TextSink {
    buf: String,
    last: LastChar,
}

impl TextSink {
    fn new() -> Self {
        Self {
            buf: String::new(),
            last: LastChar::None,
        }
    }

    /// Append trimmed text, separated from preceding text by one space
    fn push_collapsed(&mut self, raw: &str) {
        let text = raw.trim();
        if text.is_empty() {
            return;
        }
        if self.last == LastChar::Other {
            self.buf.push(' ');
        }
        self.buf.push_str(text);
        // Trimmed non-empty text always ends in a non-whitespace character
        self.last = LastChar::Other;
    }

    /// Append text exactly as-is (inside `<pre>`)
    fn push_verbatim(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        self.buf.push_str(raw);
        self.last = match raw.chars().next_back() {
            Some(' ') | Some('\n') => LastChar::Whitespace,
            _ => LastChar::Other,
        };
    }

    fn push_newline(&mut self) {
        self.buf.push('\n');
        self.last = LastChar::Whitespace;
    }

    /// Blank-line separator before a block element, suppressed at the very
    /// start of output
    fn push_paragraph_break(&mut self) {
        if self.last == LastChar::None {
            return;
        }
        self.buf.push_str("\n\n");
        self.last = LastChar::Whitespace;
    }

    fn into_text(self) -> String {
        self.buf.trim().to_string()
    }
}
