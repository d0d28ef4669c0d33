//! Markup body normalization.
//!
//! Strips an HTML body down to authored content: quote partitioning, removal
//! of client-specific quoted and signature containers, reply/forward cutoff
//! markers, the Outlook inline-border divider, and unsubscribe footers, then
//! flattens what remains to plain text. Phrase-level boilerplate without
//! structural markup is left for the text cleanup pass.

use kuchiki::traits::*;
use kuchiki::NodeRef;
use tracing::{debug, warn};

use crate::patterns;
use crate::providers::{BlockquotePartitioner, QuotePartitioner};

/// Normalizes markup bodies to authored plain text.
pub struct MarkupNormalizer {
    partitioner: Box<dyn QuotePartitioner>,
}

impl Default for MarkupNormalizer {
    fn default() -> Self {
        Self::new(Box::new(BlockquotePartitioner::new()))
    }
}

impl MarkupNormalizer {
    /// Creates a normalizer with the given quote partitioner.
    pub fn new(partitioner: Box<dyn QuotePartitioner>) -> Self {
        Self { partitioner }
    }

    /// Runs the full markup stage chain, returning plain text.
    pub fn normalize(&self, markup: &str) -> String {
        if markup.trim().is_empty() {
            return String::new();
        }

        let working = self.author_fragment(markup);
        let document = kuchiki::parse_html().one(working.as_str());
        remove_selected(&document, patterns::QUOTED_CONTENT_SELECTORS);
        let document = remove_signatures_guarded(document, &working);
        remove_cutoff_markers(&document);
        remove_outlook_divider(&document);
        remove_unsubscribe_footers(&document);
        flatten_to_text(&document)
    }

    /// Step 1: narrow to the first author-content fragment.
    ///
    /// Partitioner failure or a result without author content keeps the
    /// original markup.
    fn author_fragment(&self, markup: &str) -> String {
        match self.partitioner.partition(markup) {
            Ok(fragments) => fragments
                .into_iter()
                .find(|f| f.is_author_content)
                .map(|f| f.markup)
                .unwrap_or_else(|| markup.to_string()),
            Err(e) => {
                warn!(error = %e, "quote partitioning failed, keeping original markup");
                markup.to_string()
            }
        }
    }
}

/// Deletes every subtree matched by any of `selectors`.
fn remove_selected(document: &NodeRef, selectors: &[&str]) {
    for selector in selectors {
        if let Ok(matches) = document.select(selector) {
            let nodes: Vec<NodeRef> = matches.map(|m| m.as_node().clone()).collect();
            for node in nodes {
                node.detach();
            }
        }
    }
}

/// Step 4: delete signature containers, unless doing so leaves the document
/// without visible text.
///
/// Some clients nest the entire message body inside a signature container; in
/// that case the deletion is discarded, the working markup re-parsed with only
/// quoted-content removal applied, and signature handling left to the
/// text-level cleanup pass.
fn remove_signatures_guarded(document: NodeRef, working: &str) -> NodeRef {
    remove_selected(&document, patterns::SIGNATURE_CONTAINER_SELECTORS);
    if !flatten_to_text(&document).is_empty() {
        return document;
    }

    debug!("signature removal emptied the document, re-parsing without it");
    let fresh = kuchiki::parse_html().one(working);
    remove_selected(&fresh, patterns::QUOTED_CONTENT_SELECTORS);
    fresh
}

/// Step 5: delete each cutoff-id marker together with everything after it in
/// its parent.
fn remove_cutoff_markers(document: &NodeRef) {
    for id in patterns::CUTOFF_IDS {
        let selector = format!("#{id}");
        if let Ok(matches) = document.select(&selector) {
            let nodes: Vec<NodeRef> = matches.map(|m| m.as_node().clone()).collect();
            for node in nodes {
                detach_with_following_siblings(&node);
            }
        }
    }
}

/// Step 6: the first element whose inline style carries Outlook's divider
/// border pattern is deleted along with its following siblings. Later matches
/// are false positives and ignored.
fn remove_outlook_divider(document: &NodeRef) {
    let nodes: Vec<NodeRef> = document.descendants().collect();
    for node in nodes {
        let Some(element) = node.as_element() else {
            continue;
        };
        let is_divider = element
            .attributes
            .borrow()
            .get("style")
            .is_some_and(|style| patterns::outlook_border_style().is_match(style));
        if is_divider {
            detach_with_following_siblings(&node);
            return;
        }
    }
}

/// Step 7: unsubscribe footer removal.
///
/// Pass (a) deletes every element whose id starts with the unsubscribe
/// prefix, plus its following siblings. Pass (b) finds the first element
/// whose direct text mentions "unsubscribe", resolves it to its nearest
/// block-level ancestor, and deletes that ancestor with its following
/// siblings.
fn remove_unsubscribe_footers(document: &NodeRef) {
    let nodes: Vec<NodeRef> = document.descendants().collect();
    for node in &nodes {
        let Some(element) = node.as_element() else {
            continue;
        };
        let has_prefix = element
            .attributes
            .borrow()
            .get("id")
            .is_some_and(|id| {
                id.to_ascii_lowercase()
                    .starts_with(patterns::UNSUBSCRIBE_ID_PREFIX)
            });
        if has_prefix {
            detach_with_following_siblings(node);
        }
    }

    let nodes: Vec<NodeRef> = document.descendants().collect();
    for node in &nodes {
        if node.as_element().is_none() {
            continue;
        }
        if direct_text(node).to_lowercase().contains("unsubscribe") {
            // Bare text directly under <body> resolves to the body itself;
            // deleting that would drop the whole message.
            let target = block_ancestor(node);
            if is_structural(&target) {
                continue;
            }
            detach_with_following_siblings(&target);
            return;
        }
    }
}

/// Concatenated text of the node's direct text children only.
fn direct_text(node: &NodeRef) -> String {
    node.children()
        .filter_map(|child| child.as_text().map(|t| t.borrow().clone()))
        .collect()
}

/// Climbs at most 5 levels toward the nearest block-level ancestor, never
/// past the document body.
fn block_ancestor(node: &NodeRef) -> NodeRef {
    let mut current = node.clone();
    for _ in 0..5 {
        let is_block = current.as_element().is_some_and(|el| {
            patterns::BLOCK_LEVEL_TAGS.contains(&el.name.local.as_ref())
        });
        if is_block {
            break;
        }
        let Some(parent) = current.parent() else {
            break;
        };
        if is_structural(&parent) {
            break;
        }
        current = parent;
    }
    current
}

/// Whether a node is the document body, root element, or a non-element node.
fn is_structural(node: &NodeRef) -> bool {
    node.as_element()
        .map_or(true, |el| matches!(el.name.local.as_ref(), "body" | "html"))
}

/// Deletes a node and every sibling after it within the same parent.
fn detach_with_following_siblings(node: &NodeRef) {
    let following: Vec<NodeRef> = node.following_siblings().collect();
    for sibling in following {
        sibling.detach();
    }
    node.detach();
}

/// Step 8: flatten the remaining DOM to plain text, with newlines separating
/// block-level elements and `<br>` breaks, and inline whitespace collapsed.
fn flatten_to_text(document: &NodeRef) -> String {
    let mut out = String::new();
    flatten_node(document, &mut out);
    let trimmed: Vec<&str> = out.lines().map(str::trim_end).collect();
    trimmed.join("\n").trim().to_string()
}

fn flatten_node(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if let Some(text) = child.as_text() {
            append_inline_text(&text.borrow(), out);
            continue;
        }
        let Some(element) = child.as_element() else {
            continue;
        };
        let tag = element.name.local.as_ref();
        match tag {
            "script" | "style" | "head" | "title" | "noscript" => continue,
            "br" => {
                out.push('\n');
                continue;
            }
            _ => {}
        }
        let is_block = !matches!(
            tag,
            "a" | "b" | "i" | "u" | "em" | "strong" | "span" | "code" | "small" | "sub" | "sup"
        );
        if is_block && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        flatten_node(&child, out);
        if is_block && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
    }
}

/// Appends a text node with HTML-source whitespace collapsed to single
/// spaces, preserving word boundaries across adjacent inline nodes.
fn append_inline_text(text: &str, out: &mut String) {
    let mut words = text.split_whitespace().peekable();
    if words.peek().is_none() {
        // Whitespace-only node still separates words.
        if !out.is_empty() && !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        return;
    }
    if text.starts_with(char::is_whitespace)
        && !out.is_empty()
        && !out.ends_with(char::is_whitespace)
    {
        out.push(' ');
    }
    let mut first = true;
    for word in words {
        if !first {
            out.push(' ');
        }
        out.push_str(word);
        first = false;
    }
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}
