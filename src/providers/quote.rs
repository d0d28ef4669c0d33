//! Default quote partitioner.
//!
//! Splits a markup body at top-level quote containers: `blockquote` elements
//! and the class names email clients give their quoted-history wrappers.

use kuchiki::traits::*;
use kuchiki::NodeRef;

use super::traits::{ExtractError, Fragment, QuotePartitioner, Result};

/// Class name substrings that mark a top-level node as quoted history.
const QUOTE_CLASS_HINTS: &[&str] = &[
    "gmail_quote",
    "yahoo_quoted",
    "protonmail_quote",
    "moz-cite-prefix",
    "zmail_extra",
];

/// Quote partitioner over top-level blockquotes and quote-class wrappers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockquotePartitioner;

impl BlockquotePartitioner {
    /// Creates the partitioner.
    pub fn new() -> Self {
        Self
    }
}

impl QuotePartitioner for BlockquotePartitioner {
    fn partition(&self, markup: &str) -> Result<Vec<Fragment>> {
        if markup.trim().is_empty() {
            return Err(ExtractError::Empty);
        }

        let document = kuchiki::parse_html().one(markup);
        let body = document
            .select_first("body")
            .map_err(|_| ExtractError::Parse("no document body".to_string()))?;

        let mut fragments = Vec::new();
        let mut author_run = String::new();
        for child in body.as_node().children() {
            if is_quote_node(&child) {
                flush_author_run(&mut fragments, &mut author_run);
                fragments.push(Fragment {
                    is_author_content: false,
                    markup: serialize_node(&child)?,
                });
            } else {
                author_run.push_str(&serialize_node(&child)?);
            }
        }
        flush_author_run(&mut fragments, &mut author_run);

        if fragments.is_empty() {
            return Err(ExtractError::Empty);
        }
        Ok(fragments)
    }
}

fn flush_author_run(fragments: &mut Vec<Fragment>, run: &mut String) {
    if !run.trim().is_empty() {
        fragments.push(Fragment {
            is_author_content: true,
            markup: std::mem::take(run),
        });
    } else {
        run.clear();
    }
}

fn is_quote_node(node: &NodeRef) -> bool {
    let Some(element) = node.as_element() else {
        return false;
    };
    if element.name.local.as_ref() == "blockquote" {
        return true;
    }
    let attrs = element.attributes.borrow();
    let class = attrs.get("class").unwrap_or("").to_ascii_lowercase();
    QUOTE_CLASS_HINTS.iter().any(|hint| class.contains(hint))
}

fn serialize_node(node: &NodeRef) -> Result<String> {
    let mut bytes = Vec::new();
    node.serialize(&mut bytes)
        .map_err(|e| ExtractError::Backend(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
