//! Default reply extractor.
//!
//! Line-oriented: the newest reply is everything above the first quote
//! indicator, which is either an `On ... wrote:` attribution line or the
//! first run of `>`-prefixed quoted lines.

use crate::patterns;

use super::traits::{ExtractError, ReplyExtractor, Result};

/// Reply extractor that cuts at attribution lines and `>`-quoted runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedLineReplyExtractor;

impl QuotedLineReplyExtractor {
    /// Creates the extractor.
    pub fn new() -> Self {
        Self
    }
}

impl ReplyExtractor for QuotedLineReplyExtractor {
    fn extract_reply(&self, body: &str) -> Result<String> {
        if body.trim().is_empty() {
            return Err(ExtractError::Empty);
        }

        let mut kept: Vec<&str> = Vec::new();
        for line in body.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with('>') || patterns::on_wrote().is_match(line) {
                break;
            }
            kept.push(line);
        }

        let reply = kept.join("\n").trim_end().to_string();
        if reply.is_empty() {
            // The whole body was quoted material; let the caller decide.
            return Err(ExtractError::Empty);
        }
        Ok(reply)
    }
}
