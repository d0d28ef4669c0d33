//! Plain-text body normalization.
//!
//! Strips a text body down to authored content through an ordered stage
//! chain: reply extraction, forwarded/Outlook/attribution cutoffs, mobile
//! signature removal, disclaimer and environmental-notice cutoffs, guarded
//! valediction truncation, and whitespace collapse. Each stage operates on the
//! previous stage's output and never grows it.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::config::NormalizeSettings;
use crate::patterns;
use crate::providers::{QuotedLineReplyExtractor, ReplyExtractor};

/// Normalizes plain-text bodies to authored content only.
pub struct TextNormalizer {
    reply_extractor: Box<dyn ReplyExtractor>,
    settings: NormalizeSettings,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Box::new(QuotedLineReplyExtractor::new()))
    }
}

impl TextNormalizer {
    /// Creates a normalizer with the given reply extractor and default
    /// settings.
    pub fn new(reply_extractor: Box<dyn ReplyExtractor>) -> Self {
        Self {
            reply_extractor,
            settings: NormalizeSettings::default(),
        }
    }

    /// Creates a normalizer with explicit settings.
    pub fn with_settings(
        reply_extractor: Box<dyn ReplyExtractor>,
        settings: NormalizeSettings,
    ) -> Self {
        Self {
            reply_extractor,
            settings,
        }
    }

    /// Runs the full stage chain over a plain-text body.
    pub fn normalize(&self, body: &str) -> String {
        if body.trim().is_empty() {
            return String::new();
        }

        let body = self.extract_reply(body);
        let body = cut_before(patterns::forwarded_marker(), &body);
        let body = cut_before(patterns::outlook_separator(), &body);
        let body = cut_before(patterns::on_wrote(), &body);
        self.finish(&body)
    }

    /// Runs the phrase-level cleanup stages only: mobile signatures,
    /// disclaimers, environmental notices, guarded signature truncation, and
    /// whitespace collapse.
    ///
    /// The orchestrator applies this to markup-normalizer output, where
    /// structural quote removal has already happened but free-floating
    /// boilerplate phrases remain.
    pub fn finish(&self, body: &str) -> String {
        if body.trim().is_empty() {
            return String::new();
        }

        let body = remove_mobile_signatures(body);
        let body = cut_before(patterns::disclaimer(), &body);
        let body = cut_before(patterns::environmental_notice(), &body);
        let body = self.truncate_signature(&body);
        collapse_whitespace(&body)
    }

    /// Stage 1: delegate to the reply-extraction collaborator.
    ///
    /// A failure or empty result never aborts normalization; the unmodified
    /// body flows into the next stage instead.
    fn extract_reply(&self, body: &str) -> String {
        match self.reply_extractor.extract_reply(body) {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => body.to_string(),
            Err(e) => {
                warn!(error = %e, "reply extraction failed, keeping original body");
                body.to_string()
            }
        }
    }

    /// Stage 8: guarded valediction-triggered signature removal.
    ///
    /// Truncation requires all three of: the tail after the valediction is
    /// short, it contains signature-shaped content, and it has no line that
    /// reads like a full sentence. Any condition failing keeps the tail
    /// intact, biasing toward not deleting real conversation content.
    fn truncate_signature(&self, body: &str) -> String {
        let Some(valediction) = patterns::valediction().find(body) else {
            return body.to_string();
        };

        let tail = body[valediction.end()..].trim();
        if tail.is_empty() {
            return body[..valediction.start()].trim_end().to_string();
        }

        let max_chars = self.settings.signature_tail_max_chars;
        let max_lines = self.settings.signature_tail_max_lines;

        let is_short = tail.len() < max_chars || tail.lines().count() < max_lines;
        let window = tail_window(tail, max_chars, max_lines);
        let has_marker = patterns::signature_marker().is_match(&window);
        let has_sentence = patterns::substantive_sentence().is_match(&window);

        if is_short && has_marker && !has_sentence {
            debug!(
                tail_len = tail.len(),
                "valediction tail looks like a signature, truncating"
            );
            body[..valediction.start()].trim_end().to_string()
        } else {
            body.to_string()
        }
    }
}

/// Keeps only the text strictly before the first match of `re`, trimming
/// trailing whitespace. No match leaves the body unchanged.
fn cut_before(re: &Regex, body: &str) -> String {
    match re.find(body) {
        Some(m) => body[..m.start()].trim_end().to_string(),
        None => body.to_string(),
    }
}

/// Stage 5: remove device/client signature lines wherever they occur.
fn remove_mobile_signatures(body: &str) -> String {
    patterns::mobile_signature()
        .replace_all(body, "")
        .trim_end()
        .to_string()
}

/// The examination window for the valediction guard: the first `max_lines`
/// lines, capped at `max_chars` characters on a char boundary.
fn tail_window(tail: &str, max_chars: usize, max_lines: usize) -> String {
    let mut window = tail
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n");
    if window.len() > max_chars {
        let mut end = max_chars;
        while end > 0 && !window.is_char_boundary(end) {
            end -= 1;
        }
        window.truncate(end);
    }
    window
}

/// Stage 9: collapse runs of 3+ newlines (blank lines may carry spaces) down
/// to exactly two, then trim.
fn collapse_whitespace(body: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"[ \t]*\n([ \t]*\n){2,}").expect("invalid whitespace collapse regex")
    });
    re.replace_all(body, "\n\n").trim().to_string()
}
