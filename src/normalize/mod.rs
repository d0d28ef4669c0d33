//! Body normalization pipeline.
//!
//! [`BodyNormalizer`] is the single entry point: it picks the markup path
//! when a usable markup body exists, otherwise the text path, and applies the
//! shared phrase-level cleanup either way.

mod markup;
mod text;

pub use markup::MarkupNormalizer;
pub use text::TextNormalizer;

use tracing::debug;

use crate::config::NormalizeSettings;

/// Orchestrates text-mode and markup-mode body normalization.
pub struct BodyNormalizer {
    text: TextNormalizer,
    markup: MarkupNormalizer,
    settings: NormalizeSettings,
}

impl Default for BodyNormalizer {
    fn default() -> Self {
        Self::new(TextNormalizer::default(), MarkupNormalizer::default())
    }
}

impl BodyNormalizer {
    /// Creates a normalizer from explicit collaborator-backed normalizers.
    pub fn new(text: TextNormalizer, markup: MarkupNormalizer) -> Self {
        Self {
            text,
            markup,
            settings: NormalizeSettings::default(),
        }
    }

    /// Creates a normalizer with the default collaborators and the given
    /// settings.
    pub fn with_settings(settings: NormalizeSettings) -> Self {
        Self {
            text: TextNormalizer::with_settings(
                Box::new(crate::providers::QuotedLineReplyExtractor::new()),
                settings.clone(),
            ),
            markup: MarkupNormalizer::default(),
            settings,
        }
    }

    /// Strips a message body down to authored content.
    ///
    /// Prefers the markup body when one is supplied and non-degenerate; the
    /// markup path's structural removal cannot see free-floating boilerplate
    /// phrases, so its output still goes through the text-level cleanup
    /// stages. An empty markup-path result for any reason (malformed markup,
    /// aggressive removal) falls back to the plain-text path.
    pub fn strip_quotes(&self, text_body: &str, markup_body: Option<&str>) -> String {
        let markup_body = markup_body
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .filter(|_| self.settings.use_markup_when_available);

        if let Some(markup) = markup_body {
            let flattened = self.markup.normalize(markup);
            if !flattened.trim().is_empty() {
                let cleaned = self.text.finish(&flattened);
                if !cleaned.is_empty() {
                    return cleaned;
                }
            }
            debug!("markup path produced no content, falling back to text body");
        }

        self.text.normalize(text_body)
    }
}
