//! Collaborator trait definitions.
//!
//! This module defines the [`ReplyExtractor`] and [`QuotePartitioner`] traits
//! which abstract over reply-parsing and quote-splitting backends. The
//! normalization pipeline consumes them through these seams only and recovers
//! from any error by continuing with its unmodified input.

use thiserror::Error;

/// Result type alias for collaborator operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors a collaborator may surface.
///
/// The pipeline logs these and falls back to the unmodified input; they never
/// abort normalization of a message.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input could not be parsed at all.
    #[error("parse failure: {0}")]
    Parse(String),

    /// The collaborator produced no usable output.
    #[error("empty result")]
    Empty,

    /// Backend-specific error.
    #[error("extractor error: {0}")]
    Backend(String),
}

/// Isolates the newest reply from a plain-text body that quotes earlier
/// messages in the thread.
pub trait ReplyExtractor: Send + Sync {
    /// Returns the newest authored reply within `body`.
    ///
    /// May fail or return an empty string; callers must treat either as
    /// "use the original body".
    fn extract_reply(&self, body: &str) -> Result<String>;
}

/// One ordered piece of a partitioned markup body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Whether this fragment is content the author wrote, as opposed to
    /// quoted or forwarded material.
    pub is_author_content: bool,
    /// The markup of this fragment.
    pub markup: String,
}

/// Splits a markup body into ordered author-content and quoted fragments.
pub trait QuotePartitioner: Send + Sync {
    /// Partitions `markup` into ordered fragments.
    ///
    /// May fail or return no fragments; callers must treat either as "use the
    /// original markup".
    fn partition(&self, markup: &str) -> Result<Vec<Fragment>>;
}
