//! Pluggable collaborators for the normalization pipeline.
//!
//! The reply-extraction and quote-partitioning dependencies are narrow traits
//! so any library or hand-rolled implementation can be substituted without
//! touching the pipeline. The pipeline treats every collaborator failure as
//! "fails safe to no-op", never as a required dependency.

mod quote;
mod reply;
mod traits;

pub use quote::BlockquotePartitioner;
pub use reply::QuotedLineReplyExtractor;
pub use traits::{ExtractError, Fragment, QuotePartitioner, ReplyExtractor, Result};
