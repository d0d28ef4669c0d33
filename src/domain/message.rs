//! Message domain types.
//!
//! Represents raw synchronized email messages and the per-thread grouping the
//! admission gate evaluates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An email address with optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Email address.
    pub email: String,
    /// Display name (e.g., "John Doe").
    pub name: Option<String>,
}

impl Address {
    /// Creates a new address with just an email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Creates a new address with email and display name.
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the display representation of this address.
    ///
    /// If a name is present, returns "Name <email>", otherwise just the email.
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) => format!("{} <{}>", name, self.email),
            None => self.email.clone(),
        }
    }

    /// Returns the lower-cased, trimmed email used for all index lookups and
    /// address comparisons.
    pub fn normalized(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Case-insensitive comparison against a bare email string.
    pub fn matches(&self, email: &str) -> bool {
        self.normalized() == email.trim().to_lowercase()
    }
}

/// A raw email message as handed over by the mailbox sync layer.
///
/// Immutable once fetched, except that the sync layer overwrites `body_plain`
/// and `body_markup` with normalized content before persisting. Normalization
/// is one-way and idempotent, so re-normalizing an already cleaned body is a
/// no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    /// Sender address.
    pub sender_address: Address,
    /// Primary recipient addresses, in header order (may repeat).
    pub recipient_addresses: Vec<Address>,
    /// Carbon copy recipient addresses.
    pub cc_addresses: Vec<Address>,
    /// Subject line.
    pub subject: String,
    /// Plain text body content.
    pub body_plain: String,
    /// HTML body content, when the provider supplied one.
    pub body_markup: Option<String>,
    /// Date and time the message was sent.
    pub sent_at: DateTime<Utc>,
    /// Provider-assigned message identifier.
    pub provider_message_id: String,
    /// Provider-assigned thread identifier.
    pub provider_thread_id: String,
}

impl RawMessage {
    /// Returns every address on the message: sender, recipients, and cc.
    pub fn all_addresses(&self) -> impl Iterator<Item = &Address> {
        std::iter::once(&self.sender_address)
            .chain(self.recipient_addresses.iter())
            .chain(self.cc_addresses.iter())
    }
}

/// An ordered-by-time collection of messages sharing one provider thread id.
///
/// Transient: constructed per sync batch or per retroactive re-evaluation,
/// never persisted as its own entity.
#[derive(Debug, Clone)]
pub struct ThreadCandidate {
    provider_thread_id: String,
    messages: Vec<RawMessage>,
}

impl ThreadCandidate {
    /// Builds a candidate from messages of one thread, sorting by sent time.
    ///
    /// Messages with a different `provider_thread_id` than the first are kept
    /// as-is; grouping is the sync layer's responsibility.
    pub fn new(mut messages: Vec<RawMessage>) -> Self {
        messages.sort_by_key(|m| m.sent_at);
        let provider_thread_id = messages
            .first()
            .map(|m| m.provider_thread_id.clone())
            .unwrap_or_default();
        Self {
            provider_thread_id,
            messages,
        }
    }

    /// The shared provider thread id, empty for an empty candidate.
    pub fn provider_thread_id(&self) -> &str {
        &self.provider_thread_id
    }

    /// The messages in ascending sent-time order.
    pub fn messages(&self) -> &[RawMessage] {
        &self.messages
    }

    /// The earliest message, if any.
    pub fn first(&self) -> Option<&RawMessage> {
        self.messages.first()
    }

    /// True when the candidate holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Every sender, recipient, and cc address across all messages.
    pub fn participants(&self) -> impl Iterator<Item = &Address> {
        self.messages.iter().flat_map(|m| m.all_addresses())
    }
}
