//! Triage classification for admitted conversations.
//!
//! A reversible, display-level junk filter applied after a conversation
//! already exists. Classification is an ordered predicate chain where the
//! first matching rule wins; a `None` result means the conversation is kept.

use tracing::debug;

use crate::domain::{ContactIndex, Conversation, TriageResult, TriageTag};
use crate::patterns;

/// Classifies admitted conversations against the junk heuristics.
pub struct TriageClassifier {
    contacts: ContactIndex,
}

impl TriageClassifier {
    /// Creates a classifier over the current sync run's contact index.
    pub fn new(contacts: ContactIndex) -> Self {
        Self { contacts }
    }

    /// Classifies a conversation; `None` means kept.
    ///
    /// Rules fire in order: automated sender, automated subject, marketing
    /// content, no known contacts. Pure: the caller decides whether to
    /// persist the result.
    pub fn classify(&self, conversation: &Conversation) -> Option<TriageResult> {
        let tag = self.matching_tag(conversation)?;
        debug!(
            thread = %conversation.provider_thread_id,
            ?tag,
            "conversation filtered by triage"
        );
        Some(TriageResult {
            tag,
            provider_thread_id: conversation.provider_thread_id.clone(),
            subject: conversation.subject.clone(),
        })
    }

    fn matching_tag(&self, conversation: &Conversation) -> Option<TriageTag> {
        if let Some(first) = conversation.first_message() {
            if patterns::is_automated_sender(&first.sender_address.normalized()) {
                return Some(TriageTag::AutomatedSender);
            }
        }

        if patterns::is_automated_subject(&conversation.subject) {
            return Some(TriageTag::AutomatedSubject);
        }

        let mentions_unsubscribe = conversation.messages.iter().any(|m| {
            m.body_plain.to_lowercase().contains("unsubscribe")
                || m.body_markup
                    .as_deref()
                    .map_or(false, |markup| markup.to_lowercase().contains("unsubscribe"))
        });
        if mentions_unsubscribe {
            return Some(TriageTag::Marketing);
        }

        if !conversation.has_known_participant(&self.contacts) {
            return Some(TriageTag::NoKnownContacts);
        }

        None
    }
}
