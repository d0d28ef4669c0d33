//! Conversation domain type.
//!
//! An admitted thread as assembled for display and triage: its messages, the
//! set of participant addresses matched against the contact index, and the
//! viewing account's own address.

use serde::{Deserialize, Serialize};

use super::{ContactIndex, RawMessage, ThreadCandidate};

/// An admitted email thread loaded for triage or display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Provider thread id this conversation was created from.
    pub provider_thread_id: String,
    /// Subject taken from the earliest message.
    pub subject: String,
    /// Messages in ascending sent-time order.
    pub messages: Vec<RawMessage>,
    /// The viewing/syncing account's own email address.
    pub account_email: String,
}

impl Conversation {
    /// Assembles a conversation from an admitted thread candidate.
    pub fn from_thread(thread: &ThreadCandidate, account_email: impl Into<String>) -> Self {
        Self {
            provider_thread_id: thread.provider_thread_id().to_string(),
            subject: thread.first().map(|m| m.subject.clone()).unwrap_or_default(),
            messages: thread.messages().to_vec(),
            account_email: account_email.into(),
        }
    }

    /// The earliest message, if any.
    pub fn first_message(&self) -> Option<&RawMessage> {
        self.messages.first()
    }

    /// Whether any participant other than the account owner is a known
    /// contact. Used by the triage classifier's last rule.
    pub fn has_known_participant(&self, contacts: &ContactIndex) -> bool {
        let own = self.account_email.trim().to_lowercase();
        self.messages
            .iter()
            .flat_map(|m| m.all_addresses())
            .any(|addr| addr.normalized() != own && contacts.contains(&addr.normalized()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;
    use chrono::{TimeZone, Utc};

    fn thread_with_sender(sender: &str) -> ThreadCandidate {
        ThreadCandidate::new(vec![RawMessage {
            sender_address: Address::new(sender),
            recipient_addresses: vec![Address::new("me@corp.com")],
            cc_addresses: vec![],
            subject: "Quarterly numbers".to_string(),
            body_plain: "Numbers attached".to_string(),
            body_markup: None,
            sent_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            provider_message_id: "m1".to_string(),
            provider_thread_id: "t1".to_string(),
        }])
    }

    #[test]
    fn from_thread_takes_first_subject() {
        let conversation = Conversation::from_thread(&thread_with_sender("a@b.com"), "me@corp.com");
        assert_eq!(conversation.subject, "Quarterly numbers");
        assert_eq!(conversation.provider_thread_id, "t1");
    }

    #[test]
    fn known_participant_excludes_account_owner() {
        let conversation = Conversation::from_thread(&thread_with_sender("a@b.com"), "me@corp.com");

        // Owner being in the index does not count.
        let own_only = ContactIndex::from_emails(["me@corp.com"]);
        assert!(!conversation.has_known_participant(&own_only));

        let with_sender = ContactIndex::from_emails(["a@b.com"]);
        assert!(conversation.has_known_participant(&with_sender));
    }
}
