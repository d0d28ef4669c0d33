//! Triage and admission outcome types.

use serde::{Deserialize, Serialize};

/// Why a conversation was filtered out of the visible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageTag {
    /// First message came from an automated-system sender address.
    AutomatedSender,
    /// Subject matches an automated pattern (out-of-office, bounce, etc.).
    AutomatedSubject,
    /// A message body contains unsubscribe content.
    Marketing,
    /// No participant besides the account owner is a known contact.
    NoKnownContacts,
}

/// Produced only for filtered-out conversations; absence means "kept".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    /// Which rule filtered the conversation.
    pub tag: TriageTag,
    /// Thread the result belongs to.
    pub provider_thread_id: String,
    /// Subject at classification time, for display in the filtered view.
    pub subject: String,
}

/// Which admission rule decided a thread's fate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionRule {
    /// Candidate held no messages.
    EmptyThread,
    /// Single outbound message to a known, unblocked recipient.
    OutboundKnownRecipient,
    /// Single inbound message from a known, unblocked sender.
    InboundKnownSender,
    /// Multi-message thread where the account owner sent at least one message.
    OwnerParticipated,
    /// Multi-message thread with a known, unblocked participant.
    KnownParticipant,
    /// No rule admitted the thread.
    NoKnownParticipant,
}

/// Outcome of the pre-persistence admission gate.
///
/// Ephemeral: the durable effect is whether a conversation row gets created,
/// not this value itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionDecision {
    /// Whether the thread should become a visible conversation.
    pub admitted: bool,
    /// The rule that fired.
    pub rule: AdmissionRule,
}

impl AdmissionDecision {
    /// An admitting decision from the given rule.
    pub fn admit(rule: AdmissionRule) -> Self {
        Self {
            admitted: true,
            rule,
        }
    }

    /// A rejecting decision from the given rule.
    pub fn reject(rule: AdmissionRule) -> Self {
        Self {
            admitted: false,
            rule,
        }
    }
}
