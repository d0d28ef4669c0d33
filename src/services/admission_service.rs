//! Conversation admission: the pre-persistence gate and retroactive creation.
//!
//! [`should_admit`] is the pure rule evaluation; [`AdmissionService`] wraps it
//! with storage so threads that fail admission today can still become full
//! conversations later, with no message history lost.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AdmissionSettings;
use crate::domain::{
    Address, AdmissionDecision, AdmissionRule, ContactIndex, Conversation, RawMessage,
    ThreadCandidate,
};
use crate::patterns;

/// Errors from the conversation store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from admission service operations.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for admission service operations.
pub type Result<T> = std::result::Result<T, AdmissionError>;

/// Storage trait the admission service persists through.
///
/// Implementations own the schema; the service only needs thread-scoped
/// message storage and conversation creation/linking.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// The conversation id for a thread, if one was already created.
    async fn conversation_id(
        &self,
        provider_thread_id: &str,
    ) -> std::result::Result<Option<String>, StoreError>;

    /// Stores raw messages, keyed by provider message id. Idempotent.
    async fn store_messages(
        &self,
        messages: &[RawMessage],
    ) -> std::result::Result<(), StoreError>;

    /// All stored messages for a thread, in arbitrary order.
    async fn stored_messages(
        &self,
        provider_thread_id: &str,
    ) -> std::result::Result<Vec<RawMessage>, StoreError>;

    /// Creates a conversation row with the given id.
    async fn create_conversation(
        &self,
        conversation_id: &str,
        conversation: &Conversation,
    ) -> std::result::Result<(), StoreError>;

    /// Links messages to a conversation. Idempotent.
    async fn link_messages(
        &self,
        conversation_id: &str,
        provider_message_ids: &[String],
    ) -> std::result::Result<(), StoreError>;
}

/// What became of a thread after one admission evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// A conversation already existed; new messages were linked to it.
    AlreadyAdmitted {
        /// The existing conversation.
        conversation_id: String,
    },
    /// The thread was admitted and a conversation created.
    Admitted {
        /// The new conversation.
        conversation_id: String,
        /// Every message now linked, including ones stored on earlier,
        /// rejected evaluations.
        linked_messages: usize,
    },
    /// The thread stays invisible; its messages are stored for later.
    Held {
        /// The rule that rejected it.
        rule: AdmissionRule,
    },
}

/// Evaluates the admission rules with default settings.
pub fn should_admit(
    thread: &ThreadCandidate,
    account_email: &str,
    contacts: &ContactIndex,
) -> AdmissionDecision {
    should_admit_with(thread, account_email, contacts, &AdmissionSettings::default())
}

/// Evaluates the admission rules.
///
/// Never fails: unknown or malformed addresses are simply not present in the
/// contact index, and an empty thread resolves to rejection.
pub fn should_admit_with(
    thread: &ThreadCandidate,
    account_email: &str,
    contacts: &ContactIndex,
    settings: &AdmissionSettings,
) -> AdmissionDecision {
    let Some(first) = thread.first() else {
        return AdmissionDecision::reject(AdmissionRule::EmptyThread);
    };

    let owner = account_email.trim().to_lowercase();
    let known_unblocked = |addr: &Address| {
        let email = addr.normalized();
        contacts.contains(&email)
            && !(settings.check_blocked_senders && patterns::is_automated_sender(&email))
    };

    if thread.messages().len() == 1 {
        if first.sender_address.matches(&owner) {
            // Outbound: someone we know must be on the receiving end.
            let known_recipient = first
                .recipient_addresses
                .iter()
                .chain(first.cc_addresses.iter())
                .any(known_unblocked);
            return if known_recipient {
                AdmissionDecision::admit(AdmissionRule::OutboundKnownRecipient)
            } else {
                AdmissionDecision::reject(AdmissionRule::NoKnownParticipant)
            };
        }
        return if known_unblocked(&first.sender_address) {
            AdmissionDecision::admit(AdmissionRule::InboundKnownSender)
        } else {
            AdmissionDecision::reject(AdmissionRule::NoKnownParticipant)
        };
    }

    let owner_participated = thread
        .messages()
        .iter()
        .any(|m| m.sender_address.matches(&owner));
    if owner_participated {
        return AdmissionDecision::admit(AdmissionRule::OwnerParticipated);
    }

    let known_participant = thread
        .participants()
        .filter(|addr| !addr.matches(&owner))
        .any(|addr| known_unblocked(addr));
    if known_participant {
        AdmissionDecision::admit(AdmissionRule::KnownParticipant)
    } else {
        AdmissionDecision::reject(AdmissionRule::NoKnownParticipant)
    }
}

/// Applies the admission gate against a conversation store, creating and
/// linking conversations as threads cross the admission threshold.
pub struct AdmissionService<S: ConversationStore> {
    store: S,
    account_email: String,
    contacts: ContactIndex,
    settings: AdmissionSettings,
}

impl<S: ConversationStore> AdmissionService<S> {
    /// Creates a service for one account's sync run.
    pub fn new(store: S, account_email: impl Into<String>, contacts: ContactIndex) -> Self {
        Self {
            store,
            account_email: account_email.into(),
            contacts,
            settings: AdmissionSettings::default(),
        }
    }

    /// Overrides the admission settings.
    pub fn with_settings(mut self, settings: AdmissionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Evaluates one thread's newly arrived messages.
    ///
    /// Messages are stored regardless of the decision. When a previously
    /// rejected thread flips to admitted, the new conversation links every
    /// stored message for the thread, not just the arrivals that flipped it.
    pub async fn evaluate_thread(
        &self,
        incoming: Vec<RawMessage>,
    ) -> Result<AdmissionOutcome> {
        let Some(thread_id) = incoming
            .first()
            .map(|m| m.provider_thread_id.clone())
        else {
            return Ok(AdmissionOutcome::Held {
                rule: AdmissionRule::EmptyThread,
            });
        };

        self.store.store_messages(&incoming).await?;

        if let Some(conversation_id) = self.store.conversation_id(&thread_id).await? {
            let ids: Vec<String> = incoming
                .iter()
                .map(|m| m.provider_message_id.clone())
                .collect();
            self.store.link_messages(&conversation_id, &ids).await?;
            debug!(thread = %thread_id, conversation = %conversation_id, "linked new messages");
            return Ok(AdmissionOutcome::AlreadyAdmitted { conversation_id });
        }

        let stored = self.store.stored_messages(&thread_id).await?;
        let candidate = ThreadCandidate::new(stored);
        let decision =
            should_admit_with(&candidate, &self.account_email, &self.contacts, &self.settings);

        if !decision.admitted {
            debug!(thread = %thread_id, rule = ?decision.rule, "thread held back");
            return Ok(AdmissionOutcome::Held {
                rule: decision.rule,
            });
        }

        let conversation = Conversation::from_thread(&candidate, &self.account_email);
        let conversation_id = format!("conv-{}", uuid::Uuid::new_v4());
        self.store
            .create_conversation(&conversation_id, &conversation)
            .await?;

        let all_ids: Vec<String> = candidate
            .messages()
            .iter()
            .map(|m| m.provider_message_id.clone())
            .collect();
        self.store.link_messages(&conversation_id, &all_ids).await?;

        info!(
            thread = %thread_id,
            conversation = %conversation_id,
            messages = all_ids.len(),
            rule = ?decision.rule,
            "thread admitted"
        );
        Ok(AdmissionOutcome::Admitted {
            conversation_id,
            linked_messages: all_ids.len(),
        })
    }
}
