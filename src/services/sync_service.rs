//! Per-batch sync orchestration.
//!
//! Takes one sync batch of raw messages, normalizes every body, groups the
//! batch into thread candidates, and runs each through the admission service.
//! Persistence beyond the [`ConversationStore`] seam remains the hosting
//! application's concern.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::RawMessage;
use crate::normalize::BodyNormalizer;

use super::admission_service::{
    AdmissionOutcome, AdmissionService, ConversationStore, Result,
};

/// Counters for one processed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Messages normalized and handed to admission.
    pub messages_processed: usize,
    /// Distinct threads in the batch.
    pub threads_seen: usize,
    /// Threads admitted during this batch.
    pub admitted: usize,
    /// Threads that already had a conversation.
    pub already_admitted: usize,
    /// Threads stored but held back.
    pub held: usize,
}

/// Runs normalization and admission over sync batches.
pub struct SyncService<S: ConversationStore> {
    normalizer: BodyNormalizer,
    admission: AdmissionService<S>,
}

impl<S: ConversationStore> SyncService<S> {
    /// Creates a sync service from its two pipelines.
    pub fn new(normalizer: BodyNormalizer, admission: AdmissionService<S>) -> Self {
        Self {
            normalizer,
            admission,
        }
    }

    /// Processes one batch of freshly fetched messages.
    ///
    /// Bodies are overwritten in place with their normalized form before
    /// anything is stored; normalization is idempotent, so re-syncing an
    /// already cleaned message is harmless.
    pub async fn process_batch(&self, messages: Vec<RawMessage>) -> Result<SyncOutcome> {
        let mut outcome = SyncOutcome::default();

        let mut threads: HashMap<String, Vec<RawMessage>> = HashMap::new();
        for mut message in messages {
            message.body_plain = self
                .normalizer
                .strip_quotes(&message.body_plain, message.body_markup.as_deref());
            message.body_markup = None;
            outcome.messages_processed += 1;
            threads
                .entry(message.provider_thread_id.clone())
                .or_default()
                .push(message);
        }
        outcome.threads_seen = threads.len();

        for (thread_id, thread_messages) in threads {
            debug!(thread = %thread_id, messages = thread_messages.len(), "evaluating thread");
            match self.admission.evaluate_thread(thread_messages).await? {
                AdmissionOutcome::Admitted { .. } => outcome.admitted += 1,
                AdmissionOutcome::AlreadyAdmitted { .. } => outcome.already_admitted += 1,
                AdmissionOutcome::Held { .. } => outcome.held += 1,
            }
        }

        info!(
            messages = outcome.messages_processed,
            threads = outcome.threads_seen,
            admitted = outcome.admitted,
            held = outcome.held,
            "sync batch processed"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, ContactIndex, Conversation};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    use super::super::admission_service::StoreError;

    const OWNER: &str = "me@corp.com";

    fn message(id: &str, thread: &str, sender: &str, body: &str) -> RawMessage {
        RawMessage {
            sender_address: Address::new(sender),
            recipient_addresses: vec![Address::new(OWNER)],
            cc_addresses: vec![],
            subject: "Subject".to_string(),
            body_plain: body.to_string(),
            body_markup: None,
            sent_at: Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap(),
            provider_message_id: id.to_string(),
            provider_thread_id: thread.to_string(),
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        messages: Mutex<Vec<RawMessage>>,
        conversations: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ConversationStore for RecordingStore {
        async fn conversation_id(
            &self,
            provider_thread_id: &str,
        ) -> std::result::Result<Option<String>, StoreError> {
            Ok(self
                .conversations
                .lock()
                .unwrap()
                .iter()
                .find(|(thread, _)| thread == provider_thread_id)
                .map(|(_, id)| id.clone()))
        }

        async fn store_messages(
            &self,
            messages: &[RawMessage],
        ) -> std::result::Result<(), StoreError> {
            self.messages.lock().unwrap().extend_from_slice(messages);
            Ok(())
        }

        async fn stored_messages(
            &self,
            provider_thread_id: &str,
        ) -> std::result::Result<Vec<RawMessage>, StoreError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.provider_thread_id == provider_thread_id)
                .cloned()
                .collect())
        }

        async fn create_conversation(
            &self,
            conversation_id: &str,
            conversation: &Conversation,
        ) -> std::result::Result<(), StoreError> {
            self.conversations.lock().unwrap().push((
                conversation.provider_thread_id.clone(),
                conversation_id.to_string(),
            ));
            Ok(())
        }

        async fn link_messages(
            &self,
            _conversation_id: &str,
            _provider_message_ids: &[String],
        ) -> std::result::Result<(), StoreError> {
            Ok(())
        }
    }

    fn service(known: &[&str]) -> SyncService<RecordingStore> {
        let contacts = ContactIndex::from_emails(known.iter().copied());
        let admission = AdmissionService::new(RecordingStore::default(), OWNER, contacts);
        SyncService::new(BodyNormalizer::default(), admission)
    }

    #[tokio::test]
    async fn batch_counters_reflect_decisions() {
        let service = service(&["jane@firm.com"]);
        let batch = vec![
            message("m1", "t1", "jane@firm.com", "Hello"),
            message("m2", "t2", "stranger@x.com", "Buy now"),
        ];

        let outcome = service.process_batch(batch).await.unwrap();
        assert_eq!(outcome.messages_processed, 2);
        assert_eq!(outcome.threads_seen, 2);
        assert_eq!(outcome.admitted, 1);
        assert_eq!(outcome.held, 1);
    }

    #[tokio::test]
    async fn bodies_are_normalized_before_storage() {
        let service = service(&["jane@firm.com"]);
        let body = "Running late.\n\nBest regards,\nJane Doe\nTel: 555-0100";
        let outcome = service
            .process_batch(vec![message("m1", "t1", "jane@firm.com", body)])
            .await
            .unwrap();
        assert_eq!(outcome.admitted, 1);

        let stored = service.admission.store().messages.lock().unwrap();
        assert_eq!(stored[0].body_plain, "Running late.");
        assert!(stored[0].body_markup.is_none());
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let service = service(&[]);
        let outcome = service.process_batch(vec![]).await.unwrap();
        assert_eq!(outcome, SyncOutcome::default());
    }
}
