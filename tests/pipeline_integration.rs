//! Integration tests for the normalization and admission pipelines.
//!
//! These tests exercise the public API end to end: body normalization across
//! both paths, the admission gate, retroactive conversation creation, and
//! triage ordering. Detailed per-stage logic is covered by unit tests inside
//! each module.

use pretty_assertions::assert_eq;

use mailsift::domain::{Address, ContactIndex, Conversation, RawMessage, ThreadCandidate, TriageTag};
use mailsift::services::should_admit;
use mailsift::{BodyNormalizer, TriageClassifier};

use chrono::{TimeZone, Utc};

const OWNER: &str = "me@corp.com";

fn message(id: &str, thread: &str, sender: &str, body: &str) -> RawMessage {
    RawMessage {
        sender_address: Address::new(sender),
        recipient_addresses: vec![Address::new(OWNER)],
        cc_addresses: vec![],
        subject: "Project update".to_string(),
        body_plain: body.to_string(),
        body_markup: None,
        sent_at: Utc.with_ymd_and_hms(2024, 9, 2, 10, 0, 0).unwrap(),
        provider_message_id: id.to_string(),
        provider_thread_id: thread.to_string(),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn strip_quotes_handles_realistic_reply() {
    init_tracing();
    let body = "Hi Maria,\n\nWednesday at 2pm works. I'll send the contract over beforehand.\n\nBest regards,\nJohn Smith\nSenior Account Executive\nAcme Inc.\nTel: 555-123-4567\n\nOn Tue, Sep 1, 2024 at 4:30 PM Maria Lopez wrote:\n> Can we find a time this week to review the contract?";

    let normalizer = BodyNormalizer::default();
    let out = normalizer.strip_quotes(body, None);

    assert!(out.contains("Wednesday at 2pm works."));
    assert!(!out.contains("Maria Lopez wrote"));
    assert!(!out.contains("review the contract?"));
    assert!(!out.contains("Tel: 555-123-4567"));
    assert!(!out.contains("Senior Account Executive"));
}

#[test]
fn strip_quotes_is_idempotent_over_both_paths() {
    let normalizer = BodyNormalizer::default();
    let text = "Short reply.\n\nThanks,\nJo\nwww.jo.example";
    let markup =
        r#"<div>Short reply.</div><div class="gmail_quote">On Monday somebody wrote: old</div>"#;

    let once = normalizer.strip_quotes(text, Some(markup));
    let twice = normalizer.strip_quotes(&once, None);
    assert_eq!(once, twice);
}

#[test]
fn strip_quotes_empty_inputs() {
    let normalizer = BodyNormalizer::default();
    assert_eq!(normalizer.strip_quotes("", None), "");
    assert_eq!(normalizer.strip_quotes("   ", None), "");
}

#[test]
fn markup_wrapped_in_signature_container_is_not_lost() {
    let normalizer = BodyNormalizer::default();
    let markup = r#"<div class="gmail_signature">The whole message lives here.</div>"#;
    let out = normalizer.strip_quotes("fallback text", Some(markup));
    assert_eq!(out, "The whole message lives here.");
}

// ============================================================================
// Admission
// ============================================================================

#[test]
fn admission_single_message_rules() {
    let contacts = ContactIndex::from_emails(["jane@firm.com"]);

    let known = ThreadCandidate::new(vec![message("m1", "t1", "jane@firm.com", "hi")]);
    assert!(should_admit(&known, OWNER, &contacts).admitted);

    let unknown = ThreadCandidate::new(vec![message("m1", "t2", "cold@outreach.com", "hi")]);
    assert!(!should_admit(&unknown, OWNER, &contacts).admitted);
}

#[test]
fn admission_multi_message_owner_participation() {
    let contacts = ContactIndex::new();
    let thread = ThreadCandidate::new(vec![
        message("m1", "t1", "a@x.com", "first"),
        message("m2", "t1", OWNER, "my reply"),
        message("m3", "t1", "b@y.com", "third"),
    ]);
    assert!(should_admit(&thread, OWNER, &contacts).admitted);
}

// ============================================================================
// Triage
// ============================================================================

#[test]
fn triage_first_rule_wins() {
    // Automated sender outranks marketing content in the same conversation.
    let contacts = ContactIndex::new();
    let classifier = TriageClassifier::new(contacts);

    let mut msg = message("m1", "t1", "no-reply@shop.com", "Sale! unsubscribe anytime");
    msg.subject = "Weekly deals".to_string();
    let conversation = Conversation::from_thread(&ThreadCandidate::new(vec![msg]), OWNER);

    let result = classifier.classify(&conversation).unwrap();
    assert_eq!(result.tag, TriageTag::AutomatedSender);
}

#[test]
fn triage_keeps_ordinary_conversations() {
    let contacts = ContactIndex::from_emails(["jane@firm.com"]);
    let classifier = TriageClassifier::new(contacts);

    let conversation = Conversation::from_thread(
        &ThreadCandidate::new(vec![message("m1", "t1", "jane@firm.com", "See you then")]),
        OWNER,
    );
    assert!(classifier.classify(&conversation).is_none());
}
