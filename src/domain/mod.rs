//! Domain layer types for the mailsift engine.
//!
//! This module contains the core value types passed between the sync layer and
//! the normalization/admission pipeline: raw messages, thread candidates, the
//! contact index, assembled conversations, and triage/admission outcomes.

mod contact;
mod conversation;
mod message;
mod triage;

pub use contact::ContactIndex;
pub use conversation::Conversation;
pub use message::{Address, RawMessage, ThreadCandidate};
pub use triage::{AdmissionDecision, AdmissionRule, TriageResult, TriageTag};
