//! Business services layer.
//!
//! Services sit between the hosting application's sync loop and the domain
//! types, coordinating normalization, admission, and triage:
//!
//! - [`TriageClassifier`]: post-hoc junk classification of admitted
//!   conversations
//! - [`should_admit`] / [`AdmissionService`]: pre-persistence admission gate
//!   and retroactive conversation creation
//! - [`SyncService`]: per-batch orchestration of normalization and admission

mod admission_service;
mod sync_service;
mod triage_service;

pub use admission_service::{
    should_admit, should_admit_with, AdmissionError, AdmissionOutcome, AdmissionService,
    ConversationStore, StoreError,
};
pub use sync_service::{SyncOutcome, SyncService};
pub use triage_service::TriageClassifier;
