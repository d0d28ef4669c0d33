//! mailsift - email content normalization and conversation admission
//!
//! This crate provides the content pipeline that sits between mailbox sync and
//! the CRM conversation store: stripping quoted replies, signatures, and
//! boilerplate from raw message bodies, and deciding which email threads are
//! worth materializing as visible conversations.

pub mod config;
pub mod domain;
pub mod normalize;
pub mod patterns;
pub mod providers;
pub mod services;

pub use normalize::BodyNormalizer;
pub use services::{should_admit, TriageClassifier};
