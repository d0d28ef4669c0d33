//! Contact index for known-contact lookups.
//!
//! Built once per sync run from the directory collaborator and read-only for
//! the remainder of the run. Only presence matters to admission and triage,
//! so this is a set, not a full contact record store.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Address;

/// Case-insensitive presence set over known contact email addresses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactIndex {
    emails: HashSet<String>,
}

impl ContactIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from bare email strings.
    pub fn from_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    /// Builds an index from directory addresses.
    pub fn from_addresses<'a, I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = &'a Address>,
    {
        Self::from_emails(addresses.into_iter().map(|a| a.normalized()))
    }

    /// Adds a single address to the index.
    pub fn insert(&mut self, email: &str) {
        let normalized = email.trim().to_lowercase();
        if !normalized.is_empty() {
            self.emails.insert(normalized);
        }
    }

    /// Whether the address belongs to a known contact.
    ///
    /// Unknown or malformed input simply tests as not present.
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_lowercase())
    }

    /// Number of known addresses.
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// True when no contacts are known.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}
