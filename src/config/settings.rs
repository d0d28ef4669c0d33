//! Pipeline settings types.
//!
//! Defaults reproduce the documented pipeline behavior; overrides exist for
//! the hosting application's tuning, not for per-message variation.

use serde::{Deserialize, Serialize};

/// Top-level pipeline settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Body normalization tuning.
    pub normalize: NormalizeSettings,
    /// Admission gate tuning.
    pub admission: AdmissionSettings,
}

/// Body normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeSettings {
    /// Maximum character length a post-valediction tail may have and still be
    /// considered a signature.
    pub signature_tail_max_chars: usize,
    /// Maximum line count a post-valediction tail may have and still be
    /// considered a signature.
    pub signature_tail_max_lines: usize,
    /// Prefer the markup body over the plain-text body when both exist.
    pub use_markup_when_available: bool,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            signature_tail_max_chars: 500,
            signature_tail_max_lines: 10,
            use_markup_when_available: true,
        }
    }
}

/// Admission gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionSettings {
    /// Whether automated-sender addresses are excluded from the known-contact
    /// checks.
    pub check_blocked_senders: bool,
}

impl Default for AdmissionSettings {
    fn default() -> Self {
        Self {
            check_blocked_senders: true,
        }
    }
}
