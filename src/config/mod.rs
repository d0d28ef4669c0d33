//! Pipeline configuration types.
//!
//! Settings are plain serde values; the hosting application decides where and
//! how they are persisted.

mod settings;

pub use settings::{AdmissionSettings, NormalizeSettings, Settings};
