//! Errors surfaced by the write path of the preference store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{Voice, join_voices};

/// Failure to update the stored voice preference.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Requested voice is not part of the catalogue. Nothing was written.
    #[error("voice '{voice}' is not valid. Available voices: {}", join_voices(.valid))]
    InvalidVoice { voice: String, valid: &'static [Voice] },

    /// The preference file could not be written.
    #[error("failed to save voice preference to {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PreferenceError {
    /// Build a validation error for `voice` listing the whole catalogue.
    pub fn invalid_voice(voice: impl Into<String>) -> Self {
        PreferenceError::InvalidVoice { voice: voice.into(), valid: &Voice::ALL }
    }
}
