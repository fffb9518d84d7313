//! Voice preference persistence.
//!
//! A single logical setting, the selected voice, stored as a small JSON file. Reads never fail:
//! anything other than a valid voice resolves to the default. Writes are validated and their
//! failures are surfaced to the caller.

mod error;
mod store;

pub use error::PreferenceError;
pub use store::{
    DEFAULT_CONFIG_FILE, PreferenceSource, SELECTED_VOICE_KEY, SHARED_PREFERENCES_KEY, StoredPreference, VoicePreferenceStore, get_voice,
    parse_preference, read_source, set_voice,
};
