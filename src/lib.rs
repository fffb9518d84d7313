//! Voice Bridge - voice preference store and vision assistant configurator.
//!
//! The preference store keeps the user's chosen voice for a hosted realtime model in a small
//! JSON file and exposes it as a library, a CLI and an HTTP API. The assistant configurator
//! builds the persona for that model and delegates the session to an external agent runtime.

pub mod assistant;
pub mod config;
pub mod preference;
pub mod server;

pub use config::{DEFAULT_VOICE, Voice};
pub use preference::{PreferenceError, VoicePreferenceStore, get_voice, set_voice};
