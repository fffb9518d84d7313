//! Configuration module for the voice bridge.
//!
//! Provides CLI argument parsing and the voice catalogue.

#[allow(clippy::module_inception)]
mod config;
mod voices;

pub use config::{AppConfig, AssistantArgs, Command, ServerArgs, StoreArgs, shared_preferences_paths};
pub use voices::{DEFAULT_VOICE, Voice, join_voices, print_voices};
