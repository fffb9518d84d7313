//! Vision assistant configurator.
//!
//! Builds the assistant persona (instructions, voice, temperature) and the room input options,
//! then hands the whole session lifecycle to an [`AgentRuntime`]. Speech, video and turn-taking
//! all happen inside the runtime.

mod agent;
mod error;
mod persona;
mod runtime;

pub use agent::VisionAssistant;
pub use error::AssistantError;
pub use persona::{DEFAULT_TEMPERATURE, GREETING_INSTRUCTIONS, Persona, VISION_INSTRUCTIONS};
pub use runtime::{AgentRuntime, Directive, DryRunRuntime, NoiseCancellation, RoomInputOptions};
