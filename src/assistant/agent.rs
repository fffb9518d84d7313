//! Vision assistant entry point.

use tracing::info;

use super::{AgentRuntime, AssistantError, GREETING_INSTRUCTIONS, Persona, RoomInputOptions};

/// Assistant that helps blind and low-vision users understand their surroundings.
///
/// Holds the persona and room input options; everything that happens once the session is live
/// belongs to the runtime.
#[derive(Debug, Clone)]
pub struct VisionAssistant {
    persona: Persona,          // Instructions, voice and temperature
    options: RoomInputOptions, // Video and noise-cancellation flags
}

impl VisionAssistant {
    /// Create a new assistant.
    ///
    /// # Errors
    /// Returns an error if the persona fails validation.
    pub fn new(persona: Persona, options: RoomInputOptions) -> Result<Self, AssistantError> {
        persona.validate()?;
        Ok(Self { persona, options })
    }

    /// Run one job: connect to the room, start the session and greet the user.
    ///
    /// # Arguments
    /// * `runtime` - Agent runtime owning the session lifecycle
    ///
    /// # Errors
    /// Propagates the first runtime failure; later steps are not attempted.
    pub async fn run<R: AgentRuntime + ?Sized>(&self, runtime: &mut R) -> Result<(), AssistantError> {
        runtime.connect().await?;
        runtime.start_session(&self.persona, &self.options).await?;
        info!("Session started with voice {}", self.persona.voice);

        self.on_enter(runtime).await
    }

    /// Opening turn issued once the session is live.
    async fn on_enter<R: AgentRuntime + ?Sized>(&self, runtime: &mut R) -> Result<(), AssistantError> {
        runtime.generate_reply(GREETING_INSTRUCTIONS).await
    }
}
