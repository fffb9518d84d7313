//! Seam to the hosted agent runtime.

use async_trait::async_trait;
use clap::ValueEnum;
use tracing::{debug, info};

use super::{AssistantError, Persona};

/// Noise-cancellation model applied to incoming room audio by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum NoiseCancellation {
    /// Pass audio through untouched
    None,
    /// Standard noise cancellation
    Nc,
    /// Background voice cancellation (removes other speakers as well as noise)
    #[default]
    Bvc,
    /// Background voice cancellation tuned for telephony audio
    BvcTelephony,
}

/// Input options for the room the assistant joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomInputOptions {
    pub video_enabled: bool,
    pub noise_cancellation: NoiseCancellation,
}

impl Default for RoomInputOptions {
    fn default() -> Self {
        Self { video_enabled: true, noise_cancellation: NoiseCancellation::default() }
    }
}

/// External agent runtime that owns connection, streaming and turn-taking.
///
/// Calls arrive in a fixed order: [`connect`](Self::connect), then
/// [`start_session`](Self::start_session), then any number of
/// [`generate_reply`](Self::generate_reply) directives.
#[async_trait]
pub trait AgentRuntime: Send {
    /// Connect to the room assigned to this job.
    async fn connect(&mut self) -> Result<(), AssistantError>;

    /// Start a realtime session with the given persona and input options.
    async fn start_session(&mut self, persona: &Persona, options: &RoomInputOptions) -> Result<(), AssistantError>;

    /// Ask the model to produce a reply following `instructions`.
    async fn generate_reply(&mut self, instructions: &str) -> Result<(), AssistantError>;
}

/// Directive received by a [`DryRunRuntime`].
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Connect { url: Option<String> },
    StartSession { persona: Persona, options: RoomInputOptions },
    GenerateReply { instructions: String },
}

/// Runtime that logs and records directives without contacting any hosted service.
#[derive(Debug, Default)]
pub struct DryRunRuntime {
    url: Option<String>,        // Room server URL, informational only
    connected: bool,            // Set by connect()
    session_started: bool,      // Set by start_session()
    directives: Vec<Directive>, // Everything received, in order
}

impl DryRunRuntime {
    pub fn new(url: Option<String>) -> Self {
        Self { url, ..Default::default() }
    }

    /// Directives received so far, in call order.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }
}

#[async_trait]
impl AgentRuntime for DryRunRuntime {
    async fn connect(&mut self) -> Result<(), AssistantError> {
        match &self.url {
            Some(url) => info!("Connecting agent to room server at {} (dry run)", url),
            None => info!("Connecting agent to room (dry run)"),
        }

        self.connected = true;
        self.directives.push(Directive::Connect { url: self.url.clone() });
        Ok(())
    }

    async fn start_session(&mut self, persona: &Persona, options: &RoomInputOptions) -> Result<(), AssistantError> {
        if !self.connected {
            return Err(AssistantError::NotConnected);
        }

        info!(
            "Starting session: voice={}, temperature={}, video={}, noise_cancellation={:?}",
            persona.voice, persona.temperature, options.video_enabled, options.noise_cancellation
        );
        debug!("Instructions: {}...", persona.instructions.chars().take(50).collect::<String>());

        self.session_started = true;
        self.directives.push(Directive::StartSession { persona: persona.clone(), options: *options });
        Ok(())
    }

    async fn generate_reply(&mut self, instructions: &str) -> Result<(), AssistantError> {
        if !self.session_started {
            return Err(AssistantError::NoSession);
        }

        info!("Generating reply: {}", instructions);
        self.directives.push(Directive::GenerateReply { instructions: instructions.to_string() });
        Ok(())
    }
}
