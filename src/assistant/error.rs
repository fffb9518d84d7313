use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("persona instructions are empty")]
    EmptyInstructions,

    #[error("failed to read instructions from {}: {source}", .path.display())]
    Instructions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("agent is not connected to a room")]
    NotConnected,

    #[error("no agent session has been started")]
    NoSession,

    #[error("agent runtime error: {0}")]
    Runtime(String),
}
