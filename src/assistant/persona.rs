//! Assistant persona: what the hosted model is told to be and how it sounds.

use std::fs;
use std::path::Path;

use super::AssistantError;
use crate::config::{DEFAULT_VOICE, Voice};

/// System instructions for the vision assistant, aimed at blind and low-vision users.
pub const VISION_INSTRUCTIONS: &str = include_str!("instructions.txt");

/// Directive issued once when the session starts, asking for a short friendly greeting.
pub const GREETING_INSTRUCTIONS: &str = "Sapa pengguna secara singkat serta ramah dan tawarkan bantuan Anda.";

/// Sampling temperature for the realtime model.
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Static configuration describing how the hosted assistant behaves in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub instructions: String, // System prompt
    pub voice: Voice,         // Realtime model voice
    pub temperature: f32,     // Model sampling temperature
}

impl Persona {
    /// The vision assistant persona with its fixed voice and temperature.
    pub fn vision_assistant() -> Self {
        Self { instructions: VISION_INSTRUCTIONS.trim().to_string(), voice: DEFAULT_VOICE, temperature: DEFAULT_TEMPERATURE }
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Replace the instructions with the contents of a text file.
    ///
    /// # Errors
    /// Returns [`AssistantError::Instructions`] if the file cannot be read.
    pub fn with_instructions_file(self, path: &Path) -> Result<Self, AssistantError> {
        let instructions =
            fs::read_to_string(path).map_err(|source| AssistantError::Instructions { path: path.to_path_buf(), source })?;
        Ok(self.with_instructions(instructions.trim()))
    }

    /// Validate the persona before it is handed to a runtime.
    pub fn validate(&self) -> Result<(), AssistantError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AssistantError::InvalidTemperature(self.temperature));
        }

        if self.instructions.trim().is_empty() {
            return Err(AssistantError::EmptyInstructions);
        }

        Ok(())
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::vision_assistant()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn vision_assistant_defaults() {
        let persona = Persona::vision_assistant();
        assert_eq!(persona.voice, Voice::Kore);
        assert_eq!(persona.temperature, 0.8);
        assert!(persona.instructions.starts_with("Anda adalah Asisten AI"));
        assert!(persona.validate().is_ok());
    }

    #[test]
    fn temperature_out_of_range_is_rejected() {
        let persona = Persona::vision_assistant().with_temperature(2.5);
        assert!(matches!(persona.validate(), Err(AssistantError::InvalidTemperature(t)) if t == 2.5));

        let persona = Persona::vision_assistant().with_temperature(-0.1);
        assert!(persona.validate().is_err());
    }

    #[test]
    fn blank_instructions_are_rejected() {
        let persona = Persona::vision_assistant().with_instructions("   \n");
        assert!(matches!(persona.validate(), Err(AssistantError::EmptyInstructions)));
    }

    #[test]
    fn instructions_file_overrides_embedded_prompt() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  Describe the room.  ").unwrap();

        let persona = Persona::vision_assistant().with_instructions_file(file.path()).unwrap();
        assert_eq!(persona.instructions, "Describe the room.");
    }

    #[test]
    fn missing_instructions_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = Persona::vision_assistant().with_instructions_file(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(AssistantError::Instructions { .. })));
    }
}
