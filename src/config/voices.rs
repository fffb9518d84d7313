//! Voice catalogue for the hosted realtime model.
//!
//! The hosted model offers a small, fixed set of prebuilt voices. Names are case-sensitive and
//! must match exactly what the model expects, so lookups never fold case.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Voice used whenever no valid preference is stored.
pub const DEFAULT_VOICE: Voice = Voice::Kore;

/// Prebuilt voice offered by the hosted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, Default)]
pub enum Voice {
    #[value(name = "Puck")]
    Puck,
    #[value(name = "Charon")]
    Charon,
    #[default]
    #[value(name = "Kore")]
    Kore,
    #[value(name = "Fenrir")]
    Fenrir,
    #[value(name = "Aoede")]
    Aoede,
    #[value(name = "Leda")]
    Leda,
    #[value(name = "Orus")]
    Orus,
    #[value(name = "Zephyr")]
    Zephyr,
}

impl Voice {
    /// All voices in the order they are listed to users.
    pub const ALL: [Voice; 8] =
        [Voice::Puck, Voice::Charon, Voice::Kore, Voice::Fenrir, Voice::Aoede, Voice::Leda, Voice::Orus, Voice::Zephyr];

    /// Name of the voice as understood by the hosted model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Puck => "Puck",
            Voice::Charon => "Charon",
            Voice::Kore => "Kore",
            Voice::Fenrir => "Fenrir",
            Voice::Aoede => "Aoede",
            Voice::Leda => "Leda",
            Voice::Orus => "Orus",
            Voice::Zephyr => "Zephyr",
        }
    }

    /// Look up a voice by its exact name.
    ///
    /// # Arguments
    /// * `name` - Voice name, e.g. `Kore`
    ///
    /// # Returns
    /// The matching voice, or `None` when the name is not in the catalogue (including case mismatches).
    pub fn from_name(name: &str) -> Option<Voice> {
        Self::ALL.into_iter().find(|voice| voice.as_str() == name)
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comma-separated list of voice names, as shown in error messages.
pub fn join_voices(voices: &[Voice]) -> String {
    voices.iter().map(Voice::as_str).collect::<Vec<_>>().join(", ")
}

/// Print all available voices.
pub fn print_voices() {
    println!("Available voices:");
    for voice in Voice::ALL {
        if voice == DEFAULT_VOICE {
            println!("  - {} (default)", voice);
        } else {
            println!("  - {}", voice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_eight_voices_in_listing_order() {
        let names: Vec<_> = Voice::ALL.iter().map(Voice::as_str).collect();
        assert_eq!(names, ["Puck", "Charon", "Kore", "Fenrir", "Aoede", "Leda", "Orus", "Zephyr"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(Voice::from_name("Zephyr"), Some(Voice::Zephyr));
        assert_eq!(Voice::from_name("zephyr"), None);
        assert_eq!(Voice::from_name("KORE"), None);
        assert_eq!(Voice::from_name(""), None);
    }

    #[test]
    fn default_is_kore() {
        assert_eq!(Voice::default(), Voice::Kore);
        assert_eq!(DEFAULT_VOICE, Voice::Kore);
    }

    #[test]
    fn serde_uses_exact_names() {
        assert_eq!(serde_json::to_string(&Voice::Aoede).unwrap(), "\"Aoede\"");
        let voice: Voice = serde_json::from_str("\"Orus\"").unwrap();
        assert_eq!(voice, Voice::Orus);
    }

    #[test]
    fn cli_value_names_match_display() {
        for voice in Voice::ALL {
            let parsed = <Voice as ValueEnum>::from_str(voice.as_str(), false).unwrap();
            assert_eq!(parsed, voice);
        }
        assert!(<Voice as ValueEnum>::from_str("puck", false).is_err());
    }

    #[test]
    fn joined_list_names_every_voice() {
        assert_eq!(join_voices(&Voice::ALL), "Puck, Charon, Kore, Fenrir, Aoede, Leda, Orus, Zephyr");
    }
}
