//! Application configuration and CLI argument parsing.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use super::voices::{DEFAULT_VOICE, Voice};
use crate::assistant::{AssistantError, DEFAULT_TEMPERATURE, NoiseCancellation, Persona, RoomInputOptions};
use crate::preference::{DEFAULT_CONFIG_FILE, PreferenceSource, VoicePreferenceStore};
use crate::server::ServerConfig;

/// Voice bridge application configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "voice-bridge")]
#[command(author, version, about = "Voice preference store and vision assistant configurator", long_about = None)]
pub struct AppConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Subcommands. Running without one prints the current voice.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Server(ServerArgs),

    /// Set the voice preference
    Set {
        /// Voice name
        #[arg(value_enum)]
        voice: Voice,
    },

    /// Print the current voice preference
    Get,

    /// List all available voices
    List,

    /// Configure the vision assistant and run it against the dry-run agent runtime
    Assistant(AssistantArgs),
}

/// Location of the preference file and its read-only fallbacks.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Voice preference file
    #[arg(long, short = 'c', global = true, env = "VOICE_CONFIG_FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Extra shared-preferences files consulted when the config file holds no valid voice
    #[arg(long = "fallback-path", global = true, env = "VOICE_FALLBACK_PATHS", value_delimiter = ',')]
    pub fallback_paths: Vec<PathBuf>,

    /// Companion app identifier; its standard shared-preferences locations are added as fallbacks
    #[arg(long, global = true, env = "VOICE_APP_ID")]
    pub app_id: Option<String>,
}

impl StoreArgs {
    /// Fallback sources in lookup order: explicit paths first, then the app's standard locations.
    pub fn fallback_sources(&self) -> Vec<PreferenceSource> {
        let app_paths = self.app_id.as_deref().map(shared_preferences_paths).unwrap_or_default();

        self.fallback_paths.iter().cloned().chain(app_paths).map(PreferenceSource::shared_preferences).collect()
    }

    /// Open the preference store described by these arguments.
    pub fn open_store(&self) -> VoicePreferenceStore {
        VoicePreferenceStore::new(&self.config_file).with_fallbacks(self.fallback_sources())
    }
}

/// HTTP server options.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Host to listen on
    #[arg(long, env = "VOICE_BRIDGE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', env = "VOICE_BRIDGE_PORT", default_value = "5000")]
    pub port: u16,
}

impl ServerArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(&self.host, self.port)
    }
}

/// Vision assistant options.
#[derive(Args, Debug, Clone)]
pub struct AssistantArgs {
    /// Realtime model voice
    #[arg(long, value_enum, default_value_t = DEFAULT_VOICE)]
    pub voice: Voice,

    /// Use the stored voice preference instead of --voice
    #[arg(long, conflicts_with = "voice")]
    pub voice_from_store: bool,

    /// Model temperature (0.0-2.0)
    #[arg(long, env = "ASSISTANT_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE, value_parser = parse_temperature)]
    pub temperature: f32,

    /// Disable video input from the room
    #[arg(long)]
    pub no_video: bool,

    /// Noise-cancellation model for incoming audio
    #[arg(long, value_enum, default_value = "bvc")]
    pub noise_cancellation: NoiseCancellation,

    /// Replace the built-in instructions with the contents of this file
    #[arg(long)]
    pub instructions_file: Option<PathBuf>,

    /// Room server URL handed to the agent runtime
    #[arg(long, env = "LIVEKIT_URL")]
    pub livekit_url: Option<String>,
}

impl AssistantArgs {
    /// Build the persona, reading the stored voice only when explicitly requested.
    ///
    /// # Errors
    /// Returns an error if the instructions file cannot be read.
    pub fn persona(&self, store: &VoicePreferenceStore) -> Result<Persona, AssistantError> {
        let voice = if self.voice_from_store { store.load() } else { self.voice };
        let persona = Persona::vision_assistant().with_voice(voice).with_temperature(self.temperature);

        match &self.instructions_file {
            Some(path) => persona.with_instructions_file(path),
            None => Ok(persona),
        }
    }

    pub fn input_options(&self) -> RoomInputOptions {
        RoomInputOptions { video_enabled: !self.no_video, noise_cancellation: self.noise_cancellation }
    }
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    ///
    /// Invalid argument values (such as an unknown voice) exit with status 1; other usage errors
    /// keep clap's behaviour.
    pub fn from_args() -> Self {
        match Self::try_parse() {
            Ok(config) => config,
            Err(e) if e.kind() == ErrorKind::InvalidValue => {
                let _ = e.print();
                std::process::exit(1);
            }
            Err(e) => e.exit(),
        }
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Config file: {}", self.store.config_file.display());
        for source in self.store.fallback_sources() {
            info!("  Fallback: {}", source.path.display());
        }
        match &self.command {
            Some(Command::Server(args)) => info!("  Listen address: {}", args.server_config().addr()),
            Some(Command::Assistant(args)) => {
                info!("  Voice: {}", if args.voice_from_store { "from store".to_string() } else { args.voice.to_string() });
                info!("  Temperature: {}", args.temperature);
                info!("  Video: {}", !args.no_video);
                info!("  Noise cancellation: {:?}", args.noise_cancellation);
                if let Some(ref url) = args.livekit_url {
                    info!("  Room server: {}", url);
                }
            }
            _ => {}
        }
    }
}

/// Standard shared-preferences locations of a companion app on Linux, Windows and macOS.
///
/// # Returns
/// Paths under the user's home directory, or nothing if the home directory is unknown.
pub fn shared_preferences_paths(app_id: &str) -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };

    [
        home.join(".local").join("share").join(app_id),
        home.join("AppData").join("Local").join(app_id),
        home.join("Library").join("Application Support").join(app_id),
    ]
    .into_iter()
    .map(|dir| dir.join("shared_preferences.json"))
    .collect()
}

/// Parse and validate temperature value (0.0-2.0).
fn parse_temperature(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{}' is not a valid float", s))?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("temperature must be between 0.0 and 2.0, got {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<AppConfig, clap::Error> {
        AppConfig::try_parse_from(std::iter::once("voice-bridge").chain(args.iter().copied()))
    }

    #[test]
    fn no_subcommand_defaults_to_get() {
        let config = parse(&[]).unwrap();
        assert!(config.command.is_none());
        assert_eq!(config.store.config_file, PathBuf::from("voice_config.json"));
    }

    #[test]
    fn set_accepts_exact_voice_names() {
        let config = parse(&["set", "Puck"]).unwrap();
        assert!(matches!(config.command, Some(Command::Set { voice: Voice::Puck })));
    }

    #[test]
    fn set_rejects_unknown_or_miscased_voice() {
        for name in ["Banana", "puck"] {
            let err = parse(&["set", name]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidValue);
        }
    }

    #[test]
    fn server_defaults() {
        let config = parse(&["server"]).unwrap();
        let Some(Command::Server(args)) = config.command else {
            panic!("expected server command");
        };
        assert_eq!(args.server_config().addr(), "0.0.0.0:5000");
    }

    #[test]
    fn server_host_and_port() {
        let config = parse(&["server", "--host", "127.0.0.1", "--port", "8080"]).unwrap();
        let Some(Command::Server(args)) = config.command else {
            panic!("expected server command");
        };
        assert_eq!(args.server_config().addr(), "127.0.0.1:8080");
    }

    #[test]
    fn global_config_file_after_subcommand() {
        let config = parse(&["get", "--config-file", "/tmp/prefs.json"]).unwrap();
        assert_eq!(config.store.config_file, PathBuf::from("/tmp/prefs.json"));
    }

    #[test]
    fn explicit_fallbacks_come_first() {
        let config = parse(&["--fallback-path", "/a.json,/b.json", "--app-id", "com.example.app", "get"]).unwrap();
        let sources = config.store.fallback_sources();

        assert_eq!(sources[0], PreferenceSource::shared_preferences("/a.json"));
        assert_eq!(sources[1], PreferenceSource::shared_preferences("/b.json"));
        assert_eq!(sources.len(), 2 + shared_preferences_paths("com.example.app").len());
    }

    #[test]
    fn shared_preferences_paths_end_with_app_id() {
        for path in shared_preferences_paths("com.example.app") {
            assert!(path.ends_with("com.example.app/shared_preferences.json"));
        }
    }

    #[test]
    fn assistant_defaults() {
        let config = parse(&["assistant"]).unwrap();
        let Some(Command::Assistant(args)) = config.command else {
            panic!("expected assistant command");
        };
        assert_eq!(args.voice, Voice::Kore);
        assert_eq!(args.temperature, 0.8);
        assert!(!args.voice_from_store);
        assert_eq!(args.input_options(), RoomInputOptions::default());
    }

    #[test]
    fn assistant_options() {
        let config =
            parse(&["assistant", "--voice", "Aoede", "--temperature", "1.2", "--no-video", "--noise-cancellation", "none"]).unwrap();
        let Some(Command::Assistant(args)) = config.command else {
            panic!("expected assistant command");
        };
        assert_eq!(args.voice, Voice::Aoede);
        assert_eq!(args.temperature, 1.2);
        let options = args.input_options();
        assert!(!options.video_enabled);
        assert_eq!(options.noise_cancellation, NoiseCancellation::None);
    }

    #[test]
    fn assistant_rejects_out_of_range_temperature() {
        let err = parse(&["assistant", "--temperature", "2.5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn assistant_voice_from_store_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        let store = VoicePreferenceStore::new(dir.path().join("voice_config.json"));
        store.save(Voice::Leda).unwrap();

        let config = parse(&["assistant"]).unwrap();
        let Some(Command::Assistant(args)) = config.command else {
            panic!("expected assistant command");
        };
        assert_eq!(args.persona(&store).unwrap().voice, Voice::Kore);

        let config = parse(&["assistant", "--voice-from-store"]).unwrap();
        let Some(Command::Assistant(args)) = config.command else {
            panic!("expected assistant command");
        };
        assert_eq!(args.persona(&store).unwrap().voice, Voice::Leda);
    }

    #[test]
    fn temperature_parser() {
        assert_eq!(parse_temperature("0.0"), Ok(0.0));
        assert_eq!(parse_temperature("2.0"), Ok(2.0));
        assert!(parse_temperature("2.1").is_err());
        assert!(parse_temperature("warm").is_err());
    }
}
