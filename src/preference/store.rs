//! File-backed voice preference store.

use std::fs;
use std::io::{self, Write};
use std::iter;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use super::PreferenceError;
use crate::config::{DEFAULT_VOICE, Voice};

/// Config file used when no explicit path is given, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "voice_config.json";

/// Key holding the voice in the store's own config file.
pub const SELECTED_VOICE_KEY: &str = "selected_voice";

/// Key holding the voice in a companion app's shared-preferences file.
pub const SHARED_PREFERENCES_KEY: &str = "selected_voice_preference";

/// A JSON file and the key inside it that holds a voice name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSource {
    pub path: PathBuf,
    pub key: String,
}

impl PreferenceSource {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self { path: path.into(), key: key.into() }
    }

    /// Source for a companion app's shared-preferences file.
    pub fn shared_preferences(path: impl Into<PathBuf>) -> Self {
        Self::new(path, SHARED_PREFERENCES_KEY)
    }
}

/// Outcome of reading one preference source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredPreference {
    /// The source holds a valid voice.
    Found(Voice),
    /// The file does not exist or has no value under the key.
    Absent,
    /// The key holds something that is not a known voice.
    Unrecognized(String),
    /// The file could not be read or is not a JSON object.
    Malformed(String),
}

/// On-disk representation. Only this field is ever written.
#[derive(Serialize)]
struct PreferenceFile {
    selected_voice: Voice,
}

/// Persistent store for the selected voice.
///
/// Reads consult the primary config file first and then each fallback source in order; the
/// first valid voice wins. Writes always go to the primary file and replace its whole content.
#[derive(Debug)]
pub struct VoicePreferenceStore {
    primary: PreferenceSource,        // Store-owned config file
    fallbacks: Vec<PreferenceSource>, // Read-only external locations
    write_lock: Mutex<()>,            // Serializes writers sharing this store
}

impl VoicePreferenceStore {
    /// Create a store backed by the config file at `path`, with no fallback sources.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { primary: PreferenceSource::new(path, SELECTED_VOICE_KEY), fallbacks: Vec::new(), write_lock: Mutex::new(()) }
    }

    /// Append read-only fallback sources, consulted when the config file has no valid voice.
    pub fn with_fallbacks(mut self, fallbacks: impl IntoIterator<Item = PreferenceSource>) -> Self {
        self.fallbacks.extend(fallbacks);
        self
    }

    /// Resolve the current voice.
    ///
    /// Never fails: missing, unreadable, malformed or invalid data resolves to the default voice.
    /// Anything other than a missing value is logged as a warning.
    ///
    /// An unknown voice or malformed file never ends the search: every remaining source is still
    /// consulted, including fallbacks behind a broken config file.
    pub fn load(&self) -> Voice {
        for source in iter::once(&self.primary).chain(&self.fallbacks) {
            match read_source(source) {
                StoredPreference::Found(voice) => {
                    debug!("Voice preference {} read from {}", voice, source.path.display());
                    return voice;
                }
                StoredPreference::Absent => {}
                StoredPreference::Unrecognized(value) => {
                    warn!("Ignoring unknown voice {} in {}", value, source.path.display());
                }
                StoredPreference::Malformed(reason) => {
                    warn!("Error reading voice preference from {}: {}", source.path.display(), reason);
                }
            }
        }

        debug!("No stored voice preference, using default {}", DEFAULT_VOICE);
        DEFAULT_VOICE
    }

    /// Alias of [`load`](Self::load) matching the library function name.
    pub fn get_voice(&self) -> Voice {
        self.load()
    }

    /// Validate `voice` and persist it.
    ///
    /// # Arguments
    /// * `voice` - Voice name; must match a catalogue entry exactly
    ///
    /// # Returns
    /// The stored voice.
    ///
    /// # Errors
    /// [`PreferenceError::InvalidVoice`] when the name is unknown (nothing is written), or
    /// [`PreferenceError::Storage`] when the file cannot be written.
    pub fn set_voice(&self, voice: &str) -> Result<Voice, PreferenceError> {
        let voice = Voice::from_name(voice).ok_or_else(|| PreferenceError::invalid_voice(voice))?;
        self.save(voice)?;
        Ok(voice)
    }

    /// Persist an already validated voice, replacing the whole config file.
    ///
    /// # Errors
    /// [`PreferenceError::Storage`] when the file cannot be written.
    pub fn save(&self, voice: Voice) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock();
        let path = &self.primary.path;

        match write_atomic(path, voice) {
            Ok(()) => {
                info!("Voice preference set to {}", voice);
                Ok(())
            }
            Err(source) => {
                error!("Failed to save voice preference to {}: {}", path.display(), source);
                Err(PreferenceError::Storage { path: path.clone(), source })
            }
        }
    }
}

impl Default for VoicePreferenceStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

/// Read the voice currently stored in `voice_config.json` in the working directory.
pub fn get_voice() -> Voice {
    VoicePreferenceStore::default().load()
}

/// Validate and store `voice` in `voice_config.json` in the working directory.
///
/// # Errors
/// See [`VoicePreferenceStore::set_voice`].
pub fn set_voice(voice: &str) -> Result<Voice, PreferenceError> {
    VoicePreferenceStore::default().set_voice(voice)
}

/// Read and classify a single preference source.
pub fn read_source(source: &PreferenceSource) -> StoredPreference {
    match fs::read_to_string(&source.path) {
        Ok(contents) => parse_preference(&contents, &source.key),
        Err(e) if e.kind() == io::ErrorKind::NotFound => StoredPreference::Absent,
        Err(e) => StoredPreference::Malformed(e.to_string()),
    }
}

/// Classify the voice stored under `key` in a JSON document.
///
/// Unknown keys are ignored. A document that is not a JSON object is malformed.
pub fn parse_preference(contents: &str, key: &str) -> StoredPreference {
    let object: Map<String, Value> = match serde_json::from_str(contents) {
        Ok(object) => object,
        Err(e) => return StoredPreference::Malformed(e.to_string()),
    };

    match object.get(key) {
        None | Some(Value::Null) => StoredPreference::Absent,
        Some(Value::String(name)) => match Voice::from_name(name) {
            Some(voice) => StoredPreference::Found(voice),
            None => StoredPreference::Unrecognized(format!("'{}'", name)),
        },
        Some(other) => StoredPreference::Unrecognized(other.to_string()),
    }
}

/// Write the preference to a uniquely named sibling temporary file and rename it over `path`.
///
/// Each write owns its temporary file, so concurrent writers in other processes never rename
/// each other's partial output. The temporary file is removed if any step fails.
fn write_atomic(path: &Path, voice: Voice) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };

    let json = serde_json::to_vec(&PreferenceFile { selected_voice: voice })?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
