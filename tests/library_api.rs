//! Module-level `get_voice`/`set_voice`, which resolve `voice_config.json` against the
//! working directory.
//!
//! Kept in its own test binary with a single test because it changes the process working
//! directory.

use std::env;
use std::fs;

use voice_bridge::{PreferenceError, Voice, get_voice, set_voice};

#[test]
fn library_functions_use_config_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let previous = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();

    assert_eq!(get_voice(), Voice::Kore);
    assert!(matches!(set_voice("Banana"), Err(PreferenceError::InvalidVoice { .. })));
    assert!(!dir.path().join("voice_config.json").exists());

    assert_eq!(set_voice("Orus").unwrap(), Voice::Orus);
    assert_eq!(get_voice(), Voice::Orus);
    assert_eq!(fs::read_to_string(dir.path().join("voice_config.json")).unwrap(), r#"{"selected_voice":"Orus"}"#);

    env::set_current_dir(previous).unwrap();
}
