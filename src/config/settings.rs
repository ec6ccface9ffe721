//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Connection settings for the remote interview service.
///
/// The service exposes three endpoints relative to `base_url`:
/// `/upload` (resume intake), `/evaluate-answer` (answer evaluation) and
/// `/stop` (session termination).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the interview service, without a trailing slash.
    pub base_url: String,
    /// Maximum seconds to wait for a response before timing out.
    ///
    /// Resume processing and answer evaluation both run an LLM server-side,
    /// so this is deliberately generous.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            timeout_secs: 120,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for speech input (recognition) and output (synthesis).
///
/// Both capabilities are optional: when the corresponding command is unset
/// the feature degrades silently (no voice output, voice input reported as
/// unsupported).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Whether questions are spoken aloud at all.
    pub enabled: bool,
    /// BCP-47 language tag passed to the synthesizer (e.g. `"en-US"`).
    pub language: String,
    /// Speaking rate multiplier (1.0 = normal speed).
    pub rate: f32,
    /// Command template for the external text-to-speech program.
    ///
    /// The tokens `{text}`, `{lang}` and `{rate}` are substituted before the
    /// command is spawned; when no `{text}` token is present the utterance is
    /// appended as the final argument.  Example: `"espeak -v {lang} {text}"`.
    pub synthesizer_command: Option<String>,
    /// Command line for the external speech recognizer.
    ///
    /// The program is expected to stream recognition results to stdout, one
    /// per line: `partial:<text>` for provisional hypotheses, `final:<text>`
    /// (or a bare line) for finalized fragments.  `None` means speech input
    /// is unsupported on this installation.
    pub recognizer_command: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en-US".into(),
            rate: 1.0,
            synthesizer_command: None,
            recognizer_command: None,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Terminal front-end behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Echo provisional (non-final) transcript fragments while recording.
    pub show_partial_transcripts: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_partial_transcripts: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use interviewer::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote interview service connection settings.
    pub server: ServerConfig,
    /// Speech input/output settings.
    pub speech: SpeechConfig,
    /// Terminal front-end settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // ServerConfig
        assert_eq!(original.server.base_url, loaded.server.base_url);
        assert_eq!(original.server.timeout_secs, loaded.server.timeout_secs);

        // SpeechConfig
        assert_eq!(original.speech.enabled, loaded.speech.enabled);
        assert_eq!(original.speech.language, loaded.speech.language);
        assert_eq!(original.speech.rate, loaded.speech.rate);
        assert_eq!(
            original.speech.synthesizer_command,
            loaded.speech.synthesizer_command
        );
        assert_eq!(
            original.speech.recognizer_command,
            loaded.speech.recognizer_command
        );

        // UiConfig
        assert_eq!(
            original.ui.show_partial_transcripts,
            loaded.ui.show_partial_transcripts
        );
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.server.base_url, default.server.base_url);
        assert_eq!(config.speech.language, default.speech.language);
        assert_eq!(
            config.ui.show_partial_transcripts,
            default.ui.show_partial_transcripts
        );
    }

    /// Verify default values match the documented defaults.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.server.base_url, "http://localhost:5000");
        assert_eq!(cfg.server.timeout_secs, 120);
        assert!(cfg.speech.enabled);
        assert_eq!(cfg.speech.language, "en-US");
        assert_eq!(cfg.speech.rate, 1.0);
        assert!(cfg.speech.synthesizer_command.is_none());
        assert!(cfg.speech.recognizer_command.is_none());
        assert!(cfg.ui.show_partial_transcripts);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.server.base_url = "https://interviews.example.com".into();
        cfg.server.timeout_secs = 30;
        cfg.speech.language = "en-GB".into();
        cfg.speech.rate = 1.25;
        cfg.speech.synthesizer_command = Some("espeak -v {lang} {text}".into());
        cfg.speech.recognizer_command = Some("mic-stream --stdout".into());
        cfg.ui.show_partial_transcripts = false;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.server.base_url, "https://interviews.example.com");
        assert_eq!(loaded.server.timeout_secs, 30);
        assert_eq!(loaded.speech.language, "en-GB");
        assert_eq!(loaded.speech.rate, 1.25);
        assert_eq!(
            loaded.speech.synthesizer_command.as_deref(),
            Some("espeak -v {lang} {text}")
        );
        assert_eq!(
            loaded.speech.recognizer_command.as_deref(),
            Some("mic-stream --stdout")
        );
        assert!(!loaded.ui.show_partial_transcripts);
    }
}
