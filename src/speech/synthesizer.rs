//! Speech output adapter — best-effort text-to-speech.
//!
//! [`SpeechSynthesizer::speak`] is fire-and-forget: no return value, no
//! error surfaced to the caller.  A silent client is an acceptable
//! degradation, never a blocking failure, so every failure path here is a
//! `log::debug!` and nothing else.

use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::config::SpeechConfig;

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for text-to-speech backends.
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` aloud, best-effort.  Must not block the caller on
    /// playback.
    fn speak(&self, text: &str);
}

// Compile-time assertion: Box<dyn SpeechSynthesizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechSynthesizer>) {}
};

// ---------------------------------------------------------------------------
// NullSynthesizer
// ---------------------------------------------------------------------------

/// Silent synthesizer used when speech output is disabled or unconfigured.
pub struct NullSynthesizer;

impl SpeechSynthesizer for NullSynthesizer {
    fn speak(&self, _text: &str) {}
}

// ---------------------------------------------------------------------------
// CommandSynthesizer
// ---------------------------------------------------------------------------

/// Speaks by spawning an external TTS program.
///
/// The configured command template is tokenised on whitespace; `{text}`,
/// `{lang}` and `{rate}` placeholders are substituted per token.  When no
/// token mentions `{text}` the utterance is appended as the final argument,
/// so a bare program name like `say` works unmodified.
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
    language: String,
    rate: f32,
}

impl CommandSynthesizer {
    /// Build a synthesizer from application config.
    ///
    /// Returns `None` when speech output is disabled or no command template
    /// is configured.
    pub fn from_config(config: &SpeechConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }

        let template = config.synthesizer_command.as_deref()?.trim();
        let mut tokens = template.split_whitespace().map(str::to_owned);
        let program = tokens.next()?;

        Some(Self {
            program,
            args: tokens.collect(),
            language: config.language.clone(),
            rate: config.rate,
        })
    }

    /// Substitute placeholders and append the utterance when the template
    /// never mentions it.
    fn build_args(&self, text: &str) -> Vec<String> {
        let mut has_text = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains("{text}") {
                    has_text = true;
                }
                arg.replace("{text}", text)
                    .replace("{lang}", &self.language)
                    .replace("{rate}", &self.rate.to_string())
            })
            .collect();

        if !has_text {
            args.push(text.to_owned());
        }
        args
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn speak(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let spawned = Command::new(&self.program)
            .args(self.build_args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                // Reap on a detached thread so playback never blocks the
                // conversation loop.
                let spawned = std::thread::Builder::new()
                    .name("speech-output".into())
                    .spawn(move || {
                        let _ = child.wait();
                    });
                if let Err(e) = spawned {
                    log::debug!("could not spawn speech-output reaper: {e}");
                }
            }
            Err(e) => log::debug!("speech output unavailable ({}): {e}", self.program),
        }
    }
}

// ---------------------------------------------------------------------------
// Construction helper
// ---------------------------------------------------------------------------

/// Build the configured synthesizer, falling back to [`NullSynthesizer`]
/// when speech output is disabled or unconfigured.
pub fn synthesizer_from_config(config: &SpeechConfig) -> Arc<dyn SpeechSynthesizer> {
    match CommandSynthesizer::from_config(config) {
        Some(synthesizer) => Arc::new(synthesizer),
        None => Arc::new(NullSynthesizer),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
