//! Speech recognition adapter — engine trait, event contract and the
//! listening state machine.
//!
//! # Overview
//!
//! [`RecognitionEngine`] is the narrow capability interface every speech
//! backend implements: `start` begins a recognition session that streams
//! [`RecognitionEvent`]s into a channel until it ends or errors; `stop`
//! tears the session down.  The trait is object-safe and `Send + Sync` so
//! engines can be held behind an `Arc<dyn RecognitionEngine>` and replaced
//! with a scripted fake in tests.
//!
//! [`Transcriber`] owns the `IDLE ↔ LISTENING` state machine on top of an
//! optional engine.  The engine can end a session on its own (end of speech,
//! backend error), so the orchestrator feeds every drained event through
//! [`Transcriber::observe`] to keep the recording indicator consistent.
//!
//! [`CommandRecognizer`] is the production engine: it spawns an external
//! recognizer process and converts its line-oriented stdout into events.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// RecognitionEvent
// ---------------------------------------------------------------------------

/// One event emitted by a recognition engine while a session is active.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// A transcript fragment.  Non-final fragments are provisional
    /// hypotheses the engine may revise — display-only, never committed to
    /// the input buffer.
    Fragment { text: String, is_final: bool },
    /// The engine ended the session (end of speech or process exit).
    Ended,
    /// The engine reported an error; the session is over.
    Error(String),
}

// ---------------------------------------------------------------------------
// RecognizerError
// ---------------------------------------------------------------------------

/// Failures when starting speech recognition.
#[derive(Debug, Clone, Error)]
pub enum RecognizerError {
    /// No recognition engine is available on this installation.
    #[error("Speech recognition is not available on this system.")]
    Unsupported,

    /// The engine refused to start (already running, missing binary,
    /// permission denied …).
    #[error("speech recognition failed to start: {0}")]
    Start(String),
}

// ---------------------------------------------------------------------------
// RecognitionEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech recognition backends.
///
/// # Contract
///
/// - `start` begins one session; the engine pushes events into `events`
///   and finishes the stream with [`RecognitionEvent::Ended`] (or an
///   `Error` followed by `Ended`).
/// - `stop` tears the session down; it must be safe to call when no
///   session is active.
pub trait RecognitionEngine: Send + Sync {
    /// Begin a recognition session.
    fn start(&self, events: mpsc::Sender<RecognitionEvent>) -> Result<(), RecognizerError>;

    /// End the current session, if any.
    fn stop(&self);
}

// Compile-time assertion: Box<dyn RecognitionEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn RecognitionEngine>) {}
};

// ---------------------------------------------------------------------------
// Transcriber
// ---------------------------------------------------------------------------

/// The `IDLE ↔ LISTENING` state machine over an optional engine.
///
/// ```text
/// IDLE ──start()──▶ LISTENING
/// LISTENING ──stop()───────────────▶ IDLE
/// LISTENING ──observe(Ended/Error)─▶ IDLE   (engine-initiated)
/// ```
///
/// `start` on a `Transcriber` without an engine reports
/// [`RecognizerError::Unsupported`] and stays IDLE.  `stop` is idempotent.
pub struct Transcriber {
    engine: Option<Arc<dyn RecognitionEngine>>,
    events: mpsc::Sender<RecognitionEvent>,
    listening: bool,
}

impl Transcriber {
    /// Create a transcriber over `engine` (or `None` when speech input is
    /// unsupported).  `events` is the channel engine sessions will write to.
    pub fn new(
        engine: Option<Arc<dyn RecognitionEngine>>,
        events: mpsc::Sender<RecognitionEvent>,
    ) -> Self {
        Self {
            engine,
            events,
            listening: false,
        }
    }

    /// `true` while a recognition session is active.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// `true` when an engine is configured at all.
    pub fn is_supported(&self) -> bool {
        self.engine.is_some()
    }

    /// Transition IDLE → LISTENING.
    ///
    /// # Errors
    ///
    /// - [`RecognizerError::Unsupported`] — no engine configured.
    /// - [`RecognizerError::Start`] — already listening, or the engine
    ///   refused to start.
    ///
    /// On error the state remains IDLE.
    pub fn start(&mut self) -> Result<(), RecognizerError> {
        let engine = self.engine.as_ref().ok_or(RecognizerError::Unsupported)?;

        if self.listening {
            return Err(RecognizerError::Start("already listening".into()));
        }

        engine.start(self.events.clone())?;
        self.listening = true;
        Ok(())
    }

    /// Transition LISTENING → IDLE.  Safe to call when already IDLE.
    pub fn stop(&mut self) {
        if self.listening {
            if let Some(engine) = &self.engine {
                engine.stop();
            }
        }
        self.listening = false;
    }

    /// Observe an engine event.  `Ended` and `Error` mark the session as
    /// over even when [`stop`](Self::stop) was never called.
    pub fn observe(&mut self, event: &RecognitionEvent) {
        match event {
            RecognitionEvent::Ended | RecognitionEvent::Error(_) => {
                self.listening = false;
            }
            RecognitionEvent::Fragment { .. } => {}
        }
    }
}

// ---------------------------------------------------------------------------
// CommandRecognizer
// ---------------------------------------------------------------------------

/// Production engine that wraps an external recognizer process.
///
/// The process streams results to stdout, one per line:
///
/// | Line            | Event                          |
/// |-----------------|--------------------------------|
/// | `partial:<text>`| non-final fragment             |
/// | `final:<text>`  | final fragment                 |
/// | any other text  | final fragment                 |
/// | EOF / exit      | [`RecognitionEvent::Ended`]    |
///
/// A dedicated reader thread pumps lines into the event channel; `stop`
/// kills the process, which surfaces to the reader as EOF.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    child: Arc<Mutex<Option<Child>>>,
}

impl CommandRecognizer {
    /// Build a recognizer from a whitespace-separated command line.
    ///
    /// Returns `None` for an empty command line, which callers treat the
    /// same as having no engine configured.
    pub fn new(command_line: &str) -> Option<Self> {
        let mut tokens = command_line.split_whitespace().map(str::to_owned);
        let program = tokens.next()?;

        Some(Self {
            program,
            args: tokens.collect(),
            child: Arc::new(Mutex::new(None)),
        })
    }
}

/// Convert one stdout line into a fragment event.  Blank lines are skipped.
fn parse_line(line: &str) -> Option<RecognitionEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (text, is_final) = if let Some(rest) = line.strip_prefix("partial:") {
        (rest.trim(), false)
    } else if let Some(rest) = line.strip_prefix("final:") {
        (rest.trim(), true)
    } else {
        (line, true)
    };

    if text.is_empty() {
        return None;
    }

    Some(RecognitionEvent::Fragment {
        text: text.to_owned(),
        is_final,
    })
}

impl RecognitionEngine for CommandRecognizer {
    fn start(&self, events: mpsc::Sender<RecognitionEvent>) -> Result<(), RecognizerError> {
        let mut slot = self.child.lock().unwrap();

        if slot.is_some() {
            return Err(RecognizerError::Start("recognizer already running".into()));
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| RecognizerError::Start(e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| RecognizerError::Start("recognizer has no stdout".into()))?;

        let child_slot = Arc::clone(&self.child);
        let spawned = std::thread::Builder::new()
            .name("speech-recognizer".into())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    match line {
                        Ok(line) => {
                            if let Some(event) = parse_line(&line) {
                                if events.blocking_send(event).is_err() {
                                    break;
                                }
                            }
                        }
                        Err(e) => {
                            let _ = events.blocking_send(RecognitionEvent::Error(e.to_string()));
                            break;
                        }
                    }
                }

                // Reap the process so a naturally-ended session can restart.
                if let Some(mut child) = child_slot.lock().unwrap().take() {
                    let _ = child.wait();
                }

                let _ = events.blocking_send(RecognitionEvent::Ended);
            });

        if let Err(e) = spawned {
            let _ = child.kill();
            let _ = child.wait();
            return Err(RecognizerError::Start(e.to_string()));
        }

        *slot = Some(child);
        Ok(())
    }

    fn stop(&self) {
        if let Some(mut child) = self.child.lock().unwrap().take() {
            if let Err(e) = child.kill() {
                log::debug!("could not kill recognizer process: {e}");
            }
            let _ = child.wait();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Engine that accepts every `start` and records nothing.
    struct AlwaysStarts;

    impl RecognitionEngine for AlwaysStarts {
        fn start(&self, _events: mpsc::Sender<RecognitionEvent>) -> Result<(), RecognizerError> {
            Ok(())
        }
        fn stop(&self) {}
    }

    /// Engine that refuses every `start`.
    struct NeverStarts;

    impl RecognitionEngine for NeverStarts {
        fn start(&self, _events: mpsc::Sender<RecognitionEvent>) -> Result<(), RecognizerError> {
            Err(RecognizerError::Start("permission denied".into()))
        }
        fn stop(&self) {}
    }

    fn transcriber_with(engine: Option<Arc<dyn RecognitionEngine>>) -> Transcriber {
        let (tx, _rx) = mpsc::channel(8);
        Transcriber::new(engine, tx)
    }

    // ---- parse_line ---

    #[test]
    fn parse_partial_line() {
        assert_eq!(
            parse_line("partial: I have"),
            Some(RecognitionEvent::Fragment {
                text: "I have".into(),
                is_final: false
            })
        );
    }

    #[test]
    fn parse_final_line() {
        assert_eq!(
            parse_line("final:I have 5 years experience"),
            Some(RecognitionEvent::Fragment {
                text: "I have 5 years experience".into(),
                is_final: true
            })
        );
    }

    #[test]
    fn bare_line_is_final() {
        assert_eq!(
            parse_line("hello world"),
            Some(RecognitionEvent::Fragment {
                text: "hello world".into(),
                is_final: true
            })
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("final:   "), None);
        assert_eq!(parse_line("partial:"), None);
    }

    // ---- Transcriber state machine ---

    #[test]
    fn no_engine_reports_unsupported() {
        let mut transcriber = transcriber_with(None);
        assert!(!transcriber.is_supported());
        assert!(matches!(
            transcriber.start().unwrap_err(),
            RecognizerError::Unsupported
        ));
        assert!(!transcriber.is_listening());
    }

    #[test]
    fn start_transitions_to_listening() {
        let mut transcriber = transcriber_with(Some(Arc::new(AlwaysStarts)));
        transcriber.start().unwrap();
        assert!(transcriber.is_listening());
    }

    #[test]
    fn start_while_listening_is_refused() {
        let mut transcriber = transcriber_with(Some(Arc::new(AlwaysStarts)));
        transcriber.start().unwrap();
        assert!(matches!(
            transcriber.start().unwrap_err(),
            RecognizerError::Start(_)
        ));
        // Still listening — the running session is unaffected.
        assert!(transcriber.is_listening());
    }

    #[test]
    fn engine_refusal_stays_idle() {
        let mut transcriber = transcriber_with(Some(Arc::new(NeverStarts)));
        assert!(matches!(
            transcriber.start().unwrap_err(),
            RecognizerError::Start(_)
        ));
        assert!(!transcriber.is_listening());
    }

    #[test]
    fn stop_is_idempotent_when_idle() {
        let mut transcriber = transcriber_with(Some(Arc::new(AlwaysStarts)));
        transcriber.stop();
        transcriber.stop();
        assert!(!transcriber.is_listening());
    }

    #[test]
    fn stop_returns_to_idle() {
        let mut transcriber = transcriber_with(Some(Arc::new(AlwaysStarts)));
        transcriber.start().unwrap();
        transcriber.stop();
        assert!(!transcriber.is_listening());
    }

    /// The engine can end the session on its own; `observe` must pick the
    /// transition up.
    #[test]
    fn observe_ended_clears_listening() {
        let mut transcriber = transcriber_with(Some(Arc::new(AlwaysStarts)));
        transcriber.start().unwrap();
        transcriber.observe(&RecognitionEvent::Ended);
        assert!(!transcriber.is_listening());
    }

    #[test]
    fn observe_error_clears_listening() {
        let mut transcriber = transcriber_with(Some(Arc::new(AlwaysStarts)));
        transcriber.start().unwrap();
        transcriber.observe(&RecognitionEvent::Error("no-speech".into()));
        assert!(!transcriber.is_listening());
    }

    #[test]
    fn observe_fragment_keeps_listening() {
        let mut transcriber = transcriber_with(Some(Arc::new(AlwaysStarts)));
        transcriber.start().unwrap();
        transcriber.observe(&RecognitionEvent::Fragment {
            text: "hello".into(),
            is_final: true,
        });
        assert!(transcriber.is_listening());
    }

    /// A session can restart after an engine-initiated end.
    #[test]
    fn restart_after_engine_end() {
        let mut transcriber = transcriber_with(Some(Arc::new(AlwaysStarts)));
        transcriber.start().unwrap();
        transcriber.observe(&RecognitionEvent::Ended);
        transcriber.start().unwrap();
        assert!(transcriber.is_listening());
    }

    // ---- CommandRecognizer ---

    #[test]
    fn empty_command_line_is_none() {
        assert!(CommandRecognizer::new("").is_none());
        assert!(CommandRecognizer::new("   ").is_none());
    }

    #[test]
    fn command_line_splits_program_and_args() {
        let recognizer = CommandRecognizer::new("mic-stream --stdout --lang en").unwrap();
        assert_eq!(recognizer.program, "mic-stream");
        assert_eq!(recognizer.args, ["--stdout", "--lang", "en"]);
    }

    #[test]
    fn missing_binary_is_start_error() {
        let recognizer = CommandRecognizer::new("definitely-not-a-real-binary-0000").unwrap();
        let (tx, _rx) = mpsc::channel(8);
        assert!(matches!(
            recognizer.start(tx).unwrap_err(),
            RecognizerError::Start(_)
        ));
    }

    /// End-to-end through a real process: `echo` emits one final line, then
    /// exits, which must surface as a fragment followed by `Ended`.
    #[cfg(unix)]
    #[tokio::test]
    async fn echo_session_emits_fragment_then_ended() {
        let recognizer = CommandRecognizer::new("echo final:hello").unwrap();
        let (tx, mut rx) = mpsc::channel(8);
        recognizer.start(tx).unwrap();

        assert_eq!(
            rx.recv().await,
            Some(RecognitionEvent::Fragment {
                text: "hello".into(),
                is_final: true
            })
        );
        assert_eq!(rx.recv().await, Some(RecognitionEvent::Ended));
    }

    /// After a natural session end the engine must accept a new `start`.
    #[cfg(unix)]
    #[tokio::test]
    async fn echo_session_can_restart() {
        let recognizer = CommandRecognizer::new("echo hi").unwrap();

        let (tx, mut rx) = mpsc::channel(8);
        recognizer.start(tx).unwrap();
        while rx.recv().await != Some(RecognitionEvent::Ended) {}

        let (tx, mut rx) = mpsc::channel(8);
        recognizer.start(tx).unwrap();
        while rx.recv().await != Some(RecognitionEvent::Ended) {}
    }

    #[cfg(unix)]
    #[test]
    fn stop_without_start_is_safe() {
        let recognizer = CommandRecognizer::new("echo hi").unwrap();
        recognizer.stop();
    }
}
