//! Speech input and output adapters.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ RecognitionEngine (trait)        SpeechSynthesizer (trait) │
//! │        │                                  │                │
//! │  CommandRecognizer                 CommandSynthesizer      │
//! │  (external process,                (external process,      │
//! │   line protocol)                    fire-and-forget)       │
//! │        │                                                   │
//! │        ▼ RecognitionEvent (mpsc)                           │
//! │  Transcriber — IDLE ↔ LISTENING state machine              │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both engines are black boxes behind narrow traits so the interview
//! session can be driven entirely by fakes in tests.

pub mod recognizer;
pub mod synthesizer;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use recognizer::{
    CommandRecognizer, RecognitionEngine, RecognitionEvent, RecognizerError, Transcriber,
};
pub use synthesizer::{
    synthesizer_from_config, CommandSynthesizer, NullSynthesizer, SpeechSynthesizer,
};
