//! Resume-gated interview chat client.
//!
//! A conversational front-end that conducts a mock interview against a
//! remote evaluation service: upload a resume, receive a generated question,
//! answer by typing or speaking, get feedback and a follow-up — until the
//! interview is stopped and scored.
//!
//! # Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`conversation`] | Turn history + derived interview state (the single source of truth) |
//! | [`client`]       | Typed HTTP client for the three service endpoints |
//! | [`speech`]       | Speech input/output adapters behind injectable traits |
//! | [`session`]      | The interview turn orchestrator |
//! | [`config`]       | TOML settings + platform paths |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use interviewer::client::{HttpInterviewClient, ResumeDocument};
//! use interviewer::config::AppConfig;
//! use interviewer::session::InterviewSession;
//! use interviewer::speech::{synthesizer_from_config, Transcriber};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let api = Arc::new(HttpInterviewClient::from_config(&config.server));
//!     let voice = synthesizer_from_config(&config.speech);
//!     let (event_tx, _event_rx) = tokio::sync::mpsc::channel(32);
//!
//!     let mut session =
//!         InterviewSession::new(api, voice, Transcriber::new(None, event_tx));
//!
//!     let resume = ResumeDocument::from_path("resume.pdf").unwrap();
//!     session.upload_resume(&resume).await;
//!     session.submit_answer("I have 5 years experience").await;
//! }
//! ```

pub mod client;
pub mod config;
pub mod conversation;
pub mod session;
pub mod speech;
