//! Interview session orchestration.
//!
//! [`InterviewSession`] is the control logic of the client: it gates user
//! actions on conversation state, drives the remote interview service,
//! folds responses into the conversation store, and coordinates the speech
//! adapters with the text input buffer.

pub mod orchestrator;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use orchestrator::{
    InterviewSession, EVALUATION_FAILED_NOTICE, NO_FOLLOW_UP_PLACEHOLDER, STOP_FAILED_NOTICE,
    UPLOAD_FAILED_NOTICE, UPLOAD_FIRST_NOTICE,
};
