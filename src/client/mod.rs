//! Remote interview service client.
//!
//! This module owns transport only — no conversation state:
//!
//! * [`InterviewApi`] — async trait over the three service operations
//!   (resume intake, answer evaluation, session termination).
//! * [`HttpInterviewClient`] — production implementation via `reqwest`.
//! * [`ResumeDocument`] — validated PDF resume; construction is the
//!   client-side format gate, so an invalid document never produces a
//!   network call.
//! * [`ApiError`] / [`DocumentError`] — error variants for transport and
//!   local validation respectively.

pub mod api;
pub mod resume;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use api::{
    ApiError, EvaluationResponse, HttpInterviewClient, InterviewApi, StopResponse, UploadResponse,
};
pub use resume::{DocumentError, ResumeDocument};
