//! Interview turn orchestrator — the control logic of the client.
//!
//! [`InterviewSession`] owns the [`ConversationStore`] and drives every
//! user-visible operation: resume upload, answer submission, recording
//! toggle and interview termination.  It gates actions on store state,
//! calls the remote service through [`InterviewApi`], folds responses back
//! into the store, and coordinates the two speech adapters with the text
//! input buffer.
//!
//! # Turn cycle
//!
//! ```text
//! upload_resume ──▶ USER "Uploaded Resume: …"
//!                   SYSTEM Status   (confirmation)
//!                   SYSTEM Question (spoken aloud)
//!
//! submit_answer ──▶ USER answer (voice buffer + typed text, merged)
//!                   SYSTEM Feedback
//!                   SYSTEM FollowUp (spoken aloud when one was generated)
//!
//! end_interview ──▶ SYSTEM Status (closing message)
//! ```
//!
//! # Concurrency
//!
//! All operations take `&mut self` and run on one logical timeline, so a
//! second remote call can never start while one is in flight — the `busy`
//! flag exists for the front-end affordance (dim the input while waiting),
//! not as a lock.  Recognition engine events are the only concurrent input;
//! they are drained by the front-end and fed through
//! [`handle_recognition`](InterviewSession::handle_recognition), and they
//! only ever touch the pending-input buffer, never the turn history.
//!
//! # Failure policy
//!
//! Every remote failure is caught here and converted into a SYSTEM `Status`
//! turn; nothing propagates to the caller and nothing is fatal to the
//! process.  `busy` is released on every exit path.

use std::sync::Arc;

use crate::client::{DocumentError, InterviewApi, ResumeDocument};
use crate::conversation::{ConversationStore, Turn, TurnKind};
use crate::speech::{RecognitionEvent, RecognizerError, SpeechSynthesizer, Transcriber};

// ---------------------------------------------------------------------------
// User-visible notices
// ---------------------------------------------------------------------------

/// Gate notice shown when an answer arrives before any resume.
pub const UPLOAD_FIRST_NOTICE: &str =
    "Please upload your resume first to continue with the interview.";

/// Shown when the resume upload fails at the transport level.
pub const UPLOAD_FAILED_NOTICE: &str = "An error occurred while uploading. Please try again.";

/// Shown when answer evaluation fails at the transport level.
pub const EVALUATION_FAILED_NOTICE: &str =
    "An error occurred while evaluating your answer. Please try again.";

/// Shown when interview termination fails at the transport level.
pub const STOP_FAILED_NOTICE: &str =
    "An error occurred while stopping the interview. Please try again.";

/// Stored as the follow-up turn when the service generated none.
pub const NO_FOLLOW_UP_PLACEHOLDER: &str = "No follow-up question generated.";

// ---------------------------------------------------------------------------
// InterviewSession
// ---------------------------------------------------------------------------

/// The interview turn orchestrator.
///
/// Create one per session with [`InterviewSession::new`]; the store comes
/// up seeded with the welcome turn and the gate closed
/// (`resume_accepted == false`).
pub struct InterviewSession {
    store: ConversationStore,
    api: Arc<dyn InterviewApi>,
    voice: Arc<dyn SpeechSynthesizer>,
    transcriber: Transcriber,
}

impl InterviewSession {
    pub fn new(
        api: Arc<dyn InterviewApi>,
        voice: Arc<dyn SpeechSynthesizer>,
        transcriber: Transcriber,
    ) -> Self {
        Self {
            store: ConversationStore::new(),
            api,
            voice,
            transcriber,
        }
    }

    /// Read-only view of the conversation.
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// `true` while a speech recognition session is active.
    pub fn is_recording(&self) -> bool {
        self.transcriber.is_listening()
    }

    // ── Operations ───────────────────────────────────────────────────────

    /// Upload a validated resume and open the interview.
    ///
    /// On success: appends the upload record, the service confirmation and
    /// the initial question; accepts the resume (permanently); speaks the
    /// question aloud when non-empty.  On transport failure: appends one
    /// status turn and leaves the gate closed.
    pub async fn upload_resume(&mut self, document: &ResumeDocument) {
        self.store.set_busy(true);

        match self.api.submit_resume(document).await {
            Ok(response) => {
                log::info!(
                    "resume accepted ({} stored as {})",
                    document.file_name(),
                    response.filename
                );
                self.store
                    .append(Turn::user(format!("Uploaded Resume: {}", document.file_name())));
                self.store
                    .append(Turn::system(TurnKind::Status, response.message));
                self.store
                    .append(Turn::system(TurnKind::Question, response.question.clone()));
                self.store.set_resume_accepted(true);

                if !response.question.trim().is_empty() {
                    self.voice.speak(&response.question);
                }
            }
            Err(e) => {
                log::warn!("resume upload failed: {e}");
                self.store
                    .append(Turn::system(TurnKind::Status, UPLOAD_FAILED_NOTICE));
            }
        }

        self.store.set_busy(false);
    }

    /// Record a rejected document as a chat notice.
    ///
    /// Format validation happens in [`ResumeDocument`] before any network
    /// call; this is how the rejection reaches the transcript.
    pub fn reject_document(&mut self, error: &DocumentError) {
        log::info!("resume rejected: {error}");
        self.store
            .append(Turn::system(TurnKind::Status, error.to_string()));
    }

    /// Submit an answer to the current question.
    ///
    /// The outgoing answer is the merge of the voice buffer
    /// (`pending_input`) and `typed`, trimmed.  An empty merge is a no-op;
    /// before resume acceptance exactly one gate notice is appended and no
    /// remote call is made.
    pub async fn submit_answer(&mut self, typed: &str) {
        // Finalized voice fragments always carry a trailing separator, so
        // plain concatenation keeps the two sources apart.
        let merged = format!("{}{typed}", self.store.pending_input());
        let answer = merged.trim();

        if answer.is_empty() {
            return;
        }

        if !self.store.resume_accepted() {
            self.store
                .append(Turn::system(TurnKind::Status, UPLOAD_FIRST_NOTICE));
            return;
        }

        let answer = answer.to_owned();
        self.store.append(Turn::user(answer.clone()));
        self.store.set_pending_input(String::new());
        self.store.set_busy(true);

        let question = self
            .store
            .current_question()
            .unwrap_or_default()
            .to_owned();

        match self.api.evaluate_answer(&question, &answer).await {
            Ok(response) => {
                self.store
                    .append(Turn::system(TurnKind::Feedback, response.feedback.clone()));

                match response.follow_up() {
                    Some(follow_up) => {
                        let follow_up = follow_up.to_owned();
                        self.store
                            .append(Turn::system(TurnKind::FollowUp, follow_up.clone()));
                        self.voice.speak(&follow_up);
                    }
                    None => {
                        self.store
                            .append(Turn::system(TurnKind::FollowUp, NO_FOLLOW_UP_PLACEHOLDER));
                    }
                }
            }
            Err(e) => {
                log::warn!("answer evaluation failed: {e}");
                self.store
                    .append(Turn::system(TurnKind::Status, EVALUATION_FAILED_NOTICE));
            }
        }

        self.store.set_busy(false);
    }

    /// Start or stop voice input.
    ///
    /// Independent of the remote-call lifecycle: never touches `busy`.
    /// When recognition is unsupported a notice turn is appended and
    /// nothing changes; engine start failures are logged and leave the
    /// transcriber idle.
    pub fn toggle_recording(&mut self) {
        if self.transcriber.is_listening() {
            self.transcriber.stop();
            return;
        }

        match self.transcriber.start() {
            Ok(()) => log::debug!("voice recording started"),
            Err(e @ RecognizerError::Unsupported) => {
                self.store
                    .append(Turn::system(TurnKind::Status, e.to_string()));
            }
            Err(RecognizerError::Start(e)) => {
                log::warn!("could not start recording: {e}");
            }
        }
    }

    /// End the interview and append the closing message.
    ///
    /// Callable at any point, including before resume acceptance.
    pub async fn end_interview(&mut self) {
        self.store.set_busy(true);

        match self.api.end_interview().await {
            Ok(response) => {
                self.store
                    .append(Turn::system(TurnKind::Status, response.message));
            }
            Err(e) => {
                log::warn!("could not stop interview: {e}");
                self.store
                    .append(Turn::system(TurnKind::Status, STOP_FAILED_NOTICE));
            }
        }

        self.store.set_busy(false);
    }

    /// Route one recognition engine event.
    ///
    /// Final fragments are committed to the pending-input buffer with a
    /// trailing separator; provisional fragments are returned for live
    /// display only and never committed (the engine may still revise them).
    /// `Ended`/`Error` events mark the recording session as over.
    pub fn handle_recognition(&mut self, event: RecognitionEvent) -> Option<String> {
        self.transcriber.observe(&event);

        match event {
            RecognitionEvent::Fragment { text, is_final: true } => {
                let text = text.trim();
                if !text.is_empty() {
                    let merged = format!("{}{text} ", self.store.pending_input());
                    self.store.set_pending_input(merged);
                }
                None
            }
            RecognitionEvent::Fragment {
                text,
                is_final: false,
            } => Some(text),
            RecognitionEvent::Ended => None,
            RecognitionEvent::Error(code) => {
                log::warn!("speech recognition error: {code}");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
