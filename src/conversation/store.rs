//! The conversation store — single source of truth for interview state.
//!
//! [`ConversationStore`] owns the ordered turn history plus the derived
//! session flags: whether a resume has been accepted (the gate for answer
//! evaluation), whether a remote call is in flight, and the free-text input
//! buffer that merges typed text with finalized voice transcripts.
//!
//! The store is a pure in-memory structure with no error conditions.  All
//! mutation goes through its four mutators so the orchestrator is the only
//! component that can change interview state.

use crate::conversation::turn::{Turn, TurnKind};

/// Seeded as the first SYSTEM turn of every session.
pub const WELCOME_MESSAGE: &str =
    "Welcome! Please upload your resume in PDF format to begin the interview process.";

// ---------------------------------------------------------------------------
// ConversationStore
// ---------------------------------------------------------------------------

/// Ordered turn history plus derived session state.
///
/// Invariants maintained here:
///
/// * `turns` is append-only; entries are never reordered or mutated.
/// * `resume_accepted` transitions `false → true` at most once and never
///   reverts — an attempt to clear it is ignored.
/// * The current question is the text of the most recent question-like turn
///   (SYSTEM `Question` or `FollowUp`), scanning newest-first.
///
/// One instance exists per interview session; it lives for the process
/// lifetime and is only ever appended to.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    turns: Vec<Turn>,
    resume_accepted: bool,
    busy: bool,
    pending_input: String,
}

impl ConversationStore {
    /// Create a store seeded with the welcome turn.
    pub fn new() -> Self {
        Self {
            turns: vec![Turn::system(TurnKind::Plain, WELCOME_MESSAGE)],
            resume_accepted: false,
            busy: false,
            pending_input: String::new(),
        }
    }

    // ── Mutators ─────────────────────────────────────────────────────────

    /// Append a turn to the end of the history.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Mark a remote call as in flight (or completed).
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Record resume acceptance.  Once accepted the flag never reverts;
    /// passing `false` afterwards is a no-op.
    pub fn set_resume_accepted(&mut self, accepted: bool) {
        self.resume_accepted = self.resume_accepted || accepted;
    }

    /// Replace the free-text input buffer.
    pub fn set_pending_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    // ── Derived state ────────────────────────────────────────────────────

    /// The question the next answer responds to: the text of the most recent
    /// question-like turn, newest-first.  `None` before the first question.
    ///
    /// When both an initial question and later follow-ups exist, the most
    /// recent one wins — including consecutive follow-ups with no answer in
    /// between.
    pub fn current_question(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.is_question_like())
            .map(|turn| turn.text.as_str())
    }

    // ── Read accessors ───────────────────────────────────────────────────

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn resume_accepted(&self) -> bool {
        self.resume_accepted
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
