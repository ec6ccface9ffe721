//! Conversation turn types.
//!
//! A [`Turn`] is one atomic entry in the interview transcript, attributed to
//! either participant and tagged with a [`TurnKind`].  The kind tag replaces
//! fragile text-prefix matching: deriving the current question, rendering,
//! and speech output all dispatch on it.

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// Which side of the conversation produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The interview candidate.
    User,
    /// The interviewer (remote service or local status messages).
    System,
}

// ---------------------------------------------------------------------------
// TurnKind
// ---------------------------------------------------------------------------

/// Structural role of a turn within the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// Free text — candidate answers, the welcome message.
    Plain,
    /// An interview question generated from the resume.
    Question,
    /// Evaluation feedback on the previous answer.
    Feedback,
    /// A follow-up question derived from the previous answer.
    FollowUp,
    /// Status and error notices (upload confirmations, failures, closing
    /// message).  Never question-like.
    Status,
}

impl TurnKind {
    /// Display prefix used by the terminal renderer.
    ///
    /// Presentation only — the prefix is never stored in [`Turn::text`] and
    /// never participates in current-question derivation.
    pub fn prefix(&self) -> &'static str {
        match self {
            TurnKind::Plain | TurnKind::Status => "",
            TurnKind::Question => "Question: ",
            TurnKind::Feedback => "Feedback: ",
            TurnKind::FollowUp => "Follow-up Question: ",
        }
    }
}

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// One immutable entry in the conversation history.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub speaker: Speaker,
    pub kind: TurnKind,
    pub text: String,
}

impl Turn {
    /// A candidate turn (always [`TurnKind::Plain`]).
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            kind: TurnKind::Plain,
            text: text.into(),
        }
    }

    /// An interviewer turn of the given kind.
    pub fn system(kind: TurnKind, text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::System,
            kind,
            text: text.into(),
        }
    }

    /// `true` for SYSTEM turns that can serve as the "current question":
    /// initial questions and follow-ups.
    pub fn is_question_like(&self) -> bool {
        self.speaker == Speaker::System
            && matches!(self.kind, TurnKind::Question | TurnKind::FollowUp)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turns_are_plain() {
        let turn = Turn::user("I have 5 years experience");
        assert_eq!(turn.speaker, Speaker::User);
        assert_eq!(turn.kind, TurnKind::Plain);
        assert!(!turn.is_question_like());
    }

    #[test]
    fn system_question_is_question_like() {
        assert!(Turn::system(TurnKind::Question, "Q1").is_question_like());
        assert!(Turn::system(TurnKind::FollowUp, "Q2").is_question_like());
    }

    #[test]
    fn status_and_feedback_are_not_question_like() {
        assert!(!Turn::system(TurnKind::Status, "Got it").is_question_like());
        assert!(!Turn::system(TurnKind::Feedback, "Good").is_question_like());
        assert!(!Turn::system(TurnKind::Plain, "Welcome").is_question_like());
    }

    /// A user turn must never be question-like, even with a question kind.
    #[test]
    fn user_speaker_never_question_like() {
        let turn = Turn {
            speaker: Speaker::User,
            kind: TurnKind::Question,
            text: "what?".into(),
        };
        assert!(!turn.is_question_like());
    }

    #[test]
    fn prefixes() {
        assert_eq!(TurnKind::Question.prefix(), "Question: ");
        assert_eq!(TurnKind::FollowUp.prefix(), "Follow-up Question: ");
        assert_eq!(TurnKind::Feedback.prefix(), "Feedback: ");
        assert_eq!(TurnKind::Status.prefix(), "");
        assert_eq!(TurnKind::Plain.prefix(), "");
    }
}
