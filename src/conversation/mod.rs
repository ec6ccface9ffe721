//! Conversation history and derived interview state.
//!
//! * [`Turn`] / [`Speaker`] / [`TurnKind`] — one tagged entry in the
//!   transcript.
//! * [`ConversationStore`] — the append-only turn history plus the gating,
//!   busy and pending-input flags; single source of truth for the session.

pub mod store;
pub mod turn;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use store::{ConversationStore, WELCOME_MESSAGE};
pub use turn::{Speaker, Turn, TurnKind};
