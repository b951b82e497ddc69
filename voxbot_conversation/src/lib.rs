#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! The conversation-session state machine and the per-turn pipeline.
//!
//! [`ConversationSession`] owns the ordered transcript of one dialogue and
//! enforces its invariants: at most one system turn, always at index 0;
//! append-only mutation; display views that hide the system turn.
//! [`VoiceChatManager`] drives one full turn against the external providers
//! (transcribe, complete, synthesize) in strict sequence.

mod manager;
mod session;

pub use manager::{
    ChatConfig, ConversationError, TurnResult, VoiceChatManager, VoiceTurnResult,
};
pub use session::{ConversationSession, SessionError};
