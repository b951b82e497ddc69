//! Session state for a single dialogue.
//!
//! A session is created empty at the start of an interaction and destroyed
//! with it; nothing here persists. The transcript is append-only: turns are
//! never edited, reordered or removed once appended.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use voxbot_core::{PersonaProfile, Role, Turn};

/// Error raised by session mutations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("validation error: {0}")]
    Validation(String),
}

/// The authoritative turn sequence of one conversation.
///
/// Produces the exact message list sent to the completion endpoint
/// ([`Self::to_api_messages`]) and the user-facing views that exclude the
/// system turn.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    /// Session identifier
    pub id: Uuid,
    /// Ordered transcript; insertion order is conversational order
    turns: Vec<Turn>,
    /// Guard for the idempotent system-prompt insert
    system_installed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl ConversationSession {
    /// Create a new empty conversation session.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            turns: Vec::new(),
            system_installed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Install the persona system turn at index 0 if absent.
    ///
    /// Idempotent, first write wins: once a system turn exists, later calls
    /// are no-ops regardless of template or profile.
    pub fn ensure_system_prompt(&mut self, template: &str, profile: &PersonaProfile) {
        if self.system_installed {
            return;
        }
        self.turns
            .insert(0, Turn::new(Role::System, profile.render(template)));
        self.system_installed = true;
        self.updated_at = Utc::now();
    }

    /// Append the user's utterance.
    ///
    /// Rejects text that trims to empty; the transcript is unchanged on
    /// failure.
    pub fn append_user_turn(&mut self, text: &str) -> Result<(), SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::Validation("user text is empty".to_string()));
        }
        self.turns.push(Turn::new(Role::User, text.to_string()));
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Append the assistant's reply. Only called after a successful
    /// completion for the preceding user turn.
    pub fn append_assistant_turn(&mut self, text: &str) {
        self.turns.push(Turn::new(Role::Assistant, text.to_string()));
        self.updated_at = Utc::now();
    }

    /// The full ordered sequence, system turn included: exactly the payload
    /// the completion endpoint expects.
    #[must_use]
    pub fn to_api_messages(&self) -> &[Turn] {
        &self.turns
    }

    /// The ordered sequence without the system turn, for rendering.
    #[must_use]
    pub fn to_display_view(&self) -> Vec<&Turn> {
        self.turns
            .iter()
            .filter(|t| t.role != Role::System)
            .collect()
    }

    /// The display view joined into labeled lines for the review pane and
    /// clipboard export.
    #[must_use]
    pub fn to_transcript_text(&self, user_label: &str, assistant_label: &str) -> String {
        self.to_display_view()
            .iter()
            .map(|t| {
                let label = match t.role {
                    Role::User => user_label,
                    _ => assistant_label,
                };
                format!("{label}: {}", t.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the system turn has been installed.
    #[must_use]
    pub const fn has_system_prompt(&self) -> bool {
        self.system_installed
    }

    /// Number of user turns so far.
    #[must_use]
    pub fn user_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.role == Role::User).count()
    }

    /// Total turn count, system turn included.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Check if the session has no turns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}
