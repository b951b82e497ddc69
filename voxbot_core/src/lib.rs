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

//! Shared types and provider contracts for the voxbot voice chatbot.
//!
//! The hosted vendor endpoints (speech-to-text, chat completion, speech
//! synthesis) are reached only through the traits defined here, so the
//! conversation layer never depends on a concrete HTTP client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod audio;
pub mod persona;

pub use audio::AudioFormat;
pub use persona::{PersonaProfile, sample_profile};

/// Speaker role of a single turn, serialized the way the completion
/// endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One utterance in a dialogue. Immutable once appended to a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    #[must_use]
    pub const fn new(role: Role, content: String) -> Self {
        Self { role, content }
    }
}

/// Assistant reply returned by a completion call.
#[derive(Debug, Clone)]
pub struct LlmReply {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Copy)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Sampling parameters forwarded to the completion endpoint.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 200,
        }
    }
}

/// Failure of an external provider call.
///
/// Authentication failures are fatal to the current interaction and are
/// never retried; everything else network- or response-shaped is a
/// `Service` error, also never retried.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication rejected by provider: {0}")]
    Authentication(String),

    #[error("service error: {0}")]
    Service(anyhow::Error),

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Produce one assistant reply for the full ordered message list.
    async fn complete(
        &self,
        messages: &[Turn],
        model: &str,
        params: GenerationParams,
    ) -> Result<LlmReply, ProviderError>;
}

#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Recognize speech in `audio` (a container of kind `format`) as text
    /// in the given spoken language.
    async fn transcribe(
        &self,
        audio: &[u8],
        format: AudioFormat,
        model: &str,
        language: &str,
    ) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize `text` with the given voice, returning playable audio bytes.
    async fn synthesize(
        &self,
        text: &str,
        model: &str,
        voice: &str,
    ) -> Result<Vec<u8>, ProviderError>;
}
