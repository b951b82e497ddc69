//! Turn pipeline for voice and text chat.
//!
//! One manager owns one session. A turn is a single uninterruptible
//! sequence: (transcribe) → append user turn → complete → append assistant
//! turn → (synthesize). Mutation goes through `&mut self`, so a session has
//! exactly one writer and concurrent turns cannot exist.

use std::io::Write;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::session::{ConversationSession, SessionError};
use voxbot_core::{
    AudioFormat, CompletionProvider, GenerationParams, PersonaProfile, ProviderError,
    SpeechProvider, TranscriptionProvider, Usage,
};

/// Configuration for one chat session.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Model for chat completion
    pub completion_model: String,
    /// Model for speech recognition
    pub transcription_model: String,
    /// Model for speech synthesis
    pub speech_model: String,
    /// Voice identifier for synthesis
    pub voice: String,
    /// Spoken language hint for recognition
    pub language: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Max tokens in a reply
    pub max_tokens: usize,
    /// System-turn template; persona fields are substituted in
    pub system_template: String,
    /// Label for user turns in the plain-text transcript
    pub user_label: String,
    /// Label for assistant turns in the plain-text transcript
    pub assistant_label: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            completion_model: "gpt-4o".to_string(),
            transcription_model: "whisper-1".to_string(),
            speech_model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            language: "ko".to_string(),
            temperature: 0.7,
            max_tokens: 200,
            system_template: "당신은 {age}세 {gender} '{name}'입니다. 사용자와 한국어로 \
                              자연스럽게 대화하세요."
                .to_string(),
            user_label: "사용자".to_string(),
            assistant_label: "봇".to_string(),
        }
    }
}

/// Errors that can abort a conversation turn.
///
/// Failure policy is abort-and-report: the failed turn is not appended and
/// the error is surfaced to the caller. Turns already appended stay in the
/// transcript.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("empty response from completion service")]
    EmptyResponse,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SessionError> for ConversationError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Validation(msg) => Self::Validation(msg),
        }
    }
}

/// Result of one completed text turn.
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// Assistant's reply
    pub reply: String,
    /// Token usage, when the provider reports it
    pub usage: Option<Usage>,
    /// 1-based user-turn number
    pub turn_number: usize,
}

/// Result of one completed voice turn.
#[derive(Debug, Clone)]
pub struct VoiceTurnResult {
    /// What the transcription service heard
    pub recognized: String,
    /// The text turn that followed
    pub turn: TurnResult,
    /// Synthesized reply audio, ready for playback
    pub reply_audio: Vec<u8>,
}

/// Drives a conversation against the external providers.
///
/// The persona is sampled once before construction and held for the
/// session's lifetime; the system turn is installed lazily before the first
/// completion call.
pub struct VoiceChatManager<
    C = Arc<dyn CompletionProvider>,
    T = Arc<dyn TranscriptionProvider>,
    S = Arc<dyn SpeechProvider>,
> where
    C: Send + Sync,
    T: Send + Sync,
    S: Send + Sync,
{
    completion: C,
    transcription: T,
    speech: S,
    config: ChatConfig,
    persona: Option<PersonaProfile>,
    session: ConversationSession,
}

impl<C, T, S> VoiceChatManager<C, T, S>
where
    C: CompletionProvider + Send + Sync,
    T: TranscriptionProvider + Send + Sync,
    S: SpeechProvider + Send + Sync,
{
    /// Create a manager with a fresh empty session.
    ///
    /// `persona: None` means no system turn is ever installed.
    pub fn new(
        completion: C,
        transcription: T,
        speech: S,
        config: ChatConfig,
        persona: Option<PersonaProfile>,
    ) -> Self {
        let session = ConversationSession::new();
        info!("Creating voice chat manager for session: {}", session.id);
        Self {
            completion,
            transcription,
            speech,
            config,
            persona,
            session,
        }
    }

    /// Process one text turn: append the user's message, get the reply,
    /// append it.
    pub async fn process_text_turn(&mut self, text: &str) -> Result<TurnResult, ConversationError> {
        if let Some(profile) = &self.persona {
            self.session
                .ensure_system_prompt(&self.config.system_template, profile);
        }

        self.session.append_user_turn(text)?;
        let turn_number = self.session.user_turn_count();
        info!("Processing turn {turn_number} for session: {}", self.session.id);

        let params = GenerationParams {
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let reply = self
            .completion
            .complete(
                self.session.to_api_messages(),
                &self.config.completion_model,
                params,
            )
            .await?;

        let content = reply.content.trim().to_string();
        if content.is_empty() {
            return Err(ConversationError::EmptyResponse);
        }

        self.session.append_assistant_turn(&content);
        debug!("Turn {turn_number} completed");

        Ok(TurnResult {
            reply: content,
            usage: reply.usage,
            turn_number,
        })
    }

    /// Process one voice turn: recognize the recording, run the text turn,
    /// synthesize the reply.
    pub async fn process_voice_turn(
        &mut self,
        audio: &[u8],
    ) -> Result<VoiceTurnResult, ConversationError> {
        let format = AudioFormat::sniff(audio).ok_or_else(|| {
            ConversationError::Validation("unrecognized audio container".to_string())
        })?;

        let recognized = self
            .transcription
            .transcribe(
                audio,
                format,
                &self.config.transcription_model,
                &self.config.language,
            )
            .await?;
        info!("Recognized {} characters of speech", recognized.chars().count());

        let turn = self.process_text_turn(&recognized).await?;

        let reply_audio = self
            .speech
            .synthesize(&turn.reply, &self.config.speech_model, &self.config.voice)
            .await?;

        Ok(VoiceTurnResult {
            recognized,
            turn,
            reply_audio,
        })
    }

    /// Run an interactive text conversation loop on stdin/stdout.
    ///
    /// Validation and service failures abort only the current turn; an
    /// authentication failure ends the session. The labeled transcript is
    /// printed when the session ends.
    pub async fn run_interactive(&mut self) -> Result<(), ConversationError> {
        println!("=== Conversation session: {} ===", self.session.id);
        println!("Type 'exit', 'quit', or Ctrl+C to end the session.\n");

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;
            let input = input.trim();

            if matches!(input, "exit" | "quit" | "q") {
                break;
            }

            if input.is_empty() {
                continue;
            }

            match self.process_text_turn(input).await {
                Ok(result) => {
                    println!("\n{}\n", result.reply);

                    if let Some(usage) = result.usage {
                        debug!(
                            "Tokens: {} prompt + {} completion = {} total",
                            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                        );
                    }
                }
                Err(e @ ConversationError::Provider(ProviderError::Authentication(_))) => {
                    eprintln!("Error: {e}");
                    return Err(e);
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                }
            }
        }

        println!(
            "\nSession ended. Total turns: {}",
            self.session.user_turn_count()
        );
        let transcript = self
            .session
            .to_transcript_text(&self.config.user_label, &self.config.assistant_label);
        if !transcript.is_empty() {
            println!("\n{transcript}");
        }

        Ok(())
    }

    /// The current session state.
    #[must_use]
    pub const fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// The persona held for this session, if any.
    #[must_use]
    pub const fn persona(&self) -> Option<&PersonaProfile> {
        self.persona.as_ref()
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &ChatConfig {
        &self.config
    }
}
