//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`. Shared session wiring (provider construction,
//! config mapping, persona sampling) lives here so every command builds the
//! same stack the same way.

use uuid::Uuid;
use voxbot_config::Config;
use voxbot_conversation::ChatConfig;
use voxbot_core::{PersonaProfile, sample_profile};
use voxbot_providers::OpenAiProvider;

mod chat;
mod info;
mod init;
mod version;
mod voice;

pub use chat::{ChatInput, ChatStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;
pub use voice::{VoiceInput, VoiceStrategy};

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// parameters pass type-safely with no runtime casting or boxing, and every
/// call is monomorphized at compile time.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Build the session `ChatConfig` from the file config plus CLI overrides.
fn build_chat_config(config: &Config, model_override: Option<String>) -> ChatConfig {
    ChatConfig {
        completion_model: model_override.unwrap_or_else(|| config.chat.model.clone()),
        transcription_model: config.voice.transcription_model.clone(),
        speech_model: config.voice.speech_model.clone(),
        voice: config.voice.voice.clone(),
        language: config.voice.language.clone(),
        temperature: config.chat.temperature,
        max_tokens: config.chat.max_tokens,
        system_template: config.persona.template.clone(),
        user_label: config.chat.user_label.clone(),
        assistant_label: config.chat.assistant_label.clone(),
    }
}

/// Sample the session persona, honoring a pinned seed from config.
fn session_persona(config: &Config) -> Option<PersonaProfile> {
    if !config.persona.enabled {
        return None;
    }
    let seed = config.persona.seed.unwrap_or_else(session_seed);
    Some(sample_profile(seed))
}

/// Derive a per-session seed from a fresh time-ordered UUID.
fn session_seed() -> u64 {
    let bytes = *Uuid::now_v7().as_bytes();
    u64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Construct the provider, refusing to run without a usable API key.
fn build_provider(config: &Config) -> anyhow::Result<OpenAiProvider> {
    let key = config.providers.openai.api_key.clone();
    if key.is_empty() || key.starts_with("your-") {
        anyhow::bail!(
            "No OpenAI API key configured. Set OPENAI_API_KEY or edit the config file \
             created by 'voxbot init'."
        );
    }
    Ok(OpenAiProvider::new(key).with_base_url(config.providers.openai.base_url.clone()))
}
