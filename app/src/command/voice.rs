//! One-shot voice turn command.
//!
//! Reads a recorded question from disk, runs the full round trip
//! (transcribe → complete → synthesize) and writes the reply audio next to
//! the printed text exchange.

use std::path::PathBuf;
use tracing::info;
use voxbot_config::Config;
use voxbot_conversation::VoiceChatManager;

/// Input parameters for the Voice command strategy.
#[derive(Debug, Clone)]
pub struct VoiceInput {
    /// Audio file with the user's recorded question
    pub input: PathBuf,
    /// Where to write the synthesized reply
    pub output: Option<PathBuf>,
    /// Optional model override
    pub model: Option<String>,
}

/// Strategy for executing the Voice command.
#[derive(Debug, Clone, Copy)]
pub struct VoiceStrategy;

impl super::CommandStrategy for VoiceStrategy {
    type Input = VoiceInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let provider = super::build_provider(&config)?;
        let chat_config = super::build_chat_config(&config, input.model);
        let persona = super::session_persona(&config);

        let user_label = chat_config.user_label.clone();
        let assistant_label = chat_config.assistant_label.clone();

        let mut manager = VoiceChatManager::new(
            provider.clone(),
            provider.clone(),
            provider,
            chat_config,
            persona,
        );

        let audio = std::fs::read(&input.input)?;
        info!("Read {} bytes from {}", audio.len(), input.input.display());

        let result = manager.process_voice_turn(&audio).await?;

        println!("{user_label}: {}", result.recognized);
        println!("{assistant_label}: {}", result.turn.reply);

        let output = input.output.unwrap_or_else(|| PathBuf::from("reply.mp3"));
        std::fs::write(&output, &result.reply_audio)?;
        println!("\nReply audio written to {}", output.display());

        Ok(())
    }
}
