//! Text conversation command.
//!
//! Runs either a single turn (`-m`) or the interactive loop. The session
//! lives exactly as long as the command; nothing is persisted.

use tracing::info;
use voxbot_config::Config;
use voxbot_conversation::VoiceChatManager;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Optional single message to send (non-interactive mode)
    pub message: Option<String>,
    /// Optional model override
    pub model: Option<String>,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let provider = super::build_provider(&config)?;
        let chat_config = super::build_chat_config(&config, input.model);
        let persona = super::session_persona(&config);

        if let Some(profile) = &persona {
            info!(
                "Session persona: {} ({}세, {})",
                profile.name, profile.age, profile.gender
            );
        }

        let mut manager = VoiceChatManager::new(
            provider.clone(),
            provider.clone(),
            provider,
            chat_config,
            persona,
        );

        if let Some(msg) = input.message {
            let result = manager.process_text_turn(&msg).await?;
            println!("{}", result.reply);
            info!("Turn {} completed.", result.turn_number);
        } else {
            manager.run_interactive().await?;
        }

        Ok(())
    }
}
