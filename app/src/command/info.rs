use voxbot_config::Config;

/// Strategy for displaying configuration information.
///
/// Outputs the configured API key (masked), the chat defaults, the voice
/// models and the persona settings.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== voxbot Configuration ===\n");

        println!("Provider:");
        let api_key = &config.providers.openai.api_key;
        if api_key.len() > 8 {
            let masked = format!("{}...{}", &api_key[..4], &api_key[api_key.len() - 4..]);
            println!("  OpenAI: {masked}");
        } else {
            println!("  OpenAI: ***");
        }
        println!("  Base URL: {}", config.providers.openai.base_url);
        println!();

        println!("Chat Defaults:");
        println!("  Model: {}", config.chat.model);
        println!("  Max Tokens: {}", config.chat.max_tokens);
        println!("  Temperature: {}", config.chat.temperature);
        println!("  Labels: {} / {}", config.chat.user_label, config.chat.assistant_label);
        println!();

        println!("Voice:");
        println!("  Transcription Model: {}", config.voice.transcription_model);
        println!("  Language: {}", config.voice.language);
        println!("  Speech Model: {}", config.voice.speech_model);
        println!("  Voice: {}", config.voice.voice);
        println!();

        println!("Persona:");
        println!("  Enabled: {}", config.persona.enabled);
        println!("  Template: {}", truncate(&config.persona.template, 60));
        let seed_text = config.persona.seed.map_or_else(
            || "(fresh persona per session)".to_string(),
            |seed| seed.to_string(),
        );
        println!("  Seed: {seed_text}");

        Ok(())
    }
}

/// Character-based truncation; the template is usually Korean, so byte
/// slicing would split a code point.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
