use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatDefaults,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatDefaults {
    #[serde(default = "ChatDefaults::default_model")]
    pub model: String,
    #[serde(default = "ChatDefaults::default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "ChatDefaults::default_temperature")]
    pub temperature: f32,
    /// Label prefixed to user turns in the plain-text transcript.
    #[serde(default = "ChatDefaults::default_user_label")]
    pub user_label: String,
    /// Label prefixed to assistant turns in the plain-text transcript.
    #[serde(default = "ChatDefaults::default_assistant_label")]
    pub assistant_label: String,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            max_tokens: Self::default_max_tokens(),
            temperature: Self::default_temperature(),
            user_label: Self::default_user_label(),
            assistant_label: Self::default_assistant_label(),
        }
    }
}

impl ChatDefaults {
    fn default_model() -> String {
        "gpt-4o".to_string()
    }

    const fn default_max_tokens() -> usize {
        200
    }

    const fn default_temperature() -> f32 {
        0.7
    }

    fn default_user_label() -> String {
        "사용자".to_string()
    }

    fn default_assistant_label() -> String {
        "봇".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VoiceConfig {
    #[serde(default = "VoiceConfig::default_transcription_model")]
    pub transcription_model: String,
    /// Spoken language hint passed to the transcription endpoint.
    #[serde(default = "VoiceConfig::default_language")]
    pub language: String,
    #[serde(default = "VoiceConfig::default_speech_model")]
    pub speech_model: String,
    #[serde(default = "VoiceConfig::default_voice")]
    pub voice: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            transcription_model: Self::default_transcription_model(),
            language: Self::default_language(),
            speech_model: Self::default_speech_model(),
            voice: Self::default_voice(),
        }
    }
}

impl VoiceConfig {
    fn default_transcription_model() -> String {
        "whisper-1".to_string()
    }

    fn default_language() -> String {
        "ko".to_string()
    }

    fn default_speech_model() -> String {
        "tts-1".to_string()
    }

    fn default_voice() -> String {
        "alloy".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PersonaConfig {
    /// When disabled no system turn is installed at all.
    #[serde(default = "PersonaConfig::default_enabled")]
    pub enabled: bool,
    /// System-turn template; `{name}`, `{age}` and `{gender}` are
    /// substituted from the sampled persona.
    #[serde(default = "PersonaConfig::default_template")]
    pub template: String,
    /// Fixed sampling seed. Unset means a fresh persona per session.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<u64>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            template: Self::default_template(),
            seed: None,
        }
    }
}

impl PersonaConfig {
    const fn default_enabled() -> bool {
        true
    }

    fn default_template() -> String {
        "당신은 {age}세 {gender} '{name}'입니다. 사용자와 한국어로 자연스럽게 대화하고, \
         답변은 두세 문장으로 짧게 유지하세요."
            .to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
        }
    }
}

impl ProviderConfig {
    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }
}

impl Config {
    /// Load from `~/voxbot/config.json`, falling back to defaults when the
    /// file is absent but `OPENAI_API_KEY` is set. The environment variable
    /// always overrides the configured key.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::ensure_config_dir()?.join("config.json");

        let env_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<Self>(&content)?
        } else if env_key.is_some() {
            Self::default()
        } else {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'voxbot init' to create config.",
                config_path.display()
            );
        };

        if let Some(key) = env_key {
            config.providers.openai.api_key = key;
        }

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("voxbot");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "chat": {
    "model": "gpt-4o",
    "max_tokens": 200,
    "temperature": 0.7,
    "user_label": "사용자",
    "assistant_label": "봇"
  },
  "voice": {
    "transcription_model": "whisper-1",
    "language": "ko",
    "speech_model": "tts-1",
    "voice": "alloy"
  },
  "persona": {
    "enabled": true,
    "template": "당신은 {age}세 {gender} '{name}'입니다. 사용자와 한국어로 자연스럽게 대화하고, 답변은 두세 문장으로 짧게 유지하세요."
  },
  "providers": {
    "openai": {
      "api_key": "your-openai-api-key-here",
      "base_url": "https://api.openai.com/v1"
    }
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your OpenAI API key");
        println!("      (or export OPENAI_API_KEY instead)");
        println!("   2. Run 'voxbot chat' for a text conversation");
        println!("   3. Run 'voxbot voice -i question.wav' for a voice turn");
        println!();
        Ok(())
    }
}
