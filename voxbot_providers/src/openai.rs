use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::info;

use voxbot_core::{
    AudioFormat, CompletionProvider, GenerationParams, LlmReply, ProviderError, SpeechProvider,
    TranscriptionProvider, Turn, Usage,
};

/// Client for an OpenAI-compatible API, covering the three endpoints the
/// chatbot needs: chat completion, audio transcription and speech synthesis.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating OpenAiProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Check the response status and hand back the typed error for
    /// non-success codes, consuming the response body for its message.
    async fn fail_on_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }
}

/// Map a non-success HTTP response onto the error taxonomy. The OpenAI error
/// body is `{"error": {"message": ...}}`; anything else is reported verbatim.
fn error_from_response(status: StatusCode, body: &str) -> ProviderError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(ToString::to_string))
        .unwrap_or_else(|| body.to_string());

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ProviderError::Authentication(message)
    } else {
        ProviderError::Service(anyhow::anyhow!("OpenAI API error ({status}): {message}"))
    }
}

fn parse_completion(response: &serde_json::Value) -> Result<LlmReply, ProviderError> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| {
            ProviderError::MalformedResponse("missing choices[0].message.content".to_string())
        })?
        .to_string();

    let usage = response["usage"].as_object().map(|u| Usage {
        prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
    });

    Ok(LlmReply { content, usage })
}

fn parse_transcription(response: &serde_json::Value) -> Result<String, ProviderError> {
    response["text"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| ProviderError::MalformedResponse("missing text".to_string()))
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[Turn],
        model: &str,
        params: GenerationParams,
    ) -> Result<LlmReply, ProviderError> {
        let request = json!({
            "model": model,
            "messages": messages,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        });

        info!("Sending completion request: model={model}");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.into()))?;

        let value = Self::fail_on_status(response)
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Service(e.into()))?;

        info!("Received completion response");
        parse_completion(&value)
    }
}

#[async_trait]
impl TranscriptionProvider for OpenAiProvider {
    async fn transcribe(
        &self,
        audio: &[u8],
        format: AudioFormat,
        model: &str,
        language: &str,
    ) -> Result<String, ProviderError> {
        let part = Part::bytes(audio.to_vec())
            .file_name(format.file_name())
            .mime_str(format.mime())
            .map_err(|e| ProviderError::Service(e.into()))?;

        let form = Form::new()
            .part("file", part)
            .text("model", model.to_string())
            .text("language", language.to_string())
            .text("response_format", "json");

        info!(
            "Sending transcription request: model={model}, {:.1}KB {}",
            audio.len() as f64 / 1024.0,
            format.mime()
        );

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.into()))?;

        let value = Self::fail_on_status(response)
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Service(e.into()))?;

        parse_transcription(&value)
    }
}

#[async_trait]
impl SpeechProvider for OpenAiProvider {
    async fn synthesize(
        &self,
        text: &str,
        model: &str,
        voice: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        let request = json!({
            "model": model,
            "voice": voice,
            "input": text,
            "response_format": "mp3",
        });

        info!("Sending speech request: model={model}, voice={voice}");

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Service(e.into()))?;

        let bytes = Self::fail_on_status(response)
            .await?
            .bytes()
            .await
            .map_err(|e| ProviderError::Service(e.into()))?;

        Ok(bytes.to_vec())
    }
}
