//! Integration tests driving the full turn pipeline with mock providers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use voxbot_conversation::{ChatConfig, ConversationError, VoiceChatManager};
use voxbot_core::{
    AudioFormat, CompletionProvider, GenerationParams, LlmReply, PersonaProfile, ProviderError,
    Role, SpeechProvider, TranscriptionProvider, Turn, Usage,
};

#[derive(Clone, Copy)]
enum CompletionMode {
    Reply(&'static str),
    AuthFail,
    ServiceFail,
    EmptyReply,
}

#[derive(Clone)]
struct MockCompletion {
    mode: CompletionMode,
    /// Every message list sent to the endpoint, in call order.
    payloads: Arc<Mutex<Vec<Vec<Turn>>>>,
}

impl MockCompletion {
    fn new(mode: CompletionMode) -> Self {
        Self {
            mode,
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(
        &self,
        messages: &[Turn],
        _model: &str,
        _params: GenerationParams,
    ) -> Result<LlmReply, ProviderError> {
        self.payloads.lock().unwrap().push(messages.to_vec());
        match self.mode {
            CompletionMode::Reply(text) => Ok(LlmReply {
                content: text.to_string(),
                usage: Some(Usage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                }),
            }),
            CompletionMode::AuthFail => {
                Err(ProviderError::Authentication("incorrect API key".to_string()))
            }
            CompletionMode::ServiceFail => {
                Err(ProviderError::Service(anyhow::anyhow!("connection reset")))
            }
            CompletionMode::EmptyReply => Ok(LlmReply {
                content: "   ".to_string(),
                usage: None,
            }),
        }
    }
}

#[derive(Clone)]
struct MockTranscription {
    text: &'static str,
    calls: Arc<Mutex<usize>>,
}

impl MockTranscription {
    fn new(text: &'static str) -> Self {
        Self {
            text,
            calls: Arc::new(Mutex::new(0)),
        }
    }
}

#[async_trait]
impl TranscriptionProvider for MockTranscription {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _format: AudioFormat,
        _model: &str,
        _language: &str,
    ) -> Result<String, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.text.to_string())
    }
}

#[derive(Clone)]
struct MockSpeech {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl MockSpeech {
    fn new() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl SpeechProvider for MockSpeech {
    async fn synthesize(
        &self,
        text: &str,
        _model: &str,
        _voice: &str,
    ) -> Result<Vec<u8>, ProviderError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(b"mp3-bytes".to_vec())
    }
}

fn test_persona() -> PersonaProfile {
    PersonaProfile {
        age: 20,
        gender: "남성".to_string(),
        name: "민수".to_string(),
    }
}

fn wav_bytes() -> Vec<u8> {
    let mut bytes = b"RIFF".to_vec();
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes
}

fn make_manager(
    completion: MockCompletion,
    transcription: MockTranscription,
    speech: MockSpeech,
    persona: Option<PersonaProfile>,
) -> VoiceChatManager<MockCompletion, MockTranscription, MockSpeech> {
    VoiceChatManager::new(completion, transcription, speech, ChatConfig::default(), persona)
}

#[tokio::test]
async fn voice_turn_runs_the_full_sequence() {
    let completion = MockCompletion::new(CompletionMode::Reply("반갑습니다"));
    let transcription = MockTranscription::new("안녕하세요");
    let speech = MockSpeech::new();

    let mut manager = make_manager(
        completion.clone(),
        transcription.clone(),
        speech.clone(),
        Some(test_persona()),
    );

    let result = manager.process_voice_turn(&wav_bytes()).await.unwrap();

    assert_eq!(result.recognized, "안녕하세요");
    assert_eq!(result.turn.reply, "반갑습니다");
    assert_eq!(result.turn.turn_number, 1);
    assert_eq!(result.reply_audio, b"mp3-bytes");

    // transcribed once, spoke the reply once
    assert_eq!(*transcription.calls.lock().unwrap(), 1);
    assert_eq!(speech.spoken.lock().unwrap().as_slice(), ["반갑습니다"]);

    // transcript: system + user + assistant, system hidden from display
    let roles: Vec<Role> = manager
        .session()
        .to_api_messages()
        .iter()
        .map(|t| t.role.clone())
        .collect();
    assert_eq!(roles, [Role::System, Role::User, Role::Assistant]);
    assert_eq!(manager.session().to_display_view().len(), 2);

    // the completion endpoint saw the full payload, system turn first
    let payloads = completion.payloads.lock().unwrap();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].len(), 2); // system + user; assistant not yet appended
    assert_eq!(payloads[0][0].role, Role::System);
    assert_eq!(payloads[0][1].content, "안녕하세요");
}

#[tokio::test]
async fn failed_completion_leaves_only_the_user_turn() {
    let completion = MockCompletion::new(CompletionMode::ServiceFail);
    let mut manager = make_manager(
        completion,
        MockTranscription::new(""),
        MockSpeech::new(),
        Some(test_persona()),
    );

    let err = manager.process_text_turn("안녕").await.unwrap_err();
    assert!(matches!(
        err,
        ConversationError::Provider(ProviderError::Service(_))
    ));

    // abort-and-report: the user turn stays, no assistant turn follows
    let view = manager.session().to_display_view();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].role, Role::User);
    assert_eq!(view[0].content, "안녕");
}

#[tokio::test]
async fn authentication_failure_propagates_typed() {
    let completion = MockCompletion::new(CompletionMode::AuthFail);
    let mut manager = make_manager(
        completion,
        MockTranscription::new(""),
        MockSpeech::new(),
        None,
    );

    let err = manager.process_text_turn("안녕").await.unwrap_err();
    assert!(matches!(
        err,
        ConversationError::Provider(ProviderError::Authentication(_))
    ));
}

#[tokio::test]
async fn empty_completion_reply_is_an_error() {
    let completion = MockCompletion::new(CompletionMode::EmptyReply);
    let mut manager = make_manager(
        completion,
        MockTranscription::new(""),
        MockSpeech::new(),
        Some(test_persona()),
    );

    let err = manager.process_text_turn("안녕").await.unwrap_err();
    assert!(matches!(err, ConversationError::EmptyResponse));

    // the user turn was appended before the reply failed
    assert_eq!(manager.session().to_display_view().len(), 1);
}

#[tokio::test]
async fn unrecognized_audio_never_reaches_the_provider() {
    let transcription = MockTranscription::new("무시됨");
    let mut manager = make_manager(
        MockCompletion::new(CompletionMode::Reply("안 옴")),
        transcription.clone(),
        MockSpeech::new(),
        Some(test_persona()),
    );

    let err = manager
        .process_voice_turn(b"definitely not audio")
        .await
        .unwrap_err();
    assert!(matches!(err, ConversationError::Validation(_)));

    assert_eq!(*transcription.calls.lock().unwrap(), 0);
    assert!(manager.session().is_empty());
}

#[tokio::test]
async fn empty_user_text_is_rejected_without_appending() {
    let mut manager = make_manager(
        MockCompletion::new(CompletionMode::Reply("안 옴")),
        MockTranscription::new(""),
        MockSpeech::new(),
        Some(test_persona()),
    );

    let err = manager.process_text_turn("   ").await.unwrap_err();
    assert!(matches!(err, ConversationError::Validation(_)));
    assert_eq!(manager.session().to_display_view().len(), 0);
}

#[tokio::test]
async fn disabled_persona_installs_no_system_turn() {
    let mut manager = make_manager(
        MockCompletion::new(CompletionMode::Reply("답")),
        MockTranscription::new(""),
        MockSpeech::new(),
        None,
    );

    manager.process_text_turn("안녕").await.unwrap();

    assert!(!manager.session().has_system_prompt());
    assert_eq!(manager.session().turn_count(), 2);
}

#[tokio::test]
async fn second_turn_sends_the_full_history() {
    let completion = MockCompletion::new(CompletionMode::Reply("답"));
    let mut manager = make_manager(
        completion.clone(),
        MockTranscription::new(""),
        MockSpeech::new(),
        Some(test_persona()),
    );

    manager.process_text_turn("첫 번째").await.unwrap();
    let second = manager.process_text_turn("두 번째").await.unwrap();
    assert_eq!(second.turn_number, 2);

    let payloads = completion.payloads.lock().unwrap();
    assert_eq!(payloads.len(), 2);
    // system, U1, A1, U2
    assert_eq!(payloads[1].len(), 4);
    let contents: Vec<&str> = payloads[1].iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents[1..], ["첫 번째", "답", "두 번째"]);
}
