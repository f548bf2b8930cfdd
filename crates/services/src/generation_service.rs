use std::env;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::rng;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use quiz_core::model::{Question, QuestionKind};

use crate::error::{ImageError, ProviderError, SpeechError};
use crate::provider::{QuestionProvider, QuizRequest, SpeechClip, SpeechSynthesizer};

const QUIZ_SYSTEM_PROMPT: &str = "You are a quiz author for language learners. \
Respond with a single JSON object and nothing else, no prose and no markdown fences. \
The object has one key \"questions\" holding an array. Every element has: \
\"kind\" (one of \"multiple-choice\", \"short-answer\", \"ox\"), \"text\", \
\"answer\", \"explanation\", and for option-based kinds \"options\" (the answer \
must be one of them; ox questions use exactly [\"O\", \"X\"]). Elements may also \
carry \"passage\", \"passage_translation\", \"image_prompt\" and \"audio_script\" \
when the topic benefits from a reading passage, an illustration, or narration.";

#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub speech_model: String,
    pub speech_voice: String,
    pub image_model: String,
}

impl GenerationConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("QUIZ_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("QUIZ_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("QUIZ_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        let speech_model =
            env::var("QUIZ_AI_SPEECH_MODEL").unwrap_or_else(|_| "gpt-4o-mini-tts".into());
        let speech_voice = env::var("QUIZ_AI_SPEECH_VOICE").unwrap_or_else(|_| "alloy".into());
        let image_model = env::var("QUIZ_AI_IMAGE_MODEL").unwrap_or_else(|_| "gpt-image-1".into());
        Some(Self {
            base_url,
            api_key,
            model,
            speech_model,
            speech_voice,
            image_model,
        })
    }
}

/// AI collaborator speaking an OpenAI-compatible REST surface.
///
/// One service covers all three collaborations: quiz generation and answer
/// explanations over chat completions, narration over the speech endpoint,
/// and illustrations over the image endpoint. Without configuration every
/// call reports itself disabled, which keeps offline runs honest.
#[derive(Clone)]
pub struct GenerationService {
    client: Client,
    config: Option<GenerationConfig>,
}

impl GenerationService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GenerationConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GenerationConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Override the narration voice.
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        if let Some(config) = &mut self.config {
            config.speech_voice = voice.into();
        }
        self
    }

    /// Ask for a deeper explanation of a question's answer.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the service is disabled, the request
    /// fails, or the response is empty.
    pub async fn explain_answer(&self, question: &Question) -> Result<String, ProviderError> {
        let prompt = format!(
            "A learner answered this quiz question and wants to understand it better.\n\
             Question: {}\nCorrect answer: {}\nKnown explanation: {}\n\
             Explain the answer in a few plain sentences for a learner.",
            question.text, question.answer, question.explanation
        );
        self.chat(
            vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            0.2,
        )
        .await
    }

    /// Render a question's image prompt as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns `ImageError` when the service is disabled, the request fails,
    /// or the payload cannot be decoded.
    pub async fn illustrate(&self, prompt: &str) -> Result<Vec<u8>, ImageError> {
        let config = self.config.as_ref().ok_or(ImageError::Disabled)?;

        let url = format!(
            "{}/images/generations",
            config.base_url.trim_end_matches('/')
        );
        let payload = ImageGenerationRequest {
            model: config.image_model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: "1024x1024",
            response_format: "b64_json",
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImageError::HttpStatus(response.status()));
        }

        let body: ImageGenerationResponse = response.json().await?;
        let encoded = body
            .data
            .into_iter()
            .next()
            .and_then(|image| image.b64_json)
            .ok_or(ImageError::EmptyResponse)?;

        Ok(STANDARD.decode(encoded)?)
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let config = self.config.as_ref().ok_or(ProviderError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages,
            temperature,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl QuestionProvider for GenerationService {
    async fn generate_quiz(&self, request: &QuizRequest) -> Result<Vec<Question>, ProviderError> {
        let prompt = format!(
            "Write {count} {difficulty} quiz questions about: {topic}. \
             Mix the kinds where it suits the topic.",
            count = request.question_count(),
            difficulty = request.difficulty(),
            topic = request.topic()
        );
        let content = self
            .chat(
                vec![
                    ChatMessage {
                        role: "system",
                        content: QUIZ_SYSTEM_PROMPT.to_string(),
                    },
                    ChatMessage {
                        role: "user",
                        content: prompt,
                    },
                ],
                0.7,
            )
            .await?;

        let mut questions = parse_quiz(&content, request.question_count())?;
        let mut rng = rng();
        for question in &mut questions {
            if question.kind == QuestionKind::MultipleChoice {
                question.options.shuffle(&mut rng);
            }
        }
        Ok(questions)
    }
}

#[async_trait]
impl SpeechSynthesizer for GenerationService {
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, SpeechError> {
        let config = self.config.as_ref().ok_or(SpeechError::Disabled)?;

        let url = format!("{}/audio/speech", config.base_url.trim_end_matches('/'));
        let payload = SpeechRequest {
            model: config.speech_model.clone(),
            input: text.to_string(),
            voice: config.speech_voice.clone(),
            response_format: "mp3",
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpeechError::HttpStatus(response.status()));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        Ok(SpeechClip {
            bytes: bytes.to_vec(),
            mime_type: "audio/mpeg".into(),
        })
    }
}

/// Parses the model's quiz JSON, keeping shape-invalid questions so the
/// session can degrade them visibly. Only elements that fail to deserialize
/// at all are skipped.
fn parse_quiz(content: &str, limit: u8) -> Result<Vec<Question>, ProviderError> {
    let payload: QuizPayload = serde_json::from_str(strip_code_fences(content))
        .map_err(|err| ProviderError::InvalidPayload(err.to_string()))?;

    let mut questions = Vec::new();
    for value in payload.questions {
        match serde_json::from_value::<Question>(value) {
            Ok(question) => questions.push(question),
            Err(err) => log::warn!("skipping unreadable question: {err}"),
        }
    }
    if questions.is_empty() {
        return Err(ProviderError::InvalidPayload(
            "no usable questions in the response".into(),
        ));
    }
    questions.truncate(usize::from(limit));
    Ok(questions)
}

/// Models often wrap JSON in markdown fences despite instructions.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuizPayload {
    questions: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest {
    model: String,
    input: String,
    voice: String,
    response_format: &'static str,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    n: u8,
    size: &'static str,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    b64_json: Option<String>,
}
