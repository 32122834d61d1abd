//! AWS Bedrock generation backend

use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata};
use serde_json::{json, Value};

use crate::domain::{DomainError, GenerationBackend, GenerationParams};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// AWS Bedrock client trait for dependency injection
#[async_trait]
pub trait BedrockClientTrait: Send + Sync + std::fmt::Debug {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError>;
}

/// Request/response dialect spoken by a Bedrock model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Anthropic messages API
    Anthropic,
    /// Meta Llama (`prompt` + `max_gen_len`)
    Meta,
    /// Amazon Titan text (`inputText` + `textGenerationConfig`)
    Titan,
    /// Plain text completion (`prompt` + `max_tokens`), e.g. DeepSeek
    TextCompletion,
}

impl ModelFamily {
    /// Detects the family from a model id or inference profile id
    pub fn from_model_id(model_id: &str) -> Self {
        let id = model_id.to_lowercase();

        if id.contains("anthropic.") || id.contains("claude") {
            Self::Anthropic
        } else if id.contains("meta.") || id.contains("llama") {
            Self::Meta
        } else if id.contains("amazon.titan") {
            Self::Titan
        } else {
            Self::TextCompletion
        }
    }

    fn build_body(&self, params: &GenerationParams, prompt: &str) -> Value {
        match self {
            Self::Anthropic => json!({
                "anthropic_version": ANTHROPIC_VERSION,
                "messages": [{ "role": "user", "content": prompt }],
                "max_tokens": params.max_tokens,
                "temperature": params.temperature,
                "top_p": params.top_p,
            }),
            Self::Meta => json!({
                "prompt": prompt,
                "max_gen_len": params.max_tokens,
                "temperature": params.temperature,
                "top_p": params.top_p,
            }),
            Self::Titan => json!({
                "inputText": prompt,
                "textGenerationConfig": {
                    "maxTokenCount": params.max_tokens,
                    "temperature": params.temperature,
                    "topP": params.top_p,
                }
            }),
            Self::TextCompletion => json!({
                "prompt": prompt,
                "max_tokens": params.max_tokens,
                "temperature": params.temperature,
                "top_p": params.top_p,
            }),
        }
    }
}

/// Generation backend invoking Bedrock models through `InvokeModel`
#[derive(Debug)]
pub struct BedrockGenerationBackend<C: BedrockClientTrait> {
    client: C,
}

impl<C: BedrockClientTrait> BedrockGenerationBackend<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: BedrockClientTrait> GenerationBackend for BedrockGenerationBackend<C> {
    async fn generate(
        &self,
        params: &GenerationParams,
        prompt: &str,
    ) -> Result<String, DomainError> {
        let family = ModelFamily::from_model_id(&params.model_id);
        let body = family.build_body(params, prompt);

        let body_bytes = serde_json::to_vec(&body).map_err(|e| {
            DomainError::internal(format!("Failed to serialize Bedrock request: {}", e))
        })?;

        let response_bytes = self.client.invoke_model(&params.model_id, body_bytes).await?;

        let response: Value = serde_json::from_slice(&response_bytes).map_err(|e| {
            DomainError::generation(
                "InvalidResponse",
                format!("Bedrock returned a non-JSON body: {}", e),
            )
        })?;

        extract_completion(&response).ok_or_else(|| {
            DomainError::generation(
                "EmptyCompletion",
                format!("No completion text in Bedrock response for {}", params.model_id),
            )
        })
    }

    fn backend_name(&self) -> &'static str {
        "bedrock"
    }
}

/// Pulls the generated text out of the envelopes used by Bedrock model families
fn extract_completion(response: &Value) -> Option<String> {
    // Anthropic: {"content": [{"type": "text", "text": "..."}]}
    if let Some(blocks) = response.get("content").and_then(Value::as_array) {
        let text: String = blocks
            .iter()
            .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|b| b.get("text").and_then(Value::as_str))
            .collect();

        return non_empty(text);
    }

    // Meta Llama
    if let Some(text) = response.get("generation").and_then(Value::as_str) {
        return non_empty(text.to_string());
    }

    // Amazon Titan
    if let Some(text) = response
        .pointer("/results/0/outputText")
        .and_then(Value::as_str)
    {
        return non_empty(text.to_string());
    }

    // OpenAI-style completion choices (DeepSeek)
    if let Some(choice) = response.pointer("/choices/0") {
        let text = choice
            .get("text")
            .or_else(|| choice.pointer("/message/content"))
            .and_then(Value::as_str);

        if let Some(text) = text {
            return non_empty(text.to_string());
        }
    }

    // Mistral
    if let Some(text) = response.pointer("/outputs/0/text").and_then(Value::as_str) {
        return non_empty(text.to_string());
    }

    response
        .get("completion")
        .and_then(Value::as_str)
        .and_then(|text| non_empty(text.to_string()))
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Real AWS Bedrock client implementation
#[derive(Debug, Clone)]
pub struct BedrockClient {
    client: aws_sdk_bedrockruntime::Client,
}

impl BedrockClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        let client = aws_sdk_bedrockruntime::Client::new(config);
        Self { client }
    }
}

#[async_trait]
impl BedrockClientTrait for BedrockClient {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        let blob = aws_sdk_bedrockruntime::primitives::Blob::new(body);

        let response = self
            .client
            .invoke_model()
            .model_id(model_id)
            .body(blob)
            .content_type("application/json")
            .accept("application/json")
            .send()
            .await
            .map_err(|e| {
                let code = e.code().unwrap_or("unknown").to_string();
                let message = e
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| DisplayErrorContext(&e).to_string());

                DomainError::generation(code, message)
            })?;

        Ok(response.body.into_inner())
    }
}
