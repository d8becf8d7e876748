use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationParams, TextGenerator};

/// OpenAI-compatible `/chat/completions` endpoint (OpenRouter, Ollama, vLLM, ...).
pub struct ChatCompletionsGenerator {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: String,
}

impl ChatCompletionsGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = api_key {
            headers.insert(
                "Authorization",
                HeaderValue::from_str(&format!("Bearer {}", api_key)).context("Invalid API key")?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.into().trim_end_matches('/')),
            model: model.into(),
        })
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsGenerator {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        // No sampling means greedy decoding.
        let temperature = if params.do_sample { 1.0 } else { 0.0 };
        let body = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens: params.max_length,
        };

        log::debug!("Sending chat completion request for model {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("Chat completion HTTP request failed")?;

        let status = response.status();
        let response_text = response.text().await.context("Failed to read chat completion response")?;
        if !status.is_success() {
            anyhow::bail!("Chat completion endpoint returned {}: {}", status, response_text);
        }

        let parsed: ChatResponse = serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse chat completion response: {}", response_text))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("No content in chat completion response"))
    }
}
