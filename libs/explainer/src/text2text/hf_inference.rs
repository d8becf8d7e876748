use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationParams, TextGenerator};

/// Hugging Face Inference API, `text2text-generation` and `summarization` tasks.
pub struct HfInferenceGenerator {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct InferenceOutput {
    generated_text: Option<String>,
    summary_text: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Outputs(Vec<InferenceOutput>),
    Error { error: String },
}

impl HfInferenceGenerator {
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

        let model = model.into();
        let endpoint = format!("{}/models/{}", base_url.into().trim_end_matches('/'), model);

        Ok(Self {
            client,
            endpoint,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for HfInferenceGenerator {
    fn name(&self) -> &str {
        "hugging-face"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: params,
            options: InferenceOptions { wait_for_model: true },
        };

        log::debug!("Sending {} prompt chars to {}", prompt.chars().count(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("Inference HTTP request failed")?;

        let status = response.status();
        let response_text = response.text().await.context("Failed to read inference response")?;
        if !status.is_success() {
            anyhow::bail!("Inference endpoint returned {}: {}", status, response_text);
        }

        let parsed: InferenceResponse = serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse inference response: {}", response_text))?;

        match parsed {
            InferenceResponse::Outputs(outputs) => outputs
                .into_iter()
                .next()
                .and_then(|output| output.generated_text.or(output.summary_text))
                .ok_or_else(|| anyhow::anyhow!("No generated text in inference response")),
            InferenceResponse::Error { error } => anyhow::bail!("Inference endpoint error: {}", error),
        }
    }
}
