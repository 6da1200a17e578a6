use crate::config::ProviderConfig;
use crate::error::NutritionError;
use crate::providers::{ensure_success, resolve_api_key, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, NutritionError> {
        // Try config first, then fall back to environment variables
        let api_key = resolve_api_key(config, &["GEMINI_API_KEY", "GOOGLE_API_KEY"])?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(GoogleProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.temperature
            }
        });
        // Without a limit Gemini applies the model's own output ceiling
        if let Some(max_tokens) = self.max_tokens {
            body["generationConfig"]["maxOutputTokens"] = json!(max_tokens);
        }
        body
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn complete(&self, prompt: &str) -> Result<String, NutritionError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let response = ensure_success(self.provider_name(), response).await?;
        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        // A candidate may split its answer across several text parts
        let text = response_body["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                NutritionError::Upstream(
                    "Failed to extract content from Google Gemini response".to_string(),
                )
            })?;

        Ok(text)
    }
}
