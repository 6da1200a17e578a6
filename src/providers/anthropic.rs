use crate::config::ProviderConfig;
use crate::error::NutritionError;
use crate::providers::{ensure_success, resolve_api_key, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
// The messages API requires an explicit output limit
const DEFAULT_MAX_TOKENS: u32 = 4096;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, NutritionError> {
        // Try config first, then fall back to environment variable
        let api_key = resolve_api_key(config, &["ANTHROPIC_API_KEY"])?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str) -> Result<String, NutritionError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
                "temperature": self.temperature,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            }))
            .send()
            .await?;

        let response = ensure_success(self.provider_name(), response).await?;
        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let text = response_body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                NutritionError::Upstream(
                    "Failed to extract content from Anthropic response".to_string(),
                )
            })?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_config(base_url: Option<String>) -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            model: "claude-3-5-haiku-latest".to_string(),
            temperature: 0.7,
            max_tokens: Some(4000),
            api_key: Some("test-key".to_string()),
            base_url,
        }
    }

    #[tokio::test]
    async fn test_complete() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .match_body(Matcher::PartialJson(json!({ "max_tokens": 4000 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": [{"type": "text", "text": "{\"recipe\": {}}"}]}"#)
            .create_async()
            .await;

        let provider = AnthropicProvider::new(&test_config(Some(server.url()))).unwrap();
        let text = provider.complete("analyze soup").await.unwrap();
        assert_eq!(text, "{\"recipe\": {}}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provider_name() {
        let provider = AnthropicProvider::new(&test_config(None)).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }
}
