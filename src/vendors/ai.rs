//! LLM completion client used by the classify `--ai` assist.
//!
//! One client covers the three configured providers; OpenAI and Perplexity
//! share the chat-completions wire shape, Anthropic has its own messages API.

use serde::Deserialize;
use serde_json::json;

use crate::domain::buyer_group::BuyerRole;
use crate::models::config::OpsConfig;
use crate::vendors::{VendorError, parse_json};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

const ROLE_PROMPT: &str = "You assign B2B buyer-group roles from job titles. \
Reply with exactly one of: decision_maker, champion, influencer, stakeholder. \
No other text.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Anthropic,
    Perplexity,
}

impl AiProvider {
    fn default_model(self) -> &'static str {
        match self {
            AiProvider::OpenAi => "gpt-4o-mini",
            AiProvider::Anthropic => "claude-3-5-haiku-latest",
            AiProvider::Perplexity => "sonar",
        }
    }
}

pub struct AiClient {
    client: reqwest::blocking::Client,
    provider: AiProvider,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    text: Option<String>,
}

impl AiClient {
    pub fn new(client: reqwest::blocking::Client, provider: AiProvider, api_key: String) -> Self {
        let base_url = match provider {
            AiProvider::OpenAi => OPENAI_BASE_URL,
            AiProvider::Anthropic => ANTHROPIC_BASE_URL,
            AiProvider::Perplexity => PERPLEXITY_BASE_URL,
        };
        Self::with_base_url(client, provider, api_key, base_url.to_string())
    }

    pub fn with_base_url(
        client: reqwest::blocking::Client,
        provider: AiProvider,
        api_key: String,
        base_url: String,
    ) -> Self {
        Self {
            client,
            provider,
            api_key,
            base_url,
            model: provider.default_model().to_string(),
        }
    }

    /// Picks the first provider with a configured key, in the order OpenAI,
    /// Anthropic, Perplexity.
    pub fn from_config(client: reqwest::blocking::Client, config: &OpsConfig) -> Option<Self> {
        if let Some(key) = &config.openai_api_key {
            Some(Self::new(client, AiProvider::OpenAi, key.clone()))
        } else if let Some(key) = &config.anthropic_api_key {
            Some(Self::new(client, AiProvider::Anthropic, key.clone()))
        } else {
            config
                .perplexity_api_key
                .as_ref()
                .map(|key| Self::new(client, AiProvider::Perplexity, key.clone()))
        }
    }

    /// One system+user completion, returning the raw assistant text.
    pub fn complete(&self, system: &str, user: &str) -> Result<String, VendorError> {
        match self.provider {
            AiProvider::OpenAi | AiProvider::Perplexity => {
                let path = match self.provider {
                    AiProvider::OpenAi => "/v1/chat/completions",
                    _ => "/chat/completions",
                };
                let response = self
                    .client
                    .post(format!("{}{path}", self.base_url))
                    .bearer_auth(&self.api_key)
                    .json(&json!({
                        "model": self.model,
                        "max_tokens": 16,
                        "messages": [
                            {"role": "system", "content": system},
                            {"role": "user", "content": user},
                        ],
                    }))
                    .send()?;

                let body: ChatCompletionResponse = parse_json("ai", response)?;
                body.choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or(VendorError::UnexpectedResponse {
                        vendor: "ai",
                        detail: "completion contained no choices".to_string(),
                    })
            }
            AiProvider::Anthropic => {
                let response = self
                    .client
                    .post(format!("{}/v1/messages", self.base_url))
                    .header("x-api-key", &self.api_key)
                    .header("anthropic-version", "2023-06-01")
                    .json(&json!({
                        "model": self.model,
                        "max_tokens": 16,
                        "system": system,
                        "messages": [{"role": "user", "content": user}],
                    }))
                    .send()?;

                let body: AnthropicResponse = parse_json("ai", response)?;
                body.content
                    .into_iter()
                    .find_map(|block| block.text)
                    .ok_or(VendorError::UnexpectedResponse {
                        vendor: "ai",
                        detail: "message contained no text block".to_string(),
                    })
            }
        }
    }

    /// Asks the model for a buyer-group role. An unparseable label comes
    /// back as `Ok(None)` so callers can fall back to the rule result.
    pub fn classify_buyer_role(&self, title: &str) -> Result<Option<BuyerRole>, VendorError> {
        let raw = self.complete(ROLE_PROMPT, &format!("Job title: {title}"))?;
        let label = raw.trim().lines().next().unwrap_or_default();
        Ok(BuyerRole::try_from(label).ok())
    }
}
