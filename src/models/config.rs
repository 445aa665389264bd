//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_request_delay_ms() -> u64 {
    250
}

#[derive(Clone, Debug, Deserialize)]
/// Toolkit configuration, deserialized from `config/*.yaml` plus
/// `ADRATA_`-prefixed environment variables. Vendor keys are optional; a
/// missing key disables that vendor with a warning instead of failing the
/// whole run.
pub struct OpsConfig {
    pub database_url: String,
    /// Base URL of the platform API, used for invitation delivery.
    pub api_base_url: Option<String>,
    /// Bearer token for the platform API.
    pub api_token: Option<String>,
    /// Pause between consecutive vendor API calls.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    pub coresignal_api_key: Option<String>,
    pub lusha_api_key: Option<String>,
    pub hunter_api_key: Option<String>,
    pub prospeo_api_key: Option<String>,
    pub zerobounce_api_key: Option<String>,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub perplexity_api_key: Option<String>,
}
