//! ZeroBounce email-verification client.

use serde::Deserialize;

use crate::domain::person::EmailStatus;
use crate::vendors::{VendorError, parse_json};

const DEFAULT_BASE_URL: &str = "https://api.zerobounce.net";

pub struct ZeroBounceClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

/// Verification verdict for one address.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub status: EmailStatus,
    pub sub_status: Option<String>,
}

#[derive(Deserialize)]
struct ValidateResponse {
    status: String,
    sub_status: Option<String>,
}

impl ZeroBounceClient {
    pub fn new(client: reqwest::blocking::Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(
        client: reqwest::blocking::Client,
        api_key: String,
        base_url: String,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// `GET /v2/validate`: deliverability verdict for one address.
    pub fn validate(&self, email: &str) -> Result<Verification, VendorError> {
        let response = self
            .client
            .get(format!("{}/v2/validate", self.base_url))
            .query(&[("api_key", self.api_key.as_str()), ("email", email)])
            .send()?;

        let body: ValidateResponse = parse_json("zerobounce", response)?;
        Ok(Verification {
            status: EmailStatus::from(body.status.as_str()),
            sub_status: body.sub_status.filter(|s| !s.is_empty()),
        })
    }
}
