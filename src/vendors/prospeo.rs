//! Prospeo email-finder client.

use serde::Deserialize;
use serde_json::json;

use crate::vendors::{VendorError, parse_json};

const DEFAULT_BASE_URL: &str = "https://api.prospeo.io";

pub struct ProspeoClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct FinderResponse {
    #[serde(default)]
    error: bool,
    response: Option<FinderPayload>,
}

#[derive(Deserialize)]
struct FinderPayload {
    email: Option<String>,
}

impl ProspeoClient {
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

    /// `POST /email-finder`: address for a person at a company. Prospeo
    /// reports misses as a 404 or an `error: true` envelope.
    pub fn find_email(
        &self,
        first_name: &str,
        last_name: &str,
        company: &str,
    ) -> Result<Option<String>, VendorError> {
        let response = self
            .client
            .post(format!("{}/email-finder", self.base_url))
            .header("X-KEY", &self.api_key)
            .json(&json!({
                "first_name": first_name,
                "last_name": last_name,
                "company": company,
            }))
            .send()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: FinderResponse = parse_json("prospeo", response)?;
        if body.error {
            return Ok(None);
        }
        Ok(body.response.and_then(|payload| payload.email))
    }
}
