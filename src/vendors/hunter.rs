//! Hunter.io email-finder client.

use serde::Deserialize;

use crate::vendors::{VendorError, parse_json};

const DEFAULT_BASE_URL: &str = "https://api.hunter.io";

pub struct HunterClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

/// Email located by the finder, with Hunter's 0-100 confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundEmail {
    pub email: String,
    pub confidence: Option<i64>,
}

#[derive(Deserialize)]
struct EmailFinderResponse {
    data: EmailFinderData,
}

#[derive(Deserialize)]
struct EmailFinderData {
    email: Option<String>,
    score: Option<i64>,
}

impl HunterClient {
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

    /// `GET /v2/email-finder`: most likely address for a person at a domain.
    /// Hunter answers 2xx with a null email when it has nothing.
    pub fn find_email(
        &self,
        domain: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<FoundEmail>, VendorError> {
        let response = self
            .client
            .get(format!("{}/v2/email-finder", self.base_url))
            .query(&[
                ("domain", domain),
                ("first_name", first_name),
                ("last_name", last_name),
                ("api_key", &self.api_key),
            ])
            .send()?;

        let body: EmailFinderResponse = parse_json("hunter", response)?;
        Ok(body.data.email.map(|email| FoundEmail {
            email,
            confidence: body.data.score,
        }))
    }
}
