//! Twilio Lookup client for phone normalization and line-type detection.

use serde::Deserialize;

use crate::vendors::{VendorError, parse_json};

const DEFAULT_BASE_URL: &str = "https://lookups.twilio.com";

pub struct TwilioClient {
    client: reqwest::blocking::Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

/// Lookup result: the E.164 form Twilio resolved plus the carrier line type
/// (mobile, landline, voip, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneLookup {
    pub phone_number: String,
    pub valid: bool,
    pub line_type: Option<String>,
}

#[derive(Deserialize)]
struct LookupResponse {
    phone_number: Option<String>,
    valid: Option<bool>,
    line_type_intelligence: Option<LineTypeIntelligence>,
}

#[derive(Deserialize)]
struct LineTypeIntelligence {
    #[serde(rename = "type")]
    line_type: Option<String>,
}

impl TwilioClient {
    pub fn new(client: reqwest::blocking::Client, account_sid: String, auth_token: String) -> Self {
        Self::with_base_url(client, account_sid, auth_token, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(
        client: reqwest::blocking::Client,
        account_sid: String,
        auth_token: String,
        base_url: String,
    ) -> Self {
        Self {
            client,
            account_sid,
            auth_token,
            base_url,
        }
    }

    /// `GET /v2/PhoneNumbers/{number}`: validity and line type. A 404 means
    /// the number could not be parsed at all.
    pub fn lookup(&self, phone: &str) -> Result<Option<PhoneLookup>, VendorError> {
        let response = self
            .client
            .get(format!("{}/v2/PhoneNumbers/{phone}", self.base_url))
            .query(&[("Fields", "line_type_intelligence")])
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: LookupResponse = parse_json("twilio", response)?;
        let phone_number = match body.phone_number {
            Some(number) => number,
            None => return Ok(None),
        };

        Ok(Some(PhoneLookup {
            phone_number,
            valid: body.valid.unwrap_or(false),
            line_type: body
                .line_type_intelligence
                .and_then(|intel| intel.line_type),
        }))
    }
}
