//! Lusha person-enrichment client.

use serde::Deserialize;

use crate::vendors::{VendorError, parse_json};

const DEFAULT_BASE_URL: &str = "https://api.lusha.com";

pub struct LushaClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

/// Contact data Lusha holds for a person.
#[derive(Debug, Clone, PartialEq)]
pub struct LushaContact {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonResponse {
    #[serde(default)]
    email_addresses: Vec<EmailEntry>,
    #[serde(default)]
    phone_numbers: Vec<PhoneEntry>,
}

#[derive(Deserialize)]
struct EmailEntry {
    email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhoneEntry {
    international_number: String,
}

impl LushaClient {
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

    /// `GET /v2/person`: contact details by name and company domain.
    /// A 404 means Lusha does not know the person.
    pub fn find_person(
        &self,
        first_name: &str,
        last_name: &str,
        company_domain: &str,
    ) -> Result<Option<LushaContact>, VendorError> {
        let response = self
            .client
            .get(format!("{}/v2/person", self.base_url))
            .header("api_key", &self.api_key)
            .query(&[
                ("firstName", first_name),
                ("lastName", last_name),
                ("companyDomain", company_domain),
            ])
            .send()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: PersonResponse = parse_json("lusha", response)?;
        let contact = LushaContact {
            email: body.email_addresses.into_iter().next().map(|e| e.email),
            phone: body
                .phone_numbers
                .into_iter()
                .next()
                .map(|p| p.international_number),
        };

        if contact.email.is_none() && contact.phone.is_none() {
            Ok(None)
        } else {
            Ok(Some(contact))
        }
    }
}
