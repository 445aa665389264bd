//! CoreSignal firmographics client.

use serde::Deserialize;

use crate::vendors::{VendorError, parse_json};

const DEFAULT_BASE_URL: &str = "https://api.coresignal.com";

pub struct CoreSignalClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

/// Firmographic fields the enrichment maps onto company columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFirmographics {
    pub name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub employee_range: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct CompanyResponse {
    company_name: Option<String>,
    website: Option<String>,
    industry: Option<String>,
    size_range: Option<String>,
    employees_count: Option<i64>,
    description: Option<String>,
}

impl CoreSignalClient {
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

    /// `GET /cdapi/v2/company_multi_source/collect/{domain}`: firmographics
    /// for a company by its web domain. A 404 means no match.
    pub fn company_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<CompanyFirmographics>, VendorError> {
        let response = self
            .client
            .get(format!(
                "{}/cdapi/v2/company_multi_source/collect/{domain}",
                self.base_url
            ))
            .header("apikey", &self.api_key)
            .send()?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: CompanyResponse = parse_json("coresignal", response)?;
        let employee_range = body
            .size_range
            .or_else(|| body.employees_count.map(|count| count.to_string()));

        Ok(Some(CompanyFirmographics {
            name: body.company_name,
            website: body.website,
            industry: body.industry,
            employee_range,
            description: body.description,
        }))
    }
}
