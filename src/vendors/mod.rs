//! Thin HTTP clients for the enrichment vendors.
//!
//! Every client follows the same shape: a [`reqwest::blocking::Client`], an
//! API key and an overridable base URL (tests point it at a mock server).
//! Responses are mapped onto small typed structs; a vendor finding nothing is
//! `Ok(None)`, only transport failures and non-2xx replies are errors.

use std::{thread, time::Duration};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::config::OpsConfig;

pub mod ai;
pub mod coresignal;
pub mod hunter;
pub mod lusha;
pub mod prospeo;
pub mod twilio;
pub mod zerobounce;

pub use ai::AiClient;
pub use coresignal::CoreSignalClient;
pub use hunter::HunterClient;
pub use lusha::LushaClient;
pub use prospeo::ProspeoClient;
pub use twilio::TwilioClient;
pub use zerobounce::ZeroBounceClient;

/// Errors from the vendor HTTP layer.
#[derive(Debug, Error)]
pub enum VendorError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The vendor returned a non-2xx status code.
    #[error("{vendor} API error ({status}): {body}")]
    Api {
        vendor: &'static str,
        status: u16,
        body: String,
    },

    /// The vendor replied 2xx but the payload did not match expectations.
    #[error("unexpected {vendor} response: {detail}")]
    UnexpectedResponse {
        vendor: &'static str,
        detail: String,
    },
}

/// Deserialize a 2xx response, mapping anything else to [`VendorError::Api`].
pub(crate) fn parse_json<T: DeserializeOwned>(
    vendor: &'static str,
    response: reqwest::blocking::Response,
) -> Result<T, VendorError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json()?)
    } else {
        Err(VendorError::Api {
            vendor,
            status: status.as_u16(),
            body: response.text().unwrap_or_default(),
        })
    }
}

/// Fixed-delay pacing between sequential vendor calls. Crude but matches how
/// the vendors meter these endpoints for batch use.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Every vendor client the toolkit can reach, built from configuration.
/// A client is `None` when its API key is not configured; callers skip the
/// vendor (with one warning) rather than failing the run.
pub struct VendorClients {
    pub coresignal: Option<CoreSignalClient>,
    pub lusha: Option<LushaClient>,
    pub hunter: Option<HunterClient>,
    pub prospeo: Option<ProspeoClient>,
    pub zerobounce: Option<ZeroBounceClient>,
    pub twilio: Option<TwilioClient>,
    pub ai: Option<AiClient>,
}

impl VendorClients {
    pub fn from_config(config: &OpsConfig) -> Self {
        let http = reqwest::blocking::Client::new();

        Self {
            coresignal: config
                .coresignal_api_key
                .clone()
                .map(|key| CoreSignalClient::new(http.clone(), key)),
            lusha: config
                .lusha_api_key
                .clone()
                .map(|key| LushaClient::new(http.clone(), key)),
            hunter: config
                .hunter_api_key
                .clone()
                .map(|key| HunterClient::new(http.clone(), key)),
            prospeo: config
                .prospeo_api_key
                .clone()
                .map(|key| ProspeoClient::new(http.clone(), key)),
            zerobounce: config
                .zerobounce_api_key
                .clone()
                .map(|key| ZeroBounceClient::new(http.clone(), key)),
            twilio: config
                .twilio_account_sid
                .clone()
                .zip(config.twilio_auth_token.clone())
                .map(|(sid, token)| TwilioClient::new(http.clone(), sid, token)),
            ai: AiClient::from_config(http, config),
        }
    }
}
