use httpmock::prelude::*;
use serde_json::json;

use adrata_ops::domain::buyer_group::BuyerRole;
use adrata_ops::domain::person::EmailStatus;
use adrata_ops::vendors::ai::{AiClient, AiProvider};
use adrata_ops::vendors::{
    CoreSignalClient, HunterClient, LushaClient, ProspeoClient, TwilioClient, VendorError,
    ZeroBounceClient,
};

fn http() -> reqwest::blocking::Client {
    reqwest::blocking::Client::new()
}

#[test]
fn hunter_finds_and_misses() {
    let server = MockServer::start();
    let hit = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/email-finder")
            .query_param("domain", "acme.com")
            .query_param("api_key", "key");
        then.status(200)
            .json_body(json!({"data": {"email": "jane@acme.com", "score": 91}}));
    });

    let client = HunterClient::with_base_url(http(), "key".into(), server.base_url());
    let found = client.find_email("acme.com", "Jane", "Doe").unwrap().unwrap();
    assert_eq!(found.email, "jane@acme.com");
    assert_eq!(found.confidence, Some(91));
    hit.assert();

    // Hunter reports a miss as a 2xx with a null email.
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/email-finder");
        then.status(200)
            .json_body(json!({"data": {"email": null, "score": null}}));
    });
    let client = HunterClient::with_base_url(http(), "key".into(), server.base_url());
    assert!(client.find_email("acme.com", "Jane", "Doe").unwrap().is_none());
}

#[test]
fn hunter_maps_non_2xx_to_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/email-finder");
        then.status(429).body("rate limited");
    });

    let client = HunterClient::with_base_url(http(), "key".into(), server.base_url());
    let err = client.find_email("acme.com", "Jane", "Doe").unwrap_err();
    match err {
        VendorError::Api { vendor, status, body } => {
            assert_eq!(vendor, "hunter");
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn lusha_treats_404_as_no_match() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/person");
        then.status(404).json_body(json!({"message": "not found"}));
    });

    let client = LushaClient::with_base_url(http(), "key".into(), server.base_url());
    assert!(client.find_person("Jane", "Doe", "acme.com").unwrap().is_none());
}

#[test]
fn lusha_extracts_first_email_and_phone() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/person")
            .header("api_key", "key")
            .query_param("firstName", "Jane");
        then.status(200).json_body(json!({
            "emailAddresses": [{"email": "jane@acme.com"}],
            "phoneNumbers": [{"internationalNumber": "+15125550100"}]
        }));
    });

    let client = LushaClient::with_base_url(http(), "key".into(), server.base_url());
    let contact = client.find_person("Jane", "Doe", "acme.com").unwrap().unwrap();
    assert_eq!(contact.email.as_deref(), Some("jane@acme.com"));
    assert_eq!(contact.phone.as_deref(), Some("+15125550100"));
    mock.assert();
}

#[test]
fn prospeo_error_envelope_is_a_miss() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/email-finder").header("X-KEY", "key");
        then.status(200)
            .json_body(json!({"error": true, "response": null}));
    });

    let client = ProspeoClient::with_base_url(http(), "key".into(), server.base_url());
    assert!(client.find_email("Jane", "Doe", "Acme").unwrap().is_none());

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/email-finder");
        then.status(200)
            .json_body(json!({"error": false, "response": {"email": "jane@acme.com"}}));
    });
    let client = ProspeoClient::with_base_url(http(), "key".into(), server.base_url());
    assert_eq!(
        client.find_email("Jane", "Doe", "Acme").unwrap().as_deref(),
        Some("jane@acme.com")
    );
}

#[test]
fn zerobounce_statuses_map_onto_email_status() {
    for (wire, expected) in [
        ("valid", EmailStatus::Valid),
        ("invalid", EmailStatus::Invalid),
        ("catch-all", EmailStatus::CatchAll),
        ("spamtrap", EmailStatus::DoNotMail),
        ("mystery", EmailStatus::Unknown),
    ] {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v2/validate");
            then.status(200)
                .json_body(json!({"status": wire, "sub_status": "detail"}));
        });
        let client = ZeroBounceClient::with_base_url(http(), "key".into(), server.base_url());
        let verification = client.validate("jane@acme.com").unwrap();
        assert_eq!(verification.status, expected);
        assert_eq!(verification.sub_status.as_deref(), Some("detail"));
    }
}

#[test]
fn twilio_lookup_returns_line_type() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/PhoneNumbers/+15125550100")
            .query_param("Fields", "line_type_intelligence");
        then.status(200).json_body(json!({
            "phone_number": "+15125550100",
            "valid": true,
            "line_type_intelligence": {"type": "mobile"}
        }));
    });

    let client =
        TwilioClient::with_base_url(http(), "sid".into(), "token".into(), server.base_url());
    let lookup = client.lookup("+15125550100").unwrap().unwrap();
    assert!(lookup.valid);
    assert_eq!(lookup.line_type.as_deref(), Some("mobile"));
    mock.assert();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/PhoneNumbers/garbage");
        then.status(404).body("not found");
    });
    let client =
        TwilioClient::with_base_url(http(), "sid".into(), "token".into(), server.base_url());
    assert!(client.lookup("garbage").unwrap().is_none());
}

#[test]
fn coresignal_maps_firmographics() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/cdapi/v2/company_multi_source/collect/acme.com")
            .header("apikey", "key");
        then.status(200).json_body(json!({
            "company_name": "Acme Corp",
            "website": "https://acme.com",
            "industry": "Software",
            "size_range": "51-200",
            "employees_count": 120,
            "description": "Makers of everything"
        }));
    });

    let client = CoreSignalClient::with_base_url(http(), "key".into(), server.base_url());
    let company = client.company_by_domain("acme.com").unwrap().unwrap();
    assert_eq!(company.industry.as_deref(), Some("Software"));
    assert_eq!(company.employee_range.as_deref(), Some("51-200"));
    mock.assert();
}

#[test]
fn openai_completion_parses_buyer_role() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{"message": {"role": "assistant", "content": "champion\n"}}]
        }));
    });

    let client =
        AiClient::with_base_url(http(), AiProvider::OpenAi, "key".into(), server.base_url());
    let role = client.classify_buyer_role("Senior Platform Advocate").unwrap();
    assert_eq!(role, Some(BuyerRole::Champion));
    mock.assert();
}

#[test]
fn anthropic_completion_parses_buyer_role() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .header("x-api-key", "key")
            .header("anthropic-version", "2023-06-01");
        then.status(200).json_body(json!({
            "content": [{"type": "text", "text": "stakeholder"}]
        }));
    });

    let client =
        AiClient::with_base_url(http(), AiProvider::Anthropic, "key".into(), server.base_url());
    let role = client.classify_buyer_role("Office Coordinator").unwrap();
    assert_eq!(role, Some(BuyerRole::Stakeholder));
    mock.assert();
}

#[test]
fn unparseable_llm_label_is_none() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{"message": {"role": "assistant", "content": "I think they are a blocker"}}]
        }));
    });

    let client =
        AiClient::with_base_url(http(), AiProvider::OpenAi, "key".into(), server.base_url());
    assert_eq!(client.classify_buyer_role("Gatekeeper").unwrap(), None);
}
