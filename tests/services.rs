use std::fs;

use httpmock::prelude::*;
use serde_json::json;

use adrata_ops::domain::buyer_group::BuyerRole;
use adrata_ops::domain::company::NewCompany;
use adrata_ops::domain::email_message::DeliveryStatus;
use adrata_ops::domain::person::{EmailStatus, NewPerson};
use adrata_ops::repository::{
    BuyerGroupReader, CompanyListQuery, CompanyReader, CompanyWriter, EmailMessageReader,
    PersonListQuery, PersonReader, PersonWriter, UserListQuery, UserReader,
};
use adrata_ops::services::classify::{ClassifyOptions, classify_workspace};
use adrata_ops::services::convert;
use adrata_ops::services::dedupe::{DedupeOptions, dedupe_companies, dedupe_people};
use adrata_ops::services::enrich::{EnrichOptions, enrich_people};
use adrata_ops::services::export::{ExportFormat, export_people};
use adrata_ops::services::import::{ImportOptions, import_companies, import_people, read_rows};
use adrata_ops::services::invite::{InvitationSender, InviteOptions, invite_users};
use adrata_ops::vendors::{HunterClient, Pacer, VendorClients, ZeroBounceClient};

mod common;

fn no_vendors() -> VendorClients {
    VendorClients {
        coresignal: None,
        lusha: None,
        hunter: None,
        prospeo: None,
        zerobounce: None,
        twilio: None,
        ai: None,
    }
}

#[test]
fn import_companies_is_idempotent() {
    let test_db = common::TestDb::new("import_companies_idempotent.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.csv");
    fs::write(
        &path,
        "name,domain,industry\n\
         Acme Corp,https://www.acme.com,Software\n\
         Globex,globex.com,\n",
    )
    .unwrap();

    let options = ImportOptions::default();
    let rows = read_rows(&path).unwrap();
    let first = import_companies(&repo, &workspace, rows, &options).unwrap();
    assert_eq!(first.created, 2);
    assert_eq!(first.failed, 0);

    let rows = read_rows(&path).unwrap();
    let second = import_companies(&repo, &workspace, rows, &options).unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 2);

    let (total, _) = repo
        .list_companies(CompanyListQuery::new(workspace.id))
        .unwrap();
    assert_eq!(total, 2);
}

#[test]
fn import_people_links_companies_and_merges_blanks() {
    let test_db = common::TestDb::new("import_people_merge.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.csv");
    fs::write(
        &path,
        "name,email,title,company,company_domain\n\
         Jane Doe,jane@acme.com,,Acme Corp,acme.com\n",
    )
    .unwrap();

    let rows = read_rows(&path).unwrap();
    let first = import_people(
        &repo,
        &workspace,
        rows,
        &ImportOptions {
            as_leads: true,
            source: Some("people.csv".into()),
            ..ImportOptions::default()
        },
    )
    .unwrap();
    assert_eq!(first.created, 1);

    // The company was find-or-created and the person linked to it.
    let company = repo
        .find_company_by_domain(workspace.id, "acme.com")
        .unwrap()
        .unwrap();
    let jane = repo
        .find_person_by_email(workspace.id, "jane@acme.com")
        .unwrap()
        .unwrap();
    assert_eq!(jane.company_id, Some(company.id));
    assert_eq!(jane.title, None);

    // Re-import with a title fills the blank without duplicating.
    let merge_path = dir.path().join("people2.csv");
    fs::write(
        &merge_path,
        "name,email,title,company,company_domain\n\
         Jane Doe,jane@acme.com,VP of Sales,Acme Corp,acme.com\n",
    )
    .unwrap();
    let rows = read_rows(&merge_path).unwrap();
    let second = import_people(
        &repo,
        &workspace,
        rows,
        &ImportOptions {
            merge: true,
            ..ImportOptions::default()
        },
    )
    .unwrap();
    assert_eq!(second.updated, 1);

    let (total, people) = repo.list_people(PersonListQuery::new(workspace.id)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(people[0].title.as_deref(), Some("VP of Sales"));
}

#[test]
fn dry_run_import_writes_nothing() {
    let test_db = common::TestDb::new("import_dry_run.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.json");
    fs::write(
        &path,
        r#"[{"name": "Acme Corp", "domain": "acme.com"}]"#,
    )
    .unwrap();

    let rows = read_rows(&path).unwrap();
    let summary = import_companies(
        &repo,
        &workspace,
        rows,
        &ImportOptions {
            dry_run: true,
            ..ImportOptions::default()
        },
    )
    .unwrap();
    assert_eq!(summary.created, 1);

    let (total, _) = repo
        .list_companies(CompanyListQuery::new(workspace.id))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn dedupe_companies_keeps_best_record_and_repoints() {
    let test_db = common::TestDb::new("dedupe_companies.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let sparse = repo
        .create_company(&NewCompany::new(workspace.id, "Acme", Some("acme.com")).unwrap())
        .unwrap();
    let rich = repo
        .create_company(
            &NewCompany::new(workspace.id, "Acme Corp", Some("acme.com"))
                .unwrap()
                .industry(Some("Software"))
                .website(Some("https://acme.com")),
        )
        .unwrap();
    let person = repo
        .create_person(
            &NewPerson::new(workspace.id, "Jane Doe", None)
                .unwrap()
                .company_id(Some(sparse.id)),
        )
        .unwrap();

    let summary = dedupe_companies(&repo, &workspace, &DedupeOptions::default()).unwrap();
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.deleted, 1);

    // The richer record wins even though it is younger.
    let keep = repo.get_company_by_id(rich.id).unwrap().unwrap();
    assert!(keep.deleted_at.is_none());
    let drop = repo.get_company_by_id(sparse.id).unwrap().unwrap();
    assert!(drop.deleted_at.is_some());

    let moved = repo.get_person_by_id(person.id).unwrap().unwrap();
    assert_eq!(moved.company_id, Some(rich.id));

    // A second run finds nothing to merge.
    let again = dedupe_companies(&repo, &workspace, &DedupeOptions::default()).unwrap();
    assert_eq!(again.processed, 0);
}

#[test]
fn dedupe_people_by_email_fills_winner_blanks() {
    let test_db = common::TestDb::new("dedupe_people.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let rich = repo
        .create_person(
            &NewPerson::new(workspace.id, "Jane Doe", Some("jane@acme.com"))
                .unwrap()
                .title(Some("CTO"))
                .city(Some("Austin")),
        )
        .unwrap();
    let sparse = repo
        .create_person(
            &NewPerson::new(workspace.id, "Jane Doe", Some("jane@acme.com"))
                .unwrap()
                .phone(Some("+15125550100")),
        )
        .unwrap();

    let summary = dedupe_people(&repo, &workspace, &DedupeOptions::default()).unwrap();
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.deleted, 1);

    let keep = repo.get_person_by_id(rich.id).unwrap().unwrap();
    assert!(keep.deleted_at.is_none());
    // The loser's phone filled the winner's blank column.
    assert_eq!(keep.phone.as_deref(), Some("+15125550100"));
    assert_eq!(keep.title.as_deref(), Some("CTO"));

    let gone = repo.get_person_by_id(sparse.id).unwrap().unwrap();
    assert!(gone.deleted_at.is_some());
}

#[test]
fn dedupe_dry_run_writes_nothing() {
    let test_db = common::TestDb::new("dedupe_dry_run.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    for name in ["Acme", "Acme Corp"] {
        repo.create_company(&NewCompany::new(workspace.id, name, Some("acme.com")).unwrap())
            .unwrap();
    }

    let summary = dedupe_companies(
        &repo,
        &workspace,
        &DedupeOptions {
            dry_run: true,
            force: false,
        },
    )
    .unwrap();
    assert_eq!(summary.deleted, 0);

    let (total, _) = repo
        .list_companies(CompanyListQuery::new(workspace.id))
        .unwrap();
    assert_eq!(total, 2);
}

#[test]
fn classify_assigns_roles_per_title() {
    let test_db = common::TestDb::new("classify_roles.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let company = repo
        .create_company(&NewCompany::new(workspace.id, "Acme", Some("acme.com")).unwrap())
        .unwrap();
    for (name, title) in [
        ("Alice Chief", "Chief Executive Officer"),
        ("Bob Director", "Director of Engineering"),
        ("Carol Manager", "Marketing Manager"),
        ("Dave Analyst", "Research Analyst"),
    ] {
        repo.create_person(
            &NewPerson::new(workspace.id, name, None)
                .unwrap()
                .company_id(Some(company.id))
                .title(Some(title)),
        )
        .unwrap();
    }
    // No title: not a classification candidate.
    repo.create_person(
        &NewPerson::new(workspace.id, "Eve Untitled", None)
            .unwrap()
            .company_id(Some(company.id)),
    )
    .unwrap();

    let summary =
        classify_workspace(&repo, None, &workspace, &ClassifyOptions::default()).unwrap();
    assert_eq!(summary.updated, 4);

    let members = repo.list_buyer_group_members(company.id).unwrap();
    assert_eq!(members.len(), 4);
    // Ordered by influence, the CEO leads the group.
    assert_eq!(members[0].role, BuyerRole::DecisionMaker);
    let roles: Vec<BuyerRole> = members.iter().map(|m| m.role).collect();
    assert!(roles.contains(&BuyerRole::Champion));
    assert!(roles.contains(&BuyerRole::Influencer));
    assert!(roles.contains(&BuyerRole::Stakeholder));

    // Re-running reclassifies in place instead of duplicating rows.
    classify_workspace(&repo, None, &workspace, &ClassifyOptions::default()).unwrap();
    assert_eq!(repo.list_buyer_group_members(company.id).unwrap().len(), 4);
}

#[test]
fn convert_round_trip_preserves_non_array_fields() {
    let dir = tempfile::tempdir().unwrap();
    let json_in = dir.path().join("notaries.json");
    let csv_path = dir.path().join("notaries.csv");
    let json_out = dir.path().join("notaries_back.json");

    fs::write(
        &json_in,
        json!([
            {
                "name": "Pat Quill",
                "title": "Notary Public",
                "company": "Quill & Co",
                "city": "Austin",
                "state": "TX",
                "phone": null,
                "email": "pat@quill.co",
                "image_url": null,
                "badges": ["certified", "mobile"]
            },
            {
                "name": "Lee Stamp",
                "title": null,
                "company": null,
                "city": "Reno",
                "state": "NV",
                "phone": "+17755550100",
                "email": null,
                "image_url": null,
                "badges": []
            }
        ])
        .to_string(),
    )
    .unwrap();

    assert_eq!(convert::json_to_csv(&json_in, &csv_path).unwrap(), 2);
    assert_eq!(convert::csv_to_json(&csv_path, &json_out).unwrap(), 2);

    let original: Vec<convert::NotaryRecord> =
        serde_json::from_str(&fs::read_to_string(&json_in).unwrap()).unwrap();
    let round_tripped: Vec<convert::NotaryRecord> =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(round_tripped, original);

    let csv_text = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_text.starts_with("name,title,company,city,state,phone,email,image_url,badges"));
    assert!(csv_text.contains("certified|mobile"));
}

#[test]
fn export_people_includes_company_names() {
    let test_db = common::TestDb::new("export_people.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let company = repo
        .create_company(&NewCompany::new(workspace.id, "Acme Corp", Some("acme.com")).unwrap())
        .unwrap();
    repo.create_person(
        &NewPerson::new(workspace.id, "Jane Doe", Some("jane@acme.com"))
            .unwrap()
            .company_id(Some(company.id))
            .title(Some("CTO")),
    )
    .unwrap();

    let mut csv_buffer = Vec::new();
    let count = export_people(&repo, &workspace, ExportFormat::Csv, &mut csv_buffer).unwrap();
    assert_eq!(count, 1);
    let text = String::from_utf8(csv_buffer).unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Acme Corp"));

    let mut json_buffer = Vec::new();
    export_people(&repo, &workspace, ExportFormat::Json, &mut json_buffer).unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&json_buffer).unwrap();
    assert_eq!(rows[0]["email"], "jane@acme.com");
    assert_eq!(rows[0]["company"], "Acme Corp");
}

#[test]
fn enrich_people_waterfall_verifies_and_writes() {
    let test_db = common::TestDb::new("enrich_people.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let company = repo
        .create_company(&NewCompany::new(workspace.id, "Acme", Some("acme.com")).unwrap())
        .unwrap();
    let person = repo
        .create_person(
            &NewPerson::new(workspace.id, "Jane Doe", None)
                .unwrap()
                .company_id(Some(company.id)),
        )
        .unwrap();

    let server = MockServer::start();
    let finder = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/email-finder")
            .query_param("domain", "acme.com")
            .query_param("first_name", "Jane")
            .query_param("last_name", "Doe");
        then.status(200)
            .json_body(json!({"data": {"email": "jane@acme.com", "score": 93}}));
    });
    let verifier = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/validate")
            .query_param("email", "jane@acme.com");
        then.status(200)
            .json_body(json!({"status": "valid", "sub_status": ""}));
    });

    let http = reqwest::blocking::Client::new();
    let vendors = VendorClients {
        hunter: Some(HunterClient::with_base_url(
            http.clone(),
            "key".into(),
            server.base_url(),
        )),
        zerobounce: Some(ZeroBounceClient::with_base_url(
            http,
            "key".into(),
            server.base_url(),
        )),
        ..no_vendors()
    };

    let summary = enrich_people(
        &repo,
        &vendors,
        Pacer::new(0),
        &workspace,
        &EnrichOptions::default(),
    )
    .unwrap();
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.failed, 0);
    finder.assert();
    verifier.assert();

    let enriched = repo.get_person_by_id(person.id).unwrap().unwrap();
    assert_eq!(enriched.email.as_deref(), Some("jane@acme.com"));
    assert_eq!(enriched.email_status, Some(EmailStatus::Valid));
}

#[test]
fn invite_records_messages_and_marks_users() {
    let test_db = common::TestDb::new("invite_users.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipients.csv");
    fs::write(&path, "name,email\nDano,dano@adrata.com\n").unwrap();

    let server = MockServer::start();
    let endpoint = server.mock(|when, then| {
        when.method(POST).path("/api/v1/workspaces/adrata/invitations");
        then.status(201).json_body(json!({"ok": true}));
    });

    let sender = InvitationSender::with_client(
        reqwest::blocking::Client::new(),
        server.base_url(),
        "token".into(),
    );

    let summary = invite_users(
        &repo,
        Some(&sender),
        &workspace,
        &InviteOptions {
            file: Some(path),
            dry_run: false,
        },
    )
    .unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.failed, 0);
    endpoint.assert();

    let messages = repo.list_email_messages(workspace.id).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].status, DeliveryStatus::Sent);

    let user = repo
        .get_user_by_email(workspace.id, "dano@adrata.com")
        .unwrap()
        .unwrap();
    assert!(user.invited_at.is_some());

    // The uninvited default selection is now empty, so a re-run sends nothing.
    let again = invite_users(
        &repo,
        Some(&sender),
        &workspace,
        &InviteOptions::default(),
    )
    .unwrap();
    assert_eq!(again.processed, 0);
}

#[test]
fn invite_requires_api_config_outside_dry_run() {
    let test_db = common::TestDb::new("invite_requires_config.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let result = invite_users(&repo, None, &workspace, &InviteOptions::default());
    assert!(result.is_err());

    let dry = invite_users(
        &repo,
        None,
        &workspace,
        &InviteOptions {
            file: None,
            dry_run: true,
        },
    )
    .unwrap();
    assert_eq!(dry.processed, 0);

    // A file-based dry run reports the rows without creating user rows.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipients.csv");
    fs::write(&path, "name,email\nDano,dano@adrata.com\n").unwrap();
    let dry_file = invite_users(
        &repo,
        None,
        &workspace,
        &InviteOptions {
            file: Some(path),
            dry_run: true,
        },
    )
    .unwrap();
    assert_eq!(dry_file.skipped, 1);

    let users = repo
        .list_users(UserListQuery::new(workspace.id).uninvited_only())
        .unwrap();
    assert!(users.is_empty());
}
