use adrata_ops::domain::buyer_group::{BuyerRole, NewBuyerGroupMember};
use adrata_ops::domain::company::{CompanyPatch, NewCompany};
use adrata_ops::domain::email_message::{DeliveryStatus, NewEmailMessage};
use adrata_ops::domain::lead::NewLead;
use adrata_ops::domain::person::{NewPerson, PersonPatch};
use adrata_ops::domain::prospect::{NewProspect, ProspectStage};
use adrata_ops::domain::user::NewUser;
use adrata_ops::repository::{
    BuyerGroupReader, BuyerGroupWriter, CompanyListQuery, CompanyReader, CompanyWriter,
    EmailMessageReader, EmailMessageWriter, LeadReader, LeadWriter, PersonListQuery, PersonReader,
    PersonWriter, ProspectReader, ProspectWriter, UserListQuery, UserReader, UserWriter,
    WorkspaceReader,
};

mod common;

#[test]
fn workspace_create_and_lookup() {
    let test_db = common::TestDb::new("workspace_create_and_lookup.db");
    let repo = test_db.repo();

    let workspace = common::seed_workspace(&repo, "adrata");
    let fetched = repo.get_workspace_by_slug("adrata").unwrap().unwrap();
    assert_eq!(fetched, workspace);
    assert!(repo.get_workspace_by_slug("missing").unwrap().is_none());
    assert_eq!(repo.list_workspaces().unwrap().len(), 1);
}

#[test]
fn company_crud_and_natural_key_lookups() {
    let test_db = common::TestDb::new("company_crud.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let acme = repo
        .create_company(
            &NewCompany::new(workspace.id, "Acme Corp", Some("https://www.acme.com"))
                .unwrap()
                .industry(Some("Software")),
        )
        .unwrap();
    assert_eq!(acme.domain.as_deref(), Some("acme.com"));

    let by_domain = repo
        .find_company_by_domain(workspace.id, "acme.com")
        .unwrap()
        .unwrap();
    assert_eq!(by_domain.id, acme.id);

    let by_name = repo
        .find_company_by_name(workspace.id, "ACME CORP")
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, acme.id);

    let patched = repo
        .patch_company(
            acme.id,
            &CompanyPatch {
                website: Some("https://acme.com".into()),
                ..CompanyPatch::default()
            },
        )
        .unwrap();
    assert_eq!(patched.website.as_deref(), Some("https://acme.com"));
    // Untouched columns survive a partial update.
    assert_eq!(patched.industry.as_deref(), Some("Software"));

    let (total, items) = repo
        .list_companies(CompanyListQuery::new(workspace.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, acme.id);
}

#[test]
fn merge_companies_repoints_people_and_soft_deletes() {
    let test_db = common::TestDb::new("merge_companies.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let keep = repo
        .create_company(&NewCompany::new(workspace.id, "Acme", Some("acme.com")).unwrap())
        .unwrap();
    let dupe = repo
        .create_company(
            &NewCompany::new(workspace.id, "Acme Inc", Some("acme-inc.example"))
                .unwrap()
                .industry(Some("Software")),
        )
        .unwrap();

    let orphan = repo
        .create_person(
            &NewPerson::new(workspace.id, "Jane Doe", Some("jane@acme.com"))
                .unwrap()
                .company_id(Some(dupe.id)),
        )
        .unwrap();

    let deleted = repo
        .merge_companies(
            keep.id,
            &[dupe.id],
            &CompanyPatch {
                industry: Some("Software".into()),
                ..CompanyPatch::default()
            },
        )
        .unwrap();
    assert_eq!(deleted, 1);

    let merged = repo.get_company_by_id(keep.id).unwrap().unwrap();
    assert_eq!(merged.industry.as_deref(), Some("Software"));
    assert!(merged.deleted_at.is_none());

    let loser = repo.get_company_by_id(dupe.id).unwrap().unwrap();
    assert!(loser.deleted_at.is_some());

    let moved = repo.get_person_by_id(orphan.id).unwrap().unwrap();
    assert_eq!(moved.company_id, Some(keep.id));

    // Soft-deleted companies disappear from the default listing.
    let (total, _) = repo
        .list_companies(CompanyListQuery::new(workspace.id))
        .unwrap();
    assert_eq!(total, 1);
    let (with_deleted, _) = repo
        .list_companies(CompanyListQuery::new(workspace.id).include_deleted())
        .unwrap();
    assert_eq!(with_deleted, 2);
}

#[test]
fn person_lookups_and_filters() {
    let test_db = common::TestDb::new("person_lookups.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let company = repo
        .create_company(&NewCompany::new(workspace.id, "Acme", Some("acme.com")).unwrap())
        .unwrap();

    let jane = repo
        .create_person(
            &NewPerson::new(workspace.id, "Jane Doe", Some("Jane@Acme.com"))
                .unwrap()
                .company_id(Some(company.id))
                .title(Some("VP of Sales")),
        )
        .unwrap();
    assert_eq!(jane.email.as_deref(), Some("jane@acme.com"));

    let untitled = repo
        .create_person(
            &NewPerson::new(workspace.id, "Sam Smith", None)
                .unwrap()
                .company_id(Some(company.id)),
        )
        .unwrap();

    let by_email = repo
        .find_person_by_email(workspace.id, "JANE@acme.com")
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, jane.id);

    let by_name = repo
        .find_person_by_name_and_company(workspace.id, "sam smith", Some(company.id))
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, untitled.id);

    let (titled_total, titled) = repo
        .list_people(
            PersonListQuery::new(workspace.id)
                .company(company.id)
                .with_title(),
        )
        .unwrap();
    assert_eq!(titled_total, 1);
    assert_eq!(titled[0].id, jane.id);

    let (missing_total, missing) = repo
        .list_people(PersonListQuery::new(workspace.id).missing_email())
        .unwrap();
    assert_eq!(missing_total, 1);
    assert_eq!(missing[0].id, untitled.id);
}

#[test]
fn merge_people_repoints_leads_prospects_and_groups() {
    let test_db = common::TestDb::new("merge_people.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let company = repo
        .create_company(&NewCompany::new(workspace.id, "Acme", Some("acme.com")).unwrap())
        .unwrap();

    let keep = repo
        .create_person(
            &NewPerson::new(workspace.id, "Jane Doe", Some("jane@acme.com")).unwrap(),
        )
        .unwrap();
    let dupe = repo
        .create_person(
            &NewPerson::new(workspace.id, "Jane A. Doe", None)
                .unwrap()
                .company_id(Some(company.id))
                .title(Some("CTO")),
        )
        .unwrap();

    let lead = repo
        .create_lead(&NewLead::new(workspace.id, dupe.id, Some("import.csv")))
        .unwrap();
    repo.create_prospect(&NewProspect {
        workspace_id: workspace.id,
        person_id: dupe.id,
        stage: ProspectStage::Warm,
    })
    .unwrap();
    repo.upsert_buyer_group_member(&NewBuyerGroupMember {
        workspace_id: workspace.id,
        company_id: company.id,
        person_id: dupe.id,
        role: BuyerRole::DecisionMaker,
        influence: 0.7,
    })
    .unwrap();

    let deleted = repo
        .merge_people(
            keep.id,
            &[dupe.id],
            &PersonPatch {
                company_id: Some(company.id),
                title: Some("CTO".into()),
                ..PersonPatch::default()
            },
        )
        .unwrap();
    assert_eq!(deleted, 1);

    let merged = repo.get_person_by_id(keep.id).unwrap().unwrap();
    assert_eq!(merged.title.as_deref(), Some("CTO"));
    assert_eq!(merged.company_id, Some(company.id));

    let moved_lead = repo.find_lead_by_person(keep.id).unwrap().unwrap();
    assert_eq!(moved_lead.id, lead.id);
    assert!(repo.find_prospect_by_person(keep.id).unwrap().is_some());

    let members = repo.list_buyer_group_members(company.id).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].person_id, keep.id);

    let loser = repo.get_person_by_id(dupe.id).unwrap().unwrap();
    assert!(loser.deleted_at.is_some());
    // Soft-deleted people no longer match natural-key lookups.
    assert!(
        repo.find_person_by_name_and_company(workspace.id, "Jane A. Doe", Some(company.id))
            .unwrap()
            .is_none()
    );
}

#[test]
fn buyer_group_upsert_reclassifies_in_place() {
    let test_db = common::TestDb::new("buyer_group_upsert.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let company = repo
        .create_company(&NewCompany::new(workspace.id, "Acme", Some("acme.com")).unwrap())
        .unwrap();
    let person = repo
        .create_person(&NewPerson::new(workspace.id, "Jane Doe", None).unwrap())
        .unwrap();

    let first = repo
        .upsert_buyer_group_member(&NewBuyerGroupMember {
            workspace_id: workspace.id,
            company_id: company.id,
            person_id: person.id,
            role: BuyerRole::Influencer,
            influence: 0.25,
        })
        .unwrap();

    let second = repo
        .upsert_buyer_group_member(&NewBuyerGroupMember {
            workspace_id: workspace.id,
            company_id: company.id,
            person_id: person.id,
            role: BuyerRole::Champion,
            influence: 0.45,
        })
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.role, BuyerRole::Champion);

    let members = repo.list_buyer_group_members(company.id).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].influence, 0.45);
}

#[test]
fn user_and_email_message_lifecycle() {
    let test_db = common::TestDb::new("user_email_lifecycle.db");
    let repo = test_db.repo();
    let workspace = common::seed_workspace(&repo, "adrata");

    let user = repo
        .create_user(&NewUser::new(workspace.id, "Dano", "dano@adrata.com").unwrap())
        .unwrap();
    assert!(user.invited_at.is_none());

    let uninvited = repo
        .list_users(UserListQuery::new(workspace.id).uninvited_only())
        .unwrap();
    assert_eq!(uninvited.len(), 1);

    let message = repo
        .create_email_message(
            &NewEmailMessage::invitation(workspace.id, &workspace.name, &user.name, &user.email)
                .unwrap(),
        )
        .unwrap();
    assert_eq!(message.status, DeliveryStatus::Pending);

    repo.mark_email_sent(message.id).unwrap();
    repo.mark_user_invited(user.id).unwrap();

    let messages = repo.list_email_messages(workspace.id).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].status, DeliveryStatus::Sent);
    assert!(messages[0].sent_at.is_some());

    let invited = repo
        .get_user_by_email(workspace.id, "dano@adrata.com")
        .unwrap()
        .unwrap();
    assert!(invited.invited_at.is_some());
    assert!(
        repo.list_users(UserListQuery::new(workspace.id).uninvited_only())
            .unwrap()
            .is_empty()
    );
}
