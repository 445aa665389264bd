//! Third-party enrichment sweeps.
//!
//! People missing an email run the vendor waterfall (Lusha, then Hunter,
//! then Prospeo); a hit is verified through ZeroBounce before it is written.
//! People with an unclassified phone go through Twilio Lookup. Companies
//! missing industry data are filled from CoreSignal firmographics. Vendors
//! are called strictly sequentially with a fixed pause between calls.

use crate::domain::company::{Company, CompanyPatch};
use crate::domain::person::{EmailStatus, Person, PersonPatch};
use crate::domain::types::PhoneNumber;
use crate::domain::workspace::Workspace;
use crate::repository::{
    CompanyListQuery, CompanyReader, CompanyWriter, PersonListQuery, PersonReader, PersonWriter,
};
use crate::services::{RunSummary, ServiceResult};
use crate::vendors::{Pacer, VendorClients, VendorError};

#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichOptions {
    /// Cap on the number of records sent through the vendors.
    pub limit: Option<usize>,
    pub dry_run: bool,
}

fn cap<T>(mut records: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    records
}

pub fn enrich_people<R>(
    repo: &R,
    vendors: &VendorClients,
    pacer: Pacer,
    workspace: &Workspace,
    options: &EnrichOptions,
) -> ServiceResult<RunSummary>
where
    R: PersonReader + PersonWriter + CompanyReader + ?Sized,
{
    for (name, missing) in [
        ("lusha", vendors.lusha.is_none()),
        ("hunter", vendors.hunter.is_none()),
        ("prospeo", vendors.prospeo.is_none()),
        ("zerobounce", vendors.zerobounce.is_none()),
        ("twilio", vendors.twilio.is_none()),
    ] {
        if missing {
            log::warn!("{name} API key not configured; that step will be skipped");
        }
    }

    let mut summary = RunSummary::default();

    let (_, email_candidates) =
        repo.list_people(PersonListQuery::new(workspace.id).missing_email())?;
    for person in cap(email_candidates, options.limit) {
        match enrich_person_email(repo, vendors, pacer, workspace, &person, options) {
            Ok(Outcome::Updated) => summary.record_updated(),
            Ok(Outcome::Skipped) => summary.record_skipped(),
            Err(err) => {
                log::error!("Email enrichment failed for '{}': {err}", person.name);
                summary.record_failed();
            }
        }
    }

    let (_, people) = repo.list_people(PersonListQuery::new(workspace.id))?;
    let phone_candidates: Vec<Person> = people
        .into_iter()
        .filter(|person| person.phone.is_some() && person.phone_line_type.is_none())
        .collect();
    for person in cap(phone_candidates, options.limit) {
        match enrich_person_phone(repo, vendors, pacer, &person, options) {
            Ok(Outcome::Updated) => summary.record_updated(),
            Ok(Outcome::Skipped) => summary.record_skipped(),
            Err(err) => {
                log::error!("Phone lookup failed for '{}': {err}", person.name);
                summary.record_failed();
            }
        }
    }

    Ok(summary)
}

enum Outcome {
    Updated,
    Skipped,
}

fn enrich_person_email<R>(
    repo: &R,
    vendors: &VendorClients,
    pacer: Pacer,
    workspace: &Workspace,
    person: &Person,
    options: &EnrichOptions,
) -> ServiceResult<Outcome>
where
    R: PersonReader + PersonWriter + CompanyReader + ?Sized,
{
    let Some((first_name, last_name)) = person.split_name() else {
        log::info!("Cannot split '{}' into first/last name; skipping", person.name);
        return Ok(Outcome::Skipped);
    };

    let company = match person.company_id {
        Some(id) => repo.get_company_by_id(id)?,
        None => None,
    };
    let domain = company.as_ref().and_then(|c| c.domain.as_deref());
    let company_name = company.as_ref().map(|c| c.name.as_str());

    if options.dry_run {
        log::info!(
            "[dry-run] would run the email waterfall for '{}' ({})",
            person.name,
            domain.unwrap_or("no domain")
        );
        return Ok(Outcome::Skipped);
    }

    let mut found_email: Option<String> = None;
    let mut found_phone: Option<String> = None;

    if let (Some(client), Some(domain)) = (&vendors.lusha, domain) {
        pacer.pause();
        match client.find_person(first_name, last_name, domain) {
            Ok(Some(contact)) => {
                found_email = contact.email;
                found_phone = contact.phone;
            }
            Ok(None) => {}
            Err(err) => log_vendor_miss("lusha", &person.name, &err),
        }
    }

    if found_email.is_none() {
        if let (Some(client), Some(domain)) = (&vendors.hunter, domain) {
            pacer.pause();
            match client.find_email(domain, first_name, last_name) {
                Ok(Some(found)) => found_email = Some(found.email),
                Ok(None) => {}
                Err(err) => log_vendor_miss("hunter", &person.name, &err),
            }
        }
    }

    if found_email.is_none() {
        if let (Some(client), Some(company_name)) = (&vendors.prospeo, company_name) {
            pacer.pause();
            match client.find_email(first_name, last_name, company_name) {
                Ok(Some(email)) => found_email = Some(email),
                Ok(None) => {}
                Err(err) => log_vendor_miss("prospeo", &person.name, &err),
            }
        }
    }

    let Some(email) = found_email else {
        log::info!(
            "No vendor found an email for '{}' in workspace {}",
            person.name,
            workspace.slug
        );
        return Ok(Outcome::Skipped);
    };

    let status = match &vendors.zerobounce {
        Some(client) => {
            pacer.pause();
            match client.validate(&email) {
                Ok(verification) => Some(verification.status),
                Err(err) => {
                    log_vendor_miss("zerobounce", &person.name, &err);
                    Some(EmailStatus::Unknown)
                }
            }
        }
        None => None,
    };

    let patch = PersonPatch {
        email: Some(email.trim().to_lowercase()),
        email_status: status,
        phone: if person.phone.is_none() {
            found_phone
        } else {
            None
        },
        ..PersonPatch::default()
    };
    repo.patch_person(person.id, &patch)?;

    Ok(Outcome::Updated)
}

fn enrich_person_phone<R>(
    repo: &R,
    vendors: &VendorClients,
    pacer: Pacer,
    person: &Person,
    options: &EnrichOptions,
) -> ServiceResult<Outcome>
where
    R: PersonWriter + ?Sized,
{
    let Some(client) = &vendors.twilio else {
        return Ok(Outcome::Skipped);
    };
    let Some(phone) = person.phone.as_deref() else {
        return Ok(Outcome::Skipped);
    };

    if options.dry_run {
        log::info!("[dry-run] would look up phone for '{}'", person.name);
        return Ok(Outcome::Skipped);
    }

    // Normalize locally first so the lookup URL is clean E.164 whenever the
    // raw value parses; Twilio gets the raw string otherwise.
    let query = match PhoneNumber::new(phone) {
        Ok(normalized) => normalized.into_inner(),
        Err(_) => phone.trim().to_string(),
    };

    pacer.pause();
    let Some(lookup) = client.lookup(&query)? else {
        log::info!("Twilio could not parse phone '{phone}' for '{}'", person.name);
        return Ok(Outcome::Skipped);
    };

    if !lookup.valid {
        log::info!("Phone '{phone}' for '{}' is not valid", person.name);
        return Ok(Outcome::Skipped);
    }

    let patch = PersonPatch {
        phone: Some(lookup.phone_number),
        phone_line_type: lookup.line_type,
        ..PersonPatch::default()
    };
    repo.patch_person(person.id, &patch)?;

    Ok(Outcome::Updated)
}

pub fn enrich_companies<R>(
    repo: &R,
    vendors: &VendorClients,
    pacer: Pacer,
    workspace: &Workspace,
    options: &EnrichOptions,
) -> ServiceResult<RunSummary>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    let Some(client) = &vendors.coresignal else {
        log::warn!("coresignal API key not configured; nothing to do");
        return Ok(RunSummary::default());
    };

    let (_, candidates) =
        repo.list_companies(CompanyListQuery::new(workspace.id).missing_industry())?;
    let mut summary = RunSummary::default();

    for company in cap(candidates, options.limit) {
        let Some(domain) = company.domain.as_deref() else {
            log::info!("Company '{}' has no domain; skipping", company.name);
            summary.record_skipped();
            continue;
        };

        if options.dry_run {
            log::info!("[dry-run] would enrich '{}' from {domain}", company.name);
            summary.record_skipped();
            continue;
        }

        pacer.pause();
        match client.company_by_domain(domain) {
            Ok(Some(firmographics)) => {
                let fill = firmographic_fill(&company, firmographics);
                if fill.is_empty() {
                    summary.record_skipped();
                    continue;
                }
                match repo.patch_company(company.id, &fill) {
                    Ok(_) => summary.record_updated(),
                    Err(err) => {
                        log::error!("Failed to update company '{}': {err}", company.name);
                        summary.record_failed();
                    }
                }
            }
            Ok(None) => {
                log::info!("CoreSignal has no record for {domain}");
                summary.record_skipped();
            }
            Err(err) => {
                log::error!("CoreSignal lookup failed for {domain}: {err}");
                summary.record_failed();
            }
        }
    }

    Ok(summary)
}

/// Maps vendor firmographics onto the blank columns only; existing data wins.
fn firmographic_fill(
    company: &Company,
    firmographics: crate::vendors::coresignal::CompanyFirmographics,
) -> CompanyPatch {
    let keep_blank = |current: &Option<String>, candidate: Option<String>| -> Option<String> {
        if current.as_deref().is_some_and(|v| !v.trim().is_empty()) {
            None
        } else {
            candidate.filter(|v| !v.trim().is_empty())
        }
    };
    CompanyPatch {
        domain: None,
        website: keep_blank(&company.website, firmographics.website),
        industry: keep_blank(&company.industry, firmographics.industry),
        employee_range: keep_blank(&company.employee_range, firmographics.employee_range),
        revenue_range: None,
        description: keep_blank(&company.description, firmographics.description),
    }
}

fn log_vendor_miss(vendor: &str, person: &str, err: &VendorError) {
    log::error!("{vendor} lookup failed for '{person}': {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendors::coresignal::CompanyFirmographics;

    #[test]
    fn firmographics_only_fill_blank_columns() {
        let company = Company {
            website: Some("https://acme.com".into()),
            ..Company::default()
        };
        let fill = firmographic_fill(
            &company,
            CompanyFirmographics {
                name: Some("Acme".into()),
                website: Some("https://acme.example".into()),
                industry: Some("Software".into()),
                employee_range: Some("51-200".into()),
                description: Some("  ".into()),
            },
        );
        assert_eq!(fill.website, None);
        assert_eq!(fill.industry.as_deref(), Some("Software"));
        assert_eq!(fill.employee_range.as_deref(), Some("51-200"));
        // Blank vendor values never land in the patch.
        assert_eq!(fill.description, None);
    }
}
