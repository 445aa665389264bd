//! CSV/JSON import with find-or-create reconciliation.
//!
//! Rows are matched against existing records by their natural key (company:
//! domain, then name; person: email, then name within the company). Existing
//! records are skipped, or have their blank columns filled when `--merge` is
//! set; populated columns are never overwritten.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::company::{Company, CompanyPatch, NewCompany};
use crate::domain::lead::NewLead;
use crate::domain::person::{NewPerson, Person, PersonPatch};
use crate::domain::prospect::{NewProspect, ProspectStage};
use crate::domain::workspace::Workspace;
use crate::repository::{
    CompanyReader, CompanyWriter, LeadReader, LeadWriter, PersonReader, PersonWriter,
    ProspectReader, ProspectWriter,
};
use crate::services::{RunSummary, ServiceError, ServiceResult};

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Fill blank columns of existing records from the incoming row.
    pub merge: bool,
    pub dry_run: bool,
    /// Also create a lead per imported person (people import only).
    pub as_leads: bool,
    /// Also create a prospect per imported person (people import only).
    pub as_prospects: bool,
    /// Recorded as the lead source, typically the input file name.
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompanyRow {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub employee_range: Option<String>,
    #[serde(default)]
    pub revenue_range: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PersonRow {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_domain: Option<String>,
}

/// Reads an array of rows from a `.json` file or a headered `.csv` file,
/// selected by extension.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> ServiceResult<Vec<T>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match extension.as_str() {
        "json" => {
            let file = File::open(path)?;
            Ok(serde_json::from_reader(BufReader::new(file))?)
        }
        "csv" => {
            let mut reader = csv::Reader::from_path(path)?;
            let mut rows = Vec::new();
            for result in reader.deserialize() {
                rows.push(result?);
            }
            Ok(rows)
        }
        other => Err(ServiceError::InvalidInput(format!(
            "unsupported input format '.{other}', expected .csv or .json"
        ))),
    }
}

pub fn import_companies<R>(
    repo: &R,
    workspace: &Workspace,
    rows: Vec<CompanyRow>,
    options: &ImportOptions,
) -> ServiceResult<RunSummary>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    let mut summary = RunSummary::default();

    for row in rows {
        let new_company = match build_company(workspace.id, &row) {
            Ok(company) => company,
            Err(err) => {
                log::error!("Skipping company row '{}': {err}", row.name);
                summary.record_failed();
                continue;
            }
        };

        match find_company(repo, workspace.id, &new_company) {
            Ok(Some(existing)) => {
                let fill = company_fill(&existing, &new_company);
                if options.merge && !fill.is_empty() {
                    if options.dry_run {
                        log::info!("[dry-run] would fill blanks on company '{}'", existing.name);
                        summary.record_updated();
                        continue;
                    }
                    match repo.patch_company(existing.id, &fill) {
                        Ok(_) => summary.record_updated(),
                        Err(err) => {
                            log::error!("Failed to merge company '{}': {err}", existing.name);
                            summary.record_failed();
                        }
                    }
                } else {
                    summary.record_skipped();
                }
            }
            Ok(None) => {
                if options.dry_run {
                    log::info!("[dry-run] would create company '{}'", new_company.name);
                    summary.record_created();
                    continue;
                }
                match repo.create_company(&new_company) {
                    Ok(_) => summary.record_created(),
                    Err(err) => {
                        log::error!("Failed to create company '{}': {err}", new_company.name);
                        summary.record_failed();
                    }
                }
            }
            Err(err) => {
                log::error!("Lookup failed for company '{}': {err}", new_company.name);
                summary.record_failed();
            }
        }
    }

    Ok(summary)
}

pub fn import_people<R>(
    repo: &R,
    workspace: &Workspace,
    rows: Vec<PersonRow>,
    options: &ImportOptions,
) -> ServiceResult<RunSummary>
where
    R: PersonReader
        + PersonWriter
        + CompanyReader
        + CompanyWriter
        + LeadReader
        + LeadWriter
        + ProspectReader
        + ProspectWriter
        + ?Sized,
{
    let mut summary = RunSummary::default();

    for row in rows {
        match import_person_row(repo, workspace, &row, options, &mut summary) {
            Ok(()) => {}
            Err(err) => {
                log::error!("Skipping person row '{}': {err}", row.name);
                summary.record_failed();
            }
        }
    }

    Ok(summary)
}

fn import_person_row<R>(
    repo: &R,
    workspace: &Workspace,
    row: &PersonRow,
    options: &ImportOptions,
    summary: &mut RunSummary,
) -> ServiceResult<()>
where
    R: PersonReader
        + PersonWriter
        + CompanyReader
        + CompanyWriter
        + LeadReader
        + LeadWriter
        + ProspectReader
        + ProspectWriter
        + ?Sized,
{
    let company_id = resolve_company(repo, workspace, row, options)?;

    let new_person = NewPerson::new(workspace.id, &row.name, row.email.as_deref())?
        .company_id(company_id)
        .title(row.title.as_deref())
        .phone(row.phone.as_deref())
        .city(row.city.as_deref())
        .state(row.state.as_deref())
        .linkedin_url(row.linkedin_url.as_deref());

    let existing = match &new_person.email {
        Some(email) => repo.find_person_by_email(workspace.id, email)?,
        None => repo.find_person_by_name_and_company(workspace.id, &new_person.name, company_id)?,
    };

    let person = match existing {
        Some(existing) => {
            let fill = person_fill(&existing, &new_person);
            if options.merge && has_person_fill(&fill) {
                if options.dry_run {
                    log::info!("[dry-run] would fill blanks on person '{}'", existing.name);
                    summary.record_updated();
                    return Ok(());
                }
                let updated = repo.patch_person(existing.id, &fill)?;
                summary.record_updated();
                updated
            } else {
                summary.record_skipped();
                existing
            }
        }
        None => {
            if options.dry_run {
                log::info!("[dry-run] would create person '{}'", new_person.name);
                summary.record_created();
                return Ok(());
            }
            let created = repo.create_person(&new_person)?;
            summary.record_created();
            created
        }
    };

    if options.as_leads && repo.find_lead_by_person(person.id)?.is_none() {
        repo.create_lead(&NewLead::new(
            workspace.id,
            person.id,
            options.source.as_deref(),
        ))?;
    }
    if options.as_prospects && repo.find_prospect_by_person(person.id)?.is_none() {
        repo.create_prospect(&NewProspect {
            workspace_id: workspace.id,
            person_id: person.id,
            stage: ProspectStage::Cold,
        })?;
    }

    Ok(())
}

/// Find-or-create the company referenced by a person row. Returns `None`
/// when the row names no company, or in dry-run mode when it does not exist
/// yet.
fn resolve_company<R>(
    repo: &R,
    workspace: &Workspace,
    row: &PersonRow,
    options: &ImportOptions,
) -> ServiceResult<Option<i32>>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    let name = row.company.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let domain = row
        .company_domain
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (name, domain) = match (name, domain) {
        (None, None) => return Ok(None),
        // A bare domain still identifies the company; use it as the name too.
        (None, Some(domain)) => (domain, Some(domain)),
        (Some(name), domain) => (name, domain),
    };

    let new_company = NewCompany::new(workspace.id, name, domain)?;
    if let Some(existing) = find_company(repo, workspace.id, &new_company)? {
        return Ok(Some(existing.id));
    }
    if options.dry_run {
        return Ok(None);
    }
    let created = repo.create_company(&new_company)?;
    Ok(Some(created.id))
}

fn build_company(workspace_id: i32, row: &CompanyRow) -> ServiceResult<NewCompany> {
    Ok(NewCompany::new(workspace_id, &row.name, row.domain.as_deref())?
        .website(row.website.as_deref())
        .industry(row.industry.as_deref())
        .employee_range(row.employee_range.as_deref())
        .revenue_range(row.revenue_range.as_deref())
        .description(row.description.as_deref()))
}

fn find_company<R>(
    repo: &R,
    workspace_id: i32,
    candidate: &NewCompany,
) -> ServiceResult<Option<Company>>
where
    R: CompanyReader + ?Sized,
{
    if let Some(domain) = &candidate.domain {
        if let Some(company) = repo.find_company_by_domain(workspace_id, domain)? {
            return Ok(Some(company));
        }
    }
    Ok(repo.find_company_by_name(workspace_id, &candidate.name)?)
}

/// Patch filling only the columns blank on `existing` with values from the
/// incoming row.
fn company_fill(existing: &Company, incoming: &NewCompany) -> CompanyPatch {
    let fill = |current: &Option<String>, candidate: &Option<String>| -> Option<String> {
        if current.as_deref().is_some_and(|v| !v.trim().is_empty()) {
            None
        } else {
            candidate.clone()
        }
    };
    CompanyPatch {
        domain: fill(&existing.domain, &incoming.domain),
        website: fill(&existing.website, &incoming.website),
        industry: fill(&existing.industry, &incoming.industry),
        employee_range: fill(&existing.employee_range, &incoming.employee_range),
        revenue_range: fill(&existing.revenue_range, &incoming.revenue_range),
        description: fill(&existing.description, &incoming.description),
    }
}

fn person_fill(existing: &Person, incoming: &NewPerson) -> PersonPatch {
    let fill = |current: &Option<String>, candidate: &Option<String>| -> Option<String> {
        if current.as_deref().is_some_and(|v| !v.trim().is_empty()) {
            None
        } else {
            candidate.clone()
        }
    };
    PersonPatch {
        company_id: if existing.company_id.is_none() {
            incoming.company_id
        } else {
            None
        },
        title: fill(&existing.title, &incoming.title),
        email: fill(&existing.email, &incoming.email),
        email_status: None,
        phone: fill(&existing.phone, &incoming.phone),
        phone_line_type: None,
        city: fill(&existing.city, &incoming.city),
        state: fill(&existing.state, &incoming.state),
        linkedin_url: fill(&existing.linkedin_url, &incoming.linkedin_url),
    }
}

fn has_person_fill(patch: &PersonPatch) -> bool {
    patch.company_id.is_some()
        || patch.title.is_some()
        || patch.email.is_some()
        || patch.phone.is_some()
        || patch.city.is_some()
        || patch.state.is_some()
        || patch.linkedin_url.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::Company;

    #[test]
    fn company_fill_never_touches_populated_columns() {
        let existing = Company {
            industry: Some("Software".into()),
            website: None,
            ..Company::default()
        };
        let incoming = NewCompany::new(1, "Acme", None)
            .unwrap()
            .industry(Some("Hardware"))
            .website(Some("https://acme.com"));
        let fill = company_fill(&existing, &incoming);
        assert_eq!(fill.industry, None);
        assert_eq!(fill.website.as_deref(), Some("https://acme.com"));
    }
}
