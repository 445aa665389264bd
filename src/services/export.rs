//! Workspace exports to CSV or JSON.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::domain::company::Company;
use crate::domain::person::Person;
use crate::domain::workspace::Workspace;
use crate::repository::{CompanyListQuery, CompanyReader, PersonListQuery, PersonReader};
use crate::services::ServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Serialize)]
pub struct CompanyExportRow {
    pub name: String,
    pub domain: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub employee_range: Option<String>,
    pub revenue_range: Option<String>,
    pub description: Option<String>,
}

impl From<&Company> for CompanyExportRow {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            domain: company.domain.clone(),
            website: company.website.clone(),
            industry: company.industry.clone(),
            employee_range: company.employee_range.clone(),
            revenue_range: company.revenue_range.clone(),
            description: company.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersonExportRow {
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<String>,
    pub phone: Option<String>,
    pub phone_line_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub linkedin_url: Option<String>,
}

impl PersonExportRow {
    fn from_person(person: &Person, company_names: &HashMap<i32, String>) -> Self {
        Self {
            name: person.name.clone(),
            title: person.title.clone(),
            company: person
                .company_id
                .and_then(|id| company_names.get(&id).cloned()),
            email: person.email.clone(),
            email_status: person.email_status.as_ref().map(ToString::to_string),
            phone: person.phone.clone(),
            phone_line_type: person.phone_line_type.clone(),
            city: person.city.clone(),
            state: person.state.clone(),
            linkedin_url: person.linkedin_url.clone(),
        }
    }
}

/// Writes every live company of the workspace; returns the record count.
pub fn export_companies<R, W>(
    repo: &R,
    workspace: &Workspace,
    format: ExportFormat,
    writer: W,
) -> ServiceResult<usize>
where
    R: CompanyReader + ?Sized,
    W: Write,
{
    let (_, companies) = repo.list_companies(CompanyListQuery::new(workspace.id))?;
    let rows: Vec<CompanyExportRow> = companies.iter().map(Into::into).collect();
    write_rows(&rows, format, writer)?;
    Ok(rows.len())
}

/// Writes every live person of the workspace; returns the record count.
pub fn export_people<R, W>(
    repo: &R,
    workspace: &Workspace,
    format: ExportFormat,
    writer: W,
) -> ServiceResult<usize>
where
    R: PersonReader + CompanyReader + ?Sized,
    W: Write,
{
    let (_, companies) = repo.list_companies(CompanyListQuery::new(workspace.id))?;
    let company_names: HashMap<i32, String> = companies
        .into_iter()
        .map(|company| (company.id, company.name))
        .collect();

    let (_, people) = repo.list_people(PersonListQuery::new(workspace.id))?;
    let rows: Vec<PersonExportRow> = people
        .iter()
        .map(|person| PersonExportRow::from_person(person, &company_names))
        .collect();
    write_rows(&rows, format, writer)?;
    Ok(rows.len())
}

fn write_rows<T: Serialize, W: Write>(
    rows: &[T],
    format: ExportFormat,
    mut writer: W,
) -> ServiceResult<()> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
