use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::company::{
    Company as DomainCompany, CompanyPatch as DomainCompanyPatch, NewCompany as DomainNewCompany,
};
use crate::models::workspace::Workspace;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Workspace, foreign_key = workspace_id))]
#[diesel(table_name = crate::schema::companies)]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: i32,
    pub workspace_id: i32,
    pub name: String,
    pub domain: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub employee_range: Option<String>,
    pub revenue_range: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    pub workspace_id: i32,
    pub name: &'a str,
    pub domain: Option<&'a str>,
    pub website: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub employee_range: Option<&'a str>,
    pub revenue_range: Option<&'a str>,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::companies)]
/// Partial update: `None` fields are left untouched by Diesel.
pub struct CompanyPatch {
    pub domain: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub employee_range: Option<String>,
    pub revenue_range: Option<String>,
    pub description: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<Company> for DomainCompany {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            workspace_id: company.workspace_id,
            name: company.name,
            domain: company.domain,
            website: company.website,
            industry: company.industry,
            employee_range: company.employee_range,
            revenue_range: company.revenue_range,
            description: company.description,
            created_at: company.created_at,
            updated_at: company.updated_at,
            deleted_at: company.deleted_at,
        }
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(company: &'a DomainNewCompany) -> Self {
        Self {
            workspace_id: company.workspace_id,
            name: company.name.as_str(),
            domain: company.domain.as_deref(),
            website: company.website.as_deref(),
            industry: company.industry.as_deref(),
            employee_range: company.employee_range.as_deref(),
            revenue_range: company.revenue_range.as_deref(),
            description: company.description.as_deref(),
        }
    }
}

impl From<&DomainCompanyPatch> for CompanyPatch {
    fn from(patch: &DomainCompanyPatch) -> Self {
        Self {
            domain: patch.domain.clone(),
            website: patch.website.clone(),
            industry: patch.industry.clone(),
            employee_range: patch.employee_range.clone(),
            revenue_range: patch.revenue_range.clone(),
            description: patch.description.clone(),
            updated_at: None,
        }
    }
}
