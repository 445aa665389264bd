use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{Lead as DomainLead, LeadStatus, NewLead as DomainNewLead};
use crate::models::person::Person;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Person, foreign_key = person_id))]
#[diesel(table_name = crate::schema::leads)]
pub struct Lead {
    pub id: i32,
    pub workspace_id: i32,
    pub person_id: i32,
    pub status: String,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
pub struct NewLead<'a> {
    pub workspace_id: i32,
    pub person_id: i32,
    pub status: String,
    pub source: Option<&'a str>,
}

impl From<Lead> for DomainLead {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            workspace_id: lead.workspace_id,
            person_id: lead.person_id,
            status: LeadStatus::from(lead.status.as_str()),
            source: lead.source,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
            deleted_at: lead.deleted_at,
        }
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        Self {
            workspace_id: lead.workspace_id,
            person_id: lead.person_id,
            status: lead.status.to_string(),
            source: lead.source.as_deref(),
        }
    }
}
