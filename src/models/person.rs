use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::person::{
    EmailStatus, NewPerson as DomainNewPerson, Person as DomainPerson,
    PersonPatch as DomainPersonPatch,
};
use crate::models::company::Company;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Company, foreign_key = company_id))]
#[diesel(table_name = crate::schema::people)]
/// Diesel model for [`crate::domain::person::Person`]. The email status is
/// stored as plain text and parsed on the way out.
pub struct Person {
    pub id: i32,
    pub workspace_id: i32,
    pub company_id: Option<i32>,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<String>,
    pub phone: Option<String>,
    pub phone_line_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::people)]
/// Insertable form of [`Person`].
pub struct NewPerson<'a> {
    pub workspace_id: i32,
    pub company_id: Option<i32>,
    pub name: &'a str,
    pub title: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub linkedin_url: Option<&'a str>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::people)]
/// Partial update: `None` fields are left untouched by Diesel.
pub struct PersonPatch {
    pub company_id: Option<i32>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<String>,
    pub phone: Option<String>,
    pub phone_line_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub linkedin_url: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<Person> for DomainPerson {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            workspace_id: person.workspace_id,
            company_id: person.company_id,
            name: person.name,
            title: person.title,
            email: person.email,
            email_status: person.email_status.as_deref().map(EmailStatus::from),
            phone: person.phone,
            phone_line_type: person.phone_line_type,
            city: person.city,
            state: person.state,
            linkedin_url: person.linkedin_url,
            created_at: person.created_at,
            updated_at: person.updated_at,
            deleted_at: person.deleted_at,
        }
    }
}

impl<'a> From<&'a DomainNewPerson> for NewPerson<'a> {
    fn from(person: &'a DomainNewPerson) -> Self {
        Self {
            workspace_id: person.workspace_id,
            company_id: person.company_id,
            name: person.name.as_str(),
            title: person.title.as_deref(),
            email: person.email.as_deref(),
            phone: person.phone.as_deref(),
            city: person.city.as_deref(),
            state: person.state.as_deref(),
            linkedin_url: person.linkedin_url.as_deref(),
        }
    }
}

impl From<&DomainPersonPatch> for PersonPatch {
    fn from(patch: &DomainPersonPatch) -> Self {
        Self {
            company_id: patch.company_id,
            title: patch.title.clone(),
            email: patch.email.clone(),
            email_status: patch.email_status.as_ref().map(ToString::to_string),
            phone: patch.phone.clone(),
            phone_line_type: patch.phone_line_type.clone(),
            city: patch.city.clone(),
            state: patch.state.clone(),
            linkedin_url: patch.linkedin_url.clone(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn person_into_domain_parses_email_status() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_person = Person {
            id: 1,
            workspace_id: 2,
            company_id: Some(3),
            name: "Jane Doe".into(),
            title: Some("CTO".into()),
            email: Some("jane@acme.com".into()),
            email_status: Some("catch-all".into()),
            phone: None,
            phone_line_type: None,
            city: None,
            state: None,
            linkedin_url: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let domain: DomainPerson = db_person.into();
        assert_eq!(domain.email_status, Some(EmailStatus::CatchAll));
        assert_eq!(domain.company_id, Some(3));
    }

    #[test]
    fn patch_serializes_email_status_as_text() {
        let domain_patch = DomainPersonPatch {
            email: Some("jane@acme.com".into()),
            email_status: Some(EmailStatus::Valid),
            ..DomainPersonPatch::default()
        };
        let patch: PersonPatch = (&domain_patch).into();
        assert_eq!(patch.email_status.as_deref(), Some("valid"));
        assert_eq!(patch.title, None);
    }
}
