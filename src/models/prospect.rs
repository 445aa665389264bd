use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::prospect::{
    NewProspect as DomainNewProspect, Prospect as DomainProspect, ProspectStage,
};
use crate::models::person::Person;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Person, foreign_key = person_id))]
#[diesel(table_name = crate::schema::prospects)]
pub struct Prospect {
    pub id: i32,
    pub workspace_id: i32,
    pub person_id: i32,
    pub stage: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::prospects)]
pub struct NewProspect {
    pub workspace_id: i32,
    pub person_id: i32,
    pub stage: String,
}

impl From<Prospect> for DomainProspect {
    fn from(prospect: Prospect) -> Self {
        Self {
            id: prospect.id,
            workspace_id: prospect.workspace_id,
            person_id: prospect.person_id,
            stage: ProspectStage::from(prospect.stage.as_str()),
            created_at: prospect.created_at,
            updated_at: prospect.updated_at,
            deleted_at: prospect.deleted_at,
        }
    }
}

impl From<&DomainNewProspect> for NewProspect {
    fn from(prospect: &DomainNewProspect) -> Self {
        Self {
            workspace_id: prospect.workspace_id,
            person_id: prospect.person_id,
            stage: prospect.stage.to_string(),
        }
    }
}
