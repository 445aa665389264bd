use diesel::prelude::*;

use crate::{
    domain::lead::{Lead, NewLead},
    models::lead::{Lead as DbLead, NewLead as DbNewLead},
    repository::{DieselRepository, LeadReader, LeadWriter, errors::RepositoryResult},
};

impl LeadReader for DieselRepository {
    fn find_lead_by_person(&self, person_id: i32) -> RepositoryResult<Option<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let lead = leads::table
            .filter(leads::person_id.eq(person_id))
            .filter(leads::deleted_at.is_null())
            .order(leads::id.asc())
            .first::<DbLead>(&mut conn)
            .optional()?;

        Ok(lead.map(Into::into))
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let db_new: DbNewLead = new_lead.into();
        let lead = diesel::insert_into(leads::table)
            .values(&db_new)
            .get_result::<DbLead>(&mut conn)?;

        Ok(lead.into())
    }
}
