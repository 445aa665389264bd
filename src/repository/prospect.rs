use diesel::prelude::*;

use crate::{
    domain::prospect::{NewProspect, Prospect},
    models::prospect::{NewProspect as DbNewProspect, Prospect as DbProspect},
    repository::{DieselRepository, ProspectReader, ProspectWriter, errors::RepositoryResult},
};

impl ProspectReader for DieselRepository {
    fn find_prospect_by_person(&self, person_id: i32) -> RepositoryResult<Option<Prospect>> {
        use crate::schema::prospects;

        let mut conn = self.conn()?;
        let prospect = prospects::table
            .filter(prospects::person_id.eq(person_id))
            .filter(prospects::deleted_at.is_null())
            .order(prospects::id.asc())
            .first::<DbProspect>(&mut conn)
            .optional()?;

        Ok(prospect.map(Into::into))
    }
}

impl ProspectWriter for DieselRepository {
    fn create_prospect(&self, new_prospect: &NewProspect) -> RepositoryResult<Prospect> {
        use crate::schema::prospects;

        let mut conn = self.conn()?;
        let db_new: DbNewProspect = new_prospect.into();
        let prospect = diesel::insert_into(prospects::table)
            .values(&db_new)
            .get_result::<DbProspect>(&mut conn)?;

        Ok(prospect.into())
    }
}
