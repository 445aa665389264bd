//! Repository implementation for people, including the dedup merge.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::person::{NewPerson, Person, PersonPatch},
    models::person::{NewPerson as DbNewPerson, Person as DbPerson, PersonPatch as DbPersonPatch},
    repository::{
        DieselRepository, PersonListQuery, PersonReader, PersonWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

diesel::define_sql_function! {
    #[sql_name = "lower"]
    fn lower_text(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

impl PersonReader for DieselRepository {
    fn get_person_by_id(&self, id: i32) -> RepositoryResult<Option<Person>> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let person = people::table
            .find(id)
            .first::<DbPerson>(&mut conn)
            .optional()?;

        Ok(person.map(Into::into))
    }

    fn find_person_by_email(
        &self,
        workspace_id: i32,
        email: &str,
    ) -> RepositoryResult<Option<Person>> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let person = people::table
            .filter(people::workspace_id.eq(workspace_id))
            .filter(people::email.eq(email.trim().to_lowercase()))
            .filter(people::deleted_at.is_null())
            .order(people::id.asc())
            .first::<DbPerson>(&mut conn)
            .optional()?;

        Ok(person.map(Into::into))
    }

    fn find_person_by_name_and_company(
        &self,
        workspace_id: i32,
        name: &str,
        company_id: Option<i32>,
    ) -> RepositoryResult<Option<Person>> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let mut query = people::table
            .filter(people::workspace_id.eq(workspace_id))
            .filter(lower_text(people::name).eq(name.trim().to_lowercase()))
            .filter(people::deleted_at.is_null())
            .into_boxed();

        query = match company_id {
            Some(id) => query.filter(people::company_id.eq(id)),
            None => query.filter(people::company_id.is_null()),
        };

        let person = query
            .order(people::id.asc())
            .first::<DbPerson>(&mut conn)
            .optional()?;

        Ok(person.map(Into::into))
    }

    fn list_people(&self, query: PersonListQuery) -> RepositoryResult<(usize, Vec<Person>)> {
        use crate::schema::people;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = people::table
                .filter(people::workspace_id.eq(query.workspace_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if !query.include_deleted {
                items = items.filter(people::deleted_at.is_null());
            }
            if let Some(company_id) = query.company_id {
                items = items.filter(people::company_id.eq(company_id));
            }
            if query.missing_email {
                items = items.filter(people::email.is_null());
            }
            if query.with_title {
                items = items.filter(people::title.is_not_null());
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let people = items
            .order(people::id.asc())
            .load::<DbPerson>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total, people))
    }
}

impl PersonWriter for DieselRepository {
    fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let db_new: DbNewPerson = new_person.into();
        let person = diesel::insert_into(people::table)
            .values(&db_new)
            .get_result::<DbPerson>(&mut conn)?;

        Ok(person.into())
    }

    fn patch_person(&self, person_id: i32, patch: &PersonPatch) -> RepositoryResult<Person> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let mut db_patch: DbPersonPatch = patch.into();
        db_patch.updated_at = Some(Utc::now().naive_utc());

        let updated = diesel::update(people::table.find(person_id))
            .set(&db_patch)
            .get_result::<DbPerson>(&mut conn)?;

        Ok(updated.into())
    }

    fn merge_people(
        &self,
        keep_id: i32,
        drop_ids: &[i32],
        fill: &PersonPatch,
    ) -> RepositoryResult<usize> {
        use crate::schema::{buyer_group_members, email_messages, leads, people, prospects};

        if drop_ids.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            {
                let mut db_patch: DbPersonPatch = fill.into();
                db_patch.updated_at = Some(now);
                diesel::update(people::table.find(keep_id))
                    .set(&db_patch)
                    .execute(conn)?;
            }

            diesel::update(leads::table.filter(leads::person_id.eq_any(drop_ids)))
                .set(leads::person_id.eq(keep_id))
                .execute(conn)?;

            diesel::update(prospects::table.filter(prospects::person_id.eq_any(drop_ids)))
                .set(prospects::person_id.eq(keep_id))
                .execute(conn)?;

            diesel::update(
                email_messages::table.filter(email_messages::person_id.eq_any(drop_ids)),
            )
            .set(email_messages::person_id.eq(keep_id))
            .execute(conn)?;

            // Buyer-group rows are unique on (company, person): drop the
            // loser rows whose company already holds the keeper, then
            // repoint the rest.
            let keep_companies: Vec<i32> = buyer_group_members::table
                .filter(buyer_group_members::person_id.eq(keep_id))
                .select(buyer_group_members::company_id)
                .load::<i32>(conn)?;

            diesel::delete(
                buyer_group_members::table
                    .filter(buyer_group_members::person_id.eq_any(drop_ids))
                    .filter(buyer_group_members::company_id.eq_any(&keep_companies)),
            )
            .execute(conn)?;

            diesel::update(
                buyer_group_members::table
                    .filter(buyer_group_members::person_id.eq_any(drop_ids)),
            )
            .set(buyer_group_members::person_id.eq(keep_id))
            .execute(conn)?;

            let deleted = diesel::update(
                people::table
                    .filter(people::id.eq_any(drop_ids))
                    .filter(people::deleted_at.is_null()),
            )
            .set((people::deleted_at.eq(now), people::updated_at.eq(now)))
            .execute(conn)?;

            Ok(deleted)
        })
    }
}
