//! Repository implementation for companies, including the dedup merge.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::company::{Company, CompanyPatch, NewCompany},
    models::company::{Company as DbCompany, CompanyPatch as DbCompanyPatch, NewCompany as DbNewCompany},
    repository::{
        CompanyListQuery, CompanyReader, CompanyWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

diesel::define_sql_function! {
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

impl CompanyReader for DieselRepository {
    fn get_company_by_id(&self, id: i32) -> RepositoryResult<Option<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let company = companies::table
            .find(id)
            .first::<DbCompany>(&mut conn)
            .optional()?;

        Ok(company.map(Into::into))
    }

    fn find_company_by_domain(
        &self,
        workspace_id: i32,
        domain: &str,
    ) -> RepositoryResult<Option<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let company = companies::table
            .filter(companies::workspace_id.eq(workspace_id))
            .filter(companies::domain.eq(domain))
            .filter(companies::deleted_at.is_null())
            .order(companies::id.asc())
            .first::<DbCompany>(&mut conn)
            .optional()?;

        Ok(company.map(Into::into))
    }

    fn find_company_by_name(
        &self,
        workspace_id: i32,
        name: &str,
    ) -> RepositoryResult<Option<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let company = companies::table
            .filter(companies::workspace_id.eq(workspace_id))
            .filter(lower(companies::name).eq(name.trim().to_lowercase()))
            .filter(companies::deleted_at.is_null())
            .order(companies::id.asc())
            .first::<DbCompany>(&mut conn)
            .optional()?;

        Ok(company.map(Into::into))
    }

    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)> {
        use crate::schema::companies;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = companies::table
                .filter(companies::workspace_id.eq(query.workspace_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if !query.include_deleted {
                items = items.filter(companies::deleted_at.is_null());
            }
            if query.missing_industry {
                items = items.filter(companies::industry.is_null());
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let companies = items
            .order(companies::id.asc())
            .load::<DbCompany>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total, companies))
    }
}

impl CompanyWriter for DieselRepository {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_new: DbNewCompany = new_company.into();
        let company = diesel::insert_into(companies::table)
            .values(&db_new)
            .get_result::<DbCompany>(&mut conn)?;

        Ok(company.into())
    }

    fn patch_company(&self, company_id: i32, patch: &CompanyPatch) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let mut db_patch: DbCompanyPatch = patch.into();
        db_patch.updated_at = Some(Utc::now().naive_utc());

        let updated = diesel::update(companies::table.find(company_id))
            .set(&db_patch)
            .get_result::<DbCompany>(&mut conn)?;

        Ok(updated.into())
    }

    fn merge_companies(
        &self,
        keep_id: i32,
        drop_ids: &[i32],
        fill: &CompanyPatch,
    ) -> RepositoryResult<usize> {
        use crate::schema::{buyer_group_members, companies, people};

        if drop_ids.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            if !fill.is_empty() {
                let mut db_patch: DbCompanyPatch = fill.into();
                db_patch.updated_at = Some(now);
                diesel::update(companies::table.find(keep_id))
                    .set(&db_patch)
                    .execute(conn)?;
            }

            diesel::update(people::table.filter(people::company_id.eq_any(drop_ids)))
                .set(people::company_id.eq(keep_id))
                .execute(conn)?;

            // Buyer-group rows are unique on (company, person): drop the
            // loser rows whose person is already in the keeper's group, then
            // repoint the rest.
            let keep_people: Vec<i32> = buyer_group_members::table
                .filter(buyer_group_members::company_id.eq(keep_id))
                .select(buyer_group_members::person_id)
                .load::<i32>(conn)?;

            diesel::delete(
                buyer_group_members::table
                    .filter(buyer_group_members::company_id.eq_any(drop_ids))
                    .filter(buyer_group_members::person_id.eq_any(&keep_people)),
            )
            .execute(conn)?;

            diesel::update(
                buyer_group_members::table
                    .filter(buyer_group_members::company_id.eq_any(drop_ids)),
            )
            .set(buyer_group_members::company_id.eq(keep_id))
            .execute(conn)?;

            let deleted = diesel::update(
                companies::table
                    .filter(companies::id.eq_any(drop_ids))
                    .filter(companies::deleted_at.is_null()),
            )
            .set((
                companies::deleted_at.eq(now),
                companies::updated_at.eq(now),
            ))
            .execute(conn)?;

            Ok(deleted)
        })
    }
}
