//! Repository implementation for buyer-group membership.

use chrono::Utc;
use diesel::{prelude::*, upsert::excluded};

use crate::{
    domain::buyer_group::{BuyerGroupMember, NewBuyerGroupMember},
    models::buyer_group::{
        BuyerGroupMember as DbBuyerGroupMember, NewBuyerGroupMember as DbNewBuyerGroupMember,
    },
    repository::{
        BuyerGroupReader, BuyerGroupWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl BuyerGroupReader for DieselRepository {
    fn list_buyer_group_members(
        &self,
        company_id: i32,
    ) -> RepositoryResult<Vec<BuyerGroupMember>> {
        use crate::schema::buyer_group_members;

        let mut conn = self.conn()?;
        let rows = buyer_group_members::table
            .filter(buyer_group_members::company_id.eq(company_id))
            .order(buyer_group_members::influence.desc())
            .load::<DbBuyerGroupMember>(&mut conn)?;

        rows.into_iter()
            .map(|row| BuyerGroupMember::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl BuyerGroupWriter for DieselRepository {
    fn upsert_buyer_group_member(
        &self,
        member: &NewBuyerGroupMember,
    ) -> RepositoryResult<BuyerGroupMember> {
        use crate::schema::buyer_group_members;

        let mut conn = self.conn()?;
        let db_new: DbNewBuyerGroupMember = member.into();

        let row = diesel::insert_into(buyer_group_members::table)
            .values(&db_new)
            .on_conflict((
                buyer_group_members::company_id,
                buyer_group_members::person_id,
            ))
            .do_update()
            .set((
                buyer_group_members::role.eq(excluded(buyer_group_members::role)),
                buyer_group_members::influence.eq(excluded(buyer_group_members::influence)),
                buyer_group_members::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbBuyerGroupMember>(&mut conn)?;

        BuyerGroupMember::try_from(row).map_err(RepositoryError::from)
    }
}
