use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::buyer_group::{
    BuyerGroupMember as DomainBuyerGroupMember, BuyerRole,
    NewBuyerGroupMember as DomainNewBuyerGroupMember,
};
use crate::domain::types::TypeConstraintError;
use crate::models::company::Company;
use crate::models::person::Person;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Company, foreign_key = company_id))]
#[diesel(belongs_to(Person, foreign_key = person_id))]
#[diesel(table_name = crate::schema::buyer_group_members)]
pub struct BuyerGroupMember {
    pub id: i32,
    pub workspace_id: i32,
    pub company_id: i32,
    pub person_id: i32,
    pub role: String,
    pub influence: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::buyer_group_members)]
pub struct NewBuyerGroupMember {
    pub workspace_id: i32,
    pub company_id: i32,
    pub person_id: i32,
    pub role: String,
    pub influence: f64,
}

impl TryFrom<BuyerGroupMember> for DomainBuyerGroupMember {
    type Error = TypeConstraintError;

    fn try_from(member: BuyerGroupMember) -> Result<Self, Self::Error> {
        let role = BuyerRole::try_from(member.role.as_str())
            .map_err(TypeConstraintError::InvalidValue)?;
        Ok(Self {
            id: member.id,
            workspace_id: member.workspace_id,
            company_id: member.company_id,
            person_id: member.person_id,
            role,
            influence: member.influence,
            created_at: member.created_at,
            updated_at: member.updated_at,
        })
    }
}

impl From<&DomainNewBuyerGroupMember> for NewBuyerGroupMember {
    fn from(member: &DomainNewBuyerGroupMember) -> Self {
        Self {
            workspace_id: member.workspace_id,
            company_id: member.company_id,
            person_id: member.person_id,
            role: member.role.to_string(),
            influence: member.influence,
        }
    }
}
