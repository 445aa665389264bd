use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};
use crate::models::workspace::Workspace;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Workspace, foreign_key = workspace_id))]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub workspace_id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub invited_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub workspace_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

impl From<User> for DomainUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            workspace_id: user.workspace_id,
            name: user.name,
            email: user.email,
            role: user.role,
            invited_at: user.invited_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            workspace_id: user.workspace_id,
            name: user.name.as_str(),
            email: user.email.as_str(),
            role: user.role.as_str(),
        }
    }
}
