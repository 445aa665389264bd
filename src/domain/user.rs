use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, PersonName, TypeConstraintError};

/// A workspace member account. Invitation runs stamp `invited_at`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
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

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    pub workspace_id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl NewUser {
    pub fn new(workspace_id: i32, name: &str, email: &str) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            workspace_id,
            name: PersonName::new(name)?.into_inner(),
            email: EmailAddress::new(email)?.into_inner(),
            role: "member".to_string(),
        })
    }
}
