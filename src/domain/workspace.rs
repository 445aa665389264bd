use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{NonEmptyString, TypeConstraintError, WorkspaceSlug};

/// A tenant partition. Every other record in the schema hangs off one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewWorkspace {
    pub name: String,
    pub slug: String,
}

impl NewWorkspace {
    pub fn new(name: &str, slug: &str) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: NonEmptyString::new(name)?.into_inner(),
            slug: WorkspaceSlug::new(slug)?.into_inner(),
        })
    }
}
