use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::workspace::{
    NewWorkspace as DomainNewWorkspace, Workspace as DomainWorkspace,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::workspaces)]
/// Diesel model for [`crate::domain::workspace::Workspace`].
pub struct Workspace {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::workspaces)]
pub struct NewWorkspace<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

impl From<Workspace> for DomainWorkspace {
    fn from(workspace: Workspace) -> Self {
        Self {
            id: workspace.id,
            name: workspace.name,
            slug: workspace.slug,
            created_at: workspace.created_at,
            updated_at: workspace.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewWorkspace> for NewWorkspace<'a> {
    fn from(workspace: &'a DomainNewWorkspace) -> Self {
        Self {
            name: workspace.name.as_str(),
            slug: workspace.slug.as_str(),
        }
    }
}
