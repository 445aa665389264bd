//! Repository implementation for workspaces.

use diesel::prelude::*;

use crate::{
    domain::workspace::{NewWorkspace, Workspace},
    models::workspace::{NewWorkspace as DbNewWorkspace, Workspace as DbWorkspace},
    repository::{DieselRepository, WorkspaceReader, WorkspaceWriter, errors::RepositoryResult},
};

impl WorkspaceReader for DieselRepository {
    fn get_workspace_by_slug(&self, slug: &str) -> RepositoryResult<Option<Workspace>> {
        use crate::schema::workspaces;

        let mut conn = self.conn()?;
        let workspace = workspaces::table
            .filter(workspaces::slug.eq(slug))
            .first::<DbWorkspace>(&mut conn)
            .optional()?;

        Ok(workspace.map(Into::into))
    }

    fn list_workspaces(&self) -> RepositoryResult<Vec<Workspace>> {
        use crate::schema::workspaces;

        let mut conn = self.conn()?;
        let items = workspaces::table
            .order(workspaces::slug.asc())
            .load::<DbWorkspace>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl WorkspaceWriter for DieselRepository {
    fn create_workspace(&self, new_workspace: &NewWorkspace) -> RepositoryResult<Workspace> {
        use crate::schema::workspaces;

        let mut conn = self.conn()?;
        let db_new: DbNewWorkspace = new_workspace.into();
        let workspace = diesel::insert_into(workspaces::table)
            .values(&db_new)
            .get_result::<DbWorkspace>(&mut conn)?;

        Ok(workspace.into())
    }
}
