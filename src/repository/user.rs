//! Repository implementation for workspace users.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::user::{NewUser, User},
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::{
        DieselRepository, UserListQuery, UserReader, UserWriter, errors::RepositoryResult,
    },
};

impl UserReader for DieselRepository {
    fn get_user_by_email(&self, workspace_id: i32, email: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::workspace_id.eq(workspace_id))
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let mut items = users::table
            .filter(users::workspace_id.eq(query.workspace_id))
            .into_boxed();

        if query.uninvited_only {
            items = items.filter(users::invited_at.is_null());
        }

        let users = items
            .order(users::id.asc())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(users)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new: DbNewUser = new_user.into();
        let user = diesel::insert_into(users::table)
            .values(&db_new)
            .get_result::<DbUser>(&mut conn)?;

        Ok(user.into())
    }

    fn mark_user_invited(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        diesel::update(users::table.find(user_id))
            .set((users::invited_at.eq(now), users::updated_at.eq(now)))
            .execute(&mut conn)?;

        Ok(())
    }
}
