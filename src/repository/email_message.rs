use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::email_message::{DeliveryStatus, EmailMessage, NewEmailMessage},
    models::email_message::{EmailMessage as DbEmailMessage, NewEmailMessage as DbNewEmailMessage},
    repository::{
        DieselRepository, EmailMessageReader, EmailMessageWriter, errors::RepositoryResult,
    },
};

impl EmailMessageReader for DieselRepository {
    fn list_email_messages(&self, workspace_id: i32) -> RepositoryResult<Vec<EmailMessage>> {
        use crate::schema::email_messages;

        let mut conn = self.conn()?;
        let items = email_messages::table
            .filter(email_messages::workspace_id.eq(workspace_id))
            .order(email_messages::id.asc())
            .load::<DbEmailMessage>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }
}

impl EmailMessageWriter for DieselRepository {
    fn create_email_message(&self, message: &NewEmailMessage) -> RepositoryResult<EmailMessage> {
        use crate::schema::email_messages;

        let mut conn = self.conn()?;
        let db_new: DbNewEmailMessage = message.into();
        let created = diesel::insert_into(email_messages::table)
            .values(&db_new)
            .get_result::<DbEmailMessage>(&mut conn)?;

        Ok(created.into())
    }

    fn mark_email_sent(&self, message_id: i32) -> RepositoryResult<()> {
        use crate::schema::email_messages;

        let mut conn = self.conn()?;
        diesel::update(email_messages::table.find(message_id))
            .set((
                email_messages::status.eq(DeliveryStatus::Sent.to_string()),
                email_messages::sent_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn mark_email_failed(&self, message_id: i32) -> RepositoryResult<()> {
        use crate::schema::email_messages;

        let mut conn = self.conn()?;
        diesel::update(email_messages::table.find(message_id))
            .set(email_messages::status.eq(DeliveryStatus::Failed.to_string()))
            .execute(&mut conn)?;

        Ok(())
    }
}
