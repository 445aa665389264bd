use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::email_message::{
    DeliveryStatus, EmailKind, EmailMessage as DomainEmailMessage,
    NewEmailMessage as DomainNewEmailMessage,
};
use crate::models::person::Person;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Person, foreign_key = person_id))]
#[diesel(table_name = crate::schema::email_messages)]
pub struct EmailMessage {
    pub id: i32,
    pub workspace_id: i32,
    pub person_id: Option<i32>,
    pub recipient: String,
    pub kind: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub sent_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::email_messages)]
pub struct NewEmailMessage<'a> {
    pub workspace_id: i32,
    pub person_id: Option<i32>,
    pub recipient: &'a str,
    pub kind: String,
    pub subject: &'a str,
    pub body: &'a str,
    pub status: String,
}

impl From<EmailMessage> for DomainEmailMessage {
    fn from(message: EmailMessage) -> Self {
        Self {
            id: message.id,
            workspace_id: message.workspace_id,
            person_id: message.person_id,
            recipient: message.recipient,
            kind: EmailKind::from(message.kind.as_str()),
            subject: message.subject,
            body: message.body,
            status: DeliveryStatus::from(message.status.as_str()),
            sent_at: message.sent_at,
            created_at: message.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewEmailMessage> for NewEmailMessage<'a> {
    fn from(message: &'a DomainNewEmailMessage) -> Self {
        Self {
            workspace_id: message.workspace_id,
            person_id: message.person_id,
            recipient: message.recipient.as_str(),
            kind: message.kind.to_string(),
            subject: message.subject.as_str(),
            body: message.body.as_str(),
            status: DeliveryStatus::Pending.to_string(),
        }
    }
}
