//! Outbound email records. The toolkit never talks SMTP itself; messages are
//! written here and handed to the platform's delivery endpoint, so every send
//! attempt leaves an auditable row.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{EmailAddress, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmailKind {
    Invitation,
    Notification,
    Other(String),
}

impl Display for EmailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailKind::Invitation => write!(f, "invitation"),
            EmailKind::Notification => write!(f, "notification"),
            EmailKind::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for EmailKind {
    fn from(s: &str) -> Self {
        match s {
            "invitation" => EmailKind::Invitation,
            "notification" => EmailKind::Notification,
            _ => EmailKind::Other(s.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStatus::Pending => write!(f, "pending"),
            DeliveryStatus::Sent => write!(f, "sent"),
            DeliveryStatus::Failed => write!(f, "failed"),
        }
    }
}

impl From<&str> for DeliveryStatus {
    fn from(s: &str) -> Self {
        match s {
            "sent" => DeliveryStatus::Sent,
            "failed" => DeliveryStatus::Failed,
            _ => DeliveryStatus::Pending,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmailMessage {
    pub id: i32,
    pub workspace_id: i32,
    pub person_id: Option<i32>,
    pub recipient: String,
    pub kind: EmailKind,
    pub subject: String,
    pub body: String,
    pub status: DeliveryStatus,
    pub sent_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewEmailMessage {
    pub workspace_id: i32,
    pub person_id: Option<i32>,
    pub recipient: String,
    pub kind: EmailKind,
    pub subject: String,
    pub body: String,
}

impl NewEmailMessage {
    /// Builds an invitation message for a recipient. The body carries a
    /// freshly generated single-use token the platform resolves on signup.
    pub fn invitation(
        workspace_id: i32,
        workspace_name: &str,
        recipient_name: &str,
        recipient: &str,
    ) -> Result<Self, TypeConstraintError> {
        let recipient = EmailAddress::new(recipient)?;
        let token = Uuid::new_v4();
        Ok(Self {
            workspace_id,
            person_id: None,
            recipient: recipient.into_inner(),
            kind: EmailKind::Invitation,
            subject: format!("You have been invited to {workspace_name}"),
            body: format!(
                "Hi {recipient_name},\n\n\
                 You have been invited to join the {workspace_name} workspace.\n\
                 Use the token below to activate your account:\n\n\
                 {token}\n"
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_normalizes_recipient_and_embeds_token() {
        let msg = NewEmailMessage::invitation(1, "Adrata", "Dano", "Dano@Adrata.com").unwrap();
        assert_eq!(msg.recipient, "dano@adrata.com");
        assert_eq!(msg.kind, EmailKind::Invitation);
        assert!(msg.subject.contains("Adrata"));
        // Token is a parseable v4 UUID on its own line.
        let token_line = msg.body.lines().rev().find(|l| !l.is_empty()).unwrap();
        assert!(Uuid::parse_str(token_line.trim()).is_ok());
    }
}
