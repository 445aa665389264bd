//! User invitation sending.
//!
//! Recipients come from a CSV file (`name,email`) or default to workspace
//! users that were never invited. Each invitation is recorded in
//! `email_messages` and delivered through the platform's invitation
//! endpoint; the row is marked sent or failed and successful sends stamp
//! `users.invited_at`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::json;

use crate::domain::email_message::NewEmailMessage;
use crate::domain::user::{NewUser, User};
use crate::domain::workspace::Workspace;
use crate::repository::{EmailMessageWriter, UserListQuery, UserReader, UserWriter};
use crate::services::{RunSummary, ServiceError, ServiceResult};
use crate::vendors::VendorError;

#[derive(Debug, Clone, Default)]
pub struct InviteOptions {
    /// CSV file with `name,email` columns; defaults to uninvited users.
    pub file: Option<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct RecipientRow {
    name: String,
    email: String,
}

/// HTTP client for the platform's invitation endpoint.
pub struct InvitationSender {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl InvitationSender {
    pub fn new(base_url: String, token: String) -> Self {
        Self::with_client(reqwest::blocking::Client::new(), base_url, token)
    }

    pub fn with_client(
        client: reqwest::blocking::Client,
        base_url: String,
        token: String,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// `POST /api/v1/workspaces/{slug}/invitations`.
    pub fn send(
        &self,
        workspace_slug: &str,
        recipient_email: &str,
        recipient_name: &str,
        body: &str,
    ) -> Result<(), VendorError> {
        let response = self
            .client
            .post(format!(
                "{}/api/v1/workspaces/{workspace_slug}/invitations",
                self.base_url
            ))
            .bearer_auth(&self.token)
            .json(&json!({
                "email": recipient_email,
                "name": recipient_name,
                "message": body,
            }))
            .send()?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(VendorError::Api {
                vendor: "platform",
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }
}

pub fn invite_users<R>(
    repo: &R,
    sender: Option<&InvitationSender>,
    workspace: &Workspace,
    options: &InviteOptions,
) -> ServiceResult<RunSummary>
where
    R: UserReader + UserWriter + EmailMessageWriter + ?Sized,
{
    if sender.is_none() && !options.dry_run {
        return Err(ServiceError::InvalidInput(
            "api_base_url and api_token must be configured to send invitations".to_string(),
        ));
    }

    // Dry runs must not write, and the file path find-or-creates user rows,
    // so report straight off the parsed file instead.
    if options.dry_run {
        if let Some(path) = &options.file {
            let mut summary = RunSummary::default();
            let mut reader = csv::Reader::from_path(path)?;
            for result in reader.deserialize::<RecipientRow>() {
                let row = result?;
                log::info!("[dry-run] would invite '{}'", row.email);
                summary.record_skipped();
            }
            return Ok(summary);
        }
    }

    let recipients = match &options.file {
        Some(path) => recipients_from_file(repo, workspace, path)?,
        None => repo.list_users(UserListQuery::new(workspace.id).uninvited_only())?,
    };

    let mut summary = RunSummary::default();

    for user in recipients {
        if user.invited_at.is_some() {
            log::info!("'{}' was already invited; skipping", user.email);
            summary.record_skipped();
            continue;
        }

        let message =
            match NewEmailMessage::invitation(workspace.id, &workspace.name, &user.name, &user.email)
            {
                Ok(message) => message,
                Err(err) => {
                    log::error!("Invalid recipient '{}': {err}", user.email);
                    summary.record_failed();
                    continue;
                }
            };

        if options.dry_run {
            log::info!("[dry-run] would invite '{}'", user.email);
            summary.record_skipped();
            continue;
        }

        let record = match repo.create_email_message(&message) {
            Ok(record) => record,
            Err(err) => {
                log::error!("Failed to record invitation for '{}': {err}", user.email);
                summary.record_failed();
                continue;
            }
        };

        // Checked above: sender is always present outside dry-run.
        let Some(sender) = sender else { break };
        match sender.send(&workspace.slug, &record.recipient, &user.name, &record.body) {
            Ok(()) => {
                repo.mark_email_sent(record.id)?;
                repo.mark_user_invited(user.id)?;
                summary.record_created();
            }
            Err(err) => {
                log::error!("Failed to deliver invitation to '{}': {err}", user.email);
                repo.mark_email_failed(record.id)?;
                summary.record_failed();
            }
        }
    }

    Ok(summary)
}

/// Loads recipients from CSV, creating missing user rows so the invitation
/// can be tracked against an account.
fn recipients_from_file<R>(
    repo: &R,
    workspace: &Workspace,
    path: &Path,
) -> ServiceResult<Vec<User>>
where
    R: UserReader + UserWriter + ?Sized,
{
    let mut reader = csv::Reader::from_path(path)?;
    let mut users = Vec::new();

    for result in reader.deserialize::<RecipientRow>() {
        let row = result?;
        let new_user = NewUser::new(workspace.id, &row.name, &row.email)?;
        let user = match repo.get_user_by_email(workspace.id, &new_user.email)? {
            Some(user) => user,
            None => repo.create_user(&new_user)?,
        };
        users.push(user);
    }

    Ok(users)
}
