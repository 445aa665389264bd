//! Batch operations behind the CLI subcommands.
//!
//! Services are free functions generic over the repository traits they need,
//! so tests can run them against any repository implementation. They follow
//! one error contract: a single record's failure is logged and counted, the
//! batch continues; only setup problems (missing workspace, unreadable
//! input, missing required config) abort the run.

use std::fmt::Display;

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::domain::workspace::Workspace;
use crate::repository::WorkspaceReader;
use crate::repository::errors::RepositoryError;
use crate::vendors::VendorError;

pub mod classify;
pub mod convert;
pub mod dedupe;
pub mod enrich;
pub mod export;
pub mod import;
pub mod invite;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Vendor(#[from] VendorError),

    #[error("validation error: {0}")]
    TypeConstraint(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Per-run counters printed at the end of every batch command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub deleted: usize,
}

impl RunSummary {
    pub fn record_created(&mut self) {
        self.processed += 1;
        self.created += 1;
    }

    pub fn record_updated(&mut self) {
        self.processed += 1;
        self.updated += 1;
    }

    pub fn record_skipped(&mut self) {
        self.processed += 1;
        self.skipped += 1;
    }

    pub fn record_failed(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "processed: {}, created: {}, updated: {}, skipped: {}, failed: {}, deleted: {}",
            self.processed, self.created, self.updated, self.skipped, self.failed, self.deleted
        )
    }
}

/// Resolves a workspace slug or fails the run; every workspace-scoped
/// command starts here.
pub fn require_workspace<R>(repo: &R, slug: &str) -> ServiceResult<Workspace>
where
    R: WorkspaceReader + ?Sized,
{
    repo.get_workspace_by_slug(slug)?
        .ok_or_else(|| ServiceError::WorkspaceNotFound(slug.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counters_accumulate() {
        let mut summary = RunSummary::default();
        summary.record_created();
        summary.record_created();
        summary.record_skipped();
        summary.record_failed();
        assert_eq!(summary.processed, 4);
        assert_eq!(summary.created, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert!(summary.to_string().contains("processed: 4"));
    }
}
