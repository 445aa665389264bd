//! Natural-key deduplication for companies and people.
//!
//! Records are grouped by their natural key; within a group the record with
//! the most populated columns wins (ties go to the oldest id), blank winner
//! columns are filled from the losers best-first, every foreign key is
//! repointed at the winner and the losers are soft-deleted. Each group is
//! merged in its own transaction, so one broken group never rolls back the
//! others.

use std::collections::HashMap;

use crate::domain::company::{Company, CompanyPatch};
use crate::domain::person::{Person, PersonPatch};
use crate::domain::workspace::Workspace;
use crate::repository::{
    CompanyListQuery, CompanyReader, CompanyWriter, PersonListQuery, PersonReader, PersonWriter,
};
use crate::services::{RunSummary, ServiceResult};

/// Groups larger than this are almost always a broken key, not genuine
/// duplicates; they are skipped unless `--force` is given.
pub const MAX_GROUP_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, Default)]
pub struct DedupeOptions {
    pub dry_run: bool,
    /// Merge oversized groups anyway.
    pub force: bool,
}

pub fn dedupe_companies<R>(
    repo: &R,
    workspace: &Workspace,
    options: &DedupeOptions,
) -> ServiceResult<RunSummary>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    let (_, companies) = repo.list_companies(CompanyListQuery::new(workspace.id))?;
    let mut summary = RunSummary::default();

    for mut group in group_by_key(companies, Company::natural_key) {
        if group.len() < 2 {
            continue;
        }
        summary.processed += 1;

        if group.len() > MAX_GROUP_SIZE && !options.force {
            log::warn!(
                "Skipping duplicate group '{}' with {} records (pass --force to merge)",
                group[0].natural_key(),
                group.len()
            );
            summary.skipped += 1;
            continue;
        }

        group.sort_by(|a, b| {
            b.populated_score()
                .cmp(&a.populated_score())
                .then(a.id.cmp(&b.id))
        });
        let winner = &group[0];
        let losers = &group[1..];
        let fill = company_fill_from_losers(winner, losers);
        let drop_ids: Vec<i32> = losers.iter().map(|company| company.id).collect();

        if options.dry_run {
            log::info!(
                "[dry-run] would merge {} duplicates of '{}' into #{}",
                drop_ids.len(),
                winner.name,
                winner.id
            );
            summary.skipped += 1;
            continue;
        }

        match repo.merge_companies(winner.id, &drop_ids, &fill) {
            Ok(deleted) => {
                log::info!(
                    "Merged {} duplicates of '{}' into #{}",
                    deleted,
                    winner.name,
                    winner.id
                );
                summary.updated += 1;
                summary.deleted += deleted;
            }
            Err(err) => {
                log::error!("Failed to merge duplicates of '{}': {err}", winner.name);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

pub fn dedupe_people<R>(
    repo: &R,
    workspace: &Workspace,
    options: &DedupeOptions,
) -> ServiceResult<RunSummary>
where
    R: PersonReader + PersonWriter + ?Sized,
{
    let (_, people) = repo.list_people(PersonListQuery::new(workspace.id))?;
    let mut summary = RunSummary::default();

    for mut group in group_by_key(people, Person::natural_key) {
        if group.len() < 2 {
            continue;
        }
        summary.processed += 1;

        if group.len() > MAX_GROUP_SIZE && !options.force {
            log::warn!(
                "Skipping duplicate group '{}' with {} records (pass --force to merge)",
                group[0].natural_key(),
                group.len()
            );
            summary.skipped += 1;
            continue;
        }

        group.sort_by(|a, b| {
            b.populated_score()
                .cmp(&a.populated_score())
                .then(a.id.cmp(&b.id))
        });
        let winner = &group[0];
        let losers = &group[1..];
        let fill = person_fill_from_losers(winner, losers);
        let drop_ids: Vec<i32> = losers.iter().map(|person| person.id).collect();

        if options.dry_run {
            log::info!(
                "[dry-run] would merge {} duplicates of '{}' into #{}",
                drop_ids.len(),
                winner.name,
                winner.id
            );
            summary.skipped += 1;
            continue;
        }

        match repo.merge_people(winner.id, &drop_ids, &fill) {
            Ok(deleted) => {
                log::info!(
                    "Merged {} duplicates of '{}' into #{}",
                    deleted,
                    winner.name,
                    winner.id
                );
                summary.updated += 1;
                summary.deleted += deleted;
            }
            Err(err) => {
                log::error!("Failed to merge duplicates of '{}': {err}", winner.name);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Buckets records by key, preserving id order inside each bucket and the
/// order of first appearance across buckets.
fn group_by_key<T, F>(records: Vec<T>, key: F) -> Vec<Vec<T>>
where
    F: Fn(&T) -> String,
{
    let mut order = Vec::new();
    let mut buckets: HashMap<String, Vec<T>> = HashMap::new();
    for record in records {
        let k = key(&record);
        let bucket = buckets.entry(k.clone()).or_default();
        if bucket.is_empty() {
            order.push(k);
        }
        bucket.push(record);
    }
    order
        .into_iter()
        .filter_map(|k| buckets.remove(&k))
        .collect()
}

/// Fills each blank winner column with the first populated value among the
/// losers (already sorted best-first).
fn company_fill_from_losers(winner: &Company, losers: &[Company]) -> CompanyPatch {
    let pick = |get: fn(&Company) -> &Option<String>| -> Option<String> {
        if get(winner).as_deref().is_some_and(|v| !v.trim().is_empty()) {
            return None;
        }
        losers
            .iter()
            .filter_map(|loser| get(loser).clone())
            .find(|v| !v.trim().is_empty())
    };
    CompanyPatch {
        domain: pick(|c| &c.domain),
        website: pick(|c| &c.website),
        industry: pick(|c| &c.industry),
        employee_range: pick(|c| &c.employee_range),
        revenue_range: pick(|c| &c.revenue_range),
        description: pick(|c| &c.description),
    }
}

fn person_fill_from_losers(winner: &Person, losers: &[Person]) -> PersonPatch {
    let pick = |get: fn(&Person) -> &Option<String>| -> Option<String> {
        if get(winner).as_deref().is_some_and(|v| !v.trim().is_empty()) {
            return None;
        }
        losers
            .iter()
            .filter_map(|loser| get(loser).clone())
            .find(|v| !v.trim().is_empty())
    };
    PersonPatch {
        company_id: if winner.company_id.is_none() {
            losers.iter().find_map(|loser| loser.company_id)
        } else {
            None
        },
        title: pick(|p| &p.title),
        email: pick(|p| &p.email),
        email_status: if winner.email.is_none() {
            losers
                .iter()
                .find(|loser| loser.email.is_some())
                .and_then(|loser| loser.email_status.clone())
        } else {
            None
        },
        phone: pick(|p| &p.phone),
        phone_line_type: pick(|p| &p.phone_line_type),
        city: pick(|p| &p.city),
        state: pick(|p| &p.state),
        linkedin_url: pick(|p| &p.linkedin_url),
    }
}
