//! Buyer-group classification sweep.

use crate::domain::buyer_group::{BuyerRole, NewBuyerGroupMember, classify_title};
use crate::domain::workspace::Workspace;
use crate::repository::{
    BuyerGroupWriter, CompanyListQuery, CompanyReader, PersonListQuery, PersonReader,
};
use crate::services::{RunSummary, ServiceError, ServiceResult};
use crate::vendors::AiClient;

#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// Restrict the sweep to one company, matched by domain or name.
    pub company: Option<String>,
    /// Ask the configured LLM to second-guess low-confidence rule results.
    pub use_ai: bool,
    pub dry_run: bool,
}

/// Classifies every titled person of the workspace (or one company) into a
/// buyer-group role and persists the membership rows.
pub fn classify_workspace<R>(
    repo: &R,
    ai: Option<&AiClient>,
    workspace: &Workspace,
    options: &ClassifyOptions,
) -> ServiceResult<RunSummary>
where
    R: CompanyReader + PersonReader + BuyerGroupWriter + ?Sized,
{
    let companies = match &options.company {
        Some(selector) => {
            let company = repo
                .find_company_by_domain(workspace.id, selector)?
                .or(repo.find_company_by_name(workspace.id, selector)?)
                .ok_or_else(|| {
                    ServiceError::InvalidInput(format!(
                        "no company matching '{selector}' in workspace {}",
                        workspace.slug
                    ))
                })?;
            vec![company]
        }
        None => repo.list_companies(CompanyListQuery::new(workspace.id))?.1,
    };

    if options.use_ai && ai.is_none() {
        log::warn!("--ai requested but no LLM provider is configured; using rules only");
    }

    let mut summary = RunSummary::default();

    for company in &companies {
        let (_, people) = repo.list_people(
            PersonListQuery::new(workspace.id)
                .company(company.id)
                .with_title(),
        )?;

        for person in people {
            let title = match person.title.as_deref().map(str::trim) {
                Some(title) if !title.is_empty() => title,
                _ => {
                    summary.record_skipped();
                    continue;
                }
            };

            let classification = classify_title(title);
            let role = resolve_role(ai, options, title, classification.role);

            if options.dry_run {
                log::info!(
                    "[dry-run] {} ({title}) -> {role} (influence {:.2})",
                    person.name,
                    classification.influence
                );
                summary.record_skipped();
                continue;
            }

            let member = NewBuyerGroupMember {
                workspace_id: workspace.id,
                company_id: company.id,
                person_id: person.id,
                role,
                influence: classification.influence,
            };
            match repo.upsert_buyer_group_member(&member) {
                Ok(_) => summary.record_updated(),
                Err(err) => {
                    log::error!("Failed to classify '{}': {err}", person.name);
                    summary.record_failed();
                }
            }
        }
    }

    Ok(summary)
}

/// The rules put everyone they cannot place into Stakeholder, so that is the
/// only bucket worth a second opinion.
fn resolve_role(
    ai: Option<&AiClient>,
    options: &ClassifyOptions,
    title: &str,
    rule_role: BuyerRole,
) -> BuyerRole {
    if !options.use_ai || rule_role != BuyerRole::Stakeholder {
        return rule_role;
    }
    let Some(client) = ai else {
        return rule_role;
    };
    match client.classify_buyer_role(title) {
        Ok(Some(role)) => role,
        Ok(None) => {
            log::warn!("LLM returned an unparseable role for '{title}'; keeping {rule_role}");
            rule_role
        }
        Err(err) => {
            log::warn!("LLM classification failed for '{title}': {err}");
            rule_role
        }
    }
}
