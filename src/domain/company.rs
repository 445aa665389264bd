use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyName, TypeConstraintError, WebDomain};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Company {
    pub id: i32,
    pub workspace_id: i32,
    pub name: String,
    pub domain: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub employee_range: Option<String>,
    pub revenue_range: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Company {
    /// Natural key used by reconciliation and dedup: normalized domain when
    /// present, otherwise the lowercased name.
    pub fn natural_key(&self) -> String {
        match &self.domain {
            Some(domain) => format!("domain:{domain}"),
            None => format!("name:{}", self.name.trim().to_lowercase()),
        }
    }

    /// Number of populated optional columns. Dedup keeps the record with the
    /// highest score.
    pub fn populated_score(&self) -> usize {
        [
            &self.domain,
            &self.website,
            &self.industry,
            &self.employee_range,
            &self.revenue_range,
            &self.description,
        ]
        .into_iter()
        .filter(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .count()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCompany {
    pub workspace_id: i32,
    pub name: String,
    pub domain: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub employee_range: Option<String>,
    pub revenue_range: Option<String>,
    pub description: Option<String>,
}

impl NewCompany {
    /// Normalizes raw input: the name must be non-empty, the domain is
    /// canonicalized, everything else is trimmed and empty strings dropped.
    pub fn new(
        workspace_id: i32,
        name: &str,
        domain: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        let domain = match domain.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(WebDomain::new(raw)?.into_inner()),
            None => None,
        };
        Ok(Self {
            workspace_id,
            name: CompanyName::new(name)?.into_inner(),
            domain,
            website: None,
            industry: None,
            employee_range: None,
            revenue_range: None,
            description: None,
        })
    }

    pub fn website(mut self, value: Option<&str>) -> Self {
        self.website = clean_opt(value);
        self
    }

    pub fn industry(mut self, value: Option<&str>) -> Self {
        self.industry = clean_opt(value);
        self
    }

    pub fn employee_range(mut self, value: Option<&str>) -> Self {
        self.employee_range = clean_opt(value);
        self
    }

    pub fn revenue_range(mut self, value: Option<&str>) -> Self {
        self.revenue_range = clean_opt(value);
        self
    }

    pub fn description(mut self, value: Option<&str>) -> Self {
        self.description = clean_opt(value);
        self
    }
}

/// Partial update applied to a company. `None` leaves the column untouched;
/// fill-blank semantics (never overwriting populated columns) are enforced by
/// the writer.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CompanyPatch {
    pub domain: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub employee_range: Option<String>,
    pub revenue_range: Option<String>,
    pub description: Option<String>,
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        self.domain.is_none()
            && self.website.is_none()
            && self.industry.is_none()
            && self.employee_range.is_none()
            && self.revenue_range.is_none()
            && self.description.is_none()
    }
}

fn clean_opt(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_key_prefers_domain() {
        let mut company = Company {
            name: "Acme Corp".into(),
            ..Company::default()
        };
        assert_eq!(company.natural_key(), "name:acme corp");
        company.domain = Some("acme.com".into());
        assert_eq!(company.natural_key(), "domain:acme.com");
    }

    #[test]
    fn populated_score_ignores_blank_strings() {
        let company = Company {
            domain: Some("acme.com".into()),
            website: Some("  ".into()),
            industry: Some("Software".into()),
            ..Company::default()
        };
        assert_eq!(company.populated_score(), 2);
    }

    #[test]
    fn new_company_normalizes_domain() {
        let company = NewCompany::new(1, " Acme ", Some("https://www.Acme.com/about")).unwrap();
        assert_eq!(company.name, "Acme");
        assert_eq!(company.domain.as_deref(), Some("acme.com"));
    }
}
