use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{EmailAddress, PersonName, TypeConstraintError};

/// Deliverability verdict attached to a person's email, following the
/// ZeroBounce status taxonomy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmailStatus {
    Valid,
    Invalid,
    CatchAll,
    DoNotMail,
    Unknown,
}

impl Display for EmailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailStatus::Valid => write!(f, "valid"),
            EmailStatus::Invalid => write!(f, "invalid"),
            EmailStatus::CatchAll => write!(f, "catch-all"),
            EmailStatus::DoNotMail => write!(f, "do-not-mail"),
            EmailStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<&str> for EmailStatus {
    fn from(s: &str) -> Self {
        match s {
            "valid" => EmailStatus::Valid,
            "invalid" => EmailStatus::Invalid,
            "catch-all" | "catch_all" => EmailStatus::CatchAll,
            "do-not-mail" | "do_not_mail" | "spamtrap" | "abuse" => EmailStatus::DoNotMail,
            _ => EmailStatus::Unknown,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Person {
    pub id: i32,
    pub workspace_id: i32,
    pub company_id: Option<i32>,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<EmailStatus>,
    pub phone: Option<String>,
    pub phone_line_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Person {
    /// Natural key used by reconciliation and dedup: lowercased email when
    /// present, otherwise name scoped to the linked company.
    pub fn natural_key(&self) -> String {
        match &self.email {
            Some(email) => format!("email:{email}"),
            None => format!(
                "name:{}@company:{}",
                self.name.trim().to_lowercase(),
                self.company_id.unwrap_or(0)
            ),
        }
    }

    /// Number of populated optional columns, used as the dedup score.
    pub fn populated_score(&self) -> usize {
        let strings = [
            &self.title,
            &self.email,
            &self.phone,
            &self.phone_line_type,
            &self.city,
            &self.state,
            &self.linkedin_url,
        ]
        .into_iter()
        .filter(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .count();
        strings + usize::from(self.company_id.is_some()) + usize::from(self.email_status.is_some())
    }

    /// Splits the display name into (first, last) for vendor lookups.
    /// Everything after the first word counts as the last name; mononyms
    /// cannot be split.
    pub fn split_name(&self) -> Option<(&str, &str)> {
        let (first, rest) = self.name.trim().split_once(char::is_whitespace)?;
        let rest = rest.trim();
        if rest.is_empty() {
            None
        } else {
            Some((first, rest))
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPerson {
    pub workspace_id: i32,
    pub company_id: Option<i32>,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub linkedin_url: Option<String>,
}

impl NewPerson {
    pub fn new(
        workspace_id: i32,
        name: &str,
        email: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        let email = match email.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(EmailAddress::new(raw)?.into_inner()),
            None => None,
        };
        Ok(Self {
            workspace_id,
            company_id: None,
            name: PersonName::new(name)?.into_inner(),
            title: None,
            email,
            phone: None,
            city: None,
            state: None,
            linkedin_url: None,
        })
    }

    pub fn company_id(mut self, id: Option<i32>) -> Self {
        self.company_id = id;
        self
    }

    pub fn title(mut self, value: Option<&str>) -> Self {
        self.title = clean_opt(value);
        self
    }

    pub fn phone(mut self, value: Option<&str>) -> Self {
        self.phone = clean_opt(value);
        self
    }

    pub fn city(mut self, value: Option<&str>) -> Self {
        self.city = clean_opt(value);
        self
    }

    pub fn state(mut self, value: Option<&str>) -> Self {
        self.state = clean_opt(value);
        self
    }

    pub fn linkedin_url(mut self, value: Option<&str>) -> Self {
        self.linkedin_url = clean_opt(value);
        self
    }
}

/// Partial update applied to a person. `None` leaves the column untouched.
/// Enrichment writes found emails/phones through this; the writer only fills
/// blanks except for `email_status` and `phone_line_type`, which always
/// reflect the latest verification.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PersonPatch {
    pub company_id: Option<i32>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub email_status: Option<EmailStatus>,
    pub phone: Option<String>,
    pub phone_line_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub linkedin_url: Option<String>,
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
    fn natural_key_prefers_email() {
        let mut person = Person {
            name: "Jane Doe".into(),
            company_id: Some(7),
            ..Person::default()
        };
        assert_eq!(person.natural_key(), "name:jane doe@company:7");
        person.email = Some("jane@acme.com".into());
        assert_eq!(person.natural_key(), "email:jane@acme.com");
    }

    #[test]
    fn split_name_handles_single_and_multi_word() {
        let person = Person {
            name: "Jane Doe".into(),
            ..Person::default()
        };
        assert_eq!(person.split_name(), Some(("Jane", "Doe")));

        let compound = Person {
            name: "Jane van der Berg".into(),
            ..Person::default()
        };
        assert_eq!(compound.split_name(), Some(("Jane", "van der Berg")));

        let mononym = Person {
            name: "Cher".into(),
            ..Person::default()
        };
        assert_eq!(mononym.split_name(), None);
    }

    #[test]
    fn email_status_round_trips_through_text() {
        for status in [
            EmailStatus::Valid,
            EmailStatus::Invalid,
            EmailStatus::CatchAll,
            EmailStatus::DoNotMail,
            EmailStatus::Unknown,
        ] {
            assert_eq!(EmailStatus::from(status.to_string().as_str()), status);
        }
        assert_eq!(EmailStatus::from("spamtrap"), EmailStatus::DoNotMail);
        assert_eq!(EmailStatus::from("weird"), EmailStatus::Unknown);
    }
}
