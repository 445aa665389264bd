use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadStatus {
    New,
    Working,
    Qualified,
    Disqualified,
    Other(String),
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStatus::New => write!(f, "new"),
            LeadStatus::Working => write!(f, "working"),
            LeadStatus::Qualified => write!(f, "qualified"),
            LeadStatus::Disqualified => write!(f, "disqualified"),
            LeadStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for LeadStatus {
    fn from(s: &str) -> Self {
        match s {
            "new" => LeadStatus::New,
            "working" => LeadStatus::Working,
            "qualified" => LeadStatus::Qualified,
            "disqualified" => LeadStatus::Disqualified,
            _ => LeadStatus::Other(s.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: i32,
    pub workspace_id: i32,
    pub person_id: i32,
    pub status: LeadStatus,
    pub source: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLead {
    pub workspace_id: i32,
    pub person_id: i32,
    pub status: LeadStatus,
    pub source: Option<String>,
}

impl NewLead {
    pub fn new(workspace_id: i32, person_id: i32, source: Option<&str>) -> Self {
        Self {
            workspace_id,
            person_id,
            status: LeadStatus::New,
            source: source
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
