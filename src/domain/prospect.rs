use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProspectStage {
    Cold,
    Warm,
    Hot,
    Engaged,
    Other(String),
}

impl Display for ProspectStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProspectStage::Cold => write!(f, "cold"),
            ProspectStage::Warm => write!(f, "warm"),
            ProspectStage::Hot => write!(f, "hot"),
            ProspectStage::Engaged => write!(f, "engaged"),
            ProspectStage::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ProspectStage {
    fn from(s: &str) -> Self {
        match s {
            "cold" => ProspectStage::Cold,
            "warm" => ProspectStage::Warm,
            "hot" => ProspectStage::Hot,
            "engaged" => ProspectStage::Engaged,
            _ => ProspectStage::Other(s.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Prospect {
    pub id: i32,
    pub workspace_id: i32,
    pub person_id: i32,
    pub stage: ProspectStage,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProspect {
    pub workspace_id: i32,
    pub person_id: i32,
    pub stage: ProspectStage,
}
