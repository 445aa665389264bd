//! Buyer-group membership and the title classifier behind it.
//!
//! The classifier buckets a person into one of four sales-influence roles
//! from their job title: keyword checks derive a decision-power score and a
//! department, and the two together pick the role. Scores are coarse on
//! purpose; titles are messy and anything finer is noise.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sales-influence role within a target account.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BuyerRole {
    DecisionMaker,
    Champion,
    Influencer,
    Stakeholder,
}

impl BuyerRole {
    pub const ALL: [BuyerRole; 4] = [
        BuyerRole::DecisionMaker,
        BuyerRole::Champion,
        BuyerRole::Influencer,
        BuyerRole::Stakeholder,
    ];
}

impl Display for BuyerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuyerRole::DecisionMaker => write!(f, "decision_maker"),
            BuyerRole::Champion => write!(f, "champion"),
            BuyerRole::Influencer => write!(f, "influencer"),
            BuyerRole::Stakeholder => write!(f, "stakeholder"),
        }
    }
}

impl TryFrom<&str> for BuyerRole {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "decision_maker" | "decisionmaker" => Ok(BuyerRole::DecisionMaker),
            "champion" => Ok(BuyerRole::Champion),
            "influencer" => Ok(BuyerRole::Influencer),
            "stakeholder" => Ok(BuyerRole::Stakeholder),
            other => Err(format!("unknown buyer role: {other}")),
        }
    }
}

/// Department inferred from a job title.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    Executive,
    Sales,
    Marketing,
    Product,
    Engineering,
    Operations,
    Finance,
    Hr,
    Legal,
    Other,
}

impl Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Department::Executive => "executive",
            Department::Sales => "sales",
            Department::Marketing => "marketing",
            Department::Product => "product",
            Department::Engineering => "engineering",
            Department::Operations => "operations",
            Department::Finance => "finance",
            Department::Hr => "hr",
            Department::Legal => "legal",
            Department::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// Acronyms must match a whole word: "director" contains "cto" and
/// "coordinator" contains "coo", so substring checks misfire badly here.
const EXEC_ACRONYMS: &[&str] = &["ceo", "cfo", "cto", "coo", "cio", "ciso", "cmo", "cro"];
const EXEC_STEMS: &[&str] = &["chief", "president", "founder", "owner"];

/// Lowercase and collapse "vice president" to "vp" so it never
/// substring-matches the standalone "president" executive keyword.
fn normalize_title(title: &str) -> String {
    title.to_lowercase().replace("vice president", "vp")
}

/// Whole-word match against a normalized title.
fn has_word(t: &str, words: &[&str]) -> bool {
    t.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| words.contains(&token))
}

/// Substring match for stems and phrases ("engineer" covers "engineering").
fn has_stem(t: &str, stems: &[&str]) -> bool {
    stems.iter().any(|stem| t.contains(stem))
}

fn is_exec_title(t: &str) -> bool {
    has_word(t, EXEC_ACRONYMS) || has_stem(t, EXEC_STEMS)
}

/// Result of classifying one title.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleClassification {
    pub role: BuyerRole,
    pub department: Department,
    /// Decision-making power in `[0, 1]`, persisted as the influence score.
    pub influence: f64,
}

/// Infer the department from title keywords. C-suite titles map to
/// Executive before any functional match so that a CFO or CTO carries
/// executive weight rather than their function's.
pub fn infer_department(title: &str) -> Department {
    let t = normalize_title(title);

    if is_exec_title(&t) {
        Department::Executive
    } else if has_stem(&t, &["legal", "counsel", "compliance", "regulatory"]) {
        Department::Legal
    } else if has_stem(&t, &["finance", "accounting", "controller", "treasurer"]) {
        Department::Finance
    } else if has_stem(&t, &["human resources", "people ops", "talent", "recruit"])
        || has_word(&t, &["hr"])
    {
        Department::Hr
    } else if has_stem(&t, &["sales", "revenue", "account executive", "business development"]) {
        Department::Sales
    } else if has_stem(&t, &["marketing", "growth", "demand gen", "brand", "communications"]) {
        Department::Marketing
    } else if has_stem(&t, &["product", "design"]) || has_word(&t, &["ux", "ui"]) {
        Department::Product
    } else if has_stem(&t, &["engineer", "developer", "software", "architect", "technology"]) {
        Department::Engineering
    } else if has_stem(&t, &["operations", "supply chain", "logistics"]) || has_word(&t, &["ops"])
    {
        Department::Operations
    } else {
        Department::Other
    }
}

fn department_bonus(department: Department) -> f64 {
    match department {
        Department::Executive => 0.3,
        Department::Sales => 0.25,
        Department::Product => 0.2,
        Department::Engineering | Department::Marketing => 0.15,
        Department::Operations | Department::Finance => 0.1,
        Department::Hr | Department::Legal | Department::Other => 0.05,
    }
}

/// Decision-making power in `[0, 1]` from title seniority plus a department
/// bonus.
pub fn decision_power(title: &str, department: Department) -> f64 {
    let t = normalize_title(title);
    let title_power = if is_exec_title(&t) {
        0.4
    } else if has_word(&t, &["vp", "svp", "evp"]) {
        0.3
    } else if t.contains("director") || t.contains("head of") {
        0.2
    } else if t.contains("manager") || has_word(&t, &["lead"]) {
        0.1
    } else {
        0.0
    };
    (title_power + department_bonus(department)).min(1.0)
}

/// Classify a job title into a buyer-group role.
pub fn classify_title(title: &str) -> TitleClassification {
    let department = infer_department(title);
    let influence = decision_power(title, department);
    let t = normalize_title(title);

    let champion_keyword =
        has_word(&t, &["vp", "svp", "evp"]) || has_stem(&t, &["director", "head of", "senior"]);
    let role = if influence >= 0.6 {
        BuyerRole::DecisionMaker
    } else if influence >= 0.4 || champion_keyword {
        BuyerRole::Champion
    } else if influence >= 0.2 {
        BuyerRole::Influencer
    } else {
        BuyerRole::Stakeholder
    };

    TitleClassification {
        role,
        department,
        influence,
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BuyerGroupMember {
    pub id: i32,
    pub workspace_id: i32,
    pub company_id: i32,
    pub person_id: i32,
    pub role: BuyerRole,
    pub influence: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewBuyerGroupMember {
    pub workspace_id: i32,
    pub company_id: i32,
    pub person_id: i32,
    pub role: BuyerRole,
    pub influence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_suite_is_decision_maker() {
        let c = classify_title("Chief Executive Officer");
        assert_eq!(c.role, BuyerRole::DecisionMaker);
        assert_eq!(c.department, Department::Executive);
        assert!(c.influence >= 0.6);

        assert_eq!(classify_title("CFO").role, BuyerRole::DecisionMaker);
        assert_eq!(classify_title("CFO").department, Department::Executive);
    }

    #[test]
    fn vp_of_sales_is_champion() {
        // 0.3 (vp) + 0.25 (sales) lands under the decision-maker cut.
        let c = classify_title("VP of Sales");
        assert_eq!(c.department, Department::Sales);
        assert!((c.influence - 0.55).abs() < 1e-9);
        assert_eq!(c.role, BuyerRole::Champion);
    }

    #[test]
    fn director_of_engineering_is_champion() {
        let c = classify_title("Director of Engineering");
        assert_eq!(c.role, BuyerRole::Champion);
        assert_eq!(c.department, Department::Engineering);
    }

    #[test]
    fn manager_is_influencer() {
        let c = classify_title("Marketing Manager");
        assert_eq!(c.role, BuyerRole::Influencer);
        assert_eq!(c.department, Department::Marketing);
        assert!((c.influence - 0.25).abs() < 1e-9);
    }

    #[test]
    fn individual_contributor_is_stakeholder() {
        let c = classify_title("Accounting Specialist");
        assert_eq!(c.role, BuyerRole::Stakeholder);
        assert_eq!(c.department, Department::Finance);
    }

    #[test]
    fn legal_counsel_stays_low_power() {
        let c = classify_title("General Counsel");
        assert_eq!(c.department, Department::Legal);
        assert_eq!(c.role, BuyerRole::Stakeholder);
    }

    #[test]
    fn acronyms_only_match_whole_words() {
        // "director" contains "cto" and "coordinator" contains "coo";
        // neither is an executive.
        assert_eq!(
            classify_title("Director of Engineering").department,
            Department::Engineering
        );
        let c = classify_title("Office Coordinator");
        assert_ne!(c.department, Department::Executive);
        assert_eq!(c.role, BuyerRole::Stakeholder);
    }

    #[test]
    fn vp_spellings_classify_identically() {
        assert_eq!(
            classify_title("Vice President of Sales"),
            classify_title("VP of Sales")
        );
    }

    #[test]
    fn role_text_round_trip() {
        for role in BuyerRole::ALL {
            assert_eq!(BuyerRole::try_from(role.to_string().as_str()), Ok(role));
        }
        assert_eq!(
            BuyerRole::try_from("Decision Maker"),
            Ok(BuyerRole::DecisionMaker)
        );
        assert!(BuyerRole::try_from("blocker").is_err());
    }
}
