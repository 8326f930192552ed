//! The fixed set of document kinds a draft can hold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftType {
    /// Safety training (toolbox meeting) report.
    SafetyTraining,
    /// Safety council attendee roster.
    SafetyCouncil,
    /// Monthly safety plan; prerequisite for dependent reports.
    MonthlyPlan,
    /// Newcomer entry survey.
    NewcomerSurvey,
}

impl DraftType {
    pub const ALL: [DraftType; 4] = [
        DraftType::SafetyTraining,
        DraftType::SafetyCouncil,
        DraftType::MonthlyPlan,
        DraftType::NewcomerSurvey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftType::SafetyTraining => "safety_training",
            DraftType::SafetyCouncil => "safety_council",
            DraftType::MonthlyPlan => "monthly_plan",
            DraftType::NewcomerSurvey => "newcomer_survey",
        }
    }

    /// The document type that must exist for the same project before a
    /// draft of this type may be created.
    pub fn prerequisite(&self) -> Option<DraftType> {
        match self {
            DraftType::SafetyCouncil => Some(DraftType::MonthlyPlan),
            _ => None,
        }
    }
}

impl fmt::Display for DraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("type", format!("unknown draft type '{s}'")))
    }
}
