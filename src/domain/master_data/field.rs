//! Names of the pick-lists held in master data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MasterDataField {
    Projects,
    Workplaces,
    Contractors,
    Supervisors,
    Locations,
    Subcontractors,
    Roles,
    Topics,
    JobTypes,
    Goals,
    Predictions,
    Countermeasures,
    Processes,
    Cautions,
}

impl MasterDataField {
    pub const ALL: [MasterDataField; 14] = [
        MasterDataField::Projects,
        MasterDataField::Workplaces,
        MasterDataField::Contractors,
        MasterDataField::Supervisors,
        MasterDataField::Locations,
        MasterDataField::Subcontractors,
        MasterDataField::Roles,
        MasterDataField::Topics,
        MasterDataField::JobTypes,
        MasterDataField::Goals,
        MasterDataField::Predictions,
        MasterDataField::Countermeasures,
        MasterDataField::Processes,
        MasterDataField::Cautions,
    ];

    /// Key used in the stored document.
    pub fn key(&self) -> &'static str {
        match self {
            MasterDataField::Projects => "projects",
            MasterDataField::Workplaces => "workplaces",
            MasterDataField::Contractors => "contractors",
            MasterDataField::Supervisors => "supervisors",
            MasterDataField::Locations => "locations",
            MasterDataField::Subcontractors => "subcontractors",
            MasterDataField::Roles => "roles",
            MasterDataField::Topics => "topics",
            MasterDataField::JobTypes => "jobTypes",
            MasterDataField::Goals => "goals",
            MasterDataField::Predictions => "predictions",
            MasterDataField::Countermeasures => "countermeasures",
            MasterDataField::Processes => "processes",
            MasterDataField::Cautions => "cautions",
        }
    }
}

impl fmt::Display for MasterDataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MasterDataField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MasterDataField::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| ValidationError::invalid_format("field", format!("unknown list '{s}'")))
    }
}
