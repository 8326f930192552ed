//! MasterData - the single registry of reusable pick-list values.

use serde::{Deserialize, Serialize};

use super::field::MasterDataField;

/// Pick-lists shared by every wizard.
///
/// Each list keeps display order. Duplicate and blank values are rejected
/// by [`add_value`](Self::add_value); a document loaded from the store is
/// taken as-is. Missing lists deserialize as empty and unknown keys are
/// ignored, so older documents still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MasterData {
    pub projects: Vec<String>,
    pub workplaces: Vec<String>,
    pub contractors: Vec<String>,
    pub supervisors: Vec<String>,
    pub locations: Vec<String>,
    pub subcontractors: Vec<String>,
    pub roles: Vec<String>,
    pub topics: Vec<String>,
    pub job_types: Vec<String>,
    pub goals: Vec<String>,
    pub predictions: Vec<String>,
    pub countermeasures: Vec<String>,
    pub processes: Vec<String>,
    pub cautions: Vec<String>,
}

impl MasterData {
    /// The document used when none has been stored yet.
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn values(&self, field: MasterDataField) -> &[String] {
        match field {
            MasterDataField::Projects => &self.projects,
            MasterDataField::Workplaces => &self.workplaces,
            MasterDataField::Contractors => &self.contractors,
            MasterDataField::Supervisors => &self.supervisors,
            MasterDataField::Locations => &self.locations,
            MasterDataField::Subcontractors => &self.subcontractors,
            MasterDataField::Roles => &self.roles,
            MasterDataField::Topics => &self.topics,
            MasterDataField::JobTypes => &self.job_types,
            MasterDataField::Goals => &self.goals,
            MasterDataField::Predictions => &self.predictions,
            MasterDataField::Countermeasures => &self.countermeasures,
            MasterDataField::Processes => &self.processes,
            MasterDataField::Cautions => &self.cautions,
        }
    }

    fn values_mut(&mut self, field: MasterDataField) -> &mut Vec<String> {
        match field {
            MasterDataField::Projects => &mut self.projects,
            MasterDataField::Workplaces => &mut self.workplaces,
            MasterDataField::Contractors => &mut self.contractors,
            MasterDataField::Supervisors => &mut self.supervisors,
            MasterDataField::Locations => &mut self.locations,
            MasterDataField::Subcontractors => &mut self.subcontractors,
            MasterDataField::Roles => &mut self.roles,
            MasterDataField::Topics => &mut self.topics,
            MasterDataField::JobTypes => &mut self.job_types,
            MasterDataField::Goals => &mut self.goals,
            MasterDataField::Predictions => &mut self.predictions,
            MasterDataField::Countermeasures => &mut self.countermeasures,
            MasterDataField::Processes => &mut self.processes,
            MasterDataField::Cautions => &mut self.cautions,
        }
    }

    pub fn contains(&self, field: MasterDataField, value: &str) -> bool {
        self.values(field).iter().any(|v| v == value)
    }

    /// Appends a trimmed value. Returns false for blanks and duplicates.
    pub fn add_value(&mut self, field: MasterDataField, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || self.contains(field, value) {
            return false;
        }
        self.values_mut(field).push(value.to_string());
        true
    }

    /// Removes a value. Returns false if it was not present.
    pub fn remove_value(&mut self, field: MasterDataField, value: &str) -> bool {
        let list = self.values_mut(field);
        let before = list.len();
        list.retain(|v| v != value);
        list.len() != before
    }

    /// Renames a value in place, keeping its position.
    ///
    /// Returns false if `from` is missing or `to` is blank or already taken.
    pub fn rename_value(&mut self, field: MasterDataField, from: &str, to: &str) -> bool {
        let to = to.trim();
        if to.is_empty() || self.contains(field, to) {
            return false;
        }
        match self.values_mut(field).iter_mut().find(|v| v.as_str() == from) {
            Some(slot) => {
                *slot = to.to_string();
                true
            }
            None => false,
        }
    }
}
