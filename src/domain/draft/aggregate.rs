//! Draft aggregate - a resumable, in-progress safety document.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::foundation::{DraftId, Timestamp};

use super::errors::DraftError;
use super::payload::{project_of, strip_fields};
use super::DraftType;

/// A persisted draft.
///
/// # Invariants
///
/// - `id` is unique across all drafts
/// - `last_modified` is assigned by the store on every write, never by
///   the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    id: DraftId,
    #[serde(rename = "type")]
    draft_type: DraftType,
    data: Value,
    last_modified: Timestamp,
}

/// Remote body of a draft: everything but the id, which is the document key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftBody {
    #[serde(rename = "type")]
    draft_type: DraftType,
    #[serde(default)]
    data: Value,
    last_modified: Timestamp,
}

impl Draft {
    pub(crate) fn new(id: DraftId, draft_type: DraftType, data: Value, last_modified: Timestamp) -> Self {
        Self {
            id,
            draft_type,
            data,
            last_modified,
        }
    }

    pub fn id(&self) -> &DraftId {
        &self.id
    }

    pub fn draft_type(&self) -> DraftType {
        self.draft_type
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn last_modified(&self) -> Timestamp {
        self.last_modified
    }

    /// `data.project`, if present.
    pub fn project(&self) -> Option<&str> {
        project_of(&self.data)
    }

    /// Whether `data.project` names `project`. Surrounding whitespace on
    /// either side is ignored; the stored payload is left as written.
    pub fn belongs_to(&self, project: &str) -> bool {
        self.project().map(str::trim) == Some(project.trim())
    }

    /// Builds the remote document body, nulling `stripped` fields.
    pub fn to_document(&self, stripped: &[String]) -> Value {
        json!({
            "type": self.draft_type,
            "data": strip_fields(&self.data, stripped),
            "lastModified": self.last_modified,
        })
    }

    /// Parses a remote document body stored under `id`.
    pub fn from_document(id: &str, body: &Value) -> Result<Self, DraftError> {
        let draft_id = DraftId::new(id).map_err(|e| DraftError::malformed(id, e.to_string()))?;
        let body: DraftBody = serde_json::from_value(body.clone())
            .map_err(|e| DraftError::malformed(id, e.to_string()))?;
        Ok(Self::new(draft_id, body.draft_type, body.data, body.last_modified))
    }
}

/// Sorts newest first.
pub fn sort_newest_first(drafts: &mut [Draft]) {
    drafts.sort_by(|a, b| {
        b.last_modified
            .cmp(&a.last_modified)
            .then_with(|| a.id.cmp(&b.id))
    });
}
