//! Embedding signature artifacts in draft payloads.

use serde_json::Value;

use crate::domain::draft::{payload, DraftError};
use crate::domain::signature::SignatureArtifact;

/// Where a signature goes in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureSlot {
    /// Replace `data[field]`.
    Field(String),
    /// Append to the array at `data[field]`, as roster signatures do.
    Append(String),
}

/// Embeds `artifact` as a PNG data URL. The artifact keeps no link to the
/// capture session once embedded.
pub fn attach_signature(
    data: &mut Value,
    slot: &SignatureSlot,
    artifact: &SignatureArtifact,
) -> Result<(), DraftError> {
    let url = Value::String(artifact.to_data_url());
    match slot {
        SignatureSlot::Field(field) => payload::set_field(data, field, url),
        SignatureSlot::Append(field) => payload::append_to_array(data, field, url).map(|_| ()),
    }
}
