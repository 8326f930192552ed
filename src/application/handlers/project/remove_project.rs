//! RemoveProjectHandler - removes a project and every draft filed under it.
//!
//! The cascade is irreversible, so the caller must supply the shared
//! confirmation password. Master data and drafts stay two independent
//! stores; this handler is the only place that couples them.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::application::{CascadeReport, DraftStore, MasterDataStore};
use crate::domain::draft::DraftError;
use crate::domain::foundation::ErrorCode;
use crate::domain::master_data::{MasterData, MasterDataError, MasterDataField};

/// Command to remove a project.
#[derive(Debug)]
pub struct RemoveProjectCommand {
    pub project: String,
    pub confirmation: SecretString,
}

/// Result of a project removal.
#[derive(Debug, Clone)]
pub struct RemoveProjectResult {
    pub master_data: MasterData,
    /// False if the project was not in the master data list; its drafts
    /// are still cascaded.
    pub was_listed: bool,
    pub cascade: CascadeReport,
}

#[derive(Debug, Error)]
pub enum ProjectRemovalError {
    #[error("Confirmation password rejected")]
    ConfirmationRejected,

    #[error("Project name is empty")]
    EmptyProjectName,

    #[error(transparent)]
    MasterData(#[from] MasterDataError),

    #[error(transparent)]
    Drafts(#[from] DraftError),
}

impl ProjectRemovalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProjectRemovalError::ConfirmationRejected | ProjectRemovalError::EmptyProjectName => {
                ErrorCode::ValidationSkipped
            }
            ProjectRemovalError::MasterData(e) => e.code(),
            ProjectRemovalError::Drafts(e) => e.code(),
        }
    }
}

/// Handler for removing projects.
pub struct RemoveProjectHandler {
    master_data: Arc<MasterDataStore>,
    drafts: Arc<DraftStore>,
    password: SecretString,
}

impl RemoveProjectHandler {
    pub fn new(
        master_data: Arc<MasterDataStore>,
        drafts: Arc<DraftStore>,
        password: SecretString,
    ) -> Self {
        Self {
            master_data,
            drafts,
            password,
        }
    }

    /// Removes `cmd.project` from the project pick-list and deletes its
    /// drafts. The name is trimmed, and drafts match when their trimmed
    /// `data.project` equals it, so padded values are cascaded too.
    pub async fn handle(
        &self,
        cmd: RemoveProjectCommand,
    ) -> Result<RemoveProjectResult, ProjectRemovalError> {
        // 1. Gate on the shared password before touching anything
        if !self.confirms(&cmd.confirmation) {
            tracing::warn!(project = %cmd.project, "Project removal rejected: wrong confirmation");
            return Err(ProjectRemovalError::ConfirmationRejected);
        }
        let project = cmd.project.trim();
        if project.is_empty() {
            return Err(ProjectRemovalError::EmptyProjectName);
        }

        // 2. Remove from the pick-list (read-modify-write)
        let mut was_listed = false;
        let master_data = self
            .master_data
            .modify(|data| {
                was_listed = data.remove_value(MasterDataField::Projects, project);
                was_listed
            })
            .await?;

        // 3. Cascade to drafts
        let cascade = self.drafts.delete_by_project(project).await?;

        tracing::info!(
            project,
            was_listed,
            deleted = cascade.deleted.len(),
            failed = cascade.failed.len(),
            "Project removed"
        );
        Ok(RemoveProjectResult {
            master_data,
            was_listed,
            cascade,
        })
    }

    fn confirms(&self, attempt: &SecretString) -> bool {
        let expected = self.password.expose_secret().as_bytes();
        let attempt = attempt.expose_secret().as_bytes();
        if expected.is_empty() || expected.len() != attempt.len() {
            return false;
        }
        expected.ct_eq(attempt).into()
    }
}
