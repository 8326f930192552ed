//! Project handlers.

mod remove_project;

pub use remove_project::{
    ProjectRemovalError, RemoveProjectCommand, RemoveProjectHandler, RemoveProjectResult,
};
