//! Application handlers.
//!
//! Command handlers that orchestrate the stores and domain operations.

pub mod draft;
pub mod project;

pub use draft::{
    attach_signature, AttachPhotoCommand, AttachPhotoError, AttachPhotoHandler,
    AttachPhotoResult, PhotoSource, SignatureSlot,
};
pub use project::{
    ProjectRemovalError, RemoveProjectCommand, RemoveProjectHandler, RemoveProjectResult,
};
