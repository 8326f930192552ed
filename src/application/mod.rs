//! Application layer - Stores and Handlers.
//!
//! This layer owns the draft and master data repositories and orchestrates
//! them through command handlers. The stores are the only way to mutate
//! cached state.

mod draft_store;
pub mod handlers;
mod master_data_store;
mod remote_writer;

pub use draft_store::{
    CascadeReport, DraftStore, DraftStoreConfig, SaveReceipt, DRAFTS_CACHE_KEY,
    DRAFT_SYNC_CACHE_KEY,
    LAST_MODIFIED_FIELD,
};
pub use handlers::{
    attach_signature, AttachPhotoCommand, AttachPhotoError, AttachPhotoHandler,
    AttachPhotoResult, PhotoSource, ProjectRemovalError, RemoveProjectCommand,
    RemoveProjectHandler, RemoveProjectResult, SignatureSlot,
};
pub use master_data_store::{MasterDataStore, MasterDataStoreConfig, MASTER_DATA_CACHE_KEY};
pub use remote_writer::{RemoteConfirmation, RemoteWriter, SyncTracker, WriteOutcome};
