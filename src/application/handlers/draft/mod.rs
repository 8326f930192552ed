//! Draft payload handlers.

mod attach_photo;
mod attach_signature;

pub use attach_photo::{
    AttachPhotoCommand, AttachPhotoError, AttachPhotoHandler, AttachPhotoResult, PhotoSource,
};
pub use attach_signature::{attach_signature, SignatureSlot};
