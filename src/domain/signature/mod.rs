//! Signature capture.
//!
//! - `pointer` - capability-tagged pointer events and the pen-only filter
//! - `coordinates` - viewport to backing-pixel mapping, incl. rotated layout
//! - `layout` - container measurements and resize debouncing
//! - `surface` - the ink raster and the guide-zone crop
//! - `engine` - the capture session state machine

mod artifact;
mod coordinates;
mod engine;
mod errors;
mod layout;
mod pointer;
mod status;
mod surface;

pub use artifact::SignatureArtifact;
pub use coordinates::{is_rotated_layout, BackingSize, CanvasPoint, CoordinateMapper, SurfaceRect};
pub use engine::{CaptureSettings, PointerOutcome, SignatureCaptureEngine};
pub use errors::CaptureError;
pub use layout::{ResizeDebounce, SurfaceLayout, Viewport};
pub use pointer::{DeviceKind, InputFilter, PointerEvent, ViewportPoint};
pub use status::CaptureStatus;
pub use surface::{CropBand, InkSurface};
