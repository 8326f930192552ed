//! Image adapters.

mod jpeg_compressor;

pub use jpeg_compressor::{JpegCompressor, JPEG_MIME};
