//! Image decoding boundary.
//!
//! Turning pixels into a payload string is consumed as an opaque
//! primitive: bytes in, payload string or failure out. No retry happens
//! inside the decoder — the session decides what a failure means.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeFailure {
    #[error("no recognizable encoding present in the image")]
    NothingRecognized,

    #[error("image could not be loaded: {0}")]
    UnreadableImage(String),
}

/// Best-effort extraction of a scannable payload from raster data.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, image: &[u8]) -> Result<String, DecodeFailure>;
}
