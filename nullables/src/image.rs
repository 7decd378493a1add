//! Deterministic image decoder.

use veriseal_session::{DecodeFailure, ImageDecoder};

/// Decoder that treats the submitted bytes as the payload itself.
///
/// Tests hand it `payload.as_bytes()` where production code would hand it
/// raster data. Invalid UTF-8 behaves like an image with nothing
/// recognizable in it.
pub struct NullImageDecoder {
    always_fail: bool,
}

impl NullImageDecoder {
    pub fn passthrough() -> Self {
        Self { always_fail: false }
    }

    /// Simulates an image with no recognizable encoding.
    pub fn failing() -> Self {
        Self { always_fail: true }
    }
}

impl ImageDecoder for NullImageDecoder {
    fn decode(&self, image: &[u8]) -> Result<String, DecodeFailure> {
        if self.always_fail {
            return Err(DecodeFailure::NothingRecognized);
        }
        let payload = std::str::from_utf8(image)
            .map_err(|_| DecodeFailure::NothingRecognized)?
            .trim()
            .to_string();
        if payload.is_empty() {
            return Err(DecodeFailure::NothingRecognized);
        }
        Ok(payload)
    }
}
