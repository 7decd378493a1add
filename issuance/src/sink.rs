//! Artifact sinks — where encoded payloads go for rendering and
//! distribution.

use crate::error::IssuanceError;
use std::path::PathBuf;
use veriseal_codec::Artifact;

/// Accepts an encoded artifact for persistence or output.
///
/// Returns the artifact's location string for the manifest. Rendering the
/// payload into an actual image happens downstream, outside the protocol.
pub trait ArtifactSink: Send + Sync {
    fn emit(&self, artifact: &Artifact, index: u64) -> Result<String, IssuanceError>;
}

/// Writes one payload file per artifact under an output directory.
pub struct FsArtifactSink {
    out_dir: PathBuf,
}

impl FsArtifactSink {
    /// Create the sink, ensuring the output directory exists.
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self, IssuanceError> {
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir)
            .map_err(|e| IssuanceError::Sink(format!("create {}: {e}", out_dir.display())))?;
        Ok(Self { out_dir })
    }
}

impl ArtifactSink for FsArtifactSink {
    fn emit(&self, artifact: &Artifact, index: u64) -> Result<String, IssuanceError> {
        let path = self.out_dir.join(format!("artifact_{index}.seal"));
        std::fs::write(&path, artifact.payload())
            .map_err(|e| IssuanceError::Sink(format!("write {}: {e}", path.display())))?;
        Ok(path.display().to_string())
    }
}
