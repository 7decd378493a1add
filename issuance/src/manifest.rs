//! Issuance manifest — the ordered record of everything a pipeline run
//! produced, serialized as human-diffable JSON.

use crate::error::IssuanceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One issued token: its position, identifier, and where the artifact
/// landed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: u64,
    pub identifier: String,
    pub artifact_location: String,
}

/// Ordered, append-only record set across pipeline runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an existing manifest, or start fresh if the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, IssuanceError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IssuanceError::Manifest(format!("read {}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| IssuanceError::Manifest(format!("parse {}: {e}", path.display())))
    }

    /// Persist as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), IssuanceError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| IssuanceError::Manifest(e.to_string()))?;
        std::fs::write(path, contents)
            .map_err(|e| IssuanceError::Manifest(format!("write {}: {e}", path.display())))
    }

    /// Index the next entry should carry (1-based, contiguous).
    pub fn next_index(&self) -> u64 {
        self.entries.last().map(|e| e.index + 1).unwrap_or(1)
    }

    pub fn append(&mut self, entries: Vec<ManifestEntry>) {
        self.entries.extend(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_index_continues_from_last_entry() {
        let mut manifest = Manifest::new();
        assert_eq!(manifest.next_index(), 1);
        manifest.append(vec![ManifestEntry {
            index: 1,
            identifier: "a".into(),
            artifact_location: "out/artifact_1.seal".into(),
        }]);
        assert_eq!(manifest.next_index(), 2);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        let mut manifest = Manifest::new();
        manifest.append(vec![
            ManifestEntry {
                index: 1,
                identifier: "uuid-1".into(),
                artifact_location: "out/artifact_1.seal".into(),
            },
            ManifestEntry {
                index: 2,
                identifier: "uuid-2".into(),
                artifact_location: "out/artifact_2.seal".into(),
            },
        ]);
        manifest.save(&path).unwrap();

        let loaded = Manifest::load_or_default(&path).unwrap();
        assert_eq!(loaded.entries, manifest.entries);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(manifest.entries.is_empty());
    }
}
