use std::sync::{Arc, Mutex};

use veriseal_issuance::{
    ArtifactSink, FsArtifactSink, IdGenerator, IssuanceError, IssuancePipeline, Manifest,
    UuidGenerator,
};
use veriseal_registry::RegistryEngine;
use veriseal_store::MemoryTokenStore;
use veriseal_transport::{InProcessTransport, RegistryTransport};
use veriseal_types::TokenId;

fn transport() -> Arc<InProcessTransport<MemoryTokenStore>> {
    Arc::new(InProcessTransport::new(Arc::new(RegistryEngine::new(
        MemoryTokenStore::new(),
    ))))
}

/// Replays a script of identifiers before falling back to random ones.
struct ScriptedGenerator {
    script: Mutex<Vec<TokenId>>,
    fallback: UuidGenerator,
}

impl ScriptedGenerator {
    fn new(script: Vec<&str>) -> Self {
        Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .rev()
                    .map(|s| TokenId::parse(s).unwrap())
                    .collect(),
            ),
            fallback: UuidGenerator,
        }
    }
}

impl IdGenerator for ScriptedGenerator {
    fn generate(&self) -> TokenId {
        self.script
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| self.fallback.generate())
    }
}

/// Sink that only records payloads, no filesystem.
struct RecordingSink {
    emitted: Mutex<Vec<(u64, String)>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            emitted: Mutex::new(Vec::new()),
        }
    }
}

impl ArtifactSink for RecordingSink {
    fn emit(
        &self,
        artifact: &veriseal_codec::Artifact,
        index: u64,
    ) -> Result<String, IssuanceError> {
        self.emitted
            .lock()
            .unwrap()
            .push((index, artifact.payload().to_string()));
        Ok(format!("mem://artifact_{index}"))
    }
}

#[tokio::test]
async fn batch_produces_ordered_distinct_entries() {
    let transport = transport();
    let dir = tempfile::tempdir().unwrap();
    let pipeline = IssuancePipeline::new(
        transport.clone(),
        Box::new(UuidGenerator),
        Box::new(FsArtifactSink::new(dir.path()).unwrap()),
    );

    let entries = pipeline.run(5, 1).await.unwrap();
    assert_eq!(entries.len(), 5);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.index, i as u64 + 1);
        // Every artifact file decodes back to its manifest identifier.
        let payload = std::fs::read_to_string(&entry.artifact_location).unwrap();
        let decoded = veriseal_codec::decode_payload(&payload).unwrap();
        assert_eq!(decoded.as_str(), entry.identifier);
    }

    let mut ids: Vec<_> = entries.iter().map(|e| e.identifier.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn two_runs_are_additive_with_distinct_identifiers() {
    let transport = transport();
    let pipeline = IssuancePipeline::new(
        transport.clone(),
        Box::new(UuidGenerator),
        Box::new(RecordingSink::new()),
    );

    let mut manifest = Manifest::new();
    let first = pipeline.run(3, manifest.next_index()).await.unwrap();
    manifest.append(first);
    let second = pipeline.run(4, manifest.next_index()).await.unwrap();
    manifest.append(second);

    assert_eq!(manifest.entries.len(), 7);
    let indexes: Vec<u64> = manifest.entries.iter().map(|e| e.index).collect();
    assert_eq!(indexes, (1..=7).collect::<Vec<_>>());

    let mut ids: Vec<_> = manifest.entries.iter().map(|e| e.identifier.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 7);
}

#[tokio::test]
async fn duplicate_identifier_retries_instead_of_aborting() {
    let transport = transport();
    // Occupy "taken" up front.
    let call = transport
        .submit_register(&TokenId::parse("taken").unwrap())
        .await
        .unwrap();
    transport.confirm(&call).await.unwrap();

    // The generator proposes the taken id first, then a fresh one.
    let pipeline = IssuancePipeline::new(
        transport.clone(),
        Box::new(ScriptedGenerator::new(vec!["taken", "fresh"])),
        Box::new(RecordingSink::new()),
    );

    let entries = pipeline.run(1, 1).await.unwrap();
    assert_eq!(entries[0].identifier, "fresh");
}

#[tokio::test]
async fn exhausted_id_space_fails_the_batch() {
    let transport = transport();
    let call = transport
        .submit_register(&TokenId::parse("stuck").unwrap())
        .await
        .unwrap();
    transport.confirm(&call).await.unwrap();

    // Generator that only ever proposes the taken identifier.
    let pipeline = IssuancePipeline::new(
        transport.clone(),
        Box::new(ScriptedGenerator::new(vec!["stuck"; 16])),
        Box::new(RecordingSink::new()),
    );

    assert!(matches!(
        pipeline.run(1, 1).await,
        Err(IssuanceError::IdSpaceExhausted { .. })
    ));
}

#[tokio::test]
async fn empty_batch_rejected() {
    let pipeline = IssuancePipeline::new(
        transport(),
        Box::new(UuidGenerator),
        Box::new(RecordingSink::new()),
    );
    assert!(matches!(
        pipeline.run(0, 1).await,
        Err(IssuanceError::EmptyBatch)
    ));
}
