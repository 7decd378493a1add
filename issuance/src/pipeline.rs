//! The batch issuance pipeline.

use crate::error::IssuanceError;
use crate::generator::IdGenerator;
use crate::manifest::ManifestEntry;
use crate::sink::ArtifactSink;
use std::sync::Arc;
use veriseal_transport::{CallOutcome, RegistryTransport, RejectReason};

/// Attempts per item before concluding the generator is broken. A single
/// duplicate must never abort a batch; a stream of them means something
/// other than bad luck.
const MAX_ATTEMPTS_PER_ITEM: u32 = 8;

/// Registers a batch of fresh tokens and emits one artifact each.
///
/// Items are processed sequentially with respect to the registry, so two
/// registrations from the same run never race each other. The pipeline
/// may be re-run additively: pass the next free index and the new entries
/// continue the manifest.
pub struct IssuancePipeline {
    transport: Arc<dyn RegistryTransport>,
    generator: Box<dyn IdGenerator>,
    sink: Box<dyn ArtifactSink>,
}

impl IssuancePipeline {
    pub fn new(
        transport: Arc<dyn RegistryTransport>,
        generator: Box<dyn IdGenerator>,
        sink: Box<dyn ArtifactSink>,
    ) -> Self {
        Self {
            transport,
            generator,
            sink,
        }
    }

    /// Issue `batch_size` tokens, numbering entries from `first_index`.
    pub async fn run(
        &self,
        batch_size: u64,
        first_index: u64,
    ) -> Result<Vec<ManifestEntry>, IssuanceError> {
        if batch_size == 0 {
            return Err(IssuanceError::EmptyBatch);
        }

        let mut entries = Vec::with_capacity(batch_size as usize);
        for offset in 0..batch_size {
            let index = first_index + offset;
            let entry = self.issue_one(index).await?;
            tracing::info!(
                index,
                token = %entry.identifier,
                location = %entry.artifact_location,
                "token issued"
            );
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Register one fresh identifier, retrying with a new identifier on a
    /// reported duplicate.
    async fn issue_one(&self, index: u64) -> Result<ManifestEntry, IssuanceError> {
        for attempt in 1..=MAX_ATTEMPTS_PER_ITEM {
            let id = self.generator.generate();
            let call = self.transport.submit_register(&id).await?;
            match self.transport.confirm(&call).await? {
                CallOutcome::Registered => {
                    let artifact = veriseal_codec::encode(&id);
                    let location = self.sink.emit(&artifact, index)?;
                    return Ok(ManifestEntry {
                        index,
                        identifier: id.to_string(),
                        artifact_location: location,
                    });
                }
                CallOutcome::Rejected(RejectReason::DuplicateIdentifier) => {
                    tracing::warn!(token = %id, attempt, "identifier collision, regenerating");
                    continue;
                }
                CallOutcome::Rejected(other) => {
                    return Err(IssuanceError::UnexpectedRejection(other.as_str().into()));
                }
                CallOutcome::Consumed(_) => {
                    return Err(IssuanceError::UnexpectedRejection(
                        "consumption receipt for a registration call".into(),
                    ));
                }
            }
        }
        Err(IssuanceError::IdSpaceExhausted {
            attempts: MAX_ATTEMPTS_PER_ITEM,
        })
    }
}
