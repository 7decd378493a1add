//! Veriseal daemon — entry point for running a registry node and for the
//! issuance and verification command-line flows.

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use veriseal_issuance::{FsArtifactSink, IssuancePipeline, Manifest, UuidGenerator};
use veriseal_registry::RegistryEngine;
use veriseal_rpc::RpcServer;
use veriseal_session::{
    present, DecodeFailure, IdentityError, IdentityProvider, ImageDecoder, SessionState,
    VerificationSession,
};
use veriseal_store::MemoryTokenStore;
use veriseal_transport::HttpRegistryClient;
use veriseal_types::{CallerIdentity, NetworkDescriptor};

#[derive(Parser)]
#[command(name = "veriseal-daemon", about = "Veriseal token registry daemon")]
struct Cli {
    /// Registry node URL for client commands.
    /// When a config file is provided, defaults to the file's node value.
    #[arg(long, env = "VERISEAL_NODE")]
    node: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "VERISEAL_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the authoritative registry server.
    Serve {
        /// Address to bind the RPC listener on.
        #[arg(long, env = "VERISEAL_LISTEN")]
        listen: Option<String>,
    },
    /// Register a batch of fresh tokens and emit their artifacts.
    Issue {
        /// Number of tokens to issue.
        #[arg(long)]
        count: u64,

        /// Output directory for artifact payload files and the manifest.
        #[arg(long, default_value = "./out")]
        out: PathBuf,
    },
    /// Verify one artifact: decode, consume, and report the verdict.
    Verify {
        /// Path to the artifact payload file to verify.
        #[arg(long)]
        artifact: PathBuf,

        /// Caller identity to consume under.
        #[arg(long, env = "VERISEAL_CALLER", default_value = "0xcli")]
        caller: String,
    },
    /// Show a token's registry record without touching its state.
    Status {
        /// Token identifier to look up.
        identifier: String,
    },
    /// Show registry-wide counters.
    Telemetry,
}

/// File-backed settings; CLI flags and env vars override each field.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DaemonConfig {
    node: Option<String>,
    listen: Option<String>,
}

impl DaemonConfig {
    fn load(path: &PathBuf) -> Option<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<DaemonConfig>(&contents) {
                Ok(cfg) => {
                    tracing::info!("Loaded config from {}", path.display());
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {e}, using CLI defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {e}, using CLI defaults",
                    path.display()
                );
                None
            }
        }
    }
}

/// Identity provider for non-interactive use: the principal comes from a
/// flag, every request is approved, and network switching is a no-op.
struct StaticIdentityProvider {
    identity: CallerIdentity,
}

#[async_trait::async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn request_identity(&self) -> Result<CallerIdentity, IdentityError> {
        Ok(self.identity.clone())
    }

    async fn switch_network(&self, network: &NetworkDescriptor) -> Result<(), IdentityError> {
        tracing::debug!(network = %network.name, "static identity, network switch is a no-op");
        Ok(())
    }
}

/// Decoder for the text payload files the `issue` command writes.
/// Rendering and scanning actual images happens outside the daemon.
struct TextPayloadDecoder;

impl ImageDecoder for TextPayloadDecoder {
    fn decode(&self, image: &[u8]) -> Result<String, DecodeFailure> {
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    veriseal_utils::init_tracing_with(&cli.log_level);

    let file_config = cli
        .config
        .as_ref()
        .and_then(DaemonConfig::load)
        .unwrap_or_default();

    let network = NetworkDescriptor::local_dev();
    let node_url = cli
        .node
        .or(file_config.node)
        .unwrap_or_else(|| network.endpoint.clone());

    match cli.command {
        Command::Serve { listen } => {
            let listen = listen
                .or(file_config.listen)
                .unwrap_or_else(|| "127.0.0.1:7450".to_string());
            let engine = Arc::new(RegistryEngine::new(MemoryTokenStore::new()));
            tracing::info!(addr = %listen, "Starting registry server");
            RpcServer::new(listen).start(engine).await?;
        }
        Command::Issue { count, out } => {
            let manifest_path = out.join("manifest.json");
            let mut manifest = Manifest::load_or_default(&manifest_path)?;
            let first_index = manifest.next_index();

            let transport = Arc::new(HttpRegistryClient::new(&node_url)?);
            let pipeline = IssuancePipeline::new(
                transport,
                Box::new(UuidGenerator),
                Box::new(FsArtifactSink::new(&out)?),
            );

            tracing::info!(count, first_index, node = %node_url, "Issuing batch");
            let entries = pipeline.run(count, first_index).await?;
            manifest.append(entries);
            manifest.save(&manifest_path)?;
            tracing::info!(
                total = manifest.entries.len(),
                manifest = %manifest_path.display(),
                "Batch issued"
            );
        }
        Command::Verify { artifact, caller } => {
            let image = std::fs::read(&artifact)?;
            let caller = CallerIdentity::parse(caller)?;
            let transport = Arc::new(HttpRegistryClient::new(&node_url)?);

            let mut session = VerificationSession::new(
                transport,
                Arc::new(StaticIdentityProvider { identity: caller }),
                Arc::new(TextPayloadDecoder),
                network,
            );
            session.connect().await?;
            session.submit_image(&image).await?;

            match session.state() {
                SessionState::Resolved(outcome) => {
                    let shown = present(outcome);
                    println!("{}", shown.label);
                    println!("{}", shown.detail);
                    if let Some(reference) = shown.reference {
                        println!("receipt: {reference}");
                    }
                }
                SessionState::Errored { message } => {
                    anyhow::bail!("verification did not complete: {message}");
                }
                other => anyhow::bail!("session ended in unexpected state {}", other.name()),
            }
        }
        Command::Status { identifier } => {
            let client = HttpRegistryClient::new(&node_url)?;
            let id = veriseal_types::TokenId::parse(identifier)?;
            let info = client.token_info(&id).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Telemetry => {
            let client = HttpRegistryClient::new(&node_url)?;
            let telemetry = client.telemetry().await?;
            println!("{}", serde_json::to_string_pretty(&telemetry)?);
        }
    }

    Ok(())
}
