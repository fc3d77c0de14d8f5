//! # docseal
//!
//! Command-line front end for Doc-Seal.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `DS_*` environment, flags)
//! 2. Initialise logging on stderr
//! 3. Validate configuration
//! 4. Load key material and storage once, run one command
//! 5. Print the JSON result on stdout; refusals exit with status 2

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ds_02_certificate_authority::{CertificateIssuer, CertificateSubject};
use tracing::error;

use ds_runtime::commands::{authority, documents, keys, CommandOutput};
use ds_runtime::{logging, RuntimeConfig, ServiceContainer};

/// Sign documents, verify them, and release them only after re-verification.
#[derive(Parser, Debug)]
#[command(name = "docseal", version)]
struct Cli {
    /// Data directory (registry and uploads). Overrides DS_DATA_DIR.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Signing key directory. Overrides DS_KEY_DIR.
    #[arg(long, global = true)]
    key_dir: Option<PathBuf>,

    /// Signer name written into signatures. Overrides DS_SIGNER_NAME.
    #[arg(long, global = true)]
    signer: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the document signing key pair
    Keygen {
        /// Replace existing keys (earlier signatures stop verifying)
        #[arg(long)]
        force: bool,
    },
    /// Certificate authority operations
    Ca {
        #[command(subcommand)]
        action: CaCommand,
    },
    /// Sign and register a document
    Sign { file: PathBuf },
    /// Verify a document against a signature sidecar
    Verify { file: PathBuf, sidecar: PathBuf },
    /// Show the registry entry for a verification id
    Lookup { verification_id: String },
    /// Re-verify a registered document and write it out
    Retrieve {
        verification_id: String,
        /// Output path (default: SIGNED_<filename> in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum CaCommand {
    /// Create the CA key pair
    Init {
        #[arg(long, default_value = "Digital Signature CA")]
        name: String,
        #[arg(long, default_value = "ID")]
        country: String,
        #[arg(long)]
        force: bool,
    },
    /// Issue a certificate for a signer public key
    Issue {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        organization: String,
        #[arg(long, default_value_t = 365)]
        days: i64,
        /// Raw public key file (default: the configured signer key)
        #[arg(long)]
        public_key: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Replace an existing certificate file
        #[arg(long)]
        force: bool,
    },
    /// Verify a certificate against the CA public key
    Verify {
        certificate: PathBuf,
        /// Raw public key the certificate must name
        #[arg(long)]
        signer_key: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::from_env()?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.key_dir {
        config.keys.key_dir = dir.clone();
    }
    if let Some(name) = &cli.signer {
        config.signer.name = name.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli, config: RuntimeConfig) -> Result<CommandOutput> {
    match cli.command {
        Command::Keygen { force } => keys::keygen(&config, force),
        Command::Ca { action } => match action {
            CaCommand::Init {
                name,
                country,
                force,
            } => authority::init(&config, CertificateIssuer { name, country }, force),
            CaCommand::Issue {
                name,
                email,
                organization,
                days,
                public_key,
                out,
                force,
            } => authority::issue(
                &config,
                authority::IssueRequest {
                    subject: CertificateSubject {
                        name,
                        email,
                        organization,
                    },
                    valid_days: days,
                    public_key_file: public_key,
                    out,
                    force,
                },
            ),
            CaCommand::Verify {
                certificate,
                signer_key,
            } => authority::verify(&config, &certificate, signer_key.as_deref()),
        },
        Command::Sign { file } => {
            let container = ServiceContainer::open(config)?;
            documents::sign(container.vault(), &file)
        }
        Command::Verify { file, sidecar } => {
            let container = ServiceContainer::open(config)?;
            documents::verify(container.vault(), &file, &sidecar)
        }
        Command::Lookup { verification_id } => {
            let container = ServiceContainer::open(config)?;
            documents::lookup(container.vault(), &verification_id)
        }
        Command::Retrieve {
            verification_id,
            out,
        } => {
            let container = ServiceContainer::open(config)?;
            documents::retrieve(container.vault(), &verification_id, out.as_deref())
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init(&config.logging.level)?;

    // Hashing and file I/O are blocking; keep them off the async workers.
    let outcome = tokio::task::spawn_blocking(move || run(cli, config))
        .await
        .context("command task panicked")?;

    match outcome {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output.body)?);
            Ok(if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        Err(e) => {
            error!("[ds-runtime] {:#}", e);
            Err(e)
        }
    }
}
