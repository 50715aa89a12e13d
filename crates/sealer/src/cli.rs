//! Command-line interface.
//!
//! ```text
//! kbs-seal encrypt --pubkey pub.pem --in secret.bin --out secret.json [--alg RSA-OAEP-256]
//! kbs-seal decrypt --privkey priv.pem --in secret.json --out secret.bin
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use common::EnvelopeError;
use tracing::info;

use crate::config::Config;
use crate::{envelope, files, keys};

/// Encrypt resources into JSON envelopes for the KBS encrypted local fs backend.
#[derive(Debug, Parser)]
#[command(name = "kbs-seal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt a file into a Base64 JSON envelope
    Encrypt(EncryptArgs),

    /// Decrypt an envelope with the matching private key (verification aid)
    Decrypt(DecryptArgs),
}

#[derive(Debug, Args)]
pub struct EncryptArgs {
    /// Path to RSA public key (PEM or DER; SPKI or PKCS#1)
    #[arg(long)]
    pub pubkey: PathBuf,

    /// Plaintext file
    #[arg(long = "in", value_name = "FILE")]
    pub input: PathBuf,

    /// Output JSON file
    #[arg(long = "out", value_name = "FILE")]
    pub output: PathBuf,

    /// RSA algorithm for CEK encryption: RSA-OAEP-256 or RSA1_5
    /// [default: KBS_SEAL_DEFAULT_ALG, else RSA-OAEP-256]
    #[arg(long)]
    pub alg: Option<String>,

    /// Write the envelope on a single line instead of indented JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Args)]
pub struct DecryptArgs {
    /// Path to RSA private key (PEM or DER; PKCS#8 or PKCS#1)
    #[arg(long)]
    pub privkey: PathBuf,

    /// Envelope JSON file
    #[arg(long = "in", value_name = "FILE")]
    pub input: PathBuf,

    /// Output plaintext file
    #[arg(long = "out", value_name = "FILE")]
    pub output: PathBuf,
}

/// Execute `cli` with `cfg` supplying defaults for omitted flags.
pub fn run(cli: Cli, cfg: &Config) -> Result<()> {
    match cli.command {
        Command::Encrypt(args) => encrypt(args, cfg),
        Command::Decrypt(args) => decrypt(args),
    }
}

/// Machine-readable code for a failed command: the [`EnvelopeError::code`] of
/// the first envelope error in the chain, or `"internal"`.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<EnvelopeError>())
        .map_or("internal", EnvelopeError::code)
}

fn encrypt(args: EncryptArgs, cfg: &Config) -> Result<()> {
    let alg = args.alg.as_deref().unwrap_or(&cfg.default_alg);
    // Reject the algorithm before touching any file.
    alg.parse::<common::KeyWrapAlgorithm>()?;

    let public_key = keys::read_public_key(&args.pubkey)
        .with_context(|| format!("load public key {}", args.pubkey.display()))?;
    let plaintext = files::read_plaintext(&args.input)
        .with_context(|| format!("read plaintext {}", args.input.display()))?;

    let sealed = envelope::seal(&public_key, &plaintext, alg).context("seal resource")?;

    let pretty = cfg.pretty && !args.compact;
    files::write_envelope(&args.output, &sealed, pretty)
        .with_context(|| format!("write envelope {}", args.output.display()))?;

    info!(
        alg = %sealed.alg,
        plaintext_len = plaintext.len(),
        output = %args.output.display(),
        "resource sealed"
    );
    println!("written: {}", args.output.display());
    Ok(())
}

fn decrypt(args: DecryptArgs) -> Result<()> {
    let private_key = keys::read_private_key(&args.privkey)
        .with_context(|| format!("load private key {}", args.privkey.display()))?;
    let sealed = files::read_envelope(&args.input)
        .with_context(|| format!("read envelope {}", args.input.display()))?;

    let plaintext = envelope::open(&private_key, &sealed).context("open envelope")?;

    files::write_plaintext(&args.output, &plaintext)
        .with_context(|| format!("write plaintext {}", args.output.display()))?;

    info!(
        alg = %sealed.alg,
        plaintext_len = plaintext.len(),
        output = %args.output.display(),
        "envelope opened"
    );
    println!("written: {}", args.output.display());
    Ok(())
}
