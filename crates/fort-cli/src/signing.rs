//! # Signing Subcommands
//!
//! - `fort keygen`: generate an aggregator key pair.
//! - `fort sign`: score a ledger offline and emit a signed attestation.
//! - `fort verify`: check an attestation JSON against a signer key.
//!
//! Key files hold standard base64: `<prefix>.key` is the 32-byte seed (the
//! value `AGG_SK_BASE64` expects), `<prefix>.pub` the 32-byte public key.
//!
//! ## Security Invariant
//!
//! Seeds are read from files, never from arguments, so they stay out of
//! shell history and process listings. Nothing here prints a seed except
//! `keygen` writing its own key file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use fort_attestation::{verify_attestation, Attestation, AttestationDocument, AttestationSigner};
use fort_core::{UnixTimestamp, UserAddress};
use fort_crypto::{Ed25519KeyPair, Ed25519PublicKey};
use fort_scoring::DEFAULT_WINDOW_DAYS;

use crate::scoring::{load_model, score_file};

/// Arguments for `fort keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Output directory for the key files.
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
    /// Prefix for the key filenames.
    #[arg(long, default_value = "fort")]
    pub prefix: String,
}

/// Arguments for `fort sign`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// File containing the base64 signing seed.
    #[arg(long)]
    pub key: PathBuf,
    /// Path to the model JSON.
    #[arg(long)]
    pub model: PathBuf,
    /// Chain address of the scored user.
    #[arg(long)]
    pub user: String,
    /// Unix timestamp to bind; defaults to now.
    #[arg(long)]
    pub ts: Option<u64>,
    /// Aggregation window in days.
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    pub window: usize,
    /// Ledger CSV to score.
    #[arg(value_name = "LEDGER")]
    pub ledger: PathBuf,
}

/// Arguments for `fort verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Signer public key: base64, a chain address, or a `.pub` file.
    #[arg(long)]
    pub pubkey: String,
    /// Attestation JSON (as returned by `/sign-score-latest` or `fort sign`).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute `fort keygen`.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    std::fs::create_dir_all(&args.output).with_context(|| {
        format!("failed to create output directory: {}", args.output.display())
    })?;

    let kp = Ed25519KeyPair::generate();
    let pk = kp.public_key();

    let sk_path = args.output.join(format!("{}.key", args.prefix));
    let pk_path = args.output.join(format!("{}.pub", args.prefix));
    std::fs::write(&sk_path, kp.export_seed_base64())
        .with_context(|| format!("failed to write private key: {}", sk_path.display()))?;
    std::fs::write(&pk_path, pk.to_base64())
        .with_context(|| format!("failed to write public key: {}", pk_path.display()))?;

    println!("OK: generated Ed25519 keypair");
    println!("  Private key: {}", sk_path.display());
    println!("  Public key:  {}", pk_path.display());
    println!("  Address:     {}", pk.address());
    Ok(0)
}

fn load_signer(key_path: &Path) -> Result<AttestationSigner> {
    let seed = std::fs::read_to_string(key_path)
        .with_context(|| format!("failed to read private key: {}", key_path.display()))?;
    AttestationSigner::from_seed_base64(seed.trim())
        .with_context(|| format!("invalid private key: {}", key_path.display()))
}

/// Execute `fort sign`.
pub fn run_sign(args: &SignArgs) -> Result<u8> {
    let signer = load_signer(&args.key)?;
    let user = UserAddress::parse(&args.user).context("invalid --user address")?;
    let model = load_model(&args.model, false)?;
    let report = score_file(&model, &args.ledger, args.window)?;

    let attestation = signer.sign(
        user,
        report.result.score,
        report.model_hash_hex,
        report.artifact_hash_hex,
        args.ts.map(UnixTimestamp::from_secs),
    );
    tracing::info!(score = report.result.score.value(), "attestation signed");
    println!("{}", serde_json::to_string_pretty(&attestation.to_document())?);
    Ok(0)
}

/// Parse a public key given as base64, a chain address, or a key file.
fn parse_pubkey(input: &str) -> Result<Ed25519PublicKey> {
    let raw = if Path::new(input).is_file() {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read public key: {input}"))?
    } else {
        input.to_string()
    };
    let raw = raw.trim();
    if raw.len() == UserAddress::ENCODED_LEN {
        let addr = UserAddress::parse(raw).context("invalid signer address")?;
        return Ok(Ed25519PublicKey::from(addr));
    }
    Ed25519PublicKey::from_base64(raw).map_err(|e| anyhow::anyhow!("invalid public key: {e}"))
}

/// Execute `fort verify`. Exit code 0 when valid, 1 when not.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let pk = parse_pubkey(&args.pubkey)?;
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read attestation: {}", args.file.display()))?;
    let doc: AttestationDocument = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse attestation: {}", args.file.display()))?;
    let attestation = match Attestation::try_from(doc) {
        Ok(a) => a,
        Err(e) => bail!("malformed attestation: {e}"),
    };

    match verify_attestation(&pk, &attestation) {
        Ok(()) => {
            println!(
                "OK: signature is valid (user {}, score {}, ts {})",
                attestation.user,
                attestation.score,
                attestation.timestamp.to_rfc3339()
            );
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}
