//! # fort CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fort_cli::scoring::{self, ModelHashArgs, ScoreArgs};
use fort_cli::signing::{self, KeygenArgs, SignArgs, VerifyArgs};

/// FORT operator CLI.
///
/// Scores transaction ledgers offline, inspects model hashes, and signs or
/// verifies score attestations with the same code the service runs.
#[derive(Parser, Debug)]
#[command(name = "fort", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Score a ledger CSV with a model file.
    Score(ScoreArgs),
    /// Print a model's identity hash.
    ModelHash(ModelHashArgs),
    /// Score a ledger and sign the result.
    Sign(SignArgs),
    /// Verify a signed attestation.
    Verify(VerifyArgs),
    /// Generate an Ed25519 aggregator key pair.
    Keygen(KeygenArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Score(args) => scoring::run_score(args),
        Commands::ModelHash(args) => scoring::run_model_hash(args),
        Commands::Sign(args) => signing::run_sign(args),
        Commands::Verify(args) => signing::run_verify(args),
        Commands::Keygen(args) => signing::run_keygen(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
