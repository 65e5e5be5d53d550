//! CarePortal: Demo CLI
//!
//! Runs the scripted portal walkthroughs, or a single chat exchange / symptom
//! analysis for text given on the command line.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- --fast symptom-check
//!   cargo run -p demo -- symptoms "fever headache and chills"
//!   cargo run -p demo -- --json chat "I have a sore throat"

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use careportal_contracts::{
    diagnosis::DIAGNOSIS_DISCLAIMER,
    error::{PortalError, PortalResult},
    message::UserRole,
};
use careportal_core::LatencyConfig;
use careportal_engine::PortalConfig;
use careportal_ref::{
    scenarios::{add_patient, chat, find_doctors, symptom_check},
    DoctorDirectory, ScenarioContext,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// CarePortal: mock patient/doctor portal engine.
///
/// Each subcommand runs one walkthrough, all of them, or a one-off query
/// against the canned responder or the symptom table.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "CarePortal mock engine demo",
    long_about = "Runs CarePortal walkthroughs: canned chat replies, table-driven symptom\n\
                  analysis, doctor search and patient lookup, all with simulated latency."
)]
struct Cli {
    /// Portal config TOML (latency, table overrides, seed).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip every simulated delay.
    #[arg(long, global = true)]
    fast: bool,

    /// Seed for reproducible chat replies. Overrides the config file.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print `chat` / `symptoms` results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every walkthrough in sequence.
    RunAll,
    /// Patient dashboard chat.
    PatientChat,
    /// Doctor dashboard chat.
    DoctorChat,
    /// Symptom checker with several descriptions.
    SymptomCheck,
    /// Doctor search, specialty filter and saved doctors.
    FindDoctors {
        /// Run a single search instead of the walkthrough.
        #[arg(long)]
        term: Option<String>,
        /// Restrict the search to one specialty (exact match).
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Patient lookup by username and add to care list.
    AddPatient,
    /// Send one message to the patient chat and print the exchange.
    Chat {
        text: String,
        /// Open the doctor dashboard chat instead.
        #[arg(long)]
        doctor: bool,
    },
    /// Analyze one symptom description.
    Symptoms { text: String },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> PortalResult<()> {
    let ctx = ScenarioContext::from_config(&load_config(&cli)?)?;

    match &cli.command {
        Command::Chat { text, doctor } => {
            let role = if *doctor { UserRole::Doctor } else { UserRole::Patient };
            let transcript = chat::converse(&ctx, role, &[(text.as_str(), None)]).await?;
            if cli.json {
                print_json(&transcript.export())?;
            } else {
                chat::print_transcript(&transcript);
            }
            return Ok(());
        }
        Command::Symptoms { text } => {
            let candidates = symptom_check::analyze(&ctx, text).await?;
            if cli.json {
                print_json(&candidates)?;
            } else {
                symptom_check::print_candidates(&candidates);
                println!();
                println!("{}", DIAGNOSIS_DISCLAIMER);
            }
            return Ok(());
        }
        Command::FindDoctors { term, specialty } if term.is_some() || specialty.is_some() => {
            let directory = DoctorDirectory::mock();
            let results = directory.search(term.as_deref().unwrap_or(""), specialty.as_deref());
            find_doctors::print_doctors(&results);
            return Ok(());
        }
        _ => {}
    }

    print_banner();

    match cli.command {
        Command::RunAll => {
            chat::run_patient_chat(&ctx).await?;
            chat::run_doctor_chat(&ctx).await?;
            symptom_check::run_scenario(&ctx).await?;
            find_doctors::run_scenario()?;
            add_patient::run_scenario(&ctx).await?;
        }
        Command::PatientChat => chat::run_patient_chat(&ctx).await?,
        Command::DoctorChat => chat::run_doctor_chat(&ctx).await?,
        Command::SymptomCheck => symptom_check::run_scenario(&ctx).await?,
        Command::FindDoctors { .. } => find_doctors::run_scenario()?,
        Command::AddPatient => add_patient::run_scenario(&ctx).await?,
        Command::Chat { .. } | Command::Symptoms { .. } => {}
    }

    println!("All selected walkthroughs completed successfully.");
    Ok(())
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> PortalResult<PortalConfig> {
    let mut config = match &cli.config {
        Some(path) => PortalConfig::from_file(path)?,
        None => PortalConfig::default(),
    };
    if cli.fast {
        config.latency = LatencyConfig::instant();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    debug!(?config, "portal config resolved");
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> PortalResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| PortalError::Config {
        reason: format!("failed to render JSON output: {}", e),
    })?;
    println!("{}", rendered);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("CarePortal: Mock Patient/Doctor Portal");
    println!("======================================");
    println!();
    println!("Every reply passes through the same pipeline:");
    println!("  [1] Input gate: blank text is rejected, nothing is recorded");
    println!("  [2] The user message is appended to the session transcript");
    println!("  [3] A cancellable timer simulates thinking time");
    println!("  [4] The canned responder or symptom table produces the result");
    println!("  [5] The bot message is appended; closing the page cancels step 3");
    println!();
}
