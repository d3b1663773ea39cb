//! Batch triage CLI.
//!
//! Reads plain-text clinical documents, runs each through the triage
//! pipeline, and prints the prioritized worklist. Document acquisition
//! (PDF rendering, OCR) happens upstream — this binary consumes the
//! flattened text those producers emit.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use acuity::config;
use acuity::history::InMemoryHistory;
use acuity::pipeline::{ActiveFeatures, NarrativeBridge, OllamaClient, TriageEngine, TriageProcessor};
use acuity::worklist::{TriageBoard, WorklistEntry};

#[derive(Parser)]
#[command(name = "acuity", version, about = "Clinical triage decision pipeline")]
struct Cli {
    /// Documents to triage, as PATIENT_ID=PATH pairs (a bare PATH uses
    /// the file stem as the patient id). Processed in order.
    #[arg(required = true)]
    documents: Vec<String>,

    /// Directory holding the trained model artifacts.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Ollama endpoint for narrative synthesis.
    #[arg(long, default_value = config::OLLAMA_BASE_URL)]
    ollama_url: String,

    /// Narrative model identifier.
    #[arg(long, default_value = config::DEFAULT_NARRATIVE_MODEL)]
    narrative_model: String,

    /// Comma-separated active risk features (defaults to the standard
    /// panel).
    #[arg(long)]
    features: Option<String>,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cli = Cli::parse();

    let models_dir = cli.models_dir.unwrap_or_else(config::models_dir);
    let engine = match TriageEngine::load(&models_dir) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, models_dir = %models_dir.display(), "Cannot start without model artifacts");
            std::process::exit(1);
        }
    };

    let bridge = NarrativeBridge::new(
        Box::new(OllamaClient::new(&cli.ollama_url, config::NARRATIVE_TIMEOUT_SECS)),
        &cli.narrative_model,
    );
    let active = cli
        .features
        .as_deref()
        .map(ActiveFeatures::parse)
        .unwrap_or_default();
    let processor = TriageProcessor::new(engine, bridge, Box::new(InMemoryHistory::new()), active);

    let documents = read_documents(&cli.documents);
    if documents.is_empty() {
        tracing::error!("No readable documents supplied");
        std::process::exit(1);
    }

    let mut board = TriageBoard::new();
    for (patient_id, result) in processor.process_batch(&documents) {
        match result {
            Ok(entry) => board.upsert(entry),
            Err(e) => eprintln!("!! {patient_id}: triage failed: {e}"),
        }
    }

    print_board(&board);
}

/// Resolve PATIENT_ID=PATH arguments into (id, text) pairs. Unreadable
/// files are skipped — one bad document must not sink the batch.
fn read_documents(args: &[String]) -> Vec<(String, String)> {
    let mut documents = Vec::new();
    for arg in args {
        let (patient_id, path) = match arg.split_once('=') {
            Some((id, path)) => (id.to_string(), PathBuf::from(path)),
            None => {
                let path = PathBuf::from(arg);
                let id = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| arg.clone());
                (id, path)
            }
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => documents.push((patient_id, text)),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Skipping unreadable document");
            }
        }
    }
    documents
}

fn print_board(board: &TriageBoard) {
    println!("\n=== LIVE TRIAGE BOARD ===\n");
    for entry in board.prioritized() {
        print_entry(entry);
    }
}

fn print_entry(entry: &WorklistEntry) {
    println!("[{}] Patient {}", entry.band().label(), entry.patient_id);
    if entry.trend.is_worsening() {
        println!("  TREND ALERT: condition deteriorating since last visit");
    }
    println!(
        "  Level {} ({}) -> {}",
        entry.decision.level, entry.decision.source, entry.decision.department
    );
    if let Some(reason) = &entry.decision.rule_reason {
        println!("  Override: {reason}");
    }
    println!(
        "  SpO2 {}%{}  Temp {}C{}  HR {} bpm{}  Pain {}/10",
        entry.record.oxygen_saturation,
        delta_suffix(entry.trend.spo2_delta.map(f64::from)),
        entry.record.body_temperature,
        delta_suffix(entry.trend.temperature_delta),
        entry.record.heart_rate,
        delta_suffix(entry.trend.heart_rate_delta.map(f64::from)),
        entry.record.pain_level,
    );
    if !entry.driver_summary.is_empty() {
        println!("  Drivers: {}", entry.driver_summary);
    }
    println!("  Synthesis: {}", entry.narrative.synthesis);
    println!("  Action: {}", entry.narrative.recommended_action);
    println!("  Route to: {}", entry.narrative.department_routing);
    println!();
}

fn delta_suffix(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!(" ({d:+})"),
        None => String::new(),
    }
}
