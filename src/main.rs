//! Mood personalizer — binary entrypoint.
//! Reads a `{"diaries": [...]}` payload from a file argument (or stdin),
//! runs the personalization engine and prints the JSON response.
//!
//! Exit codes: 0 on success, 2 when the payload shape is rejected.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mood_personalizer::api::handle_json;
use mood_personalizer::{PersonalizationConfig, Personalizer};

/// Logs go to stderr so stdout stays a clean JSON response.
/// `PERSONALIZATION_LOG_JSON=1` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mood_personalizer=info,warn"));

    let json = std::env::var("PERSONALIZATION_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn read_payload(arg: Option<String>) -> Result<String> {
    match arg {
        Some(p) if p != "-" => {
            let path = PathBuf::from(p);
            std::fs::read_to_string(&path)
                .with_context(|| format!("reading payload from {}", path.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading payload from stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<ExitCode> {
    // .env is optional (local/dev only)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = PersonalizationConfig::load()?;
    info!(
        min_entries = cfg.gate.min_entries,
        seed = cfg.clustering.seed,
        "personalization config loaded"
    );
    let engine = Personalizer::new(cfg);

    let raw = read_payload(std::env::args().nth(1))?;
    match handle_json(&raw, &engine) {
        Ok(resp) => {
            println!("{}", serde_json::to_string_pretty(&resp)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "rejected payload");
            println!("{}", e.error_body());
            Ok(ExitCode::from(2))
        }
    }
}
