//! Aegis Engine v1: Fixture Harness
//!
//! Loads telemetry fixtures, assesses each one twice with the fixture's
//! month pinned, and compares the canonical hash against the recorded one.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use serde::Deserialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use aegis_engine::engine::{AssessmentEngine, AssessmentInput};
use aegis_engine::hashing::canonical_hash;

const FIXTURE_PATHS: [&str; 3] = [
    "assessments.json",
    "tests/golden/assessments.json",
    "aegis_engine/tests/golden/assessments.json",
];

#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    month: u32,
    input: AssessmentInput,
    expected_hash: Option<String>,
}

fn locate_fixtures() -> Option<String> {
    if let Some(arg) = std::env::args().nth(1) {
        return Some(arg);
    }
    FIXTURE_PATHS
        .iter()
        .find(|p| Path::new(p).exists())
        .map(|p| p.to_string())
}

fn run() -> Result<bool, Box<dyn Error>> {
    let path = locate_fixtures().ok_or("no fixture file found; pass a path as the first argument")?;
    let data = fs::read_to_string(&path)?;
    let fixtures: Vec<Fixture> = serde_json::from_str(&data)?;
    info!(path = %path, count = fixtures.len(), "loaded fixtures");

    let mut passed = 0;
    for fixture in &fixtures {
        let engine = AssessmentEngine::new().with_month(fixture.month);
        let first = engine.assess(&fixture.input);
        let h1 = canonical_hash(&first);
        let h2 = canonical_hash(&engine.assess(&fixture.input));

        let deterministic = h1 == h2;
        let matches = fixture.expected_hash.as_deref().map_or(true, |e| e == h1);

        if deterministic && matches {
            passed += 1;
            println!(
                "[PASS] {}: hash={}, dominant={}, cascades={}",
                fixture.name,
                h1,
                first.casualties.dominant_risk,
                first.cascades.len()
            );
        } else {
            println!("[FAIL] {}:", fixture.name);
            if !deterministic {
                error!(run1 = %h1, run2 = %h2, "determinism failure");
            }
            if let Some(expected) = fixture.expected_hash.as_deref().filter(|_| !matches) {
                warn!(got = %h1, expected, "hash mismatch");
            }
        }
    }

    println!("\n===========================================");
    println!("Results: {}/{} passed", passed, fixtures.len());
    Ok(passed == fixtures.len())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aegis_engine=info")),
        )
        .init();

    match run() {
        Ok(true) => {
            println!("[OK] All fixture hash checks PASSED.");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("[FAIL] Some checks failed.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "harness aborted");
            ExitCode::FAILURE
        }
    }
}
