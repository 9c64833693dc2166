//! Drift detection: determinism verification and assessment comparison.
//!
//! Scores and casualty counts are integers, so every delta is an exact
//! i64 difference.

use std::collections::BTreeSet;

use serde::Serialize;

use aegis_engine::domain::{HazardType, RiskAssessment};
use aegis_engine::engine::{AssessmentEngine, AssessmentInput};
use aegis_engine::hashing::canonical_hash;

/// Assess the same input twice and assert identical canonical hashes.
/// Panics on failure; returns the hash otherwise.
pub fn verify_determinism(engine: &AssessmentEngine, input: &AssessmentInput) -> String {
    let hash1 = canonical_hash(&engine.assess(input));
    let hash2 = canonical_hash(&engine.assess(input));

    if hash1 != hash2 {
        panic!(
            "DETERMINISM FAILURE: two assessments produced different hashes.\n\
             Run 1: {}\n\
             Run 2: {}",
            hash1, hash2
        );
    }
    hash1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HazardDelta {
    pub hazard: HazardType,
    pub score_a: i64,
    pub score_b: i64,
    pub delta: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    /// One entry per hazard, declaration order. A hazard missing from one
    /// side counts as 0.
    pub hazards: Vec<HazardDelta>,
    pub dominant_a: HazardType,
    pub dominant_b: HazardType,
    pub casualties_a: i64,
    pub casualties_b: i64,
    pub casualty_delta: i64,
    pub cascades_added: Vec<String>,
    pub cascades_cleared: Vec<String>,
}

impl DriftReport {
    pub fn dominant_changed(&self) -> bool {
        self.dominant_a != self.dominant_b
    }

    /// Hazards whose score moved, largest absolute move first.
    pub fn movers(&self) -> Vec<&HazardDelta> {
        let mut moved: Vec<&HazardDelta> = self.hazards.iter().filter(|d| d.delta != 0).collect();
        moved.sort_by_key(|d| std::cmp::Reverse(d.delta.abs()));
        moved
    }

    pub fn is_stable(&self) -> bool {
        self.hazards.iter().all(|d| d.delta == 0)
            && !self.dominant_changed()
            && self.casualty_delta == 0
            && self.cascades_added.is_empty()
            && self.cascades_cleared.is_empty()
    }
}

/// Structured comparison from `a` (earlier) to `b` (later).
pub fn compare_assessments(a: &RiskAssessment, b: &RiskAssessment) -> DriftReport {
    let hazards = HazardType::ALL
        .iter()
        .map(|&hazard| {
            let score_a = i64::from(a.risks.score_of(hazard));
            let score_b = i64::from(b.risks.score_of(hazard));
            HazardDelta {
                hazard,
                score_a,
                score_b,
                delta: score_b - score_a,
            }
        })
        .collect();

    let titles_a: BTreeSet<&str> = a.cascades.iter().map(|w| w.title.as_str()).collect();
    let titles_b: BTreeSet<&str> = b.cascades.iter().map(|w| w.title.as_str()).collect();

    let casualties_a = a.casualties.without_precautions as i64;
    let casualties_b = b.casualties.without_precautions as i64;

    DriftReport {
        hazards,
        dominant_a: a.casualties.dominant_risk,
        dominant_b: b.casualties.dominant_risk,
        casualties_a,
        casualties_b,
        casualty_delta: casualties_b - casualties_a,
        cascades_added: titles_b.difference(&titles_a).map(|s| s.to_string()).collect(),
        cascades_cleared: titles_a.difference(&titles_b).map(|s| s.to_string()).collect(),
    }
}
