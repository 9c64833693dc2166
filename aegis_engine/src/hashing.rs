//! Aegis Engine v1: Canonical Hashing
//!
//! Deterministic canonical serialization + SHA-256 of the reproducible
//! part of an assessment. The forecast is left out because its noise is
//! unseeded unless the caller opts in.
//!
//! Field order: engine_version, risks, cascades, casualties, precautions.
//! Risks keep hazard declaration order; cascades keep emission order.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::RiskAssessment;
use crate::ENGINE_VERSION;

/// Canonical serialization to UTF-8 JSON bytes, no whitespace.
pub fn canonical_serialize(assessment: &RiskAssessment) -> Vec<u8> {
    build_canonical_value(assessment).to_string().into_bytes()
}

/// SHA-256 of the canonical serialization. Lowercase hex.
pub fn canonical_hash(assessment: &RiskAssessment) -> String {
    hex_digest(&canonical_serialize(assessment))
}

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn hex_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn build_canonical_value(assessment: &RiskAssessment) -> Value {
    let risks: Vec<Value> = assessment
        .risks
        .iter()
        .map(|r| {
            let mut m = Map::new();
            m.insert("type".to_string(), Value::String(r.hazard.label().to_string()));
            m.insert("score".to_string(), Value::from(r.score));
            m.insert("trend".to_string(), Value::from(r.trend));
            m.insert(
                "confidence".to_string(),
                serde_json::to_value(r.confidence).unwrap_or(Value::Null),
            );
            Value::Object(m)
        })
        .collect();

    let cascades: Vec<Value> = assessment
        .cascades
        .iter()
        .map(|w| {
            let mut m = Map::new();
            m.insert(
                "severity".to_string(),
                serde_json::to_value(w.severity).unwrap_or(Value::Null),
            );
            m.insert("title".to_string(), Value::String(w.title.clone()));
            m.insert("description".to_string(), Value::String(w.description.clone()));
            Value::Object(m)
        })
        .collect();

    let c = &assessment.casualties;
    let mut casualties = Map::new();
    casualties.insert("withoutPrecautions".to_string(), Value::from(c.without_precautions));
    casualties.insert("withPrecautions".to_string(), Value::from(c.with_precautions));
    // Tenths as an integer keeps floats out of the hash input.
    casualties.insert(
        "dropPermille".to_string(),
        Value::from((c.drop_percentage * 10.0).round() as i64),
    );
    casualties.insert(
        "dominantRisk".to_string(),
        Value::String(c.dominant_risk.label().to_string()),
    );
    casualties.insert("affectedPop".to_string(), Value::from(c.affected_pop));

    let mut root = Map::new();
    root.insert("engine_version".to_string(), Value::from(ENGINE_VERSION));
    root.insert("risks".to_string(), Value::Array(risks));
    root.insert("cascades".to_string(), Value::Array(cascades));
    root.insert("casualties".to_string(), Value::Object(casualties));
    root.insert(
        "precautions".to_string(),
        Value::Array(
            assessment
                .precautions
                .iter()
                .cloned()
                .map(Value::String)
                .collect(),
        ),
    );
    Value::Object(root)
}
