//! Snapshot Codec: mission record encoder/decoder.
//!
//! Transport only. Nothing here touches the filesystem.
//!
//! - `encode_mission`:  MissionState to compact JSON
//! - `decode_mission`:  JSON to MissionState (strict, unknown fields rejected)
//! - `restore_mission`: decode + validation
//! - `mission_hash`:    SHA-256 of the encoded record (lowercase hex)

use sha2::{Digest, Sha256};

use aegis_engine::domain::RiskAssessment;
use aegis_engine::invariants::{try_validate_invariants, try_validate_risk_set};

use crate::error::{Result, RuntimeError};
use crate::mission::{is_emergency_id, MissionState};

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Field order follows the struct declaration, so identical records encode
/// to identical bytes.
pub fn encode_mission(mission: &MissionState) -> Result<String> {
    serde_json::to_string(mission).map_err(|e| RuntimeError::Serialization(e.to_string()))
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Strict decode. No validation; use `restore_mission` for untrusted input.
pub fn decode_mission(json: &str) -> Result<MissionState> {
    serde_json::from_str(json).map_err(|e| RuntimeError::Deserialization(e.to_string()))
}

// ---------------------------------------------------------------------------
// Restore (decode + validate)
// ---------------------------------------------------------------------------

pub fn restore_mission(json: &str) -> Result<MissionState> {
    let mission = decode_mission(json)?;
    validate_mission(&mission)?;
    Ok(mission)
}

/// Structural checks on a decoded record.
pub fn validate_mission(mission: &MissionState) -> Result<()> {
    if mission.locked && !is_emergency_id(&mission.emergency_id) {
        return Err(RuntimeError::InvariantViolation(format!(
            "locked mission carries malformed emergency id {:?}",
            mission.emergency_id
        )));
    }
    if !mission.locked && mission.has_assessment() {
        return Err(RuntimeError::InvariantViolation(
            "unlocked mission carries an assessment".to_string(),
        ));
    }
    match &mission.casualties {
        Some(casualties) => {
            let assessment = RiskAssessment {
                risks: mission.risks.clone(),
                forecast: mission.forecast.clone(),
                cascades: mission.cascades.clone(),
                casualties: casualties.clone(),
                precautions: mission.precautions.clone(),
            };
            try_validate_invariants(&assessment).map_err(RuntimeError::InvariantViolation)
        }
        None if !mission.risks.is_empty() => {
            try_validate_risk_set(&mission.risks).map_err(RuntimeError::InvariantViolation)
        }
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

pub fn mission_hash(mission: &MissionState) -> Result<String> {
    let json = encode_mission(mission)?;
    Ok(Sha256::digest(json.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}
