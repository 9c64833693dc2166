//! Mission session: configuration plus the current mission record.
//!
//! Operations never edit the record in place. Each one computes a new
//! record from the current one and swaps it in only on success, so a
//! failed refresh leaves the previous assessment visible.
//!
//! Concurrency: `SharedMission` serialises swaps behind a Mutex. No global
//! mutable state.

use std::sync::Mutex;

use chrono::Utc;
use rand::Rng;
use tracing::warn;

use aegis_engine::domain::RiskAssessment;
use aegis_engine::hashing::canonical_hash;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::mission::{MissionState, MissionTarget, Telemetry};
use crate::snapshot_codec::mission_hash;

pub struct MissionSession {
    config: RuntimeConfig,
    mission: MissionState,
}

impl MissionSession {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            mission: MissionState::default(),
        }
    }

    /// Resume from a previously restored record.
    pub fn with_mission(config: RuntimeConfig, mission: MissionState) -> Self {
        Self { config, mission }
    }

    /// Lock onto a target. An empty role falls back to the configured
    /// default.
    pub fn lock<R: Rng + ?Sized>(&mut self, mut target: MissionTarget, rng: &mut R) -> Result<&MissionState> {
        if target.role.trim().is_empty() {
            target.role = self.config.default_role.clone();
        }
        self.mission = self.mission.lock(target, rng)?;
        Ok(&self.mission)
    }

    /// Assess a new round of telemetry. Returns the canonical hash of the
    /// assessment.
    pub fn refresh(&mut self, telemetry: Telemetry) -> Result<String> {
        let input = self.mission.assessment_input(telemetry.clone());
        let engine = self.config.engine_for(&input);
        let next = match self.mission.refresh(&engine, telemetry, Utc::now()) {
            Ok(next) => next,
            Err(err) => {
                warn!(error = %err, "refresh rejected, keeping previous assessment");
                return Err(err);
            }
        };
        let hash = assessment_hash(&next)?;
        self.mission = next;
        Ok(hash)
    }

    pub fn reset(&mut self) {
        self.mission = self.mission.reset();
    }

    pub fn mission(&self) -> &MissionState {
        &self.mission
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Snapshot hash of the whole record.
    pub fn current_hash(&self) -> Result<String> {
        mission_hash(&self.mission)
    }
}

/// Canonical hash of the assessment carried by a refreshed mission.
pub fn assessment_hash(mission: &MissionState) -> Result<String> {
    let casualties = mission
        .casualties
        .clone()
        .ok_or_else(|| RuntimeError::InvariantViolation("mission has no assessment".to_string()))?;
    let assessment = RiskAssessment {
        risks: mission.risks.clone(),
        forecast: mission.forecast.clone(),
        cascades: mission.cascades.clone(),
        casualties,
        precautions: mission.precautions.clone(),
    };
    Ok(canonical_hash(&assessment))
}

/// Thread-safe session handle.
pub struct SharedMission {
    inner: Mutex<MissionSession>,
}

impl SharedMission {
    pub fn new(session: MissionSession) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    fn with_session<T>(&self, f: impl FnOnce(&mut MissionSession) -> Result<T>) -> Result<T> {
        let mut session = self.inner.lock().map_err(|_| RuntimeError::Poisoned)?;
        f(&mut session)
    }

    pub fn lock_target(&self, target: MissionTarget) -> Result<MissionState> {
        self.with_session(|s| s.lock(target, &mut rand::thread_rng()).cloned())
    }

    pub fn refresh(&self, telemetry: Telemetry) -> Result<String> {
        self.with_session(|s| s.refresh(telemetry))
    }

    pub fn reset(&self) -> Result<()> {
        self.with_session(|s| {
            s.reset();
            Ok(())
        })
    }

    /// Clone of the current record.
    pub fn snapshot(&self) -> Result<MissionState> {
        self.with_session(|s| Ok(s.mission().clone()))
    }

    pub fn current_hash(&self) -> Result<String> {
        self.with_session(|s| s.current_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{demo_fires, fallback_seismic, fallback_weather};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn target(role: &str) -> MissionTarget {
        MissionTarget {
            city: "Lagos".to_string(),
            lat: 6.52,
            lon: 3.37,
            role: role.to_string(),
        }
    }

    fn telemetry() -> Telemetry {
        Telemetry {
            weather: fallback_weather(),
            seismic: fallback_seismic(),
            fires: demo_fires(1),
        }
    }

    #[test]
    fn test_empty_role_uses_config_default() {
        let config = RuntimeConfig {
            default_role: "Parent with Children".to_string(),
            ..RuntimeConfig::default()
        };
        let mut session = MissionSession::new(config);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let m = session.lock(target(" "), &mut rng).unwrap();
        assert_eq!(m.role, "Parent with Children");
    }

    #[test]
    fn test_failed_refresh_keeps_previous_record() {
        let mut session = MissionSession::new(RuntimeConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        session.lock(target("Student"), &mut rng).unwrap();
        session.refresh(telemetry()).unwrap();
        let before = session.mission().clone();

        let mut bad = telemetry();
        bad.weather.pressure = -1.0;
        assert!(session.refresh(bad).is_err());
        assert_eq!(session.mission(), &before);
    }

    #[test]
    fn test_refresh_before_lock_fails() {
        let mut session = MissionSession::new(RuntimeConfig::default());
        assert!(matches!(session.refresh(telemetry()), Err(RuntimeError::NotLocked)));
    }

    #[test]
    fn test_shared_mission_round() {
        let shared = SharedMission::new(MissionSession::new(RuntimeConfig::default()));
        let locked = shared.lock_target(target("Transportation/Driver")).unwrap();
        assert!(locked.locked);
        let hash = shared.refresh(telemetry()).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(shared.snapshot().unwrap().has_assessment());
        shared.reset().unwrap();
        assert_eq!(shared.snapshot().unwrap(), MissionState::default());
    }
}
