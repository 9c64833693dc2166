//! Mission state.
//!
//! A mission is one locked location plus the latest assessment made for
//! it. Records are immutable: `lock`, `refresh` and `reset` each return a
//! new record and leave the receiver untouched.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use aegis_engine::domain::{
    CascadeWarning, CasualtyProjection, FireSnapshot, ForecastPoint, GeoPoint, RiskSet, Role,
    SeismicSnapshot, WeatherSnapshot,
};
use aegis_engine::engine::{AssessmentEngine, AssessmentInput};

use crate::error::{Result, RuntimeError};
use crate::telemetry::{validate_geo, validate_input};

pub const EMERGENCY_ID_PREFIX: &str = "EM-";
pub const EMERGENCY_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const EMERGENCY_ID_LEN: usize = 6;

/// Where and for whom a mission is locked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissionTarget {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub role: String,
}

/// One round of upstream telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Telemetry {
    pub weather: WeatherSnapshot,
    pub seismic: SeismicSnapshot,
    pub fires: FireSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MissionState {
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub role: String,
    pub locked: bool,
    pub weather: Option<WeatherSnapshot>,
    pub seismic: Option<SeismicSnapshot>,
    pub fires: Option<FireSnapshot>,
    pub risks: RiskSet,
    pub forecast: Vec<ForecastPoint>,
    pub cascades: Vec<CascadeWarning>,
    pub casualties: Option<CasualtyProjection>,
    pub precautions: Vec<String>,
    pub emergency_id: String,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Default for MissionState {
    fn default() -> Self {
        Self {
            city: String::new(),
            lat: 0.0,
            lon: 0.0,
            role: Role::GeneralUser.label().to_string(),
            locked: false,
            weather: None,
            seismic: None,
            fires: None,
            risks: RiskSet::default(),
            forecast: Vec::new(),
            cascades: Vec::new(),
            casualties: None,
            precautions: Vec::new(),
            emergency_id: String::new(),
            refreshed_at: None,
        }
    }
}

/// `EM-` followed by six characters drawn from `A-Z0-9`.
pub fn generate_emergency_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(EMERGENCY_ID_PREFIX.len() + EMERGENCY_ID_LEN);
    id.push_str(EMERGENCY_ID_PREFIX);
    for _ in 0..EMERGENCY_ID_LEN {
        let idx = rng.gen_range(0..EMERGENCY_ID_CHARSET.len());
        id.push(EMERGENCY_ID_CHARSET[idx] as char);
    }
    id
}

pub fn is_emergency_id(id: &str) -> bool {
    id.strip_prefix(EMERGENCY_ID_PREFIX).map_or(false, |rest| {
        rest.len() == EMERGENCY_ID_LEN && rest.bytes().all(|b| EMERGENCY_ID_CHARSET.contains(&b))
    })
}

impl MissionState {
    /// A fresh locked mission for `target`. Any previous assessment is
    /// discarded.
    pub fn lock<R: Rng + ?Sized>(&self, target: MissionTarget, rng: &mut R) -> Result<Self> {
        validate_geo(&GeoPoint::new(target.lat, target.lon))?;
        let emergency_id = generate_emergency_id(rng);
        info!(city = %target.city, %emergency_id, "mission locked");
        Ok(Self {
            city: target.city,
            lat: target.lat,
            lon: target.lon,
            role: target.role,
            locked: true,
            emergency_id,
            ..Self::default()
        })
    }

    /// Engine input for this mission and a round of telemetry.
    pub fn assessment_input(&self, telemetry: Telemetry) -> AssessmentInput {
        AssessmentInput {
            weather: telemetry.weather,
            seismic: telemetry.seismic,
            fires: telemetry.fires,
            geo: self.geo(),
            role: self.role.clone(),
        }
    }

    /// Validate telemetry, assess it and return the updated mission.
    pub fn refresh(
        &self,
        engine: &AssessmentEngine,
        telemetry: Telemetry,
        at: DateTime<Utc>,
    ) -> Result<Self> {
        if !self.locked {
            return Err(RuntimeError::NotLocked);
        }
        let input = self.assessment_input(telemetry);
        validate_input(&input)?;

        let assessment = engine.assess(&input);
        debug!(emergency_id = %self.emergency_id, cascades = assessment.cascades.len(), "mission refreshed");

        Ok(Self {
            weather: Some(input.weather),
            seismic: Some(input.seismic),
            fires: Some(input.fires),
            risks: assessment.risks,
            forecast: assessment.forecast,
            cascades: assessment.cascades,
            casualties: Some(assessment.casualties),
            precautions: assessment.precautions,
            refreshed_at: Some(at),
            ..self.clone()
        })
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    pub fn geo(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    pub fn has_assessment(&self) -> bool {
        self.casualties.is_some()
    }
}
