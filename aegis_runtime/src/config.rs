//! Runtime configuration.
//!
//! Defaults match the dashboard: 24 forecast steps (72 hours), a 500 km
//! seismic search radius and the general-user profile. A JSON document
//! may override any subset of fields, and `AEGIS_*` environment variables
//! override both.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use aegis_engine::domain::Role;
use aegis_engine::engine::{AssessmentEngine, AssessmentInput};
use aegis_engine::forecast::DEFAULT_FORECAST_STEPS;
use aegis_engine::sequence::SeededSequence;

use crate::error::{Result, RuntimeError};

pub const ENV_FORECAST_STEPS: &str = "AEGIS_FORECAST_STEPS";
pub const ENV_SEISMIC_RADIUS_KM: &str = "AEGIS_SEISMIC_RADIUS_KM";
pub const ENV_DEFAULT_ROLE: &str = "AEGIS_DEFAULT_ROLE";
pub const ENV_SEEDED_FORECAST: &str = "AEGIS_SEEDED_FORECAST";

/// Upper bound on forecast steps (30 days of 3-hour steps).
pub const MAX_FORECAST_STEPS: u32 = 240;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RuntimeConfig {
    pub forecast_steps: u32,
    pub seismic_radius_km: f64,
    pub default_role: String,
    /// Derive forecast noise from the scoring seed so refreshes of the
    /// same telemetry chart identically.
    pub seeded_forecast: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            forecast_steps: DEFAULT_FORECAST_STEPS,
            seismic_radius_km: 500.0,
            default_role: Role::GeneralUser.label().to_string(),
            seeded_forecast: false,
        }
    }
}

impl RuntimeConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RuntimeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Apply `AEGIS_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_FORECAST_STEPS) {
            self.forecast_steps = v
                .trim()
                .parse()
                .map_err(|_| RuntimeError::Config(format!("{}={:?}", ENV_FORECAST_STEPS, v)))?;
        }
        if let Some(v) = lookup(ENV_SEISMIC_RADIUS_KM) {
            self.seismic_radius_km = v
                .trim()
                .parse()
                .map_err(|_| RuntimeError::Config(format!("{}={:?}", ENV_SEISMIC_RADIUS_KM, v)))?;
        }
        if let Some(v) = lookup(ENV_DEFAULT_ROLE) {
            self.default_role = v;
        }
        if let Some(v) = lookup(ENV_SEEDED_FORECAST) {
            self.seeded_forecast = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(RuntimeError::Config(format!(
                        "{}={:?}",
                        ENV_SEEDED_FORECAST, v
                    )))
                }
            };
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.forecast_steps > MAX_FORECAST_STEPS {
            return Err(RuntimeError::Config(format!(
                "forecastSteps {} exceeds {}",
                self.forecast_steps, MAX_FORECAST_STEPS
            )));
        }
        if !self.seismic_radius_km.is_finite() || self.seismic_radius_km <= 0.0 {
            return Err(RuntimeError::Config(format!(
                "seismicRadiusKm must be positive, got {}",
                self.seismic_radius_km
            )));
        }
        if Role::from_label(&self.default_role).is_none() {
            return Err(RuntimeError::Config(format!(
                "unknown defaultRole {:?}",
                self.default_role
            )));
        }
        Ok(())
    }

    /// Engine options implied by this configuration.
    pub fn engine(&self) -> AssessmentEngine {
        AssessmentEngine::new().with_forecast_steps(self.forecast_steps)
    }

    /// Engine for one input. With `seeded_forecast` the forecast noise is
    /// seeded from the same location/temperature state as the scores.
    pub fn engine_for(&self, input: &AssessmentInput) -> AssessmentEngine {
        let engine = self.engine();
        if !self.seeded_forecast {
            return engine;
        }
        let seed = SeededSequence::from_location(input.geo.lat, input.geo.lon, input.weather.temp).state();
        engine.with_forecast_seed(seed)
    }
}
