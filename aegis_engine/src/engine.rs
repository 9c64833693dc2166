//! Aegis Engine v1: Engine
//!
//! Top-level orchestrator. Runs the scorer, forecast, cascade, impact and
//! precaution stages over one telemetry snapshot and validates the result.
//!
//! Holds options only. No state survives between assessments.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::cascade::check_cascades;
use crate::domain::{FireSnapshot, GeoPoint, RiskAssessment, SeismicSnapshot, WeatherSnapshot};
use crate::forecast::{generate_forecast_from, generate_forecast_seeded, DEFAULT_FORECAST_STEPS};
use crate::geography::current_month;
use crate::impact::project_casualties;
use crate::invariants::validate_invariants;
use crate::precautions::select_precautions;
use crate::scoring::compute_risks_in_month;

/// One telemetry snapshot plus the profile it is assessed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssessmentInput {
    pub weather: WeatherSnapshot,
    pub seismic: SeismicSnapshot,
    pub fires: FireSnapshot,
    pub geo: GeoPoint,
    pub role: String,
}

/// Assessment options. Unset options fall back to the wall clock and
/// unseeded forecast noise.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentEngine {
    forecast_steps: u32,
    month: Option<u32>,
    forecast_seed: Option<u64>,
    forecast_start: Option<NaiveDateTime>,
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentEngine {
    pub fn new() -> Self {
        Self {
            forecast_steps: DEFAULT_FORECAST_STEPS,
            month: None,
            forecast_seed: None,
            forecast_start: None,
        }
    }

    pub fn with_forecast_steps(mut self, steps: u32) -> Self {
        self.forecast_steps = steps;
        self
    }

    /// Pin the calendar month used by the seasonal gates.
    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Make forecast noise reproducible.
    pub fn with_forecast_seed(mut self, seed: u64) -> Self {
        self.forecast_seed = Some(seed);
        self
    }

    pub fn with_forecast_start(mut self, start: NaiveDateTime) -> Self {
        self.forecast_start = Some(start);
        self
    }

    pub fn forecast_steps(&self) -> u32 {
        self.forecast_steps
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    /// Assess one snapshot:
    ///   1. Score all hazards (seeded jitter)
    ///   2. Project the forecast
    ///   3. Evaluate cascade chains
    ///   4. Project casualties for the dominant hazard
    ///   5. Select precautions for the role
    ///   6. Validate invariants on the result
    #[instrument(skip_all, fields(lat = input.geo.lat, lon = input.geo.lon))]
    pub fn assess(&self, input: &AssessmentInput) -> RiskAssessment {
        let month = self.month.unwrap_or_else(current_month);
        let risks = compute_risks_in_month(
            &input.weather,
            &input.seismic,
            &input.fires,
            &input.geo,
            month,
        );

        let start = self
            .forecast_start
            .unwrap_or_else(|| Local::now().naive_local());
        let forecast = match self.forecast_seed {
            Some(seed) => generate_forecast_seeded(&input.weather, self.forecast_steps, start, seed),
            None => generate_forecast_from(
                &input.weather,
                self.forecast_steps,
                start,
                &mut rand::thread_rng(),
            ),
        };

        let cascades = check_cascades(&risks, &input.weather, &input.seismic);
        let casualties = project_casualties(&risks, &input.geo);
        let precautions = select_precautions(&input.role, &risks);

        let assessment = RiskAssessment {
            risks,
            forecast,
            cascades,
            casualties,
            precautions,
        };
        validate_invariants(&assessment);

        info!(
            month,
            dominant = %assessment.casualties.dominant_risk,
            cascades = assessment.cascades.len(),
            "assessment complete"
        );
        assessment
    }
}
