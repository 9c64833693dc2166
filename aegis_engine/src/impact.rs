//! Aegis Engine v1: Impact Projector
//!
//! Turns the dominant hazard score into casualty estimates with and
//! without mitigation. Population is a heuristic, not census data.

use crate::arithmetic::{round_half_up, round_tenth};
use crate::domain::{CasualtyProjection, GeoPoint, HazardType, RiskSet};

pub const BASE_POPULATION: f64 = 50_000.0;
pub const URBAN_MULTIPLIER: f64 = 2.5;
pub const MITIGATION_FACTOR: f64 = 0.82;
pub const DEFAULT_LETHALITY: f64 = 0.01;

/// Base lethality per hazard.
pub const LETHALITY: [(HazardType, f64); 10] = [
    (HazardType::Flood, 0.012),
    (HazardType::Heatwave, 0.005),
    (HazardType::Cyclone, 0.022),
    (HazardType::Drought, 0.002),
    (HazardType::Landslide, 0.035),
    (HazardType::Wildfire, 0.018),
    (HazardType::Avalanche, 0.038),
    (HazardType::Seismic, 0.042),
    (HazardType::Tsunami, 0.055),
    (HazardType::Volcano, 0.048),
];

pub fn base_lethality(hazard: HazardType) -> f64 {
    LETHALITY
        .iter()
        .find(|(h, _)| *h == hazard)
        .map(|(_, l)| *l)
        .unwrap_or(DEFAULT_LETHALITY)
}

/// Heuristic exposed population. Mid latitudes count as urbanised; the
/// longitude term is a sinusoid of the raw degree value.
pub fn affected_population(geo: &GeoPoint) -> u64 {
    let abs_lat = geo.lat.abs();
    let urban = if abs_lat > 10.0 && abs_lat < 40.0 {
        URBAN_MULTIPLIER
    } else {
        1.0
    };
    round_half_up(BASE_POPULATION * urban * (1.0 + 0.2 * geo.lon.sin())) as u64
}

/// Project casualties for the dominant hazard (ties go to the earlier
/// hazard). An empty risk set projects zero casualties for the first hazard.
pub fn project_casualties(risks: &RiskSet, geo: &GeoPoint) -> CasualtyProjection {
    let (dominant, score) = risks
        .dominant()
        .map(|r| (r.hazard, r.score))
        .unwrap_or((HazardType::ALL[0], 0));

    let affected_pop = affected_population(geo);
    let severity = f64::from(score) / 100.0;
    let severity_scaler = severity * severity;

    let without_precautions =
        round_half_up(affected_pop as f64 * base_lethality(dominant) * severity_scaler) as u64;
    let with_precautions =
        round_half_up(without_precautions as f64 * (1.0 - MITIGATION_FACTOR)) as u64;
    let drop_percentage = if without_precautions > 0 {
        round_tenth((1.0 - with_precautions as f64 / without_precautions as f64) * 100.0)
    } else {
        0.0
    };

    CasualtyProjection {
        without_precautions,
        with_precautions,
        drop_percentage,
        dominant_risk: dominant,
        affected_pop,
    }
}
