//! Aegis Engine v1: Invariant Checks
//!
//! Hard-fail validation of an assessment. `validate_invariants` panics on
//! the first failure; `try_validate_invariants` reports it instead and is
//! what snapshot restore uses on untrusted input.

use std::collections::BTreeSet;

use crate::cascade::{TITLE_SATURATION_LANDSLIDE, TITLE_SEISMIC_LANDSLIDE};
use crate::domain::{CascadeWarning, CasualtyProjection, ForecastPoint, HazardType, RiskAssessment, RiskSet};
use crate::forecast::{HUMIDITY_CEILING, HUMIDITY_FLOOR};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every assessment check. Panics on the first failure.
pub fn validate_invariants(assessment: &RiskAssessment) {
    if let Err(msg) = try_validate_invariants(assessment) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Non-panicking variant of `validate_invariants`.
pub fn try_validate_invariants(assessment: &RiskAssessment) -> Result<(), String> {
    try_validate_risk_set(&assessment.risks)?;
    try_check_casualty_ordering(&assessment.casualties)?;
    try_check_forecast_humidity(&assessment.forecast)?;
    try_check_landslide_exclusivity(&assessment.cascades)?;
    Ok(())
}

/// Checks that apply to a bare risk set.
pub fn try_validate_risk_set(risks: &RiskSet) -> Result<(), String> {
    try_check_score_bounds(risks)?;
    try_check_hazard_coverage(risks)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

fn try_check_score_bounds(risks: &RiskSet) -> Result<(), String> {
    for r in risks {
        if !(1..=98).contains(&r.score) {
            return Err(format!(
                "[INVARIANT:score_bounds] {} scored {}, outside [1, 98]",
                r.hazard, r.score
            ));
        }
    }
    Ok(())
}

fn try_check_hazard_coverage(risks: &RiskSet) -> Result<(), String> {
    let mut seen: BTreeSet<HazardType> = BTreeSet::new();
    for r in risks {
        if !seen.insert(r.hazard) {
            return Err(format!(
                "[INVARIANT:hazard_coverage] {} scored more than once",
                r.hazard
            ));
        }
    }
    if let Some(missing) = HazardType::ALL.iter().find(|h| !seen.contains(h)) {
        return Err(format!(
            "[INVARIANT:hazard_coverage] {} has no score",
            missing
        ));
    }
    Ok(())
}

fn try_check_casualty_ordering(p: &CasualtyProjection) -> Result<(), String> {
    if p.with_precautions > p.without_precautions {
        return Err(format!(
            "[INVARIANT:casualty_ordering] mitigated {} exceeds unmitigated {}",
            p.with_precautions, p.without_precautions
        ));
    }
    if p.without_precautions > 0 && p.with_precautions == p.without_precautions {
        return Err(format!(
            "[INVARIANT:casualty_ordering] mitigation had no effect on {} casualties",
            p.without_precautions
        ));
    }
    Ok(())
}

fn try_check_forecast_humidity(forecast: &[ForecastPoint]) -> Result<(), String> {
    for p in forecast {
        if !(HUMIDITY_FLOOR..=HUMIDITY_CEILING).contains(&p.humidity) {
            return Err(format!(
                "[INVARIANT:forecast_humidity] humidity {} at +{}h outside [20, 100]",
                p.humidity, p.hours_ahead
            ));
        }
    }
    Ok(())
}

fn try_check_landslide_exclusivity(cascades: &[CascadeWarning]) -> Result<(), String> {
    let seismic = cascades.iter().any(|w| w.title == TITLE_SEISMIC_LANDSLIDE);
    let saturation = cascades.iter().any(|w| w.title == TITLE_SATURATION_LANDSLIDE);
    if seismic && saturation {
        return Err(
            "[INVARIANT:landslide_exclusivity] both landslide trigger paths fired".to_string(),
        );
    }
    Ok(())
}
