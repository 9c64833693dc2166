//! Aegis Engine v1: Cascade Analyzer
//!
//! Fixed rule chains over primary hazard scores. Warnings are emitted in
//! rule order and never re-ranked, deduplicated or retracted.
//!
//!   1. Seismic -> landslide -> dam failure
//!   2. Saturation -> landslide (only when chain 1 did not fire)
//!   3. Cyclone -> power grid -> hospital overload
//!   4. Heatwave -> grid stress -> wildfire ignition

use tracing::warn;

use crate::domain::{CascadeWarning, HazardType, RiskSet, SeismicSnapshot, Severity, WeatherSnapshot};

pub const SEISMIC_LANDSLIDE_THRESHOLD: u32 = 40;
pub const DAM_FLOOD_THRESHOLD: u32 = 40;
pub const SATURATION_FLOOD_THRESHOLD: u32 = 60;
pub const SATURATION_HUMIDITY_THRESHOLD: f64 = 85.0;
pub const CYCLONE_GRID_THRESHOLD: u32 = 60;
pub const HEATWAVE_GRID_THRESHOLD: u32 = 60;
pub const HEAT_IGNITION_WILDFIRE_THRESHOLD: u32 = 30;

pub const TITLE_SEISMIC_LANDSLIDE: &str = "Landslide probability increased";
pub const TITLE_DAM_FAILURE: &str = "Dam integrity failure risk";
pub const TITLE_SATURATION_LANDSLIDE: &str = "Landslide from soil saturation";
pub const TITLE_GRID_FAILURE: &str = "Power grid failure imminent";
pub const TITLE_HOSPITAL_OVERLOAD: &str = "Hospital capacity overload";
pub const TITLE_GRID_STRESS: &str = "Grid stress critical";
pub const TITLE_WILDFIRE_IGNITION: &str = "Wildfire ignition amplified";

fn warning(severity: Severity, title: &str, description: String) -> CascadeWarning {
    CascadeWarning {
        severity,
        title: title.to_string(),
        description,
    }
}

/// Evaluate the cascade chains. Produces zero to six warnings.
///
/// The seismic snapshot is accepted for parity with the scoring inputs;
/// the seismic chain reads the already-scored Seismic hazard instead.
pub fn check_cascades(
    risks: &RiskSet,
    weather: &WeatherSnapshot,
    _seismic: &SeismicSnapshot,
) -> Vec<CascadeWarning> {
    let mut warnings = Vec::new();

    let seismic_score = risks.score_of(HazardType::Seismic);
    let flood_score = risks.score_of(HazardType::Flood);

    if seismic_score > SEISMIC_LANDSLIDE_THRESHOLD {
        warnings.push(warning(
            Severity::High,
            TITLE_SEISMIC_LANDSLIDE,
            format!(
                "Seismic instability ({}%) near terrain gradients may trigger debris flows.",
                seismic_score
            ),
        ));
        if flood_score > DAM_FLOOD_THRESHOLD {
            warnings.push(warning(
                Severity::Critical,
                TITLE_DAM_FAILURE,
                "Active debris flow and hydro-static pressure detected downstream.".to_string(),
            ));
        }
    } else if flood_score > SATURATION_FLOOD_THRESHOLD
        || weather.humidity > SATURATION_HUMIDITY_THRESHOLD
    {
        warnings.push(warning(
            Severity::High,
            TITLE_SATURATION_LANDSLIDE,
            format!(
                "High precipitation and humidity ({}%) compromising slope stability.",
                weather.humidity
            ),
        ));
    }

    if risks.score_of(HazardType::Cyclone) > CYCLONE_GRID_THRESHOLD {
        warnings.push(warning(
            Severity::Critical,
            TITLE_GRID_FAILURE,
            "High wind velocity indicates 88% probability of grid infrastructure failure."
                .to_string(),
        ));
        warnings.push(warning(
            Severity::High,
            TITLE_HOSPITAL_OVERLOAD,
            "Loss of auxiliary power and trauma surge predicted.".to_string(),
        ));
    }

    if risks.score_of(HazardType::Heatwave) > HEATWAVE_GRID_THRESHOLD {
        warnings.push(warning(
            Severity::High,
            TITLE_GRID_STRESS,
            "Peak cooling demand straining electrical infrastructure.".to_string(),
        ));
        if risks.score_of(HazardType::Wildfire) > HEAT_IGNITION_WILDFIRE_THRESHOLD {
            warnings.push(warning(
                Severity::Critical,
                TITLE_WILDFIRE_IGNITION,
                "Transformer sparks in dry vegetation zones creating ignition vectors."
                    .to_string(),
            ));
        }
    }

    for w in warnings.iter().filter(|w| w.severity == Severity::Critical) {
        warn!(title = %w.title, "critical cascade");
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, Provenance, RiskScore};

    fn risks(scores: &[(HazardType, u32)]) -> RiskSet {
        RiskSet::new(
            HazardType::ALL
                .iter()
                .map(|&hazard| RiskScore {
                    hazard,
                    score: scores
                        .iter()
                        .find(|(h, _)| *h == hazard)
                        .map(|(_, s)| *s)
                        .unwrap_or(10),
                    trend: 0,
                    confidence: Confidence::Low,
                    color: hazard.color().to_string(),
                })
                .collect(),
        )
    }

    fn weather(humidity: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temp: 25.0,
            pressure: 1010.0,
            humidity,
            wind_speed: 5.0,
            wind_deg: 90.0,
            visibility: 10_000.0,
            aqi: 30.0,
            uv: 3.0,
            sunrise: "06:00".to_string(),
            sunset: "18:00".to_string(),
            local_time: "12:00".to_string(),
            description: "Clear".to_string(),
            status: Provenance::Live,
        }
    }

    fn seismic() -> SeismicSnapshot {
        SeismicSnapshot {
            max_mag: 0.0,
            count: 0,
            earthquakes: Vec::new(),
            status: Provenance::Fallback,
        }
    }

    fn titles(warnings: &[CascadeWarning]) -> Vec<&str> {
        warnings.iter().map(|w| w.title.as_str()).collect()
    }

    #[test]
    fn test_quiet_conditions_emit_nothing() {
        assert!(check_cascades(&risks(&[]), &weather(50.0), &seismic()).is_empty());
    }

    #[test]
    fn test_seismic_chain_with_dam() {
        let set = risks(&[(HazardType::Seismic, 72), (HazardType::Flood, 65)]);
        let out = check_cascades(&set, &weather(90.0), &seismic());
        assert_eq!(titles(&out), vec![TITLE_SEISMIC_LANDSLIDE, TITLE_DAM_FAILURE]);
        assert_eq!(out[0].severity, Severity::High);
        assert_eq!(out[1].severity, Severity::Critical);
        assert!(out[0].description.contains("(72%)"));
    }

    #[test]
    fn test_saturation_path_is_exclusive() {
        let set = risks(&[(HazardType::Seismic, 40), (HazardType::Flood, 61)]);
        let out = check_cascades(&set, &weather(50.0), &seismic());
        assert_eq!(titles(&out), vec![TITLE_SATURATION_LANDSLIDE]);

        let humid = check_cascades(&risks(&[]), &weather(86.0), &seismic());
        assert_eq!(titles(&humid), vec![TITLE_SATURATION_LANDSLIDE]);
        assert!(humid[0].description.contains("(86%)"));
    }

    #[test]
    fn test_cyclone_pair_in_order() {
        let set = risks(&[(HazardType::Cyclone, 61)]);
        let out = check_cascades(&set, &weather(50.0), &seismic());
        assert_eq!(titles(&out), vec![TITLE_GRID_FAILURE, TITLE_HOSPITAL_OVERLOAD]);
        assert_eq!(out[0].severity, Severity::Critical);
        assert_eq!(out[1].severity, Severity::High);
    }

    #[test]
    fn test_all_chains_fire_in_rule_order() {
        let set = risks(&[
            (HazardType::Seismic, 80),
            (HazardType::Flood, 70),
            (HazardType::Cyclone, 75),
            (HazardType::Heatwave, 66),
            (HazardType::Wildfire, 31),
        ]);
        let out = check_cascades(&set, &weather(95.0), &seismic());
        assert_eq!(
            titles(&out),
            vec![
                TITLE_SEISMIC_LANDSLIDE,
                TITLE_DAM_FAILURE,
                TITLE_GRID_FAILURE,
                TITLE_HOSPITAL_OVERLOAD,
                TITLE_GRID_STRESS,
                TITLE_WILDFIRE_IGNITION,
            ]
        );
    }

    #[test]
    fn test_heat_without_fire_fuel() {
        let set = risks(&[(HazardType::Heatwave, 66), (HazardType::Wildfire, 30)]);
        let out = check_cascades(&set, &weather(40.0), &seismic());
        assert_eq!(titles(&out), vec![TITLE_GRID_STRESS]);
    }
}
