//! Aegis Engine v1: Hazard Scorer
//!
//! Each hazard score is a weighted sum of two to four normalised factors,
//! scaled to 0-100, perturbed by seeded jitter and hard-clamped to
//! [1, 98]. Weights are frozen under ENGINE_VERSION.
//!
//! Jitter draw order is fixed: one score draw per hazard in declaration
//! order, then one trend draw per hazard in the same order.

use tracing::debug;

use crate::arithmetic::{clamp, round_half_up};
use crate::domain::{
    Confidence, FireSnapshot, GeoPoint, HazardType, RiskScore, RiskSet, SeismicSnapshot,
    WeatherSnapshot,
};
use crate::geography::{current_month, GeoProxies};
use crate::sequence::SeededSequence;

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 98.0;
pub const SCORE_JITTER_RANGE: f64 = 8.0;
pub const TREND_JITTER_RANGE: f64 = 12.0;

/// Score every hazard against the current wall-clock month.
pub fn compute_risks(
    weather: &WeatherSnapshot,
    seismic: &SeismicSnapshot,
    fires: &FireSnapshot,
    geo: &GeoPoint,
) -> RiskSet {
    compute_risks_in_month(weather, seismic, fires, geo, current_month())
}

/// Score every hazard for an explicit calendar month (1-12).
pub fn compute_risks_in_month(
    weather: &WeatherSnapshot,
    seismic: &SeismicSnapshot,
    fires: &FireSnapshot,
    geo: &GeoPoint,
    month: u32,
) -> RiskSet {
    let proxies = GeoProxies::derive(geo, month);
    let signals = SharedSignals::derive(weather, seismic);
    let mut seq = SeededSequence::from_location(geo.lat, geo.lon, weather.temp);

    let raw: Vec<f64> = HazardType::ALL
        .iter()
        .map(|&hazard| {
            let base = base_signal(hazard, weather, fires, &proxies, &signals);
            clamp(
                base * 100.0 + seq.jitter(SCORE_JITTER_RANGE),
                SCORE_MIN,
                SCORE_MAX,
            )
        })
        .collect();

    let scores = HazardType::ALL
        .iter()
        .zip(raw)
        .map(|(&hazard, value)| {
            let score = round_half_up(value) as u32;
            let trend = round_half_up(seq.jitter(TREND_JITTER_RANGE)) as i32;
            let confidence = confidence_for(hazard, score, weather);
            debug!(%hazard, score, trend, ?confidence, "hazard scored");
            RiskScore {
                hazard,
                score,
                trend,
                confidence,
                color: hazard.color().to_string(),
            }
        })
        .collect();

    RiskSet::new(scores)
}

/// Factors reused by more than one hazard formula.
#[derive(Debug, Clone, Copy)]
struct SharedSignals {
    flood_signal: f64,
    mag_factor: f64,
}

impl SharedSignals {
    fn derive(weather: &WeatherSnapshot, seismic: &SeismicSnapshot) -> Self {
        let flood_signal = if weather.humidity > 80.0 {
            0.7
        } else {
            weather.humidity / 100.0 * 0.4
        };
        Self {
            flood_signal,
            mag_factor: (seismic.max_mag / 8.0).min(1.0),
        }
    }
}

fn bonus(condition: bool, weight: f64) -> f64 {
    if condition {
        weight
    } else {
        0.0
    }
}

/// Weighted factor sum for one hazard, before scaling and jitter.
fn base_signal(
    hazard: HazardType,
    w: &WeatherSnapshot,
    fires: &FireSnapshot,
    geo: &GeoProxies,
    s: &SharedSignals,
) -> f64 {
    match hazard {
        HazardType::Flood => {
            let elevation_factor = (1.0 - geo.elevation / 500.0).max(0.0);
            s.flood_signal * 0.5 + elevation_factor * 0.3 + (1.0 - w.pressure / 1040.0) * 0.2
        }
        HazardType::Heatwave => {
            let temp_factor = ((w.temp - 30.0) / 15.0).max(0.0);
            let pressure_factor = (w.pressure / 1013.0) * 0.5;
            temp_factor * 0.7 + pressure_factor * 0.3
        }
        HazardType::Cyclone => {
            let storm_intensity =
                (1.0 - w.pressure / 1040.0) * 0.5 + (w.wind_speed / 50.0) * 0.5;
            let warm_water = ((w.temp - 26.0) / 20.0).max(0.0);
            storm_intensity * 0.6 + warm_water * 0.2 + bonus(geo.is_coastal, 0.2)
        }
        HazardType::Drought => {
            let season = if geo.is_drought_season() { 1.0 } else { 0.5 };
            let dryness =
                (1.0 - w.humidity / 100.0) * 0.5 + ((w.temp - 25.0) / 20.0).max(0.0) * 0.5;
            dryness * 0.6 + (1.0 - s.flood_signal) * 0.2 + season * 0.2
        }
        HazardType::Landslide => {
            let slope = (geo.elevation / 500.0).min(1.0);
            let rain_saturation = (w.humidity / 100.0) * 0.5 + s.flood_signal * 0.5;
            slope * 0.4 + rain_saturation * 0.4 + bonus(geo.in_seismic_zone, 0.2)
        }
        HazardType::Wildfire => {
            let weather_danger = ((w.temp - 25.0) / 20.0).max(0.0) * 0.4
                + (1.0 - w.humidity / 100.0) * 0.4
                + (w.wind_speed / 50.0) * 0.2;
            let fire_trigger = (fires.count as f64 / 10.0).min(1.0);
            weather_danger * 0.6 + fire_trigger * 0.4
        }
        HazardType::Avalanche => {
            let winter = if geo.is_winter() { 1.0 } else { 0.3 };
            let snow_potential =
                (w.humidity / 100.0) * 0.5 + ((5.0 - w.temp) / 20.0).max(0.0) * 0.5;
            let slope = (geo.elevation / 1000.0).min(1.0);
            snow_potential * 0.5 + slope * 0.3 + winter * 0.2
        }
        HazardType::Seismic => s.mag_factor * 0.7 + bonus(geo.in_seismic_zone, 0.3),
        HazardType::Tsunami => s.mag_factor * 0.6 + bonus(geo.is_coastal, 0.4),
        HazardType::Volcano => s.mag_factor * 0.5 + bonus(geo.in_seismic_zone, 0.5),
    }
}

// ── Confidence ─────────────────────────────────────────────────────

type WeatherCheck = fn(&WeatherSnapshot) -> bool;

fn saturated(w: &WeatherSnapshot) -> bool {
    w.humidity > 80.0
}

fn extreme_heat(w: &WeatherSnapshot) -> bool {
    w.temp > 35.0
}

fn gale_force(w: &WeatherSnapshot) -> bool {
    w.wind_speed > 20.0
}

/// Direct-observation overrides, checked before the score bands.
const CONFIDENCE_OVERRIDES: [(HazardType, WeatherCheck); 3] = [
    (HazardType::Flood, saturated),
    (HazardType::Heatwave, extreme_heat),
    (HazardType::Cyclone, gale_force),
];

/// First match wins: observation overrides, then score > 70, then score > 40.
pub fn confidence_for(hazard: HazardType, score: u32, weather: &WeatherSnapshot) -> Confidence {
    for (target, check) in CONFIDENCE_OVERRIDES {
        if target == hazard && check(weather) {
            return Confidence::High;
        }
    }
    if score > 70 {
        Confidence::High
    } else if score > 40 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Provenance;

    fn weather(temp: f64, pressure: f64, humidity: f64, wind_speed: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temp,
            pressure,
            humidity,
            wind_speed,
            wind_deg: 0.0,
            visibility: 10_000.0,
            aqi: 40.0,
            uv: 5.0,
            sunrise: "06:00".to_string(),
            sunset: "18:00".to_string(),
            local_time: "12:00".to_string(),
            description: "Clear".to_string(),
            status: Provenance::Live,
        }
    }

    fn quiet_seismic(max_mag: f64) -> SeismicSnapshot {
        SeismicSnapshot {
            max_mag,
            count: 0,
            earthquakes: Vec::new(),
            status: Provenance::Live,
        }
    }

    fn fires(count: u32) -> FireSnapshot {
        FireSnapshot {
            count,
            points: Vec::new(),
            status: Provenance::Demo,
        }
    }

    #[test]
    fn test_total_over_hazards() {
        let risks = compute_risks_in_month(
            &weather(26.5, 1010.0, 68.0, 12.0),
            &quiet_seismic(0.0),
            &fires(0),
            &GeoPoint::new(51.5, -0.12),
            10,
        );
        let hazards: Vec<HazardType> = risks.iter().map(|r| r.hazard).collect();
        assert_eq!(hazards, HazardType::ALL.to_vec());
        for r in &risks {
            assert_eq!(r.color, r.hazard.color());
            assert!((-6..=6).contains(&r.trend));
        }
    }

    #[test]
    fn test_scores_clamped_under_extremes() {
        let cases = [
            weather(60.0, 870.0, 100.0, 90.0),
            weather(-60.0, 1085.0, 0.0, 0.0),
            weather(45.0, 940.0, 5.0, 70.0),
        ];
        for (i, w) in cases.iter().enumerate() {
            for month in 1..=12 {
                let risks = compute_risks_in_month(
                    w,
                    &quiet_seismic(9.5),
                    &fires(400),
                    &GeoPoint::new(-89.0 + i as f64 * 60.0, 179.0 - i as f64 * 120.0),
                    month,
                );
                for r in &risks {
                    assert!((1..=98).contains(&r.score), "{} scored {}", r.hazard, r.score);
                }
            }
        }
    }

    #[test]
    fn test_heatwave_example() {
        let w = weather(36.0, 1005.0, 30.0, 5.0);
        let risks = compute_risks_in_month(
            &w,
            &quiet_seismic(0.0),
            &fires(0),
            &GeoPoint::new(28.6, 77.2),
            6,
        );
        let heat = risks.get(HazardType::Heatwave).unwrap();
        assert!(heat.score > risks.score_of(HazardType::Flood) + 10);
        assert_eq!(heat.confidence, Confidence::High);
    }

    #[test]
    fn test_seismic_zone_example() {
        let w = weather(18.0, 1012.0, 60.0, 4.0);
        let risks = compute_risks_in_month(
            &w,
            &quiet_seismic(6.5),
            &fires(0),
            &GeoPoint::new(35.7, 139.7),
            3,
        );
        assert!(risks.score_of(HazardType::Seismic) > 70);
        assert_eq!(risks.get(HazardType::Seismic).unwrap().confidence, Confidence::High);
    }

    #[test]
    fn test_repeatable_for_same_input() {
        let w = weather(22.0, 1001.0, 83.0, 17.0);
        let geo = GeoPoint::new(13.08, 80.27);
        let a = compute_risks_in_month(&w, &quiet_seismic(3.1), &fires(2), &geo, 8);
        let b = compute_risks_in_month(&w, &quiet_seismic(3.1), &fires(2), &geo, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_confidence_override_order() {
        let humid = weather(20.0, 1010.0, 85.0, 2.0);
        assert_eq!(confidence_for(HazardType::Flood, 5, &humid), Confidence::High);
        // Humidity only vouches for floods.
        assert_eq!(confidence_for(HazardType::Drought, 5, &humid), Confidence::Low);

        let windy = weather(20.0, 1010.0, 50.0, 25.0);
        assert_eq!(confidence_for(HazardType::Cyclone, 12, &windy), Confidence::High);
        assert_eq!(confidence_for(HazardType::Tsunami, 71, &windy), Confidence::High);
        assert_eq!(confidence_for(HazardType::Tsunami, 70, &windy), Confidence::Medium);
        assert_eq!(confidence_for(HazardType::Tsunami, 41, &windy), Confidence::Medium);
        assert_eq!(confidence_for(HazardType::Tsunami, 40, &windy), Confidence::Low);
    }
}
