//! Telemetry validation and fixture snapshots.
//!
//! The engine trusts its inputs. Everything arriving from outside is
//! checked here first, and the demo/fallback snapshots stand in when an
//! upstream source is unavailable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use aegis_engine::domain::{
    FireSnapshot, GeoPoint, Provenance, SeismicEvent, SeismicSnapshot, WeatherSnapshot,
};
use aegis_engine::engine::AssessmentInput;

use crate::error::{Result, RuntimeError};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Demo fire counts are drawn from `0..MAX_DEMO_FIRES`.
pub const MAX_DEMO_FIRES: u32 = 5;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RuntimeError::invalid(field, format!("must be finite, got {}", value)))
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if finite(field, value)? < min || value > max {
        return Err(RuntimeError::invalid(
            field,
            format!("{} outside [{}, {}]", value, min, max),
        ));
    }
    Ok(())
}

pub fn validate_geo(geo: &GeoPoint) -> Result<()> {
    in_range("lat", geo.lat, -90.0, 90.0)?;
    in_range("lon", geo.lon, -180.0, 180.0)?;
    Ok(())
}

pub fn validate_weather(w: &WeatherSnapshot) -> Result<()> {
    finite("temp", w.temp)?;
    if finite("pressure", w.pressure)? <= 0.0 {
        return Err(RuntimeError::invalid("pressure", format!("must be positive, got {}", w.pressure)));
    }
    in_range("humidity", w.humidity, 0.0, 100.0)?;
    if finite("windSpeed", w.wind_speed)? < 0.0 {
        return Err(RuntimeError::invalid("windSpeed", format!("must not be negative, got {}", w.wind_speed)));
    }
    finite("windDeg", w.wind_deg)?;
    finite("visibility", w.visibility)?;
    finite("aqi", w.aqi)?;
    finite("uv", w.uv)?;
    Ok(())
}

pub fn validate_seismic(s: &SeismicSnapshot) -> Result<()> {
    if finite("maxMag", s.max_mag)? < 0.0 {
        return Err(RuntimeError::invalid("maxMag", format!("must not be negative, got {}", s.max_mag)));
    }
    for quake in &s.earthquakes {
        validate_geo(&GeoPoint::new(quake.lat, quake.lon))?;
        if finite("magnitude", quake.magnitude)? < 0.0 {
            return Err(RuntimeError::invalid(
                "magnitude",
                format!("must not be negative, got {}", quake.magnitude),
            ));
        }
        finite("distanceKm", quake.distance_km)?;
    }
    Ok(())
}

pub fn validate_fires(f: &FireSnapshot) -> Result<()> {
    for point in &f.points {
        validate_geo(&GeoPoint::new(point.lat, point.lon))?;
    }
    Ok(())
}

/// Validate every part of an assessment input.
pub fn validate_input(input: &AssessmentInput) -> Result<()> {
    validate_geo(&input.geo)?;
    validate_weather(&input.weather)?;
    validate_seismic(&input.seismic)?;
    validate_fires(&input.fires)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Fixture snapshots
// ---------------------------------------------------------------------------

pub fn demo_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temp: 26.5,
        pressure: 1010.0,
        humidity: 68.0,
        wind_speed: 12.0,
        wind_deg: 180.0,
        visibility: 8000.0,
        aqi: 42.0,
        uv: 4.5,
        sunrise: "06:30".to_string(),
        sunset: "18:45".to_string(),
        local_time: String::new(),
        description: "Partly Cloudy".to_string(),
        status: Provenance::Demo,
    }
}

/// Stand-in when the weather source fails.
pub fn fallback_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        temp: 28.5,
        pressure: 1012.0,
        humidity: 75.0,
        wind_speed: 15.0,
        wind_deg: 240.0,
        visibility: 10000.0,
        aqi: 45.0,
        uv: 6.5,
        sunrise: "06:15".to_string(),
        sunset: "18:45".to_string(),
        local_time: String::new(),
        description: "Partly Cloudy".to_string(),
        status: Provenance::Fallback,
    }
}

pub fn fallback_seismic() -> SeismicSnapshot {
    SeismicSnapshot {
        max_mag: 0.0,
        count: 0,
        earthquakes: Vec::new(),
        status: Provenance::Fallback,
    }
}

pub fn demo_fires(count: u32) -> FireSnapshot {
    FireSnapshot {
        count,
        points: Vec::new(),
        status: Provenance::Demo,
    }
}

/// Demo fires with a random count in `0..MAX_DEMO_FIRES`.
pub fn random_demo_fires<R: Rng + ?Sized>(rng: &mut R) -> FireSnapshot {
    demo_fires(rng.gen_range(0..MAX_DEMO_FIRES))
}

// ---------------------------------------------------------------------------
// Seismic feed summary
// ---------------------------------------------------------------------------

/// One event from an upstream earthquake feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuakeReport {
    pub lat: f64,
    pub lon: f64,
    pub magnitude: f64,
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().asin()
}

/// Keep feed events strictly inside `radius_km` of `origin`, in feed order.
pub fn summarize_seismic(origin: &GeoPoint, radius_km: f64, feed: &[QuakeReport]) -> SeismicSnapshot {
    let earthquakes: Vec<SeismicEvent> = feed
        .iter()
        .filter_map(|q| {
            let dist = haversine_km(origin, &GeoPoint::new(q.lat, q.lon));
            (dist < radius_km).then(|| SeismicEvent {
                lat: q.lat,
                lon: q.lon,
                magnitude: q.magnitude,
                distance_km: (dist * 10.0).round() / 10.0,
            })
        })
        .collect();

    let max_mag = earthquakes.iter().map(|q| q.magnitude).fold(0.0, f64::max);
    SeismicSnapshot {
        max_mag,
        count: earthquakes.len() as u32,
        earthquakes,
        status: Provenance::Live,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fixtures_validate() {
        assert!(validate_weather(&demo_weather()).is_ok());
        assert!(validate_weather(&fallback_weather()).is_ok());
        assert!(validate_seismic(&fallback_seismic()).is_ok());
        assert_eq!(fallback_weather().status, Provenance::Fallback);
        assert_eq!(demo_fires(3).count, 3);
    }

    #[test]
    fn test_rejects_bad_weather() {
        let mut w = demo_weather();
        w.humidity = 101.0;
        assert!(matches!(
            validate_weather(&w),
            Err(RuntimeError::InvalidTelemetry { field: "humidity", .. })
        ));

        let mut w = demo_weather();
        w.temp = f64::NAN;
        assert!(validate_weather(&w).is_err());

        let mut w = demo_weather();
        w.pressure = 0.0;
        assert!(validate_weather(&w).is_err());

        let mut w = demo_weather();
        w.wind_speed = -1.0;
        assert!(validate_weather(&w).is_err());
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        assert!(validate_geo(&GeoPoint::new(90.0, -180.0)).is_ok());
        assert!(validate_geo(&GeoPoint::new(90.5, 0.0)).is_err());
        assert!(validate_geo(&GeoPoint::new(0.0, 181.0)).is_err());
        assert!(validate_geo(&GeoPoint::new(f64::INFINITY, 0.0)).is_err());
    }

    #[test]
    fn test_rejects_negative_magnitude() {
        let mut s = fallback_seismic();
        s.max_mag = -0.5;
        assert!(validate_seismic(&s).is_err());
    }

    #[test]
    fn test_haversine() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_eq!(haversine_km(&origin, &origin), 0.0);
        // One degree of arc along the equator.
        let d = haversine_km(&origin, &GeoPoint::new(0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01, "{}", d);
    }

    #[test]
    fn test_summary_filters_by_radius() {
        let origin = GeoPoint::new(0.0, 0.0);
        let feed = [
            QuakeReport { lat: 0.0, lon: 1.0, magnitude: 4.2 },
            QuakeReport { lat: 0.0, lon: 10.0, magnitude: 7.9 },
            QuakeReport { lat: 1.0, lon: 0.0, magnitude: 5.1 },
        ];
        let s = summarize_seismic(&origin, 500.0, &feed);
        assert_eq!(s.count, 2);
        assert_eq!(s.max_mag, 5.1);
        assert_eq!(s.earthquakes[0].distance_km, 111.2);
        assert_eq!(s.status, Provenance::Live);

        let none = summarize_seismic(&origin, 50.0, &feed);
        assert_eq!(none.count, 0);
        assert_eq!(none.max_mag, 0.0);
    }

    #[test]
    fn test_random_demo_fires_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(random_demo_fires(&mut rng).count < MAX_DEMO_FIRES);
        }
    }
}
