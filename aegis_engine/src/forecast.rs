//! Aegis Engine v1: Forecast Generator
//!
//! Projects the current weather forward in 3-hour steps with a smooth
//! sinusoidal swing plus small uniform noise. The noise is presentation
//! grade and unseeded by default; `generate_forecast_seeded` threads a
//! ChaCha stream through for callers that need reproducible charts.

use chrono::{Duration, Local, NaiveDateTime};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::arithmetic::{clamp, round_tenth};
use crate::domain::{ForecastPoint, WeatherSnapshot};

pub const DEFAULT_FORECAST_STEPS: u32 = 24;
pub const STEP_HOURS: u32 = 3;

pub const HUMIDITY_FLOOR: f64 = 20.0;
pub const HUMIDITY_CEILING: f64 = 100.0;

/// Unseeded forecast starting at the local wall clock.
pub fn generate_forecast(weather: &WeatherSnapshot, steps: u32) -> Vec<ForecastPoint> {
    generate_forecast_from(
        weather,
        steps,
        Local::now().naive_local(),
        &mut rand::thread_rng(),
    )
}

/// Reproducible forecast: same weather, steps, start and seed give the same points.
pub fn generate_forecast_seeded(
    weather: &WeatherSnapshot,
    steps: u32,
    start: NaiveDateTime,
    seed: u64,
) -> Vec<ForecastPoint> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_forecast_from(weather, steps, start, &mut rng)
}

/// Points for steps `0..=steps`, so `steps + 1` entries in total.
pub fn generate_forecast_from<R: Rng + ?Sized>(
    weather: &WeatherSnapshot,
    steps: u32,
    start: NaiveDateTime,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    (0..=steps)
        .map(|i| {
            let hours_ahead = i * STEP_HOURS;
            let at = start + Duration::hours(i64::from(hours_ahead));
            let swing = (f64::from(i) / 2.5).sin();

            let temp = weather.temp + 5.0 * swing + (rng.gen::<f64>() - 0.5);
            let humidity = clamp(
                weather.humidity - 10.0 * swing,
                HUMIDITY_FLOOR,
                HUMIDITY_CEILING,
            );
            let pressure = weather.pressure + (rng.gen::<f64>() - 0.5) * 3.0;
            let wind_speed = (weather.wind_speed + (rng.gen::<f64>() - 0.5) * 4.0).max(0.0);

            ForecastPoint {
                time: time_label(&at),
                hours_ahead,
                temp: round_tenth(temp),
                humidity: round_tenth(humidity),
                pressure: round_tenth(pressure),
                wind_speed: round_tenth(wind_speed),
            }
        })
        .collect()
}

/// `"HH:00\nMon DD"`, e.g. `"09:00\nOct 19"`.
pub fn time_label(at: &NaiveDateTime) -> String {
    format!("{}\n{}", at.format("%H:00"), at.format("%b %d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Provenance;
    use chrono::NaiveDate;

    fn weather(temp: f64, humidity: f64, wind_speed: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temp,
            pressure: 1010.0,
            humidity,
            wind_speed,
            wind_deg: 180.0,
            visibility: 8000.0,
            aqi: 42.0,
            uv: 4.5,
            sunrise: "06:30".to_string(),
            sunset: "18:45".to_string(),
            local_time: "12:00".to_string(),
            description: "Partly Cloudy".to_string(),
            status: Provenance::Demo,
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_step_count_inclusive() {
        assert_eq!(generate_forecast(&weather(26.5, 68.0, 12.0), 24).len(), 25);
        assert_eq!(generate_forecast(&weather(26.5, 68.0, 12.0), 0).len(), 1);
    }

    #[test]
    fn test_humidity_and_wind_bounds() {
        for base in [0.0, 15.0, 95.0, 100.0] {
            let points = generate_forecast(&weather(10.0, base, 0.5), 48);
            for p in &points {
                assert!((20.0..=100.0).contains(&p.humidity), "humidity {}", p.humidity);
                assert!(p.wind_speed >= 0.0);
            }
        }
    }

    #[test]
    fn test_first_step_tracks_base() {
        let points = generate_forecast_seeded(&weather(26.5, 68.0, 12.0), 24, start(), 7);
        let first = &points[0];
        assert!((first.temp - 26.5).abs() <= 0.5);
        assert_eq!(first.humidity, 68.0);
        assert!((first.pressure - 1010.0).abs() <= 1.5);
        assert_eq!(first.hours_ahead, 0);
        assert_eq!(points[24].hours_ahead, 72);
    }

    #[test]
    fn test_time_labels() {
        let points = generate_forecast_seeded(&weather(26.5, 68.0, 12.0), 8, start(), 1);
        assert_eq!(points[0].time, "09:00\nOct 19");
        assert_eq!(points[1].time, "12:00\nOct 19");
        assert_eq!(points[5].time, "00:00\nOct 20");
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let w = weather(31.0, 55.0, 6.0);
        let a = generate_forecast_seeded(&w, 24, start(), 99);
        let b = generate_forecast_seeded(&w, 24, start(), 99);
        let c = generate_forecast_seeded(&w, 24, start(), 100);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
