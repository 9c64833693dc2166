//! Aegis Engine v1: Geographic Proxies
//!
//! Coarse stand-ins for coastline, tectonic and elevation data, derived
//! once per scoring pass from the mission position and calendar month.

use chrono::{Datelike, Local};

use crate::domain::GeoPoint;

/// Inclusive lat/lon bounding box around a known high-activity belt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeismicZone {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl SeismicZone {
    pub fn contains(&self, geo: &GeoPoint) -> bool {
        geo.lat >= self.lat_min
            && geo.lat <= self.lat_max
            && geo.lon >= self.lon_min
            && geo.lon <= self.lon_max
    }
}

pub const SEISMIC_ZONES: [SeismicZone; 3] = [
    // Japan arc
    SeismicZone { lat_min: 35.0, lat_max: 45.0, lon_min: 135.0, lon_max: 145.0 },
    // Andean margin
    SeismicZone { lat_min: -10.0, lat_max: 10.0, lon_min: -85.0, lon_max: -70.0 },
    // California
    SeismicZone { lat_min: 30.0, lat_max: 40.0, lon_min: -125.0, lon_max: -115.0 },
];

/// Drought season: May through September.
pub const DROUGHT_MONTHS: [u32; 5] = [5, 6, 7, 8, 9];

/// Winter: November through March.
pub const WINTER_MONTHS: [u32; 5] = [11, 12, 1, 2, 3];

pub fn is_coastal(geo: &GeoPoint) -> bool {
    geo.lat.abs() < 60.0 && (geo.lon.abs() < 20.0 || geo.lon.abs() > 160.0)
}

pub fn in_seismic_zone(geo: &GeoPoint) -> bool {
    SEISMIC_ZONES.iter().any(|zone| zone.contains(geo))
}

/// Elevation proxy in metres: `|lat| * 10`.
pub fn elevation_proxy(geo: &GeoPoint) -> f64 {
    geo.lat.abs() * 10.0
}

/// Calendar month (1-12) of the local wall clock.
pub fn current_month() -> u32 {
    Local::now().month()
}

/// Proxies shared by all ten hazard formulas in a scoring pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoProxies {
    pub is_coastal: bool,
    pub in_seismic_zone: bool,
    pub elevation: f64,
    pub month: u32,
}

impl GeoProxies {
    pub fn derive(geo: &GeoPoint, month: u32) -> Self {
        Self {
            is_coastal: is_coastal(geo),
            in_seismic_zone: in_seismic_zone(geo),
            elevation: elevation_proxy(geo),
            month,
        }
    }

    pub fn is_drought_season(&self) -> bool {
        DROUGHT_MONTHS.contains(&self.month)
    }

    pub fn is_winter(&self) -> bool {
        WINTER_MONTHS.contains(&self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coastal_proxy() {
        assert!(is_coastal(&GeoPoint::new(51.5, -0.1)));
        assert!(is_coastal(&GeoPoint::new(-17.7, 178.0)));
        assert!(!is_coastal(&GeoPoint::new(28.6, 77.2)));
        assert!(!is_coastal(&GeoPoint::new(64.1, -21.9)));
    }

    #[test]
    fn test_seismic_zones() {
        assert!(in_seismic_zone(&GeoPoint::new(35.7, 139.7)));
        assert!(in_seismic_zone(&GeoPoint::new(-0.2, -78.5)));
        assert!(in_seismic_zone(&GeoPoint::new(34.05, -118.24)));
        // Edges are inclusive.
        assert!(in_seismic_zone(&GeoPoint::new(45.0, 145.0)));
        assert!(!in_seismic_zone(&GeoPoint::new(28.6, 77.2)));
    }

    #[test]
    fn test_seasonal_gates() {
        let july = GeoProxies::derive(&GeoPoint::new(0.0, 0.0), 7);
        assert!(july.is_drought_season());
        assert!(!july.is_winter());

        let january = GeoProxies::derive(&GeoPoint::new(0.0, 0.0), 1);
        assert!(!january.is_drought_season());
        assert!(january.is_winter());

        let april = GeoProxies::derive(&GeoPoint::new(0.0, 0.0), 4);
        assert!(!april.is_drought_season());
        assert!(!april.is_winter());
    }

    #[test]
    fn test_elevation_proxy() {
        assert_eq!(elevation_proxy(&GeoPoint::new(-45.0, 10.0)), 450.0);
        assert!((1..=12).contains(&current_month()));
    }
}
