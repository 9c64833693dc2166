//! Aegis Engine v1: Core Domain Types
//!
//! Pure data. Telemetry snapshots flow in, risk snapshots flow out.
//! Nothing here is mutated after construction.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Hazards ────────────────────────────────────────────────────────

/// The closed set of scored hazards. Declaration order is the display
/// order and the tie-break order for the dominant hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HazardType {
    Flood,
    Heatwave,
    Cyclone,
    Drought,
    Landslide,
    Wildfire,
    Avalanche,
    Seismic,
    Tsunami,
    Volcano,
}

impl HazardType {
    pub const ALL: [HazardType; 10] = [
        HazardType::Flood,
        HazardType::Heatwave,
        HazardType::Cyclone,
        HazardType::Drought,
        HazardType::Landslide,
        HazardType::Wildfire,
        HazardType::Avalanche,
        HazardType::Seismic,
        HazardType::Tsunami,
        HazardType::Volcano,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HazardType::Flood => "Flood",
            HazardType::Heatwave => "Heatwave",
            HazardType::Cyclone => "Cyclone",
            HazardType::Drought => "Drought",
            HazardType::Landslide => "Landslide",
            HazardType::Wildfire => "Wildfire",
            HazardType::Avalanche => "Avalanche",
            HazardType::Seismic => "Seismic",
            HazardType::Tsunami => "Tsunami",
            HazardType::Volcano => "Volcano",
        }
    }

    /// Display color used by the dashboard tiles.
    pub fn color(self) -> &'static str {
        match self {
            HazardType::Flood => "#3b82f6",
            HazardType::Heatwave => "#f97316",
            HazardType::Cyclone => "#6366f1",
            HazardType::Drought => "#eab308",
            HazardType::Landslide => "#92400e",
            HazardType::Wildfire => "#ef4444",
            HazardType::Avalanche => "#60a5fa",
            HazardType::Seismic => "#991b1b",
            HazardType::Tsunami => "#0ea5e9",
            HazardType::Volcano => "#dc2626",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Telemetry snapshots ────────────────────────────────────────────

/// Where a telemetry snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provenance {
    Live,
    Demo,
    Fallback,
}

/// Current surface weather at the mission location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WeatherSnapshot {
    pub temp: f64,         // °C
    pub pressure: f64,     // hPa
    pub humidity: f64,     // %
    pub wind_speed: f64,   // m/s
    pub wind_deg: f64,
    pub visibility: f64,   // m
    pub aqi: f64,
    pub uv: f64,
    pub sunrise: String,
    pub sunset: String,
    pub local_time: String,
    pub description: String,
    pub status: Provenance,
}

/// One earthquake from the upstream feed, relative to the mission location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeismicEvent {
    pub lat: f64,
    pub lon: f64,
    pub magnitude: f64,
    pub distance_km: f64,
}

/// Seismic activity observed within the search radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeismicSnapshot {
    pub max_mag: f64,
    pub count: u32,
    pub earthquakes: Vec<SeismicEvent>,
    pub status: Provenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FirePoint {
    pub lat: f64,
    pub lon: f64,
}

/// Active-fire detections near the mission location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FireSnapshot {
    pub count: u32,
    pub points: Vec<FirePoint>,
    pub status: Provenance,
}

/// Latitude in [-90, 90], longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

// ── Risk scores ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Tile severity band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const CRITICAL_THRESHOLD: u32 = 75;
    pub const HIGH_THRESHOLD: u32 = 65;
    pub const MEDIUM_THRESHOLD: u32 = 40;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Steady,
    Falling,
}

impl TrendDirection {
    pub fn from_trend(trend: i32) -> Self {
        if trend > 5 {
            TrendDirection::Rising
        } else if trend < -5 {
            TrendDirection::Falling
        } else {
            TrendDirection::Steady
        }
    }
}

/// Score for one hazard. `score` is always within [1, 98].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskScore {
    #[serde(rename = "type")]
    pub hazard: HazardType,
    pub score: u32,
    pub trend: i32,
    pub confidence: Confidence,
    pub color: String,
}

impl RiskScore {
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score)
    }

    pub fn direction(&self) -> TrendDirection {
        TrendDirection::from_trend(self.trend)
    }
}

/// Ordered risk scores from one scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskSet(Vec<RiskScore>);

impl RiskSet {
    pub fn new(scores: Vec<RiskScore>) -> Self {
        Self(scores)
    }

    pub fn as_slice(&self) -> &[RiskScore] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiskScore> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, hazard: HazardType) -> Option<&RiskScore> {
        self.0.iter().find(|r| r.hazard == hazard)
    }

    /// Score for `hazard`, or 0 if the set has no entry for it.
    pub fn score_of(&self, hazard: HazardType) -> u32 {
        self.get(hazard).map(|r| r.score).unwrap_or(0)
    }

    /// Highest-scoring entry. Ties go to the earliest entry.
    pub fn dominant(&self) -> Option<&RiskScore> {
        let mut best: Option<&RiskScore> = None;
        for risk in &self.0 {
            match best {
                Some(b) if risk.score <= b.score => {}
                _ => best = Some(risk),
            }
        }
        best
    }
}

impl<'a> IntoIterator for &'a RiskSet {
    type Item = &'a RiskScore;
    type IntoIter = std::slice::Iter<'a, RiskScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Projections ────────────────────────────────────────────────────

/// One projected step of the short-term forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ForecastPoint {
    pub time: String,
    pub hours_ahead: u32,
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

/// Secondary or tertiary failure implied by primary hazard scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CascadeWarning {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CasualtyProjection {
    pub without_precautions: u64,
    pub with_precautions: u64,
    pub drop_percentage: f64,
    pub dominant_risk: HazardType,
    pub affected_pop: u64,
}

/// Everything the engine produces for one telemetry snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskAssessment {
    pub risks: RiskSet,
    pub forecast: Vec<ForecastPoint>,
    pub cascades: Vec<CascadeWarning>,
    pub casualties: CasualtyProjection,
    pub precautions: Vec<String>,
}

// ── Roles ──────────────────────────────────────────────────────────

/// Profile labels that drive precaution selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "General User")]
    GeneralUser,
    #[serde(rename = "Farmer/Agricultural Worker")]
    Farmer,
    #[serde(rename = "Transportation/Driver")]
    Driver,
    #[serde(rename = "Student")]
    Student,
    #[serde(rename = "Emergency Responder")]
    EmergencyResponder,
    #[serde(rename = "Healthcare Worker")]
    HealthcareWorker,
    #[serde(rename = "Construction Worker")]
    ConstructionWorker,
    #[serde(rename = "Elderly Person")]
    ElderlyPerson,
    #[serde(rename = "Parent with Children")]
    Parent,
    #[serde(rename = "Business Owner")]
    BusinessOwner,
}

impl Role {
    pub const ALL: [Role; 10] = [
        Role::GeneralUser,
        Role::Farmer,
        Role::Driver,
        Role::Student,
        Role::EmergencyResponder,
        Role::HealthcareWorker,
        Role::ConstructionWorker,
        Role::ElderlyPerson,
        Role::Parent,
        Role::BusinessOwner,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Role::GeneralUser => "General User",
            Role::Farmer => "Farmer/Agricultural Worker",
            Role::Driver => "Transportation/Driver",
            Role::Student => "Student",
            Role::EmergencyResponder => "Emergency Responder",
            Role::HealthcareWorker => "Healthcare Worker",
            Role::ConstructionWorker => "Construction Worker",
            Role::ElderlyPerson => "Elderly Person",
            Role::Parent => "Parent with Children",
            Role::BusinessOwner => "Business Owner",
        }
    }

    /// Exact-match lookup by display label.
    pub fn from_label(label: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.label() == label)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
