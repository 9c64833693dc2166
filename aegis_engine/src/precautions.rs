//! Aegis Engine v1: Precaution Selector
//!
//! Universal items, then the role's fixed list, then at most one
//! advisory per threshold-gated hazard.

use crate::domain::{HazardType, RiskSet, Role};

pub const UNIVERSAL_PRECAUTIONS: [&str; 3] = [
    "Keep emergency contacts ready.",
    "Monitor local news for updates.",
    "Charge all communication devices.",
];

/// (hazard, score that must be exceeded, advisory), in append order.
pub const HAZARD_ADVISORIES: [(HazardType, u32, &str); 4] = [
    (
        HazardType::Flood,
        50,
        "Flood Warning: Avoid basements and low-lying areas.",
    ),
    (
        HazardType::Heatwave,
        40,
        "Heat Warning: Stay hydrated and avoid direct sunlight.",
    ),
    (
        HazardType::Wildfire,
        40,
        "Fire Warning: Prepare N95 masks and close all windows.",
    ),
    (
        HazardType::Cyclone,
        50,
        "Storm Warning: Board windows and secure outdoor objects.",
    ),
];

impl Role {
    /// Fixed checklist for this role. General users get none.
    pub fn precautions(self) -> &'static [&'static str] {
        match self {
            Role::GeneralUser => &[],
            Role::Farmer => &[
                "Secure livestock.",
                "Delay sowing if heavy rain predicted.",
                "Cover harvested crops.",
            ],
            Role::Driver => &[
                "Avoid coastal roads.",
                "Check tire pressure.",
                "Keep emergency kit in vehicle.",
            ],
            Role::Student => &[
                "Carry rain protection gear.",
                "Keep parent numbers written down.",
                "Stay in school if storm hits.",
            ],
            Role::EmergencyResponder => &[
                "Check equipment readiness.",
                "Brief team on risk zones.",
                "Ensure vehicle fuel is full.",
            ],
            Role::HealthcareWorker => &[
                "Prepare emergency triage protocols.",
                "Secure medical supplies.",
                "Check backup generator fuel.",
            ],
            Role::ConstructionWorker => &[
                "Secure loose scaffolding.",
                "Move heavy machinery to high ground.",
                "Monitor wind speeds for crane safety.",
            ],
            Role::ElderlyPerson => &[
                "Keep 7-day supply of medications.",
                "Ensure mobility aids are accessible.",
                "Register with local emergency lists.",
            ],
            Role::Parent => &[
                "Prepare child-safe emergency kits.",
                "Have comfort items ready for children.",
                "Establish a family meeting point.",
            ],
            Role::BusinessOwner => &[
                "Backup critical data offsite.",
                "Secure physical inventory.",
                "Inform employees of emergency procedures.",
            ],
        }
    }
}

/// Checklist for a role label. Unrecognised labels get no role items.
pub fn select_precautions(role: &str, risks: &RiskSet) -> Vec<String> {
    let role_items = Role::from_label(role)
        .map(Role::precautions)
        .unwrap_or(&[]);

    let advisories = HAZARD_ADVISORIES
        .iter()
        .filter(|(hazard, threshold, _)| risks.score_of(*hazard) > *threshold)
        .map(|(_, _, text)| *text);

    UNIVERSAL_PRECAUTIONS
        .iter()
        .copied()
        .chain(role_items.iter().copied())
        .chain(advisories)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, RiskScore};

    fn risks(scores: &[(HazardType, u32)]) -> RiskSet {
        RiskSet::new(
            scores
                .iter()
                .map(|&(hazard, score)| RiskScore {
                    hazard,
                    score,
                    trend: 0,
                    confidence: Confidence::Low,
                    color: hazard.color().to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_general_user_quiet() {
        let out = select_precautions("General User", &risks(&[(HazardType::Flood, 12)]));
        assert_eq!(out, UNIVERSAL_PRECAUTIONS.to_vec());
    }

    #[test]
    fn test_unknown_role_gets_universal_only() {
        let out = select_precautions("Lighthouse Keeper", &RiskSet::default());
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_role_items_follow_universal() {
        let out = select_precautions("Healthcare Worker", &RiskSet::default());
        assert_eq!(out.len(), 6);
        assert_eq!(out[3], "Prepare emergency triage protocols.");
    }

    #[test]
    fn test_thresholds_are_strict() {
        let at = risks(&[
            (HazardType::Flood, 50),
            (HazardType::Heatwave, 40),
            (HazardType::Wildfire, 40),
            (HazardType::Cyclone, 50),
        ]);
        assert_eq!(select_precautions("Student", &at).len(), 6);

        let over = risks(&[
            (HazardType::Flood, 51),
            (HazardType::Heatwave, 41),
            (HazardType::Wildfire, 41),
            (HazardType::Cyclone, 51),
        ]);
        let out = select_precautions("Student", &over);
        assert_eq!(out.len(), 10);
        assert!(out[6].starts_with("Flood Warning"));
        assert!(out[7].starts_with("Heat Warning"));
        assert!(out[8].starts_with("Fire Warning"));
        assert!(out[9].starts_with("Storm Warning"));
    }

    #[test]
    fn test_every_role_but_general_has_three_items() {
        for role in Role::ALL {
            let expected = if role == Role::GeneralUser { 0 } else { 3 };
            assert_eq!(role.precautions().len(), expected, "{}", role);
        }
    }
}
