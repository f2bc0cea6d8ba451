use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Three-tier status derived from a percentage score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Red,
    Orange,
    Green,
}

impl TrafficLight {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficLight::Red => "red",
            TrafficLight::Orange => "orange",
            TrafficLight::Green => "green",
        }
    }
}

impl std::fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-client score boundaries: `score <= red_max` is red,
/// `score <= orange_max` is orange, anything above is green.
///
/// Validated here, at write time. Classification never re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringThresholds {
    red_max: f64,
    orange_max: f64,
}

impl ScoringThresholds {
    pub fn new(red_max: f64, orange_max: f64) -> Result<Self, DomainError> {
        if !(0.0..100.0).contains(&red_max) {
            return Err(DomainError::Validation(format!(
                "red_max must be within [0, 100): {}",
                red_max
            )));
        }
        if red_max >= orange_max {
            return Err(DomainError::Validation(format!(
                "red_max ({}) must be below orange_max ({})",
                red_max, orange_max
            )));
        }
        if orange_max > 100.0 {
            return Err(DomainError::Validation(format!(
                "orange_max must not exceed 100: {}",
                orange_max
            )));
        }
        Ok(Self { red_max, orange_max })
    }

    pub fn red_max(&self) -> f64 {
        self.red_max
    }

    pub fn orange_max(&self) -> f64 {
        self.orange_max
    }
}

/// Named default threshold pairs a client can be placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdProfile {
    Lifestyle,
    Moderate,
    HighPerformance,
    /// Explicit per-client override, no profile default
    Custom,
}

impl ThresholdProfile {
    /// Default thresholds for the profile; Custom carries none
    pub fn default_thresholds(&self) -> Option<ScoringThresholds> {
        let (red_max, orange_max) = match self {
            ThresholdProfile::Lifestyle => (33.0, 80.0),
            ThresholdProfile::Moderate => (40.0, 75.0),
            ThresholdProfile::HighPerformance => (50.0, 85.0),
            ThresholdProfile::Custom => return None,
        };
        // Profile constants satisfy the threshold invariant by construction
        Some(ScoringThresholds { red_max, orange_max })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdProfile::Lifestyle => "lifestyle",
            ThresholdProfile::Moderate => "moderate",
            ThresholdProfile::HighPerformance => "high-performance",
            ThresholdProfile::Custom => "custom",
        }
    }

    pub fn from_str_name(s: &str) -> Result<Self, DomainError> {
        match s {
            "lifestyle" => Ok(ThresholdProfile::Lifestyle),
            "moderate" => Ok(ThresholdProfile::Moderate),
            "high-performance" => Ok(ThresholdProfile::HighPerformance),
            "custom" => Ok(ThresholdProfile::Custom),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown threshold profile: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_validation() {
        assert!(ScoringThresholds::new(33.0, 80.0).is_ok());
        assert!(ScoringThresholds::new(0.0, 100.0).is_ok());

        // red_max must be strictly below orange_max
        assert!(ScoringThresholds::new(80.0, 80.0).is_err());
        assert!(ScoringThresholds::new(90.0, 80.0).is_err());
        // bounds
        assert!(ScoringThresholds::new(-1.0, 80.0).is_err());
        assert!(ScoringThresholds::new(33.0, 101.0).is_err());
        assert!(ScoringThresholds::new(100.0, 100.0).is_err());
    }

    #[test]
    fn test_profile_defaults() {
        assert!(ThresholdProfile::Lifestyle.default_thresholds().is_some());
        assert!(ThresholdProfile::Moderate.default_thresholds().is_some());
        assert!(ThresholdProfile::HighPerformance
            .default_thresholds()
            .is_some());
        assert!(ThresholdProfile::Custom.default_thresholds().is_none());
    }

    #[test]
    fn test_profile_names_round_trip() {
        for profile in [
            ThresholdProfile::Lifestyle,
            ThresholdProfile::Moderate,
            ThresholdProfile::HighPerformance,
            ThresholdProfile::Custom,
        ] {
            assert_eq!(
                ThresholdProfile::from_str_name(profile.as_str()).unwrap(),
                profile
            );
        }
        assert!(ThresholdProfile::from_str_name("extreme").is_err());
    }
}
