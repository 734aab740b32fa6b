//! Risk classification value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound (exclusive) of the low drought-risk bucket
pub const LOW_RISK_CEILING: f64 = 0.40;

/// Upper bound (inclusive) of the medium drought-risk bucket
pub const MEDIUM_RISK_CEILING: f64 = 0.60;

/// Three-level drought risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// `overall_risk < 0.40`
    Low,
    /// `0.40 <= overall_risk <= 0.60`
    Medium,
    /// `overall_risk > 0.60`
    High,
}

impl RiskLevel {
    /// Bucket a risk scalar
    ///
    /// Out-of-range input is clamped to [0, 1]; NaN counts as zero risk.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        if score < LOW_RISK_CEILING {
            Self::Low
        } else if score <= MEDIUM_RISK_CEILING {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Four-level pest and disease pressure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    /// Background pressure, routine scouting
    Low,
    /// Favourable conditions developing
    Medium,
    /// Outbreak conditions, treat preventively
    High,
    /// Active outbreak weather, act now
    Critical,
}

impl RiskSeverity {
    /// Display-neutral numeric severity, 0 (low) to 3 (critical)
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    /// Map an accumulated pressure score (0-100) to a severity
    #[must_use]
    pub fn from_pressure(pressure: f64) -> Self {
        if pressure >= 75.0 {
            Self::Critical
        } else if pressure >= 50.0 {
            Self::High
        } else if pressure >= 25.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_buckets_at_boundaries() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.61), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::High);
    }

    #[test]
    fn risk_buckets_tolerate_bad_input() {
        assert_eq!(RiskLevel::from_score(f64::NAN), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(-3.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(7.5), RiskLevel::High);
    }

    #[test]
    fn severity_is_monotonic() {
        assert_eq!(RiskSeverity::Low.severity(), 0);
        assert_eq!(RiskSeverity::Critical.severity(), 3);
        assert!(RiskSeverity::High > RiskSeverity::Medium);
    }

    #[test]
    fn pressure_mapping() {
        assert_eq!(RiskSeverity::from_pressure(0.0), RiskSeverity::Low);
        assert_eq!(RiskSeverity::from_pressure(24.9), RiskSeverity::Low);
        assert_eq!(RiskSeverity::from_pressure(25.0), RiskSeverity::Medium);
        assert_eq!(RiskSeverity::from_pressure(60.0), RiskSeverity::High);
        assert_eq!(RiskSeverity::from_pressure(90.0), RiskSeverity::Critical);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).expect("serialize"),
            "\"medium\""
        );
        assert_eq!(
            serde_json::to_string(&RiskSeverity::Critical).expect("serialize"),
            "\"critical\""
        );
    }
}
