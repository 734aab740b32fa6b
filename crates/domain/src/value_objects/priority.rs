//! Action priority value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency attached to irrigation schedules and dispatched notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait, nice to have
    #[default]
    Low,
    /// Worth scheduling this week
    Medium,
    /// Act within a day or two
    High,
    /// Crop losses likely without immediate action
    Critical,
}

impl Priority {
    /// Numeric rank, 0 (low) to 3 (critical)
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
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

    /// One step more urgent, saturating at critical
    #[must_use]
    pub const fn escalate(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Critical => Self::Critical,
        }
    }

    /// One step less urgent, saturating at low
    #[must_use]
    pub const fn relax(self) -> Self {
        match self {
            Self::Critical => Self::High,
            Self::High => Self::Medium,
            Self::Medium | Self::Low => Self::Low,
        }
    }

    /// Get all priority levels in descending order (highest first)
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Critical, Self::High, Self::Medium, Self::Low]
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(Priority::default(), Priority::Low);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Priority::Critical), "Critical");
        assert_eq!(format!("{}", Priority::Low), "Low");
    }

    #[test]
    fn test_escalate_saturates() {
        assert_eq!(Priority::Low.escalate(), Priority::Medium);
        assert_eq!(Priority::High.escalate(), Priority::Critical);
        assert_eq!(Priority::Critical.escalate(), Priority::Critical);
    }

    #[test]
    fn test_relax_saturates() {
        assert_eq!(Priority::Critical.relax(), Priority::High);
        assert_eq!(Priority::Medium.relax(), Priority::Low);
        assert_eq!(Priority::Low.relax(), Priority::Low);
    }

    #[test]
    fn test_ordering() {
        let mut priorities = vec![
            Priority::Medium,
            Priority::Critical,
            Priority::Low,
            Priority::High,
        ];
        priorities.sort();
        priorities.reverse();
        assert_eq!(priorities, Priority::all().to_vec());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Priority::Critical).expect("serialize");
        assert_eq!(json, "\"critical\"");

        let deserialized: Priority = serde_json::from_str("\"medium\"").expect("deserialize");
        assert_eq!(deserialized, Priority::Medium);
    }
}
