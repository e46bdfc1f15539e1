//! Farmer profile captured during onboarding.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Suggested location shown as the onboarding placeholder.
pub const PLACEHOLDER_LOCATION: &str = "Jharkhand, India";

/// Suggested goals shown as the onboarding placeholder.
pub const PLACEHOLDER_GOALS: &str =
    "Sustainable rice cultivation with maximum biodiversity co-benefit and carbon sequestration.";

/// A farmer's location and goals, captured once and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub location: String,
    pub goals: String,
}

impl FarmerProfile {
    /// Build a validated profile. Both fields must be non-empty after trim.
    pub fn new(location: impl Into<String>, goals: impl Into<String>) -> Result<Self, ProfileError> {
        let location = location.into();
        let goals = goals.into();
        if location.trim().is_empty() {
            return Err(ProfileError::EmptyField { field: "location" });
        }
        if goals.trim().is_empty() {
            return Err(ProfileError::EmptyField { field: "goals" });
        }
        Ok(Self { location, goals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty_fields() {
        let profile = FarmerProfile::new(PLACEHOLDER_LOCATION, PLACEHOLDER_GOALS).unwrap();
        assert_eq!(profile.location, "Jharkhand, India");
    }

    #[test]
    fn rejects_empty_location() {
        let err = FarmerProfile::new("   ", "grow rice").unwrap_err();
        assert!(matches!(err, ProfileError::EmptyField { field: "location" }));
    }

    #[test]
    fn rejects_empty_goals() {
        let err = FarmerProfile::new("Jharkhand", "\n\t").unwrap_err();
        assert!(matches!(err, ProfileError::EmptyField { field: "goals" }));
    }
}
