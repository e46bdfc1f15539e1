//! Plan data models — the wire shapes returned by the generative service.
//!
//! Field names mirror the response schemas the service is constrained to
//! (camelCase on the wire). Unknown extra fields are tolerated; missing
//! required fields are a parse failure at the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recommended crop varietal and why it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropVarietal {
    pub name: String,
    pub reason: String,
}

/// A native companion plant and its purpose (pest deterrence, soil enrichment, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionFlora {
    pub name: String,
    pub purpose: String,
}

/// One step of the microbial soil inoculant protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilProtocolStep {
    pub step: String,
    pub details: String,
}

/// Water management summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterManagement {
    pub technique: String,
    pub projection: String,
}

/// The first-pass recommendation plan, created once per profile submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPlan {
    pub crop_varietals: Vec<CropVarietal>,
    pub companion_flora: Vec<CompanionFlora>,
    pub soil_protocol: Vec<SoilProtocolStep>,
    pub water_management: WaterManagement,
    pub farm_layout_description: String,
}

/// An urgent action in an adaptive response protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmediateAction {
    pub action: String,
    pub rationale: String,
}

/// A revised projection for one area (yield, water usage, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisedProjection {
    pub area: String,
    pub change: String,
}

/// The revision returned after a simulated climate scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptivePlan {
    pub scenario: String,
    pub immediate_actions: Vec<ImmediateAction>,
    pub revised_projections: Vec<RevisedProjection>,
    pub long_term_adjustments: String,
}

/// An image asset for the farm layout, keyed by an opaque URL.
///
/// Data URLs are accepted; absence is a valid, displayed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
}

/// A stored plan plus when it arrived (display only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timestamped<T> {
    pub value: T,
    pub generated_at: DateTime<Utc>,
}

impl<T> Timestamped<T> {
    pub fn now(value: T) -> Self {
        Self {
            value,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan_json() -> &'static str {
        r#"{
            "cropVarietals": [{"name": "SRI Rice", "reason": "flood tolerant"}],
            "companionFlora": [{"name": "Azolla", "purpose": "nitrogen fixation"}],
            "soilProtocol": [{"step": "Inoculate", "details": "apply mycorrhizae"}],
            "waterManagement": {"technique": "AWD", "projection": "-30% usage"},
            "farmLayoutDescription": "Terraced paddies with azolla channels."
        }"#
    }

    #[test]
    fn recommendation_plan_deserializes_camel_case() {
        let plan: RecommendationPlan = serde_json::from_str(sample_plan_json()).unwrap();
        assert_eq!(plan.crop_varietals[0].name, "SRI Rice");
        assert_eq!(plan.water_management.technique, "AWD");
        assert_eq!(
            plan.farm_layout_description,
            "Terraced paddies with azolla channels."
        );
    }

    #[test]
    fn recommendation_plan_serializes_camel_case() {
        let plan: RecommendationPlan = serde_json::from_str(sample_plan_json()).unwrap();
        let value = serde_json::to_value(&plan).unwrap();
        assert!(value.get("cropVarietals").is_some());
        assert!(value.get("farmLayoutDescription").is_some());
        assert!(value.get("crop_varietals").is_none());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let truncated = r#"{"cropVarietals": [], "companionFlora": []}"#;
        assert!(serde_json::from_str::<RecommendationPlan>(truncated).is_err());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let with_extra = r#"{
            "scenario": "Unseasonal heavy monsoon surge",
            "immediateActions": [],
            "revisedProjections": [],
            "longTermAdjustments": "raise bunds",
            "modelNote": "extra field from a newer service version"
        }"#;
        let plan: AdaptivePlan = serde_json::from_str(with_extra).unwrap();
        assert_eq!(plan.scenario, "Unseasonal heavy monsoon surge");
    }
}
