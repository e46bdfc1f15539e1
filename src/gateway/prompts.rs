//! Fixed prompts, system instructions, and response schemas for the three
//! gateway operations.
//!
//! The generative service's contract is the whole correctness story here:
//! inputs are embedded verbatim into the prompt, and the output is
//! constrained to a fixed JSON schema per operation.

use serde_json::{Value, json};

use crate::plan::RecommendationPlan;
use crate::profile::FarmerProfile;

/// System instruction for the initial plan call.
pub const INITIAL_PLAN_SYSTEM_INSTRUCTION: &str = "You are Agri-Genius 2040, an autonomous agricultural co-intelligence. Your purpose is to provide hyper-optimized, regenerative ecosystem blueprints. Respond in valid JSON format according to the provided schema. Be concise, actionable, and futuristic in your recommendations, assuming 2040-level technology and climate projections.";

/// System instruction for the adaptive plan call.
pub const ADAPTIVE_PLAN_SYSTEM_INSTRUCTION: &str = "You are Agri-Genius 2040. A critical climate event has occurred. You must provide an immediate 'Adaptive Response Protocol'. Respond in valid JSON format according to the provided schema. The advice must be urgent, precise, and actionable.";

/// The single scenario exposed by the dashboard's fixed trigger.
pub const DEFAULT_SCENARIO: &str = "Unseasonal heavy monsoon surge";

/// Build the prompt for the initial recommendation plan.
pub fn initial_plan_prompt(profile: &FarmerProfile) -> String {
    format!(
        "Generate a \"Phase 1: Ecosystem Restoration & Crop Initialization\" plan for a farmer \
         with the following profile: Location: {}, Goals: \"{}\".",
        profile.location, profile.goals
    )
}

/// Build the prompt for an adaptive response protocol.
///
/// Embeds the serialized initial plan so the model revises what it actually
/// recommended, not a paraphrase.
pub fn adaptive_plan_prompt(initial_plan: &RecommendationPlan, scenario: &str) -> String {
    let serialized =
        serde_json::to_string(initial_plan).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Given the initial agricultural plan: {serialized}, a sudden and unexpected climate \
         event has occurred: \"{scenario}\". Generate an \"Adaptive Response Protocol\" to \
         mitigate risks and adapt the strategy."
    )
}

/// Build the prompt for the layout image call.
pub fn layout_image_prompt(layout_description: &str) -> String {
    format!(
        "A photorealistic aerial visualization of a regenerative farm layout: \
         {layout_description}"
    )
}

/// Response schema for the initial recommendation plan.
pub fn initial_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "cropVarietals": {
                "type": "ARRAY",
                "description": "List of recommended crop varietals.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Name of the crop varietal." },
                        "reason": { "type": "STRING", "description": "Reason for recommending this varietal." }
                    },
                    "required": ["name", "reason"]
                }
            },
            "companionFlora": {
                "type": "ARRAY",
                "description": "List of recommended native companion flora.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Name of the companion plant." },
                        "purpose": { "type": "STRING", "description": "Purpose of this plant (e.g., pest deterrence, soil enrichment)." }
                    },
                    "required": ["name", "purpose"]
                }
            },
            "soilProtocol": {
                "type": "ARRAY",
                "description": "A bespoke microbial soil inoculant protocol.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "step": { "type": "STRING", "description": "The step in the protocol." },
                        "details": { "type": "STRING", "description": "Details of the step." }
                    },
                    "required": ["step", "details"]
                }
            },
            "waterManagement": {
                "type": "OBJECT",
                "description": "Projected water usage and management techniques.",
                "properties": {
                    "technique": { "type": "STRING", "description": "Recommended water-saving technique." },
                    "projection": { "type": "STRING", "description": "Projected water usage impact." }
                },
                "required": ["technique", "projection"]
            },
            "farmLayoutDescription": {
                "type": "STRING",
                "description": "A description of the recommended 3D farm layout for visualization."
            }
        },
        "required": [
            "cropVarietals",
            "companionFlora",
            "soilProtocol",
            "waterManagement",
            "farmLayoutDescription"
        ]
    })
}

/// Response schema for the adaptive response protocol.
pub fn adaptive_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scenario": {
                "type": "STRING",
                "description": "The climate scenario being addressed."
            },
            "immediateActions": {
                "type": "ARRAY",
                "description": "Urgent actions to be taken immediately.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "action": { "type": "STRING", "description": "The immediate action to take." },
                        "rationale": { "type": "STRING", "description": "The reason for this action." }
                    },
                    "required": ["action", "rationale"]
                }
            },
            "revisedProjections": {
                "type": "ARRAY",
                "description": "Updated projections based on the new scenario.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "area": { "type": "STRING", "description": "The area of projection (e.g., Yield, Water Usage)." },
                        "change": { "type": "STRING", "description": "The projected change." }
                    },
                    "required": ["area", "change"]
                }
            },
            "longTermAdjustments": {
                "type": "STRING",
                "description": "Long-term strategic adjustments to the overall plan."
            }
        },
        "required": ["scenario", "immediateActions", "revisedProjections", "longTermAdjustments"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{CompanionFlora, CropVarietal, SoilProtocolStep, WaterManagement};

    fn sample_profile() -> FarmerProfile {
        FarmerProfile::new("Jharkhand, India", "Sustainable rice cultivation").unwrap()
    }

    fn sample_plan() -> RecommendationPlan {
        RecommendationPlan {
            crop_varietals: vec![CropVarietal {
                name: "SRI Rice".to_string(),
                reason: "flood tolerant".to_string(),
            }],
            companion_flora: vec![CompanionFlora {
                name: "Azolla".to_string(),
                purpose: "nitrogen fixation".to_string(),
            }],
            soil_protocol: vec![SoilProtocolStep {
                step: "Inoculate".to_string(),
                details: "apply mycorrhizae".to_string(),
            }],
            water_management: WaterManagement {
                technique: "AWD".to_string(),
                projection: "-30% usage".to_string(),
            },
            farm_layout_description: "Terraced paddies".to_string(),
        }
    }

    #[test]
    fn initial_prompt_embeds_profile_verbatim() {
        let prompt = initial_plan_prompt(&sample_profile());
        assert!(prompt.contains("Location: Jharkhand, India"));
        assert!(prompt.contains("Goals: \"Sustainable rice cultivation\""));
        assert!(prompt.contains("Phase 1: Ecosystem Restoration & Crop Initialization"));
    }

    #[test]
    fn adaptive_prompt_embeds_serialized_plan_and_scenario() {
        let prompt = adaptive_plan_prompt(&sample_plan(), DEFAULT_SCENARIO);
        assert!(prompt.contains("\"cropVarietals\""));
        assert!(prompt.contains("SRI Rice"));
        assert!(prompt.contains("\"Unseasonal heavy monsoon surge\""));
        assert!(prompt.contains("Adaptive Response Protocol"));
    }

    #[test]
    fn image_prompt_embeds_description() {
        let prompt = layout_image_prompt("Terraced paddies with azolla channels");
        assert!(prompt.contains("Terraced paddies with azolla channels"));
    }

    #[test]
    fn initial_schema_requires_all_five_sections() {
        let schema = initial_plan_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec![
                "cropVarietals",
                "companionFlora",
                "soilProtocol",
                "waterManagement",
                "farmLayoutDescription"
            ]
        );
    }

    #[test]
    fn adaptive_schema_requires_all_fields() {
        let schema = adaptive_plan_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert_eq!(schema["properties"]["scenario"]["type"], "STRING");
    }
}
