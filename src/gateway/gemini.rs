//! Gemini-backed implementation of the plan request gateway.
//!
//! Plans go through `generateContent` in JSON mode with a fixed
//! `responseSchema`; the layout image goes through the Imagen `:predict`
//! endpoint and comes back as a base64 payload, returned as a data URL.
//!
//! Envelope extraction (candidates/parts, predictions) is a separate
//! fallible step from payload deserialization, so "the service answered
//! garbage" and "the JSON does not match the plan shape" surface as
//! distinct parse reasons.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{GatewayError, Operation};
use crate::plan::{AdaptivePlan, ImageAsset, RecommendationPlan};
use crate::profile::FarmerProfile;

use super::PlanGateway;
use super::prompts;

/// Gateway talking to the Gemini REST API.
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    image_model: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: ContentPayload,
    contents: Vec<ContentPayload>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ContentPayload {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

impl GeminiGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            image_model: config.image_model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn predict_url(&self) -> String {
        format!("{}/models/{}:predict", self.base_url, self.image_model)
    }

    /// One schema-constrained generateContent round trip, returning the
    /// model's text payload.
    async fn generate_json(
        &self,
        operation: Operation,
        system_instruction: &str,
        prompt: String,
        schema: Value,
    ) -> Result<String, GatewayError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%operation, %request_id, model = %self.model, "Dispatching generateContent");

        let body = GenerateContentRequest {
            system_instruction: ContentPayload {
                parts: vec![TextPart {
                    text: system_instruction.to_string(),
                }],
            },
            contents: vec![ContentPayload {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                operation,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::Transport {
                operation,
                reason: format!("HTTP {status}: {detail}"),
            });
        }

        let envelope: Value = response.json().await.map_err(|e| GatewayError::Parse {
            operation,
            reason: format!("response body is not JSON: {e}"),
        })?;

        let text = extract_candidate_text(&envelope).ok_or_else(|| GatewayError::Parse {
            operation,
            reason: "no text candidate in response".to_string(),
        })?;

        tracing::debug!(%operation, %request_id, bytes = text.len(), "generateContent settled");
        Ok(text)
    }
}

/// Concatenate the text parts of the first candidate, if any.
fn extract_candidate_text(envelope: &Value) -> Option<String> {
    let parts = envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Pull the base64 image payload out of an Imagen predict response.
fn extract_prediction_bytes(envelope: &Value) -> Option<&str> {
    envelope
        .get("predictions")?
        .get(0)?
        .get("bytesBase64Encoded")?
        .as_str()
}

#[async_trait::async_trait]
impl PlanGateway for GeminiGateway {
    async fn initial_plan(
        &self,
        profile: &FarmerProfile,
    ) -> Result<RecommendationPlan, GatewayError> {
        let operation = Operation::InitialPlan;
        let text = self
            .generate_json(
                operation,
                prompts::INITIAL_PLAN_SYSTEM_INSTRUCTION,
                prompts::initial_plan_prompt(profile),
                prompts::initial_plan_schema(),
            )
            .await?;

        serde_json::from_str(text.trim()).map_err(|e| GatewayError::Parse {
            operation,
            reason: format!("plan payload did not match the expected shape: {e}"),
        })
    }

    async fn adaptive_plan(
        &self,
        initial_plan: &RecommendationPlan,
        scenario: &str,
    ) -> Result<AdaptivePlan, GatewayError> {
        let operation = Operation::AdaptivePlan;
        let text = self
            .generate_json(
                operation,
                prompts::ADAPTIVE_PLAN_SYSTEM_INSTRUCTION,
                prompts::adaptive_plan_prompt(initial_plan, scenario),
                prompts::adaptive_plan_schema(),
            )
            .await?;

        serde_json::from_str(text.trim()).map_err(|e| GatewayError::Parse {
            operation,
            reason: format!("protocol payload did not match the expected shape: {e}"),
        })
    }

    async fn layout_image(&self, layout_description: &str) -> Result<ImageAsset, GatewayError> {
        let operation = Operation::LayoutImage;
        let request_id = Uuid::new_v4();
        tracing::debug!(%operation, %request_id, model = %self.image_model, "Dispatching predict");

        let body = serde_json::json!({
            "instances": [
                { "prompt": prompts::layout_image_prompt(layout_description) }
            ],
            "parameters": { "sampleCount": 1 }
        });

        let response = self
            .client
            .post(self.predict_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                operation,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::Transport {
                operation,
                reason: format!("HTTP {status}: {detail}"),
            });
        }

        let envelope: Value = response.json().await.map_err(|e| GatewayError::Parse {
            operation,
            reason: format!("response body is not JSON: {e}"),
        })?;

        let encoded = extract_prediction_bytes(&envelope).ok_or_else(|| GatewayError::Parse {
            operation,
            reason: "no image prediction in response".to_string(),
        })?;

        // Validate the payload actually decodes before handing out a URL.
        BASE64.decode(encoded).map_err(|e| GatewayError::Parse {
            operation,
            reason: format!("image payload is not valid base64: {e}"),
        })?;

        Ok(ImageAsset {
            url: format!("data:image/png;base64,{encoded}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_candidate_text() {
        let envelope = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "{\"scenario\":" },
                        { "text": " \"flood\"}" }
                    ]
                }
            }]
        });
        assert_eq!(
            extract_candidate_text(&envelope).as_deref(),
            Some("{\"scenario\": \"flood\"}")
        );
    }

    #[test]
    fn empty_candidates_yield_none() {
        assert!(extract_candidate_text(&json!({ "candidates": [] })).is_none());
        assert!(extract_candidate_text(&json!({})).is_none());
        let blank = json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        });
        assert!(extract_candidate_text(&blank).is_none());
    }

    #[test]
    fn extracts_prediction_bytes() {
        let envelope = json!({
            "predictions": [{ "bytesBase64Encoded": "aGVsbG8=" }]
        });
        assert_eq!(extract_prediction_bytes(&envelope), Some("aGVsbG8="));
        assert!(extract_prediction_bytes(&json!({ "predictions": [] })).is_none());
    }

    #[test]
    fn request_body_serializes_camel_case() {
        let body = GenerateContentRequest {
            system_instruction: ContentPayload {
                parts: vec![TextPart {
                    text: "system".to_string(),
                }],
            },
            contents: vec![ContentPayload {
                parts: vec![TextPart {
                    text: "prompt".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: json!({ "type": "OBJECT" }),
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("systemInstruction").is_some());
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn urls_include_model_and_verb() {
        let gateway = GeminiGateway::new(
            &crate::config::AppConfig::new("k").with_base_url("http://localhost:1/v1beta/"),
        );
        assert_eq!(
            gateway.generate_url(),
            "http://localhost:1/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            gateway.predict_url(),
            "http://localhost:1/v1beta/models/imagen-3.0-generate-002:predict"
        );
    }
}
