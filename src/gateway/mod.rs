//! Plan request gateway — the boundary to the external generative service.
//!
//! Three one-shot operations, each a single request/response round trip with
//! a fixed system instruction and a fixed output schema. No caching, no
//! retries, no backoff: every failure is terminal for that request and the
//! user resubmits manually.

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiGateway;
pub use prompts::DEFAULT_SCENARIO;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::plan::{AdaptivePlan, ImageAsset, RecommendationPlan};
use crate::profile::FarmerProfile;

/// The external generative service, seen as three logical calls.
#[async_trait]
pub trait PlanGateway: Send + Sync {
    /// Request the first-pass recommendation plan for a profile.
    async fn initial_plan(
        &self,
        profile: &FarmerProfile,
    ) -> Result<RecommendationPlan, GatewayError>;

    /// Request an adaptive response protocol for a scenario, given the
    /// initial plan it revises.
    async fn adaptive_plan(
        &self,
        initial_plan: &RecommendationPlan,
        scenario: &str,
    ) -> Result<AdaptivePlan, GatewayError>;

    /// Request an image rendering of the farm layout description.
    ///
    /// Callers treat failure as non-fatal: the dashboard renders a
    /// placeholder instead.
    async fn layout_image(&self, layout_description: &str) -> Result<ImageAsset, GatewayError>;
}
