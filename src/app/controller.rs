//! AppController — orchestrates gateway calls and state transitions.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::app::state::{AppState, ImageSlot};
use crate::gateway::PlanGateway;
use crate::plan::Timestamped;
use crate::profile::FarmerProfile;

/// Loading message while the initial plan request is in flight.
pub const LOADING_INITIAL: &str = "Synthesizing planetary-scale ecological data...";

/// Loading message while a scenario simulation is in flight.
pub const LOADING_ADAPTIVE: &str = "Simulating quantum \"what-if\" scenarios...";

/// User-visible message for a failed initial plan request.
pub const ERROR_INITIAL: &str = "Failed to generate initial plan. The quantum cognitive engine may be recalibrating. Please try again.";

/// User-visible message for a failed scenario simulation.
pub const ERROR_ADAPTIVE: &str = "Failed to generate adaptive response. The predictive model encountered an anomaly. Please try again.";

/// Coordinates the two-screen flow: profile submission, scenario
/// simulation, reset, and the fire-and-forget image fetch.
///
/// At most one primary request is in flight at a time by construction; the
/// image fetch runs decoupled from the primary loading flag and validates
/// its epoch before touching state, so a reset or resubmission mid-flight
/// drops the stale result instead of racing.
pub struct AppController {
    gateway: Arc<dyn PlanGateway>,
    state: Arc<RwLock<AppState>>,
}

impl AppController {
    pub fn new(gateway: Arc<dyn PlanGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(RwLock::new(AppState::default())),
        }
    }

    /// Snapshot the current state for rendering.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Submit a farmer profile and request the initial plan.
    ///
    /// Only valid from onboarding; returns `true` when the dashboard is now
    /// showing. On failure the error message is set and the view stays on
    /// onboarding. The loading flag clears when the request settles either
    /// way; the image fetch is spawned after success and never blocks it.
    pub async fn submit_profile(&self, profile: FarmerProfile) -> bool {
        {
            let mut state = self.state.write().await;
            if state.view.is_dashboard() {
                tracing::warn!("Ignoring profile submission while dashboard is showing");
                return false;
            }
            state.loading = Some(LOADING_INITIAL.to_string());
            state.error = None;
            state.adaptive = None;
        }

        let result = self.gateway.initial_plan(&profile).await;

        let mut state = self.state.write().await;
        state.loading = None;
        match result {
            Ok(plan) => {
                let description = plan.farm_layout_description.clone();
                let epoch = state.install_plan(profile, plan);
                drop(state);
                self.spawn_image_fetch(epoch, description);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Initial plan request failed");
                state.error = Some(ERROR_INITIAL.to_string());
                false
            }
        }
    }

    /// Simulate a climate scenario against the current plan.
    ///
    /// A no-op when no initial plan exists: no state change, no call issued.
    /// Returns `true` when an adaptive plan was stored.
    pub async fn simulate_scenario(&self, scenario: &str) -> bool {
        let plan = {
            let mut state = self.state.write().await;
            let Some(plan) = state.view.plan().cloned() else {
                return false;
            };
            state.loading = Some(LOADING_ADAPTIVE.to_string());
            state.error = None;
            state.adaptive = None;
            plan
        };

        let result = self.gateway.adaptive_plan(&plan, scenario).await;

        let mut state = self.state.write().await;
        state.loading = None;
        match result {
            Ok(adaptive) => {
                state.adaptive = Some(Timestamped::now(adaptive));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Adaptive plan request failed");
                state.error = Some(ERROR_ADAPTIVE.to_string());
                false
            }
        }
    }

    /// Clear all stored data and return to onboarding. Valid from any state.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.reset();
        tracing::info!("State reset, back to onboarding");
    }

    /// Fetch the layout image without blocking the dashboard.
    ///
    /// Failure never touches the shared error field; the slot just becomes
    /// `Unavailable`. A result arriving after the epoch moved is dropped.
    fn spawn_image_fetch(&self, epoch: u64, description: String) {
        let gateway = Arc::clone(&self.gateway);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let result = gateway.layout_image(&description).await;

            let mut state = state.write().await;
            if state.epoch != epoch {
                tracing::debug!(
                    spawned_epoch = epoch,
                    current_epoch = state.epoch,
                    "Dropping stale layout image result"
                );
                return;
            }
            state.image = match result {
                Ok(asset) => ImageSlot::Ready(asset),
                Err(e) => {
                    tracing::warn!(error = %e, "Layout image fetch failed, using placeholder");
                    ImageSlot::Unavailable
                }
            };
        });
    }
}

// Controller behavior is covered by tests/controller_flow.rs with a stub
// gateway; the pure transition logic lives in app::state and is unit tested
// there.
