//! View state machine for the two-screen flow.
//!
//! The dashboard variant carries the profile and plan it renders, so the
//! "dashboard without data" state is unrepresentable rather than
//! defensively checked.

use serde::{Deserialize, Serialize};

use crate::plan::{AdaptivePlan, ImageAsset, RecommendationPlan, Timestamped};
use crate::profile::FarmerProfile;

/// Which screen the user is on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Onboarding,
    Dashboard {
        profile: FarmerProfile,
        plan: Timestamped<RecommendationPlan>,
    },
}

impl View {
    pub fn is_dashboard(&self) -> bool {
        matches!(self, Self::Dashboard { .. })
    }

    /// The initial plan, when a dashboard is showing.
    pub fn plan(&self) -> Option<&RecommendationPlan> {
        match self {
            Self::Dashboard { plan, .. } => Some(&plan.value),
            Self::Onboarding => None,
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Onboarding => "onboarding",
            Self::Dashboard { .. } => "dashboard",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle of the layout image, independent of the primary loading flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageSlot {
    /// No image requested yet (onboarding, or just reset).
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The asset arrived.
    Ready(ImageAsset),
    /// The fetch failed; the dashboard shows a placeholder. Not an error.
    Unavailable,
}

impl ImageSlot {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// The whole application state: the current view plus orthogonal transients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub view: View,
    /// Message shown while a primary request is in flight; `None` when idle.
    pub loading: Option<String>,
    /// User-visible message from the last failed primary request.
    pub error: Option<String>,
    /// Adaptive plan from the last scenario simulation, if any.
    pub adaptive: Option<Timestamped<AdaptivePlan>>,
    /// Layout image lifecycle.
    pub image: ImageSlot,
    /// Bumped on every submission and reset; in-flight image results from an
    /// older epoch are discarded instead of racing current state.
    pub epoch: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Onboarding,
            loading: None,
            error: None,
            adaptive: None,
            image: ImageSlot::Idle,
            epoch: 0,
        }
    }
}

impl AppState {
    /// Install a freshly generated plan: the dashboard replaces any prior
    /// view, stale adaptive plan and image state are cleared, and the epoch
    /// moves so in-flight work from before the submission is invalidated.
    pub fn install_plan(&mut self, profile: FarmerProfile, plan: RecommendationPlan) -> u64 {
        self.view = View::Dashboard {
            profile,
            plan: Timestamped::now(plan),
        };
        self.error = None;
        self.adaptive = None;
        self.image = ImageSlot::Loading;
        self.epoch += 1;
        self.epoch
    }

    /// Clear everything and return to onboarding.
    pub fn reset(&mut self) {
        self.view = View::Onboarding;
        self.loading = None;
        self.error = None;
        self.adaptive = None;
        self.image = ImageSlot::Idle;
        self.epoch += 1;
    }
}
