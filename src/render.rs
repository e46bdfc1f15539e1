//! Presentation — pure functions from state snapshots to terminal text.
//!
//! No logic of its own: everything here is derived from `AppState`.

use crate::app::{AppState, ImageSlot, View};
use crate::plan::{AdaptivePlan, RecommendationPlan};
use crate::profile::FarmerProfile;

/// Banner shown on the onboarding screen.
pub fn onboarding_banner() -> String {
    "🌏 Initialize Agricultural Co-Intelligence\n\
     Input your farm's location and primary objectives to generate a \
     hyper-personalized ecosystem blueprint.\n"
        .to_string()
}

/// One-line loading indicator for a primary request.
pub fn loading_line(message: &str) -> String {
    format!("⏳ {message}")
}

/// Error banner for a failed primary request.
pub fn error_banner(message: &str) -> String {
    format!("⚠️  {message}")
}

/// Render the full current state.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();

    if let Some(ref message) = state.loading {
        out.push_str(&loading_line(message));
        out.push('\n');
        return out;
    }

    match &state.view {
        View::Onboarding => {
            out.push_str(&onboarding_banner());
        }
        View::Dashboard { profile, plan } => {
            out.push_str(&dashboard(profile, &plan.value, &state.image));
            if let Some(ref adaptive) = state.adaptive {
                out.push('\n');
                out.push_str(&adaptive_protocol(&adaptive.value));
            }
        }
    }

    if let Some(ref error) = state.error {
        out.push('\n');
        out.push_str(&error_banner(error));
        out.push('\n');
    }

    out
}

/// The dashboard: profile line, the five plan sections, and the image status.
pub fn dashboard(profile: &FarmerProfile, plan: &RecommendationPlan, image: &ImageSlot) -> String {
    let mut out = String::new();

    out.push_str("═══ Phase 1: Ecosystem Restoration & Crop Initialization ═══\n");
    out.push_str(&format!("📍 {} — {}\n\n", profile.location, profile.goals));

    out.push_str("🌾 Crop Varietals\n");
    for item in &plan.crop_varietals {
        out.push_str(&format!("   • {} — {}\n", item.name, item.reason));
    }

    out.push_str("\n🍃 Companion Flora\n");
    for item in &plan.companion_flora {
        out.push_str(&format!("   • {} — {}\n", item.name, item.purpose));
    }

    out.push_str("\n🦠 Soil Protocol\n");
    for (i, item) in plan.soil_protocol.iter().enumerate() {
        out.push_str(&format!("   {}. {} — {}\n", i + 1, item.step, item.details));
    }

    out.push_str("\n💧 Water Management\n");
    out.push_str(&format!(
        "   {} — {}\n",
        plan.water_management.technique, plan.water_management.projection
    ));

    out.push_str("\n🛰  Holographic Farm Layout\n");
    out.push_str(&format!("   {}\n", plan.farm_layout_description));
    out.push_str(&format!("   {}\n", image_status(image)));

    out
}

/// The adaptive response protocol section.
pub fn adaptive_protocol(plan: &AdaptivePlan) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "═══ Adaptive Response Protocol: {} ═══\n",
        plan.scenario
    ));

    out.push_str("🚨 Immediate Actions\n");
    for item in &plan.immediate_actions {
        out.push_str(&format!("   • {} — {}\n", item.action, item.rationale));
    }

    out.push_str("\n📈 Revised Projections\n");
    for item in &plan.revised_projections {
        out.push_str(&format!("   • {}: {}\n", item.area, item.change));
    }

    out.push_str("\n🧭 Long-Term Adjustments\n");
    out.push_str(&format!("   {}\n", plan.long_term_adjustments));

    out
}

/// One-line image status. Data URLs are summarized, not dumped.
pub fn image_status(image: &ImageSlot) -> String {
    match image {
        ImageSlot::Idle => "[no visualization requested]".to_string(),
        ImageSlot::Loading => "[rendering visualization...]".to_string(),
        ImageSlot::Ready(asset) => {
            if asset.url.starts_with("data:") {
                format!("[visualization ready — inline image, {} bytes]", asset.url.len())
            } else {
                format!("[visualization ready — {}]", asset.url)
            }
        }
        ImageSlot::Unavailable => "[visualization unavailable — placeholder shown]".to_string(),
    }
}
