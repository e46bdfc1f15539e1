//! Application core — view state machine and orchestration.

pub mod controller;
pub mod state;

pub use controller::AppController;
pub use state::{AppState, ImageSlot, View};
