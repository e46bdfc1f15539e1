//! Agri-Pilot — terminal co-intelligence for regenerative farm planning.

pub mod app;
pub mod config;
pub mod error;
pub mod gateway;
pub mod plan;
pub mod profile;
pub mod render;
pub mod repl;
