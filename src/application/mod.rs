//! Application wiring
//!
//! Coordinates the feed simulators with the terminal renderer that stands in
//! for the dashboard panels.

pub mod app;
pub mod renderer;

pub use app::Application;
