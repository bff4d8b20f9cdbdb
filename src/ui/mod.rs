//! UI rendering module for the Skycast dashboard
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod dashboard;
pub mod widgets;

pub use dashboard::render as render_dashboard;
