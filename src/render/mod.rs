//! Render module - UI components for visualization
//!
//! This module provides:
//! - The attitude indicator display widget
//! - CPU mask clipping used by the widget

mod clip;
mod widget;

pub use widget::{AttitudeWidget, ViewTransform, WidgetSettings};
