//! attitude-rs - Attitude indicator (artificial horizon) widget
//!
//! Builds an artificial horizon as a small retained vector scene and
//! re-poses it from roll/pitch samples.
//!
//! ## Modules
//! - `scene`: shapes, paint, masks, gradients and transforms
//! - `instrument`: the indicator itself and its layout
//! - `telemetry`: attitude samples, IMU decoding, demo source
//! - `export`: SVG output
//! - `render`: egui widget
//!
//! ## Example
//!
//! ```
//! use attitude_rs::instrument::{AttitudeIndicator, InstrumentConfig};
//! use attitude_rs::telemetry::AttitudeSample;
//!
//! let mut indicator = AttitudeIndicator::new(InstrumentConfig::default()).unwrap();
//! indicator.update_attitude(AttitudeSample::new(30.0, 5.0));
//! let svg = indicator.export_svg();
//! assert!(svg.contains("rotate(30 180 180)"));
//! ```

pub mod export;
pub mod instrument;
pub mod render;
pub mod scene;
pub mod telemetry;
