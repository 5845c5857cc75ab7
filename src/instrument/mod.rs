//! Instrument module - the artificial horizon itself
//!
//! This module provides:
//! - Configuration, palette and construction errors
//! - Layout derived from the configuration
//! - Pitch ladder and roll scale tables
//! - `AttitudeIndicator`, which builds the face and re-poses it per sample

mod config;
mod geometry;
mod indicator;
mod marks;

pub use config::{clamp_zoom, InstrumentConfig, InstrumentError, Palette, MAX_ZOOM, MIN_ZOOM};
pub use geometry::InstrumentGeometry;
pub use indicator::{AircraftSymbol, AttitudeIndicator, Horizon, ORIENTATION_GUIDE};
pub use marks::{
    PitchMark, PitchRung, RollMark, RollTick, RollTickStyle, RungWeight, PITCH_LADDER, ROLL_SCALE,
};
