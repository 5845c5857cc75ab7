//! Telemetry module - attitude samples and where they come from
//!
//! This module provides:
//! - `AttitudeSample` plus raw-range normalization and level trim
//! - IMU state document decoding
//! - A latest-sample slot for coalescing fast producers
//! - An LFO-driven demo source

mod demo;
mod feed;
mod imu;
mod sample;

pub use demo::{DemoAttitude, DemoConfig, Lfo, LfoWaveform};
pub use feed::LatestSample;
pub use imu::{decode_attitude, Axes, Calibration, ImuReading, ImuState, TelemetryError};
pub use sample::{wrap_degrees, AttitudeSample, LevelTrim};
