//! IMU state documents published by the robot controller
//!
//! The IMU fusion node reports its full state as JSON:
//!
//! ```json
//! {
//!   "imu": {
//!     "calibration": { "sys": 3, "gyro": 3, "accel": 1, "mag": 0 },
//!     "gyro": { "x": 1.5, "y": -4.0, "z": 270.0 },
//!     "vel":  { "x": 0.0, "y": 0.0, "z": 0.0 }
//!   },
//!   "temp": 31
//! }
//! ```
//!
//! Only the Euler angles in `imu.gyro` matter to the indicator: `x` is roll
//! and `y` is pitch. Everything else is accepted and ignored if missing.

use serde::Deserialize;
use thiserror::Error;

use super::sample::AttitudeSample;

/// Errors that can occur while decoding telemetry
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to decode telemetry: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Telemetry contains non-finite angles")]
    NonFinite,
}

/// Three-axis reading
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Axes {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Sensor calibration levels (0 = uncalibrated, 3 = fully calibrated)
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub sys: u32,
    pub gyro: u32,
    pub accel: u32,
    pub mag: u32,
}

/// The `imu` object of a state document
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImuReading {
    pub calibration: Calibration,
    /// Euler angles in degrees
    pub gyro: Axes,
    pub vel: Axes,
}

/// A full IMU state document
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImuState {
    pub imu: ImuReading,
    pub temp: f32,
}

impl ImuState {
    /// Decode a state document from JSON text
    pub fn from_json(text: &str) -> Result<Self, TelemetryError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Attitude carried by this state, normalized into the indicator's domain
    pub fn attitude(&self) -> Result<AttitudeSample, TelemetryError> {
        let raw = AttitudeSample::new(self.imu.gyro.x, self.imu.gyro.y);
        if !raw.is_finite() {
            return Err(TelemetryError::NonFinite);
        }
        Ok(AttitudeSample::from_raw(raw.roll, raw.pitch))
    }
}

/// Decode an attitude from either an IMU state document or a bare sample
///
/// Bare samples look like `{"x": 10, "y": -5}` or `{"roll": 10, "pitch": -5}`.
pub fn decode_attitude(text: &str) -> Result<AttitudeSample, TelemetryError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.get("imu").is_some() {
        let state: ImuState = serde_json::from_value(value)?;
        return state.attitude();
    }
    let sample: AttitudeSample = serde_json::from_value(value)?;
    if !sample.is_finite() {
        return Err(TelemetryError::NonFinite);
    }
    Ok(AttitudeSample::from_raw(sample.roll, sample.pitch))
}
