//! Attitude samples and range normalization

use serde::{Deserialize, Serialize};

/// One attitude reading in degrees
///
/// `roll` is bank (positive = right wing down), `pitch` is nose up/down.
/// The dashboard historically sends `{x: roll, y: pitch}`, so both field
/// names are accepted when deserializing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttitudeSample {
    #[serde(alias = "x")]
    pub roll: f32,
    #[serde(alias = "y")]
    pub pitch: f32,
}

impl AttitudeSample {
    pub fn new(roll: f32, pitch: f32) -> Self {
        Self { roll, pitch }
    }

    /// Wings level, nose on the horizon
    pub fn level() -> Self {
        Self::default()
    }

    /// Normalize raw sensor angles (e.g. 0..360) into the indicator's domain
    ///
    /// Roll is wrapped into (-180, 180]; pitch is wrapped the same way and
    /// then clamped into [-90, 90].
    pub fn from_raw(roll: f32, pitch: f32) -> Self {
        Self {
            roll: wrap_degrees(roll),
            pitch: wrap_degrees(pitch).clamp(-90.0, 90.0),
        }
    }

    /// Whether both angles are finite numbers
    pub fn is_finite(&self) -> bool {
        self.roll.is_finite() && self.pitch.is_finite()
    }
}

/// Wrap an angle into (-180, 180]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Zero reference captured from a resting vehicle
///
/// Subtracting it from later samples "straightens" an IMU that is mounted
/// slightly off level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelTrim {
    pub roll: f32,
    pub pitch: f32,
}

impl LevelTrim {
    /// No correction
    pub fn none() -> Self {
        Self::default()
    }

    /// Accumulate the current reading into the trim
    ///
    /// `sample` is expected to already be trimmed, so calling this again
    /// while the vehicle is still at rest leaves the output level.
    pub fn capture(&mut self, sample: AttitudeSample) {
        self.roll += sample.roll;
        self.pitch += sample.pitch;
        log::info!(
            "Level trim captured: roll {:.2}, pitch {:.2}",
            self.roll,
            self.pitch
        );
    }

    /// Subtract the trim and renormalize
    pub fn apply(&self, sample: AttitudeSample) -> AttitudeSample {
        AttitudeSample::from_raw(sample.roll - self.roll, sample.pitch - self.pitch)
    }

    pub fn is_none(&self) -> bool {
        self.roll == 0.0 && self.pitch == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(0.0) - 0.0).abs() < 0.001);
        assert!((wrap_degrees(180.0) - 180.0).abs() < 0.001);
        assert!((wrap_degrees(190.0) - (-170.0)).abs() < 0.001);
        assert!((wrap_degrees(359.0) - (-1.0)).abs() < 0.001);
        assert!((wrap_degrees(-180.0) - 180.0).abs() < 0.001);
        assert!((wrap_degrees(725.0) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_from_raw_clamps_pitch() {
        let sample = AttitudeSample::from_raw(350.0, 120.0);
        assert!((sample.roll - (-10.0)).abs() < 0.001);
        assert!((sample.pitch - 90.0).abs() < 0.001);

        let sample = AttitudeSample::from_raw(10.0, 300.0);
        assert!((sample.pitch - (-60.0)).abs() < 0.001);
    }

    #[test]
    fn test_deserialize_dashboard_aliases() {
        let sample: AttitudeSample = serde_json::from_str(r#"{"x": 12.5, "y": -3}"#).unwrap();
        assert_eq!(sample, AttitudeSample::new(12.5, -3.0));

        let sample: AttitudeSample =
            serde_json::from_str(r#"{"roll": 1, "pitch": 2}"#).unwrap();
        assert_eq!(sample, AttitudeSample::new(1.0, 2.0));
    }

    #[test]
    fn test_level_trim() {
        let mut trim = LevelTrim::none();
        assert!(trim.is_none());

        let resting = AttitudeSample::new(3.0, -2.0);
        trim.capture(trim.apply(resting));
        let corrected = trim.apply(resting);
        assert!(corrected.roll.abs() < 0.001);
        assert!(corrected.pitch.abs() < 0.001);

        // Capturing again at rest changes nothing
        trim.capture(trim.apply(resting));
        assert!((trim.roll - 3.0).abs() < 0.001);

        let banked = trim.apply(AttitudeSample::new(33.0, -2.0));
        assert!((banked.roll - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_is_finite() {
        assert!(AttitudeSample::level().is_finite());
        assert!(!AttitudeSample::new(f32::NAN, 0.0).is_finite());
    }
}
