//! Instrument configuration and construction errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{Color, PathError};

/// Lowest allowed pitch-ladder zoom
pub const MIN_ZOOM: f32 = 1.0;
/// Highest allowed pitch-ladder zoom
pub const MAX_ZOOM: f32 = 3.0;

/// Errors that can occur while building an instrument
#[derive(Error, Debug)]
pub enum InstrumentError {
    #[error("Invalid instrument configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build orientation guide: {0}")]
    Guide(#[from] PathError),
}

/// Colors of the instrument face
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub ground: Color,
    pub sky: Color,
    /// Ladder, roll ticks and horizon outlines
    pub markings: Color,
    /// Fixed aircraft symbol
    pub symbol: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ground: Color::rgb(0x65, 0x43, 0x21),
            sky: Color::rgb(0x87, 0xce, 0xeb),
            markings: Color::WHITE,
            symbol: Color::rgb(0xff, 0xff, 0x00),
        }
    }
}

/// Instrument dimensions and appearance
///
/// All lengths are in scene units; the live view scales the whole face to
/// the space it is given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentConfig {
    /// Face width
    pub width: f32,
    /// Face height
    pub height: f32,
    /// Depth of the bezel ring
    pub outer_radius: f32,
    /// Base stroke width
    pub line_width: f32,
    /// Pitch ladder zoom (1.0 to 3.0)
    pub zoom: f32,
    pub palette: Palette,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 360.0,
            outer_radius: 30.0,
            line_width: 5.0,
            zoom: 1.0,
            palette: Palette::default(),
        }
    }
}

impl InstrumentConfig {
    /// Check that the face can be laid out
    pub fn validate(&self) -> Result<(), InstrumentError> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(InstrumentError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )))
            }
        };

        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("outer_radius", self.outer_radius)?;
        positive("line_width", self.line_width)?;

        if self.outer_radius * 2.0 >= self.width {
            return Err(InstrumentError::InvalidConfig(format!(
                "outer_radius {} leaves no face inside width {}",
                self.outer_radius, self.width
            )));
        }
        if !self.zoom.is_finite() {
            return Err(InstrumentError::InvalidConfig(format!(
                "zoom must be finite, got {}",
                self.zoom
            )));
        }
        Ok(())
    }
}

/// Clamp a zoom factor into the supported range, warning when it moves
pub fn clamp_zoom(zoom: f32) -> f32 {
    let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    if clamped != zoom {
        log::warn!(
            "Pitch zoom {} out of range, using {} ({}..={})",
            zoom,
            clamped,
            MIN_ZOOM,
            MAX_ZOOM
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(InstrumentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let config = InstrumentConfig {
            width: 0.0,
            ..InstrumentConfig::default()
        };
        assert!(config.validate().is_err());

        let config = InstrumentConfig {
            line_width: f32::NAN,
            ..InstrumentConfig::default()
        };
        assert!(config.validate().is_err());

        let config = InstrumentConfig {
            outer_radius: 180.0,
            ..InstrumentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InstrumentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(2.0), 2.0);
        assert_eq!(clamp_zoom(0.5), MIN_ZOOM);
        assert_eq!(clamp_zoom(10.0), MAX_ZOOM);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: InstrumentConfig = serde_json::from_str(r#"{"zoom": 2.5}"#).unwrap();
        assert_eq!(config.zoom, 2.5);
        assert_eq!(config.width, 360.0);
        assert_eq!(config.palette, Palette::default());
    }
}
