//! Derived layout constants for the instrument face

use super::config::InstrumentConfig;

/// Layout derived from an `InstrumentConfig`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstrumentGeometry {
    pub width: f32,
    pub height: f32,
    /// Face center X
    pub cx: f32,
    /// Face center Y
    pub cy: f32,
    /// Depth of the bezel ring
    pub outer_radius: f32,
    pub line_width: f32,
    /// Width of the ground/sky rectangles
    ///
    /// `width * √2` so that a rectangle rotated to any angle still covers
    /// the whole circular face.
    pub element_width: f32,
    /// X position that keeps the oversized rectangles centered
    pub x_offset: f32,
}

impl InstrumentGeometry {
    pub fn new(config: &InstrumentConfig) -> Self {
        let width = config.width;
        let element_width = width * std::f32::consts::SQRT_2;
        Self {
            width,
            height: config.height,
            cx: width / 2.0,
            cy: config.height / 2.0,
            outer_radius: config.outer_radius,
            line_width: config.line_width,
            element_width,
            x_offset: -(element_width - width) / 2.0,
        }
    }

    /// Radius of the whole face
    pub fn face_radius(&self) -> f32 {
        self.width / 2.0
    }

    /// Radius of the face inside the bezel ring
    pub fn inner_radius(&self) -> f32 {
        self.width / 2.0 - self.outer_radius
    }

    /// Pitch-scale-factor at zoom 1: `(width - 2·outer_radius) / width`
    pub fn base_pitch_scale(&self) -> f32 {
        (self.width - 2.0 * self.outer_radius) / self.width
    }

    /// Pitch-scale-factor at the given zoom
    pub fn pitch_scale(&self, zoom: f32) -> f32 {
        self.base_pitch_scale() * zoom
    }
}
