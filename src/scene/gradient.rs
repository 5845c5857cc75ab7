//! Radial gradients used for the face shading and the bezel highlight

use super::primitives::Color;

/// Handle to a gradient stored in a `Scene`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GradientId(pub(crate) usize);

/// One color stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position from center (0.0) to edge (1.0)
    pub offset: f32,
    pub color: Color,
    pub opacity: f32,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color, opacity: f32) -> Self {
        Self {
            offset,
            color,
            opacity,
        }
    }
}

/// A radial gradient spanning the filled shape's bounding box
///
/// Like SVG's default `objectBoundingBox` units: offset 0 is the center of
/// the shape and offset 1 its edge. Outside the stops the nearest stop is
/// padded.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Create a gradient; stops are sorted by offset
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { stops }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color and opacity at offset `t`
    pub fn sample(&self, t: f32) -> (Color, f32) {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return (Color::BLACK, 0.0),
        };

        if t <= first.offset {
            return (first.color, first.opacity);
        }
        if t >= last.offset {
            return (last.color, last.opacity);
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if t >= a.offset && t <= b.offset {
                let span = b.offset - a.offset;
                let local_t = if span > 0.0 { (t - a.offset) / span } else { 0.0 };
                return (lerp_color(a.color, b.color, local_t), lerp(a.opacity, b.opacity, local_t));
            }
        }

        (last.color, last.opacity)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let channel = |x: u8, y: u8| lerp(x as f32, y as f32, t).round().clamp(0.0, 255.0) as u8;
    Color::rgb(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shadow() -> RadialGradient {
        RadialGradient::new(vec![
            GradientStop::new(0.0, Color::BLACK, 0.0),
            GradientStop::new(0.5, Color::BLACK, 0.1),
            GradientStop::new(0.75, Color::BLACK, 0.3),
            GradientStop::new(1.0, Color::BLACK, 1.0),
        ])
    }

    #[test]
    fn test_sample_at_stops() {
        let g = shadow();
        assert!((g.sample(0.0).1 - 0.0).abs() < 0.001);
        assert!((g.sample(0.5).1 - 0.1).abs() < 0.001);
        assert!((g.sample(1.0).1 - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_sample_interpolates() {
        let g = shadow();
        assert!((g.sample(0.625).1 - 0.2).abs() < 0.001);
    }

    #[test]
    fn test_sample_pads_outside_stops() {
        let g = RadialGradient::new(vec![
            GradientStop::new(0.9, Color::WHITE, 0.3),
            GradientStop::new(0.8, Color::WHITE, 1.0),
        ]);
        // Sorted on construction
        assert_eq!(g.stops()[0].offset, 0.8);
        assert!((g.sample(0.1).1 - 1.0).abs() < 0.001);
        assert!((g.sample(0.95).1 - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_color_interpolation() {
        let g = RadialGradient::new(vec![
            GradientStop::new(0.0, Color::BLACK, 1.0),
            GradientStop::new(1.0, Color::WHITE, 1.0),
        ]);
        let (c, _) = g.sample(0.5);
        assert_eq!(c, Color::rgb(128, 128, 128));
    }
}
