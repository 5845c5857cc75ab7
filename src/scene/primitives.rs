//! Primitive shapes - Rect, Line, Polyline, Circle, Path, Text
//!
//! These are the building blocks of the instrument face. Coordinates are
//! in scene units (the instrument's own pixel grid, before any transform).

use serde::{Deserialize, Serialize};

use super::gradient::GradientId;
use super::path::PathOutline;

/// An opaque RGB color
///
/// Stored as a u8 triple so it serializes cleanly into settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Stroke style for outlines and lines
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// How the interior of a shape is filled
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Fill {
    /// No interior
    #[default]
    None,
    /// A solid color with its own opacity
    Solid { color: Color, opacity: f32 },
    /// A radial gradient defined in the scene
    Gradient(GradientId),
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Fill::Solid { color, opacity: 1.0 }
    }
}

/// Fill, stroke and overall opacity of a node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub fill: Fill,
    pub stroke: Option<Stroke>,
    /// Opacity of the whole node (0.0 to 1.0)
    pub opacity: f32,
}

impl Paint {
    /// Filled shape without an outline
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Fill::solid(color),
            stroke: None,
            opacity: 1.0,
        }
    }

    /// Outline only
    pub fn stroked(color: Color, width: f32) -> Self {
        Self {
            fill: Fill::None,
            stroke: Some(Stroke::new(color, width)),
            opacity: 1.0,
        }
    }

    /// Gradient-filled shape
    pub fn gradient(gradient: GradientId) -> Self {
        Self {
            fill: Fill::Gradient(gradient),
            stroke: None,
            opacity: 1.0,
        }
    }

    /// Add an outline
    pub fn with_stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(Stroke::new(color, width));
        self
    }

    /// Set the node opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: Fill::None,
            stroke: None,
            opacity: 1.0,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Smallest box containing all points (None for an empty slice)
    pub fn from_points(points: &[(f32, f32)]) -> Option<Self> {
        let (&(x0, y0), rest) = points.split_first()?;
        let mut bounds = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for &(x, y) in rest {
            bounds.min_x = bounds.min_x.min(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_x = bounds.max_x.max(x);
            bounds.max_y = bounds.max_y.max(y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// A drawable primitive in untransformed scene coordinates
#[derive(Clone, Debug)]
pub enum Primitive {
    /// Rectangle with its top-left corner at (x, y)
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Line segment from (x1, y1) to (x2, y2)
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Open sequence of points (filled as a closed polygon when painted)
    Polyline { points: Vec<(f32, f32)> },
    /// Circle centered at (cx, cy)
    Circle { cx: f32, cy: f32, r: f32 },
    /// SVG path data with its flattened outline
    Path { outline: PathOutline },
    /// Text label centered on (x, y)
    Text { x: f32, y: f32, text: String, size: f32 },
}

impl Primitive {
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Primitive::Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Primitive::Line { x1, y1, x2, y2 }
    }

    pub fn polyline(points: Vec<(f32, f32)>) -> Self {
        Primitive::Polyline { points }
    }

    /// Circle from its diameter, matching how the face is laid out
    pub fn circle(cx: f32, cy: f32, diameter: f32) -> Self {
        Primitive::Circle {
            cx,
            cy,
            r: diameter / 2.0,
        }
    }

    pub fn text(x: f32, y: f32, text: impl Into<String>, size: f32) -> Self {
        Primitive::Text {
            x,
            y,
            text: text.into(),
            size,
        }
    }

    /// Short element name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Rect { .. } => "rect",
            Primitive::Line { .. } => "line",
            Primitive::Polyline { .. } => "polyline",
            Primitive::Circle { .. } => "circle",
            Primitive::Path { .. } => "path",
            Primitive::Text { .. } => "text",
        }
    }

    /// Bounding box in untransformed coordinates
    ///
    /// Text has no measured extent here, so its box collapses to the anchor.
    pub fn bounds(&self) -> Bounds {
        match self {
            Primitive::Rect {
                x,
                y,
                width,
                height,
            } => Bounds {
                min_x: *x,
                min_y: *y,
                max_x: x + width,
                max_y: y + height,
            },
            Primitive::Line { x1, y1, x2, y2 } => Bounds {
                min_x: x1.min(*x2),
                min_y: y1.min(*y2),
                max_x: x1.max(*x2),
                max_y: y1.max(*y2),
            },
            Primitive::Polyline { points } => {
                Bounds::from_points(points).unwrap_or(Bounds {
                    min_x: 0.0,
                    min_y: 0.0,
                    max_x: 0.0,
                    max_y: 0.0,
                })
            }
            Primitive::Circle { cx, cy, r } => Bounds {
                min_x: cx - r,
                min_y: cy - r,
                max_x: cx + r,
                max_y: cy + r,
            },
            Primitive::Path { outline } => outline.bounds(),
            Primitive::Text { x, y, .. } => Bounds {
                min_x: *x,
                min_y: *y,
                max_x: *x,
                max_y: *y,
            },
        }
    }

    /// Center of the bounding box
    pub fn center(&self) -> (f32, f32) {
        self.bounds().center()
    }

    /// Move the primitive by (dx, dy)
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Primitive::Rect { x, y, .. } | Primitive::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Primitive::Line { x1, y1, x2, y2 } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
            Primitive::Polyline { points } => {
                for (x, y) in points.iter_mut() {
                    *x += dx;
                    *y += dy;
                }
            }
            Primitive::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
            Primitive::Path { outline } => outline.translate(dx, dy),
        }
    }

    /// Move the primitive so its center lands at (x, y)
    pub fn set_center(&mut self, x: f32, y: f32) {
        let (cx, cy) = self.center();
        self.translate(x - cx, y - cy);
    }

    /// Move the primitive vertically so its center lands on `y`
    pub fn set_center_y(&mut self, y: f32) {
        let (_, cy) = self.center();
        self.translate(0.0, y - cy);
    }

    /// Move the primitive vertically so its top edge lands on `y`
    pub fn set_y(&mut self, y: f32) {
        let top = self.bounds().min_y;
        self.translate(0.0, y - top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        let brown = Color::from_hex("#654321").unwrap();
        assert_eq!(brown, Color::rgb(0x65, 0x43, 0x21));
        assert_eq!(brown.to_hex(), "#654321");
        assert_eq!(Color::from_hex("87ceeb"), Some(Color::rgb(0x87, 0xce, 0xeb)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
    }

    #[test]
    fn test_rect_set_y_keeps_height() {
        let mut rect = Primitive::rect(-74.5, 0.0, 509.0, 360.0);
        rect.set_y(230.0);
        let b = rect.bounds();
        assert!((b.min_y - 230.0).abs() < 0.001);
        assert!((b.height() - 360.0).abs() < 0.001);
        assert!((b.min_x - (-74.5)).abs() < 0.001);
    }

    #[test]
    fn test_line_set_center_y() {
        let mut line = Primitive::line(150.0, 180.0, 210.0, 180.0);
        line.set_center_y(280.0);
        let (cx, cy) = line.center();
        assert!((cx - 180.0).abs() < 0.001);
        assert!((cy - 280.0).abs() < 0.001);

        // Absolute: setting the same center twice is a no-op
        line.set_center_y(280.0);
        assert!((line.center().1 - 280.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_from_diameter() {
        let circle = Primitive::circle(180.0, 15.0, 6.25);
        match circle {
            Primitive::Circle { r, .. } => assert!((r - 3.125).abs() < 0.001),
            _ => panic!("expected a circle"),
        }
    }

    #[test]
    fn test_polyline_set_center() {
        let mut poly = Primitive::polyline(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 4.0)]);
        poly.set_center(100.0, 100.0);
        let b = poly.bounds();
        assert!((b.min_x - 95.0).abs() < 0.001);
        assert!((b.min_y - 98.0).abs() < 0.001);
    }

    #[test]
    fn test_paint_builders() {
        let paint = Paint::filled(Color::WHITE)
            .with_stroke(Color::BLACK, 2.5)
            .with_opacity(1.5);
        assert_eq!(paint.fill, Fill::solid(Color::WHITE));
        assert_eq!(paint.stroke, Some(Stroke::new(Color::BLACK, 2.5)));
        assert_eq!(paint.opacity, 1.0);
    }
}
