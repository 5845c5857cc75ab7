//! Attitude indicator display widget
//!
//! Paints an `AttitudeIndicator`'s scene into an egui `Ui`.
//!
//! ## How it works
//!
//! - The scene is scaled uniformly to fit the allocated square and centered
//! - Nodes are painted in scene order, so later nodes cover earlier ones
//! - Masked fills and strokes are clipped on the CPU (see `clip`)
//! - Radial gradients become meshes of concentric colored rings
//!
//! Gradient meshes assume the masked circle and its mask share a center,
//! which holds for every shaded element on the face.

use std::f32::consts::TAU;

use eframe::egui::{self, epaint::TextShape, Color32, FontId, Mesh, Pos2, Rect, Shape, Vec2};

use crate::instrument::AttitudeIndicator;
use crate::scene::{Color, Fill, Mask, MaskId, Node, Paint, Primitive, RadialGradient, Scene};

use super::clip::{self, Point};

/// Display settings for the widget
#[derive(Clone)]
pub struct WidgetSettings {
    /// Color behind the round face
    pub background: Color32,

    /// Segments used to approximate circles and masks
    pub circle_segments: usize,

    /// Concentric rings per gradient fill
    pub gradient_rings: usize,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(24, 24, 28),
            circle_segments: 96,
            gradient_rings: 32,
        }
    }
}

/// Maps scene coordinates onto the widget rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Screen pixels per scene unit
    pub scale: f32,
    /// Screen position of the scene origin
    pub origin: Pos2,
}

impl ViewTransform {
    /// Largest uniform scale that fits a `width` x `height` scene into `rect`
    pub fn fit(width: f32, height: f32, rect: Rect) -> Self {
        let scale = (rect.width() / width).min(rect.height() / height);
        let origin = rect.center() - Vec2::new(width, height) * scale / 2.0;
        Self { scale, origin }
    }

    pub fn to_screen(&self, (x, y): Point) -> Pos2 {
        Pos2::new(self.origin.x + x * self.scale, self.origin.y + y * self.scale)
    }
}

/// Artificial horizon widget
pub struct AttitudeWidget {
    pub settings: WidgetSettings,
}

impl Default for AttitudeWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl AttitudeWidget {
    pub fn new() -> Self {
        Self {
            settings: WidgetSettings::default(),
        }
    }

    pub fn with_settings(settings: WidgetSettings) -> Self {
        Self { settings }
    }

    /// Draw the indicator in its current pose
    ///
    /// # Arguments
    /// * `ui` - The egui UI context
    /// * `indicator` - The instrument to paint
    /// * `size` - Desired widget size (or None for the largest square that fits)
    ///
    /// # Returns
    /// The response from the widget
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        indicator: &AttitudeIndicator,
        size: Option<Vec2>,
    ) -> egui::Response {
        let size = size.unwrap_or_else(|| {
            let available = ui.available_size();
            let side = available.x.min(available.y);
            Vec2::new(side, side)
        });

        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;
        let painter = painter.with_clip_rect(rect);

        painter.rect_filled(rect, 4.0, self.settings.background);

        let scene = indicator.scene();
        let view = ViewTransform::fit(scene.width(), scene.height(), rect);
        let cells: Vec<(MaskId, Vec<Vec<Point>>)> = scene
            .masks()
            .map(|(id, mask)| (id, clip::mask_cells(mask, self.settings.circle_segments)))
            .collect();

        let frame = Frame {
            painter: &painter,
            view,
            scene,
            cells: &cells,
            settings: &self.settings,
        };
        for node in scene.nodes() {
            frame.draw_node(node);
        }

        response
    }
}

/// Everything needed to paint one frame
struct Frame<'a> {
    painter: &'a egui::Painter,
    view: ViewTransform,
    scene: &'a Scene,
    cells: &'a [(MaskId, Vec<Vec<Point>>)],
    settings: &'a WidgetSettings,
}

impl Frame<'_> {
    fn draw_node(&self, node: &Node) {
        let world = node.world();
        let mask = node.mask.and_then(|id| {
            let mask = self.scene.mask(id)?;
            let cells = self
                .cells
                .iter()
                .find(|(cell_id, _)| *cell_id == id)
                .map(|(_, cells)| cells.as_slice())?;
            Some((mask, cells))
        });
        let stroke_scale = self.view.scale * world.scale_factor();

        match &node.primitive {
            Primitive::Rect {
                x,
                y,
                width,
                height,
            } => {
                let corners = world.apply_all(&[
                    (*x, *y),
                    (x + width, *y),
                    (x + width, y + height),
                    (*x, y + height),
                ]);
                self.fill_polygon(&corners, &node.paint, mask);
                self.stroke_path(&corners, true, &node.paint, stroke_scale, mask);
            }
            Primitive::Line { x1, y1, x2, y2 } => {
                let ends = world.apply_all(&[(*x1, *y1), (*x2, *y2)]);
                self.stroke_path(&ends, false, &node.paint, stroke_scale, mask);
            }
            Primitive::Polyline { points } => {
                let points = world.apply_all(points);
                self.fill_polygon(&points, &node.paint, mask);
                self.stroke_path(&points, false, &node.paint, stroke_scale, mask);
            }
            Primitive::Circle { cx, cy, r } => {
                let center = world.apply(*cx, *cy);
                let radius = r * world.scale_factor();
                match node.paint.fill {
                    Fill::Gradient(id) => {
                        if let Some(gradient) = self.scene.gradient(id) {
                            let band = mask.map(|(m, _)| m.radial_range()).unwrap_or((0.0, radius));
                            self.fill_gradient_disc(center, radius, band, gradient, node.paint.opacity);
                        }
                    }
                    _ => {
                        let outline = clip::regular_polygon(
                            center.0,
                            center.1,
                            radius,
                            self.settings.circle_segments,
                        );
                        self.fill_polygon(&outline, &node.paint, mask);
                    }
                }
                if node.paint.stroke.is_some() {
                    let outline = clip::regular_polygon(
                        center.0,
                        center.1,
                        radius,
                        self.settings.circle_segments,
                    );
                    self.stroke_path(&outline, true, &node.paint, stroke_scale, mask);
                }
            }
            Primitive::Path { outline } => {
                for (points, closed) in outline.subpaths() {
                    let points = world.apply_all(points);
                    self.stroke_path(&points, *closed, &node.paint, stroke_scale, mask);
                }
            }
            Primitive::Text { x, y, text, size } => {
                let center = self.view.to_screen(world.apply(*x, *y));
                let Some(color) = solid_color(&node.paint) else {
                    return;
                };
                let font = FontId::proportional(size * stroke_scale);
                let galley = self.painter.layout_no_wrap(text.clone(), font, color);

                // Text shapes rotate about their top-left corner
                let angle = world.rotation_degrees().to_radians();
                let (sin, cos) = angle.sin_cos();
                let half = galley.size() / 2.0;
                let offset = Vec2::new(half.x * cos - half.y * sin, half.x * sin + half.y * cos);
                self.painter
                    .add(TextShape::new(center - offset, galley, color).with_angle(angle));
            }
        }
    }

    /// Fill a convex polygon given in scene coordinates
    fn fill_polygon(&self, points: &[Point], paint: &Paint, mask: Option<(&Mask, &[Vec<Point>])>) {
        let Some(color) = solid_color(paint) else {
            return;
        };

        match mask {
            Some((_, cells)) => {
                for cell in cells {
                    let clipped = clip::clip_polygon(points, cell);
                    if !clipped.is_empty() {
                        self.painter.add(Shape::convex_polygon(
                            self.to_screen_all(&clipped),
                            color,
                            egui::Stroke::NONE,
                        ));
                    }
                }
            }
            None => {
                self.painter.add(Shape::convex_polygon(
                    self.to_screen_all(points),
                    color,
                    egui::Stroke::NONE,
                ));
            }
        }
    }

    /// Stroke an open or closed path given in scene coordinates
    fn stroke_path(
        &self,
        points: &[Point],
        closed: bool,
        paint: &Paint,
        scale: f32,
        mask: Option<(&Mask, &[Vec<Point>])>,
    ) {
        let Some(stroke) = paint.stroke else {
            return;
        };
        if stroke.width <= 0.0 || points.len() < 2 {
            return;
        }
        let stroke = egui::Stroke::new(stroke.width * scale, color32(stroke.color, paint.opacity));

        match mask {
            Some((mask, _)) => {
                let count = if closed { points.len() } else { points.len() - 1 };
                for i in 0..count {
                    let a = points[i];
                    let b = points[(i + 1) % points.len()];
                    for (p, q) in clip::clip_segment(a, b, mask) {
                        self.painter
                            .line_segment([self.view.to_screen(p), self.view.to_screen(q)], stroke);
                    }
                }
            }
            None if closed => {
                self.painter
                    .add(Shape::closed_line(self.to_screen_all(points), stroke));
            }
            None => {
                self.painter.add(Shape::line(self.to_screen_all(points), stroke));
            }
        }
    }

    /// Fill the part of a gradient disc between the `band` radii
    fn fill_gradient_disc(
        &self,
        center: Point,
        radius: f32,
        band: (f32, f32),
        gradient: &RadialGradient,
        opacity: f32,
    ) {
        let (inner, outer) = (band.0.max(0.0), band.1.min(radius));
        if outer <= inner || radius <= 0.0 {
            return;
        }

        let rings = self.settings.gradient_rings.max(1);
        let segments = self.settings.circle_segments.max(3);
        let mut mesh = Mesh::default();

        for ring in 0..rings {
            let r0 = inner + (outer - inner) * ring as f32 / rings as f32;
            let r1 = inner + (outer - inner) * (ring + 1) as f32 / rings as f32;
            let (color0, alpha0) = gradient.sample(r0 / radius);
            let (color1, alpha1) = gradient.sample(r1 / radius);
            let c0 = color32(color0, alpha0 * opacity);
            let c1 = color32(color1, alpha1 * opacity);

            for seg in 0..segments {
                let a0 = seg as f32 / segments as f32 * TAU;
                let a1 = (seg + 1) as f32 / segments as f32 * TAU;
                let at = |r: f32, a: f32| {
                    self.view
                        .to_screen((center.0 + r * a.cos(), center.1 + r * a.sin()))
                };

                let base = mesh.vertices.len() as u32;
                mesh.colored_vertex(at(r0, a0), c0);
                mesh.colored_vertex(at(r0, a1), c0);
                mesh.colored_vertex(at(r1, a1), c1);
                mesh.colored_vertex(at(r1, a0), c1);
                mesh.add_triangle(base, base + 1, base + 2);
                mesh.add_triangle(base, base + 2, base + 3);
            }
        }

        self.painter.add(Shape::mesh(mesh));
    }

    fn to_screen_all(&self, points: &[Point]) -> Vec<Pos2> {
        points.iter().map(|&p| self.view.to_screen(p)).collect()
    }
}

/// Solid fill color with the node opacity applied
fn solid_color(paint: &Paint) -> Option<Color32> {
    match paint.fill {
        Fill::Solid { color, opacity } => Some(color32(color, opacity * paint.opacity)),
        _ => None,
    }
}

fn color32(color: Color, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r,
        color.g,
        color.b,
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_square_into_wide_rect() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(800.0, 400.0));
        let view = ViewTransform::fit(360.0, 360.0, rect);
        assert!((view.scale - 400.0 / 360.0).abs() < 0.0001);

        // Scene center maps to the rect center
        let center = view.to_screen((180.0, 180.0));
        assert!((center.x - 410.0).abs() < 0.001);
        assert!((center.y - 220.0).abs() < 0.001);

        let top_left = view.to_screen((0.0, 0.0));
        assert!((top_left.y - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_color_conversion() {
        let opaque = color32(Color::rgb(0x65, 0x43, 0x21), 1.0);
        assert_eq!(opaque, Color32::from_rgb(0x65, 0x43, 0x21));

        let clear = color32(Color::WHITE, 0.0);
        assert_eq!(clear.a(), 0);
    }

    #[test]
    fn test_solid_color_applies_node_opacity() {
        let paint = Paint::filled(Color::WHITE).with_opacity(0.5);
        let color = solid_color(&paint).unwrap();
        assert_eq!(color.a(), 128);

        let outline = Paint::stroked(Color::WHITE, 2.0);
        assert!(solid_color(&outline).is_none());
    }
}
