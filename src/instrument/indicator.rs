//! Attitude indicator - builds the instrument face and re-poses it
//!
//! ## How it works
//!
//! The face is built once: ground/sky rectangles, the pitch ladder, the
//! roll scale, shading overlays and the fixed aircraft symbol. Every
//! update then sets absolute poses on those nodes:
//!
//! - the four ground/sky rectangles rotate by `roll` about the face center
//! - the inner ground/sky pair slides vertically with the scaled pitch
//! - roll ticks rotate to `nominal + roll`
//! - ladder marks are placed at `cy + offset · scale`, then rotated by `roll`
//!
//! Nothing accumulates between updates, so applying the same sample twice
//! gives the same scene as applying it once.
//!
//! ## Sign conventions
//!
//! The horizon and the ladder deliberately use different conventions. The
//! inner ground rectangle's top edge sits at `cy + pitch · scale`, so a
//! positive pitch pushes the ground down. Ladder marks do not follow the
//! pitch at all: the mark for offset `o` stays at `cy + o · scale`, and the
//! horizon line slides across the ladder until it meets the mark matching
//! the current pitch.

use std::path::Path as FilePath;

use crate::export::{self, ExportError};
use crate::scene::{
    Affine, Color, GradientStop, Mask, MaskId, Node, NodeId, Paint, PathOutline, Primitive,
    RadialGradient, Scene,
};
use crate::telemetry::AttitudeSample;

use super::config::{clamp_zoom, InstrumentConfig, InstrumentError};
use super::geometry::InstrumentGeometry;
use super::marks::{PitchMark, RollMark, RollTickStyle, PITCH_LADDER, ROLL_SCALE};

/// Curved guide under the aircraft symbol, in its own drawing units
pub const ORIENTATION_GUIDE: &str = "M 31.427734,270.96094 H 265.25781 c -4.4e-4,65.73748 53.28987,119.02865 119.02735,119.02929 65.73824,4.4e-4 119.02973,-53.29105 119.02929,-119.02929 h 233.82813";

/// Scale applied to the orientation guide about its own center
const GUIDE_SCALE: f32 = 0.3;
/// How far below the face center the guide is centered
const GUIDE_DROP: f32 = 18.0;
/// How far below the face center the stand narrows to a point
const STAND_TOP: f32 = 40.0;
/// Pitch ladder label size
const LABEL_SIZE: f32 = 16.0;

/// The four rectangles forming the horizon plane
#[derive(Clone, Copy, Debug)]
pub struct Horizon {
    /// Clipped to the face, slides with pitch
    pub ground_inner: NodeId,
    pub sky_inner: NodeId,
    /// Clipped to the bezel ring, rotation only
    pub ground_outer: NodeId,
    pub sky_outer: NodeId,
}

impl Horizon {
    pub fn all(&self) -> [NodeId; 4] {
        [
            self.ground_inner,
            self.sky_inner,
            self.ground_outer,
            self.sky_outer,
        ]
    }
}

/// Fixed aircraft symbol nodes (never moved by updates)
#[derive(Clone, Copy, Debug)]
pub struct AircraftSymbol {
    pub stand: NodeId,
    pub stem: NodeId,
    pub dot: NodeId,
    pub guide: NodeId,
}

impl AircraftSymbol {
    pub fn all(&self) -> [NodeId; 4] {
        [self.stand, self.stem, self.dot, self.guide]
    }
}

/// Artificial horizon instrument
///
/// Owns its scene exclusively; the only way to change the pose is
/// `update_attitude` (or `update_markers` for the marks alone).
pub struct AttitudeIndicator {
    config: InstrumentConfig,
    geometry: InstrumentGeometry,
    scene: Scene,
    /// Pitch ladder zoom (1.0 to 3.0)
    zoom: f32,
    /// Multiplier for every vertical pitch placement
    pitch_scale_factor: f32,
    /// Last applied sample
    attitude: AttitudeSample,
    horizon: Horizon,
    pitch_marks: Vec<PitchMark>,
    roll_marks: Vec<RollMark>,
    symbol: AircraftSymbol,
    face_mask: MaskId,
    bezel_mask: MaskId,
}

impl AttitudeIndicator {
    /// Build the instrument face and pose it wings-level
    pub fn new(config: InstrumentConfig) -> Result<Self, InstrumentError> {
        config.validate()?;

        let zoom = clamp_zoom(config.zoom);
        let g = InstrumentGeometry::new(&config);
        let palette = config.palette;
        let lw = g.line_width;
        let mut scene = Scene::new(g.width, g.height);

        let face_mask = scene.add_mask(Mask::disc(g.cx, g.cy, g.face_radius()));
        let bezel_mask =
            scene.add_mask(Mask::annulus(g.cx, g.cy, g.face_radius(), g.inner_radius()));

        // Inner horizon, clipped to the whole face
        let half = g.height / 2.0;
        let ground_inner = scene.add_node(
            Node::new(
                "ground-inner",
                Primitive::rect(g.x_offset, half, g.element_width, g.height),
                Paint::filled(palette.ground).with_stroke(palette.markings, lw / 2.0),
            )
            .with_mask(face_mask),
        );
        let sky_inner = scene.add_node(
            Node::new(
                "sky-inner",
                Primitive::rect(g.x_offset, -half, g.element_width, g.height),
                Paint::filled(palette.sky).with_stroke(palette.markings, lw / 2.0),
            )
            .with_mask(face_mask),
        );

        let pitch_marks = build_pitch_ladder(&mut scene, &g, palette.markings);

        // Outer horizon, only visible in the bezel ring
        let ground_outer = scene.add_node(
            Node::new(
                "ground-outer",
                Primitive::rect(g.x_offset, half, g.element_width, g.height),
                Paint::filled(palette.ground).with_stroke(palette.markings, lw),
            )
            .with_mask(bezel_mask),
        );
        let sky_outer = scene.add_node(
            Node::new(
                "sky-outer",
                Primitive::rect(g.x_offset, -half, g.element_width, g.height),
                Paint::filled(palette.sky).with_stroke(palette.markings, lw),
            )
            .with_mask(bezel_mask),
        );

        let roll_marks = build_roll_scale(&mut scene, &g, palette.markings);

        build_shading(&mut scene, &g, face_mask, bezel_mask);

        let symbol = build_symbol(&mut scene, &g, palette.symbol)?;

        log::info!(
            "Attitude indicator built: {}x{} face, {} nodes, {} pitch marks, {} roll marks",
            g.width,
            g.height,
            scene.len(),
            pitch_marks.len(),
            roll_marks.len()
        );

        let mut indicator = Self {
            config,
            geometry: g,
            scene,
            zoom,
            pitch_scale_factor: g.pitch_scale(zoom),
            attitude: AttitudeSample::level(),
            horizon: Horizon {
                ground_inner,
                sky_inner,
                ground_outer,
                sky_outer,
            },
            pitch_marks,
            roll_marks,
            symbol,
            face_mask,
            bezel_mask,
        };
        indicator.update_attitude(AttitudeSample::level());
        Ok(indicator)
    }

    /// Re-pose the horizon and marks for a new attitude
    ///
    /// Samples with non-finite angles are ignored.
    pub fn update_attitude(&mut self, sample: AttitudeSample) {
        if !sample.is_finite() {
            log::warn!("Ignoring non-finite attitude sample {:?}", sample);
            return;
        }

        // Scale first: every vertical placement below depends on it
        self.pitch_scale_factor = self.geometry.pitch_scale(self.zoom);
        let pitch = sample.pitch * self.pitch_scale_factor;
        let roll = sample.roll;
        let (cx, cy) = (self.geometry.cx, self.geometry.cy);
        let half = self.geometry.height / 2.0;

        for id in self.horizon.all() {
            self.scene.node_mut(id).rotate(roll, cx, cy);
        }
        self.scene
            .node_mut(self.horizon.ground_inner)
            .primitive
            .set_y(pitch + half);
        self.scene
            .node_mut(self.horizon.sky_inner)
            .primitive
            .set_y(pitch - half);

        self.update_markers(roll);
        self.attitude = sample;

        log::trace!(
            "attitude: roll {:.2}, pitch {:.2} (scaled {:.2})",
            roll,
            sample.pitch,
            pitch
        );
    }

    /// Re-pose the roll scale and pitch ladder for `roll`
    ///
    /// Ladder marks are positioned in unrotated face coordinates first and
    /// rotated afterwards; the other order would move them along the
    /// rotated axis.
    pub fn update_markers(&mut self, roll: f32) {
        let (cx, cy) = (self.geometry.cx, self.geometry.cy);

        for mark in &self.roll_marks {
            self.scene.node_mut(mark.node).rotate(mark.angle + roll, cx, cy);
        }

        for mark in &self.pitch_marks {
            self.scene
                .node_mut(mark.node)
                .primitive
                .set_center_y(cy + mark.offset * self.pitch_scale_factor);
        }

        for mark in &self.pitch_marks {
            self.scene.node_mut(mark.node).rotate(roll, cx, cy);
        }
    }

    /// Change the ladder zoom; takes effect on the next update
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
        self.config.zoom = self.zoom;
    }

    /// Rebuild the face for a new configuration, keeping the current attitude
    pub fn reconfigure(&mut self, config: InstrumentConfig) -> Result<(), InstrumentError> {
        let attitude = self.attitude;
        let mut rebuilt = Self::new(config)?;
        rebuilt.update_attitude(attitude);
        *self = rebuilt;
        Ok(())
    }

    pub fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    pub fn geometry(&self) -> &InstrumentGeometry {
        &self.geometry
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pitch_scale_factor(&self) -> f32 {
        self.pitch_scale_factor
    }

    /// Last applied attitude
    pub fn attitude(&self) -> AttitudeSample {
        self.attitude
    }

    pub fn horizon(&self) -> &Horizon {
        &self.horizon
    }

    pub fn symbol(&self) -> &AircraftSymbol {
        &self.symbol
    }

    pub fn pitch_marks(&self) -> &[PitchMark] {
        &self.pitch_marks
    }

    pub fn roll_marks(&self) -> &[RollMark] {
        &self.roll_marks
    }

    /// Mask clipping the inner horizon and the shadow to the face
    pub fn face_mask(&self) -> MaskId {
        self.face_mask
    }

    /// Mask clipping the outer horizon and the highlight to the bezel ring
    pub fn bezel_mask(&self) -> MaskId {
        self.bezel_mask
    }

    /// Vertical displacement of a ladder mark from the face center,
    /// measured before its rotation
    pub fn pitch_mark_displacement(&self, mark: &PitchMark) -> f32 {
        self.scene.node(mark.node).primitive.center().1 - self.geometry.cy
    }

    /// Render the current pose as an SVG document
    pub fn export_svg(&self) -> String {
        export::to_svg_string(&self.scene)
    }

    /// Write the current pose to an SVG file
    pub fn write_svg(&self, path: impl AsRef<FilePath>) -> Result<(), ExportError> {
        export::write_svg(path, &self.scene)
    }
}

/// Rungs and labels of the pitch ladder, placed on the center line
fn build_pitch_ladder(scene: &mut Scene, g: &InstrumentGeometry, color: Color) -> Vec<PitchMark> {
    let mut marks = Vec::with_capacity(PITCH_LADDER.len() * 3);

    for rung in PITCH_LADDER.iter() {
        let node = scene.add_node(Node::new(
            format!("pitch-rung-{}", rung.offset),
            Primitive::line(g.cx - rung.half_width, g.cy, g.cx + rung.half_width, g.cy),
            Paint::stroked(color, rung.weight.stroke_width(g.line_width)),
        ));
        marks.push(PitchMark {
            node,
            offset: rung.offset,
        });

        if let (Some(dx), Some(text)) = (rung.label_dx, rung.label()) {
            for (side, x) in [("left", g.cx - dx), ("right", g.cx + dx)] {
                let node = scene.add_node(Node::new(
                    format!("pitch-label-{}-{}", rung.offset, side),
                    Primitive::text(x, g.cy, text.clone(), LABEL_SIZE),
                    Paint::filled(color),
                ));
                marks.push(PitchMark {
                    node,
                    offset: rung.offset,
                });
            }
        }
    }

    marks
}

/// Roll ticks drawn at the top of the face, rotated into place on update
fn build_roll_scale(scene: &mut Scene, g: &InstrumentGeometry, color: Color) -> Vec<RollMark> {
    let (cx, r, lw) = (g.cx, g.outer_radius, g.line_width);

    ROLL_SCALE
        .iter()
        .map(|tick| {
            let (primitive, paint) = match tick.style {
                RollTickStyle::Major => (
                    Primitive::line(cx, r / 10.0, cx, r),
                    Paint::stroked(color, lw),
                ),
                RollTickStyle::Minor => (
                    Primitive::line(cx, r / 2.0, cx, r),
                    Paint::stroked(color, lw / 2.0),
                ),
                RollTickStyle::Dot => (
                    Primitive::circle(cx, r / 2.0, lw * 1.25),
                    Paint::filled(color),
                ),
                RollTickStyle::Pointer => (
                    Primitive::polyline(vec![
                        (cx - r / 2.5, r / 10.0),
                        (cx, r),
                        (cx + r / 2.5, r / 10.0),
                        (cx - r / 2.0, r / 10.0),
                    ]),
                    Paint::filled(color),
                ),
            };
            let node = scene.add_node(Node::new(
                format!("roll-tick-{}", tick.angle),
                primitive,
                paint,
            ));
            RollMark {
                node,
                angle: tick.angle,
            }
        })
        .collect()
}

/// Shadow over the inner face and highlight over the bezel ring
fn build_shading(scene: &mut Scene, g: &InstrumentGeometry, face_mask: MaskId, bezel_mask: MaskId) {
    let shadow = scene.add_gradient(RadialGradient::new(vec![
        GradientStop::new(0.0, Color::BLACK, 0.0),
        GradientStop::new(0.5, Color::BLACK, 0.1),
        GradientStop::new(0.75, Color::BLACK, 0.3),
        GradientStop::new(1.0, Color::BLACK, 1.0),
    ]));

    // Bezel edge as a fraction of the face radius
    let edge = 1.0 - 2.0 * g.outer_radius / g.width;
    let light = scene.add_gradient(RadialGradient::new(vec![
        GradientStop::new(edge, Color::WHITE, 1.0),
        GradientStop::new(edge * 1.07, Color::WHITE, 0.3),
        GradientStop::new(1.0, Color::WHITE, 0.0),
    ]));

    scene.add_node(
        Node::new(
            "shadow",
            Primitive::circle(g.cx, g.cy, g.width - 2.0 * g.outer_radius),
            Paint::gradient(shadow).with_opacity(0.4),
        )
        .with_mask(face_mask),
    );
    scene.add_node(
        Node::new(
            "highlight",
            Primitive::circle(g.cx, g.cy, g.width),
            Paint::gradient(light).with_opacity(0.5),
        )
        .with_mask(bezel_mask),
    );
}

/// Stand, stem, center dot and orientation guide
fn build_symbol(
    scene: &mut Scene,
    g: &InstrumentGeometry,
    color: Color,
) -> Result<AircraftSymbol, InstrumentError> {
    let (cx, cy, h, lw) = (g.cx, g.cy, g.height, g.line_width);

    let stand = scene.add_node(Node::new(
        "symbol-stand",
        Primitive::polyline(vec![
            (cx - 10.0, h),
            (cx - 1.0, cy + STAND_TOP),
            (cx + 1.0, cy + STAND_TOP),
            (cx + 10.0, h),
        ]),
        Paint::filled(color).with_stroke(color, lw),
    ));
    let stem = scene.add_node(Node::new(
        "symbol-stem",
        Primitive::line(cx, cy, cx, h),
        Paint::stroked(color, lw / 1.5),
    ));
    let dot = scene.add_node(Node::new(
        "symbol-dot",
        Primitive::circle(cx, cy, lw * 2.0),
        Paint::filled(color),
    ));

    let mut guide = Primitive::Path {
        outline: PathOutline::parse(ORIENTATION_GUIDE)?,
    };
    guide.set_center(cx, cy + GUIDE_DROP);
    let guide = scene.add_node(
        Node::new("symbol-guide", guide, Paint::stroked(color, lw * 3.33))
            .with_local(Affine::scale_about(GUIDE_SCALE, cx, cy + GUIDE_DROP)),
    );

    Ok(AircraftSymbol {
        stand,
        stem,
        dot,
        guide,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator() -> AttitudeIndicator {
        AttitudeIndicator::new(InstrumentConfig::default()).unwrap()
    }

    fn with_zoom(zoom: f32) -> AttitudeIndicator {
        AttitudeIndicator::new(InstrumentConfig {
            zoom,
            ..InstrumentConfig::default()
        })
        .unwrap()
    }

    fn angles_match(a: f32, b: f32) -> bool {
        let diff = (a - b).rem_euclid(360.0);
        diff < 0.001 || diff > 359.999
    }

    #[test]
    fn test_builds_every_mark() {
        let ind = indicator();
        // 14 rungs plus a label pair on 6 of them
        assert_eq!(ind.pitch_marks().len(), 14 + 12);
        assert_eq!(ind.roll_marks().len(), 11);
    }

    #[test]
    fn test_level_pose() {
        let ind = indicator();
        let scale = ind.geometry().base_pitch_scale();

        for mark in ind.pitch_marks() {
            let node = ind.scene().node(mark.node);
            assert!((ind.pitch_mark_displacement(mark) - mark.offset * scale).abs() < 0.001);
            assert_eq!(node.rotation.angle, 0.0);
        }
        for mark in ind.roll_marks() {
            let node = ind.scene().node(mark.node);
            assert!(angles_match(node.rotation.angle, mark.angle));
        }
        for id in ind.horizon().all() {
            assert_eq!(ind.scene().node(id).rotation.angle, 0.0);
        }
    }

    #[test]
    fn test_roll_moves_marks_rigidly() {
        let mut ind = indicator();
        for roll in [-170.0, -45.0, 12.5, 90.0, 180.0] {
            ind.update_attitude(AttitudeSample::new(roll, 0.0));
            for mark in ind.roll_marks() {
                let node = ind.scene().node(mark.node);
                assert!(angles_match(node.rotation.angle, mark.angle + roll));
                assert_eq!((node.rotation.cx, node.rotation.cy), (180.0, 180.0));
            }
            for mark in ind.pitch_marks() {
                assert!(angles_match(ind.scene().node(mark.node).rotation.angle, roll));
            }
        }
    }

    #[test]
    fn test_zoom_scales_ladder() {
        for zoom in [1.0, 2.0, 3.0] {
            let mut ind = with_zoom(zoom);
            ind.update_attitude(AttitudeSample::new(15.0, 5.0));
            let expected_scale = (360.0 - 2.0 * 30.0) / 360.0 * zoom;
            assert!((ind.pitch_scale_factor() - expected_scale).abs() < 0.0001);
            for mark in ind.pitch_marks() {
                let displacement = ind.pitch_mark_displacement(mark);
                assert!((displacement - mark.offset * expected_scale).abs() < 0.001);
            }
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut once = indicator();
        once.update_attitude(AttitudeSample::new(-25.0, 12.0));

        let mut twice = indicator();
        twice.update_attitude(AttitudeSample::new(-25.0, 12.0));
        twice.update_attitude(AttitudeSample::new(-25.0, 12.0));

        for (a, b) in once.scene().nodes().zip(twice.scene().nodes()) {
            assert_eq!(a.rotation, b.rotation);
            let (ax, ay) = a.world_center();
            let (bx, by) = b.world_center();
            assert!((ax - bx).abs() < 0.001);
            assert!((ay - by).abs() < 0.001);
        }
    }

    #[test]
    fn test_update_overwrites_previous_pose() {
        let mut ind = indicator();
        ind.update_attitude(AttitudeSample::new(40.0, -30.0));
        ind.update_attitude(AttitudeSample::new(10.0, 20.0));

        let mut fresh = indicator();
        fresh.update_attitude(AttitudeSample::new(10.0, 20.0));

        let ground = ind.scene().node(ind.horizon().ground_inner);
        let fresh_ground = fresh.scene().node(fresh.horizon().ground_inner);
        assert_eq!(ground.rotation, fresh_ground.rotation);
        assert!(
            (ground.primitive.bounds().min_y - fresh_ground.primitive.bounds().min_y).abs()
                < 0.001
        );
    }

    #[test]
    fn test_bank_thirty_scenario() {
        let mut ind = indicator();
        ind.update_attitude(AttitudeSample::new(30.0, 0.0));

        for id in ind.horizon().all() {
            assert_eq!(ind.scene().node(id).rotation.angle, 30.0);
        }

        let pointer = ind
            .roll_marks()
            .iter()
            .find(|m| m.angle == 0.0)
            .unwrap();
        assert_eq!(ind.scene().node(pointer.node).rotation.angle, 30.0);

        let scale = ind.pitch_scale_factor();
        for mark in ind.pitch_marks() {
            assert_eq!(ind.scene().node(mark.node).rotation.angle, 30.0);
            assert!((ind.pitch_mark_displacement(mark) - mark.offset * scale).abs() < 0.001);
        }

        // Level pitch: the horizon line runs through the center
        let ground = ind.scene().node(ind.horizon().ground_inner);
        assert!((ground.primitive.bounds().min_y - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_pitch_sign_conventions() {
        let mut ind = indicator();
        ind.update_attitude(AttitudeSample::new(0.0, 60.0));

        assert!((ind.pitch_scale_factor() - 300.0 / 360.0).abs() < 0.0001);

        // Ladder: the mark for +60 sits 50 below center regardless of pitch
        let sixty = *ind
            .pitch_marks()
            .iter()
            .find(|m| m.offset == 60.0)
            .unwrap();
        assert!((ind.pitch_mark_displacement(&sixty) - 50.0).abs() < 0.001);

        // Horizon: the inner ground slides down by the scaled pitch,
        // the inner sky follows, the outer frame stays put
        let top = |ind: &AttitudeIndicator, id| ind.scene().node(id).primitive.bounds().min_y;
        let h = *ind.horizon();
        assert!((top(&ind, h.ground_inner) - 230.0).abs() < 0.001);
        assert!((top(&ind, h.sky_inner) - (-130.0)).abs() < 0.001);
        assert!((top(&ind, h.ground_outer) - 180.0).abs() < 0.001);
        assert!((top(&ind, h.sky_outer) - (-180.0)).abs() < 0.001);

        // Negative pitch moves the ground up, the ladder still doesn't move
        ind.update_attitude(AttitudeSample::new(0.0, -60.0));
        assert!((top(&ind, h.ground_inner) - 130.0).abs() < 0.001);
        assert!((ind.pitch_mark_displacement(&sixty) - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_symbol_never_moves() {
        let mut ind = indicator();
        let before: Vec<(f32, f32)> = ind
            .symbol()
            .all()
            .iter()
            .map(|&id| ind.scene().node(id).world_center())
            .collect();

        ind.update_attitude(AttitudeSample::new(75.0, -40.0));

        for (&id, (bx, by)) in ind.symbol().all().iter().zip(before) {
            let node = ind.scene().node(id);
            assert_eq!(node.rotation.angle, 0.0);
            let (x, y) = node.world_center();
            assert!((x - bx).abs() < 0.001);
            assert!((y - by).abs() < 0.001);
        }
    }

    #[test]
    fn test_orientation_guide_placement() {
        let ind = indicator();
        let guide = ind.scene().node(ind.symbol().guide);
        let (x, y) = guide.world_center();
        assert!((x - 180.0).abs() < 0.01);
        assert!((y - 198.0).abs() < 0.01);
        assert!((guide.world().scale_factor() - GUIDE_SCALE).abs() < 0.001);
    }

    #[test]
    fn test_z_order() {
        let ind = indicator();
        let scene = ind.scene();
        let h = ind.horizon();
        let first_mark = ind.pitch_marks()[0].node;
        let first_tick = ind.roll_marks()[0].node;

        assert!(scene.index_of(h.ground_inner) < scene.index_of(h.sky_inner));
        assert!(scene.index_of(h.sky_inner) < scene.index_of(first_mark));
        assert!(scene.index_of(first_mark) < scene.index_of(h.ground_outer));
        assert!(scene.index_of(h.sky_outer) < scene.index_of(first_tick));
        assert!(scene.index_of(first_tick) < scene.index_of(ind.symbol().stand));
        assert!(scene.index_of(ind.symbol().stand) < scene.index_of(ind.symbol().guide));
    }

    #[test]
    fn test_masks() {
        let ind = indicator();
        let scene = ind.scene();
        let h = ind.horizon();
        assert_eq!(scene.node(h.ground_inner).mask, Some(ind.face_mask()));
        assert_eq!(scene.node(h.sky_outer).mask, Some(ind.bezel_mask()));
        assert_eq!(
            scene.mask(ind.bezel_mask()).map(|m| m.radial_range()),
            Some((150.0, 180.0))
        );
    }

    #[test]
    fn test_zoom_applies_on_next_update() {
        let mut ind = indicator();
        ind.set_zoom(2.0);
        assert!((ind.pitch_scale_factor() - 300.0 / 360.0).abs() < 0.0001);

        ind.update_attitude(ind.attitude());
        assert!((ind.pitch_scale_factor() - 2.0 * 300.0 / 360.0).abs() < 0.0001);

        ind.set_zoom(7.0);
        assert_eq!(ind.zoom(), 3.0);
    }

    #[test]
    fn test_non_finite_sample_is_ignored() {
        let mut ind = indicator();
        ind.update_attitude(AttitudeSample::new(20.0, 10.0));
        ind.update_attitude(AttitudeSample::new(f32::NAN, 10.0));
        assert_eq!(ind.attitude(), AttitudeSample::new(20.0, 10.0));
        let ground = ind.scene().node(ind.horizon().ground_inner);
        assert!(ground.primitive.bounds().min_y.is_finite());
    }

    #[test]
    fn test_reconfigure_keeps_attitude() {
        let mut ind = indicator();
        ind.update_attitude(AttitudeSample::new(-15.0, 8.0));
        ind.reconfigure(InstrumentConfig {
            width: 480.0,
            height: 480.0,
            outer_radius: 40.0,
            ..InstrumentConfig::default()
        })
        .unwrap();

        assert_eq!(ind.attitude(), AttitudeSample::new(-15.0, 8.0));
        assert_eq!(ind.geometry().cx, 240.0);
        let ground = ind.scene().node(ind.horizon().ground_inner);
        assert_eq!(ground.rotation.angle, -15.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = AttitudeIndicator::new(InstrumentConfig {
            outer_radius: 0.0,
            ..InstrumentConfig::default()
        });
        assert!(matches!(result, Err(InstrumentError::InvalidConfig(_))));
    }
}
