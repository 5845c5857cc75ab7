//! Affine transforms - Rotate, Scale, Translate
//!
//! Scene coordinates are SVG-style: x grows to the right, y grows downward,
//! and a positive rotation turns clockwise on screen.
//!
//! Every transform is a 3x3 homogeneous matrix so that rotations about a
//! pivot, scales about a point and translations compose by multiplication.

use nalgebra::{Matrix3, Point2};

/// A 2D affine transform backed by a homogeneous 3x3 matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    matrix: Matrix3<f32>,
}

impl Affine {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Translate by (dx, dy)
    pub fn translate(dx: f32, dy: f32) -> Self {
        Self {
            matrix: Matrix3::new(
                1.0, 0.0, dx, //
                0.0, 1.0, dy, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Uniform scale about the point (cx, cy)
    pub fn scale_about(factor: f32, cx: f32, cy: f32) -> Self {
        let scale = Matrix3::new(
            factor, 0.0, 0.0, //
            0.0, factor, 0.0, //
            0.0, 0.0, 1.0,
        );
        let to_point = Self::translate(cx, cy).matrix;
        let from_point = Self::translate(-cx, -cy).matrix;

        Self {
            matrix: to_point * scale * from_point,
        }
    }

    /// Rotation by `degrees` about the pivot (cx, cy)
    pub fn rotate_about(degrees: f32, cx: f32, cy: f32) -> Self {
        let (sin_a, cos_a) = degrees.to_radians().sin_cos();

        // Conjugate the origin rotation with a translation to the pivot
        let rotation = Matrix3::new(
            cos_a, -sin_a, 0.0, //
            sin_a, cos_a, 0.0, //
            0.0, 0.0, 1.0,
        );
        let to_pivot = Self::translate(cx, cy).matrix;
        let from_pivot = Self::translate(-cx, -cy).matrix;

        Self {
            matrix: to_pivot * rotation * from_pivot,
        }
    }

    /// Build from raw SVG matrix components `matrix(a b c d e f)`
    pub fn from_components(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self {
            matrix: Matrix3::new(
                a, c, e, //
                b, d, f, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Compose: apply `self` first, then `next`
    pub fn then_apply(&self, next: &Affine) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    /// Map a point through the transform
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let p = self.matrix.transform_point(&Point2::new(x, y));
        (p.x, p.y)
    }

    /// Map many points through the transform
    pub fn apply_all(&self, points: &[(f32, f32)]) -> Vec<(f32, f32)> {
        points.iter().map(|&(x, y)| self.apply(x, y)).collect()
    }

    /// Average linear scale of the transform
    ///
    /// Used for radii and stroke widths, which only make sense under a
    /// uniform scale.
    pub fn scale_factor(&self) -> f32 {
        let m = &self.matrix;
        let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
        det.abs().sqrt()
    }

    /// Rotation angle in degrees encoded by the linear part
    pub fn rotation_degrees(&self) -> f32 {
        self.matrix[(1, 0)].atan2(self.matrix[(0, 0)]).to_degrees()
    }

    pub fn is_identity(&self) -> bool {
        (self.matrix - Matrix3::identity()).abs().max() < 1e-6
    }

    /// SVG `matrix(a b c d e f)` components
    pub fn components(&self) -> [f32; 6] {
        let m = &self.matrix;
        [
            m[(0, 0)],
            m[(1, 0)],
            m[(0, 1)],
            m[(1, 1)],
            m[(0, 2)],
            m[(1, 2)],
        ]
    }

    /// Format as an SVG transform attribute value
    pub fn to_svg(&self) -> String {
        let [a, b, c, d, e, f] = self.components();
        format!("matrix({} {} {} {} {} {})", a, b, c, d, e, f)
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

/// Absolute rotation about a pivot
///
/// Nodes carry one of these on top of their local transform. Setting it
/// replaces the previous angle, so repeated updates never accumulate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotate {
    /// Rotation angle in degrees (clockwise on screen)
    pub angle: f32,
    /// Pivot X coordinate
    pub cx: f32,
    /// Pivot Y coordinate
    pub cy: f32,
}

impl Rotate {
    /// A rotation about the pivot (cx, cy)
    pub fn new(angle: f32, cx: f32, cy: f32) -> Self {
        Self { angle, cx, cy }
    }

    /// No rotation
    pub fn none() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Angle normalized into [0, 360)
    pub fn normalized_angle(&self) -> f32 {
        self.angle.rem_euclid(360.0)
    }

    pub fn is_none(&self) -> bool {
        self.angle == 0.0
    }

    pub fn to_affine(&self) -> Affine {
        Affine::rotate_about(self.angle, self.cx, self.cy)
    }

    /// Format as an SVG transform attribute value
    pub fn to_svg(&self) -> String {
        format!("rotate({} {} {})", self.angle, self.cx, self.cy)
    }
}

impl Default for Rotate {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_90_degrees_about_origin() {
        let rotate = Affine::rotate_about(90.0, 0.0, 0.0);
        let (x, y) = rotate.apply(1.0, 0.0);
        // Clockwise on screen: +x turns into +y (downward)
        assert!(x.abs() < 0.001);
        assert!((y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let rotate = Affine::rotate_about(180.0, 180.0, 180.0);
        let (x, y) = rotate.apply(180.0, 0.0);
        assert!((x - 180.0).abs() < 0.001);
        assert!((y - 360.0).abs() < 0.001);

        // The pivot itself never moves
        let (px, py) = rotate.apply(180.0, 180.0);
        assert!((px - 180.0).abs() < 0.001);
        assert!((py - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_scale_about_point() {
        let scale = Affine::scale_about(0.5, 10.0, 10.0);
        let (x, y) = scale.apply(20.0, 10.0);
        assert!((x - 15.0).abs() < 0.001);
        assert!((y - 10.0).abs() < 0.001);
        assert!((scale.scale_factor() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_compose_order() {
        // Translate first, then rotate about the origin
        let t = Affine::translate(1.0, 0.0).then_apply(&Affine::rotate_about(90.0, 0.0, 0.0));
        let (x, y) = t.apply(0.0, 0.0);
        assert!(x.abs() < 0.001);
        assert!((y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_rotation_degrees_round_trip() {
        let t = Affine::rotate_about(30.0, 5.0, 7.0);
        assert!((t.rotation_degrees() - 30.0).abs() < 0.001);
        assert!((t.scale_factor() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_components_match_svg_layout() {
        let t = Affine::translate(3.0, 4.0);
        assert_eq!(t.components(), [1.0, 0.0, 0.0, 1.0, 3.0, 4.0]);
        assert_eq!(t.to_svg(), "matrix(1 0 0 1 3 4)");
        assert!(Affine::identity().is_identity());
        assert!(!t.is_identity());
    }

    #[test]
    fn test_rotate_normalized_angle() {
        assert!((Rotate::new(-30.0, 0.0, 0.0).normalized_angle() - 330.0).abs() < 0.001);
        assert!((Rotate::new(390.0, 0.0, 0.0).normalized_angle() - 30.0).abs() < 0.001);
        assert_eq!(Rotate::new(45.0, 1.0, 2.0).to_svg(), "rotate(45 1 2)");
    }
}
