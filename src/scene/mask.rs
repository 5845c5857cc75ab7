//! Circular masks - restrict a node's visible region

/// Handle to a mask stored in a `Scene`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaskId(pub(crate) usize);

/// Visible region of a masked node
///
/// In SVG terms a disc is a single white circle and an annulus is a white
/// circle with a black circle punched out of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mask {
    /// Everything inside the circle
    Disc { cx: f32, cy: f32, r: f32 },
    /// Everything between the inner and outer circles
    Annulus {
        cx: f32,
        cy: f32,
        outer: f32,
        inner: f32,
    },
}

impl Mask {
    pub fn disc(cx: f32, cy: f32, r: f32) -> Self {
        Mask::Disc { cx, cy, r }
    }

    pub fn annulus(cx: f32, cy: f32, outer: f32, inner: f32) -> Self {
        Mask::Annulus {
            cx,
            cy,
            outer: outer.max(inner),
            inner: inner.min(outer),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        match *self {
            Mask::Disc { cx, cy, .. } | Mask::Annulus { cx, cy, .. } => (cx, cy),
        }
    }

    /// Visible radial band as (inner, outer) radii
    pub fn radial_range(&self) -> (f32, f32) {
        match *self {
            Mask::Disc { r, .. } => (0.0, r),
            Mask::Annulus { outer, inner, .. } => (inner, outer),
        }
    }

    /// Whether a point is visible through the mask
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (cx, cy) = self.center();
        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        let (inner, outer) = self.radial_range();
        match self {
            Mask::Disc { .. } => d <= outer,
            Mask::Annulus { .. } => d <= outer && d >= inner,
        }
    }
}
