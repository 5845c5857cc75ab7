//! Scene module - a small retained 2D vector scene graph
//!
//! This module provides:
//! - Primitive shapes: Rect, Line, Polyline, Circle, Path, Text
//! - Paint: solid and radial-gradient fills, strokes, opacity
//! - Circular masks (disc and annulus)
//! - Affine transforms with absolute rotation about a pivot
//! - SVG path data parsing for curved outlines

mod gradient;
mod graph;
mod mask;
mod path;
mod primitives;
mod transform;

pub use gradient::{GradientId, GradientStop, RadialGradient};
pub use graph::{Node, NodeId, Scene};
pub use mask::{Mask, MaskId};
pub use path::{PathError, PathOutline};
pub use primitives::{Bounds, Color, Fill, Paint, Primitive, Stroke};
pub use transform::{Affine, Rotate};
