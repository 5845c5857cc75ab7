//! SVG path data - parse `d` strings and flatten them to polylines
//!
//! This module handles:
//! - Parsing SVG path data using usvg
//! - Converting Bézier curves to point sequences
//! - Keeping the original data for re-export
//!
//! The flattened outline is what the live painter draws and what bounding
//! boxes are measured on. The SVG writer re-emits the original data with
//! the accumulated offset applied as a transform.

use thiserror::Error;

use super::primitives::Bounds;

/// Errors that can occur while parsing path data
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Failed to parse path data: {0}")]
    ParseError(String),

    #[error("Path data contains no segments")]
    NoSegments,
}

/// Number of points sampled per curve segment
const CURVE_SAMPLES: usize = 16;

/// A parsed SVG path
#[derive(Clone, Debug)]
pub struct PathOutline {
    /// Original `d` attribute
    data: String,
    /// Flattened subpaths, each with a closed flag
    subpaths: Vec<(Vec<(f32, f32)>, bool)>,
    /// Offset accumulated by `translate`, relative to `data`
    offset: (f32, f32),
}

impl PathOutline {
    /// Parse SVG path data such as `"M 0,0 H 10 c 1,1 2,2 3,3"`
    pub fn parse(data: &str) -> Result<Self, PathError> {
        // usvg only parses whole documents, so wrap the data in a minimal one.
        // A stroke keeps the path from being dropped as invisible.
        let document = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><path d="{}" fill="none" stroke="black"/></svg>"#,
            data
        );
        let tree = usvg::Tree::from_data(document.as_bytes(), &usvg::Options::default())
            .map_err(|e| PathError::ParseError(e.to_string()))?;

        let mut subpaths = Vec::new();
        collect_group(tree.root(), &mut subpaths);

        if subpaths.is_empty() {
            return Err(PathError::NoSegments);
        }

        Ok(Self {
            data: data.to_string(),
            subpaths,
            offset: (0.0, 0.0),
        })
    }

    /// Original path data
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Offset to apply to `data` to reach the current position
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    /// Flattened subpaths with their closed flag
    pub fn subpaths(&self) -> &[(Vec<(f32, f32)>, bool)] {
        &self.subpaths
    }

    /// Total number of flattened points
    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(|(points, _)| points.len()).sum()
    }

    pub fn bounds(&self) -> Bounds {
        let all: Vec<(f32, f32)> = self
            .subpaths
            .iter()
            .flat_map(|(points, _)| points.iter().copied())
            .collect();
        Bounds::from_points(&all).unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        })
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        for (points, _) in self.subpaths.iter_mut() {
            for (x, y) in points.iter_mut() {
                *x += dx;
                *y += dy;
            }
        }
        self.offset.0 += dx;
        self.offset.1 += dy;
    }
}

/// Recursively collect all paths in a group
fn collect_group(group: &usvg::Group, subpaths: &mut Vec<(Vec<(f32, f32)>, bool)>) {
    for child in group.children() {
        match child {
            usvg::Node::Path(ref path) => collect_path(path, subpaths),
            usvg::Node::Group(ref subgroup) => collect_group(subgroup, subpaths),
            _ => {}
        }
    }
}

/// Flatten one usvg path into subpaths
fn collect_path(path: &usvg::Path, subpaths: &mut Vec<(Vec<(f32, f32)>, bool)>) {
    let mut points: Vec<(f32, f32)> = Vec::new();

    for segment in path.data().segments() {
        match segment {
            usvg::tiny_skia_path::PathSegment::MoveTo(p) => {
                if points.len() >= 2 {
                    subpaths.push((std::mem::take(&mut points), false));
                }
                points.clear();
                points.push((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::LineTo(p) => {
                points.push((p.x, p.y));
            }
            usvg::tiny_skia_path::PathSegment::QuadTo(p1, p2) => {
                if let Some(&start) = points.last() {
                    let ctrl = (p1.x, p1.y);
                    let end = (p2.x, p2.y);
                    for i in 1..=CURVE_SAMPLES {
                        let t = i as f32 / CURVE_SAMPLES as f32;
                        points.push(quadratic_bezier(start, ctrl, end, t));
                    }
                }
            }
            usvg::tiny_skia_path::PathSegment::CubicTo(p1, p2, p3) => {
                if let Some(&start) = points.last() {
                    let ctrl1 = (p1.x, p1.y);
                    let ctrl2 = (p2.x, p2.y);
                    let end = (p3.x, p3.y);
                    for i in 1..=CURVE_SAMPLES {
                        let t = i as f32 / CURVE_SAMPLES as f32;
                        points.push(cubic_bezier(start, ctrl1, ctrl2, end, t));
                    }
                }
            }
            usvg::tiny_skia_path::PathSegment::Close => {
                if points.len() >= 2 {
                    subpaths.push((std::mem::take(&mut points), true));
                }
                points.clear();
            }
        }
    }

    if points.len() >= 2 {
        subpaths.push((points, false));
    }
}

/// Evaluate a quadratic Bézier curve at parameter t
fn quadratic_bezier(p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), t: f32) -> (f32, f32) {
    let t2 = t * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    let x = mt2 * p0.0 + 2.0 * mt * t * p1.0 + t2 * p2.0;
    let y = mt2 * p0.1 + 2.0 * mt * t * p1.1 + t2 * p2.1;

    (x, y)
}

/// Evaluate a cubic Bézier curve at parameter t
fn cubic_bezier(
    p0: (f32, f32),
    p1: (f32, f32),
    p2: (f32, f32),
    p3: (f32, f32),
    t: f32,
) -> (f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    let x = mt3 * p0.0 + 3.0 * mt2 * t * p1.0 + 3.0 * mt * t2 * p2.0 + t3 * p3.0;
    let y = mt3 * p0.1 + 3.0 * mt2 * t * p1.1 + 3.0 * mt * t2 * p2.1 + t3 * p3.1;

    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_straight_path() {
        let outline = PathOutline::parse("M 10,10 H 50 V 30").unwrap();
        assert_eq!(outline.subpaths().len(), 1);
        let b = outline.bounds();
        assert!((b.min_x - 10.0).abs() < 0.001);
        assert!((b.max_x - 50.0).abs() < 0.001);
        assert!((b.max_y - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_curve_is_flattened() {
        let outline = PathOutline::parse("M 0,0 c 0,10 10,10 10,0").unwrap();
        assert_eq!(outline.point_count(), 1 + CURVE_SAMPLES);
        // The curve bulges below the chord, peaking at 7.5
        let b = outline.bounds();
        assert!((b.max_y - 7.5).abs() < 0.01);
    }

    #[test]
    fn test_parse_closed_subpath() {
        let outline = PathOutline::parse("M 0,0 L 10,0 L 10,10 Z").unwrap();
        assert_eq!(outline.subpaths().len(), 1);
        assert!(outline.subpaths()[0].1);
    }

    #[test]
    fn test_translate_tracks_offset() {
        let mut outline = PathOutline::parse("M 0,0 H 10").unwrap();
        outline.translate(5.0, -2.0);
        assert_eq!(outline.offset(), (5.0, -2.0));
        let b = outline.bounds();
        assert!((b.min_x - 5.0).abs() < 0.001);
        assert!((b.min_y - (-2.0)).abs() < 0.001);
        assert_eq!(outline.data(), "M 0,0 H 10");
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert!(PathOutline::parse("").is_err());
    }

    #[test]
    fn test_bezier_endpoints() {
        let (x, y) = quadratic_bezier((0.0, 0.0), (0.5, 1.0), (1.0, 0.0), 0.5);
        assert!((x - 0.5).abs() < 0.001);
        assert!((y - 0.5).abs() < 0.001);

        let (x, y) = cubic_bezier((0.0, 0.0), (0.33, 1.0), (0.66, 1.0), (1.0, 0.0), 1.0);
        assert!((x - 1.0).abs() < 0.001);
        assert!(y.abs() < 0.001);
    }
}
