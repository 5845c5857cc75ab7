//! Mask clipping for the live painter
//!
//! egui has no masks, so masked nodes are cut up on the CPU instead:
//!
//! - Fills are clipped polygon-by-polygon against convex "cells" that tile
//!   the mask: a single N-gon for a disc, N quads around an annulus
//! - Strokes are split where they cross the mask's circles and only the
//!   visible pieces are kept
//!
//! Everything here works in scene coordinates.

use std::f32::consts::TAU;

use crate::scene::Mask;

pub type Point = (f32, f32);

/// Points of a regular polygon inscribed in a circle
pub fn regular_polygon(cx: f32, cy: f32, r: f32, segments: usize) -> Vec<Point> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * TAU;
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

/// Convex cells that together cover the visible region of a mask
pub fn mask_cells(mask: &Mask, segments: usize) -> Vec<Vec<Point>> {
    match *mask {
        Mask::Disc { cx, cy, r } => vec![regular_polygon(cx, cy, r, segments)],
        Mask::Annulus {
            cx,
            cy,
            outer,
            inner,
        } => {
            let outer_ring = regular_polygon(cx, cy, outer, segments);
            let inner_ring = regular_polygon(cx, cy, inner, segments);
            let n = outer_ring.len();
            (0..n)
                .map(|i| {
                    let j = (i + 1) % n;
                    vec![outer_ring[i], outer_ring[j], inner_ring[j], inner_ring[i]]
                })
                .collect()
        }
    }
}

/// Clip `subject` against the convex polygon `clip` (Sutherland-Hodgman)
///
/// Works for either winding of `clip`. Returns an empty vector when
/// nothing is left.
pub fn clip_polygon(subject: &[Point], clip: &[Point]) -> Vec<Point> {
    if subject.len() < 3 || clip.len() < 3 {
        return Vec::new();
    }

    let orientation = signed_area(clip).signum();
    let inside = |a: Point, b: Point, p: Point| cross(a, b, p) * orientation >= 0.0;

    let mut output = subject.to_vec();
    for i in 0..clip.len() {
        if output.is_empty() {
            break;
        }
        let a = clip[i];
        let b = clip[(i + 1) % clip.len()];
        let input = std::mem::take(&mut output);

        let mut prev = input[input.len() - 1];
        for &current in &input {
            let current_in = inside(a, b, current);
            let prev_in = inside(a, b, prev);
            if current_in {
                if !prev_in {
                    output.push(intersect(prev, current, a, b));
                }
                output.push(current);
            } else if prev_in {
                output.push(intersect(prev, current, a, b));
            }
            prev = current;
        }
    }

    if output.len() < 3 {
        Vec::new()
    } else {
        output
    }
}

/// Visible pieces of the segment `p0 -> p1` inside a mask
pub fn clip_segment(p0: Point, p1: Point, mask: &Mask) -> Vec<(Point, Point)> {
    let (cx, cy) = mask.center();
    let (inner, outer) = mask.radial_range();
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let (fx, fy) = (p0.0 - cx, p0.1 - cy);

    // Every parameter where the segment crosses one of the mask circles
    let mut cuts = vec![0.0, 1.0];
    let a = dx * dx + dy * dy;
    if a > f32::EPSILON {
        for r in [inner, outer] {
            if r <= 0.0 {
                continue;
            }
            let b = 2.0 * (fx * dx + fy * dy);
            let c = fx * fx + fy * fy - r * r;
            let disc = b * b - 4.0 * a * c;
            if disc < 0.0 {
                continue;
            }
            let root = disc.sqrt();
            for t in [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)] {
                if t > 0.0 && t < 1.0 {
                    cuts.push(t);
                }
            }
        }
    }
    cuts.sort_by(|a, b| a.total_cmp(b));

    let at = |t: f32| (p0.0 + dx * t, p0.1 + dy * t);
    let mut pieces: Vec<(Point, Point)> = Vec::new();
    for pair in cuts.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        if t1 - t0 <= f32::EPSILON {
            continue;
        }
        let (mx, my) = at((t0 + t1) / 2.0);
        if !mask.contains(mx, my) {
            continue;
        }
        // Merge with the previous piece when they touch
        match pieces.last_mut() {
            Some(last) if last.1 == at(t0) => last.1 = at(t1),
            _ => pieces.push((at(t0), at(t1))),
        }
    }
    pieces
}

/// Twice the signed area, positive for counter-clockwise in y-up terms
fn signed_area(points: &[Point]) -> f32 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
        .sum()
}

#[cfg(test)]
fn polygon_area(points: &[Point]) -> f32 {
    signed_area(points).abs() / 2.0
}

fn cross(a: Point, b: Point, p: Point) -> f32 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Intersection of segment `p -> q` with the infinite line through `a`, `b`
fn intersect(p: Point, q: Point, a: Point, b: Point) -> Point {
    let denom = cross(a, b, q) - cross(a, b, p);
    if denom.abs() < f32::EPSILON {
        return q;
    }
    let t = -cross(a, b, p) / denom;
    (p.0 + (q.0 - p.0) * t, p.1 + (q.1 - p.1) * t)
}
