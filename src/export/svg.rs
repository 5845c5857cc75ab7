//! SVG writer - serialize a scene in its current pose
//!
//! Gradients and masks go into `<defs>`. Each masked node is wrapped in a
//! `<g>` carrying the mask so the mask stays in scene coordinates while the
//! node itself rotates.

use std::fs;
use std::path::Path as FilePath;

use thiserror::Error;

use crate::scene::{Fill, GradientId, Mask, MaskId, Node, Paint, Primitive, Scene};

/// Errors that can occur while exporting
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write SVG: {0}")]
    Io(#[from] std::io::Error),
}

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Render the whole scene as a standalone SVG document
pub fn to_svg_string(scene: &Scene) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(scene.width()),
        h = num(scene.height())
    ));
    out.push('\n');

    out.push_str("<defs>\n");
    for (id, gradient) in scene.gradients() {
        out.push_str(&format!(r#"<radialGradient id="{}">"#, gradient_ref(id)));
        for stop in gradient.stops() {
            out.push_str(&format!(
                r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                num(stop.offset),
                stop.color.to_hex(),
                num(stop.opacity)
            ));
        }
        out.push_str("</radialGradient>\n");
    }
    for (id, mask) in scene.masks() {
        out.push_str(&mask_element(id, mask, scene.width(), scene.height()));
        out.push('\n');
    }
    out.push_str("</defs>\n");

    for node in scene.nodes() {
        let element = node_element(node);
        match node.mask {
            Some(mask) => out.push_str(&format!(
                r#"<g mask="url(#{})">{}</g>"#,
                mask_ref(mask),
                element
            )),
            None => out.push_str(&element),
        }
        out.push('\n');
    }

    out.push_str("</svg>\n");
    out
}

/// Write the scene to `path` as an SVG file
pub fn write_svg(path: impl AsRef<FilePath>, scene: &Scene) -> Result<(), ExportError> {
    let path = path.as_ref();
    fs::write(path, to_svg_string(scene))?;
    log::info!("Exported {} nodes to {:?}", scene.len(), path);
    Ok(())
}

fn mask_element(id: MaskId, mask: &Mask, width: f32, height: f32) -> String {
    let mut body = String::new();
    match *mask {
        Mask::Disc { cx, cy, r } => {
            body.push_str(&circle(cx, cy, r, "#ffffff"));
        }
        Mask::Annulus {
            cx,
            cy,
            outer,
            inner,
        } => {
            body.push_str(&circle(cx, cy, outer, "#ffffff"));
            body.push_str(&circle(cx, cy, inner, "#000000"));
        }
    }
    format!(
        r#"<mask id="{}" maskUnits="userSpaceOnUse" x="0" y="0" width="{}" height="{}">{}</mask>"#,
        mask_ref(id),
        num(width),
        num(height),
        body
    )
}

fn circle(cx: f32, cy: f32, r: f32, fill: &str) -> String {
    format!(
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
        num(cx),
        num(cy),
        num(r),
        fill
    )
}

fn node_element(node: &Node) -> String {
    let attrs = format!(
        r#"id="{}"{}{}"#,
        escape(&node.name),
        paint_attributes(&node.paint),
        transform_attribute(node)
    );

    match &node.primitive {
        Primitive::Rect {
            x,
            y,
            width,
            height,
        } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            num(*x),
            num(*y),
            num(*width),
            num(*height),
            attrs
        ),
        Primitive::Line { x1, y1, x2, y2 } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            num(*x1),
            num(*y1),
            num(*x2),
            num(*y2),
            attrs
        ),
        Primitive::Polyline { points } => {
            let points: Vec<String> = points
                .iter()
                .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
                .collect();
            format!(r#"<polyline points="{}" {}/>"#, points.join(" "), attrs)
        }
        Primitive::Circle { cx, cy, r } => format!(
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            num(*cx),
            num(*cy),
            num(*r),
            attrs
        ),
        Primitive::Path { outline } => format!(
            r#"<path d="{}" {}/>"#,
            escape(outline.data()),
            attrs
        ),
        Primitive::Text { x, y, text, size } => format!(
            r#"<text x="{}" y="{}" font-size="{}" font-family="{}" text-anchor="middle" dominant-baseline="central" {}>{}</text>"#,
            num(*x),
            num(*y),
            num(*size),
            FONT_FAMILY,
            attrs,
            escape(text)
        ),
    }
}

fn paint_attributes(paint: &Paint) -> String {
    let mut attrs = String::new();

    match paint.fill {
        Fill::None => attrs.push_str(r#" fill="none""#),
        Fill::Solid { color, opacity } => {
            attrs.push_str(&format!(r#" fill="{}""#, color.to_hex()));
            if opacity < 1.0 {
                attrs.push_str(&format!(r#" fill-opacity="{}""#, num(opacity)));
            }
        }
        Fill::Gradient(id) => {
            attrs.push_str(&format!(r#" fill="url(#{})""#, gradient_ref(id)));
        }
    }

    if let Some(stroke) = paint.stroke {
        attrs.push_str(&format!(
            r#" stroke="{}" stroke-width="{}""#,
            stroke.color.to_hex(),
            num(stroke.width)
        ));
    }

    if paint.opacity < 1.0 {
        attrs.push_str(&format!(r#" opacity="{}""#, num(paint.opacity)));
    }
    attrs
}

/// Rotation, then the local transform, then the path's own offset
///
/// SVG applies the rightmost entry first, which matches `Node::world`.
fn transform_attribute(node: &Node) -> String {
    let mut parts = Vec::new();

    if !node.rotation.is_none() {
        parts.push(format!(
            "rotate({} {} {})",
            num(node.rotation.angle),
            num(node.rotation.cx),
            num(node.rotation.cy)
        ));
    }
    if !node.local.is_identity() {
        let [a, b, c, d, e, f] = node.local.components();
        parts.push(format!(
            "matrix({} {} {} {} {} {})",
            num(a),
            num(b),
            num(c),
            num(d),
            num(e),
            num(f)
        ));
    }
    if let Primitive::Path { outline } = &node.primitive {
        let (dx, dy) = outline.offset();
        if dx != 0.0 || dy != 0.0 {
            parts.push(format!("translate({} {})", num(dx), num(dy)));
        }
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(r#" transform="{}""#, parts.join(" "))
    }
}

fn gradient_ref(id: GradientId) -> String {
    format!("gradient-{}", id.0)
}

fn mask_ref(id: MaskId) -> String {
    format!("mask-{}", id.0)
}

/// Format a coordinate with at most three decimals
fn num(value: f32) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "" | "-" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
