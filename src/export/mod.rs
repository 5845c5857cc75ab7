//! Export module - write the instrument out as SVG

mod svg;

pub use svg::{to_svg_string, write_svg, ExportError};
