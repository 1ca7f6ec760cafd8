//! Per-frame display list.
//!
//! [`build`] turns the annotation store into an ordered list of [`DrawOp`]s.
//! Keeping this step free of browser types lets the paint order be checked in
//! plain unit tests; [`crate::render`] only replays the list.
//!
//! Order within a frame:
//!
//! 1. clear to the background colour;
//! 2. for each annotation, its outline then its label;
//! 3. for each finalized annotation, its remove glyph.
//!
//! Glyphs go in a separate final pass so no outline is ever painted over one.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::config::SurfaceConfig;
use crate::doc::AnnotationStore;
use crate::geom::Point;

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill the whole surface.
    Clear { width: f64, height: f64, fill: String },
    /// Outline a rectangle given by anchor and signed extents.
    StrokeRect { x: f64, y: f64, width: f64, height: f64, color: String },
    /// Fill `text` centred on `at`.
    Label { text: String, at: Point, color: String },
    /// Draw the remove glyph with its top-left corner at `at`.
    RemoveGlyph { at: Point },
}

/// Build the display list for one frame.
///
/// Glyph ops are only emitted once `glyph_ready` is true.
#[must_use]
pub fn build(store: &AnnotationStore, config: &SurfaceConfig, width: f64, height: f64, glyph_ready: bool) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(store.len() * 3 + 1);
    ops.push(DrawOp::Clear { width, height, fill: config.background.clone() });

    for annotation in store.iter() {
        let color = if annotation.is_marked_invalid() {
            &config.invalid_stroke
        } else {
            &config.stroke
        };
        ops.push(DrawOp::StrokeRect {
            x: annotation.x,
            y: annotation.y,
            width: annotation.width,
            height: annotation.height,
            color: color.clone(),
        });
        if !annotation.text.is_empty() {
            ops.push(DrawOp::Label {
                text: annotation.text.clone(),
                at: annotation.bounds().center(),
                color: config.stroke.clone(),
            });
        }
    }

    if glyph_ready {
        let half = config.remove_handle_half;
        for annotation in store.finalized() {
            let start = annotation.bounds().start;
            ops.push(DrawOp::RemoveGlyph { at: Point::new(start.x - half, start.y - half) });
        }
    }

    ops
}
