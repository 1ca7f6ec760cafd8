//! Rendering: replays a [`scene`](crate::scene) display list onto a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It does not read or mutate annotation state; everything it needs is in the
//! ops list.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Surface::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::scene::DrawOp;

/// Paint one frame.
///
/// `remove_icon` is required for [`DrawOp::RemoveGlyph`]; glyph ops are
/// skipped while it is `None`.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. a broken image).
pub fn paint(
    ctx: &CanvasRenderingContext2d,
    ops: &[DrawOp],
    font: &str,
    remove_icon: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    for op in ops {
        match op {
            DrawOp::Clear { width, height, fill } => {
                ctx.begin_path();
                ctx.set_fill_style_str(fill);
                ctx.fill_rect(0.0, 0.0, *width, *height);
            }
            DrawOp::StrokeRect { x, y, width, height, color } => {
                ctx.begin_path();
                ctx.set_stroke_style_str(color);
                ctx.rect(*x, *y, *width, *height);
                ctx.stroke();
            }
            DrawOp::Label { text, at, color } => {
                ctx.set_font(font);
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_fill_style_str(color);
                ctx.fill_text(text, at.x, at.y)?;
            }
            DrawOp::RemoveGlyph { at } => {
                if let Some(icon) = remove_icon {
                    ctx.draw_image_with_html_image_element(icon, at.x, at.y)?;
                }
            }
        }
    }
    Ok(())
}
