//! Shared numeric constants and defaults for the annotation surface.

// ── Rendering ───────────────────────────────────────────────────

/// Default render tick rate, in frames per second.
pub const DEFAULT_FPS: u32 = 60;

/// Relative path of the remove-glyph image, resolved against the page.
pub const DEFAULT_REMOVE_ICON_URL: &str = "./remove-box.png";

/// Label font, as a CSS font shorthand.
pub const DEFAULT_FONT: &str = "20px Arial";

pub const DEFAULT_STROKE: &str = "#000000";
pub const DEFAULT_INVALID_STROKE: &str = "#FF0000";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

// ── Validity ────────────────────────────────────────────────────

/// Smallest accepted `abs(width)` for a new annotation, in pixels.
pub const MIN_WIDTH_PX: f64 = 100.0;

/// Smallest accepted `abs(height)` for a new annotation, in pixels.
pub const MIN_HEIGHT_PX: f64 = 20.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Half-size of the square remove handle centred on an annotation's start corner.
pub const REMOVE_HANDLE_HALF_PX: f64 = 8.0;
