//! Bounding-box annotation surface for an HTML canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. The user
//! drags out rectangles over a `<canvas>`, double-clicks one to label it, and
//! clicks its corner glyph to delete it. New boxes must meet a minimum size
//! and may not overlap an existing box.
//!
//! All interaction logic lives in [`engine::SurfaceCore`], which has no
//! browser dependency and is what the unit tests drive. [`host`] is the thin
//! wasm-bindgen layer that wires DOM events, the render timer, and label
//! prompts to it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level surface and testable [`engine::SurfaceCore`] |
//! | [`doc`] | Annotation type and the ordered store |
//! | [`geom`] | Points, normalized bounds, overlap and containment |
//! | [`input`] | Pointer events and the gesture state machine |
//! | [`hit`] | Hit-testing for remove handles and annotation bodies |
//! | [`scene`] | Per-frame display list |
//! | [`render`] | Paints a display list onto a `CanvasRenderingContext2d` |
//! | [`host`] | wasm-bindgen entry point and DOM wiring |
//! | [`config`] | Runtime configuration |
//! | [`error`] | Host-facing error type |
//! | [`consts`] | Default thresholds, colours, and sizes |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod host;
pub mod input;
pub mod render;
pub mod scene;
