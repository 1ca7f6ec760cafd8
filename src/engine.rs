use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::SurfaceConfig;
use crate::doc::{Annotation, AnnotationId, AnnotationStore};
use crate::error::SurfaceError;
use crate::geom::Point;
use crate::hit;
use crate::input::{InputState, PointerEvent};
use crate::{render, scene};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new in-progress annotation was started.
    Created { id: AnnotationId },
    /// The in-progress annotation passed validation and is now frozen.
    Finalized(Annotation),
    /// The in-progress annotation was dropped.
    Discarded { id: AnnotationId },
    /// A finalized annotation was removed. `index` is its former display index.
    Deleted { id: AnnotationId, index: usize },
    /// The host should collect a label and hand it back via `set_label`.
    LabelRequested { id: AnnotationId, current: String },
    /// A label was applied.
    LabelChanged { id: AnnotationId, text: String },
}

/// Read-only view of an annotation with its derived display index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationView {
    pub index: usize,
    pub id: AnnotationId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub done: bool,
    pub text: String,
}

/// Core surface state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Surface` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct SurfaceCore {
    pub store: AnnotationStore,
    pub input: InputState,
    pub config: SurfaceConfig,
    /// Set when a drag ends. Browsers follow `mouseup` with a `click` at the
    /// release point, which must not count as a click on a remove handle.
    swallow_click: bool,
}

impl SurfaceCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: SurfaceConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Dispatch a pointer event to its handler.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<Action> {
        match event {
            PointerEvent::Down(pt) => self.on_pointer_down(pt),
            PointerEvent::Move(pt) => self.on_pointer_move(pt),
            PointerEvent::Up(pt) => self.on_pointer_up(pt),
            PointerEvent::Leave => self.cancel_drawing(),
            PointerEvent::Click(pt) => self.on_click(pt),
            PointerEvent::DoubleClick(pt) => self.on_double_click(pt),
        }
    }

    // --- Drawing gesture ---

    /// Start drawing a new annotation anchored at `pt`. Ignored mid-draw.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        if self.input.is_drawing() {
            return Vec::new();
        }
        self.swallow_click = false;
        let annotation = Annotation::start_at(pt);
        let id = annotation.id;
        self.store.push(annotation);
        self.input = InputState::Drawing { id };
        log::debug!("annotation {id} started at ({}, {})", pt.x, pt.y);
        vec![Action::Created { id }]
    }

    /// Resize the in-progress annotation and refresh its validity.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let Some(id) = self.input.drawing_id() else {
            return Vec::new();
        };
        let Some(annotation) = self.store.get_mut(&id) else {
            self.input = InputState::Idle;
            return Vec::new();
        };
        annotation.resize_to(pt);
        let valid = self.check_in_progress();
        if let Some(annotation) = self.store.get_mut(&id) {
            annotation.valid = valid;
        }
        Vec::new()
    }

    /// Finish the gesture: finalize the annotation if it is valid at `pt`,
    /// otherwise drop it. Always returns to idle.
    pub fn on_pointer_up(&mut self, pt: Point) -> Vec<Action> {
        let InputState::Drawing { id } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        if let Some(annotation) = self.store.get_mut(&id) {
            self.swallow_click = pt != Point::new(annotation.x, annotation.y);
            annotation.resize_to(pt);
        }
        let accepted = self.store.get(&id).is_some_and(|a| self.is_valid(a));
        if !accepted {
            return self.discard(id);
        }

        let Some(annotation) = self.store.get_mut(&id) else {
            return Vec::new();
        };
        annotation.finalize();
        log::debug!(
            "annotation {id} finalized: {}x{} at ({}, {})",
            annotation.width,
            annotation.height,
            annotation.x,
            annotation.y
        );
        vec![Action::Finalized(annotation.clone())]
    }

    /// Drop the in-progress annotation, if any, and return to idle.
    pub fn cancel_drawing(&mut self) -> Vec<Action> {
        let InputState::Drawing { id } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        self.discard(id)
    }

    fn discard(&mut self, id: AnnotationId) -> Vec<Action> {
        if self.store.remove(&id).is_none() {
            return Vec::new();
        }
        log::debug!("annotation {id} discarded");
        vec![Action::Discarded { id }]
    }

    // --- Click gestures ---

    /// Delete the finalized annotation whose remove handle is under `pt`.
    ///
    /// The click that trails a drag gesture is ignored.
    pub fn on_click(&mut self, pt: Point) -> Vec<Action> {
        if std::mem::take(&mut self.swallow_click) {
            return Vec::new();
        }
        let Some(hit) = hit::hit_remove_handle(pt, &self.store, self.config.remove_handle_half) else {
            return Vec::new();
        };
        let Some(index) = self.store.index_of(&hit.id) else {
            return Vec::new();
        };
        self.store.remove(&hit.id);
        log::debug!("annotation {} deleted from index {index}", hit.id);
        vec![Action::Deleted { id: hit.id, index }]
    }

    /// Ask the host for a label for the finalized annotation under `pt`.
    pub fn on_double_click(&mut self, pt: Point) -> Vec<Action> {
        let Some(hit) = hit::hit_body(pt, &self.store) else {
            return Vec::new();
        };
        let current = self.store.get(&hit.id).map(|a| a.text.clone()).unwrap_or_default();
        vec![Action::LabelRequested { id: hit.id, current }]
    }

    /// Complete a label request. `None` (a cancelled prompt) clears the label.
    /// Unknown ids, e.g. an annotation deleted while the prompt was open, are ignored.
    pub fn set_label(&mut self, id: &AnnotationId, text: Option<String>) -> Vec<Action> {
        let Some(annotation) = self.store.get_mut(id) else {
            return Vec::new();
        };
        let text = text.unwrap_or_default();
        annotation.text.clone_from(&text);
        log::debug!("annotation {id} labeled {text:?}");
        vec![Action::LabelChanged { id: *id, text }]
    }

    /// Remove every annotation and abandon any gesture.
    pub fn clear(&mut self) {
        self.store.clear();
        self.input = InputState::Idle;
        self.swallow_click = false;
    }

    // --- Validity ---

    /// Validity of the in-progress annotation; `None` when nothing is being drawn.
    #[must_use]
    pub fn check_in_progress(&self) -> Option<bool> {
        let id = self.input.drawing_id()?;
        let candidate = self.store.get(&id)?;
        Some(self.is_valid(candidate))
    }

    fn is_valid(&self, candidate: &Annotation) -> bool {
        if candidate.width.abs() < self.config.min_width || candidate.height.abs() < self.config.min_height {
            return false;
        }
        let bounds = candidate.bounds();
        !self
            .store
            .finalized()
            .filter(|a| a.id != candidate.id)
            .any(|a| a.bounds().overlaps(&bounds))
    }

    // --- Queries ---

    /// The annotation currently being drawn, if any.
    #[must_use]
    pub fn in_progress(&self) -> Option<&Annotation> {
        self.input.drawing_id().and_then(|id| self.store.get(&id))
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        self.store.as_slice()
    }

    #[must_use]
    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.store.get(id)
    }

    /// Every annotation with its display index, in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AnnotationView> {
        self.store
            .iter()
            .enumerate()
            .map(|(index, a)| AnnotationView {
                index,
                id: a.id,
                x: a.x,
                y: a.y,
                width: a.width,
                height: a.height,
                done: a.done,
                text: a.text.clone(),
            })
            .collect()
    }
}

/// The full surface. Wraps `SurfaceCore` and owns the browser canvas element.
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    remove_icon: Option<HtmlImageElement>,
    pub core: SurfaceCore,
}

impl Surface {
    /// Bind a surface to `canvas` and prepare its 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::MissingContext`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, config: SurfaceConfig) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(SurfaceError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::MissingContext)?;
        ctx.set_font(&config.font);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        Ok(Self { canvas, ctx, remove_icon: None, core: SurfaceCore::with_config(config) })
    }

    /// Install the remove glyph once it has loaded.
    pub fn set_remove_icon(&mut self, image: HtmlImageElement) {
        self.remove_icon = Some(image);
    }

    pub fn handle(&mut self, event: PointerEvent) -> Vec<Action> {
        self.core.handle(event)
    }

    pub fn set_label(&mut self, id: &AnnotationId, text: Option<String>) -> Vec<Action> {
        self.core.set_label(id, text)
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ops = scene::build(
            &self.core.store,
            &self.core.config,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
            self.remove_icon.is_some(),
        );
        render::paint(&self.ctx, &ops, &self.core.config.font, self.remove_icon.as_ref())
    }
}
