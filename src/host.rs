//! Browser host: mounts a [`Surface`] on a `<canvas>` and drives it.
//!
//! The host wires DOM mouse events into [`Surface::handle`], runs the render
//! tick on a fixed `gloo_timers` interval, loads the remove glyph in the
//! background, and resolves label requests asynchronously. With a labeler
//! installed via `setLabeler` the tick keeps running while the page collects
//! the label. The `window.prompt` fallback is modal and pauses the whole
//! page, tick included, until it is answered.
//!
//! Everything runs on the single browser event loop. The surface sits in an
//! `Rc<RefCell<_>>`; no borrow is ever held across an `.await`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlCanvasElement, HtmlImageElement, MouseEvent};

use crate::config::SurfaceConfig;
use crate::doc::AnnotationId;
use crate::engine::{Action, Surface};
use crate::error::SurfaceError;
use crate::geom::Point;
use crate::input::PointerEvent;

const LABEL_PROMPT: &str = "Input text";

#[cfg(feature = "console")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log::warn!("console logger not installed: {err}");
    }
}

type SharedSurface = Rc<RefCell<Surface>>;
type SharedLabeler = Rc<RefCell<Option<js_sys::Function>>>;

struct Listener {
    kind: &'static str,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

/// JS handle for a mounted annotation surface.
///
/// Dropping the handle (or calling `unmount`) stops the render tick and
/// detaches every listener.
#[wasm_bindgen]
pub struct AnnotationSurface {
    canvas: HtmlCanvasElement,
    surface: SharedSurface,
    labeler: SharedLabeler,
    listeners: Vec<Listener>,
    ticker: Option<Interval>,
}

#[wasm_bindgen]
impl AnnotationSurface {
    /// Mount on the canvas with id `canvas_id`. `config_json` is an optional
    /// JSON object overriding [`SurfaceConfig`] defaults.
    ///
    /// # Errors
    ///
    /// Fails if the canvas is missing, has no 2D context, or the config is invalid.
    #[wasm_bindgen(constructor)]
    pub fn mount(canvas_id: &str, config_json: Option<String>) -> Result<AnnotationSurface, JsValue> {
        Ok(Self::try_mount(canvas_id, config_json.as_deref())?)
    }

    /// Install an async labeler: a function `(current: string) => Promise<string | null>`.
    /// Without one, the blocking `window.prompt` is used.
    #[wasm_bindgen(js_name = setLabeler)]
    pub fn set_labeler(&self, labeler: Option<js_sys::Function>) {
        *self.labeler.borrow_mut() = labeler;
    }

    /// Number of annotations currently on the surface.
    pub fn count(&self) -> usize {
        self.surface.borrow().core.annotations().len()
    }

    /// JSON array of annotations with their display indices.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    #[wasm_bindgen(js_name = annotationsJson)]
    pub fn annotations_json(&self) -> Result<String, JsValue> {
        let snapshot = self.surface.borrow().core.snapshot();
        Ok(serde_json::to_string(&snapshot).map_err(SurfaceError::Encode)?)
    }

    /// Remove every annotation.
    pub fn clear(&self) {
        self.surface.borrow_mut().clear();
    }

    /// Stop rendering and detach from the canvas.
    pub fn unmount(&mut self) {
        self.ticker.take();
        for listener in self.listeners.drain(..) {
            if let Err(err) = self
                .canvas
                .remove_event_listener_with_callback(listener.kind, listener.closure.as_ref().unchecked_ref())
            {
                log::warn!("failed to detach {} listener: {err:?}", listener.kind);
            }
        }
        log::info!("annotation surface unmounted");
    }
}

impl Drop for AnnotationSurface {
    fn drop(&mut self) {
        if self.ticker.is_some() || !self.listeners.is_empty() {
            self.unmount();
        }
    }
}

impl AnnotationSurface {
    fn try_mount(canvas_id: &str, config_json: Option<&str>) -> Result<Self, SurfaceError> {
        let config = match config_json {
            Some(raw) => SurfaceConfig::from_json(raw)?,
            None => SurfaceConfig::default(),
        };
        let window = web_sys::window().ok_or(SurfaceError::MissingWindow)?;
        let document = window.document().ok_or(SurfaceError::MissingWindow)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SurfaceError::MissingCanvas(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::MissingCanvas(canvas_id.to_owned()))?;

        let interval_ms = config.frame_interval_ms();
        let icon_url = config.remove_icon_url.clone();
        let surface = Rc::new(RefCell::new(Surface::new(canvas.clone(), config)?));
        let labeler: SharedLabeler = Rc::new(RefCell::new(None));

        let listeners = attach_listeners(&canvas, &surface, &labeler)?;
        let ticker = start_ticker(&surface, interval_ms);
        spawn_icon_load(Rc::downgrade(&surface), icon_url);

        log::info!("annotation surface mounted on #{canvas_id} at {interval_ms}ms/frame");
        Ok(Self { canvas, surface, labeler, listeners, ticker: Some(ticker) })
    }
}

// =============================================================
// Input wiring
// =============================================================

fn attach_listeners(
    canvas: &HtmlCanvasElement,
    surface: &SharedSurface,
    labeler: &SharedLabeler,
) -> Result<Vec<Listener>, SurfaceError> {
    let bindings: [(&'static str, fn(Point) -> PointerEvent); 6] = [
        ("mousedown", PointerEvent::Down),
        ("mousemove", PointerEvent::Move),
        ("mouseup", PointerEvent::Up),
        ("mouseleave", |_| PointerEvent::Leave),
        ("click", PointerEvent::Click),
        ("dblclick", PointerEvent::DoubleClick),
    ];

    let mut listeners = Vec::with_capacity(bindings.len());
    for (kind, to_event) in bindings {
        let surface = Rc::clone(surface);
        let labeler = Rc::clone(labeler);
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            let pt = Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()));
            let actions = surface.borrow_mut().handle(to_event(pt));
            dispatch(&surface, &labeler, actions);
        });
        canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        listeners.push(Listener { kind, closure });
    }
    Ok(listeners)
}

fn dispatch(surface: &SharedSurface, labeler: &SharedLabeler, actions: Vec<Action>) {
    for action in actions {
        if let Action::LabelRequested { id, current } = action {
            let labeler = labeler.borrow().clone();
            spawn_local(request_label(Rc::downgrade(surface), labeler, id, current));
        }
    }
}

// =============================================================
// Labels
// =============================================================

async fn request_label(
    surface: Weak<RefCell<Surface>>,
    labeler: Option<js_sys::Function>,
    id: AnnotationId,
    current: String,
) {
    let text = match ask_label(labeler.as_ref(), &current).await {
        Ok(text) => text,
        Err(err) => {
            log::warn!("label request for {id} failed: {err}");
            return;
        }
    };
    if let Some(surface) = surface.upgrade() {
        surface.borrow_mut().set_label(&id, text);
    }
}

async fn ask_label(labeler: Option<&js_sys::Function>, current: &str) -> Result<Option<String>, SurfaceError> {
    match labeler {
        Some(f) => {
            let returned = f.call1(&JsValue::NULL, &JsValue::from_str(current))?;
            let value = JsFuture::from(js_sys::Promise::resolve(&returned)).await?;
            Ok(value.as_string())
        }
        None => {
            let window = web_sys::window().ok_or(SurfaceError::MissingWindow)?;
            Ok(window.prompt_with_message(LABEL_PROMPT)?)
        }
    }
}

// =============================================================
// Render tick and assets
// =============================================================

fn start_ticker(surface: &SharedSurface, interval_ms: u32) -> Interval {
    let surface = Rc::clone(surface);
    Interval::new(interval_ms, move || {
        if let Err(err) = surface.borrow().render() {
            log::warn!("render failed: {err:?}");
        }
    })
}

fn spawn_icon_load(surface: Weak<RefCell<Surface>>, url: String) {
    spawn_local(async move {
        match load_image(&url).await {
            Ok(image) => {
                if let Some(surface) = surface.upgrade() {
                    surface.borrow_mut().set_remove_icon(image);
                    log::debug!("remove glyph loaded from {url}");
                }
            }
            Err(err) => log::debug!("remove glyph unavailable ({url}): {err}"),
        }
    });
}

async fn load_image(src: &str) -> Result<HtmlImageElement, SurfaceError> {
    let image = HtmlImageElement::new()?;
    image.set_src(src);
    JsFuture::from(image.decode()).await?;
    Ok(image)
}
