#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{AnnotationId, AnnotationStore};
use crate::geom::{Bounds, Point};

/// Which part of an annotation was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The square remove handle on the start corner.
    RemoveHandle,
    /// Anywhere inside the rectangle, border included.
    Body,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: AnnotationId,
    pub part: HitPart,
}

/// Square remove handle around an annotation's start corner.
#[must_use]
pub fn remove_handle_bounds(bounds: &Bounds, half: f64) -> Bounds {
    Bounds::around(bounds.start, half)
}

/// First finalized annotation, in display order, whose remove handle contains `pt`.
#[must_use]
pub fn hit_remove_handle(pt: Point, store: &AnnotationStore, half: f64) -> Option<Hit> {
    store
        .finalized()
        .find(|a| remove_handle_bounds(&a.bounds(), half).contains(pt))
        .map(|a| Hit { id: a.id, part: HitPart::RemoveHandle })
}

/// First finalized annotation, in display order, whose rectangle contains `pt`.
#[must_use]
pub fn hit_body(pt: Point, store: &AnnotationStore) -> Option<Hit> {
    store
        .finalized()
        .find(|a| a.bounds().contains(pt))
        .map(|a| Hit { id: a.id, part: HitPart::Body })
}
