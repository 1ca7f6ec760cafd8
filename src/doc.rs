//! Document model: annotations and the ordered store that owns them.
//!
//! Each [`Annotation`] keeps a stable [`AnnotationId`] for its whole life.
//! The number shown to users is the *display index*, which is simply the
//! annotation's position in the [`AnnotationStore`]; deleting an entry shifts
//! the survivors down so display indices stay contiguous from zero without
//! rewriting any ids.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Bounds, Point};

/// Unique identifier for an annotation. Never reused.
pub type AnnotationId = Uuid;

/// A rectangular annotation on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    /// Anchor x, fixed at creation.
    pub x: f64,
    /// Anchor y, fixed at creation.
    pub y: f64,
    /// Signed horizontal extent from the anchor.
    pub width: f64,
    /// Signed vertical extent from the anchor.
    pub height: f64,
    /// `true` once finalized; geometry is frozen from then on.
    pub done: bool,
    /// Free-form label, empty when unlabeled.
    pub text: String,
    /// Result of the last validity check while drawing; `None` before the
    /// first move and after finalizing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl Annotation {
    /// A zero-sized, in-progress annotation anchored at `at`.
    #[must_use]
    pub fn start_at(at: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: at.x,
            y: at.y,
            width: 0.0,
            height: 0.0,
            done: false,
            text: String::new(),
            valid: None,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_anchor(self.x, self.y, self.width, self.height)
    }

    /// Stretch an in-progress annotation so its far corner sits at `to`.
    /// Finalized annotations are left alone.
    pub fn resize_to(&mut self, to: Point) {
        if self.done {
            return;
        }
        self.width = to.x - self.x;
        self.height = to.y - self.y;
    }

    /// Freeze the geometry and drop the transient validity flag.
    pub fn finalize(&mut self) {
        self.done = true;
        self.valid = None;
    }

    /// Whether the outline should be painted as invalid.
    #[must_use]
    pub fn is_marked_invalid(&self) -> bool {
        self.valid == Some(false)
    }
}

/// Ordered, single-owner collection of annotations.
///
/// Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    items: Vec<Annotation>,
}

impl AnnotationStore {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an annotation at the end of the display order.
    pub fn push(&mut self, annotation: Annotation) {
        self.items.push(annotation);
    }

    #[must_use]
    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.items.iter().find(|a| a.id == *id)
    }

    pub fn get_mut(&mut self, id: &AnnotationId) -> Option<&mut Annotation> {
        self.items.iter_mut().find(|a| a.id == *id)
    }

    /// Remove an annotation by id, returning it if it was present.
    pub fn remove(&mut self, id: &AnnotationId) -> Option<Annotation> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Display index of an annotation: its position in the store.
    #[must_use]
    pub fn index_of(&self, id: &AnnotationId) -> Option<usize> {
        self.items.iter().position(|a| a.id == *id)
    }

    /// All annotations in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter()
    }

    /// Finalized annotations in display order.
    pub fn finalized(&self) -> impl Iterator<Item = &Annotation> {
        self.items.iter().filter(|a| a.done)
    }

    /// Annotations as a slice, in display order.
    #[must_use]
    pub fn as_slice(&self) -> &[Annotation] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
