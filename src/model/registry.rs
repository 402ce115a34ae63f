//! Ordered storage for committed annotation boxes.

use crate::geometry::Rect;
use crate::model::{AnnotationBox, BoxId};

/// The ordered collection of committed boxes.
///
/// Insertion order is z-order and hit-test priority: the earliest-added box
/// is checked first. Identities are assigned monotonically and never
/// reused, even after removals.
#[derive(Debug, Clone, Default)]
pub struct BoxRegistry {
    boxes: Vec<AnnotationBox>,
    next_id: BoxId,
}

impl BoxRegistry {
    pub fn new() -> Self {
        Self {
            boxes: Vec::new(),
            next_id: 1,
        }
    }

    /// Commit a rectangle with its label, assigning a fresh identity.
    /// Returns the new box's id.
    pub fn add(&mut self, rect: Rect, label: impl Into<String>) -> BoxId {
        let id = self.next_id;
        self.next_id += 1;
        self.boxes.push(AnnotationBox::new(id, rect, label));
        id
    }

    /// Remove a box by identity. Returns `false` (a no-op, not an error)
    /// when no box has that id; the target may already be gone by the time
    /// a dismiss click lands.
    pub fn remove(&mut self, id: BoxId) -> bool {
        let before = self.boxes.len();
        self.boxes.retain(|b| b.id != id);
        self.boxes.len() != before
    }

    /// Replace the box with the given id by a mutated copy, leaving the
    /// others untouched and preserving order. No-op on an unknown id.
    pub fn update_where(
        &mut self,
        id: BoxId,
        mutate: impl FnOnce(AnnotationBox) -> AnnotationBox,
    ) -> bool {
        match self.boxes.iter().position(|b| b.id == id) {
            Some(index) => {
                let updated = mutate(self.boxes[index].clone());
                self.boxes[index] = updated;
                true
            }
            None => false,
        }
    }

    /// Remove every box. Identity assignment keeps counting.
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// Get a box by identity.
    pub fn get(&self, id: BoxId) -> Option<&AnnotationBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// All boxes in registry (z-) order.
    pub fn iter(&self) -> impl Iterator<Item = &AnnotationBox> {
        self.boxes.iter()
    }

    /// Box geometries in registry order, for hit-testing.
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.boxes.iter().map(|b| &b.rect)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
