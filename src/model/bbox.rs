//! A single committed annotation box.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Unique identifier for an annotation box.
pub type BoxId = u64;

/// A committed rectangular annotation in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBox {
    /// Unique identity, stable for the box's lifetime.
    pub id: BoxId,
    /// Geometry in canvas coordinates. Never zero-area once committed.
    pub rect: Rect,
    /// Chosen label. `None` only for boxes a caller builds by hand;
    /// everything committed through the engine carries a label.
    pub label: Option<String>,
    /// Transient hover flag for the view layer (close-button visibility).
    /// Never reported externally.
    #[serde(skip)]
    pub highlighted: bool,
}

impl AnnotationBox {
    /// Create a new labeled box.
    pub fn new(id: BoxId, rect: Rect, label: impl Into<String>) -> Self {
        Self {
            id,
            rect,
            label: Some(label.into()),
            highlighted: false,
        }
    }
}
