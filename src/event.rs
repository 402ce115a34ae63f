//! Input events consumed by the annotation engine.
//!
//! Every external stimulus is one variant of a closed tagged union, fed to
//! a single dispatch function ([`crate::Annotator::handle`]).

use crate::model::BoxId;

/// An event delivered to the engine by the host surface.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotatorEvent {
    /// Pointer pressed at page coordinates. `primary` is false for
    /// secondary/context clicks, which never start a drag.
    PointerDown { x: f32, y: f32, primary: bool },
    /// Pointer moved to page coordinates.
    PointerMove { x: f32, y: f32 },
    /// Pointer released at page coordinates.
    PointerUp { x: f32, y: f32 },
    /// The label-input collaborator resolved: `Some(label)` commits the
    /// pending box, `None` means it was dismissed without a choice.
    LabelResolved(Option<String>),
    /// Explicit delete request for one box (dismiss control). Valid in any
    /// state; unknown ids are ignored.
    CloseBox(BoxId),
    /// External reset: clear every box and return to idle.
    Reset,
}
