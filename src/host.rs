//! The boundary between the engine and whatever embeds it.

use crate::transform::NaturalBox;

/// Callbacks the embedding application implements.
///
/// The engine never touches a rendering or event system itself; the host
/// forwards raw pointer events in (see [`crate::AnnotatorEvent`]) and
/// receives these notifications out. All calls are synchronous, on the one
/// logical thread driving the engine.
pub trait AnnotatorHost {
    /// Fired after every committing mutation with the full ordered snapshot
    /// of boxes in natural image pixels. Not debounced: resize/move fire on
    /// every pointer sample.
    fn boxes_changed(&mut self, boxes: &[NaturalBox]);

    /// Fired when a drag completes and the engine starts waiting on the
    /// label-input collaborator; the host should focus its label widget.
    fn focus_label_input(&mut self) {}
}
