//! The interactive box-editing state machine.
//!
//! Owns the current interaction mode, the pointer/anchor tracking, the box
//! registry, and the scale context. Every external stimulus arrives as an
//! [`AnnotatorEvent`] through [`Annotator::handle`]; every committing
//! mutation pushes a natural-space snapshot to the host.

use crate::event::AnnotatorEvent;
use crate::geometry::{classify, CursorHint, Point, Rect, Zone};
use crate::host::AnnotatorHost;
use crate::model::{AnnotationBox, BoxId, BoxRegistry};
use crate::transform::{NaturalBox, ScaleContext};

/// The interaction mode the engine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Idle, no box under construction.
    #[default]
    Free,
    /// A new box is being sized from an anchor/current pointer pair.
    Dragging,
    /// Drag complete, temp box frozen, waiting on the label collaborator.
    AwaitingLabel,
    /// An existing box is being resized or moved; the captured [`Zone`]
    /// decides which edges follow the pointer.
    Adjusting,
}

/// The box grabbed by a pointer-down, and where it was grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTarget {
    id: BoxId,
    zone: Zone,
}

/// The annotation engine.
///
/// Single-threaded and event-driven: all transitions happen synchronously
/// inside [`Annotator::handle`]. Construction of the [`ScaleContext`] is
/// where initialization can fail ([`crate::EngineError::InvalidImage`]);
/// the embedding application surfaces that and may retry with a different
/// image.
pub struct Annotator {
    registry: BoxRegistry,
    scale: ScaleContext,
    labels: Vec<String>,
    mode: Mode,
    /// Where the current drag/resize sample started, clamped. During
    /// `Adjusting` this is the previous sample point, updated every move.
    anchor: Option<Point>,
    /// Latest clamped pointer position of the current drag.
    pointer: Option<Point>,
    target: Option<ActiveTarget>,
    host: Box<dyn AnnotatorHost>,
}

impl Annotator {
    /// Create an engine over a measured canvas.
    ///
    /// `labels` is the fixed vocabulary offered to the label collaborator;
    /// resolved labels are trusted, not validated against it. Fires one
    /// initial (empty) change notification so the embedder starts from a
    /// known snapshot.
    pub fn new(
        scale: ScaleContext,
        labels: Vec<String>,
        host: Box<dyn AnnotatorHost>,
    ) -> Self {
        let mut engine = Self {
            registry: BoxRegistry::new(),
            scale,
            labels,
            mode: Mode::Free,
            anchor: None,
            pointer: None,
            target: None,
            host,
        };
        engine.notify();
        engine
    }

    /// Dispatch one event through the state machine.
    pub fn handle(&mut self, event: AnnotatorEvent) {
        match event {
            AnnotatorEvent::PointerDown { x, y, primary } => self.on_pointer_down(x, y, primary),
            AnnotatorEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            AnnotatorEvent::PointerUp { x, y } => self.on_pointer_up(x, y),
            AnnotatorEvent::LabelResolved(label) => self.on_label_resolved(label),
            AnnotatorEvent::CloseBox(id) => self.on_close_box(id),
            AnnotatorEvent::Reset => self.on_reset(),
        }
    }

    fn on_pointer_down(&mut self, x: f32, y: f32, primary: bool) {
        let p = self.scale.to_canvas(x, y);

        // A press on an existing box always grabs it for adjustment, even
        // while an unlabeled temp box is pending (which silently drops it).
        if let Some(hit) = classify(self.registry.rects(), p) {
            let id = self
                .registry
                .iter()
                .nth(hit.index)
                .map(|b| b.id)
                .unwrap_or_default();
            log::debug!("✏️ Grabbed box {} at {:?} ({:?})", id, p, hit.zone);
            self.target = Some(ActiveTarget { id, zone: hit.zone });
            self.anchor = Some(p);
            self.pointer = Some(p);
            self.mode = Mode::Adjusting;
            return;
        }

        // Empty space: start a new drag, superseding any pending temp box.
        // Secondary/context clicks never start one.
        if matches!(self.mode, Mode::Free | Mode::AwaitingLabel) && primary {
            log::debug!("✏️ Started box drag at {:?}", p);
            self.anchor = Some(p);
            self.pointer = Some(p);
            self.mode = Mode::Dragging;
        }
    }

    fn on_pointer_move(&mut self, x: f32, y: f32) {
        match self.mode {
            Mode::Dragging => {
                self.pointer = Some(self.scale.to_canvas(x, y));
            }
            Mode::Adjusting => {
                let p = self.scale.to_canvas(x, y);
                self.apply_adjust(p);
            }
            // Moves with no drag/resize active are no-ops.
            Mode::Free | Mode::AwaitingLabel => {}
        }
    }

    fn on_pointer_up(&mut self, x: f32, y: f32) {
        match self.mode {
            Mode::Dragging => {
                self.pointer = Some(self.scale.to_canvas(x, y));
                self.mode = Mode::AwaitingLabel;
                log::debug!("✏️ Drag complete, awaiting label: {:?}", self.temp_box());
                self.host.focus_label_input();
            }
            Mode::Adjusting => {
                let p = self.scale.to_canvas(x, y);
                self.apply_adjust(p);
                self.target = None;
                self.mode = Mode::Free;
            }
            Mode::Free | Mode::AwaitingLabel => {}
        }
    }

    /// Apply one resize/move sample: the delta since the previous clamped
    /// point goes to the grabbed box per its zone, and the sample point
    /// becomes the new reference. Notifies on every sample.
    fn apply_adjust(&mut self, p: Point) {
        let Some(prev) = self.anchor.replace(p) else {
            return;
        };
        let Some(target) = self.target else {
            return;
        };
        let dx = p.x - prev.x;
        let dy = p.y - prev.y;
        self.registry.update_where(target.id, |mut boxed| {
            boxed.rect = boxed.rect.adjusted(target.zone, dx, dy);
            boxed
        });
        self.notify();
    }

    fn on_label_resolved(&mut self, label: Option<String>) {
        if self.mode != Mode::AwaitingLabel {
            return;
        }
        let Some(label) = label else {
            // Dismissed without a choice: the frozen temp box stays until
            // the next pointer-down supersedes it.
            log::debug!("Label input dismissed, temp box kept pending");
            return;
        };
        // A zero-area rect can't come out of a drag (width/height carry
        // +1), but if one ever did, committing it would be wrong; drop it
        // silently instead.
        if let Some(rect) = self.temp_box().filter(|r| r.width > 0.0 && r.height > 0.0) {
            let id = self.registry.add(rect, label.clone());
            log::info!("✅ Committed box {} '{}' {:?}", id, label, rect);
        }
        self.anchor = None;
        self.pointer = None;
        self.mode = Mode::Free;
        self.notify();
    }

    fn on_close_box(&mut self, id: BoxId) {
        // Valid in any mode; the box may already be gone (e.g. a dismiss
        // click racing an external reset), which is a no-op.
        if self.registry.remove(id) {
            log::info!("🗑️ Closed box {}", id);
            self.notify();
        }
    }

    fn on_reset(&mut self) {
        self.registry.clear();
        self.anchor = None;
        self.pointer = None;
        self.target = None;
        self.mode = Mode::Free;
        log::info!("🔄 Annotator reset");
        self.notify();
    }

    /// Project the registry to natural space and push it to the host.
    fn notify(&mut self) {
        let snapshot: Vec<NaturalBox> = self
            .registry
            .iter()
            .map(|b| self.scale.to_natural(b))
            .collect();
        self.host.boxes_changed(&snapshot);
    }

    // ------------------------------------------------------------------
    // View-layer queries
    // ------------------------------------------------------------------

    /// Current interaction mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Committed boxes in z-order, for rendering.
    pub fn boxes(&self) -> impl Iterator<Item = &AnnotationBox> {
        self.registry.iter()
    }

    /// The in-progress rectangle, recomputed from the anchor and current
    /// pointer. Present only while dragging or awaiting a label.
    pub fn temp_box(&self) -> Option<Rect> {
        if !matches!(self.mode, Mode::Dragging | Mode::AwaitingLabel) {
            return None;
        }
        match (self.anchor, self.pointer) {
            (Some(anchor), Some(current)) => Some(Rect::from_corners(anchor, current)),
            _ => None,
        }
    }

    /// The label vocabulary offered to the label-input collaborator.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The scale context the engine was built with.
    pub fn scale(&self) -> &ScaleContext {
        &self.scale
    }

    /// Current snapshot in natural image pixels, identical to what the
    /// last change notification carried.
    pub fn natural_boxes(&self) -> Vec<NaturalBox> {
        self.registry.iter().map(|b| self.scale.to_natural(b)).collect()
    }

    /// Cursor the view layer should show for a hovered page position.
    pub fn cursor_hint(&self, x: f32, y: f32) -> CursorHint {
        let p = self.scale.to_canvas(x, y);
        classify(self.registry.rects(), p)
            .map(|hit| hit.zone.cursor_hint())
            .unwrap_or_default()
    }

    /// Toggle the hover highlight (close-button visibility) on a box.
    /// Transient view state: unknown ids are ignored and no change
    /// notification fires.
    pub fn set_highlight(&mut self, id: BoxId, highlighted: bool) {
        self.registry.update_where(id, |mut boxed| {
            boxed.highlighted = highlighted;
            boxed
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Host double that records every snapshot and focus request.
    #[derive(Default)]
    struct RecordingHost {
        snapshots: Rc<RefCell<Vec<Vec<NaturalBox>>>>,
        focus_calls: Rc<RefCell<usize>>,
    }

    impl AnnotatorHost for RecordingHost {
        fn boxes_changed(&mut self, boxes: &[NaturalBox]) {
            self.snapshots.borrow_mut().push(boxes.to_vec());
        }

        fn focus_label_input(&mut self) {
            *self.focus_calls.borrow_mut() += 1;
        }
    }

    type Recorded = (
        Annotator,
        Rc<RefCell<Vec<Vec<NaturalBox>>>>,
        Rc<RefCell<usize>>,
    );

    /// Engine over a 200x100 canvas with multiplier 1.
    fn unscaled_annotator() -> Recorded {
        let host = RecordingHost::default();
        let snapshots = Rc::clone(&host.snapshots);
        let focus = Rc::clone(&host.focus_calls);
        let scale = ScaleContext::new(200, 100, 200.0, (0.0, 0.0)).unwrap();
        let engine = Annotator::new(scale, vec!["cat".into(), "dog".into()], Box::new(host));
        (engine, snapshots, focus)
    }

    fn drag(engine: &mut Annotator, from: (f32, f32), to: (f32, f32)) {
        engine.handle(AnnotatorEvent::PointerDown {
            x: from.0,
            y: from.1,
            primary: true,
        });
        engine.handle(AnnotatorEvent::PointerMove { x: to.0, y: to.1 });
        engine.handle(AnnotatorEvent::PointerUp { x: to.0, y: to.1 });
    }

    #[test]
    fn test_initial_notification_is_empty() {
        let (_engine, snapshots, _) = unscaled_annotator();
        assert_eq!(snapshots.borrow().len(), 1);
        assert!(snapshots.borrow()[0].is_empty());
    }

    #[test]
    fn test_drag_label_commit_flow() {
        let (mut engine, snapshots, focus) = unscaled_annotator();

        drag(&mut engine, (10.0, 10.0), (50.0, 30.0));
        assert_eq!(engine.mode(), Mode::AwaitingLabel);
        assert_eq!(*focus.borrow(), 1);
        assert_eq!(engine.temp_box(), Some(Rect::new(10.0, 10.0, 41.0, 21.0)));
        // Nothing committed yet
        assert_eq!(snapshots.borrow().len(), 1);

        engine.handle(AnnotatorEvent::LabelResolved(Some("cat".into())));
        assert_eq!(engine.mode(), Mode::Free);
        assert_eq!(engine.temp_box(), None);

        let last = snapshots.borrow().last().unwrap().clone();
        assert_eq!(
            last,
            vec![NaturalBox {
                left: 10,
                top: 10,
                width: 41,
                height: 21,
                label: "cat".into(),
            }]
        );
    }

    #[test]
    fn test_reverse_drag_normalizes() {
        let (mut engine, _, _) = unscaled_annotator();
        drag(&mut engine, (50.0, 30.0), (10.0, 10.0));
        assert_eq!(engine.temp_box(), Some(Rect::new(10.0, 10.0, 41.0, 21.0)));
    }

    #[test]
    fn test_zero_drag_click_yields_unit_box() {
        let (mut engine, _, _) = unscaled_annotator();
        drag(&mut engine, (30.0, 30.0), (30.0, 30.0));
        engine.handle(AnnotatorEvent::LabelResolved(Some("dog".into())));
        let boxes: Vec<_> = engine.boxes().collect();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].rect, Rect::new(30.0, 30.0, 1.0, 1.0));
    }

    #[test]
    fn test_secondary_click_does_not_start_drag() {
        let (mut engine, _, _) = unscaled_annotator();
        engine.handle(AnnotatorEvent::PointerDown {
            x: 10.0,
            y: 10.0,
            primary: false,
        });
        assert_eq!(engine.mode(), Mode::Free);
    }

    #[test]
    fn test_move_and_up_without_drag_are_noops() {
        let (mut engine, snapshots, _) = unscaled_annotator();
        engine.handle(AnnotatorEvent::PointerMove { x: 50.0, y: 50.0 });
        engine.handle(AnnotatorEvent::PointerUp { x: 50.0, y: 50.0 });
        assert_eq!(engine.mode(), Mode::Free);
        assert_eq!(snapshots.borrow().len(), 1);
    }

    #[test]
    fn test_label_cancel_keeps_waiting() {
        let (mut engine, snapshots, _) = unscaled_annotator();
        drag(&mut engine, (10.0, 10.0), (50.0, 30.0));

        engine.handle(AnnotatorEvent::LabelResolved(None));
        // No explicit cancel path: the frozen temp box stays pending.
        assert_eq!(engine.mode(), Mode::AwaitingLabel);
        assert!(engine.temp_box().is_some());
        assert_eq!(snapshots.borrow().len(), 1);
    }

    #[test]
    fn test_new_drag_supersedes_pending_temp_box() {
        let (mut engine, snapshots, _) = unscaled_annotator();
        drag(&mut engine, (10.0, 10.0), (50.0, 30.0));
        assert_eq!(engine.mode(), Mode::AwaitingLabel);

        // Starting a new drag silently drops the unlabeled box.
        engine.handle(AnnotatorEvent::PointerDown {
            x: 150.0,
            y: 80.0,
            primary: true,
        });
        assert_eq!(engine.mode(), Mode::Dragging);
        assert_eq!(engine.temp_box(), Some(Rect::new(150.0, 80.0, 1.0, 1.0)));

        // A late resolution from the old label prompt commits nothing
        // while the new drag is in flight.
        engine.handle(AnnotatorEvent::LabelResolved(Some("cat".into())));
        assert_eq!(engine.mode(), Mode::Dragging);
        assert_eq!(engine.boxes().count(), 0);
        assert_eq!(snapshots.borrow().len(), 1);
    }

    #[test]
    fn test_drag_tracks_clamped_outside_canvas() {
        let (mut engine, _, _) = unscaled_annotator();
        engine.handle(AnnotatorEvent::PointerDown {
            x: 180.0,
            y: 80.0,
            primary: true,
        });
        // Pointer leaves the canvas; clamping keeps the drag alive.
        engine.handle(AnnotatorEvent::PointerMove { x: 500.0, y: 500.0 });
        assert_eq!(engine.mode(), Mode::Dragging);
        assert_eq!(engine.temp_box(), Some(Rect::new(180.0, 80.0, 20.0, 20.0)));
    }

    /// Seed a committed box directly, bypassing the drag flow.
    fn seed_box(engine: &mut Annotator, rect: Rect, label: &str) -> BoxId {
        let id = engine.registry.add(rect, label);
        engine.notify();
        id
    }

    #[test]
    fn test_move_inside_translates_and_notifies_each_sample() {
        let (mut engine, snapshots, _) = unscaled_annotator();
        let id = seed_box(&mut engine, Rect::new(50.0, 50.0, 60.0, 40.0), "cat");
        let before = snapshots.borrow().len();

        // Interior grab at the center
        engine.handle(AnnotatorEvent::PointerDown {
            x: 80.0,
            y: 70.0,
            primary: true,
        });
        assert_eq!(engine.mode(), Mode::Adjusting);

        engine.handle(AnnotatorEvent::PointerMove { x: 85.0, y: 75.0 });
        engine.handle(AnnotatorEvent::PointerMove { x: 90.0, y: 72.0 });
        engine.handle(AnnotatorEvent::PointerUp { x: 90.0, y: 72.0 });
        assert_eq!(engine.mode(), Mode::Free);

        // One notification per move sample plus the final up
        assert_eq!(snapshots.borrow().len(), before + 3);

        let boxed = engine.registry.get(id).unwrap();
        assert_eq!(boxed.rect, Rect::new(60.0, 52.0, 60.0, 40.0));
    }

    #[test]
    fn test_resize_bottom_right_corner() {
        let (mut engine, _, _) = unscaled_annotator();
        let id = seed_box(&mut engine, Rect::new(50.0, 50.0, 60.0, 40.0), "cat");

        engine.handle(AnnotatorEvent::PointerDown {
            x: 110.0,
            y: 90.0,
            primary: true,
        });
        engine.handle(AnnotatorEvent::PointerMove { x: 120.0, y: 95.0 });
        engine.handle(AnnotatorEvent::PointerUp { x: 120.0, y: 95.0 });

        let boxed = engine.registry.get(id).unwrap();
        // Only width/height grow; left/top stay put
        assert_eq!(boxed.rect, Rect::new(50.0, 50.0, 70.0, 45.0));
    }

    #[test]
    fn test_resize_never_collapses_below_min_size() {
        let (mut engine, _, _) = unscaled_annotator();
        let id = seed_box(&mut engine, Rect::new(50.0, 50.0, 60.0, 40.0), "cat");

        // Drag the right edge far past the left one
        engine.handle(AnnotatorEvent::PointerDown {
            x: 110.0,
            y: 70.0,
            primary: true,
        });
        engine.handle(AnnotatorEvent::PointerMove { x: 0.0, y: 70.0 });
        engine.handle(AnnotatorEvent::PointerUp { x: 0.0, y: 70.0 });

        let boxed = engine.registry.get(id).unwrap();
        assert!(boxed.rect.width >= 1.0);
        assert_eq!(boxed.rect.left, 50.0);
    }

    #[test]
    fn test_overlapping_boxes_first_created_wins() {
        let (mut engine, _, _) = unscaled_annotator();
        let first = seed_box(&mut engine, Rect::new(40.0, 40.0, 60.0, 50.0), "cat");
        let second = seed_box(&mut engine, Rect::new(60.0, 60.0, 60.0, 30.0), "dog");

        // Shared interior point: the earliest-created box takes the grab.
        engine.handle(AnnotatorEvent::PointerDown {
            x: 70.0,
            y: 65.0,
            primary: true,
        });
        engine.handle(AnnotatorEvent::PointerMove { x: 75.0, y: 65.0 });
        engine.handle(AnnotatorEvent::PointerUp { x: 75.0, y: 65.0 });

        assert_eq!(engine.registry.get(second).unwrap().rect.left, 60.0);
        assert_ne!(engine.registry.get(first).unwrap().rect.left, 40.0);
    }

    #[test]
    fn test_grab_during_awaiting_label_drops_temp_box() {
        let (mut engine, _, _) = unscaled_annotator();
        seed_box(&mut engine, Rect::new(50.0, 50.0, 60.0, 40.0), "cat");

        drag(&mut engine, (150.0, 10.0), (180.0, 30.0));
        assert_eq!(engine.mode(), Mode::AwaitingLabel);

        engine.handle(AnnotatorEvent::PointerDown {
            x: 80.0,
            y: 70.0,
            primary: true,
        });
        assert_eq!(engine.mode(), Mode::Adjusting);
        assert_eq!(engine.temp_box(), None);
    }

    #[test]
    fn test_close_box_removes_and_notifies() {
        let (mut engine, snapshots, _) = unscaled_annotator();
        let id = seed_box(&mut engine, Rect::new(50.0, 50.0, 60.0, 40.0), "cat");
        let before = snapshots.borrow().len();

        engine.handle(AnnotatorEvent::CloseBox(id));
        assert_eq!(engine.boxes().count(), 0);
        assert_eq!(snapshots.borrow().len(), before + 1);
        assert!(snapshots.borrow().last().unwrap().is_empty());
    }

    #[test]
    fn test_close_unknown_box_is_silent() {
        let (mut engine, snapshots, _) = unscaled_annotator();
        seed_box(&mut engine, Rect::new(50.0, 50.0, 60.0, 40.0), "cat");
        let before = snapshots.borrow().len();

        engine.handle(AnnotatorEvent::CloseBox(12345));
        assert_eq!(engine.boxes().count(), 1);
        assert_eq!(snapshots.borrow().len(), before);
    }

    #[test]
    fn test_reset_always_notifies_empty() {
        let (mut engine, snapshots, _) = unscaled_annotator();
        seed_box(&mut engine, Rect::new(50.0, 50.0, 60.0, 40.0), "cat");

        // Reset mid-drag: registry empties and the drag is torn down too.
        engine.handle(AnnotatorEvent::PointerDown {
            x: 150.0,
            y: 10.0,
            primary: true,
        });
        engine.handle(AnnotatorEvent::Reset);

        assert_eq!(engine.mode(), Mode::Free);
        assert_eq!(engine.boxes().count(), 0);
        assert!(snapshots.borrow().last().unwrap().is_empty());

        // Reset when already empty still notifies once.
        let before = snapshots.borrow().len();
        engine.handle(AnnotatorEvent::Reset);
        assert_eq!(snapshots.borrow().len(), before + 1);
    }

    #[test]
    fn test_highlight_is_transient_and_silent() {
        let (mut engine, snapshots, _) = unscaled_annotator();
        let id = seed_box(&mut engine, Rect::new(50.0, 50.0, 60.0, 40.0), "cat");
        let before = snapshots.borrow().len();

        engine.set_highlight(id, true);
        assert!(engine.registry.get(id).unwrap().highlighted);
        engine.set_highlight(id, false);
        assert!(!engine.registry.get(id).unwrap().highlighted);

        engine.set_highlight(999, true); // unknown id ignored
        assert_eq!(snapshots.borrow().len(), before);
    }

    #[test]
    fn test_cursor_hint_follows_zone() {
        let (mut engine, _, _) = unscaled_annotator();
        seed_box(&mut engine, Rect::new(50.0, 50.0, 100.0, 40.0), "cat");

        assert_eq!(engine.cursor_hint(100.0, 70.0), CursorHint::Move);
        assert_eq!(engine.cursor_hint(50.0, 50.0), CursorHint::ResizeNwSe);
        assert_eq!(engine.cursor_hint(150.0, 90.0), CursorHint::ResizeNwSe);
        assert_eq!(engine.cursor_hint(150.0, 50.0), CursorHint::ResizeNeSw);
        assert_eq!(engine.cursor_hint(50.0, 70.0), CursorHint::ResizeEw);
        assert_eq!(engine.cursor_hint(100.0, 50.0), CursorHint::ResizeNs);
        assert_eq!(engine.cursor_hint(10.0, 10.0), CursorHint::Default);
    }

    #[test]
    fn test_labels_exposed_unvalidated() {
        let (mut engine, _, _) = unscaled_annotator();
        assert_eq!(engine.labels(), ["cat", "dog"]);

        // A label outside the vocabulary is trusted and committed as-is.
        drag(&mut engine, (10.0, 10.0), (20.0, 20.0));
        engine.handle(AnnotatorEvent::LabelResolved(Some("zebra".into())));
        assert_eq!(engine.natural_boxes()[0].label, "zebra");
    }
}
