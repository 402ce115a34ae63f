//! Embeddable bounding-box annotation engine.
//!
//! Lets a user draw, label, and reshape rectangular regions over a
//! displayed image using pointer input, and reports the finalized set of
//! boxes in the image's native pixel space whenever it changes.
//!
//! The crate is framework-free: a host forwards raw pointer events as
//! [`AnnotatorEvent`]s into [`Annotator::handle`] and implements
//! [`AnnotatorHost`] to receive change notifications and focus requests.
//! Rendering, the label-input widget, and image loading live entirely in
//! the embedding application.
//!
//! ```
//! use annotator_core::{Annotator, AnnotatorEvent, AnnotatorHost, NaturalBox, ScaleContext};
//!
//! struct PrintHost;
//!
//! impl AnnotatorHost for PrintHost {
//!     fn boxes_changed(&mut self, boxes: &[NaturalBox]) {
//!         println!("{} boxes", boxes.len());
//!     }
//! }
//!
//! // 400x200 image rendered 200px wide at page origin (0, 0)
//! let scale = ScaleContext::new(400, 200, 200.0, (0.0, 0.0))?;
//! let mut annotator = Annotator::new(scale, vec!["cat".into()], Box::new(PrintHost));
//!
//! annotator.handle(AnnotatorEvent::PointerDown { x: 10.0, y: 10.0, primary: true });
//! annotator.handle(AnnotatorEvent::PointerMove { x: 50.0, y: 30.0 });
//! annotator.handle(AnnotatorEvent::PointerUp { x: 50.0, y: 30.0 });
//! annotator.handle(AnnotatorEvent::LabelResolved(Some("cat".into())));
//! # Ok::<(), annotator_core::EngineError>(())
//! ```

mod constants;
mod engine;
mod error;
mod event;
mod geometry;
mod host;
mod model;
mod transform;

pub use constants::{HIT_MARGIN, MIN_BOX_SIZE};
pub use engine::{Annotator, Mode};
pub use error::EngineError;
pub use event::AnnotatorEvent;
pub use geometry::{classify, CursorHint, Hit, Point, Rect, Zone};
pub use host::AnnotatorHost;
pub use model::{AnnotationBox, BoxId, BoxRegistry};
pub use transform::{NaturalBox, ScaleContext};
