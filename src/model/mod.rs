//! Data model: annotation boxes and their ordered registry.

mod bbox;
mod registry;

pub use bbox::{AnnotationBox, BoxId};
pub use registry::BoxRegistry;
