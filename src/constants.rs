//! Global constants for the annotation engine

/// Proximity band for corner/edge hit detection, in canvas pixels.
///
/// A pointer within this distance of a corner or edge midpoint grabs the
/// corresponding handle. Fixed, independent of box size.
pub const HIT_MARGIN: f32 = 20.0;

/// Minimum width/height a box may be resized down to, in canvas pixels.
pub const MIN_BOX_SIZE: f32 = 1.0;
