//! Coordinate-space transform between the rendered canvas and the image's
//! natural resolution.
//!
//! The canvas may show the image scaled down; one scalar multiplier
//! (`natural_width / rendered_width`, aspect ratio preserved) converts
//! rendered lengths back to natural pixels for external reporting.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::geometry::Point;
use crate::model::AnnotationBox;

/// Immutable scale/viewport context, fixed once the image has loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    multiplier: f32,
    origin_x: f32,
    origin_y: f32,
    canvas_width: f32,
    canvas_height: f32,
}

/// A box projected into natural image pixels, as reported to the embedding
/// application. Each field is rounded to the nearest integer independently,
/// so `left + width` may differ by one from the rounded right edge; this
/// matches what downstream consumers of integer pixel geometry expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub label: String,
}

impl ScaleContext {
    /// Build the context from the loaded image's natural size, the rendered
    /// canvas width, and the canvas origin in page coordinates.
    ///
    /// Fails with [`EngineError::InvalidImage`] when any dimension is
    /// non-positive; the image-loading collaborator reports decode failures
    /// the same way, by never producing usable dimensions.
    pub fn new(
        natural_width: u32,
        natural_height: u32,
        rendered_width: f32,
        origin: (f32, f32),
    ) -> Result<Self, EngineError> {
        if natural_width == 0 || natural_height == 0 || rendered_width <= 0.0 {
            return Err(EngineError::invalid_image(
                natural_width,
                natural_height,
                rendered_width,
            ));
        }
        let multiplier = natural_width as f32 / rendered_width;
        Ok(Self {
            multiplier,
            origin_x: origin.0,
            origin_y: origin.1,
            canvas_width: rendered_width,
            canvas_height: natural_height as f32 / multiplier,
        })
    }

    /// Rendered-to-natural length factor.
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Rendered canvas size, derived from the natural aspect ratio.
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Convert a page coordinate into a clamped canvas coordinate.
    ///
    /// Offsets by the canvas origin, rounds to whole pixels, and clamps
    /// into `[0, width-1] x [0, height-1]` so an in-progress drag keeps
    /// tracking even when the raw pointer leaves the canvas.
    pub fn to_canvas(&self, page_x: f32, page_y: f32) -> Point {
        Point::new(
            (page_x - self.origin_x)
                .round()
                .clamp(0.0, (self.canvas_width - 1.0).round()),
            (page_y - self.origin_y)
                .round()
                .clamp(0.0, (self.canvas_height - 1.0).round()),
        )
    }

    /// Project a committed box into natural image pixels.
    ///
    /// Each field is scaled and rounded independently; see [`NaturalBox`].
    pub fn to_natural(&self, boxed: &AnnotationBox) -> NaturalBox {
        NaturalBox {
            left: (boxed.rect.left * self.multiplier).round() as i32,
            top: (boxed.rect.top * self.multiplier).round() as i32,
            width: (boxed.rect.width * self.multiplier).round() as i32,
            height: (boxed.rect.height * self.multiplier).round() as i32,
            label: boxed.label.clone().unwrap_or_default(),
        }
    }
}
