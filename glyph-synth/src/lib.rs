//! Synthetic bold and oblique styles for loaded glyphs.
//!
//! When a font family has no bold or italic face, a renderer can derive one
//! from the regular face. This crate applies those styles to a
//! [`GlyphSlot`] holding a scaled outline or a bitmap:
//!
//! * [`Synthesizer::oblique_with`] slants the glyph with a shear transform,
//!   leaving its advance alone.
//! * [`Synthesizer::weight`] thickens (or, for outlines, thins) the strokes
//!   and adjusts the glyph metrics to the new size.
//!
//! Both are aware of the rotation of the face transform, see
//! [`Orientation`]. The geometric work is done by a [`Shaper`]; the
//! [`DefaultShaper`] uses the outline and bitmap routines in this crate.
//!
//! Coordinates and metrics are in 26.6 pixels as in FreeType.

#![forbid(unsafe_code)]

/// Expose the underlying fixed point and geometry types.
pub extern crate glyph_types as types;

pub mod bitmap;
pub mod outline;

mod error;
mod math;
mod orientation;
mod params;
mod shaper;
mod slot;
mod synth;

#[cfg(test)]
mod testing;

pub use bitmap::{Bitmap, BitmapGlyph, OwnedBitmap, PixelMode};
pub use error::{Error, ShapeError};
pub use orientation::{is_canonical_degree, is_supported_matrix, Orientation};
pub use outline::Outline;
pub use params::{GrowthFlags, LoadFlags, Posture, Weight, WeightParams, DEFAULT_OBLIQUE};
pub use shaper::{DefaultShaper, Shaper};
pub use slot::{FaceContext, GlyphMetrics, GlyphShape, GlyphSlot};
pub use synth::{embolden, oblique, oblique_matrix, Shear, Synthesizer};
