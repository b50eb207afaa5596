//! Loaded glyph state that synthesis operates on.

use crate::{bitmap::BitmapGlyph, outline::Outline};
use glyph_types::{F26Dot6, Fixed, Matrix, Point};

/// Properties of the face and size a glyph was loaded from.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceContext {
    pub units_per_em: u16,
    /// Scale from font units to 26.6 pixels on the vertical axis.
    pub y_scale: Fixed,
    /// Transform applied to glyphs of the face, if any.
    pub transform: Option<Matrix>,
}

impl FaceContext {
    pub fn new(units_per_em: u16, y_scale: Fixed) -> Self {
        Self {
            units_per_em,
            y_scale,
            transform: None,
        }
    }

    /// Sets the transform.
    pub fn with_transform(mut self, transform: Matrix) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Metrics of a loaded glyph in 26.6 pixels.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphMetrics {
    pub width: F26Dot6,
    pub height: F26Dot6,
    pub hori_bearing_x: F26Dot6,
    pub hori_bearing_y: F26Dot6,
    pub hori_advance: F26Dot6,
    pub vert_bearing_x: F26Dot6,
    pub vert_bearing_y: F26Dot6,
    pub vert_advance: F26Dot6,
}

/// Representation of a loaded glyph.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub enum GlyphShape<'a> {
    /// No image, as for a space or a glyph that has not been loaded.
    #[default]
    Empty,
    Outline(Outline),
    Bitmap(BitmapGlyph<'a>),
}

/// A loaded glyph with its face context and metrics.
///
/// Bitmap pixels may be borrowed from elsewhere for the lifetime `'a`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GlyphSlot<'a> {
    pub face: FaceContext,
    pub shape: GlyphShape<'a>,
    /// Pen advance after this glyph.
    pub advance: Point<F26Dot6>,
    pub metrics: GlyphMetrics,
}

impl<'a> GlyphSlot<'a> {
    pub fn new(face: FaceContext, shape: GlyphShape<'a>) -> Self {
        Self {
            face,
            shape,
            advance: Point::default(),
            metrics: GlyphMetrics::default(),
        }
    }

    /// Returns the outline if the glyph is an outline.
    pub fn outline(&self) -> Option<&Outline> {
        match &self.shape {
            GlyphShape::Outline(outline) => Some(outline),
            _ => None,
        }
    }

    /// Returns the bitmap if the glyph is a bitmap.
    pub fn bitmap(&self) -> Option<&BitmapGlyph<'a>> {
        match &self.shape {
            GlyphShape::Bitmap(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}
