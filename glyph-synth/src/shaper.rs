//! Shape primitives used by the synthesizer.

use crate::{
    bitmap::{BitmapGlyph, OwnedBitmap},
    error::Error,
    outline::Outline,
    params::{GrowthFlags, LoadFlags},
    Orientation,
};
use glyph_types::{F26Dot6, Matrix};

/// Geometric operations on glyph shapes.
///
/// The synthesizer decides what to apply and patches the glyph metrics; an
/// implementation of this trait only modifies shapes. Metrics are patched
/// only when the primitive succeeds, so a failing implementation leaves the
/// glyph metrics as they were.
pub trait Shaper {
    /// Applies the transform to every point of the outline.
    fn transform_outline(&mut self, outline: &mut Outline, matrix: &Matrix) -> Result<(), Error>;

    /// Emboldens the outline by the given total strengths.
    fn embolden_outline(
        &mut self,
        outline: &mut Outline,
        x: F26Dot6,
        y: F26Dot6,
    ) -> Result<(), Error>;

    /// Emboldens the bitmap by the given strengths, which are multiples of
    /// one pixel.
    ///
    /// The load flags and growth requested by the caller are passed along
    /// for implementations that use them.
    fn embolden_bitmap(
        &mut self,
        bitmap: &mut OwnedBitmap,
        x: F26Dot6,
        y: F26Dot6,
        load_flags: LoadFlags,
        growth: GrowthFlags,
    ) -> Result<(), Error>;

    /// Slants the bitmap by the given shear factor.
    fn italicize_bitmap(
        &mut self,
        bitmap: &mut BitmapGlyph,
        oblique: f32,
        to_bottom: bool,
        orientation: Orientation,
    ) -> Result<(), Error>;
}

impl<T: Shaper + ?Sized> Shaper for &mut T {
    fn transform_outline(&mut self, outline: &mut Outline, matrix: &Matrix) -> Result<(), Error> {
        (**self).transform_outline(outline, matrix)
    }

    fn embolden_outline(
        &mut self,
        outline: &mut Outline,
        x: F26Dot6,
        y: F26Dot6,
    ) -> Result<(), Error> {
        (**self).embolden_outline(outline, x, y)
    }

    fn embolden_bitmap(
        &mut self,
        bitmap: &mut OwnedBitmap,
        x: F26Dot6,
        y: F26Dot6,
        load_flags: LoadFlags,
        growth: GrowthFlags,
    ) -> Result<(), Error> {
        (**self).embolden_bitmap(bitmap, x, y, load_flags, growth)
    }

    fn italicize_bitmap(
        &mut self,
        bitmap: &mut BitmapGlyph,
        oblique: f32,
        to_bottom: bool,
        orientation: Orientation,
    ) -> Result<(), Error> {
        (**self).italicize_bitmap(bitmap, oblique, to_bottom, orientation)
    }
}

/// Shaper backed by the outline and bitmap routines in this crate.
#[derive(Copy, Clone, Default, Debug)]
pub struct DefaultShaper;

impl Shaper for DefaultShaper {
    fn transform_outline(&mut self, outline: &mut Outline, matrix: &Matrix) -> Result<(), Error> {
        outline.transform(matrix);
        Ok(())
    }

    fn embolden_outline(
        &mut self,
        outline: &mut Outline,
        x: F26Dot6,
        y: F26Dot6,
    ) -> Result<(), Error> {
        outline.embolden(x, y).map_err(|e| {
            log::warn!("failed to embolden outline: {e}");
            e.into()
        })
    }

    fn embolden_bitmap(
        &mut self,
        bitmap: &mut OwnedBitmap,
        x: F26Dot6,
        y: F26Dot6,
        _load_flags: LoadFlags,
        _growth: GrowthFlags,
    ) -> Result<(), Error> {
        bitmap.embolden(x, y).map_err(|e| {
            log::warn!("failed to embolden bitmap: {e}");
            e.into()
        })
    }

    fn italicize_bitmap(
        &mut self,
        bitmap: &mut BitmapGlyph,
        oblique: f32,
        to_bottom: bool,
        orientation: Orientation,
    ) -> Result<(), Error> {
        bitmap
            .italicize(oblique, to_bottom, orientation)
            .inspect_err(|e| log::warn!("failed to slant bitmap: {e}"))
    }
}
