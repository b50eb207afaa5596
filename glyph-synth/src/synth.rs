//! Oblique and weight synthesis.

use crate::{
    bitmap::{PixelMode, MAX_MONO_STRENGTH},
    error::Error,
    params::{GrowthFlags, Posture, Weight, WeightParams, DEFAULT_OBLIQUE},
    shaper::{DefaultShaper, Shaper},
    slot::{GlyphMetrics, GlyphShape, GlyphSlot},
    Orientation,
};
use glyph_types::{F26Dot6, Fixed, Matrix, Point};

/// Axis along which a slant moves points.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Shear {
    /// Points move vertically in proportion to their x coordinate:
    /// `y' = y - k * x`.
    Vertical,
    /// Points move horizontally in proportion to their y coordinate:
    /// `x' = x + k * y`.
    Horizontal,
}

impl Shear {
    /// Selects the shear that slants a glyph with the given rotation along
    /// its visual baseline.
    ///
    /// Rotated glyphs have their axes swapped relative to the line, so the
    /// vertical shear is used for rotations of 90 and 270 degrees leaning to
    /// the right and for upright or upside down glyphs leaning to the
    /// bottom. Unknown transforms use the horizontal shear.
    pub fn select(orientation: Orientation, to_bottom: bool) -> Self {
        use Orientation::*;
        match (orientation, to_bottom) {
            (Upright | Rotate180, true) | (Rotate90 | Rotate270, false) => Self::Vertical,
            _ => Self::Horizontal,
        }
    }

    /// Returns the transform for the shear factor `k`.
    pub fn matrix(self, k: Fixed) -> Matrix {
        match self {
            Self::Vertical => Matrix::new(Fixed::ONE, Fixed::ZERO, -k, Fixed::ONE),
            Self::Horizontal => Matrix::new(Fixed::ONE, k, Fixed::ZERO, Fixed::ONE),
        }
    }
}

/// Returns the transform that slants an outline with the given rotation by
/// `oblique`, a ratio of horizontal displacement to height.
pub fn oblique_matrix(orientation: Orientation, to_bottom: bool, oblique: f32) -> Matrix {
    Shear::select(orientation, to_bottom).matrix(Fixed::from_f32(oblique))
}

/// Applies synthetic styles to loaded glyphs.
///
/// The synthesizer chooses the geometry for each style and keeps the glyph
/// metrics consistent with it while the [`Shaper`] performs the shape
/// changes.
///
/// Every operation accepts an optional slot; passing `None` does nothing.
#[derive(Clone, Default, Debug)]
pub struct Synthesizer<S> {
    shaper: S,
}

impl<S: Shaper> Synthesizer<S> {
    /// Creates a synthesizer that performs shape changes with `shaper`.
    pub fn new(shaper: S) -> Self {
        Self { shaper }
    }

    /// Returns a reference to the shaper.
    pub fn shaper(&self) -> &S {
        &self.shaper
    }

    /// Returns a mutable reference to the shaper.
    pub fn shaper_mut(&mut self) -> &mut S {
        &mut self.shaper
    }

    /// Consumes the synthesizer and returns the shaper.
    pub fn into_inner(self) -> S {
        self.shaper
    }

    /// Slants the glyph to the right by [`DEFAULT_OBLIQUE`].
    pub fn oblique<'s, 'a: 's>(
        &mut self,
        slot: impl Into<Option<&'s mut GlyphSlot<'a>>>,
    ) -> Result<(), Error> {
        self.oblique_with(slot, DEFAULT_OBLIQUE, Posture::ToRight)
    }

    /// Slants the glyph by the given ratio in the direction of `posture`.
    ///
    /// The direction follows the visual baseline of the glyph as given by
    /// the rotation of the face transform. The advance and metrics are never
    /// changed.
    pub fn oblique_with<'s, 'a: 's>(
        &mut self,
        slot: impl Into<Option<&'s mut GlyphSlot<'a>>>,
        oblique: f32,
        posture: Posture,
    ) -> Result<(), Error> {
        let Some(slot) = slot.into() else {
            return Ok(());
        };
        let orientation = Orientation::of_slot(Some(&*slot));
        let to_bottom = posture == Posture::ToBottom;
        match &mut slot.shape {
            GlyphShape::Outline(outline) => {
                let matrix = oblique_matrix(orientation, to_bottom, oblique);
                log::trace!("slanting outline with {orientation:?} using {matrix:?}");
                self.shaper.transform_outline(outline, &matrix)
            }
            GlyphShape::Bitmap(glyph) => {
                log::trace!("slanting bitmap with {orientation:?}");
                self.shaper
                    .italicize_bitmap(glyph, oblique, to_bottom, orientation)
            }
            GlyphShape::Empty => Ok(()),
        }
    }

    /// Emboldens the glyph with [`Weight::BOLD`] on both axes and adjusts
    /// all metrics.
    pub fn embolden<'s, 'a: 's>(
        &mut self,
        slot: impl Into<Option<&'s mut GlyphSlot<'a>>>,
    ) -> Result<(), Error> {
        self.weight(slot, WeightParams::default())
    }

    /// Changes the stroke weight of the glyph.
    ///
    /// Each unit of weight away from [`Weight::PLAIN`] widens the glyph by
    /// one twenty-fourth of the em. Outlines keep fractional strengths and
    /// may be thinned. Bitmaps are only ever thickened, by whole pixels and
    /// at least one pixel horizontally and at most eight for mono bitmaps; a
    /// weight below plain on either axis does nothing to a bitmap.
    ///
    /// The glyph grows up and to the right. The metrics selected by
    /// `params.growth` are adjusted once the shape has changed. If any
    /// adjusted value would overflow, [`Error::Overflow`] is returned and
    /// nothing is modified.
    pub fn weight<'s, 'a: 's>(
        &mut self,
        slot: impl Into<Option<&'s mut GlyphSlot<'a>>>,
        params: WeightParams,
    ) -> Result<(), Error> {
        let Some(slot) = slot.into() else {
            return Ok(());
        };
        if matches!(slot.shape, GlyphShape::Empty) {
            return Ok(());
        }
        let face = &slot.face;
        let base = face.y_scale.mul_int(face.units_per_em as i32) / 24;
        let xstr = strength(base, params.weight_x)?;
        let ystr = strength(base, params.weight_y)?;
        let (xstr, ystr, top) = match &slot.shape {
            GlyphShape::Bitmap(glyph) => {
                if params.weight_x.delta() <= 0.0 || params.weight_y.delta() < 0.0 {
                    log::debug!(
                        "bitmaps cannot be thinned, skipping weight ({:?}, {:?})",
                        params.weight_x,
                        params.weight_y
                    );
                    return Ok(());
                }
                let mut xstr = match xstr & !63 {
                    0 => 64,
                    xstr => xstr,
                };
                if glyph.bitmap.pixel_mode() == PixelMode::Mono {
                    xstr = xstr.min(MAX_MONO_STRENGTH << 6);
                }
                (xstr, ystr & !63, Some(glyph.top))
            }
            _ => (xstr, ystr, None),
        };
        let patch = MetricsPatch::new(slot, xstr, ystr, top, params.growth)?;
        let (x, y) = (F26Dot6::from_bits(xstr), F26Dot6::from_bits(ystr));
        match &mut slot.shape {
            GlyphShape::Outline(outline) => {
                log::trace!("emboldening outline by ({x}, {y})");
                self.shaper.embolden_outline(outline, x, y)?;
            }
            GlyphShape::Bitmap(glyph) => {
                log::trace!("emboldening bitmap by ({x}, {y})");
                let mut bitmap = glyph.bitmap.make_owned()?;
                self.shaper
                    .embolden_bitmap(&mut bitmap, x, y, params.load_flags, params.growth)?;
            }
            GlyphShape::Empty => return Ok(()),
        }
        patch.apply(slot);
        Ok(())
    }
}

/// Slants the glyph with the default shaper.
///
/// See [`Synthesizer::oblique`].
pub fn oblique<'s, 'a: 's>(slot: impl Into<Option<&'s mut GlyphSlot<'a>>>) -> Result<(), Error> {
    Synthesizer::new(DefaultShaper).oblique(slot)
}

/// Emboldens the glyph with the default shaper.
///
/// See [`Synthesizer::embolden`].
pub fn embolden<'s, 'a: 's>(slot: impl Into<Option<&'s mut GlyphSlot<'a>>>) -> Result<(), Error> {
    Synthesizer::new(DefaultShaper).embolden(slot)
}

/// Scales the base stroke by the distance of `weight` from plain,
/// truncating to 26.6.
fn strength(base: i64, weight: Weight) -> Result<i32, Error> {
    let value = (base as f64 * weight.delta()).trunc();
    if !value.is_finite() || value < i32::MIN as f64 || value > i32::MAX as f64 {
        log::debug!("too strong emboldening parameter {weight:?}");
        return Err(Error::Overflow);
    }
    Ok(value as i32)
}

/// Metric values after emboldening, computed before the shape changes.
struct MetricsPatch {
    advance: Point<F26Dot6>,
    metrics: GlyphMetrics,
    top: Option<i32>,
}

impl MetricsPatch {
    fn new(
        slot: &GlyphSlot,
        xstr: i32,
        ystr: i32,
        top: Option<i32>,
        growth: GrowthFlags,
    ) -> Result<Self, Error> {
        let grow = |value: F26Dot6, delta: i32| {
            value
                .checked_add(F26Dot6::from_bits(delta))
                .ok_or(Error::Overflow)
        };
        let mut advance = slot.advance;
        let mut metrics = slot.metrics;
        let mut top = top;
        if growth.contains(GrowthFlags::GROW_X) {
            if advance.x != F26Dot6::ZERO {
                advance.x = grow(advance.x, xstr)?;
            }
            metrics.width = grow(metrics.width, xstr)?;
            metrics.hori_advance = grow(metrics.hori_advance, xstr)?;
        }
        if growth.contains(GrowthFlags::GROW_Y) {
            if advance.y != F26Dot6::ZERO {
                advance.y = grow(advance.y, ystr)?;
            }
            metrics.height = grow(metrics.height, ystr)?;
            metrics.vert_advance = grow(metrics.vert_advance, ystr)?;
            metrics.hori_bearing_y = grow(metrics.hori_bearing_y, ystr)?;
            if let Some(top) = top.as_mut() {
                *top = top.checked_add(ystr >> 6).ok_or(Error::Overflow)?;
            }
        } else {
            top = None;
        }
        Ok(Self {
            advance,
            metrics,
            top,
        })
    }

    fn apply(self, slot: &mut GlyphSlot) {
        slot.advance = self.advance;
        slot.metrics = self.metrics;
        if let (Some(top), GlyphShape::Bitmap(glyph)) = (self.top, &mut slot.shape) {
            glyph.top = top;
        }
    }
}
