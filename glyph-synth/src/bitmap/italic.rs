//! Bitmap slanting.

use super::{Bitmap, BitmapGlyph, PixelMode};
use crate::{
    error::{Error, ShapeError},
    synth::Shear,
    Orientation,
};
use glyph_types::Fixed;

impl BitmapGlyph<'_> {
    /// Slants the bitmap by the given shear, keeping its pixels in place
    /// relative to the glyph origin.
    ///
    /// The shear axis is chosen from the orientation and posture in the same
    /// way as for outlines. Rows or columns are shifted by whole pixels and
    /// the bitmap and its placement are enlarged to fit.
    ///
    /// Subpixel bitmaps are not supported. 2 and 4 bit gray bitmaps become 8
    /// bit gray.
    pub fn italicize(
        &mut self,
        oblique: f32,
        to_bottom: bool,
        orientation: Orientation,
    ) -> Result<(), Error> {
        let src = &self.bitmap;
        let target_mode = match src.pixel_mode() {
            PixelMode::Lcd | PixelMode::LcdV => {
                return Err(ShapeError::UnsupportedPixelMode(src.pixel_mode()).into())
            }
            PixelMode::Gray2 | PixelMode::Gray4 => PixelMode::Gray,
            mode => mode,
        };
        let k = Fixed::from_f32(oblique).to_f64();
        if k == 0.0 || src.width() == 0 || src.rows() == 0 {
            return Ok(());
        }
        let (width, rows) = (src.width(), src.rows());
        let (italic, left, top) = match Shear::select(orientation, to_bottom) {
            Shear::Horizontal => {
                // x' = x + k * y, measured at the center of each row
                let shifts = (0..rows)
                    .map(|r| (k * (self.top as f64 - r as f64 - 0.5)).round() as i64)
                    .collect::<Vec<_>>();
                let (min, max) = extent(&shifts);
                let new_width = grown(width, max - min)?;
                let mut italic = Bitmap::blank(new_width, rows, target_mode, src.pitch())?;
                for (r, shift) in shifts.iter().enumerate() {
                    let offset = (shift - min) as u32;
                    for c in 0..width {
                        let value = src.pixel(c, r as u32).unwrap_or_default();
                        if value != 0 {
                            set_pixel(&mut italic, c + offset, r as u32, value);
                        }
                    }
                }
                let left = self.left as i64 + min;
                (italic, left, self.top as i64)
            }
            Shear::Vertical => {
                // y' = y - k * x, measured at the center of each column
                let shifts = (0..width)
                    .map(|c| (-k * (self.left as f64 + c as f64 + 0.5)).round() as i64)
                    .collect::<Vec<_>>();
                let (min, max) = extent(&shifts);
                let new_rows = grown(rows, max - min)?;
                let mut italic = Bitmap::blank(width, new_rows, target_mode, src.pitch())?;
                for (c, shift) in shifts.iter().enumerate() {
                    let offset = (max - shift) as u32;
                    for r in 0..rows {
                        let value = src.pixel(c as u32, r).unwrap_or_default();
                        if value != 0 {
                            set_pixel(&mut italic, c as u32, r + offset, value);
                        }
                    }
                }
                let top = self.top as i64 + max;
                (italic, self.left as i64, top)
            }
        };
        let left = i32::try_from(left).map_err(|_| Error::Overflow)?;
        let top = i32::try_from(top).map_err(|_| Error::Overflow)?;
        let mut italic = italic;
        italic.num_grays = src.num_grays();
        self.bitmap = italic;
        self.left = left;
        self.top = top;
        Ok(())
    }
}

fn extent(shifts: &[i64]) -> (i64, i64) {
    shifts
        .iter()
        .fold((i64::MAX, i64::MIN), |(min, max), s| (min.min(*s), max.max(*s)))
}

fn grown(size: u32, extra: i64) -> Result<u32, Error> {
    u32::try_from(extra)
        .ok()
        .and_then(|extra| size.checked_add(extra))
        .ok_or(Error::Overflow)
}

/// Writes a pixel value in the format returned by [`Bitmap::pixel`].
fn set_pixel(bitmap: &mut Bitmap, x: u32, y: u32, value: u32) {
    let mode = bitmap.pixel_mode;
    let width = bitmap.width as usize;
    let range = bitmap.row_range(y);
    let row = &mut bitmap.buffer.to_mut()[range];
    let x = x as usize;
    match mode {
        PixelMode::Mono => row[x / 8] |= 0x80 >> (x % 8),
        PixelMode::Bgra => {
            let [a, r, g, b] = value.to_be_bytes();
            bytemuck::cast_slice_mut::<u8, [u8; 4]>(&mut row[..width * 4])[x] = [b, g, r, a];
        }
        _ => row[x] = value.min(255) as u8,
    }
}
