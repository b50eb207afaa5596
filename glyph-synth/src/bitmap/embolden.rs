//! Bitmap emboldening.

use super::{OwnedBitmap, PixelMode, MAX_MONO_STRENGTH};
use crate::error::ShapeError;
use glyph_types::F26Dot6;

/// Rounds a 26.6 strength to whole pixels.
fn pixels(strength: F26Dot6) -> i32 {
    ((strength.to_bits() as i64 + 32) >> 6) as i32
}

impl OwnedBitmap<'_, '_> {
    /// Emboldens the bitmap by the given strengths, rounded to whole pixels.
    ///
    /// The bitmap grows by the horizontal strength on the right and by the
    /// vertical strength on top. Each set pixel is smeared over that many
    /// pixels to its left and above it, so the original content stays at
    /// the bottom left. For subpixel bitmaps the strength applies to each
    /// subpixel.
    ///
    /// 2 and 4 bit gray bitmaps are converted to 8 bit gray first. Color
    /// bitmaps are left unchanged.
    pub fn embolden(&mut self, x: F26Dot6, y: F26Dot6) -> Result<(), ShapeError> {
        let mut xstr = pixels(x);
        let mut ystr = pixels(y);
        if xstr == 0 && ystr == 0 {
            return Ok(());
        }
        if xstr < 0 || ystr < 0 {
            return Err(ShapeError::NegativeStrength);
        }
        match self.pixel_mode() {
            PixelMode::Gray2 | PixelMode::Gray4 => self.convert_to_gray()?,
            PixelMode::Mono => xstr = xstr.min(MAX_MONO_STRENGTH),
            PixelMode::Lcd => xstr = xstr.saturating_mul(3),
            PixelMode::LcdV => ystr = ystr.saturating_mul(3),
            PixelMode::Bgra => {
                log::debug!("color bitmaps are not emboldened");
                return Ok(());
            }
            PixelMode::Gray => {}
        }
        self.grow(xstr as u32, ystr as u32)?;
        let xstr = xstr as usize;
        let ystr = ystr as u32;
        let mono = self.pixel_mode() == PixelMode::Mono;
        let max_gray = self.num_grays().saturating_sub(1).min(255) as u8;
        for y in 0..self.rows() {
            let Some(row) = self.row_mut(y) else {
                break;
            };
            if mono {
                smear_mono(row, xstr);
            } else {
                smear_gray(row, xstr, max_gray);
            }
            if ystr == 0 {
                continue;
            }
            // the smeared row only spreads upward so rows below are still
            // unprocessed when they are merged into this one
            let range = self.row_range(y);
            for above in y.saturating_sub(ystr)..y {
                let dst = self.row_range(above);
                let buffer = self.buffer_mut();
                for i in 0..range.len() {
                    buffer[dst.start + i] |= buffer[range.start + i];
                }
            }
        }
        Ok(())
    }
}

/// Combines each pixel with up to `strength` pixels to its left.
fn smear_mono(row: &mut [u8], strength: usize) {
    for x in (0..row.len()).rev() {
        let original = row[x] as u32;
        let mut value = original;
        for i in 1..=strength as u32 {
            value |= original >> i;
            if x > 0 {
                value |= (row[x - 1] as u32) << (8 - i);
            }
        }
        row[x] = value as u8;
    }
}

/// Adds up to `strength` pixels to the left of each pixel, saturating at
/// `max`.
fn smear_gray(row: &mut [u8], strength: usize, max: u8) {
    for x in (0..row.len()).rev() {
        let mut value = row[x] as u32;
        for i in 1..=strength.min(x) {
            if value == max as u32 {
                break;
            }
            value = (value + row[x - i] as u32).min(max as u32);
        }
        row[x] = value as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bitmap::Bitmap,
        testing::{gray_bitmap, mono_bitmap, pixels as values, px},
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn strength_rounding() {
        assert_eq!(pixels(F26Dot6::from_bits(31)), 0);
        assert_eq!(pixels(F26Dot6::from_bits(32)), 1);
        assert_eq!(pixels(F26Dot6::from_bits(95)), 1);
        assert_eq!(pixels(px(3)), 3);
    }

    #[test]
    fn gray_horizontal() {
        let mut bitmap = gray_bitmap(&[&[0, 100, 200, 0]]);
        bitmap.make_owned().unwrap().embolden(px(1), px(0)).unwrap();
        assert_eq!((bitmap.width(), bitmap.rows()), (5, 1));
        assert_eq!(values(&bitmap), vec![vec![0, 100, 255, 200, 0]]);
    }

    #[test]
    fn gray_vertical() {
        let mut bitmap = gray_bitmap(&[&[10, 0], &[0, 20]]);
        bitmap.make_owned().unwrap().embolden(px(0), px(1)).unwrap();
        assert_eq!((bitmap.width(), bitmap.rows()), (2, 3));
        assert_eq!(
            values(&bitmap),
            vec![vec![10, 0], vec![10, 20], vec![0, 20]]
        );
    }

    #[test]
    fn mono_both_axes() {
        let mut bitmap = mono_bitmap(&["#...", "..#."]);
        bitmap.make_owned().unwrap().embolden(px(1), px(1)).unwrap();
        assert_eq!((bitmap.width(), bitmap.rows()), (5, 3));
        assert_eq!(
            values(&bitmap),
            vec![
                vec![1, 1, 0, 0, 0],
                vec![1, 1, 1, 1, 0],
                vec![0, 0, 1, 1, 0],
            ]
        );
    }

    #[test]
    fn mono_strength_is_capped() {
        let mut bitmap = mono_bitmap(&["#"]);
        bitmap.make_owned().unwrap().embolden(px(12), px(0)).unwrap();
        assert_eq!(bitmap.width(), 9);
        assert_eq!(values(&bitmap), vec![vec![1; 9]]);
    }

    #[test]
    fn mono_smear_crosses_bytes() {
        let mut bitmap = mono_bitmap(&[".......#"]);
        bitmap.make_owned().unwrap().embolden(px(2), px(0)).unwrap();
        assert_eq!(
            values(&bitmap),
            vec![vec![0, 0, 0, 0, 0, 0, 0, 1, 1, 1]]
        );
    }

    #[test]
    fn lcd_strength_triples() {
        let data = [0u8, 0, 90];
        let mut bitmap = Bitmap::new(3, 1, 3, PixelMode::Lcd, &data).unwrap();
        bitmap.make_owned().unwrap().embolden(px(1), px(0)).unwrap();
        assert_eq!(bitmap.width(), 6);
        assert_eq!(values(&bitmap), vec![vec![0, 0, 90, 90, 90, 90]]);
    }

    #[test]
    fn gray4_is_converted() {
        let mut bitmap = Bitmap::from_vec(2, 1, 1, PixelMode::Gray4, vec![0xC0]).unwrap();
        bitmap.make_owned().unwrap().embolden(px(1), px(0)).unwrap();
        assert_eq!(bitmap.pixel_mode(), PixelMode::Gray);
        assert_eq!(bitmap.num_grays(), 16);
        assert_eq!(values(&bitmap), vec![vec![12, 12, 0]]);
    }

    #[test]
    fn bgra_is_untouched() {
        let data = [1u8, 2, 3, 4];
        let mut bitmap = Bitmap::new(1, 1, 4, PixelMode::Bgra, &data).unwrap();
        let before = bitmap.clone();
        bitmap.make_owned().unwrap().embolden(px(1), px(1)).unwrap();
        assert_eq!(bitmap.buffer(), before.buffer());
        assert_eq!((bitmap.width(), bitmap.rows()), (1, 1));
    }

    #[test]
    fn negative_strength() {
        let mut bitmap = gray_bitmap(&[&[1]]);
        assert_eq!(
            bitmap.make_owned().unwrap().embolden(px(-1), px(0)),
            Err(ShapeError::NegativeStrength)
        );
        assert_eq!(bitmap.width(), 1);
    }

    #[test]
    fn zero_strength_is_noop() {
        let mut bitmap = gray_bitmap(&[&[1, 2]]);
        bitmap
            .make_owned()
            .unwrap()
            .embolden(F26Dot6::from_bits(20), px(0))
            .unwrap();
        assert_eq!(values(&bitmap), vec![vec![1, 2]]);
    }
}
