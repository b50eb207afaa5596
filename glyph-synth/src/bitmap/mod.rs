//! Glyph bitmaps and the buffer ownership that guards their resizing.

mod embolden;
mod italic;

use crate::error::{Error, ShapeError};
use std::{borrow::Cow, ops::Range};

/// Mono bitmaps are emboldened horizontally by at most one byte of pixels.
pub(crate) const MAX_MONO_STRENGTH: i32 = 8;

/// Format of the pixels in a bitmap.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelMode {
    /// One bit per pixel, most significant bit first.
    Mono,
    /// Two bits per pixel.
    Gray2,
    /// Four bits per pixel.
    Gray4,
    /// One byte per pixel.
    Gray,
    /// One byte per subpixel, three horizontal subpixels per pixel. The
    /// width is given in subpixels.
    Lcd,
    /// One byte per subpixel, three vertical subpixels per pixel. The
    /// number of rows is given in subpixels.
    LcdV,
    /// Premultiplied blue, green, red and alpha bytes.
    Bgra,
}

impl PixelMode {
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Mono => 1,
            Self::Gray2 => 2,
            Self::Gray4 => 4,
            Self::Gray | Self::Lcd | Self::LcdV => 8,
            Self::Bgra => 32,
        }
    }

    /// Number of gray levels a freshly loaded bitmap of this mode uses.
    pub const fn default_num_grays(self) -> u16 {
        match self {
            Self::Mono => 2,
            Self::Gray2 => 4,
            Self::Gray4 => 16,
            Self::Gray | Self::Lcd | Self::LcdV | Self::Bgra => 256,
        }
    }

    /// Minimum number of bytes for a row of `width` pixels.
    pub const fn min_pitch(self, width: u32) -> usize {
        (width as usize * self.bits_per_pixel() as usize).div_ceil(8)
    }
}

/// A bitmap whose pixel storage is either borrowed or owned.
///
/// The sign of `pitch` gives the row order in memory: positive for top
/// down, negative for bottom up. Row indices used by this type always count
/// from the visual top.
///
/// A borrowed buffer can never be resized. Changing the size requires an
/// [`OwnedBitmap`], which can only be obtained from
/// [`make_owned`](Self::make_owned).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bitmap<'a> {
    width: u32,
    rows: u32,
    pitch: i32,
    pixel_mode: PixelMode,
    num_grays: u16,
    buffer: Cow<'a, [u8]>,
}

impl<'a> Bitmap<'a> {
    /// Creates a bitmap that borrows its pixel storage.
    pub fn new(
        width: u32,
        rows: u32,
        pitch: i32,
        pixel_mode: PixelMode,
        buffer: &'a [u8],
    ) -> Result<Self, ShapeError> {
        Self::with_buffer(width, rows, pitch, pixel_mode, Cow::Borrowed(buffer))
    }

    /// Creates a bitmap that owns its pixel storage.
    pub fn from_vec(
        width: u32,
        rows: u32,
        pitch: i32,
        pixel_mode: PixelMode,
        buffer: Vec<u8>,
    ) -> Result<Self, ShapeError> {
        Self::with_buffer(width, rows, pitch, pixel_mode, Cow::Owned(buffer))
    }

    fn with_buffer(
        width: u32,
        rows: u32,
        pitch: i32,
        pixel_mode: PixelMode,
        buffer: Cow<'a, [u8]>,
    ) -> Result<Self, ShapeError> {
        let stride = pitch.unsigned_abs() as usize;
        let required = stride
            .checked_mul(rows as usize)
            .ok_or(ShapeError::InvalidBitmap)?;
        if stride < pixel_mode.min_pitch(width) || buffer.len() < required {
            return Err(ShapeError::InvalidBitmap);
        }
        Ok(Self {
            width,
            rows,
            pitch,
            pixel_mode,
            num_grays: pixel_mode.default_num_grays(),
            buffer,
        })
    }

    /// Creates an owned bitmap with all pixels cleared.
    ///
    /// The pitch is the minimum for the width, with the row order given by
    /// the sign of `order`.
    pub(crate) fn blank(
        width: u32,
        rows: u32,
        pixel_mode: PixelMode,
        order: i32,
    ) -> Result<Bitmap<'static>, ShapeError> {
        let stride = pixel_mode.min_pitch(width);
        let pitch = i32::try_from(stride).map_err(|_| ShapeError::OutOfMemory)?;
        let len = stride
            .checked_mul(rows as usize)
            .ok_or(ShapeError::OutOfMemory)?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| ShapeError::OutOfMemory)?;
        buffer.resize(len, 0);
        Ok(Bitmap {
            width,
            rows,
            pitch: if order < 0 { -pitch } else { pitch },
            pixel_mode,
            num_grays: pixel_mode.default_num_grays(),
            buffer: Cow::Owned(buffer),
        })
    }

    /// Width in pixels, or subpixels for [`PixelMode::Lcd`].
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows, in subpixels for [`PixelMode::LcdV`].
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn pixel_mode(&self) -> PixelMode {
        self.pixel_mode
    }

    /// Number of gray levels for gray pixel modes.
    pub fn num_grays(&self) -> u16 {
        self.num_grays
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns true if the pixel storage belongs to this bitmap.
    pub fn is_owned(&self) -> bool {
        matches!(self.buffer, Cow::Owned(_))
    }

    fn stride(&self) -> usize {
        self.pitch.unsigned_abs() as usize
    }

    fn row_range(&self, row: u32) -> Range<usize> {
        let stride = self.stride();
        let ix = if self.pitch < 0 {
            (self.rows - 1 - row) as usize
        } else {
            row as usize
        };
        ix * stride..(ix + 1) * stride
    }

    /// Returns the bytes of the given row, counted from the top.
    pub fn row(&self, row: u32) -> Option<&[u8]> {
        (row < self.rows).then(|| &self.buffer[self.row_range(row)])
    }

    /// Returns the value of the pixel at the given column and row.
    ///
    /// Mono pixels are 0 or 1, gray pixels are their level and BGRA pixels
    /// are packed as `0xAARRGGBB`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let x = x as usize;
        Some(match self.pixel_mode {
            PixelMode::Mono => ((row[x / 8] >> (7 - x % 8)) & 1) as u32,
            PixelMode::Gray2 => ((row[x / 4] >> (6 - 2 * (x % 4))) & 0x3) as u32,
            PixelMode::Gray4 => ((row[x / 2] >> (4 - 4 * (x % 2))) & 0xF) as u32,
            PixelMode::Gray | PixelMode::Lcd | PixelMode::LcdV => row[x] as u32,
            PixelMode::Bgra => {
                let pixels: &[[u8; 4]] = bytemuck::cast_slice(&row[..self.width as usize * 4]);
                let [b, g, r, a] = pixels[x];
                u32::from_be_bytes([a, r, g, b])
            }
        })
    }

    /// Takes ownership of the pixel storage, copying a borrowed buffer.
    ///
    /// Fails with [`Error::BitmapOwnership`] if the copy cannot be
    /// allocated, in which case the bitmap is unchanged.
    pub fn make_owned(&mut self) -> Result<OwnedBitmap<'_, 'a>, Error> {
        if let Cow::Borrowed(data) = self.buffer {
            let mut owned = Vec::new();
            owned
                .try_reserve_exact(data.len())
                .map_err(|_| Error::BitmapOwnership)?;
            owned.extend_from_slice(data);
            self.buffer = Cow::Owned(owned);
        }
        Ok(OwnedBitmap { bitmap: self })
    }
}

/// Write access to a bitmap whose pixel storage is owned.
///
/// Having one of these means the buffer may be modified and resized in
/// place without affecting anyone else.
#[derive(Debug)]
pub struct OwnedBitmap<'b, 'a> {
    bitmap: &'b mut Bitmap<'a>,
}

impl<'a> OwnedBitmap<'_, 'a> {
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        // the buffer is always owned here so this never copies
        self.bitmap.buffer.to_mut()
    }

    /// Returns the bytes of the given row, counted from the top.
    pub fn row_mut(&mut self, row: u32) -> Option<&mut [u8]> {
        if row >= self.bitmap.rows {
            return None;
        }
        let range = self.bitmap.row_range(row);
        Some(&mut self.buffer_mut()[range])
    }

    /// Replaces the bitmap with a new one. The replacement is owned by
    /// construction.
    fn replace(&mut self, bitmap: Bitmap<'static>) {
        *self.bitmap = bitmap;
    }

    /// Adds `columns` blank columns on the right and `rows` blank rows on
    /// top, keeping the existing pixels at the bottom left.
    pub fn grow(&mut self, columns: u32, rows: u32) -> Result<(), ShapeError> {
        if columns == 0 && rows == 0 {
            return Ok(());
        }
        let src = &*self.bitmap;
        let width = src
            .width
            .checked_add(columns)
            .ok_or(ShapeError::OutOfMemory)?;
        let new_rows = src.rows.checked_add(rows).ok_or(ShapeError::OutOfMemory)?;
        let mut grown = Bitmap::blank(width, new_rows, src.pixel_mode, src.pitch)?;
        grown.num_grays = src.num_grays;
        let copy_len = src.pixel_mode.min_pitch(src.width);
        for row in 0..src.rows {
            let src_range = src.row_range(row);
            let dst_range = grown.row_range(row + rows);
            grown.buffer.to_mut()[dst_range][..copy_len]
                .copy_from_slice(&src.buffer[src_range][..copy_len]);
        }
        self.replace(grown);
        Ok(())
    }

    /// Converts 2 and 4 bit gray bitmaps to 8 bit gray.
    ///
    /// Levels are copied without scaling and the number of gray levels is
    /// preserved. Other pixel modes are left unchanged.
    pub fn convert_to_gray(&mut self) -> Result<(), ShapeError> {
        let src = &*self.bitmap;
        if !matches!(src.pixel_mode, PixelMode::Gray2 | PixelMode::Gray4) {
            return Ok(());
        }
        let mut gray = Bitmap::blank(src.width, src.rows, PixelMode::Gray, src.pitch)?;
        gray.num_grays = src.num_grays;
        for y in 0..src.rows {
            let dst_range = gray.row_range(y);
            let dst = &mut gray.buffer.to_mut()[dst_range];
            for (x, value) in dst.iter_mut().enumerate() {
                *value = src.pixel(x as u32, y).unwrap_or_default() as u8;
            }
        }
        self.replace(gray);
        Ok(())
    }
}

impl<'a> std::ops::Deref for OwnedBitmap<'_, 'a> {
    type Target = Bitmap<'a>;

    fn deref(&self) -> &Self::Target {
        self.bitmap
    }
}

/// A bitmap along with its placement relative to the glyph origin.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitmapGlyph<'a> {
    pub bitmap: Bitmap<'a>,
    /// Distance in pixels from the origin to the left edge of the bitmap.
    pub left: i32,
    /// Distance in pixels from the baseline to the top row of the bitmap,
    /// positive upward.
    pub top: i32,
}

impl<'a> BitmapGlyph<'a> {
    pub fn new(bitmap: Bitmap<'a>, left: i32, top: i32) -> Self {
        Self { bitmap, left, top }
    }
}
