//! Shared fixtures for unit tests.

use crate::{
    bitmap::{Bitmap, BitmapGlyph, OwnedBitmap, PixelMode},
    error::{Error, ShapeError},
    outline::{Outline, PointFlags},
    params::{GrowthFlags, LoadFlags},
    shaper::{DefaultShaper, Shaper},
    slot::{FaceContext, GlyphMetrics, GlyphShape, GlyphSlot},
    Orientation,
};
use glyph_types::{F26Dot6, Fixed, Matrix, Point};

/// A vertical bar, one pixel wide, in the middle of a 3x3 gray bitmap.
static BAR: [u8; 9] = [0, 255, 0, 0, 255, 0, 0, 255, 0];

pub fn px(value: i32) -> F26Dot6 {
    F26Dot6::from_i32(value)
}

/// Face at 24 pixels per em, so that a weight of one unit is one pixel.
pub fn face() -> FaceContext {
    FaceContext::new(2048, Fixed::from_bits(0xC000))
}

/// Square with one on curve point per corner, starting at the bottom left.
pub fn square_outline(x: i32, y: i32, size: i32, clockwise: bool) -> Outline {
    let mut points = vec![
        Point::new(px(x), px(y)),
        Point::new(px(x), px(y + size)),
        Point::new(px(x + size), px(y + size)),
        Point::new(px(x + size), px(y)),
    ];
    if !clockwise {
        points.reverse();
    }
    Outline::new(points, vec![PointFlags::on_curve(); 4], vec![3]).unwrap()
}

/// A 10 pixel square with a left side bearing of one pixel.
pub fn outline_slot() -> GlyphSlot<'static> {
    let mut slot = GlyphSlot::new(
        face(),
        GlyphShape::Outline(square_outline(1, 0, 10, true)),
    );
    slot.advance = Point::new(px(12), px(0));
    slot.metrics = GlyphMetrics {
        width: px(10),
        height: px(10),
        hori_bearing_x: px(1),
        hori_bearing_y: px(10),
        hori_advance: px(12),
        vert_bearing_x: px(-5),
        vert_bearing_y: px(1),
        vert_advance: px(12),
    };
    slot
}

/// A 3x3 gray bitmap borrowed from static storage.
pub fn bitmap_slot() -> GlyphSlot<'static> {
    let bitmap = Bitmap::new(3, 3, 3, PixelMode::Gray, &BAR).unwrap();
    let mut slot = GlyphSlot::new(
        face(),
        GlyphShape::Bitmap(BitmapGlyph::new(bitmap, 1, 3)),
    );
    slot.advance = Point::new(px(5), px(0));
    slot.metrics = GlyphMetrics {
        width: px(3),
        height: px(3),
        hori_bearing_x: px(1),
        hori_bearing_y: px(3),
        hori_advance: px(5),
        vert_bearing_x: px(-1),
        vert_bearing_y: px(1),
        vert_advance: px(5),
    };
    slot
}

/// Builds an owned 8 bit gray bitmap from rows of pixel values.
pub fn gray_bitmap(rows: &[&[u8]]) -> Bitmap<'static> {
    let width = rows.first().map(|row| row.len()).unwrap_or_default();
    let data = rows.concat();
    Bitmap::from_vec(
        width as u32,
        rows.len() as u32,
        width as i32,
        PixelMode::Gray,
        data,
    )
    .unwrap()
}

/// Builds an owned mono bitmap from rows where `#` is a set pixel.
pub fn mono_bitmap(rows: &[&str]) -> Bitmap<'static> {
    let width = rows.first().map(|row| row.len()).unwrap_or_default();
    let pitch = PixelMode::Mono.min_pitch(width as u32);
    let mut data = vec![0u8; pitch * rows.len()];
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '#' {
                data[y * pitch + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    Bitmap::from_vec(
        width as u32,
        rows.len() as u32,
        pitch as i32,
        PixelMode::Mono,
        data,
    )
    .unwrap()
}

/// Returns all pixel values, top row first.
pub fn pixels(bitmap: &Bitmap) -> Vec<Vec<u32>> {
    (0..bitmap.rows())
        .map(|y| {
            (0..bitmap.width())
                .map(|x| bitmap.pixel(x, y).unwrap())
                .collect()
        })
        .collect()
}

/// Shaper that records its inputs and then either fails or forwards to
/// [`DefaultShaper`].
#[derive(Clone, PartialEq, Default, Debug)]
pub struct RecordingShaper {
    pub matrices: Vec<Matrix>,
    pub outline_strengths: Vec<(F26Dot6, F26Dot6)>,
    pub bitmap_strengths: Vec<(F26Dot6, F26Dot6)>,
    pub italics: Vec<(f32, bool, Orientation)>,
    pub fail: Option<ShapeError>,
}

impl RecordingShaper {
    pub fn failing(error: ShapeError) -> Self {
        Self {
            fail: Some(error),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), Error> {
        match &self.fail {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }
}

impl Shaper for RecordingShaper {
    fn transform_outline(&mut self, outline: &mut Outline, matrix: &Matrix) -> Result<(), Error> {
        self.matrices.push(*matrix);
        self.check()?;
        DefaultShaper.transform_outline(outline, matrix)
    }

    fn embolden_outline(
        &mut self,
        outline: &mut Outline,
        x: F26Dot6,
        y: F26Dot6,
    ) -> Result<(), Error> {
        self.outline_strengths.push((x, y));
        self.check()?;
        DefaultShaper.embolden_outline(outline, x, y)
    }

    fn embolden_bitmap(
        &mut self,
        bitmap: &mut OwnedBitmap,
        x: F26Dot6,
        y: F26Dot6,
        load_flags: LoadFlags,
        growth: GrowthFlags,
    ) -> Result<(), Error> {
        self.bitmap_strengths.push((x, y));
        self.check()?;
        DefaultShaper.embolden_bitmap(bitmap, x, y, load_flags, growth)
    }

    fn italicize_bitmap(
        &mut self,
        bitmap: &mut BitmapGlyph,
        oblique: f32,
        to_bottom: bool,
        orientation: Orientation,
    ) -> Result<(), Error> {
        self.italics.push((oblique, to_bottom, orientation));
        self.check()?;
        DefaultShaper.italicize_bitmap(bitmap, oblique, to_bottom, orientation)
    }
}
