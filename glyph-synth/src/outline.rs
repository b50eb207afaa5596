//! Scaled glyph outlines.

use crate::{error::ShapeError, math};
use core::ops::Range;
use glyph_types::{BoundingBox, F26Dot6, Matrix, Point};

/// Marker bits describing the curve type of an outline point.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointFlags(u8);

impl PointFlags {
    // Note: OFF_CURVE_QUAD is signified by the absence of both ON_CURVE
    // and OFF_CURVE_CUBIC bits, per FreeType and TrueType convention.
    const ON_CURVE: u8 = 0x01;
    const OFF_CURVE_CUBIC: u8 = 0x02;
    const CURVE_MASK: u8 = Self::ON_CURVE | Self::OFF_CURVE_CUBIC;

    /// Creates a new on curve point flag.
    pub const fn on_curve() -> Self {
        Self(Self::ON_CURVE)
    }

    /// Creates a new off curve quadratic point flag.
    pub const fn off_curve_quad() -> Self {
        Self(0)
    }

    /// Creates a new off curve cubic point flag.
    pub const fn off_curve_cubic() -> Self {
        Self(Self::OFF_CURVE_CUBIC)
    }

    /// Creates a point flag from FreeType style tag bits. Bits other than
    /// the curve type are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::CURVE_MASK)
    }

    pub const fn to_bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_on_curve(self) -> bool {
        self.0 & Self::ON_CURVE != 0
    }

    #[inline]
    pub const fn is_off_curve_quad(self) -> bool {
        self.0 & Self::CURVE_MASK == 0
    }

    #[inline]
    pub const fn is_off_curve_cubic(self) -> bool {
        self.0 & Self::OFF_CURVE_CUBIC != 0
    }
}

/// Fill direction of the contours in an outline.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FillOrientation {
    /// Outer contours run clockwise.
    TrueType,
    /// Outer contours run counter-clockwise.
    PostScript,
    /// Direction cannot be determined, for example when all contours are
    /// degenerate.
    None,
}

/// Glyph outline in 26.6 coordinates.
///
/// Contours are stored as the index of their last point, in increasing
/// order, as in FreeType's `FT_Outline`.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Outline {
    points: Vec<Point<F26Dot6>>,
    flags: Vec<PointFlags>,
    contours: Vec<u16>,
}

impl Outline {
    /// Creates a new outline, checking that the flags match the points and
    /// that every contour end point is in range and in increasing order.
    pub fn new(
        points: Vec<Point<F26Dot6>>,
        flags: Vec<PointFlags>,
        contours: Vec<u16>,
    ) -> Result<Self, ShapeError> {
        if points.len() != flags.len() {
            return Err(ShapeError::InvalidOutline);
        }
        let mut start = 0;
        for &end in &contours {
            let end = end as usize;
            if end < start || end >= points.len() {
                return Err(ShapeError::InvalidOutline);
            }
            start = end + 1;
        }
        if start != points.len() {
            return Err(ShapeError::InvalidOutline);
        }
        Ok(Self {
            points,
            flags,
            contours,
        })
    }

    pub fn points(&self) -> &[Point<F26Dot6>] {
        &self.points
    }

    /// Mutable access to the point coordinates. The number of points and
    /// the contour structure cannot be changed through this.
    pub fn points_mut(&mut self) -> &mut [Point<F26Dot6>] {
        &mut self.points
    }

    pub fn flags(&self) -> &[PointFlags] {
        &self.flags
    }

    /// Returns the index of the last point of each contour.
    pub fn contour_ends(&self) -> &[u16] {
        &self.contours
    }

    /// Returns an iterator over the point ranges of each contour.
    pub fn contours(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        contour_ranges(&self.contours)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Computes the fill direction from the signed area of all contours.
    ///
    /// An outline without points is reported as [`FillOrientation::TrueType`].
    pub fn orientation(&self) -> FillOrientation {
        if self.points.is_empty() {
            return FillOrientation::TrueType;
        }
        let cbox = self.control_box();
        if cbox.x_min == cbox.x_max || cbox.y_min == cbox.y_max {
            return FillOrientation::None;
        }
        let mut area: i128 = 0;
        for range in self.contours() {
            let points = &self.points[range];
            let Some(mut prev) = points.last().copied() else {
                continue;
            };
            for &cur in points {
                let dy = cur.y.to_bits() as i128 - prev.y.to_bits() as i128;
                let sx = cur.x.to_bits() as i128 + prev.x.to_bits() as i128;
                area += dy * sx;
                prev = cur;
            }
        }
        match area {
            a if a > 0 => FillOrientation::PostScript,
            a if a < 0 => FillOrientation::TrueType,
            _ => FillOrientation::None,
        }
    }

    /// Returns the box containing all points, including off curve control
    /// points.
    pub fn control_box(&self) -> BoundingBox<F26Dot6> {
        BoundingBox::from_points(self.points.iter().copied()).unwrap_or_default()
    }

    /// Moves every point by the given offset.
    pub fn translate(&mut self, dx: F26Dot6, dy: F26Dot6) {
        let offset = Point::new(dx, dy);
        for point in &mut self.points {
            *point += offset;
        }
    }

    /// Applies a linear transform to every point.
    ///
    /// Flags and contours are unchanged.
    pub fn transform(&mut self, matrix: &Matrix) {
        for point in &mut self.points {
            *point = matrix.transform_point(*point);
        }
    }

    /// Widens the outline by `x_strength` horizontally and `y_strength`
    /// vertically.
    ///
    /// Each contour is offset by half the strength on each side along the
    /// bisectors of its corners, and then moved so that the bottom left of
    /// the outline stays in place. The result is `x_strength` wider and
    /// `y_strength` taller. Negative strengths thin the outline.
    ///
    /// Corners sharper than about 160 degrees are moved without offset and
    /// offsets are limited by the length of the adjacent segments so that
    /// short segments do not flip over.
    ///
    /// This follows FreeType's `FT_Outline_EmboldenXY`.
    pub fn embolden(
        &mut self,
        x_strength: F26Dot6,
        y_strength: F26Dot6,
    ) -> Result<(), ShapeError> {
        let strength = Point::new(x_strength.to_bits() / 2, y_strength.to_bits() / 2);
        if strength.x == 0 && strength.y == 0 {
            return Ok(());
        }
        let is_truetype = match self.orientation() {
            FillOrientation::None if self.contours.is_empty() => return Ok(()),
            FillOrientation::None => return Err(ShapeError::InvalidOutline),
            orientation => orientation == FillOrientation::TrueType,
        };
        let Self {
            points, contours, ..
        } = self;
        for range in contour_ranges(contours) {
            embolden_contour(&mut points[range], strength, is_truetype);
        }
        Ok(())
    }
}

fn contour_ranges(ends: &[u16]) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut start = 0;
    ends.iter().map(move |&end| {
        let range = start..end as usize + 1;
        start = range.end;
        range
    })
}

/// Offsets the points of a single closed contour.
///
/// `i` trails behind `j` and only advances when points are moved; `k` marks
/// the first point that was moved so the walk stops after one full turn.
fn embolden_contour(points: &mut [Point<F26Dot6>], strength: Point<i32>, is_truetype: bool) {
    let Some(last) = points.len().checked_sub(1) else {
        return;
    };
    let next = |ix: usize| if ix < last { ix + 1 } else { 0 };
    let mut in_dir = Point::new(0, 0);
    let mut in_len = 0;
    let mut anchor = Point::new(0, 0);
    let mut anchor_len = 0;
    let mut i = last;
    let mut j = 0;
    let mut k: Option<usize> = None;
    while j != i && Some(i) != k {
        let (out_dir, out_len) = if Some(j) != k {
            let v = Point::new(
                points[j].x.to_bits().wrapping_sub(points[i].x.to_bits()),
                points[j].y.to_bits().wrapping_sub(points[i].y.to_bits()),
            );
            let (dir, len) = math::normalize(v);
            if len == 0 {
                j = next(j);
                continue;
            }
            (dir, len)
        } else {
            (anchor, anchor_len)
        };
        if in_len != 0 {
            if k.is_none() {
                k = Some(i);
                anchor = in_dir;
                anchor_len = in_len;
            }
            let shift = corner_shift(in_dir, in_len, out_dir, out_len, strength, is_truetype);
            while i != j {
                let point = &mut points[i];
                *point = Point::new(
                    F26Dot6::from_bits(point.x.to_bits() + strength.x + shift.x),
                    F26Dot6::from_bits(point.y.to_bits() + strength.y + shift.y),
                );
                i = next(i);
            }
        } else {
            i = j;
        }
        in_dir = out_dir;
        in_len = out_len;
        j = next(j);
    }
}

/// Offset of a corner along the lateral bisector of its incoming and
/// outgoing unit directions.
fn corner_shift(
    in_dir: Point<i32>,
    in_len: i32,
    out_dir: Point<i32>,
    out_len: i32,
    strength: Point<i32>,
    is_truetype: bool,
) -> Point<i32> {
    let d = math::mul(in_dir.x, out_dir.x) + math::mul(in_dir.y, out_dir.y);
    // shift only if turn is less than ~160 degrees
    if d <= -0xF000 {
        return Point::new(0, 0);
    }
    let d = d + 0x10000;
    let mut shift = Point::new(in_dir.y + out_dir.y, in_dir.x + out_dir.x);
    let mut q = math::mul(out_dir.x, in_dir.y) - math::mul(out_dir.y, in_dir.x);
    if is_truetype {
        shift.x = -shift.x;
        q = -q;
    } else {
        shift.y = -shift.y;
    }
    // restrict shift magnitude to better handle collapsing segments
    let l = in_len.min(out_len);
    let limit = math::mul(l, d);
    shift.x = if math::mul(strength.x, q) <= limit {
        math::mul_div(shift.x, strength.x, d)
    } else {
        math::mul_div(shift.x, l, q)
    };
    shift.y = if math::mul(strength.y, q) <= limit {
        math::mul_div(shift.y, strength.y, d)
    } else {
        math::mul_div(shift.y, l, q)
    };
    shift
}
