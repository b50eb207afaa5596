//! Fixed point math helpers for outline processing.
//!
//! These are implemented in terms of glyph-types types when possible.

use glyph_types::{Fixed, Point};

/// 16.16 multiplication with rounding: (a * b) >> 16
#[inline(always)]
pub fn mul(a: i32, b: i32) -> i32 {
    (Fixed::from_bits(a) * Fixed::from_bits(b)).to_bits()
}

/// Fixed point multiply and divide: a * b / c
pub fn mul_div(a: i32, b: i32, c: i32) -> i32 {
    Fixed::from_bits(a)
        .mul_div(Fixed::from_bits(b), Fixed::from_bits(c))
        .to_bits()
}

/// Scales a vector to unit length in 16.16 and returns it along with its
/// original length, rounded to an integer in the input units.
///
/// A zero vector is returned unchanged with a zero length.
pub fn normalize(v: Point<i32>) -> (Point<i32>, i32) {
    if v.x == 0 && v.y == 0 {
        return (v, 0);
    }
    let x = v.x as f64;
    let y = v.y as f64;
    let len = x.hypot(y);
    let unit = Point::new(
        (x / len * 65536.0).round() as i32,
        (y / len * 65536.0).round() as i32,
    );
    (unit, len.round() as i32)
}
