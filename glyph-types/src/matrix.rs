//! Two by two linear transformations with 16.16 coefficients.

use crate::{F26Dot6, Fixed, Point};
use std::ops::Mul;

/// A 2×2 linear transformation in 16.16 fixed point.
///
/// For a vector `(x, y)` the transformed vector is computed as
/// `x' = xx * x + xy * y` and `y' = yx * x + yy * y`.
///
/// This matches the layout of FreeType's `FT_Matrix`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
#[repr(C)]
pub struct Matrix {
    pub xx: Fixed,
    pub xy: Fixed,
    pub yx: Fixed,
    pub yy: Fixed,
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new(Fixed::ONE, Fixed::ZERO, Fixed::ZERO, Fixed::ONE);

    /// Rotation by 90 degrees.
    pub const ROTATE_90: Self = Self::new(Fixed::ZERO, Fixed::ONE, Fixed::NEG_ONE, Fixed::ZERO);

    /// Rotation by 180 degrees.
    pub const ROTATE_180: Self =
        Self::new(Fixed::NEG_ONE, Fixed::ZERO, Fixed::ZERO, Fixed::NEG_ONE);

    /// Rotation by 270 degrees.
    pub const ROTATE_270: Self = Self::new(Fixed::ZERO, Fixed::NEG_ONE, Fixed::ONE, Fixed::ZERO);

    /// Creates a new matrix from the given coefficients.
    pub const fn new(xx: Fixed, xy: Fixed, yx: Fixed, yy: Fixed) -> Self {
        Self { xx, xy, yx, yy }
    }

    /// Creates a new matrix from raw 16.16 coefficients.
    pub const fn from_bits(xx: i32, xy: i32, yx: i32, yy: i32) -> Self {
        Self::new(
            Fixed::from_bits(xx),
            Fixed::from_bits(xy),
            Fixed::from_bits(yx),
            Fixed::from_bits(yy),
        )
    }

    /// Returns true if this is the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Applies the transform to a point in 26.6 coordinates.
    ///
    /// Equivalent to FreeType's `FT_Vector_Transform`, except that results
    /// outside the 26.6 range saturate instead of wrapping.
    pub fn transform_point(&self, point: Point<F26Dot6>) -> Point<F26Dot6> {
        let x = point.x.to_bits();
        let y = point.y.to_bits();
        let tx = self.xx.mul_int(x) + self.xy.mul_int(y);
        let ty = self.yx.mul_int(x) + self.yy.mul_int(y);
        let narrow = |v: i64| F26Dot6::from_bits(v.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
        Point::new(narrow(tx), narrow(ty))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Composition: `(a * b)` applies `b` first, then `a`.
impl Mul for Matrix {
    type Output = Self;

    fn mul(self, b: Self) -> Self::Output {
        let a = self;
        Self {
            xx: a.xx * b.xx + a.xy * b.yx,
            xy: a.xx * b.xy + a.xy * b.yy,
            yx: a.yx * b.xx + a.yy * b.yx,
            yy: a.yx * b.xy + a.yy * b.yy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32) -> Point<F26Dot6> {
        Point::new(F26Dot6::from_i32(x), F26Dot6::from_i32(y))
    }

    #[test]
    fn rotations() {
        assert_eq!(Matrix::ROTATE_90.transform_point(pt(1, 0)), pt(0, -1));
        assert_eq!(Matrix::ROTATE_180.transform_point(pt(1, 2)), pt(-1, -2));
        assert_eq!(Matrix::ROTATE_270.transform_point(pt(1, 0)), pt(0, 1));
        assert_eq!(Matrix::IDENTITY.transform_point(pt(7, -3)), pt(7, -3));
    }

    #[test]
    fn compose() {
        assert_eq!(Matrix::ROTATE_90 * Matrix::ROTATE_90, Matrix::ROTATE_180);
        assert_eq!(Matrix::ROTATE_90 * Matrix::ROTATE_270, Matrix::IDENTITY);
        assert_eq!(Matrix::ROTATE_180 * Matrix::IDENTITY, Matrix::ROTATE_180);
        assert!((Matrix::ROTATE_180 * Matrix::ROTATE_180).is_identity());
    }

    #[test]
    fn shear() {
        // x' = x + 0.5 * y
        let shear = Matrix::from_bits(0x10000, 0x8000, 0, 0x10000);
        assert_eq!(shear.transform_point(pt(2, 4)), pt(4, 4));
    }

    #[test]
    fn out_of_range_saturates() {
        let shear = Matrix::from_bits(0x10000, 0x8000, 0, 0x10000);
        let max = Point::new(F26Dot6::MAX, F26Dot6::MAX);
        assert_eq!(shear.transform_point(max), max);
        let min = Point::new(F26Dot6::MIN, F26Dot6::MIN);
        assert_eq!(shear.transform_point(min), min);
    }
}
