//! fixed-point numerical types

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// shared between Fixed and F26Dot6
macro_rules! fixed_impl {
    ($name:ident, $bits:literal, $fract_bits:literal, $ty:ty) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
        #[repr(transparent)]
        #[doc = concat!(stringify!($bits), "-bit signed fixed point number with ", stringify!($fract_bits), " bits of fraction." )]
        pub struct $name($ty);
        impl $name {
            /// Minimum value.
            pub const MIN: Self = Self(<$ty>::MIN);

            /// Maximum value.
            pub const MAX: Self = Self(<$ty>::MAX);

            /// This type's smallest representable value
            pub const EPSILON: Self = Self(1);

            /// Representation of 0.0.
            pub const ZERO: Self = Self(0);

            /// Representation of 1.0.
            pub const ONE: Self = Self(1 << $fract_bits);

            /// Representation of -1.0.
            pub const NEG_ONE: Self = Self(-1 << $fract_bits);

            const INT_MASK: $ty = !0 << $fract_bits;
            const ROUND: $ty = 1 << ($fract_bits - 1);
            const FRACT_BITS: u32 = $fract_bits;

            /// Creates a new fixed point value from the underlying bit
            /// representation.
            #[inline(always)]
            pub const fn from_bits(bits: $ty) -> Self {
                Self(bits)
            }

            /// Returns the underlying bit representation of the value.
            #[inline(always)]
            pub const fn to_bits(self) -> $ty {
                self.0
            }

            /// Creates a fixed point value from an integer.
            ///
            /// The integer part is truncated to fit when out of range.
            #[inline(always)]
            pub const fn from_i32(i: i32) -> Self {
                Self((i as $ty).wrapping_shl(Self::FRACT_BITS))
            }

            /// Returns the integer part of the value, rounding toward
            /// negative infinity.
            #[inline(always)]
            pub const fn to_i32(self) -> i32 {
                (self.0 >> Self::FRACT_BITS) as i32
            }

            /// Returns the nearest integer value.
            pub fn round(self) -> Self {
                Self(self.0.wrapping_add(Self::ROUND) & Self::INT_MASK)
            }

            /// Returns the absolute value of the number.
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            /// Returns the largest integer less than or equal to the number.
            pub fn floor(self) -> Self {
                Self(self.0 & Self::INT_MASK)
            }

            /// Returns the smallest integer greater than or equal to the number.
            pub fn ceil(self) -> Self {
                Self(self.0.wrapping_add(Self::ONE.0 - 1) & Self::INT_MASK)
            }

            /// Returns the fractional part of the number.
            pub fn fract(self) -> Self {
                Self(self.0 - self.floor().0)
            }

            /// Wrapping addition.
            pub fn wrapping_add(self, other: Self) -> Self {
                Self(self.0.wrapping_add(other.0))
            }

            /// Saturating addition.
            pub fn saturating_add(self, other: Self) -> Self {
                Self(self.0.saturating_add(other.0))
            }

            /// Checked addition. Returns `None` on overflow.
            pub fn checked_add(self, other: Self) -> Option<Self> {
                self.0.checked_add(other.0).map(Self)
            }

            /// Wrapping subtraction.
            pub fn wrapping_sub(self, other: Self) -> Self {
                Self(self.0.wrapping_sub(other.0))
            }

            /// Saturating subtraction.
            pub fn saturating_sub(self, other: Self) -> Self {
                Self(self.0.saturating_sub(other.0))
            }

            /// Checked subtraction. Returns `None` on overflow.
            pub fn checked_sub(self, other: Self) -> Option<Self> {
                self.0.checked_sub(other.0).map(Self)
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, other: Self) -> Self {
                // same overflow semantics as std: panic in debug, wrap in release
                Self(self.0 + other.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, other: Self) {
                *self = *self + other;
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, other: Self) -> Self {
                Self(self.0 - other.0)
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, other: Self) {
                *self = *self - other;
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline(always)]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }
    };
}

/// impl float conversion methods.
///
/// We convert to different float types in order to ensure we can roundtrip
/// without floating point error.
macro_rules! float_conv {
    ($name:ident, $to:ident, $from:ident, $ty:ty) => {
        impl $name {
            #[doc = concat!("Creates a fixed point value from a", stringify!($ty), ".")]
            ///
            /// This operation is lossy; the float will be rounded to the nearest
            /// representable value.
            pub fn $from(x: $ty) -> Self {
                #[cfg(any(feature = "std", test))]
                return Self((x * Self::ONE.0 as $ty).round() as _);
                // rounds half away from zero, like `round` above
                #[cfg(all(not(feature = "std"), not(test)))]
                Self(
                    (x * Self::ONE.0 as $ty + if x.is_sign_negative() { -0.5 } else { 0.5 })
                        as _,
                )
            }

            #[doc = concat!("Returns the value as an ", stringify!($ty), ".")]
            ///
            /// This operation is lossless: all representable values can be
            /// round-tripped.
            pub fn $to(self) -> $ty {
                let int = ((self.0 & Self::INT_MASK) >> Self::FRACT_BITS) as $ty;
                let fract = (self.0 & !Self::INT_MASK) as $ty / Self::ONE.0 as $ty;
                int + fract
            }
        }
    };
}

macro_rules! float_fmt {
    ($name:ident, $to:ident) => {
        //hack: we can losslessly go to float, so use those fmt impls
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.$to(), f)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Debug::fmt(&self.$to(), f)
            }
        }
    };
}

fixed_impl!(Fixed, 32, 16, i32);
fixed_impl!(F26Dot6, 32, 6, i32);
float_conv!(Fixed, to_f64, from_f64, f64);
float_conv!(Fixed, to_f32, from_f32, f32);
float_conv!(F26Dot6, to_f64, from_f64, f64);
float_conv!(F26Dot6, to_f32, from_f32, f32);
float_fmt!(Fixed, to_f64);
float_fmt!(F26Dot6, to_f64);

/// 16.16 multiplication with rounding, equivalent to FreeType's `FT_MulFix`.
///
/// Halfway values are rounded away from zero.
#[inline(always)]
pub(crate) fn mul_fix(a: i64, b: i64) -> i64 {
    let ab = a * b;
    (ab + 0x8000 - (ab < 0) as i64) >> 16
}

/// Computes `a * b / c` with rounding, equivalent to FreeType's `FT_MulDiv`.
///
/// Division by zero saturates to the maximum magnitude with the sign of
/// the product.
pub(crate) fn mul_div(a: i64, b: i64, c: i64) -> i64 {
    let negative = (a < 0) ^ (b < 0) ^ (c < 0);
    let (a, b, c) = (a.unsigned_abs() as u128, b.unsigned_abs() as u128, c.unsigned_abs() as u128);
    let d = if c > 0 {
        ((a * b + (c >> 1)) / c).min(i64::MAX as u128) as i64
    } else {
        i32::MAX as i64
    };
    if negative {
        -d
    } else {
        d
    }
}

impl Fixed {
    /// Multiplies `self` by `b` and divides by `c` with a single rounding
    /// step.
    pub fn mul_div(self, b: Self, c: Self) -> Self {
        Self(mul_div(self.0 as i64, b.0 as i64, c.0 as i64) as i32)
    }

    /// Multiplies an integer quantity by this fixed point scale, rounding
    /// to the nearest integer.
    ///
    /// This is the operation used to convert font units to 26.6 pixels
    /// with a scale factor.
    pub fn mul_int(self, value: i32) -> i64 {
        mul_fix(value as i64, self.0 as i64)
    }
}

impl Mul for Fixed {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self::Output {
        Self(mul_fix(self.0 as i64, other.0 as i64) as i32)
    }
}

impl Div for Fixed {
    type Output = Self;
    #[inline(always)]
    fn div(self, other: Self) -> Self::Output {
        Self(mul_div(self.0 as i64, 0x10000, other.0 as i64) as i32)
    }
}

impl F26Dot6 {
    /// Returns the number of whole pixels, truncating the fractional part
    /// toward negative infinity.
    #[inline(always)]
    pub const fn to_pixels(self) -> i32 {
        self.0 >> 6
    }
}

#[cfg(test)]
mod tests {
    #![allow(overflowing_literals)] // we want to specify byte values directly
    use super::*;

    #[test]
    fn round_fixed() {
        assert_eq!(Fixed(0x0001_7FFE).round(), Fixed(0x0001_0000));
        assert_eq!(Fixed(0x0001_7FFF).round(), Fixed(0x0001_0000));
        assert_eq!(Fixed(0x0001_8000).round(), Fixed(0x0002_0000));
    }

    #[test]
    fn floor_ceil_f26dot6() {
        assert_eq!(F26Dot6(100).floor(), F26Dot6(64));
        assert_eq!(F26Dot6(100).ceil(), F26Dot6(128));
        assert_eq!(F26Dot6(128).ceil(), F26Dot6(128));
        assert_eq!(F26Dot6(-1).floor(), F26Dot6(-64));
        assert_eq!(F26Dot6(96).round(), F26Dot6(128));
        assert_eq!(F26Dot6(95).round(), F26Dot6(64));
    }

    #[test]
    fn fixed_floats() {
        assert_eq!(Fixed(0x7fff_0000), Fixed::from_f64(32767.));
        assert_eq!(Fixed(0x7000_0001), Fixed::from_f64(28672.00001525879));
        assert_eq!(Fixed(0x0001_0000), Fixed::from_f64(1.0));
        assert_eq!(Fixed(0x0000_0000), Fixed::from_f64(0.0));
        assert_eq!(
            Fixed(i32::from_be_bytes([0xff; 4])),
            Fixed::from_f64(-0.000015259)
        );
        // the default synthetic italic shear
        assert_eq!(Fixed(0x366A), Fixed::from_f32(0.21256));
    }

    #[test]
    fn f26dot6_floats() {
        assert_eq!(F26Dot6::from_f64(1.5).to_bits(), 96);
        assert_eq!(F26Dot6::from_f64(-1.5).to_bits(), -96);
        assert_eq!(F26Dot6(-96).to_f64(), -1.5);
        assert_eq!(F26Dot6::from_i32(3).to_bits(), 192);
        assert_eq!(F26Dot6(-1).to_pixels(), -1);
        assert_eq!(F26Dot6(191).to_pixels(), 2);
    }

    #[test]
    fn fixed_mul() {
        let half = Fixed::from_f64(0.5);
        assert_eq!(half * Fixed::from_i32(3), Fixed::from_f64(1.5));
        assert_eq!(Fixed::from_i32(-2) * half, Fixed::NEG_ONE);
        // FT_MulFix(2048, 0x8000) == 1024
        assert_eq!(Fixed::from_bits(0x8000).mul_int(2048), 1024);
        // rounding away from zero at the halfway point
        assert_eq!(mul_fix(1, 0x8000), 1);
        assert_eq!(mul_fix(-1, 0x8000), -1);
    }

    #[test]
    fn fixed_mul_div() {
        let a = Fixed::from_i32(6);
        let b = Fixed::from_i32(4);
        let c = Fixed::from_i32(8);
        assert_eq!(a.mul_div(b, c), Fixed::from_i32(3));
        assert_eq!((-a).mul_div(b, c), Fixed::from_i32(-3));
        assert_eq!(mul_div(5, 1, 2), 3);
        assert_eq!(mul_div(-5, 1, 2), -3);
        assert_eq!(mul_div(5, 1, 0), i32::MAX as i64);
        assert_eq!(Fixed::from_i32(3) / Fixed::from_i32(2), Fixed::from_f64(1.5));
    }

    #[test]
    fn checked_arithmetic() {
        assert_eq!(F26Dot6::MAX.checked_add(F26Dot6::EPSILON), None);
        assert_eq!(F26Dot6::MIN.checked_sub(F26Dot6::EPSILON), None);
        assert_eq!(
            F26Dot6::ONE.checked_add(F26Dot6::ONE),
            Some(F26Dot6::from_i32(2))
        );
    }
}
