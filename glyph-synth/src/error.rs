//! Error types associated with style synthesis.

use crate::bitmap::PixelMode;
use core::fmt;

/// Errors that may occur when synthesizing a style.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// A computed delta, or a metric patched with it, does not fit in the
    /// 26.6 range. Nothing was modified.
    Overflow,
    /// The bitmap buffer could not be copied into storage owned by the
    /// glyph. Nothing was modified.
    BitmapOwnership,
    /// A shape primitive failed. The metrics were not modified.
    Shape(ShapeError),
}

/// Errors reported by the shape primitives of a
/// [`Shaper`](crate::Shaper).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ShapeError {
    /// The outline contains contours but their orientation could not be
    /// determined, or a contour end point is out of range.
    InvalidOutline,
    /// The operation does not support bitmaps with this pixel mode.
    UnsupportedPixelMode(PixelMode),
    /// The bitmap buffer is smaller than its dimensions require.
    InvalidBitmap,
    /// Bitmaps can only be emboldened with non-negative strengths.
    NegativeStrength,
    /// Allocation of a new bitmap buffer failed.
    OutOfMemory,
}

impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "synthesis parameter is too strong for the glyph"),
            Self::BitmapOwnership => {
                write!(f, "unable to take ownership of the glyph bitmap buffer")
            }
            Self::Shape(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidOutline => write!(f, "outline has invalid or degenerate contours"),
            Self::UnsupportedPixelMode(mode) => {
                write!(f, "bitmaps with pixel mode {mode:?} are not supported")
            }
            Self::InvalidBitmap => write!(f, "bitmap buffer is smaller than its dimensions"),
            Self::NegativeStrength => write!(f, "bitmaps cannot be emboldened with a negative strength"),
            Self::OutOfMemory => write!(f, "exceeded memory limits"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ShapeError {}
