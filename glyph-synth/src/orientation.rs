//! Classification of glyph transforms into canonical rotations.

use crate::GlyphSlot;
use glyph_types::Matrix;

/// Rotation of a glyph derived from its active transform.
///
/// Text laid out in vertical lines, or rotated by a layout engine, uses one
/// of the exact right angle rotation matrices. Any other transform is
/// [`Unknown`](Self::Unknown); there is no tolerance when matching.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// No rotation. Also used when there is no transform at all.
    #[default]
    Upright,
    Rotate90,
    Rotate180,
    Rotate270,
    /// Arbitrary transform that is not one of the canonical rotations.
    Unknown,
}

impl Orientation {
    /// Classifies the given transform. A missing transform is upright.
    pub fn from_matrix(matrix: Option<&Matrix>) -> Self {
        let Some(matrix) = matrix else {
            return Self::Upright;
        };
        match *matrix {
            Matrix::IDENTITY => Self::Upright,
            Matrix::ROTATE_90 => Self::Rotate90,
            Matrix::ROTATE_180 => Self::Rotate180,
            Matrix::ROTATE_270 => Self::Rotate270,
            _ => Self::Unknown,
        }
    }

    /// Classifies the transform of the face that owns the given slot.
    ///
    /// A missing slot is upright.
    pub fn of_slot(slot: Option<&GlyphSlot>) -> Self {
        slot.map(|slot| Self::from_matrix(slot.face.transform.as_ref()))
            .unwrap_or_default()
    }

    /// Returns the canonical rotation for the given angle in degrees,
    /// normalized into `0..360`.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            0 => Self::Upright,
            90 => Self::Rotate90,
            180 => Self::Rotate180,
            270 => Self::Rotate270,
            _ => Self::Unknown,
        }
    }

    /// Returns the rotation in degrees, or `None` for an unknown transform.
    pub const fn degrees(self) -> Option<i32> {
        match self {
            Self::Upright => Some(0),
            Self::Rotate90 => Some(90),
            Self::Rotate180 => Some(180),
            Self::Rotate270 => Some(270),
            Self::Unknown => None,
        }
    }

    /// Returns true for the four right angle rotations.
    pub const fn is_canonical(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Returns true if the angle, normalized into `0..360`, is one of the
/// canonical rotations.
pub fn is_canonical_degree(degrees: i32) -> bool {
    Orientation::from_degrees(degrees).is_canonical()
}

/// Returns true if glyphs with the given transform can be synthesized with
/// awareness of their rotation.
pub fn is_supported_matrix(matrix: Option<&Matrix>) -> bool {
    Orientation::from_matrix(matrix).is_canonical()
}
