//! Parameters controlling synthetic styles.

use core::ops::{BitOr, BitOrAssign};

/// Shear ratio of the default synthetic oblique style.
///
/// This is `0x366A` in 16.16, a slant of roughly 12 degrees.
pub const DEFAULT_OBLIQUE: f32 = 0.21256;

/// Weight of a synthetic style.
///
/// The scale is relative to the plain weight: [`Weight::PLAIN`] (1.0)
/// produces no change, larger values thicken strokes and smaller values
/// thin them. Each unit away from plain corresponds to one twenty-fourth of
/// the em size.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weight(f32);

impl Weight {
    /// The plain weight. Applying it is a no-op.
    pub const PLAIN: Self = Self(1.0);

    /// The weight used by [`Synthesizer::embolden`](crate::Synthesizer::embolden).
    pub const BOLD: Self = Self(2.0);

    pub const fn from_f32(value: f32) -> Self {
        Self(value)
    }

    pub const fn to_f32(self) -> f32 {
        self.0
    }

    /// Distance from the plain weight.
    pub(crate) fn delta(self) -> f64 {
        self.0 as f64 - Self::PLAIN.0 as f64
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// Direction in which an oblique glyph leans.
///
/// For horizontal text, [`ToRight`](Self::ToRight) is the conventional
/// italic slant. [`ToBottom`](Self::ToBottom) is used for glyphs set in
/// vertical lines where the slant follows the line direction.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Posture {
    /// Lean toward the trailing edge of the glyph.
    #[default]
    ToRight,
    /// Lean toward the bottom edge of the glyph.
    ToBottom,
}

/// Selects which metrics are adjusted after emboldening.
///
/// The shape always grows on both axes; these flags only control whether
/// the growth is reflected in the advance and size metrics. Disabling
/// [`GROW_X`](Self::GROW_X) keeps character spacing unchanged, for example.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthFlags(u8);

impl GrowthFlags {
    /// Neither axis is adjusted.
    pub const NONE: Self = Self(0);
    /// Horizontal advance and width are adjusted.
    pub const GROW_X: Self = Self(0x1);
    /// Vertical advance, height, top bearing and bitmap top are adjusted.
    pub const GROW_Y: Self = Self(0x2);
    /// Both axes are adjusted.
    pub const ALL: Self = Self(0x3);

    /// Creates flags from the given bits, ignoring unknown bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if all flags in `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for GrowthFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for GrowthFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for GrowthFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl core::fmt::Debug for GrowthFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut set = f.debug_set();
        if self.contains(Self::GROW_X) {
            set.entry(&"GROW_X");
        }
        if self.contains(Self::GROW_Y) {
            set.entry(&"GROW_Y");
        }
        set.finish()
    }
}

/// Glyph load flags forwarded to [`Shaper::embolden_bitmap`](crate::Shaper::embolden_bitmap).
///
/// The synthesis core does not interpret these; they exist so that a shaper
/// can make the same decisions the glyph loader made.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadFlags(u32);

impl LoadFlags {
    pub const DEFAULT: Self = Self(0);
    pub const NO_SCALE: Self = Self(1 << 0);
    pub const NO_HINTING: Self = Self(1 << 1);
    pub const RENDER: Self = Self(1 << 2);
    pub const NO_BITMAP: Self = Self(1 << 3);
    pub const VERTICAL_LAYOUT: Self = Self(1 << 4);
    pub const MONOCHROME: Self = Self(1 << 12);
    pub const COLOR: Self = Self(1 << 20);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if all flags in `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for LoadFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Full set of parameters for weight synthesis.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightParams {
    /// Weight applied to horizontal strokes.
    pub weight_x: Weight,
    /// Weight applied to vertical strokes.
    pub weight_y: Weight,
    pub load_flags: LoadFlags,
    pub growth: GrowthFlags,
}

impl WeightParams {
    /// Creates parameters with separate horizontal and vertical weights.
    pub fn new(weight_x: Weight, weight_y: Weight) -> Self {
        Self {
            weight_x,
            weight_y,
            ..Default::default()
        }
    }

    /// Creates parameters with the same weight on both axes.
    pub fn uniform(weight: Weight) -> Self {
        Self::new(weight, weight)
    }

    pub fn with_load_flags(mut self, load_flags: LoadFlags) -> Self {
        self.load_flags = load_flags;
        self
    }

    pub fn with_growth(mut self, growth: GrowthFlags) -> Self {
        self.growth = growth;
        self
    }
}

/// Bold on both axes with all metrics adjusted.
impl Default for WeightParams {
    fn default() -> Self {
        Self {
            weight_x: Weight::BOLD,
            weight_y: Weight::BOLD,
            load_flags: LoadFlags::DEFAULT,
            growth: GrowthFlags::ALL,
        }
    }
}
