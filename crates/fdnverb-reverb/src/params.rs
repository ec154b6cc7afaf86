//! User-facing reverb parameters and the partial-update mask.

/// The four user parameters.
///
/// Values outside their ranges are clamped by
/// [`ReverbModel::set_parameters`](crate::ReverbModel::set_parameters).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ReverbParams {
    /// Room size in [0, 1]; maps to decay time.
    pub roomsize: f32,
    /// High-frequency damping in [0, 1].
    pub damping: f32,
    /// Stereo width in [0, 100]. 0 is mono, 1 is the natural spread of the
    /// network, larger values push the channels into anti-phase.
    pub width: f32,
    /// Output level in [0, 1].
    pub level: f32,
}

impl ReverbParams {
    /// Largest accepted width.
    pub const WIDTH_MAX: f32 = 100.0;

    /// Copy of `self` with every field clamped to its range.
    ///
    /// Non-finite fields take the matching field of `fallback`.
    pub fn clamped_or(&self, fallback: &ReverbParams) -> ReverbParams {
        ReverbParams {
            roomsize: clamp_finite(self.roomsize, fallback.roomsize, 1.0),
            damping: clamp_finite(self.damping, fallback.damping, 1.0),
            width: clamp_finite(self.width, fallback.width, Self::WIDTH_MAX),
            level: clamp_finite(self.level, fallback.level, 1.0),
        }
    }

    /// Copy `other`'s fields selected by `mask` into `self`.
    pub fn merge(&mut self, other: &ReverbParams, mask: ParamMask) {
        if mask.contains(ParamMask::ROOMSIZE) {
            self.roomsize = other.roomsize;
        }
        if mask.contains(ParamMask::DAMPING) {
            self.damping = other.damping;
        }
        if mask.contains(ParamMask::WIDTH) {
            self.width = other.width;
        }
        if mask.contains(ParamMask::LEVEL) {
            self.level = other.level;
        }
    }
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            roomsize: 0.2,
            damping: 0.0,
            width: 0.5,
            level: 0.9,
        }
    }
}

fn clamp_finite(value: f32, fallback: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        fallback
    }
}

/// Selects which fields of a [`ReverbParams`] an update applies.
///
/// Lets a single slider move without restating the others.
///
/// # Example
///
/// ```rust
/// use fdnverb_reverb::ParamMask;
///
/// let mask = ParamMask::ROOMSIZE | ParamMask::DAMPING;
/// assert!(mask.contains(ParamMask::DAMPING));
/// assert!(!mask.contains(ParamMask::LEVEL));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamMask(u8);

impl ParamMask {
    /// No fields.
    pub const NONE: Self = Self(0);
    /// Room size.
    pub const ROOMSIZE: Self = Self(1 << 0);
    /// Damping.
    pub const DAMPING: Self = Self(1 << 1);
    /// Stereo width.
    pub const WIDTH: Self = Self(1 << 2);
    /// Output level.
    pub const LEVEL: Self = Self(1 << 3);
    /// Every field.
    pub const ALL: Self = Self(0b1111);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if any bit in `other` is set in `self`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the union of two masks.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bit pattern.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for ParamMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl core::ops::BitOr for ParamMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl core::ops::BitOrAssign for ParamMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
