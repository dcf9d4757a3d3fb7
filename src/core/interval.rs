use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Border inclusion flags of an [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BorderFlags(u8);

impl BorderFlags {
    /// Both bounds belong to the interval.
    pub const INCLUDE_BOTH: Self = Self(0x00);
    /// The lower bound is not part of the interval.
    pub const EXCLUDE_LOWER: Self = Self(0x01);
    /// The upper bound is not part of the interval.
    pub const EXCLUDE_UPPER: Self = Self(0x02);
    /// Neither bound is part of the interval.
    pub const EXCLUDE_BOTH: Self = Self(0x03);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn excludes_lower(self) -> bool {
        self.intersects(Self::EXCLUDE_LOWER)
    }

    #[must_use]
    pub const fn excludes_upper(self) -> bool {
        self.intersects(Self::EXCLUDE_UPPER)
    }

    /// Swaps the meaning of the lower and upper exclusion bits.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        let mut bits = 0;
        if self.excludes_lower() {
            bits |= Self::EXCLUDE_UPPER.0;
        }
        if self.excludes_upper() {
            bits |= Self::EXCLUDE_LOWER.0;
        }
        Self(bits)
    }
}

impl BitOr for BorderFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for BorderFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Value range with explicit border inclusion.
///
/// `Interval` is a plain value: every operation returns a new interval and
/// degenerate input produces an invalid interval instead of an error.
/// The default value is the invalid interval `[0, -1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    min_value: f64,
    max_value: f64,
    #[serde(default)]
    border_flags: BorderFlags,
}

impl Default for Interval {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: -1.0,
            border_flags: BorderFlags::INCLUDE_BOTH,
        }
    }
}

impl Interval {
    /// Creates a closed interval.
    #[must_use]
    pub const fn new(min_value: f64, max_value: f64) -> Self {
        Self::with_border_flags(min_value, max_value, BorderFlags::INCLUDE_BOTH)
    }

    #[must_use]
    pub const fn with_border_flags(min_value: f64, max_value: f64, flags: BorderFlags) -> Self {
        Self {
            min_value,
            max_value,
            border_flags: flags,
        }
    }

    #[must_use]
    pub const fn min_value(self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub const fn max_value(self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub const fn border_flags(self) -> BorderFlags {
        self.border_flags
    }

    pub fn set_interval(&mut self, min_value: f64, max_value: f64) {
        self.min_value = min_value;
        self.max_value = max_value;
    }

    pub fn set_min_value(&mut self, min_value: f64) {
        self.min_value = min_value;
    }

    pub fn set_max_value(&mut self, max_value: f64) {
        self.max_value = max_value;
    }

    pub fn set_border_flags(&mut self, flags: BorderFlags) {
        self.border_flags = flags;
    }

    /// `min <= max`, or `min < max` when any border is excluded.
    #[must_use]
    pub fn is_valid(self) -> bool {
        if self.border_flags == BorderFlags::INCLUDE_BOTH {
            self.min_value <= self.max_value
        } else {
            self.min_value < self.max_value
        }
    }

    /// Valid interval of zero width.
    #[must_use]
    pub fn is_null(self) -> bool {
        self.is_valid() && self.min_value >= self.max_value
    }

    /// `max - min`, or `0.0` when the interval is invalid.
    #[must_use]
    pub fn width(self) -> f64 {
        if self.is_valid() {
            self.max_value - self.min_value
        } else {
            0.0
        }
    }

    /// Turns the interval into the invalid `[0, -1]`, keeping its flags.
    pub fn invalidate(&mut self) {
        self.min_value = 0.0;
        self.max_value = -1.0;
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        if !self.is_valid() {
            return false;
        }
        if value < self.min_value || value > self.max_value {
            return false;
        }
        if value == self.min_value && self.border_flags.excludes_lower() {
            return false;
        }
        if value == self.max_value && self.border_flags.excludes_upper() {
            return false;
        }
        true
    }

    /// Swaps inverted bounds.
    ///
    /// A zero-width interval that excludes only its lower bound is inverted
    /// too, so the exclusion ends up on the upper side.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.min_value > self.max_value {
            return self.inverted();
        }
        if self.min_value == self.max_value && self.border_flags == BorderFlags::EXCLUDE_LOWER {
            return self.inverted();
        }
        self
    }

    /// Swaps bounds and mirrors the exclusion flags.
    #[must_use]
    pub fn inverted(self) -> Self {
        Self::with_border_flags(
            self.max_value,
            self.min_value,
            self.border_flags.mirrored(),
        )
    }

    /// Smallest interval covering both.
    ///
    /// A border is excluded only if every interval contributing that bound
    /// excludes it. An invalid operand is ignored.
    #[must_use]
    pub fn unite(self, other: Self) -> Self {
        if !self.is_valid() {
            return if other.is_valid() {
                other
            } else {
                Self::default()
            };
        }
        if !other.is_valid() {
            return self;
        }

        let (min_value, lower_excluded) = if self.min_value < other.min_value {
            (self.min_value, self.border_flags.excludes_lower())
        } else if other.min_value < self.min_value {
            (other.min_value, other.border_flags.excludes_lower())
        } else {
            (
                self.min_value,
                self.border_flags.excludes_lower() && other.border_flags.excludes_lower(),
            )
        };

        let (max_value, upper_excluded) = if self.max_value > other.max_value {
            (self.max_value, self.border_flags.excludes_upper())
        } else if other.max_value > self.max_value {
            (other.max_value, other.border_flags.excludes_upper())
        } else {
            (
                self.max_value,
                self.border_flags.excludes_upper() && other.border_flags.excludes_upper(),
            )
        };

        Self::with_border_flags(
            min_value,
            max_value,
            flags_from(lower_excluded, upper_excluded),
        )
    }

    /// Overlap of both intervals.
    ///
    /// A border is excluded if any interval contributing that bound excludes
    /// it. Disjoint or invalid operands give an invalid interval.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        if !self.is_valid() || !other.is_valid() {
            return Self::default();
        }

        let (i1, i2) = order_by_lower(self, other);
        if i1.max_value < i2.min_value {
            return Self::default();
        }
        if i1.max_value == i2.min_value
            && (i1.border_flags.excludes_upper() || i2.border_flags.excludes_lower())
        {
            return Self::default();
        }

        let min_value = i2.min_value;
        let lower_excluded = if i1.min_value == i2.min_value {
            i1.border_flags.excludes_lower() || i2.border_flags.excludes_lower()
        } else {
            i2.border_flags.excludes_lower()
        };

        let (max_value, upper_excluded) = if i1.max_value < i2.max_value {
            (i1.max_value, i1.border_flags.excludes_upper())
        } else if i2.max_value < i1.max_value {
            (i2.max_value, i2.border_flags.excludes_upper())
        } else {
            (
                i1.max_value,
                i1.border_flags.excludes_upper() || i2.border_flags.excludes_upper(),
            )
        };

        Self::with_border_flags(
            min_value,
            max_value,
            flags_from(lower_excluded, upper_excluded),
        )
    }

    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }

        let (i1, i2) = order_by_lower(self, other);
        if i1.max_value > i2.min_value {
            return true;
        }
        if i1.max_value == i2.min_value {
            return !(i1.border_flags.excludes_upper() || i2.border_flags.excludes_lower());
        }
        false
    }

    /// Extends the interval so that `value` becomes its center.
    ///
    /// The result is closed; invalid intervals are returned unchanged.
    #[must_use]
    pub fn symmetrize(self, value: f64) -> Self {
        if !self.is_valid() {
            return self;
        }

        let delta = (value - self.max_value)
            .abs()
            .max((value - self.min_value).abs());
        Self::new(value - delta, value + delta)
    }

    /// Clips both bounds into `[lower_bound, upper_bound]`, keeping the flags.
    #[must_use]
    pub fn limited(self, lower_bound: f64, upper_bound: f64) -> Self {
        if !self.is_valid() || lower_bound > upper_bound {
            return Self::default();
        }

        let min_value = self.min_value.max(lower_bound).min(upper_bound);
        let max_value = self.max_value.max(lower_bound).min(upper_bound);
        Self::with_border_flags(min_value, max_value, self.border_flags)
    }

    /// Grows the interval to include `value`. Invalid intervals stay as they are.
    #[must_use]
    pub fn extend(self, value: f64) -> Self {
        if !self.is_valid() {
            return self;
        }

        Self::with_border_flags(
            value.min(self.min_value),
            value.max(self.max_value),
            self.border_flags,
        )
    }
}

impl BitOr for Interval {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.unite(rhs)
    }
}

impl BitAnd for Interval {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl BitOrAssign<f64> for Interval {
    fn bitor_assign(&mut self, value: f64) {
        *self = self.extend(value);
    }
}

fn flags_from(lower_excluded: bool, upper_excluded: bool) -> BorderFlags {
    let mut flags = BorderFlags::INCLUDE_BOTH;
    if lower_excluded {
        flags = flags | BorderFlags::EXCLUDE_LOWER;
    }
    if upper_excluded {
        flags = flags | BorderFlags::EXCLUDE_UPPER;
    }
    flags
}

// Lower minimum first; on a tie the interval including its lower bound first.
fn order_by_lower(lhs: Interval, rhs: Interval) -> (Interval, Interval) {
    if lhs.min_value > rhs.min_value
        || (lhs.min_value == rhs.min_value && lhs.border_flags.excludes_lower())
    {
        (rhs, lhs)
    } else {
        (lhs, rhs)
    }
}
