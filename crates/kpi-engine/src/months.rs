//! A compact set of calendar months (1-12).

use std::fmt;

/// Months stored as bits `1..=12` of a `u16`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MonthSet(u16);

impl MonthSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b1_1111_1111_1110);

    /// Inclusive range `start..=end`. Empty when `start > end`; bounds outside
    /// `1..=12` are clamped.
    #[must_use]
    pub fn range(start: u8, end: u8) -> Self {
        let start = start.max(1);
        let end = end.min(12);
        (start..=end).collect()
    }

    #[must_use]
    pub const fn contains(self, month: u8) -> bool {
        month >= 1 && month <= 12 && self.0 & (1 << month) != 0
    }

    /// Add `month`. Months outside `1..=12` are ignored.
    pub fn insert(&mut self, month: u8) {
        if (1..=12).contains(&month) {
            self.0 |= 1 << month;
        }
    }

    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Latest month in the set.
    #[must_use]
    pub const fn last(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            #[allow(clippy::cast_possible_truncation)]
            Some((15 - self.0.leading_zeros()) as u8)
        }
    }

    /// Months in ascending order.
    pub fn iter(self) -> impl DoubleEndedIterator<Item = u8> {
        (1..=12).filter(move |&m| self.contains(m))
    }
}

impl FromIterator<u8> for MonthSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for month in iter {
            set.insert(month);
        }
        set
    }
}

impl fmt::Debug for MonthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
