use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
};

use fraction::{CheckedAdd, CheckedMul, Fraction};
use log::warn;

use super::{Ticks, TupletRatio};

/// Exact duration in ticks.
///
/// Whole ticks are the canonical clock, but tuplet scaling can produce
/// fractions of a tick, so the value is kept as a rational and never
/// rounded.
///
/// Arithmetic saturates at `Ticks::MAX`, like `Element::end_time`.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub struct Length {
    fraction: Fraction,
}
impl Length {
    pub fn zero() -> Self {
        Self::from_ticks(0)
    }
    pub fn max() -> Self {
        Self::from_ticks(Ticks::MAX)
    }
    pub fn from_ticks(ticks: Ticks) -> Self {
        Self {
            fraction: Fraction::new(ticks, 1_u64),
        }
    }
    pub fn get(&self) -> Fraction {
        self.fraction
    }
    /// Whole number of ticks, if the length has no fractional part.
    pub fn ticks(&self) -> Option<Ticks> {
        match (self.fraction.numer(), self.fraction.denom()) {
            (Some(numer), Some(1)) => Some(*numer),
            _ => None,
        }
    }
    pub fn is_zero(&self) -> bool {
        self.fraction.numer() == Some(&0)
    }
    /// Rescale written length into sounding length.
    ///
    /// # Example
    /// ```
    /// # use score_segment::primitives::{Length, TupletRatio};
    /// # use fraction::Fraction;
    /// let triplet = TupletRatio::new(3, 2).unwrap();
    /// let eighth = Length::from_ticks(48);
    /// assert_eq!(eighth.scaled(triplet), Length::from_ticks(32));
    /// assert_eq!(
    ///     Length::from_ticks(100).scaled(triplet).get(),
    ///     Fraction::new(200_u64, 3_u64)
    /// );
    /// ```
    pub fn scaled(&self, ratio: TupletRatio) -> Self {
        match self.fraction.checked_mul(&ratio.as_fraction()) {
            Some(fraction) => Self { fraction },
            None => {
                warn!("length {} scaled by {} overflows", self, ratio);
                Self::max()
            }
        }
    }
}
impl Default for Length {
    fn default() -> Self {
        Self::zero()
    }
}
impl From<Fraction> for Length {
    fn from(value: Fraction) -> Self {
        Self { fraction: value }
    }
}
impl From<Ticks> for Length {
    fn from(value: Ticks) -> Self {
        Self::from_ticks(value)
    }
}
impl Add for Length {
    fn add(self, rhs: Self) -> Self::Output {
        match self.fraction.checked_add(&rhs.fraction) {
            Some(fraction) => Self { fraction },
            None => {
                warn!("sum of lengths {} and {} overflows", self, rhs);
                Self::max()
            }
        }
    }
    type Output = Self;
}
impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl Sum for Length {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, len| acc + len)
    }
}
impl Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ticks() {
            Some(ticks) => write!(f, "{}", ticks),
            None => write!(f, "{}", self.fraction),
        }
    }
}

#[cfg(test)]
mod tests {
    use fraction::Fraction;

    use crate::primitives::{Length, TupletRatio};

    #[test]
    fn length() {
        let a = Length::from_ticks(96);
        let b = Length::from(Fraction::new(96_u64, 1_u64));
        assert_eq!(a, b);
        assert_eq!(a + b, Length::from_ticks(192));
        assert_eq!(a.ticks(), Some(96));
        assert!(Length::zero().is_zero());
        assert!(!a.is_zero());
    }

    #[test]
    fn fractional_ticks() {
        let triplet = TupletRatio::new(3, 2).unwrap();
        let third = Length::from_ticks(1).scaled(triplet);
        assert_eq!(third.ticks(), None);
        assert_eq!(third.to_string(), "2/3");
        let whole: Length = [third, third, third].into_iter().sum();
        assert_eq!(whole.ticks(), Some(2));
    }

    #[test]
    fn saturates_at_max() {
        let septuplet = TupletRatio::new(7, 4).unwrap();
        let huge = Length::from_ticks(u64::MAX);
        assert_eq!(huge.scaled(septuplet), Length::max());
        assert_eq!(huge + Length::from_ticks(1), Length::max());
        let mut sum = Length::from_ticks(u64::MAX - 1);
        sum += Length::from_ticks(96);
        assert_eq!(sum, Length::max());
        assert_eq!(sum.ticks(), Some(u64::MAX));
    }
}
