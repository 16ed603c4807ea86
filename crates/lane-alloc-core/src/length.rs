// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


use num_traits::{CheckedAdd, CheckedSub, SaturatingAdd, SaturatingSub, Zero};
use serde::{Deserialize, Serialize};
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Div, Sub, SubAssign},
};

/// A non-negative length in centimetres.
///
/// Used both for vehicle lengths and for lane capacities and fill levels.
/// Arithmetic through the operator traits panics on overflow and underflow;
/// use the `checked_*` and `saturating_*` variants where that can happen.
#[repr(transparent)]
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Length(usize);

impl std::fmt::Display for Length {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Length({})", self.0)
    }
}

impl From<usize> for Length {
    #[inline]
    fn from(v: usize) -> Self {
        Length(v)
    }
}

impl Length {
    #[inline]
    pub const fn new(v: usize) -> Self {
        Length(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Length)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Length)
    }

    #[inline]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Length(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Length(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    pub fn checked_div(self, rhs: usize) -> Option<Self> {
        self.0.checked_div(rhs).map(Length)
    }

    /// `true` if `self + rhs` does not exceed `limit`.
    ///
    /// Never overflows: a sum that would wrap is reported as not fitting.
    #[inline]
    pub fn fits_with(self, rhs: Self, limit: Self) -> bool {
        self.checked_add(rhs).is_some_and(|total| total <= limit)
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl Zero for Length {
    #[inline]
    fn zero() -> Self {
        Length::new(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Length {
    type Output = Length;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Length(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in Length + Length"),
        )
    }
}

impl CheckedAdd for Length {
    #[inline]
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Length)
    }
}

impl SaturatingAdd for Length {
    #[inline]
    fn saturating_add(&self, rhs: &Self) -> Self {
        Length(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Length {
    type Output = Length;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Length(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in Length - Length"),
        )
    }
}

impl CheckedSub for Length {
    #[inline]
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Length)
    }
}

impl SaturatingSub for Length {
    #[inline]
    fn saturating_sub(&self, rhs: &Self) -> Self {
        Length(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Length {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_add(rhs.0)
            .expect("overflow in Length += Length");
    }
}

impl SubAssign for Length {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_sub(rhs.0)
            .expect("underflow in Length -= Length");
    }
}

impl Div<usize> for Length {
    type Output = Length;

    #[inline]
    fn div(self, rhs: usize) -> Self::Output {
        Length(
            self.0
                .checked_div(rhs)
                .expect("division by zero in Length / scalar"),
        )
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Length> for Length {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + *x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_creation_and_zero() {
        assert_eq!(Length::new(5).value(), 5);
        assert!(Length::zero().is_zero());
        assert!(Length::new(1).is_positive());
        assert!(!Length::zero().is_positive());
    }

    #[test]
    fn test_length_display() {
        assert_eq!(format!("{}", Length::new(42)), "Length(42)");
    }

    #[test]
    fn test_length_add_sub() {
        let a = Length::new(7);
        let b = Length::new(3);
        assert_eq!(a + b, Length::new(10));
        assert_eq!(a - b, Length::new(4));

        let mut c = a;
        c += b;
        assert_eq!(c, Length::new(10));
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    #[should_panic(expected = "underflow in Length - Length")]
    fn test_length_sub_underflow_panics() {
        let _ = Length::new(1) - Length::new(2);
    }

    #[test]
    #[should_panic(expected = "overflow in Length + Length")]
    fn test_length_add_overflow_panics() {
        let _ = Length::new(usize::MAX) + Length::new(1);
    }

    #[test]
    fn test_length_checked_and_saturating() {
        assert_eq!(Length::new(1).checked_sub(Length::new(2)), None);
        assert_eq!(Length::new(usize::MAX).checked_add(Length::new(1)), None);
        assert_eq!(
            Length::new(1).saturating_sub(Length::new(2)),
            Length::zero()
        );
        assert_eq!(
            Length::new(usize::MAX).saturating_add(Length::new(5)),
            Length::new(usize::MAX)
        );
        assert_eq!(Length::new(10).checked_div(0), None);
        assert_eq!(Length::new(255_000) / 85, Length::new(3000));
    }

    #[test]
    fn test_length_fits_with() {
        let cap = Length::new(10);
        assert!(Length::new(6).fits_with(Length::new(4), cap));
        assert!(!Length::new(6).fits_with(Length::new(5), cap));
        assert!(!Length::new(usize::MAX).fits_with(Length::new(1), Length::new(usize::MAX)));
    }

    #[test]
    fn test_length_sum() {
        let v = [Length::new(1), Length::new(2), Length::new(3)];
        assert_eq!(v.iter().sum::<Length>(), Length::new(6));
        assert_eq!(v.into_iter().sum::<Length>(), Length::new(6));
    }

    #[test]
    fn test_length_serializes_transparently() {
        let json = serde_json::to_string(&Length::new(450)).unwrap();
        assert_eq!(json, "450");
        let back: Length = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Length::new(450));
    }
}
