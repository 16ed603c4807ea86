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


use lane_alloc_core::length::Length;
use serde::Serialize;

/// Vehicles that found no lane. Append-only, so the total never decreases.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Overflow {
    total: Length,
    vehicles: Vec<Length>,
}

impl Overflow {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, length: Length) {
        self.total += length;
        self.vehicles.push(length);
    }

    #[inline]
    pub fn total(&self) -> Length {
        self.total
    }

    /// Rejected lengths in rejection order.
    #[inline]
    pub fn vehicles(&self) -> &[Length] {
        &self.vehicles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl Extend<Length> for Overflow {
    fn extend<I: IntoIterator<Item = Length>>(&mut self, iter: I) {
        for length in iter {
            self.push(length);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_starts_empty() {
        let o = Overflow::new();
        assert!(o.is_empty());
        assert_eq!(o.total(), Length::zero());
    }

    #[test]
    fn test_overflow_tracks_total_and_order() {
        let mut o = Overflow::new();
        o.push(Length::new(5));
        o.extend([Length::new(1), Length::new(3)]);
        assert_eq!(o.total(), Length::new(9));
        assert_eq!(o.len(), 3);
        assert_eq!(
            o.vehicles(),
            &[Length::new(5), Length::new(1), Length::new(3)]
        );
    }
}
