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


use crate::instance::Instance;
use lane_alloc_core::length::Length;
use rand::Rng;

/// Anything that can hand out a finite, ordered batch of vehicle lengths.
///
/// Every draw gets its own RNG so that parallel trials stay reproducible.
/// Random sources take all of their randomness from `rng`; fixed sources
/// ignore it and return the same batch each time.
pub trait VehicleSource {
    fn draw_vehicles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Length>;
}

impl VehicleSource for Instance {
    #[inline]
    fn draw_vehicles<R: Rng + ?Sized>(&self, _rng: &mut R) -> Vec<Length> {
        self.vehicles().to_vec()
    }
}

impl VehicleSource for Vec<Length> {
    #[inline]
    fn draw_vehicles<R: Rng + ?Sized>(&self, _rng: &mut R) -> Vec<Length> {
        self.clone()
    }
}

impl<S: VehicleSource + ?Sized> VehicleSource for &S {
    #[inline]
    fn draw_vehicles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Length> {
        (**self).draw_vehicles(rng)
    }
}
