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


use crate::{lanes::LanePool, overflow::Overflow};
use lane_alloc_core::length::Length;
use serde::Serialize;

/// Outcome of one allocation run: the filled lanes and what did not fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    lanes: LanePool,
    overflow: Overflow,
}

impl Allocation {
    #[inline]
    pub fn new(lanes: LanePool) -> Self {
        Self {
            lanes,
            overflow: Overflow::new(),
        }
    }

    #[inline]
    pub fn lanes(&self) -> &LanePool {
        &self.lanes
    }

    #[inline]
    pub fn lanes_mut(&mut self) -> &mut LanePool {
        &mut self.lanes
    }

    #[inline]
    pub fn overflow(&self) -> &Overflow {
        &self.overflow
    }

    #[inline]
    pub fn overflow_mut(&mut self) -> &mut Overflow {
        &mut self.overflow
    }

    #[inline]
    pub fn overflow_total(&self) -> Length {
        self.overflow.total()
    }

    #[inline]
    pub fn placed_total(&self) -> Length {
        self.lanes.total_occupied()
    }

    /// Every input centimetre ended up either on a lane or in the overflow.
    #[inline]
    pub fn conserves(&self, input_total: Length) -> bool {
        self.placed_total()
            .checked_add(self.overflow_total())
            .is_some_and(|sum| sum == input_total)
    }

    #[inline]
    pub fn into_parts(self) -> (LanePool, Overflow) {
        (self.lanes, self.overflow)
    }
}
