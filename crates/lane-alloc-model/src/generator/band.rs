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


use crate::err::InvalidLengthBandError;
use lane_alloc_core::length::Length;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// `count` vehicles drawn uniformly from `[min, max]` (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LengthBand {
    pub count: usize,
    pub min: Length,
    pub max: Length,
}

impl LengthBand {
    #[inline]
    pub fn new(count: usize, min: Length, max: Length) -> Self {
        Self { count, min, max }
    }

    pub fn validate(&self) -> Result<(), InvalidLengthBandError> {
        if self.min.is_zero() || self.min > self.max {
            return Err(InvalidLengthBandError::new(self.min, self.max));
        }
        Ok(())
    }
}

impl Display for LengthBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LengthBand {{ count: {}, min: {}, max: {} }}",
            self.count, self.min, self.max
        )
    }
}

/// Vehicle mix observed on the ferry routes the heuristics were tuned for:
/// mostly cars between 3.5 m and 5 m, a tail of vans and a few lorries.
pub fn ferry_bands() -> Vec<LengthBand> {
    vec![
        LengthBand::new(100, Length::new(350), Length::new(399)),
        LengthBand::new(200, Length::new(400), Length::new(449)),
        LengthBand::new(100, Length::new(450), Length::new(499)),
        LengthBand::new(70, Length::new(500), Length::new(599)),
        LengthBand::new(30, Length::new(600), Length::new(2000)),
    ]
}
