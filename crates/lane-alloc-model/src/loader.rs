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


use crate::{
    err::{InstanceLoaderError, NegativeValueError},
    instance::{Instance, InstanceBuilder},
};
use lane_alloc_core::length::Length;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Reads instances in the plain text deck format:
///
/// ```text
/// <lane capacity>
/// <number of lanes>
/// <vehicle length>
/// <vehicle length>
/// ...
/// ```
///
/// Any whitespace separates values, blank lines are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceLoader {
    skip_zero_length: bool,
}

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop zero-length vehicles instead of rejecting the instance.
    #[inline]
    pub fn skip_zero_length(mut self, yes: bool) -> Self {
        self.skip_zero_length = yes;
        self
    }

    pub fn from_bufread<R: BufRead>(&self, br: R) -> Result<Instance, InstanceLoaderError> {
        let mut sc = Scanner::new(br);
        let capacity = sc
            .next_i64()?
            .ok_or(InstanceLoaderError::UnexpectedEof)?;
        let num_lanes = sc
            .next_i64()?
            .ok_or(InstanceLoaderError::UnexpectedEof)?;

        let capacity = non_negative("capacity", capacity)?;
        let num_lanes = non_negative("number of lanes", num_lanes)?;

        let mut builder = InstanceBuilder::new(Length::new(capacity), num_lanes);
        while let Some(v) = sc.next_i64()? {
            let v = non_negative("vehicle length", v)?;
            if v == 0 && self.skip_zero_length {
                continue;
            }
            builder.add_vehicle(Length::new(v));
        }

        Ok(builder.build()?)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Instance, InstanceLoaderError> {
        let file = File::open(path).map_err(InstanceLoaderError::Io)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance, InstanceLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

#[inline]
fn non_negative(field: &'static str, v: i64) -> Result<usize, NegativeValueError> {
    usize::try_from(v).map_err(|_| NegativeValueError::new(field, v))
}

#[derive(Debug)]
struct Scanner<R: BufRead> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Returns `false` once the reader is exhausted.
    #[inline]
    fn fill_line(&mut self) -> Result<bool, InstanceLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self
            .rdr
            .read_line(&mut self.buf)
            .map_err(InstanceLoaderError::Io)?;
        Ok(n != 0)
    }

    #[inline]
    fn skip_ws(&mut self) -> Result<bool, InstanceLoaderError> {
        loop {
            while self.pos < self.buf.len() && self.buf.as_bytes()[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < self.buf.len() {
                return Ok(true);
            }
            if !self.fill_line()? {
                return Ok(false);
            }
        }
    }

    #[inline]
    fn next_i64(&mut self) -> Result<Option<i64>, InstanceLoaderError> {
        if !self.skip_ws()? {
            return Ok(None);
        }
        let start = self.pos;
        while self.pos < self.buf.len() && !self.buf.as_bytes()[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let tok = &self.buf[start..self.pos];
        tok.parse::<i64>()
            .map(Some)
            .map_err(InstanceLoaderError::ParseInt)
    }
}
