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
use std::{fmt::Display, num::ParseIntError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroLengthVehicleError {
    index: usize,
}

impl ZeroLengthVehicleError {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Position of the offending vehicle in the input sequence.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Display for ZeroLengthVehicleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vehicle at position {} has zero length", self.index)
    }
}

impl std::error::Error for ZeroLengthVehicleError {}

/// A run was configured with values no allocation can be performed with.
///
/// Checked once before a run starts, never per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidConfigurationError {
    ZeroLanes,
    ZeroCapacity,
    ZeroChunkSize,
    ZeroLengthVehicle(ZeroLengthVehicleError),
}

impl Display for InvalidConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InvalidConfigurationError::*;
        match self {
            ZeroLanes => write!(f, "Invalid configuration: number of lanes must be positive"),
            ZeroCapacity => write!(f, "Invalid configuration: lane capacity must be positive"),
            ZeroChunkSize => write!(f, "Invalid configuration: chunk size must be positive"),
            ZeroLengthVehicle(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl From<ZeroLengthVehicleError> for InvalidConfigurationError {
    fn from(err: ZeroLengthVehicleError) -> Self {
        Self::ZeroLengthVehicle(err)
    }
}

impl std::error::Error for InvalidConfigurationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NegativeValueError {
    field: &'static str,
    value: i64,
}

impl NegativeValueError {
    #[inline]
    pub fn new(field: &'static str, value: i64) -> Self {
        Self { field, value }
    }

    #[inline]
    pub fn field(&self) -> &'static str {
        self.field
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Display for NegativeValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must not be negative, got {}", self.field, self.value)
    }
}

impl std::error::Error for NegativeValueError {}

#[derive(Debug)]
pub enum InstanceLoaderError {
    Io(std::io::Error),
    ParseInt(ParseIntError),
    UnexpectedEof,
    NegativeValue(NegativeValueError),
    InvalidConfiguration(InvalidConfigurationError),
}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseIntError> for InstanceLoaderError {
    fn from(e: ParseIntError) -> Self {
        Self::ParseInt(e)
    }
}

impl From<NegativeValueError> for InstanceLoaderError {
    fn from(e: NegativeValueError) -> Self {
        Self::NegativeValue(e)
    }
}

impl From<InvalidConfigurationError> for InstanceLoaderError {
    fn from(e: InvalidConfigurationError) -> Self {
        Self::InvalidConfiguration(e)
    }
}

impl Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InstanceLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            ParseInt(e) => write!(f, "parse-int error: {e}"),
            UnexpectedEof => write!(f, "unexpected end of file while parsing instance header"),
            NegativeValue(e) => write!(f, "{e}"),
            InvalidConfiguration(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for InstanceLoaderError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidLengthBandError {
    min: Length,
    max: Length,
}

impl InvalidLengthBandError {
    #[inline]
    pub fn new(min: Length, max: Length) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn min(&self) -> Length {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Length {
        self.max
    }
}

impl Display for InvalidLengthBandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InvalidLengthBandError: band [{}, {}] must satisfy 0 < min <= max",
            self.min, self.max
        )
    }
}

impl std::error::Error for InvalidLengthBandError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleMixError {
    NoBands,
    InvalidBand(InvalidLengthBandError),
}

impl Display for VehicleMixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleMixError::NoBands => write!(f, "Vehicle mix has no length bands"),
            VehicleMixError::InvalidBand(e) => write!(f, "{e}"),
        }
    }
}

impl From<InvalidLengthBandError> for VehicleMixError {
    fn from(err: InvalidLengthBandError) -> Self {
        Self::InvalidBand(err)
    }
}

impl std::error::Error for VehicleMixError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        assert_eq!(
            InvalidConfigurationError::ZeroLanes.to_string(),
            "Invalid configuration: number of lanes must be positive"
        );
        let e: InvalidConfigurationError = ZeroLengthVehicleError::new(4).into();
        assert_eq!(
            e.to_string(),
            "Invalid configuration: Vehicle at position 4 has zero length"
        );
    }

    #[test]
    fn test_loader_error_from_conversions() {
        let e: InstanceLoaderError = NegativeValueError::new("capacity", -3).into();
        assert!(matches!(e, InstanceLoaderError::NegativeValue(_)));
        assert_eq!(e.to_string(), "capacity must not be negative, got -3");

        let parse = "x".parse::<i64>().unwrap_err();
        let e: InstanceLoaderError = parse.into();
        assert!(matches!(e, InstanceLoaderError::ParseInt(_)));
    }

    #[test]
    fn test_vehicle_mix_error_wraps_band_error() {
        let band = InvalidLengthBandError::new(Length::new(10), Length::new(5));
        let e: VehicleMixError = band.into();
        assert_eq!(e, VehicleMixError::InvalidBand(band));
        assert_eq!(band.min(), Length::new(10));
        assert_eq!(band.max(), Length::new(5));
    }
}
