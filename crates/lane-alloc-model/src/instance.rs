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


use crate::err::{InvalidConfigurationError, ZeroLengthVehicleError};
use lane_alloc_core::length::Length;
use serde::Serialize;
use std::io::Write;

/// Checks the lane layout of a run.
#[inline]
pub fn ensure_lane_configuration(
    num_lanes: usize,
    capacity: Length,
) -> Result<(), InvalidConfigurationError> {
    if num_lanes == 0 {
        return Err(InvalidConfigurationError::ZeroLanes);
    }
    if capacity.is_zero() {
        return Err(InvalidConfigurationError::ZeroCapacity);
    }
    Ok(())
}

/// Checks that every vehicle has a positive length.
#[inline]
pub fn ensure_vehicle_lengths(vehicles: &[Length]) -> Result<(), InvalidConfigurationError> {
    match vehicles.iter().position(|v| v.is_zero()) {
        Some(index) => Err(ZeroLengthVehicleError::new(index).into()),
        None => Ok(()),
    }
}

/// A complete allocation problem: a deck of `num_lanes` lanes of equal
/// `capacity` and the vehicles in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    capacity: Length,
    num_lanes: usize,
    vehicles: Vec<Length>,
}

impl Instance {
    pub fn new(
        capacity: Length,
        num_lanes: usize,
        vehicles: Vec<Length>,
    ) -> Result<Self, InvalidConfigurationError> {
        ensure_lane_configuration(num_lanes, capacity)?;
        ensure_vehicle_lengths(&vehicles)?;
        Ok(Self {
            capacity,
            num_lanes,
            vehicles,
        })
    }

    #[inline]
    pub fn capacity(&self) -> Length {
        self.capacity
    }

    #[inline]
    pub fn num_lanes(&self) -> usize {
        self.num_lanes
    }

    #[inline]
    pub fn vehicles(&self) -> &[Length] {
        &self.vehicles
    }

    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn total_vehicle_length(&self) -> Length {
        self.vehicles.iter().sum()
    }

    /// Combined capacity of all lanes.
    #[inline]
    pub fn deck_length(&self) -> Length {
        Length::new(self.capacity.value().saturating_mul(self.num_lanes))
    }

    #[inline]
    pub fn into_vehicles(self) -> Vec<Length> {
        self.vehicles
    }

    /// Writes the instance in the two-line-header text format understood by
    /// [`crate::loader::InstanceLoader`].
    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "{}", self.capacity.value())?;
        writeln!(w, "{}", self.num_lanes)?;
        for v in &self.vehicles {
            writeln!(w, "{}", v.value())?;
        }
        w.flush()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceBuilder {
    capacity: Length,
    num_lanes: usize,
    vehicles: Vec<Length>,
}

impl InstanceBuilder {
    #[inline]
    pub fn new(capacity: Length, num_lanes: usize) -> Self {
        Self {
            capacity,
            num_lanes,
            vehicles: Vec::new(),
        }
    }

    #[inline]
    pub fn add_vehicle(&mut self, length: Length) -> &mut Self {
        self.vehicles.push(length);
        self
    }

    pub fn extend_vehicles<I>(&mut self, lengths: I) -> &mut Self
    where
        I: IntoIterator<Item = Length>,
    {
        self.vehicles.extend(lengths);
        self
    }

    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn build(self) -> Result<Instance, InvalidConfigurationError> {
        Instance::new(self.capacity, self.num_lanes, self.vehicles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lens(v: &[usize]) -> Vec<Length> {
        v.iter().copied().map(Length::new).collect()
    }

    #[test]
    fn test_instance_rejects_zero_lanes_and_capacity() {
        assert_eq!(
            Instance::new(Length::new(10), 0, lens(&[1])),
            Err(InvalidConfigurationError::ZeroLanes)
        );
        assert_eq!(
            Instance::new(Length::zero(), 2, lens(&[1])),
            Err(InvalidConfigurationError::ZeroCapacity)
        );
    }

    #[test]
    fn test_instance_rejects_zero_length_vehicle() {
        let err = Instance::new(Length::new(10), 2, lens(&[3, 0, 4])).unwrap_err();
        assert_eq!(
            err,
            InvalidConfigurationError::ZeroLengthVehicle(ZeroLengthVehicleError::new(1))
        );
    }

    #[test]
    fn test_instance_accepts_empty_vehicle_list() {
        let inst = Instance::new(Length::new(10), 1, Vec::new()).unwrap();
        assert_eq!(inst.vehicle_count(), 0);
        assert_eq!(inst.total_vehicle_length(), Length::zero());
    }

    #[test]
    fn test_builder_collects_vehicles_in_order() {
        let mut b = InstanceBuilder::new(Length::new(3000), 85);
        b.add_vehicle(Length::new(400))
            .extend_vehicles(lens(&[350, 1200]));
        assert_eq!(b.vehicle_count(), 3);
        let inst = b.build().unwrap();
        assert_eq!(inst.vehicles(), lens(&[400, 350, 1200]).as_slice());
        assert_eq!(inst.total_vehicle_length(), Length::new(1950));
        assert_eq!(inst.deck_length(), Length::new(255_000));
    }

    #[test]
    fn test_write_to_emits_header_then_lengths() {
        let inst = Instance::new(Length::new(10), 2, lens(&[6, 6, 4])).unwrap();
        let mut buf = Vec::new();
        inst.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "10\n2\n6\n6\n4\n");
    }
}
