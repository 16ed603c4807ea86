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

//! # Lane Allocation Model (`lane-alloc-model`)
//!
//! Describes deck-loading problems: a fixed number of lanes of equal
//! capacity and a stream of vehicles that arrive one after another.
//!
//! ## Key Data Structures
//!
//! - **`Instance`**: capacity, lane count and vehicle lengths in arrival order.
//!   Construction validates the configuration once, so solvers can rely on
//!   positive capacities and vehicle lengths.
//! - **`InstanceLoader`**: reads the two-line-header text format (capacity,
//!   number of lanes, then one length per line). `Instance::write_to` writes it.
//! - **`VehicleGenerator`**: samples synthetic streams from a banded length
//!   mix (`VehicleMixConfig`), seeded for reproducibility.
//! - **`VehicleSource`**: the seam through which solvers and experiments
//!   obtain vehicle streams.

pub mod err;
pub mod generator;
pub mod instance;
pub mod loader;
pub mod source;

pub mod prelude {
    pub use crate::err::{
        InstanceLoaderError, InvalidConfigurationError, InvalidLengthBandError,
        NegativeValueError, VehicleMixError, ZeroLengthVehicleError,
    };
    pub use crate::generator::{
        LengthBand, VehicleGenerator, VehicleMixConfig, VehicleMixConfigBuilder, ferry_bands,
    };
    pub use crate::instance::{
        Instance, InstanceBuilder, ensure_lane_configuration, ensure_vehicle_lengths,
    };
    pub use crate::loader::InstanceLoader;
    pub use crate::source::VehicleSource;
}
