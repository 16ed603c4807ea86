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


use super::band::{LengthBand, ferry_bands};
use crate::err::VehicleMixError;
use lane_alloc_core::length::Length;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Configuration for synthetic vehicle streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleMixConfig {
    pub(crate) bands: Vec<LengthBand>,
    pub(crate) shuffle: bool,
    pub(crate) seed: u64,
}

impl Default for VehicleMixConfig {
    fn default() -> Self {
        Self {
            bands: ferry_bands(),
            shuffle: true,
            seed: 42,
        }
    }
}

impl VehicleMixConfig {
    pub fn new(bands: Vec<LengthBand>, shuffle: bool, seed: u64) -> Result<Self, VehicleMixError> {
        let cfg = Self {
            bands,
            shuffle,
            seed,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Configs may also arrive through deserialization, so the generator
    /// re-runs this before sampling.
    pub fn validate(&self) -> Result<(), VehicleMixError> {
        if self.bands.is_empty() {
            return Err(VehicleMixError::NoBands);
        }
        for band in &self.bands {
            band.validate()?;
        }
        Ok(())
    }

    #[inline]
    pub fn bands(&self) -> &[LengthBand] {
        &self.bands
    }

    #[inline]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.bands.iter().map(|b| b.count).sum()
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Longest vehicle this mix can produce.
    #[inline]
    pub fn max_length(&self) -> Length {
        self.bands
            .iter()
            .map(|b| b.max)
            .max()
            .unwrap_or_else(Length::zero)
    }
}

impl Display for VehicleMixConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VehicleMixConfig {{ bands: [")?;
        for (i, b) in self.bands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{b}")?;
        }
        write!(f, "], shuffle: {}, seed: {} }}", self.shuffle, self.seed)
    }
}

/// Builder for `VehicleMixConfig`.
#[derive(Debug, Clone)]
pub struct VehicleMixConfigBuilder {
    bands: Vec<LengthBand>,
    shuffle: bool,
    seed: u64,
}

impl Default for VehicleMixConfigBuilder {
    fn default() -> Self {
        Self {
            bands: Vec::new(),
            shuffle: true,
            seed: rand::rng().random(),
        }
    }
}

impl VehicleMixConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn band(mut self, count: usize, min: Length, max: Length) -> Self {
        self.bands.push(LengthBand::new(count, min, max));
        self
    }

    pub fn bands(mut self, bands: impl IntoIterator<Item = LengthBand>) -> Self {
        self.bands.extend(bands);
        self
    }

    #[inline]
    pub fn ferry_mix(self) -> Self {
        self.bands(ferry_bands())
    }

    #[inline]
    pub fn shuffle(mut self, yes: bool) -> Self {
        self.shuffle = yes;
        self
    }

    pub fn random_seed(mut self) -> Self {
        self.seed = rand::rng().random();
        self
    }

    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<VehicleMixConfig, VehicleMixError> {
        VehicleMixConfig::new(self.bands, self.shuffle, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ferry_mix() {
        let cfg = VehicleMixConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.vehicle_count(), 500);
        assert_eq!(cfg.max_length(), Length::new(2000));
        assert!(cfg.shuffle());
    }

    #[test]
    fn test_builder_requires_bands() {
        assert_eq!(
            VehicleMixConfigBuilder::new().build(),
            Err(VehicleMixError::NoBands)
        );
    }

    #[test]
    fn test_builder_rejects_inverted_band() {
        let res = VehicleMixConfigBuilder::new()
            .band(3, Length::new(500), Length::new(400))
            .build();
        assert!(matches!(res, Err(VehicleMixError::InvalidBand(_))));
    }

    #[test]
    fn test_builder_sets_fields() {
        let cfg = VehicleMixConfigBuilder::new()
            .band(2, Length::new(10), Length::new(20))
            .shuffle(false)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(cfg.seed(), 7);
        assert!(!cfg.shuffle());
        assert_eq!(cfg.vehicle_count(), 2);
    }

    #[test]
    fn test_config_json_roundtrip_keeps_validation_input() {
        let cfg = VehicleMixConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: VehicleMixConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);

        let broken: VehicleMixConfig =
            serde_json::from_str(r#"{"bands":[],"shuffle":true,"seed":1}"#).unwrap();
        assert_eq!(broken.validate(), Err(VehicleMixError::NoBands));
    }
}
