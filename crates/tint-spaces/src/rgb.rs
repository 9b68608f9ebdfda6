//! RGB spaces.
//!
//! Every gamut is split into a linear space hanging off XYZ and an encoded
//! space hanging off the linear one:
//!
//! ```text
//! xyz-d65 <-- matrix --> srgb-linear <-- transfer --> srgb
//! ```
//!
//! Gamut mapping prefers the linear member: cube faces are flat there.

use tint_core::{Channel, DynamicRange, Space, SpaceKind};
use tint_math::scalar::dot3;

use crate::primaries::{Primaries, RgbMatrices};
use crate::transfer::Transfer;

/// Channels shared by every RGB space.
pub static RGB_CHANNELS: [Channel; 3] = [
    Channel::bounded("r", 0.0, 1.0),
    Channel::bounded("g", 0.0, 1.0),
    Channel::bounded("b", 0.0, 1.0),
];

/// Spread under which all three channels count as equal.
const GRAY_SPREAD: f64 = 1e-6;

fn is_gray(c: [f64; 3]) -> bool {
    let max = c[0].max(c[1]).max(c[2]);
    let min = c[0].min(c[1]).min(c[2]);
    max - min < GRAY_SPREAD
}

/// Linear-light RGB, one matrix away from XYZ.
#[derive(Debug, Clone)]
pub struct LinearRgb {
    name: &'static str,
    matrices: RgbMatrices,
    range: DynamicRange,
}

impl LinearRgb {
    /// Builds the space, deriving both matrices from `primaries`.
    pub fn new(name: &'static str, primaries: &Primaries) -> Self {
        Self {
            name,
            matrices: RgbMatrices::from_primaries(primaries),
            range: DynamicRange::Sdr,
        }
    }

    /// Conversion matrices.
    pub fn matrices(&self) -> &RgbMatrices {
        &self.matrices
    }
}

impl Space for LinearRgb {
    fn name(&self) -> &'static str {
        self.name
    }

    fn base(&self) -> Option<&'static str> {
        Some("xyz-d65")
    }

    fn channels(&self) -> &[Channel; 3] {
        &RGB_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Rgb
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        dot3(&self.matrices.to_xyz, coords)
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        dot3(&self.matrices.from_xyz, coords)
    }

    fn dynamic_range(&self) -> DynamicRange {
        self.range
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        is_gray(coords)
    }
}

/// Transfer-encoded RGB over a [`LinearRgb`].
#[derive(Debug, Clone)]
pub struct EncodedRgb {
    name: &'static str,
    linear: &'static str,
    transfer: Transfer,
    range: DynamicRange,
}

impl EncodedRgb {
    /// Encoded space `name` over the linear space `linear`.
    pub fn new(name: &'static str, linear: &'static str, transfer: Transfer) -> Self {
        Self {
            name,
            linear,
            transfer,
            range: DynamicRange::Sdr,
        }
    }

    /// Marks the space as high dynamic range.
    pub fn hdr(mut self) -> Self {
        self.range = DynamicRange::Hdr;
        self
    }

    /// Encoding curve.
    pub fn transfer(&self) -> Transfer {
        self.transfer
    }
}

impl Space for EncodedRgb {
    fn name(&self) -> &'static str {
        self.name
    }

    fn base(&self) -> Option<&'static str> {
        Some(self.linear)
    }

    fn channels(&self) -> &[Channel; 3] {
        &RGB_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Rgb
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        coords.map(|v| self.transfer.to_linear(v))
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        coords.map(|v| self.transfer.from_linear(v))
    }

    fn linear(&self) -> Option<&'static str> {
        Some(self.linear)
    }

    fn dynamic_range(&self) -> DynamicRange {
        self.range
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        is_gray(coords)
    }
}
