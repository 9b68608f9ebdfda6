//! CIE XYZ (D65), the root of the conversion graph.

use tint_core::{Channel, Space, SpaceKind};

static CHANNELS: [Channel; 3] = [
    Channel::unbounded("x", 0.0, 0.95),
    Channel::unbounded("y", 0.0, 1.0),
    Channel::unbounded("z", 0.0, 1.09),
];

/// XYZ relative to a D65 white with Y = 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyzD65;

impl Space for XyzD65 {
    fn name(&self) -> &'static str {
        "xyz-d65"
    }

    fn base(&self) -> Option<&'static str> {
        None
    }

    fn channels(&self) -> &[Channel; 3] {
        &CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Xyz
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        coords
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        coords
    }
}
