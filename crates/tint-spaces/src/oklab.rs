//! Oklab and its cylindrical form Oklch.
//!
//! ```text
//! XYZ --M1--> LMS --cbrt--> LMS' --M2--> Lab
//! ```
//!
//! The matrices are the high precision variants that keep achromatic
//! colors at `a = b = 0` for a D65 white.

use tint_core::{Channel, Space, SpaceKind};
use tint_math::scalar::dot3;
use tint_math::Matrix3;

use crate::polar::{lab_to_lch, lch_to_lab};

const XYZ_TO_LMS: Matrix3 = [
    [0.819022437996703, 0.3619062600528904, -0.12887378152098788],
    [0.03298365393238847, 0.9292868615863433, 0.03614466635064236],
    [0.0481771893596242, 0.2642395317527308, 0.6335478284694308],
];

const LMS_TO_XYZ: Matrix3 = [
    [1.2268798758459243, -0.5578149944602171, 0.2813910456659646],
    [-0.04057574521480084, 1.1122868032803173, -0.07171105806551635],
    [-0.07637293667466007, -0.42149333240224324, 1.5869240198367818],
];

const LMS3_TO_OKLAB: Matrix3 = [
    [0.2104542553, 0.793617785, -0.0040720468],
    [1.9779984951, -2.428592205, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.808675766],
];

const OKLAB_TO_LMS3: Matrix3 = [
    [0.9999999984505198, 0.39633779217376786, 0.2158037580607588],
    [1.0000000088817609, -0.10556134232365635, -0.06385417477170591],
    [1.0000000546724108, -0.08948418209496575, -1.2914855378640917],
];

/// Chroma under which an Oklab/Oklch color reads as gray.
const ACHROMATIC: f64 = 1e-4;

static OKLAB_CHANNELS: [Channel; 3] = [
    Channel::unbounded("l", 0.0, 1.0),
    Channel::unbounded("a", -0.4, 0.4),
    Channel::unbounded("b", -0.4, 0.4),
];

static OKLCH_CHANNELS: [Channel; 3] = [
    Channel::unbounded("l", 0.0, 1.0),
    Channel::unbounded("c", 0.0, 0.4),
    Channel::angle("h"),
];

/// XYZ D65 to Oklab.
pub fn xyz_to_oklab(xyz: [f64; 3]) -> [f64; 3] {
    let lms = dot3(&XYZ_TO_LMS, xyz).map(f64::cbrt);
    dot3(&LMS3_TO_OKLAB, lms)
}

/// Oklab to XYZ D65.
pub fn oklab_to_xyz(lab: [f64; 3]) -> [f64; 3] {
    let lms = dot3(&OKLAB_TO_LMS3, lab).map(|v| v * v * v);
    dot3(&LMS_TO_XYZ, lms)
}

/// Oklab.
#[derive(Debug, Default, Clone, Copy)]
pub struct Oklab;

impl Space for Oklab {
    fn name(&self) -> &'static str {
        "oklab"
    }

    fn base(&self) -> Option<&'static str> {
        Some("xyz-d65")
    }

    fn channels(&self) -> &[Channel; 3] {
        &OKLAB_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Lab
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        oklab_to_xyz(coords)
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        xyz_to_oklab(coords)
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        coords[1].hypot(coords[2]) < ACHROMATIC
    }
}

/// Oklch, the cylindrical form of [`Oklab`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Oklch;

impl Space for Oklch {
    fn name(&self) -> &'static str {
        "oklch"
    }

    fn base(&self) -> Option<&'static str> {
        Some("oklab")
    }

    fn channels(&self) -> &[Channel; 3] {
        &OKLCH_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Lch
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        lch_to_lab(coords)
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        lab_to_lch(coords)
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        coords[1] < ACHROMATIC
    }
}
