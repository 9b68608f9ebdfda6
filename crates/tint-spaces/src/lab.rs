//! CIE Lab and LCh relative to D65.

use std::sync::LazyLock;

use tint_core::{xy_to_xyz, Channel, Space, SpaceKind, D65_XY};

use crate::polar::{lab_to_lch, lch_to_lab};

const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

/// Chroma under which a Lab/LCh color reads as gray.
const ACHROMATIC: f64 = 1e-2;

static WHITE: LazyLock<[f64; 3]> = LazyLock::new(|| xy_to_xyz(D65_XY));

static LAB_CHANNELS: [Channel; 3] = [
    Channel::unbounded("l", 0.0, 100.0),
    Channel::unbounded("a", -125.0, 125.0),
    Channel::unbounded("b", -125.0, 125.0),
];

static LCH_CHANNELS: [Channel; 3] = [
    Channel::unbounded("l", 0.0, 100.0),
    Channel::unbounded("c", 0.0, 150.0),
    Channel::angle("h"),
];

/// XYZ to Lab against `white`.
pub fn xyz_to_lab(xyz: [f64; 3], white: [f64; 3]) -> [f64; 3] {
    let f = |t: f64| {
        if t > EPSILON {
            t.cbrt()
        } else {
            (KAPPA * t + 16.0) / 116.0
        }
    };
    let fx = f(xyz[0] / white[0]);
    let fy = f(xyz[1] / white[1]);
    let fz = f(xyz[2] / white[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Lab to XYZ against `white`.
pub fn lab_to_xyz(lab: [f64; 3], white: [f64; 3]) -> [f64; 3] {
    let [l, a, b] = lab;
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;
    let inv = |f: f64| {
        let f3 = f * f * f;
        if f3 > EPSILON { f3 } else { (116.0 * f - 16.0) / KAPPA }
    };
    let y = if l > KAPPA * EPSILON { fy * fy * fy } else { l / KAPPA };
    [inv(fx) * white[0], y * white[1], inv(fz) * white[2]]
}

/// CIE Lab with a D65 white.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabD65;

impl Space for LabD65 {
    fn name(&self) -> &'static str {
        "lab-d65"
    }

    fn base(&self) -> Option<&'static str> {
        Some("xyz-d65")
    }

    fn channels(&self) -> &[Channel; 3] {
        &LAB_CHANNELS
    }

    fn kind(&self) -> SpaceKind {
        SpaceKind::Lab
    }

    fn to_base(&self, coords: [f64; 3]) -> [f64; 3] {
        lab_to_xyz(coords, *WHITE)
    }

    fn from_base(&self, coords: [f64; 3]) -> [f64; 3] {
        xyz_to_lab(coords, *WHITE)
    }

    fn is_achromatic(&self, coords: [f64; 3]) -> bool {
        coords[1].hypot(coords[2]) < ACHROMATIC
    }
}

/// Cylindrical CIE LCh with a D65 white.
#[derive(Debug, Default, Clone, Copy)]
pub struct LchD65;

impl Space for LchD65 {
    fn name(&self) -> &'static str {
        "lch-d65"
    }

    fn base(&self) -> Option<&'static str> {
        Some("lab-d65")
    }

    fn channels(&self) -> &[Channel; 3] {
        &LCH_CHANNELS
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_white_is_l100() {
        let lab = LabD65.from_base(*WHITE);
        assert_relative_eq!(lab[0], 100.0, epsilon = 1e-9);
        assert!(lab[1].abs() < 1e-9 && lab[2].abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_dark_and_light() {
        for xyz in [[0.001, 0.0008, 0.002], [0.3, 0.4, 0.5]] {
            let back = LabD65.to_base(LabD65.from_base(xyz));
            for i in 0..3 {
                assert_relative_eq!(back[i], xyz[i], epsilon = 1e-12);
            }
        }
    }
}
