//! RGB primaries and RGB/XYZ matrix generation.
//!
//! Matrices are derived from chromaticities rather than typed in, using the
//! general array algebra:
//!
//! ```text
//! P = [ xyz(r) xyz(g) xyz(b) ]      primaries as columns
//! S = P^-1 * xyz(w)                 per-primary scale
//! M = P * diag(S)                   RGB -> XYZ
//! ```

use tint_core::{xy_to_xyz, D65_XY};
use tint_math::{dot, inv, multiply, transpose, AlgebraResult, Array, Matrix3};

/// 3x3 identity, the fallback for degenerate primaries.
pub const IDENTITY3: Matrix3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// RGB gamut defined by three primaries and a white point (CIE xy).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary.
    pub r: [f64; 2],
    /// Green primary.
    pub g: [f64; 2],
    /// Blue primary.
    pub b: [f64; 2],
    /// White point.
    pub w: [f64; 2],
    /// Display name.
    pub name: &'static str,
}

/// sRGB / Rec.709.
pub const SRGB: Primaries = Primaries {
    r: [0.6400, 0.3300],
    g: [0.3000, 0.6000],
    b: [0.1500, 0.0600],
    w: D65_XY,
    name: "sRGB",
};

/// Display P3: DCI-P3 primaries with a D65 white.
pub const DISPLAY_P3: Primaries = Primaries {
    r: [0.6800, 0.3200],
    g: [0.2650, 0.6900],
    b: [0.1500, 0.0600],
    w: D65_XY,
    name: "Display P3",
};

/// Rec.2020 (shared by Rec.2100).
pub const REC2020: Primaries = Primaries {
    r: [0.7080, 0.2920],
    g: [0.1700, 0.7970],
    b: [0.1310, 0.0460],
    w: D65_XY,
    name: "Rec.2020",
};

/// RGB to XYZ matrix for a set of primaries.
pub fn rgb_to_xyz_matrix(p: &Primaries) -> AlgebraResult<Matrix3> {
    let cols = Array::from([xy_to_xyz(p.r), xy_to_xyz(p.g), xy_to_xyz(p.b)]);
    let m = transpose(&cols)?;
    let s = dot(&inv(&m)?, &Array::from(xy_to_xyz(p.w)))?;
    // row-wise broadcast scales column j by s[j]
    multiply(&m, &s)?.to_matrix3()
}

/// XYZ to RGB matrix, the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(p: &Primaries) -> AlgebraResult<Matrix3> {
    let m = Array::from(rgb_to_xyz_matrix(p)?);
    inv(&m)?.to_matrix3()
}

/// Both directions for one gamut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbMatrices {
    /// Linear RGB to XYZ.
    pub to_xyz: Matrix3,
    /// XYZ to linear RGB.
    pub from_xyz: Matrix3,
}

impl RgbMatrices {
    /// Builds both matrices. Degenerate primaries fall back to identity.
    pub fn from_primaries(p: &Primaries) -> Self {
        Self {
            to_xyz: rgb_to_xyz_matrix(p).unwrap_or(IDENTITY3),
            from_xyz: xyz_to_rgb_matrix(p).unwrap_or(IDENTITY3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tint_math::scalar::{dot3, matmul3};

    #[test]
    fn test_srgb_matrix() {
        let m = rgb_to_xyz_matrix(&SRGB).unwrap();
        assert_relative_eq!(m[0][0], 0.4123908, epsilon = 1e-6);
        assert_relative_eq!(m[1][1], 0.7151687, epsilon = 1e-6);
        assert_relative_eq!(m[2][2], 0.9505321, epsilon = 1e-6);
    }

    #[test]
    fn test_white_maps_to_white() {
        for p in [SRGB, DISPLAY_P3, REC2020] {
            let m = rgb_to_xyz_matrix(&p).unwrap();
            let w = dot3(&m, [1.0; 3]);
            let expected = xy_to_xyz(p.w);
            for i in 0..3 {
                assert_relative_eq!(w[i], expected[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_round_trip_is_identity() {
        let mx = RgbMatrices::from_primaries(&REC2020);
        let id = matmul3(&mx.from_xyz, &mx.to_xyz);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(id[i][j], IDENTITY3[i][j], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_degenerate_primaries_fall_back() {
        let flat = Primaries {
            r: [0.3, 0.3],
            g: [0.3, 0.3],
            b: [0.3, 0.3],
            w: D65_XY,
            name: "flat",
        };
        assert!(rgb_to_xyz_matrix(&flat).is_err());
        assert_eq!(RgbMatrices::from_primaries(&flat).to_xyz, IDENTITY3);
    }
}
