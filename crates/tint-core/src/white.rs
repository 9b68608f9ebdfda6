//! Reference white points.
//!
//! Whites are stored as CIE 1931 2° xy chromaticities and expanded to XYZ
//! (Y = 1) on demand with [`xy_to_xyz`].

/// D65 chromaticity (sRGB, Display P3, Rec.2020, Oklab).
pub const D65_XY: [f64; 2] = [0.31270, 0.32900];

/// D50 chromaticity (ICC profile connection space).
pub const D50_XY: [f64; 2] = [0.34570, 0.35850];

/// xy chromaticity to XYZ with Y = 1. A zero `y` yields black.
#[inline]
pub fn xy_to_xyz(xy: [f64; 2]) -> [f64; 3] {
    let [x, y] = xy;
    if y.abs() < 1e-12 {
        [0.0; 3]
    } else {
        [x / y, 1.0, (1.0 - x - y) / y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_d65_xyz() {
        let w = xy_to_xyz(D65_XY);
        assert_relative_eq!(w[0], 0.950455927, epsilon = 1e-8);
        assert_eq!(w[1], 1.0);
        assert_relative_eq!(w[2], 1.089057751, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_y() {
        assert_eq!(xy_to_xyz([0.3, 0.0]), [0.0; 3]);
    }
}
