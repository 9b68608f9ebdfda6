//! Scalar and fixed-size helpers for the hot color paths.
//!
//! Color transforms work on `[f64; 3]` triplets and `3x3` matrices; these
//! helpers avoid the nested [`Array`](crate::Array) form there.

/// A 3x3 matrix, row-major.
pub type Matrix3 = [[f64; 3]; 3];

/// A 3-component vector.
pub type Vector3 = [f64; 3];

/// `m * v` with `v` as a column vector.
#[inline]
pub fn dot3(m: &Matrix3, v: Vector3) -> Vector3 {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// `a * b` for 3x3 matrices.
pub fn matmul3(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// Inner product of two equal-length slices.
#[inline]
pub fn vdot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Clamps with optional bounds. NaN passes through untouched.
#[inline]
pub fn clamp(value: f64, lo: Option<f64>, hi: Option<f64>) -> f64 {
    match (lo, hi) {
        (Some(lo), _) if value < lo => lo,
        (_, Some(hi)) if value > hi => hi,
        _ => value,
    }
}

/// Replaces NaN with 0.
#[inline]
pub fn no_nan(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// Replaces every NaN with 0.
#[inline]
pub fn no_nans<const N: usize>(values: [f64; N]) -> [f64; N] {
    values.map(no_nan)
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// -1, 0 or 1; NaN stays NaN.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() { x } else { x.signum() }
}

/// Real cube root, negative inputs included.
#[inline]
pub fn cbrt(x: f64) -> f64 {
    x.cbrt()
}

/// Real `n`-th root. Odd roots keep the sign of `x`.
pub fn nth_root(x: f64, n: u32) -> f64 {
    match n {
        2 => x.sqrt(),
        3 => x.cbrt(),
        _ if n % 2 == 1 => x.signum() * x.abs().powf(1.0 / n as f64),
        _ => x.powf(1.0 / n as f64),
    }
}

/// Sign preserving power: `sign(x) * |x|^p`.
#[inline]
pub fn spow(x: f64, p: f64) -> f64 {
    x.signum() * x.abs().powf(p)
}

/// Wraps a hue angle into `[0, 360)`. NaN stays NaN.
#[inline]
pub fn constrain_hue(hue: f64) -> f64 {
    let h = hue.rem_euclid(360.0);
    if h >= 360.0 { 0.0 } else { h }
}

/// Chroma and hue (degrees) to rectangular `a`, `b`.
#[inline]
pub fn polar_to_rect(c: f64, h: f64) -> (f64, f64) {
    let r = h.to_radians();
    (c * r.cos(), c * r.sin())
}

/// Rectangular `a`, `b` to chroma and hue in `[0, 360)`.
#[inline]
pub fn rect_to_polar(a: f64, b: f64) -> (f64, f64) {
    (a.hypot(b), constrain_hue(b.atan2(a).to_degrees()))
}
