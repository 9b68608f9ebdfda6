//! Nested numeric arrays and shape handling.
//!
//! [`Array`] is the value type the algebra works on: a scalar or a sequence
//! of arrays. Operations flatten their operands into a dense row-major
//! buffer ([`Dense`]), work on that, and rebuild the nested form.
//!
//! ```text
//! Scalar(1.0)                    shape []
//! [1, 2, 3]                      shape [3]
//! [[1, 2, 3], [4, 5, 6]]         shape [2, 3]
//! [[1, 2], [3]]                  ragged, rejected
//! ```

use crate::error::{AlgebraError, AlgebraResult};
use crate::scalar::{Matrix3, Vector3};

/// Array shape: one length per dimension, `[]` for a scalar.
pub type Shape = Vec<usize>;

/// A scalar or an arbitrarily nested sequence of numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    /// A single number.
    Scalar(f64),
    /// A sequence of sub-arrays.
    Seq(Vec<Array>),
}

impl From<f64> for Array {
    fn from(v: f64) -> Self {
        Array::Scalar(v)
    }
}

impl From<Vec<f64>> for Array {
    fn from(v: Vec<f64>) -> Self {
        Array::Seq(v.into_iter().map(Array::Scalar).collect())
    }
}

impl From<&[f64]> for Array {
    fn from(v: &[f64]) -> Self {
        Array::Seq(v.iter().copied().map(Array::Scalar).collect())
    }
}

impl<const N: usize> From<[f64; N]> for Array {
    fn from(v: [f64; N]) -> Self {
        Array::from(&v[..])
    }
}

impl<const N: usize, const M: usize> From<[[f64; M]; N]> for Array {
    fn from(v: [[f64; M]; N]) -> Self {
        Array::Seq(v.into_iter().map(Array::from).collect())
    }
}

impl From<Vec<Vec<f64>>> for Array {
    fn from(v: Vec<Vec<f64>>) -> Self {
        Array::Seq(v.into_iter().map(Array::from).collect())
    }
}

impl From<Vec<Array>> for Array {
    fn from(v: Vec<Array>) -> Self {
        Array::Seq(v)
    }
}

impl Array {
    /// Returns the shape, failing on ragged input.
    pub fn shape(&self) -> AlgebraResult<Shape> {
        match self {
            Array::Scalar(_) => Ok(Vec::new()),
            Array::Seq(items) => {
                let Some(first) = items.first() else {
                    return Ok(vec![0]);
                };
                let inner = first.shape()?;
                for item in &items[1..] {
                    if item.shape()? != inner {
                        return Err(AlgebraError::Ragged);
                    }
                }
                let mut shape = Vec::with_capacity(inner.len() + 1);
                shape.push(items.len());
                shape.extend(inner);
                Ok(shape)
            }
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> AlgebraResult<usize> {
        Ok(self.shape()?.len())
    }

    /// Flattened row-major values. Does not validate the shape.
    pub fn ravel(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.ravel_into(&mut out);
        out
    }

    fn ravel_into(&self, out: &mut Vec<f64>) {
        match self {
            Array::Scalar(v) => out.push(*v),
            Array::Seq(items) => items.iter().for_each(|i| i.ravel_into(out)),
        }
    }

    /// Returns the scalar value, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Array::Scalar(v) => Some(*v),
            Array::Seq(_) => None,
        }
    }

    /// Converts a `[3, 3]` array into a fixed-size matrix.
    pub fn to_matrix3(&self) -> AlgebraResult<Matrix3> {
        let dense = Dense::from_array(self)?;
        if dense.shape != [3, 3] {
            return Err(AlgebraError::ShapeMismatch {
                op: "to_matrix3",
                a: dense.shape,
                b: vec![3, 3],
            });
        }
        let d = &dense.data;
        Ok([[d[0], d[1], d[2]], [d[3], d[4], d[5]], [d[6], d[7], d[8]]])
    }

    /// Converts a `[3]` array into a fixed-size vector.
    pub fn to_vector3(&self) -> AlgebraResult<Vector3> {
        let dense = Dense::from_array(self)?;
        if dense.shape != [3] {
            return Err(AlgebraError::ShapeMismatch {
                op: "to_vector3",
                a: dense.shape,
                b: vec![3],
            });
        }
        Ok([dense.data[0], dense.data[1], dense.data[2]])
    }
}

/// Shape of `x`; fails on ragged input.
pub fn shape(x: &Array) -> AlgebraResult<Shape> {
    x.shape()
}

/// Flattens `x` in row-major order.
pub fn ravel(x: &Array) -> Vec<f64> {
    x.ravel()
}

/// Re-lays-out the data of `x` into `new_shape`.
///
/// The element count must be unchanged. Reshaping a single element into `[]`
/// produces a scalar.
pub fn reshape(x: &Array, new_shape: &[usize]) -> AlgebraResult<Array> {
    let dense = Dense::from_array(x)?;
    let total: usize = new_shape.iter().product();
    if total != dense.data.len() {
        return Err(AlgebraError::Reshape {
            from: dense.shape,
            to: new_shape.to_vec(),
        });
    }
    Ok(Dense::new(new_shape.to_vec(), dense.data).into_array())
}

/// Array of `shape` filled with `value`.
pub fn full(shape: &[usize], value: f64) -> Array {
    let total = shape.iter().product();
    Dense::new(shape.to_vec(), vec![value; total]).into_array()
}

/// Array of zeros.
pub fn zeros(shape: &[usize]) -> Array {
    full(shape, 0.0)
}

/// Array of ones.
pub fn ones(shape: &[usize]) -> Array {
    full(shape, 1.0)
}

/// `n x m` matrix with ones on the `k`-th diagonal.
///
/// Positive `k` selects a diagonal above the main one, negative below.
pub fn eye(n: usize, m: usize, k: isize) -> Array {
    let mut data = vec![0.0; n * m];
    for row in 0..n {
        let col = row as isize + k;
        if col >= 0 && (col as usize) < m {
            data[row * m + col as usize] = 1.0;
        }
    }
    Dense::new(vec![n, m], data).into_array()
}

/// `n x n` identity matrix.
pub fn identity(n: usize) -> Array {
    eye(n, n, 0)
}

/// Dense row-major buffer with its shape.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dense {
    pub shape: Shape,
    pub data: Vec<f64>,
}

impl Dense {
    pub fn new(shape: Shape, data: Vec<f64>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { shape, data }
    }

    pub fn from_array(x: &Array) -> AlgebraResult<Self> {
        let shape = x.shape()?;
        Ok(Self::new(shape, x.ravel()))
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn into_array(self) -> Array {
        build(&self.shape, &self.data)
    }
}

fn build(shape: &[usize], data: &[f64]) -> Array {
    match shape.split_first() {
        None => Array::Scalar(data[0]),
        Some((&n, rest)) => {
            let stride: usize = rest.iter().product();
            Array::Seq(
                (0..n)
                    .map(|i| build(rest, &data[i * stride..(i + 1) * stride]))
                    .collect(),
            )
        }
    }
}

/// Row-major strides for `shape`, in elements.
pub(crate) fn strides(shape: &[usize]) -> Vec<usize> {
    let mut out = vec![1; shape.len()];
    for d in (0..shape.len().saturating_sub(1)).rev() {
        out[d] = out[d + 1] * shape[d + 1];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_of_nested() {
        let m = Array::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(m.shape().unwrap(), vec![2, 3]);
        assert_eq!(Array::Scalar(1.0).shape().unwrap(), Vec::<usize>::new());
        assert_eq!(Array::Seq(vec![]).shape().unwrap(), vec![0]);
    }

    #[test]
    fn test_shape_rejects_ragged() {
        let ragged = Array::from(vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(ragged.shape(), Err(AlgebraError::Ragged));

        let mixed = Array::Seq(vec![Array::Scalar(1.0), Array::from([2.0])]);
        assert_eq!(mixed.shape(), Err(AlgebraError::Ragged));
    }

    #[test]
    fn test_reshape_round_trip() {
        let m = Array::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let flat = reshape(&m, &[6]).unwrap();
        assert_eq!(flat, Array::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
        let cube = reshape(&m, &[3, 1, 2]).unwrap();
        assert_eq!(cube.shape().unwrap(), vec![3, 1, 2]);
        assert_eq!(reshape(&cube, &[2, 3]).unwrap(), m);
    }

    #[test]
    fn test_reshape_count_mismatch() {
        let v = Array::from([1.0, 2.0, 3.0]);
        assert!(matches!(
            reshape(&v, &[2, 2]),
            Err(AlgebraError::Reshape { .. })
        ));
    }

    #[test]
    fn test_reshape_to_scalar() {
        let v = Array::from([[7.0]]);
        assert_eq!(reshape(&v, &[]).unwrap(), Array::Scalar(7.0));
    }

    #[test]
    fn test_eye_offsets() {
        assert_eq!(
            eye(2, 3, 1),
            Array::from([[0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
        );
        assert_eq!(identity(2), Array::from([[1.0, 0.0], [0.0, 1.0]]));
        assert_eq!(zeros(&[2]), Array::from([0.0, 0.0]));
        assert_eq!(full(&[1, 2], 3.0), Array::from([[3.0, 3.0]]));
    }

    #[test]
    fn test_to_matrix3_requires_3x3() {
        assert!(identity(3).to_matrix3().is_ok());
        assert!(identity(2).to_matrix3().is_err());
    }
}
