//! Products, inversion and matrix construction.
//!
//! Two multiplication flavors exist on purpose:
//!
//! - [`dot`] follows NumPy `dot`: scalars scale, vectors contract, and N-D
//!   operands sum over the last axis of `a` and the second-to-last of `b`.
//! - [`matmul`] is the strict matrix product: no scalars, 1-D operands are
//!   promoted, leading dimensions broadcast as a stack of matrices.
//!
//! [`inv`] is Gauss-Jordan elimination with row swaps on exact-zero pivots.

use crate::array::{Array, Dense, Shape};
use crate::broadcast::{broadcast_shapes, broadcast_strides, offset_of};
use crate::error::{AlgebraError, AlgebraResult};
use crate::ops::multiply;

/// NumPy-style dot product.
///
/// Result shape is `a[:-1] + b[:-2] + b[-1:]`.
pub fn dot(a: &Array, b: &Array) -> AlgebraResult<Array> {
    if matches!(a, Array::Scalar(_)) || matches!(b, Array::Scalar(_)) {
        return multiply(a, b);
    }
    let da = Dense::from_array(a)?;
    let db = Dense::from_array(b)?;
    if da.ndim() == 0 || db.ndim() == 0 {
        return multiply(a, b);
    }

    let k = da.shape[da.ndim() - 1];
    let (bk, b_pre, m) = if db.ndim() == 1 {
        (db.shape[0], 1, 1)
    } else {
        let nd = db.ndim();
        (db.shape[nd - 2], db.shape[..nd - 2].iter().product(), db.shape[nd - 1])
    };
    if k != bk {
        return Err(AlgebraError::ShapeMismatch {
            op: "dot",
            a: da.shape,
            b: db.shape,
        });
    }

    let mut shape: Shape = da.shape[..da.ndim() - 1].to_vec();
    if db.ndim() > 1 {
        shape.extend_from_slice(&db.shape[..db.ndim() - 2]);
        shape.push(m);
    }
    let rows: usize = da.shape[..da.ndim() - 1].iter().product();

    let mut data = Vec::with_capacity(rows * b_pre * m);
    for i in 0..rows {
        let arow = &da.data[i * k..(i + 1) * k];
        for p in 0..b_pre {
            let block = &db.data[p * k * m..(p + 1) * k * m];
            for col in 0..m {
                data.push((0..k).map(|j| arow[j] * block[j * m + col]).sum());
            }
        }
    }

    if shape.is_empty() {
        return Ok(Array::Scalar(data[0]));
    }
    Ok(Dense::new(shape, data).into_array())
}

/// Strict matrix product over the last two dimensions.
///
/// Scalars are rejected. A 1-D `a` is treated as a row, a 1-D `b` as a
/// column, and the promoted axis is dropped from the result. Leading
/// dimensions broadcast.
pub fn matmul(a: &Array, b: &Array) -> AlgebraResult<Array> {
    let mut da = Dense::from_array(a)?;
    let mut db = Dense::from_array(b)?;
    for d in [&da, &db] {
        if d.ndim() == 0 {
            return Err(AlgebraError::InvalidRank {
                op: "matmul",
                expected: "at least 1",
                got: 0,
            });
        }
    }
    let a_shape = da.shape.clone();
    let b_shape = db.shape.clone();

    let drop_row = da.ndim() == 1;
    if drop_row {
        da.shape.insert(0, 1);
    }
    let drop_col = db.ndim() == 1;
    if drop_col {
        db.shape.push(1);
    }

    let (na, nb) = (da.ndim(), db.ndim());
    let (n, k) = (da.shape[na - 2], da.shape[na - 1]);
    let (k2, m) = (db.shape[nb - 2], db.shape[nb - 1]);
    let mismatch = || AlgebraError::ShapeMismatch {
        op: "matmul",
        a: a_shape.clone(),
        b: b_shape.clone(),
    };
    if k != k2 {
        return Err(mismatch());
    }

    let a_batch = &da.shape[..na - 2];
    let b_batch = &db.shape[..nb - 2];
    let batch = broadcast_shapes(a_batch, b_batch).map_err(|_| mismatch())?;
    let a_st = broadcast_strides(a_batch, &batch);
    let b_st = broadcast_strides(b_batch, &batch);
    let count: usize = batch.iter().product();

    let mut data = Vec::with_capacity(count * n * m);
    for pos in 0..count {
        let ablock = offset_of(pos, &batch, &a_st) * n * k;
        let bblock = offset_of(pos, &batch, &b_st) * k * m;
        for row in 0..n {
            for col in 0..m {
                let sum = (0..k)
                    .map(|j| da.data[ablock + row * k + j] * db.data[bblock + j * m + col])
                    .sum();
                data.push(sum);
            }
        }
    }

    let mut shape = batch;
    if !drop_row {
        shape.push(n);
    }
    if !drop_col {
        shape.push(m);
    }
    if shape.is_empty() {
        return Ok(Array::Scalar(data[0]));
    }
    Ok(Dense::new(shape, data).into_array())
}

/// Inverts a square matrix, or each matrix of a stack.
///
/// Fails with [`AlgebraError::NotSquare`] unless the last two dimensions are
/// equal, and with [`AlgebraError::Singular`] when a column has no usable
/// pivot.
pub fn inv(m: &Array) -> AlgebraResult<Array> {
    let dense = Dense::from_array(m)?;
    let nd = dense.ndim();
    if nd < 2 || dense.shape[nd - 1] != dense.shape[nd - 2] {
        return Err(AlgebraError::NotSquare { shape: dense.shape });
    }
    let n = dense.shape[nd - 1];
    if n == 0 {
        return Ok(dense.into_array());
    }
    let mut data = Vec::with_capacity(dense.data.len());
    for block in dense.data.chunks(n * n) {
        data.extend(gauss_jordan(block, n)?);
    }
    Ok(Dense::new(dense.shape, data).into_array())
}

fn gauss_jordan(src: &[f64], n: usize) -> AlgebraResult<Vec<f64>> {
    let mut m = src.to_vec();
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        out[i * n + i] = 1.0;
    }

    for i in 0..n {
        if m[i * n + i] == 0.0 {
            let swap = (i + 1..n)
                .find(|&r| m[r * n + i] != 0.0)
                .ok_or(AlgebraError::Singular)?;
            swap_rows(&mut m, n, i, swap);
            swap_rows(&mut out, n, i, swap);
        }

        let pivot = m[i * n + i];
        for j in 0..n {
            m[i * n + j] /= pivot;
            out[i * n + j] /= pivot;
        }

        for r in 0..n {
            let factor = m[r * n + i];
            if r == i || factor == 0.0 {
                continue;
            }
            for j in 0..n {
                m[r * n + j] -= factor * m[i * n + j];
                out[r * n + j] -= factor * out[i * n + j];
            }
        }
    }
    Ok(out)
}

fn swap_rows(m: &mut [f64], n: usize, a: usize, b: usize) {
    for j in 0..n {
        m.swap(a * n + j, b * n + j);
    }
}

/// Reverses the axes of `m`. Scalars and vectors come back unchanged.
pub fn transpose(m: &Array) -> AlgebraResult<Array> {
    let dense = Dense::from_array(m)?;
    if dense.ndim() < 2 {
        return Ok(dense.into_array());
    }
    let shape: Shape = dense.shape.iter().rev().copied().collect();
    let src_strides = crate::array::strides(&dense.shape);
    let rev_strides: Vec<usize> = src_strides.iter().rev().copied().collect();
    let total = dense.data.len();
    let data = (0..total)
        .map(|pos| dense.data[offset_of(pos, &shape, &rev_strides)])
        .collect();
    Ok(Dense::new(shape, data).into_array())
}

/// Diagonal helper with two behaviors.
///
/// A vector becomes a square matrix holding it on the `k`-th diagonal; a
/// matrix yields the vector of its `k`-th diagonal.
pub fn diag(x: &Array, k: isize) -> AlgebraResult<Array> {
    let dense = Dense::from_array(x)?;
    match dense.ndim() {
        1 => {
            let len = dense.data.len();
            let size = len + k.unsigned_abs();
            let mut data = vec![0.0; size * size];
            for (i, &v) in dense.data.iter().enumerate() {
                let (row, col) = if k >= 0 {
                    (i, i + k as usize)
                } else {
                    (i + k.unsigned_abs(), i)
                };
                data[row * size + col] = v;
            }
            Ok(Dense::new(vec![size, size], data).into_array())
        }
        2 => {
            let (rows, cols) = (dense.shape[0], dense.shape[1]);
            let values: Vec<f64> = (0..rows)
                .filter_map(|row| {
                    let col = row as isize + k;
                    (col >= 0 && (col as usize) < cols).then(|| dense.data[row * cols + col as usize])
                })
                .collect();
            Ok(Array::from(values))
        }
        got => Err(AlgebraError::InvalidRank {
            op: "diag",
            expected: "1 or 2",
            got,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::identity;

    fn assert_close(a: &Array, b: &Array, eps: f64) {
        let (x, y) = (a.ravel(), b.ravel());
        assert_eq!(a.shape().unwrap(), b.shape().unwrap());
        for (p, q) in x.iter().zip(&y) {
            assert!((p - q).abs() < eps, "{p} vs {q}");
        }
    }

    #[test]
    fn test_dot_vector_vector() {
        let a = Array::from([1.0, 2.0, 3.0]);
        let b = Array::from([4.0, 5.0, 6.0]);
        assert_eq!(dot(&a, &b).unwrap(), Array::Scalar(32.0));
    }

    #[test]
    fn test_dot_matrix_vector_and_back() {
        let m = Array::from([[1.0, 2.0], [3.0, 4.0]]);
        let v = Array::from([1.0, 1.0]);
        assert_eq!(dot(&m, &v).unwrap(), Array::from([3.0, 7.0]));
        assert_eq!(dot(&v, &m).unwrap(), Array::from([4.0, 6.0]));
    }

    #[test]
    fn test_dot_nd_shape() {
        // a[:-1] + b[:-2] + b[-1:]
        let a = crate::array::ones(&[2, 3, 4]);
        let b = crate::array::ones(&[5, 4, 6]);
        let out = dot(&a, &b).unwrap();
        assert_eq!(out.shape().unwrap(), vec![2, 3, 5, 6]);
        assert!(out.ravel().iter().all(|&v| v == 4.0));
    }

    #[test]
    fn test_dot_scalar_scales() {
        let v = Array::from([1.0, 2.0]);
        assert_eq!(dot(&Array::Scalar(3.0), &v).unwrap(), Array::from([3.0, 6.0]));
    }

    #[test]
    fn test_dot_mismatch() {
        let a = Array::from([1.0, 2.0, 3.0]);
        let m = identity(2);
        assert!(matches!(dot(&a, &m), Err(AlgebraError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_matmul_strict() {
        let a = Array::from([[1.0, 2.0], [3.0, 4.0]]);
        let b = Array::from([[5.0, 6.0], [7.0, 8.0]]);
        assert_eq!(
            matmul(&a, &b).unwrap(),
            Array::from([[19.0, 22.0], [43.0, 50.0]])
        );
        assert!(matmul(&Array::Scalar(2.0), &a).is_err());
        let c = Array::from([[1.0, 2.0, 3.0]]);
        assert!(matches!(matmul(&a, &c), Err(AlgebraError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_matmul_promotes_vectors() {
        let m = Array::from([[1.0, 2.0], [3.0, 4.0]]);
        let v = Array::from([1.0, 1.0]);
        assert_eq!(matmul(&m, &v).unwrap(), Array::from([3.0, 7.0]));
        assert_eq!(matmul(&v, &v).unwrap(), Array::Scalar(2.0));
    }

    #[test]
    fn test_matmul_batched_broadcast() {
        let stack = Array::from(vec![
            Array::from([[1.0, 0.0], [0.0, 1.0]]),
            Array::from([[2.0, 0.0], [0.0, 2.0]]),
        ]);
        let b = Array::from([[1.0, 2.0], [3.0, 4.0]]);
        let out = matmul(&stack, &b).unwrap();
        assert_eq!(out.shape().unwrap(), vec![2, 2, 2]);
        assert_eq!(
            out,
            Array::from(vec![
                Array::from([[1.0, 2.0], [3.0, 4.0]]),
                Array::from([[2.0, 4.0], [6.0, 8.0]]),
            ])
        );
    }

    #[test]
    fn test_inv_times_m_is_identity() {
        let m = Array::from([
            [0.4124, 0.3576, 0.1805],
            [0.2126, 0.7152, 0.0722],
            [0.0193, 0.1192, 0.9505],
        ]);
        let mi = inv(&m).unwrap();
        assert_close(&dot(&mi, &m).unwrap(), &identity(3), 1e-9);
        assert_close(&dot(&m, &mi).unwrap(), &identity(3), 1e-9);
    }

    #[test]
    fn test_inv_swaps_zero_pivot() {
        let m = Array::from([[0.0, 1.0], [2.0, 0.0]]);
        let mi = inv(&m).unwrap();
        assert_close(&mi, &Array::from([[0.0, 0.5], [1.0, 0.0]]), 1e-12);
    }

    #[test]
    fn test_inv_singular() {
        let zero = Array::from([[0.0, 0.0], [0.0, 0.0]]);
        assert_eq!(inv(&zero), Err(AlgebraError::Singular));
        let ones = Array::from([[1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(inv(&ones), Err(AlgebraError::Singular));
    }

    #[test]
    fn test_inv_not_square() {
        let m = Array::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(matches!(inv(&m), Err(AlgebraError::NotSquare { .. })));
        assert!(matches!(
            inv(&Array::from([1.0, 2.0])),
            Err(AlgebraError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_inv_batched() {
        let stack = Array::from(vec![
            Array::from([[2.0, 0.0], [0.0, 4.0]]),
            Array::from([[1.0, 2.0], [3.0, 4.0]]),
        ]);
        let out = inv(&stack).unwrap();
        let expected = Array::from(vec![
            Array::from([[0.5, 0.0], [0.0, 0.25]]),
            Array::from([[-2.0, 1.0], [1.5, -0.5]]),
        ]);
        assert_close(&out, &expected, 1e-12);
    }

    #[test]
    fn test_transpose() {
        let m = Array::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(
            transpose(&m).unwrap(),
            Array::from([[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]])
        );
        let v = Array::from([1.0, 2.0]);
        assert_eq!(transpose(&v).unwrap(), v);
    }

    #[test]
    fn test_diag_both_ways() {
        let v = Array::from([1.0, 2.0]);
        assert_eq!(
            diag(&v, 0).unwrap(),
            Array::from([[1.0, 0.0], [0.0, 2.0]])
        );
        assert_eq!(
            diag(&v, 1).unwrap(),
            Array::from([[0.0, 1.0, 0.0], [0.0, 0.0, 2.0], [0.0, 0.0, 0.0]])
        );
        let m = Array::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(diag(&m, 0).unwrap(), Array::from([1.0, 5.0, 9.0]));
        assert_eq!(diag(&m, -1).unwrap(), Array::from([4.0, 8.0]));
        assert!(diag(&Array::Scalar(1.0), 0).is_err());
    }
}
