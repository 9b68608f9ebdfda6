//! Element-wise arithmetic with broadcasting.
//!
//! All four operators go through [`apply`]. Scalar operands and operands of
//! equal shape skip the stride bookkeeping; the general case walks a
//! [`Broadcast`]. NaN propagates and division follows IEEE 754.

use crate::array::{Array, Dense};
use crate::broadcast::Broadcast;
use crate::error::AlgebraResult;

/// Combines `a` and `b` element-wise with `f`, broadcasting as needed.
pub fn apply<F>(a: &Array, b: &Array, f: F) -> AlgebraResult<Array>
where
    F: Fn(f64, f64) -> f64,
{
    match (a, b) {
        (Array::Scalar(x), Array::Scalar(y)) => return Ok(Array::Scalar(f(*x, *y))),
        (Array::Scalar(x), _) => {
            let mut d = Dense::from_array(b)?;
            d.data.iter_mut().for_each(|v| *v = f(*x, *v));
            return Ok(d.into_array());
        }
        (_, Array::Scalar(y)) => {
            let mut d = Dense::from_array(a)?;
            d.data.iter_mut().for_each(|v| *v = f(*v, *y));
            return Ok(d.into_array());
        }
        _ => {}
    }

    let da = Dense::from_array(a)?;
    let db = Dense::from_array(b)?;
    if da.shape == db.shape {
        let data = da.data.iter().zip(&db.data).map(|(&x, &y)| f(x, y)).collect();
        return Ok(Dense::new(da.shape, data).into_array());
    }

    let bc = Broadcast::from_dense(da, db)?;
    let shape = bc.shape().to_vec();
    let data = bc.map(|(x, y)| f(x, y)).collect();
    Ok(Dense::new(shape, data).into_array())
}

/// `a + b`
pub fn add(a: &Array, b: &Array) -> AlgebraResult<Array> {
    apply(a, b, |x, y| x + y)
}

/// `a - b`
pub fn subtract(a: &Array, b: &Array) -> AlgebraResult<Array> {
    apply(a, b, |x, y| x - y)
}

/// `a * b`
pub fn multiply(a: &Array, b: &Array) -> AlgebraResult<Array> {
    apply(a, b, |x, y| x * y)
}

/// `a / b`
pub fn divide(a: &Array, b: &Array) -> AlgebraResult<Array> {
    apply(a, b, |x, y| x / y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::broadcast_to;

    #[test]
    fn test_scalar_fast_paths() {
        let v = Array::from([1.0, 2.0, 3.0]);
        assert_eq!(
            multiply(&v, &Array::Scalar(2.0)).unwrap(),
            Array::from([2.0, 4.0, 6.0])
        );
        assert_eq!(
            subtract(&Array::Scalar(1.0), &v).unwrap(),
            Array::from([0.0, -1.0, -2.0])
        );
        assert_eq!(
            add(&Array::Scalar(1.0), &Array::Scalar(2.0)).unwrap(),
            Array::Scalar(3.0)
        );
    }

    #[test]
    fn test_fast_path_matches_broadcast_path() {
        let m = Array::from([[1.0, 2.0], [3.0, 4.0]]);
        let row = Array::from([10.0, 20.0]);
        let expanded = broadcast_to(&row, &[2, 2]).unwrap();
        assert_eq!(add(&m, &row).unwrap(), add(&m, &expanded).unwrap());
        assert_eq!(
            add(&m, &row).unwrap(),
            Array::from([[11.0, 22.0], [13.0, 24.0]])
        );
    }

    #[test]
    fn test_nan_and_ieee_division() {
        let out = divide(&Array::from([1.0, f64::NAN, -1.0]), &Array::Scalar(0.0)).unwrap();
        let vals = out.ravel();
        assert_eq!(vals[0], f64::INFINITY);
        assert!(vals[1].is_nan());
        assert_eq!(vals[2], f64::NEG_INFINITY);
    }

    #[test]
    fn test_incompatible_shapes() {
        let a = Array::from([1.0, 2.0, 3.0]);
        let b = Array::from([1.0, 2.0]);
        assert!(add(&a, &b).is_err());
    }
}
