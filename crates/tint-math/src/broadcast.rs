//! NumPy-style broadcasting.
//!
//! Shapes are aligned on their trailing dimensions. A dimension of length 1
//! (or a missing leading dimension) stretches to match the other operand;
//! any other disagreement is an error.
//!
//! ```text
//! a:      [4, 1, 3]
//! b:         [2, 1]
//! result: [4, 2, 3]
//! ```

use crate::array::{strides, Array, Dense, Shape};
use crate::error::{AlgebraError, AlgebraResult};

/// Common shape of two broadcast operands.
pub fn broadcast_shapes(a: &[usize], b: &[usize]) -> AlgebraResult<Shape> {
    let ndim = a.len().max(b.len());
    let mut out = vec![0; ndim];
    for i in 0..ndim {
        let da = dim_from_end(a, ndim - 1 - i);
        let db = dim_from_end(b, ndim - 1 - i);
        out[i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => {
                return Err(AlgebraError::Broadcast {
                    a: a.to_vec(),
                    b: b.to_vec(),
                });
            }
        };
    }
    Ok(out)
}

// Length of the dimension `back` positions from the end, 1 when absent.
fn dim_from_end(shape: &[usize], back: usize) -> usize {
    if back < shape.len() {
        shape[shape.len() - 1 - back]
    } else {
        1
    }
}

/// Element strides of `src` when read through `target`. Stretched
/// dimensions get stride 0.
pub(crate) fn broadcast_strides(src: &[usize], target: &[usize]) -> Vec<usize> {
    let own = strides(src);
    let offset = target.len() - src.len();
    (0..target.len())
        .map(|d| {
            if d < offset || src[d - offset] == 1 {
                0
            } else {
                own[d - offset]
            }
        })
        .collect()
}

/// Offset into a buffer for the flat position `pos` of `shape`.
pub(crate) fn offset_of(pos: usize, shape: &[usize], strides: &[usize]) -> usize {
    let mut rem = pos;
    let mut offset = 0;
    for d in (0..shape.len()).rev() {
        offset += (rem % shape[d]) * strides[d];
        rem /= shape[d];
    }
    offset
}

/// Lockstep iterator over two broadcast operands.
///
/// Yields `(a, b)` pairs in row-major order of the common [`shape`](Self::shape).
/// [`reset`](Self::reset) rewinds without recomputing strides.
#[derive(Debug, Clone)]
pub struct Broadcast {
    a: Vec<f64>,
    b: Vec<f64>,
    shape: Shape,
    a_strides: Vec<usize>,
    b_strides: Vec<usize>,
    size: usize,
    pos: usize,
}

impl Broadcast {
    /// Prepares iteration over `a` and `b`.
    pub fn new(a: &Array, b: &Array) -> AlgebraResult<Self> {
        Self::from_dense(Dense::from_array(a)?, Dense::from_array(b)?)
    }

    pub(crate) fn from_dense(a: Dense, b: Dense) -> AlgebraResult<Self> {
        let shape = broadcast_shapes(&a.shape, &b.shape)?;
        let a_strides = broadcast_strides(&a.shape, &shape);
        let b_strides = broadcast_strides(&b.shape, &shape);
        let size = shape.iter().product();
        Ok(Self {
            a: a.data,
            b: b.data,
            shape,
            a_strides,
            b_strides,
            size,
            pos: 0,
        })
    }

    /// Broadcast result shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of pairs.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Restarts iteration from the first pair.
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for Broadcast {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.size {
            return None;
        }
        let ia = offset_of(self.pos, &self.shape, &self.a_strides);
        let ib = offset_of(self.pos, &self.shape, &self.b_strides);
        self.pos += 1;
        Some((self.a[ia], self.b[ib]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.size - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Broadcast {}

/// Broadcasts two arrays against each other.
pub fn broadcast(a: &Array, b: &Array) -> AlgebraResult<Broadcast> {
    Broadcast::new(a, b)
}

/// Expands `a` to `shape`.
///
/// `a` may not have more dimensions than `shape`, and each of its dimensions
/// must either match or be 1.
pub fn broadcast_to(a: &Array, shape: &[usize]) -> AlgebraResult<Array> {
    let src = Dense::from_array(a)?;
    let fits = src.ndim() <= shape.len()
        && src
            .shape
            .iter()
            .rev()
            .zip(shape.iter().rev())
            .all(|(&s, &t)| s == t || s == 1);
    if !fits {
        return Err(AlgebraError::Broadcast {
            a: src.shape,
            b: shape.to_vec(),
        });
    }
    let st = broadcast_strides(&src.shape, shape);
    let total: usize = shape.iter().product();
    let data = (0..total)
        .map(|pos| src.data[offset_of(pos, shape, &st)])
        .collect();
    Ok(Dense::new(shape.to_vec(), data).into_array())
}
