//! Determinant, adjugate and inverse by recursive cofactor expansion.
//!
//! Exponential in the matrix size. These are the reference results the LU
//! path in [`lu`](crate::lu) is checked against; keep them for small inputs.

use crate::{DenseError, Matrix, Result};

/// The `(n-1)×(n-1)` minor of `m` with row `p` and column `q` removed.
fn minor(m: &Matrix, p: usize, q: usize) -> Matrix {
    let n = m.nrows();
    Matrix::from_fn(n - 1, n - 1, |i, j| {
        let r = if i < p { i } else { i + 1 };
        let c = if j < q { j } else { j + 1 };
        m.get(r, c)
    })
}

/// Laplace expansion along row 0. `m` must be square and non-empty.
fn expand(m: &Matrix) -> f64 {
    let n = m.nrows();
    if n == 1 {
        return m.get(0, 0);
    }
    let mut det = 0.0;
    let mut sign = 1.0;
    for f in 0..n {
        det += sign * m.get(0, f) * expand(&minor(m, 0, f));
        sign = -sign;
    }
    det
}

impl Matrix {
    fn ensure_nonempty_square(&self, op: &'static str) -> Result<usize> {
        let n = self.ensure_square(op)?;
        if n == 0 {
            return Err(DenseError::not_square(op, (0, 0)));
        }
        Ok(n)
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn naive_det(&self) -> Result<f64> {
        self.ensure_nonempty_square("naive_det")?;
        Ok(expand(self))
    }

    /// Adjugate (transposed cofactor matrix) by cofactor expansion.
    ///
    /// Satisfies `A * adj(A) = det(A) * I`. A 1×1 matrix has adjugate `[1]`.
    pub fn naive_adj(&self) -> Result<Matrix> {
        let n = self.ensure_nonempty_square("naive_adj")?;
        if n == 1 {
            return Ok(Matrix::identity(1));
        }
        let mut adj = Matrix::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                // cofactor of (i, j) lands at (j, i)
                adj.put(j, i, sign * expand(&minor(self, i, j)));
            }
        }
        Ok(adj)
    }

    /// Inverse as `adj(A) / det(A)`; fails when the determinant is exactly zero.
    pub fn naive_inverse(&self) -> Result<Matrix> {
        let det = self.naive_det()?;
        if det == 0.0 {
            return Err(DenseError::SingularMatrix);
        }
        let adj = self.naive_adj()?;
        let n = self.nrows();
        Ok(Matrix::from_fn(n, n, |i, j| adj.get(i, j) / det))
    }
}
