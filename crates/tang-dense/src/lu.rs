use crate::{DenseError, Matrix, Result, Vector};
use tracing::debug;

/// Pivots at or below `PIVOT_RTOL * max|a_ij|` mark the factorization as
/// near-singular.
const PIVOT_RTOL: f64 = 1e-12;

/// Largest order settled by cofactor expansion when LU is near-singular.
const COFACTOR_MAX_N: usize = 8;

/// LU decomposition with partial pivoting: PA = LU
pub struct Lu {
    /// Combined L (lower, unit diagonal) and U (upper) in one matrix.
    lu: Matrix,
    /// Row `i` of `PA` is row `piv[i]` of `A`.
    piv: Vec<usize>,
    /// Number of row swaps (for determinant sign).
    swaps: usize,
    /// Some pivot was at or below the relative tolerance.
    near_singular: bool,
}

impl Lu {
    /// Factor a square matrix. Fails with `SingularMatrix` only when a
    /// column has no nonzero pivot left; tiny pivots are kept and flagged
    /// through [`is_near_singular`](Self::is_near_singular).
    pub fn new(a: &Matrix) -> Result<Self> {
        let n = a.ensure_square("lu")?;
        let mut lu = a.clone();
        let mut piv: Vec<usize> = (0..n).collect();
        let mut swaps = 0;
        let mut near_singular = false;

        let scale = a.rows().iter().flat_map(|r| r.iter()).fold(0.0f64, |m, x| m.max(x.abs()));
        let tol = scale * PIVOT_RTOL;

        for k in 0..n {
            // Find pivot: largest |a[i][k]| for i >= k
            let mut max_val = 0.0;
            let mut max_row = k;
            for i in k..n {
                let v = lu.get(i, k).abs();
                if v > max_val {
                    max_val = v;
                    max_row = i;
                }
            }

            if max_val == 0.0 {
                return Err(DenseError::SingularMatrix);
            }
            near_singular |= max_val <= tol;

            if max_row != k {
                lu.swap_rows_unchecked(k, max_row);
                piv.swap(k, max_row);
                swaps += 1;
            }

            let pivot_inv = lu.get(k, k).recip();
            for i in (k + 1)..n {
                let factor = lu.get(i, k) * pivot_inv;
                lu.put(i, k, factor);
                for j in (k + 1)..n {
                    let v = lu.get(i, j) - factor * lu.get(k, j);
                    lu.put(i, j, v);
                }
            }
        }

        Ok(Self { lu, piv, swaps, near_singular })
    }

    /// A pivot fell to `1e-12 * max|a_ij|` or below; results may be dominated
    /// by round-off.
    pub fn is_near_singular(&self) -> bool {
        self.near_singular
    }

    /// Solve Ax = b.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        let n = self.lu.nrows();
        if b.len() != n {
            return Err(DenseError::dims("lu solve", n, b.len()));
        }
        Ok(Vector::from(self.substitute(b.as_slice())))
    }

    /// Permute, then forward and back substitute. `b.len()` must equal n.
    fn substitute(&self, b: &[f64]) -> Vec<f64> {
        let n = self.lu.nrows();

        // Apply pivot permutation
        let mut x: Vec<f64> = (0..n).map(|i| b[self.piv[i]]).collect();

        // Forward substitution (L * y = Pb)
        for i in 1..n {
            let mut sum = x[i];
            for j in 0..i {
                sum -= self.lu.get(i, j) * x[j];
            }
            x[i] = sum;
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in (i + 1)..n {
                sum -= self.lu.get(i, j) * x[j];
            }
            x[i] = sum / self.lu.get(i, i);
        }

        x
    }

    /// Determinant.
    pub fn det(&self) -> f64 {
        let n = self.lu.nrows();
        let mut d = if self.swaps % 2 == 0 { 1.0 } else { -1.0 };
        for i in 0..n {
            d *= self.lu.get(i, i);
        }
        d
    }

    /// Inverse (via solving A * A^-1 = I column by column).
    pub fn inverse(&self) -> Matrix {
        let n = self.lu.nrows();
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![0.0; n];
        for j in 0..n {
            e[j] = 1.0;
            let x = self.substitute(&e);
            e[j] = 0.0;
            for i in 0..n {
                inv.put(i, j, x[i]);
            }
        }
        inv
    }
}

impl Matrix {
    fn square_lu(&self, op: &'static str) -> Result<(usize, Result<Lu>)> {
        let n = self.ensure_square(op)?;
        if n == 0 {
            return Err(DenseError::not_square(op, (0, 0)));
        }
        Ok((n, Lu::new(self)))
    }

    /// Determinant via LU. Small near-singular inputs are settled by
    /// cofactor expansion, so an exactly singular matrix gives `0.0`.
    pub fn det(&self) -> Result<f64> {
        match self.square_lu("det")? {
            (n, Ok(lu)) if n > COFACTOR_MAX_N || !lu.is_near_singular() => Ok(lu.det()),
            (n, Ok(_) | Err(DenseError::SingularMatrix)) if n <= COFACTOR_MAX_N => {
                debug!(n, "det: near-singular, using cofactor expansion");
                self.naive_det()
            }
            (_, Ok(lu)) => Ok(lu.det()),
            (_, Err(DenseError::SingularMatrix)) => Ok(0.0),
            (_, Err(e)) => Err(e),
        }
    }

    /// Inverse via LU, falling back to cofactor expansion for small
    /// near-singular inputs. `SingularMatrix` when the determinant is zero.
    pub fn inverse(&self) -> Result<Matrix> {
        match self.square_lu("inverse")? {
            (n, Ok(lu)) if n > COFACTOR_MAX_N || !lu.is_near_singular() => Ok(lu.inverse()),
            (n, Ok(_) | Err(DenseError::SingularMatrix)) if n <= COFACTOR_MAX_N => {
                debug!(n, "inverse: near-singular, using cofactor expansion");
                self.naive_inverse()
            }
            (_, Ok(lu)) => Ok(lu.inverse()),
            (_, Err(e)) => Err(e),
        }
    }

    /// Adjugate. Uses `det(A) * A^-1` when LU is well conditioned and falls
    /// back to cofactor expansion otherwise.
    pub fn adj(&self) -> Result<Matrix> {
        match self.square_lu("adj")? {
            (n, Ok(lu)) if n > 1 && (n > COFACTOR_MAX_N || !lu.is_near_singular()) => {
                Ok(lu.inverse().mul_num(lu.det()))
            }
            (_, Ok(_) | Err(DenseError::SingularMatrix)) => self.naive_adj(),
            (_, Err(e)) => Err(e),
        }
    }

    /// Solve `A x = b` for square `A`.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        let lu = Lu::new(self)?;
        if lu.is_near_singular() && self.nrows() <= COFACTOR_MAX_N {
            if b.len() != self.nrows() {
                return Err(DenseError::dims("lu solve", self.nrows(), b.len()));
            }
            return self.naive_inverse()?.mul_vec(b);
        }
        lu.solve(b)
    }
}
