//! Axis reductions and covariance.

use crate::{Axis, DenseError, Matrix, Result, Vector};

impl Matrix {
    /// Sum along `axis`: per column for [`Axis::Rows`], per row for
    /// [`Axis::Cols`], or a single total for [`Axis::All`].
    pub fn sum(&self, axis: Axis) -> Vector {
        let (r, c) = self.dims();
        match axis {
            Axis::Rows => Vector::from_fn(c, |j| (0..r).map(|i| self.get(i, j)).sum()),
            Axis::Cols => Vector::from_fn(r, |i| self.rows()[i].sum()),
            Axis::All => Vector::from([self.rows().iter().map(Vector::sum).sum::<f64>()]),
        }
    }

    /// Mean along `axis`; see [`sum`](Self::sum).
    pub fn mean(&self, axis: Axis) -> Vector {
        let (r, c) = self.dims();
        let count = match axis {
            Axis::Rows => r,
            Axis::Cols => c,
            Axis::All => r * c,
        };
        self.sum(axis).mul_num((count as f64).recip())
    }

    /// Sum of row `i`.
    pub fn sum_row(&self, i: usize) -> Result<f64> {
        Ok(self.row(i)?.sum())
    }

    /// Sum of column `j`.
    pub fn sum_col(&self, j: usize) -> Result<f64> {
        Ok(self.col(j)?.sum())
    }

    /// Sample covariance of the columns, treating rows as observations.
    pub fn cov_matrix(&self) -> Result<Matrix> {
        cross_cov(self, self)
    }

    fn centered(&self) -> Matrix {
        let means = self.mean(Axis::Rows);
        let (r, c) = self.dims();
        Matrix::from_fn(r, c, |i, j| self.get(i, j) - means[j])
    }
}

/// Sample cross-covariance between the columns of `a` and of `b`.
///
/// Both matrices hold one observation per row; the result is
/// `a.ncols() × b.ncols()` with divisor `n - 1`.
pub fn cross_cov(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.nrows() != b.nrows() {
        return Err(DenseError::dims("cross_cov", a.nrows(), b.nrows()));
    }
    let n = a.nrows();
    if n < 2 {
        return Err(DenseError::DegenerateInput("covariance needs at least two observations"));
    }
    let prod = a.centered().t().mul(&b.centered())?;
    Ok(prod.mul_num(((n - 1) as f64).recip()))
}
