//! Integer matrix powers.

use crate::{Matrix, Result};

impl Matrix {
    /// `A^n` by repeated squaring. `A^0` is the identity; `A^1` is a copy.
    pub fn pow(&self, n: u32) -> Result<Matrix> {
        let size = self.ensure_square("pow")?;
        match n {
            0 => return Ok(Matrix::identity(size)),
            1 => return Ok(self.clone()),
            _ => {}
        }

        let mut result: Option<Matrix> = None;
        let mut base = self.clone();
        let mut e = n;
        loop {
            if e & 1 == 1 {
                result = Some(match result {
                    Some(r) => r.mul(&base)?,
                    None => base.clone(),
                });
            }
            e >>= 1;
            if e == 0 {
                break;
            }
            base = base.mul(&base)?;
        }
        // n >= 2 sets at least one bit, so `result` is populated.
        Ok(result.unwrap_or_else(|| Matrix::identity(size)))
    }

    /// `A^n` by `n - 1` successive multiplications. Reference for [`pow`](Self::pow).
    pub fn naive_pow(&self, n: u32) -> Result<Matrix> {
        let size = self.ensure_square("naive_pow")?;
        if n == 0 {
            return Ok(Matrix::identity(size));
        }
        let mut acc = self.clone();
        for _ in 1..n {
            acc = acc.mul(self)?;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DenseError, Matrix};

    fn a() -> Matrix {
        Matrix::from_rows(vec![
            vec![10.0, 20.0, 10.0],
            vec![-20.0, -30.0, 10.0],
            vec![30.0, 50.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn small_exponents() {
        let a = a();
        let sq = Matrix::from_rows(vec![
            vec![0.0, 100.0, 300.0],
            vec![700.0, 1000.0, -500.0],
            vec![-700.0, -900.0, 800.0],
        ])
        .unwrap();
        for p in [Matrix::pow, Matrix::naive_pow] {
            assert!(p(&a, 0).unwrap().approx_eq(&Matrix::identity(3)));
            assert!(p(&a, 1).unwrap().approx_eq(&a));
            assert!(p(&a, 2).unwrap().approx_eq(&sq));
        }
    }

    #[test]
    fn pow_one_is_a_copy() {
        let a = a();
        let mut p = a.pow(1).unwrap();
        p.set(0, 0, -1.0).unwrap();
        assert_eq!(a.at(0, 0).unwrap(), 10.0);
    }

    #[test]
    fn squaring_matches_naive() {
        let m = Matrix::from_fn(4, 4, |i, j| ((i * 4 + j) as f64 * 0.37).sin());
        for n in 0..12 {
            let fast = m.pow(n).unwrap();
            let slow = m.naive_pow(n).unwrap();
            assert!(fast.approx_eq(&slow), "n = {n}");
        }
    }

    #[test]
    fn non_square_rejected() {
        let m = Matrix::zeros(2, 3);
        assert!(matches!(m.pow(2), Err(DenseError::DimensionMismatch { .. })));
        assert!(matches!(m.naive_pow(0), Err(DenseError::DimensionMismatch { .. })));
    }
}
