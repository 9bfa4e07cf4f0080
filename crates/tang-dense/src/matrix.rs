use crate::{DenseError, IntoF64, Result, Vector, EPS};
use core::fmt;

/// Heap-allocated row-major matrix.
///
/// Storage is one [`Vector`] per row, all of the same length. Dimensions are
/// always read back from storage, so they cannot drift out of sync.
///
/// [`row`](Self::row) borrows the stored row (a view into this matrix);
/// [`col`](Self::col) builds a new owned [`Vector`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Vector>", into = "Vec<Vector>"))]
pub struct Matrix {
    rows: Vec<Vector>,
}

/// An extremal element located by [`Matrix::max`] / [`Matrix::min`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub value: f64,
    pub row: usize,
    pub col: usize,
}

/// Reduction / tiling direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Down each column: one result per column.
    Rows,
    /// Across each row: one result per row.
    Cols,
    /// Over every element.
    All,
}

impl Matrix {
    /// Create from nested rows. Ragged input is rejected.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_vectors(rows.into_iter().map(Vector::from).collect())
    }

    /// Create from row vectors. Ragged input is rejected.
    pub fn from_vectors(rows: Vec<Vector>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let ncols = first.len();
            if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
                return Err(DenseError::dims("matrix rows", ncols, bad.len()));
            }
        }
        Ok(Self { rows })
    }

    /// Create from a function of `(row, col)`.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let rows = (0..nrows).map(|i| Vector::from_fn(ncols, |j| f(i, j))).collect();
        Self { rows }
    }

    /// Zero matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self { rows: vec![Vector::zeros(ncols); nrows] }
    }

    /// Matrix of ones.
    pub fn ones(nrows: usize, ncols: usize) -> Self {
        Self::from_fn(nrows, ncols, |_, _| 1.0)
    }

    /// Identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Diagonal matrix from a vector.
    pub fn from_diagonal(diag: &Vector) -> Self {
        let n = diag.len();
        Self::from_fn(n, n, |i, j| if i == j { diag[i] } else { 0.0 })
    }

    /// `(rows, cols)`; `(0, 0)` when empty.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, Vector::len))
    }

    #[inline]
    pub fn nrows(&self) -> usize { self.rows.len() }

    #[inline]
    pub fn ncols(&self) -> usize { self.dims().1 }

    /// Is this matrix square?
    #[inline]
    pub fn is_square(&self) -> bool {
        let (r, c) = self.dims();
        r == c
    }

    pub(crate) fn ensure_square(&self, op: &'static str) -> Result<usize> {
        if !self.is_square() {
            return Err(DenseError::not_square(op, self.dims()));
        }
        Ok(self.nrows())
    }

    /// Unchecked element read for internal loops.
    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Unchecked element write for internal loops.
    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, val: f64) {
        self.rows[row].as_mut_slice()[col] = val;
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        let (r, c) = self.dims();
        if row >= r {
            return Err(DenseError::index(row, r));
        }
        if col >= c {
            return Err(DenseError::index(col, c));
        }
        Ok(())
    }

    /// Element at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(self.get(row, col))
    }

    /// Overwrite element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, val: f64) -> Result<()> {
        self.check_index(row, col)?;
        self.put(row, col, val);
        Ok(())
    }

    /// Transpose (new allocation).
    pub fn t(&self) -> Self {
        let (r, c) = self.dims();
        Self::from_fn(c, r, |i, j| self.get(j, i))
    }

    /// Borrow row `i` from storage.
    pub fn row(&self, i: usize) -> Result<&Vector> {
        self.rows.get(i).ok_or_else(|| DenseError::index(i, self.nrows()))
    }

    /// Copy of column `j`.
    pub fn col(&self, j: usize) -> Result<Vector> {
        let c = self.ncols();
        if j >= c {
            return Err(DenseError::index(j, c));
        }
        Ok(Vector::from_fn(self.nrows(), |i| self.get(i, j)))
    }

    pub(crate) fn rows(&self) -> &[Vector] {
        &self.rows
    }

    fn scan(&self, better: impl Fn(f64, f64) -> bool) -> Option<Entry> {
        let mut best: Option<Entry> = None;
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if best.map_or(true, |b| better(value, b.value)) {
                    best = Some(Entry { value, row: r, col: c });
                }
            }
        }
        best
    }

    /// First maximal entry in row-major order; `None` when empty.
    pub fn max(&self) -> Option<Entry> {
        self.scan(|x, best| x > best)
    }

    /// First minimal entry in row-major order; `None` when empty.
    pub fn min(&self) -> Option<Entry> {
        self.scan(|x, best| x < best)
    }

    /// Same dimensions and every element within [`EPS`].
    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.dims() == other.dims()
            && self.rows.iter().zip(&other.rows).all(|(a, b)| a.approx_eq(b))
    }

    fn zip_with(&self, op: &'static str, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Result<Matrix> {
        if self.dims() != other.dims() {
            return Err(DenseError::shape(op, self.dims(), other.dims()));
        }
        let (r, c) = self.dims();
        Ok(Matrix::from_fn(r, c, |i, j| f(self.get(i, j), other.get(i, j))))
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with("matrix add", other, |a, b| a + b)
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with("matrix sub", other, |a, b| a - b)
    }

    /// Matrix-matrix product: `(m×n) * (n×l) = m×l`.
    pub fn mul(&self, rhs: &Matrix) -> Result<Matrix> {
        let (m, n) = self.dims();
        let (n2, l) = rhs.dims();
        if n != n2 {
            return Err(DenseError::dims("matrix mul", format!("{n} rhs rows"), format!("{n2} rhs rows")));
        }
        let mut out = Matrix::zeros(m, l);
        for i in 0..m {
            for k in 0..n {
                let a_ik = self.get(i, k);
                let rhs_k = rhs.rows[k].as_slice();
                let out_i = out.rows[i].as_mut_slice();
                for j in 0..l {
                    out_i[j] += a_ik * rhs_k[j];
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product: `y = A * x`.
    pub fn mul_vec(&self, x: &Vector) -> Result<Vector> {
        if self.ncols() != x.len() {
            return Err(DenseError::dims("matrix mul_vec", self.ncols(), x.len()));
        }
        self.rows.iter().map(|row| row.dot(x)).collect::<Result<Vec<_>>>().map(Vector::from)
    }

    /// Multiply every element by a scalar.
    pub fn mul_num(&self, n: impl IntoF64) -> Matrix {
        let n = n.into_f64();
        Self { rows: self.rows.iter().map(|r| r.mul_num(n)).collect() }
    }

    /// Sum of the diagonal (square only).
    pub fn trace(&self) -> Result<f64> {
        let n = self.ensure_square("trace")?;
        Ok((0..n).map(|i| self.get(i, i)).sum())
    }

    /// Main diagonal (length `min(rows, cols)`).
    pub fn diagonal(&self) -> Vector {
        let (r, c) = self.dims();
        Vector::from_fn(r.min(c), |i| self.get(i, i))
    }

    /// Frobenius norm.
    pub fn norm(&self) -> f64 {
        self.rows.iter().map(Vector::square_sum).sum::<f64>().sqrt()
    }

    /// All elements in row-major order.
    pub fn flat(&self) -> Vector {
        Vector::from(self.rows.iter().flat_map(|r| r.iter().copied()).collect::<Vec<_>>())
    }

    /// Copy the `nrows × ncols` block starting at `(row, col)`.
    pub fn sub_matrix(&self, row: usize, col: usize, nrows: usize, ncols: usize) -> Result<Matrix> {
        let (r, c) = self.dims();
        if row + nrows > r {
            return Err(DenseError::index(row + nrows - 1, r));
        }
        if col + ncols > c {
            return Err(DenseError::index(col + ncols - 1, c));
        }
        Ok(Matrix::from_fn(nrows, ncols, |i, j| self.get(row + i, col + j)))
    }

    /// Overwrite the block starting at `(row, col)` with `block`.
    pub fn set_sub_matrix(&mut self, row: usize, col: usize, block: &Matrix) -> Result<()> {
        let (r, c) = self.dims();
        let (br, bc) = block.dims();
        if row + br > r || col + bc > c {
            return Err(DenseError::dims(
                "set_sub_matrix",
                format!("block within {r}x{c}"),
                format!("{br}x{bc} at ({row}, {col})"),
            ));
        }
        for i in 0..br {
            for j in 0..bc {
                self.put(row + i, col + j, block.get(i, j));
            }
        }
        Ok(())
    }

    /// Swap two rows.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        let n = self.nrows();
        if a >= n {
            return Err(DenseError::index(a, n));
        }
        if b >= n {
            return Err(DenseError::index(b, n));
        }
        self.rows.swap(a, b);
        Ok(())
    }

    #[inline]
    pub(crate) fn swap_rows_unchecked(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// Square and equal to its transpose within [`EPS`].
    pub fn is_symmetric(&self) -> bool {
        let n = self.nrows();
        self.is_square()
            && (0..n).all(|i| ((i + 1)..n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= EPS))
    }
}

impl TryFrom<Vec<Vector>> for Matrix {
    type Error = DenseError;

    fn try_from(rows: Vec<Vector>) -> Result<Self> {
        Self::from_vectors(rows)
    }
}

impl From<Matrix> for Vec<Vector> {
    fn from(m: Matrix) -> Self {
        m.rows
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let (_, c) = self.dims();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ",\n ")?;
            }
            for (j, x) in row.iter().enumerate() {
                write!(f, "{x:.6}")?;
                if j + 1 < c {
                    write!(f, ", ")?;
                }
            }
        }
        write!(f, "}}")
    }
}
