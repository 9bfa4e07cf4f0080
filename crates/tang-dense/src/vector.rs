use crate::{Axis, DenseError, IntoF64, Matrix, Result, EPS};
use core::fmt;
use core::ops::{Index, Mul, Neg};

/// Heap-allocated vector of `f64`.
///
/// Binary operations never mutate their operands; each returns a fresh
/// vector. Length checks surface as [`DenseError::DimensionMismatch`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    /// Create from a slice.
    pub fn from_slice(s: &[f64]) -> Self {
        Self { data: s.to_vec() }
    }

    /// Create a zero vector of given length.
    pub fn zeros(n: usize) -> Self {
        Self { data: vec![0.0; n] }
    }

    /// Create from a function.
    pub fn from_fn(n: usize, f: impl Fn(usize) -> f64) -> Self {
        Self { data: (0..n).map(f).collect() }
    }

    #[inline]
    pub fn len(&self) -> usize { self.data.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    #[inline]
    pub fn as_slice(&self) -> &[f64] { &self.data }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] { &mut self.data }

    #[inline]
    pub fn into_vec(self) -> Vec<f64> { self.data }

    pub fn iter(&self) -> core::slice::Iter<'_, f64> {
        self.data.iter()
    }

    /// Element at `i`; negative indices count from the end (`-1` is last).
    pub fn at(&self, i: isize) -> Result<f64> {
        let len = self.len();
        let resolved = if i < 0 { len as isize + i } else { i };
        if resolved < 0 || resolved as usize >= len {
            return Err(DenseError::IndexOutOfRange { index: i, len });
        }
        Ok(self.data[resolved as usize])
    }

    fn check_len(&self, op: &'static str, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(DenseError::dims(op, self.len(), other.len()));
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Vector {
        Vector::from_fn(self.len(), |i| f(self.data[i], other.data[i]))
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Vector {
        Vector { data: self.data.iter().map(|&x| f(x)).collect() }
    }

    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.check_len("vector add", other)?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.check_len("vector sub", other)?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Add a scalar to every element.
    pub fn add_num(&self, n: impl IntoF64) -> Vector {
        let n = n.into_f64();
        self.map(|x| x + n)
    }

    /// Subtract a scalar from every element.
    pub fn sub_num(&self, n: impl IntoF64) -> Vector {
        let n = n.into_f64();
        self.map(|x| x - n)
    }

    /// Multiply every element by a scalar.
    pub fn mul_num(&self, n: impl IntoF64) -> Vector {
        let n = n.into_f64();
        self.map(|x| x * n)
    }

    /// Dot product.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_len("vector dot", other)?;
        Ok(self.data.iter().zip(&other.data).map(|(a, b)| a * b).sum())
    }

    /// Cross product of two 3-vectors.
    pub fn cross(&self, other: &Vector) -> Result<Vector> {
        if self.len() != 3 || other.len() != 3 {
            return Err(DenseError::dims(
                "vector cross",
                "two 3-vectors",
                format!("lengths {} and {}", self.len(), other.len()),
            ));
        }
        let (a, b) = (&self.data, &other.data);
        Ok(Vector::from(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Sum of squared elements.
    pub fn square_sum(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum()
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.square_sum().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Fails only when the sum of squares is exactly zero.
    pub fn normalize(&self) -> Result<Vector> {
        let ss = self.square_sum();
        if ss == 0.0 {
            return Err(DenseError::DegenerateInput("cannot normalize a zero vector"));
        }
        let inv = ss.sqrt().recip();
        Ok(self.map(|x| x * inv))
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn abs_sum(&self) -> f64 {
        self.data.iter().map(|x| x.abs()).sum()
    }

    /// Arithmetic mean; NaN for an empty vector.
    pub fn mean(&self) -> f64 {
        self.sum() / self.len() as f64
    }

    /// First `(index, value)` holding the maximum.
    pub fn max(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &x) in self.data.iter().enumerate() {
            if best.map_or(true, |(_, b)| x > b) {
                best = Some((i, x));
            }
        }
        best
    }

    /// First `(index, value)` holding the minimum.
    pub fn min(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &x) in self.data.iter().enumerate() {
            if best.map_or(true, |(_, b)| x < b) {
                best = Some((i, x));
            }
        }
        best
    }

    /// `(index, value)` pairs in ascending value order; equal values keep
    /// their original order.
    pub fn sorted(&self) -> Vec<(usize, f64)> {
        let mut pairs: Vec<(usize, f64)> = self.data.iter().copied().enumerate().collect();
        pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
        pairs
    }

    /// Outer product `self * other^T` (len(self) × len(other)).
    pub fn outer(&self, other: &Vector) -> Matrix {
        Matrix::from_fn(self.len(), other.len(), |i, j| self.data[i] * other.data[j])
    }

    /// Reshape row-major into `rows × cols`.
    pub fn to_matrix(&self, rows: usize, cols: usize) -> Result<Matrix> {
        if rows * cols != self.len() {
            return Err(DenseError::dims("vector reshape", rows * cols, self.len()));
        }
        Ok(Matrix::from_fn(rows, cols, |i, j| self.data[i * cols + j]))
    }

    /// Repeat `n` times: as rows for [`Axis::Rows`], as columns for
    /// [`Axis::Cols`]. [`Axis::All`] lays the copies end to end in a single row.
    pub fn tile(&self, axis: Axis, n: usize) -> Matrix {
        let len = self.len();
        match axis {
            Axis::Rows => Matrix::from_fn(n, len, |_, j| self.data[j]),
            Axis::Cols => Matrix::from_fn(len, n, |i, _| self.data[i]),
            Axis::All => Matrix::from_fn(1, n * len, |_, j| self.data[j % len]),
        }
    }

    /// Elementwise equality within [`EPS`].
    pub fn approx_eq(&self, other: &Vector) -> bool {
        self.len() == other.len()
            && self.data.iter().zip(&other.data).all(|(a, b)| (a - b).abs() <= EPS)
    }

    /// Discrete convolution; see [`convolve`](crate::convolve).
    pub fn convolve(&self, other: &Vector) -> Result<Vector> {
        crate::convolve(self, other)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self { data }
    }
}

impl From<&[f64]> for Vector {
    fn from(s: &[f64]) -> Self {
        Self::from_slice(s)
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(a: [f64; N]) -> Self {
        Self { data: a.to_vec() }
    }
}

impl Index<usize> for Vector {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 { &self.data[i] }
}

impl Neg for &Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        self.map(|x| -x)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        self.mul_num(rhs)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x:.6}")?;
        }
        write!(f, "}}")
    }
}
