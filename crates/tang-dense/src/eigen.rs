use crate::{DenseError, Matrix, Result, Vector};
use core::f64::consts::PI;
use tracing::debug;

type V3 = [f64; 3];
type M3 = [[f64; 3]; 3];

/// Eigendecomposition of a symmetric 3×3 matrix: A = Σ λ_k v_k v_kᵀ
///
/// Closed form: eigenvalues from the trigonometric solution of the
/// characteristic cubic, eigenvectors from cross products of the shifted
/// matrix and a 2×2 solve in the orthogonal complement. No iteration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymmetricEigen3 {
    /// Eigenvalues, sorted descending.
    pub eigenvalues: Vector,
    /// Orthonormal eigenvectors as rows; row `k` belongs to `eigenvalues[k]`.
    ///
    /// Rows satisfy `v2 = -(v0 × v1)`.
    pub eigenvectors: Matrix,
}

/// Spectrum of a symmetric 3×3 matrix scaled to `max|a_ij| = 1`.
enum Spectrum {
    /// No off-diagonal mass; eigenpairs come straight from the diagonal.
    Diagonal,
    /// `values` descending; `r = det(B)/2` tells which end of the spectrum is isolated.
    General { values: V3, r: f64 },
}

impl SymmetricEigen3 {
    /// Decompose a symmetric 3×3 matrix.
    pub fn new(m: &Matrix) -> Result<Self> {
        let a = load(m)?;
        let (b, scale) = normalized(&a);

        let (values, vectors) = match spectrum(&b) {
            Spectrum::Diagonal => {
                let (values, axes) = sorted_diagonal(&a);
                debug!(?values, "eigen_sym3: diagonal input");
                let mut vectors = [[0.0; 3]; 3];
                for (row, &axis) in axes.iter().enumerate() {
                    vectors[row][axis] = 1.0;
                }
                (values, vectors)
            }
            Spectrum::General { values, r } => {
                let [eig0, eig1, eig2] = values;
                let vectors = if r >= 0.0 {
                    // eig0 is at least as far from eig1 as eig2 is
                    let v0 = isolated_vector(&b, eig0);
                    let v1 = complement_vector(&b, &v0, eig1);
                    [v0, v1, neg(cross(&v0, &v1))]
                } else {
                    debug!(r, "eigen_sym3: solving from the smallest eigenvalue");
                    let v2 = isolated_vector(&b, eig2);
                    let v1 = complement_vector(&b, &v2, eig1);
                    [neg(cross(&v1, &v2)), v1, v2]
                };
                (values.map(|v| v * scale), vectors)
            }
        };

        Ok(Self {
            eigenvalues: Vector::from(values),
            eigenvectors: Matrix::from_fn(3, 3, |i, j| vectors[i][j]),
        })
    }

    /// Eigenvalues only, sorted descending.
    pub fn eigenvalues(m: &Matrix) -> Result<Vector> {
        let a = load(m)?;
        let (b, scale) = normalized(&a);
        let values = match spectrum(&b) {
            Spectrum::Diagonal => sorted_diagonal(&a).0,
            Spectrum::General { values, .. } => values.map(|v| v * scale),
        };
        Ok(Vector::from(values))
    }

    /// Reconstruct: Σ λ_k v_k v_kᵀ
    pub fn reconstruct(&self) -> Matrix {
        let v = &self.eigenvectors;
        Matrix::from_fn(3, 3, |i, j| {
            (0..3).map(|k| self.eigenvalues[k] * v.get(k, i) * v.get(k, j)).sum()
        })
    }
}

impl Matrix {
    /// Eigendecomposition of a symmetric 3×3 matrix; see [`SymmetricEigen3`].
    pub fn eigen_sym3(&self) -> Result<SymmetricEigen3> {
        SymmetricEigen3::new(self)
    }

    /// Eigenvalues of a symmetric 3×3 matrix, sorted descending.
    pub fn eigenvalues_sym3(&self) -> Result<Vector> {
        SymmetricEigen3::eigenvalues(self)
    }
}

/// Unit vectors `(U, V)` completing `w` to an orthonormal basis.
///
/// `w` is normalized first; `U` avoids dividing by the smaller of `w[0]`,
/// `w[1]`, and `V = ŵ × U`.
pub fn orthogonal_complement(w: &Vector) -> Result<(Vector, Vector)> {
    if w.len() != 3 {
        return Err(DenseError::dims("orthogonal_complement", 3, w.len()));
    }
    let w = w.normalize()?;
    let (u, v) = complement(&[w[0], w[1], w[2]]);
    Ok((Vector::from(u), Vector::from(v)))
}

fn load(m: &Matrix) -> Result<M3> {
    if m.dims() != (3, 3) {
        return Err(DenseError::shape("eigen_sym3", (3, 3), m.dims()));
    }
    if !m.is_symmetric() {
        return Err(DenseError::NotSymmetric);
    }
    let mut a = [[0.0; 3]; 3];
    for (i, row) in a.iter_mut().enumerate() {
        for (j, x) in row.iter_mut().enumerate() {
            *x = m.get(i, j);
        }
    }
    Ok(a)
}

/// `a / max|a_ij|` and the divisor. Keeps every later square and cross
/// product clear of underflow and overflow. The zero matrix comes back as is.
fn normalized(a: &M3) -> (M3, f64) {
    let scale = a.iter().flatten().fold(0.0f64, |m, x| m.max(x.abs()));
    if scale == 0.0 {
        return (*a, 1.0);
    }
    (a.map(|row| row.map(|x| x / scale)), scale)
}

/// Diagonal entries in descending order with the axis each came from.
fn sorted_diagonal(a: &M3) -> (V3, [usize; 3]) {
    let mut axes = [0, 1, 2];
    axes.sort_by(|&i, &j| a[j][j].total_cmp(&a[i][i]));
    (axes.map(|k| a[k][k]), axes)
}

fn spectrum(a: &M3) -> Spectrum {
    let p1 = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
    let q = (a[0][0] + a[1][1] + a[2][2]) / 3.0;
    let p2 = (a[0][0] - q).powi(2) + (a[1][1] - q).powi(2) + (a[2][2] - q).powi(2) + 2.0 * p1;
    let p = (p2 / 6.0).sqrt();

    // p == 0 with p1 > 0 only happens on underflow of a numerically diagonal input
    if p1 == 0.0 || p == 0.0 {
        return Spectrum::Diagonal;
    }

    let inv_p = p.recip();
    let mut b = *a;
    for (i, row) in b.iter_mut().enumerate() {
        row[i] -= q;
        for x in row.iter_mut() {
            *x *= inv_p;
        }
    }
    let r = det3(&b) / 2.0;

    // |r| <= 1 in exact arithmetic; round-off can push it past the acos domain
    let phi = if r <= -1.0 {
        PI / 3.0
    } else if r >= 1.0 {
        0.0
    } else {
        r.acos() / 3.0
    };

    let eig0 = q + 2.0 * p * phi.cos();
    let eig2 = q + 2.0 * p * (phi + 2.0 * PI / 3.0).cos();
    let eig1 = 3.0 * q - eig0 - eig2;

    Spectrum::General { values: [eig0, eig1, eig2], r }
}

/// Unit eigenvector for an eigenvalue of multiplicity one.
///
/// Rows of `A - λI` span the plane orthogonal to the eigenvector, so any
/// two independent rows cross to it. The largest cross product is the one
/// least damaged by cancellation.
fn isolated_vector(a: &M3, val: f64) -> V3 {
    let mut s = *a;
    for (i, row) in s.iter_mut().enumerate() {
        row[i] -= val;
    }

    let candidates = [
        cross(&s[0], &s[1]),
        cross(&s[0], &s[2]),
        cross(&s[1], &s[2]),
    ];
    let mut best = 0;
    let mut dmax = dot(&candidates[0], &candidates[0]);
    for (k, c) in candidates.iter().enumerate().skip(1) {
        let d = dot(c, c);
        if d > dmax {
            dmax = d;
            best = k;
        }
    }

    if dmax == 0.0 {
        return [1.0, 0.0, 0.0];
    }
    scale(&candidates[best], dmax.sqrt().recip())
}

/// Unit eigenvector for `val` inside the plane orthogonal to `w`.
///
/// Projects `A - val I` onto the complement basis `{U, V}` and takes the
/// null vector of the resulting 2×2 system, dividing by whichever entry is
/// largest in magnitude.
fn complement_vector(a: &M3, w: &V3, val: f64) -> V3 {
    let (u, v) = complement(w);
    let au = mul(a, &u);
    let av = mul(a, &v);

    let mut m00 = dot(&u, &au) - val;
    let mut m01 = dot(&u, &av);
    let mut m11 = dot(&v, &av) - val;

    let abs00 = m00.abs();
    let abs01 = m01.abs();
    let abs11 = m11.abs();

    if abs00 >= abs11 {
        if abs00.max(abs01) == 0.0 {
            return u;
        }
        if abs00 >= abs01 {
            m01 /= m00;
            m00 = (1.0 + m01 * m01).sqrt().recip();
            m01 *= m00;
        } else {
            m00 /= m01;
            m01 = (1.0 + m00 * m00).sqrt().recip();
            m00 *= m01;
        }
        sub(&scale(&u, m01), &scale(&v, m00))
    } else {
        if abs11.max(abs01) == 0.0 {
            return u;
        }
        if abs11 >= abs01 {
            m01 /= m11;
            m11 = (1.0 + m01 * m01).sqrt().recip();
            m01 *= m11;
        } else {
            m11 /= m01;
            m01 = (1.0 + m11 * m11).sqrt().recip();
            m11 *= m01;
        }
        sub(&scale(&u, m11), &scale(&v, m01))
    }
}

fn complement(w: &V3) -> (V3, V3) {
    let u = if w[0].abs() > w[1].abs() {
        let inv = (w[0] * w[0] + w[2] * w[2]).sqrt().recip();
        [-w[2] * inv, 0.0, w[0] * inv]
    } else {
        let inv = (w[1] * w[1] + w[2] * w[2]).sqrt().recip();
        [0.0, w[2] * inv, -w[1] * inv]
    };
    (u, cross(w, &u))
}

fn det3(m: &M3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

#[inline]
fn cross(a: &V3, b: &V3) -> V3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn dot(a: &V3, b: &V3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn scale(a: &V3, s: f64) -> V3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
fn sub(a: &V3, b: &V3) -> V3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn neg(a: V3) -> V3 {
    [-a[0], -a[1], -a[2]]
}

#[inline]
fn mul(m: &M3, x: &V3) -> V3 {
    [dot(&m[0], x), dot(&m[1], x), dot(&m[2], x)]
}
