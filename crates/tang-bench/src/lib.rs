//! Shared helpers for tang-dense benchmarks: seeded RNG, input generators.

use tang_dense::{Matrix, Vector};

/// xoshiro256** generator; a fixed seed gives every bench run identical inputs.
pub struct Rng {
    s: [u64; 4],
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        // SplitMix64 to expand seed into state
        let mut z = seed;
        let mut s = [0u64; 4];
        for slot in &mut s {
            z = z.wrapping_add(0x9e3779b97f4a7c15);
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
            *slot = z ^ (z >> 31);
        }
        Self { s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.s[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
        result
    }

    /// Uniform f64 in [-1, 1]
    pub fn f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64) * 2.0 - 1.0
    }
}

pub fn make_rng() -> Rng {
    Rng::new(0xDEAD_BEEF_CAFE_BABE)
}

pub fn random_f64_flat(size: usize) -> Vec<f64> {
    let mut rng = make_rng();
    (0..size).map(|_| rng.f64()).collect()
}

pub fn random_vector(len: usize) -> Vector {
    Vector::from(random_f64_flat(len))
}

/// Row-major `size x size` matrix with entries in [-1, 1].
pub fn random_matrix(size: usize) -> Matrix {
    let flat = random_f64_flat(size * size);
    Matrix::from_fn(size, size, |i, j| flat[i * size + j])
}

/// Diagonally dominant, so LU and cofactor paths both stay well away from singular.
pub fn random_invertible(size: usize) -> Matrix {
    let a = random_matrix(size);
    a.add(&Matrix::identity(size).mul_num(size as f64))
        .unwrap_or(a)
}

/// Rank-deficient `size x size` matrix: the last half of the rows repeat the first half.
pub fn random_low_rank(size: usize) -> Matrix {
    let flat = random_f64_flat(size * size);
    let half = size.div_ceil(2);
    Matrix::from_fn(size, size, |i, j| flat[(i % half) * size + j])
}

/// `n` symmetric 3x3 matrices, also returned as row-major arrays for nalgebra.
pub fn random_symmetric3(n: usize) -> Vec<(Matrix, [f64; 9])> {
    let mut rng = make_rng();
    (0..n)
        .map(|_| {
            let (a, b, c) = (rng.f64(), rng.f64(), rng.f64());
            let (d, e, f) = (rng.f64(), rng.f64(), rng.f64());
            let flat = [a, d, e, d, b, f, e, f, c];
            (Matrix::from_fn(3, 3, |i, j| flat[i * 3 + j]), flat)
        })
        .collect()
}
