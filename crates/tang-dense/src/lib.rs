//! Dense linear algebra over `f64`: vectors, matrices and exact decompositions.
//!
//! Row-major matrices built on [`Vector`] rows, with:
//! - rank by Gaussian elimination with column deflation
//! - determinant / adjugate / inverse by recursive cofactor expansion
//!   (`naive_*`), plus an LU fast path for the same quantities
//! - integer matrix powers
//! - closed-form eigen-decomposition of symmetric 3×3 matrices
//! - chunked fork/join convolution on rayon

mod config;
mod error;
mod num;

mod vector;
mod matrix;
mod rank;
mod cofactor;
mod lu;
mod power;
mod eigen;
mod convolve;
mod stats;

pub use config::{ConvolveConfig, EPS};
pub use error::{DenseError, Result};
pub use num::IntoF64;

pub use vector::Vector;
pub use matrix::{Axis, Entry, Matrix};
pub use lu::Lu;
pub use eigen::{orthogonal_complement, SymmetricEigen3};
pub use convolve::{convolve, convolve_with};
pub use stats::cross_cov;
