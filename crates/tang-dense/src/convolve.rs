//! Discrete convolution split across rayon tasks.
//!
//! The output is cut into contiguous chunks, one task per chunk. Tasks
//! share both inputs read-only and each owns a disjoint `&mut` slice of the
//! output, so no locking is needed; `rayon::scope` returns only after every
//! task has finished.

use crate::{ConvolveConfig, DenseError, Result, Vector};
use tracing::debug;

/// `w[k] = Σ u[i]·v[k-i]`, length `len(u) + len(v) - 1`, with the default
/// [`ConvolveConfig`].
pub fn convolve(u: &Vector, v: &Vector) -> Result<Vector> {
    convolve_with(u, v, &ConvolveConfig::default())
}

/// [`convolve`] with an explicit chunking configuration.
pub fn convolve_with(u: &Vector, v: &Vector, config: &ConvolveConfig) -> Result<Vector> {
    if u.is_empty() || v.is_empty() {
        return Err(DenseError::DegenerateInput("convolution of an empty vector"));
    }

    let n = u.len() + v.len() - 1;
    let chunk = config.chunk_size(n);
    let (u, v) = (u.as_slice(), v.as_slice());
    let mut w = vec![0.0; n];

    debug!(output_len = n, chunk, tasks = n.div_ceil(chunk), "convolve: dispatching");

    rayon::scope(|s| {
        for (idx, out) in w.chunks_mut(chunk).enumerate() {
            let start = idx * chunk;
            s.spawn(move |_| {
                for (offset, slot) in out.iter_mut().enumerate() {
                    *slot = coefficient(u, v, start + offset);
                }
            });
        }
    });

    Ok(Vector::from(w))
}

/// `Σ u[i]·v[k-i]` over `i ∈ [max(0, k-len(v)+1), min(k, len(u)-1)]`.
#[inline]
fn coefficient(u: &[f64], v: &[f64], k: usize) -> f64 {
    let lo = k.saturating_sub(v.len() - 1);
    let hi = k.min(u.len() - 1);
    (lo..=hi).map(|i| u[i] * v[k - i]).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct(u: &[f64], v: &[f64]) -> Vec<f64> {
        let mut w = vec![0.0; u.len() + v.len() - 1];
        for (i, a) in u.iter().enumerate() {
            for (j, b) in v.iter().enumerate() {
                w[i + j] += a * b;
            }
        }
        w
    }

    #[test]
    fn small_known() {
        let u = Vector::from([1.0, 2.0, 3.0]);
        let v = Vector::from([0.0, 1.0, 0.5]);
        let w = convolve(&u, &v).unwrap();
        assert_eq!(w, Vector::from([0.0, 1.0, 2.5, 4.0, 1.5]));
    }

    #[test]
    fn single_elements() {
        let w = convolve(&Vector::from([3.0]), &Vector::from([-2.0])).unwrap();
        assert_eq!(w, Vector::from([-6.0]));
        let w = convolve(&Vector::from([2.0]), &Vector::from([1.0, 2.0, 3.0])).unwrap();
        assert_eq!(w, Vector::from([2.0, 4.0, 6.0]));
    }

    #[test]
    fn many_tiny_chunks_match_direct() {
        let u = Vector::from_fn(37, |i| (i as f64 * 0.3).sin());
        let v = Vector::from_fn(11, |i| (i as f64 * 0.7).cos());
        let expected = Vector::from(direct(u.as_slice(), v.as_slice()));
        for budget in [1, 7, 100, ConvolveConfig::DEFAULT_WORK_BUDGET] {
            let w = convolve_with(&u, &v, &ConvolveConfig::with_work_budget(budget)).unwrap();
            assert!(w.approx_eq(&expected), "budget {budget}");
        }
    }

    #[test]
    fn length_and_commutativity() {
        let u = Vector::from_fn(10_000, |i| ((i * 7919) % 101) as f64 / 50.0 - 1.0);
        let v = Vector::from_fn(10_000, |i| ((i * 104_729) % 97) as f64 / 48.0 - 1.0);
        let uv = convolve(&u, &v).unwrap();
        let vu = v.convolve(&u).unwrap();
        assert_eq!(uv.len(), 19_999);
        for k in 0..uv.len() {
            assert!((uv[k] - vu[k]).abs() < 1e-9, "mismatch at {k}");
        }
    }

    #[test]
    fn empty_operand_rejected() {
        let e = Vector::zeros(0);
        let u = Vector::from([1.0]);
        assert!(matches!(convolve(&e, &u), Err(DenseError::DegenerateInput(_))));
        assert!(matches!(convolve(&u, &e), Err(DenseError::DegenerateInput(_))));
    }
}
