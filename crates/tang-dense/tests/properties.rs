//! Property tests for algebraic identities.

use proptest::prelude::*;
use tang_dense::{convolve, Matrix, SymmetricEigen3, Vector};

fn matrix(rows: usize, cols: usize, range: f64) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-range..range, rows * cols)
        .prop_map(move |flat| Matrix::from_fn(rows, cols, |i, j| flat[i * cols + j]))
}

fn square(max: usize, range: f64) -> impl Strategy<Value = Matrix> {
    (1..=max).prop_flat_map(move |n| matrix(n, n, range))
}

/// Strictly diagonally dominant, hence invertible and well conditioned.
fn invertible(max: usize) -> impl Strategy<Value = Matrix> {
    square(max, 1.0).prop_map(|a| {
        let n = a.nrows();
        a.add(&Matrix::identity(n).mul_num(n as f64 + 1.0)).unwrap()
    })
}

fn symmetric3() -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-10.0f64..10.0, 6).prop_map(|v| {
        let flat = [v[0], v[3], v[4], v[3], v[1], v[5], v[4], v[5], v[2]];
        Matrix::from_fn(3, 3, |i, j| flat[i * 3 + j])
    })
}

fn vector(max: usize) -> impl Strategy<Value = Vector> {
    prop::collection::vec(-5.0f64..5.0, 1..=max).prop_map(Vector::from)
}

fn close(a: f64, b: f64, rtol: f64) -> bool {
    (a - b).abs() <= rtol * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn inverse_is_two_sided(a in invertible(6)) {
        let inv = a.inverse().unwrap();
        let id = Matrix::identity(a.nrows());
        prop_assert!(a.mul(&inv).unwrap().approx_eq(&id));
        prop_assert!(inv.mul(&a).unwrap().approx_eq(&id));
    }

    #[test]
    fn lu_matches_cofactor(a in invertible(5)) {
        prop_assert!(close(a.det().unwrap(), a.naive_det().unwrap(), 1e-9));
        prop_assert!(a.inverse().unwrap().approx_eq(&a.naive_inverse().unwrap()));
    }

    #[test]
    fn adjugate_scales_identity(a in square(4, 3.0)) {
        let n = a.nrows();
        let lhs = a.mul(&a.naive_adj().unwrap()).unwrap();
        let rhs = Matrix::identity(n).mul_num(a.naive_det().unwrap());
        prop_assert!(lhs.approx_eq(&rhs));
    }

    #[test]
    fn powers_add_exponents(p in square(4, 1.0), m in 0u32..5, k in 0u32..5) {
        let lhs = p.pow(m).unwrap().mul(&p.pow(k).unwrap()).unwrap();
        prop_assert!(lhs.approx_eq(&p.pow(m + k).unwrap()));
        prop_assert!(p.pow(m).unwrap().approx_eq(&p.naive_pow(m).unwrap()));
    }

    #[test]
    fn rank_is_transpose_invariant(r in 1usize..6, c in 1usize..6, seed in matrix(5, 5, 4.0)) {
        let a = seed.sub_matrix(0, 0, r, c).unwrap();
        let rank = a.rank();
        prop_assert!(rank <= r.min(c));
        prop_assert_eq!(rank, a.t().rank());
    }

    #[test]
    fn invertible_has_full_rank(a in invertible(6)) {
        prop_assert_eq!(a.rank(), a.nrows());
    }

    #[test]
    fn symmetric_eigen_decomposes(a in symmetric3()) {
        let eig = SymmetricEigen3::new(&a).unwrap();
        let vals = &eig.eigenvalues;
        let vecs = &eig.eigenvectors;
        let scale = a.flat().iter().fold(1.0f64, |m, x| m.max(x.abs()));

        prop_assert!(close(vals.sum(), a.trace().unwrap(), 1e-9));
        prop_assert!(vals[0] >= vals[1] - 1e-9 * scale);
        prop_assert!(vals[1] >= vals[2] - 1e-9 * scale);

        let vvt = vecs.mul(&vecs.t()).unwrap();
        prop_assert!(vvt.approx_eq(&Matrix::identity(3)));

        for i in 0..3 {
            let v = vecs.row(i).unwrap();
            let residual = a.mul_vec(v).unwrap().sub(&v.mul_num(vals[i])).unwrap();
            prop_assert!(residual.norm() < 1e-7 * scale, "row {}: {}", i, residual.norm());
        }
    }

    #[test]
    fn convolution_commutes(u in vector(40), v in vector(40)) {
        let uv = convolve(&u, &v).unwrap();
        let vu = convolve(&v, &u).unwrap();
        prop_assert_eq!(uv.len(), u.len() + v.len() - 1);
        for k in 0..uv.len() {
            prop_assert!(close(uv[k], vu[k], 1e-12));
        }
        prop_assert!(close(uv.sum(), u.sum() * v.sum(), 1e-9));
    }

    #[test]
    fn normalized_has_unit_length(v in vector(10)) {
        prop_assume!(v.norm() > 1e-3);
        prop_assert!(close(v.normalize().unwrap().norm(), 1.0, 1e-12));
    }
}
