use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use tang_bench::*;
use tang_dense::{convolve_with, ConvolveConfig, Lu};

const SIZES: &[usize] = &[16, 32, 64, 128];
const COFACTOR_SIZES: &[usize] = &[3, 5, 7, 8]; // Laplace expansion is factorial

fn gemm(c: &mut Criterion) {
    let mut group = c.benchmark_group("gemm");

    for &n in SIZES {
        group.throughput(Throughput::Elements((n * n * n) as u64));

        group.bench_with_input(BenchmarkId::new("tang", n), &n, |b, &n| {
            let a = random_matrix(n);
            let v = random_matrix(n);
            b.iter(|| black_box(a.mul(&v)))
        });

        group.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let flat_a = random_f64_flat(n * n);
            let flat_b = random_f64_flat(n * n);
            let a = nalgebra::DMatrix::from_row_slice(n, n, &flat_a);
            let v = nalgebra::DMatrix::from_row_slice(n, n, &flat_b);
            b.iter(|| black_box(&a * &v))
        });
    }

    group.finish();
}

fn pow(c: &mut Criterion) {
    let mut group = c.benchmark_group("pow");
    let a = random_matrix(32).mul_num(0.1);

    for &e in &[4u32, 16, 64] {
        group.bench_with_input(BenchmarkId::new("squaring", e), &e, |b, &e| {
            b.iter(|| black_box(a.pow(e)))
        });
        group.bench_with_input(BenchmarkId::new("naive", e), &e, |b, &e| {
            b.iter(|| black_box(a.naive_pow(e)))
        });
    }

    group.finish();
}

fn rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for &n in SIZES {
        group.bench_with_input(BenchmarkId::new("full", n), &n, |b, &n| {
            let a = random_invertible(n);
            b.iter(|| black_box(a.rank()))
        });
        group.bench_with_input(BenchmarkId::new("deficient", n), &n, |b, &n| {
            let a = random_low_rank(n);
            b.iter(|| black_box(a.rank()))
        });
    }

    group.finish();
}

fn det(c: &mut Criterion) {
    let mut group = c.benchmark_group("det");

    for &n in COFACTOR_SIZES {
        group.bench_with_input(BenchmarkId::new("lu", n), &n, |b, &n| {
            let a = random_invertible(n);
            b.iter(|| black_box(a.det()))
        });
        group.bench_with_input(BenchmarkId::new("cofactor", n), &n, |b, &n| {
            let a = random_invertible(n);
            b.iter(|| black_box(a.naive_det()))
        });
    }

    group.finish();
}

fn inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");

    for &n in SIZES {
        group.bench_with_input(BenchmarkId::new("tang", n), &n, |b, &n| {
            let a = random_invertible(n);
            b.iter(|| black_box(a.inverse()))
        });

        group.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = random_invertible(n);
            let a = nalgebra::DMatrix::from_row_slice(n, n, a.flat().as_slice());
            b.iter(|| black_box(a.clone().try_inverse()))
        });
    }

    for &n in COFACTOR_SIZES {
        group.bench_with_input(BenchmarkId::new("cofactor", n), &n, |b, &n| {
            let a = random_invertible(n);
            b.iter(|| black_box(a.naive_inverse()))
        });
    }

    group.finish();
}

fn lu_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("lu_solve");

    for &n in SIZES {
        group.bench_with_input(BenchmarkId::new("tang", n), &n, |b, &n| {
            let a = random_invertible(n);
            let rhs = random_vector(n);
            b.iter(|| {
                let lu = Lu::new(&a).unwrap();
                black_box(lu.solve(&rhs))
            })
        });

        group.bench_with_input(BenchmarkId::new("nalgebra", n), &n, |b, &n| {
            let a = random_invertible(n);
            let rhs = nalgebra::DVector::from_column_slice(random_vector(n).as_slice());
            let a = nalgebra::DMatrix::from_row_slice(n, n, a.flat().as_slice());
            b.iter(|| {
                let lu = a.clone().lu();
                black_box(lu.solve(&rhs))
            })
        });
    }

    group.finish();
}

fn symm_eigen3(c: &mut Criterion) {
    let mut group = c.benchmark_group("symm_eigen3");
    let inputs = random_symmetric3(1024);
    group.throughput(Throughput::Elements(inputs.len() as u64));

    group.bench_function("tang", |b| {
        b.iter(|| {
            for (m, _) in &inputs {
                black_box(m.eigen_sym3().unwrap());
            }
        })
    });

    group.bench_function("nalgebra", |b| {
        let mats: Vec<_> = inputs
            .iter()
            .map(|(_, flat)| nalgebra::Matrix3::from_row_slice(flat))
            .collect();
        b.iter(|| {
            for m in &mats {
                black_box(m.symmetric_eigen());
            }
        })
    });

    group.finish();
}

fn convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve");

    for &n in &[1_000usize, 10_000, 20_000] {
        group.throughput(Throughput::Elements((n * n) as u64));
        let u = random_vector(n);
        let v = random_vector(n);

        for budget in [1_000usize, ConvolveConfig::DEFAULT_WORK_BUDGET, 1_000_000] {
            let cfg = ConvolveConfig::with_work_budget(budget);
            group.bench_with_input(BenchmarkId::new(format!("budget_{budget}"), n), &n, |b, _| {
                b.iter(|| black_box(convolve_with(&u, &v, &cfg)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, gemm, pow, rank, det, inverse, lu_solve, symm_eigen3, convolve);
criterion_main!(benches);
