//! Rank by Gaussian elimination with column deflation.

use crate::{Matrix, EPS};
use tracing::{debug, trace};

impl Matrix {
    /// Rank of the matrix.
    ///
    /// Reduces a private copy column by column. A column whose pivot and
    /// every entry below it are zero is dependent: it is replaced by the
    /// last live column and the working rank shrinks by one. Entries with
    /// `|x| <= EPS * max|a_ij|` count as zero, so the result does not change
    /// when the whole matrix is scaled.
    ///
    /// Wide matrices are ranked through their transpose so every pivot
    /// position exists.
    pub fn rank(&self) -> usize {
        let (nrows, ncols) = self.dims();
        if nrows < ncols {
            return self.t().rank();
        }

        let mut mat = self.clone();
        let tol = EPS * mat.rows().iter().flat_map(|r| r.iter()).fold(0.0f64, |m, x| m.max(x.abs()));
        let mut rank = ncols;
        let mut row = 0;

        while row < rank {
            let pivot = mat.get(row, row);
            if pivot.abs() > tol {
                // Clear column `row` everywhere except the pivot itself.
                for other in 0..nrows {
                    if other == row {
                        continue;
                    }
                    let multiplier = mat.get(other, row) / pivot;
                    if multiplier == 0.0 {
                        continue;
                    }
                    for j in 0..rank {
                        let v = mat.get(other, j) - multiplier * mat.get(row, j);
                        mat.put(other, j, v);
                    }
                }
                row += 1;
                continue;
            }

            // Zero pivot: swap in a lower row with a usable entry, or drop the column.
            match ((row + 1)..nrows).find(|&i| mat.get(i, row).abs() > tol) {
                Some(below) => {
                    trace!(row, below, "rank: swapping rows");
                    mat.swap_rows_unchecked(row, below);
                }
                None => {
                    rank -= 1;
                    debug!(column = row, rank, "rank: deflating dependent column");
                    for i in 0..nrows {
                        let v = mat.get(i, rank);
                        mat.put(i, row, v);
                    }
                }
            }
        }

        rank
    }
}
