//! Tolerances and tuning knobs.

/// Absolute tolerance for floating-point equality and zero-pivot tests.
///
/// Two values `a`, `b` compare equal when `|a - b| <= EPS`.
pub const EPS: f64 = 1e-6;

/// Tuning for [`convolve_with`](crate::convolve_with).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvolveConfig {
    /// Total work budget divided across output elements to size each
    /// chunk: `chunk = max(1, work_budget / output_len)`. The default keeps
    /// one task in the ~100µs to 1ms range.
    pub work_budget: usize,
}

impl ConvolveConfig {
    pub const DEFAULT_WORK_BUDGET: usize = 100_000;

    pub fn with_work_budget(work_budget: usize) -> Self {
        Self { work_budget }
    }

    /// Number of output elements handled by one task.
    pub fn chunk_size(&self, output_len: usize) -> usize {
        if output_len == 0 {
            return 1;
        }
        (self.work_budget / output_len).max(1)
    }
}

impl Default for ConvolveConfig {
    fn default() -> Self {
        Self { work_budget: Self::DEFAULT_WORK_BUDGET }
    }
}
