//! Tuning knobs for batched and numeric operations.
//!
//! The plain functions use [`Default`] values. The `*_with` variants
//! accept an explicit config.

/// Controls how batched operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Minimum number of output elements before work is handed to the
    /// rayon pool. Ignored when the `parallel` feature is disabled.
    pub parallel_threshold: usize,
}

impl BatchConfig {
    /// Default element count at which batches go parallel.
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

    /// Config that never parallelizes.
    pub const SEQUENTIAL: Self = Self {
        parallel_threshold: usize::MAX,
    };

    /// Returns `true` if a batch of `len` outputs should run in parallel.
    #[inline]
    pub fn use_parallel(&self, len: usize) -> bool {
        cfg!(feature = "parallel") && len >= self.parallel_threshold
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Controls the dense linear-algebra routines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinalgConfig {
    /// Pivots with magnitude at or below this value are treated as zero.
    ///
    /// The default `0.0` only rejects exactly-zero pivots, so nearly
    /// singular matrices invert to large (possibly non-finite) values.
    pub singular_epsilon: f64,
}

impl Default for LinalgConfig {
    fn default() -> Self {
        Self {
            singular_epsilon: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_never_parallel() {
        assert!(!BatchConfig::SEQUENTIAL.use_parallel(usize::MAX - 1));
    }

    #[test]
    fn test_threshold() {
        let config = BatchConfig {
            parallel_threshold: 10,
        };
        assert!(!config.use_parallel(9));
        assert_eq!(config.use_parallel(10), cfg!(feature = "parallel"));
    }
}
