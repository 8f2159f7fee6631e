//! Subset-sum problem instances.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Largest instance [`ProblemInstance::classical_solutions`] will enumerate.
pub const MAX_ENUMERABLE_VALUES: usize = 24;

/// An ordered set of integers and the sum a subset should reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemInstance {
    values: Vec<i64>,
    target: i64,
}

impl ProblemInstance {
    /// Create an instance, rejecting inputs the encoding cannot represent.
    ///
    /// The value sum must be positive because it fixes the width of the sum
    /// register, and `sum(values) + target` must be non-zero because every
    /// value is normalized by it.
    pub fn new(values: Vec<i64>, target: i64) -> CoreResult<Self> {
        if values.is_empty() {
            return Err(CoreError::EmptyValues);
        }

        let instance = Self { values, target };
        let value_sum = instance.value_sum();
        if value_sum <= 0 {
            return Err(CoreError::NonPositiveValueSum(value_sum));
        }
        if instance.normalization() == 0 {
            return Err(CoreError::DegenerateNormalization { value_sum, target });
        }

        Ok(instance)
    }

    /// The input values in construction order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// The target sum.
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Number of input values.
    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    /// Sum of all input values.
    pub fn value_sum(&self) -> i128 {
        self.values.iter().map(|&v| i128::from(v)).sum()
    }

    /// `sum(values) + target`, the constant every value is divided by.
    pub fn normalization(&self) -> i128 {
        self.value_sum() + i128::from(self.target)
    }

    /// Each value divided by the normalization constant.
    pub fn normalized_values(&self) -> Vec<f64> {
        let total = self.normalization() as f64;
        self.values.iter().map(|&v| v as f64 / total).collect()
    }

    /// The target divided by the normalization constant.
    pub fn normalized_target(&self) -> f64 {
        self.target as f64 / self.normalization() as f64
    }

    /// Values selected by `indices`, in index order.
    pub fn subset(&self, indices: &[usize]) -> Vec<i64> {
        indices.iter().filter_map(|&i| self.values.get(i).copied()).collect()
    }

    /// Whether the values at `indices` sum to the target.
    pub fn is_solution(&self, indices: &[usize]) -> bool {
        let sum: i128 = self.subset(indices).into_iter().map(i128::from).sum();
        sum == i128::from(self.target)
    }

    /// Every subset summing to the target, found by brute force.
    ///
    /// Subsets are index lists, ordered by their membership mask with value
    /// `0` as the least significant bit. The empty subset qualifies when the
    /// target is zero.
    pub fn classical_solutions(&self) -> CoreResult<Vec<Vec<usize>>> {
        let n = self.num_values();
        if n > MAX_ENUMERABLE_VALUES {
            return Err(CoreError::EnumerationTooLarge {
                got: n,
                max: MAX_ENUMERABLE_VALUES,
            });
        }

        let solutions = (0u32..1 << n)
            .map(|mask| (0..n).filter(|&i| (mask >> i) & 1 == 1).collect::<Vec<_>>())
            .filter(|indices| self.is_solution(indices))
            .collect();
        Ok(solutions)
    }
}
