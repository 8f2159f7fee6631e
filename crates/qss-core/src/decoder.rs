//! Measurement decoding.
//!
//! A bitstring has one character per classical bit: character `i < n` says
//! whether value `i` is in the subset and the last character is the target
//! marker. Only bitstrings with the marker set describe a candidate.

use qss_hal::Counts;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::problem::ProblemInstance;

/// How far down the count ranking decoding continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Stop at the first marker-set bitstring that is not a verified solution.
    #[default]
    Greedy,
    /// Scan every bitstring.
    Exhaustive,
}

/// One decoded solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionCandidate {
    /// Selected values, in input order.
    pub subset: Vec<i64>,
    /// Positions of the selected values.
    pub indices: Vec<usize>,
    /// The bitstring it was decoded from.
    pub bitstring: String,
    /// Raw count of the bitstring.
    pub count: u64,
    /// `count / total shots`.
    pub probability: f64,
}

/// Bitstring with the given values selected and the marker set.
pub fn encode_subset(indices: &[usize], num_values: usize) -> String {
    let mut bits = vec![b'0'; num_values + 1];
    for &i in indices {
        if let Some(bit) = bits.get_mut(i) {
            *bit = b'1';
        }
    }
    bits[num_values] = b'1';
    bits.into_iter().map(char::from).collect()
}

/// Selected value positions, or `None` unless the bitstring is `n + 1` bits
/// long with the marker set.
pub fn decode_bitstring(bitstring: &str, num_values: usize) -> Option<Vec<usize>> {
    let bits = bitstring.as_bytes();
    if bits.len() != num_values + 1 || bits[num_values] != b'1' {
        return None;
    }
    let mut indices = Vec::new();
    for (i, &bit) in bits[..num_values].iter().enumerate() {
        match bit {
            b'1' => indices.push(i),
            b'0' => {}
            _ => return None,
        }
    }
    Some(indices)
}

/// Turns raw counts into verified solution candidates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decoder {
    mode: DecodeMode,
    min_probability: f64,
}

impl Decoder {
    /// Greedy decoder without a probability threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decode mode.
    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Drop candidates whose probability falls below `threshold`.
    pub fn with_min_probability(mut self, threshold: f64) -> Self {
        self.min_probability = threshold;
        self
    }

    /// Decode `counts` against `problem`.
    ///
    /// Candidates come out in descending count order, ties broken by
    /// bitstring. Distinct bitstrings with the marker set decode to distinct
    /// subsets, so nothing needs merging.
    pub fn decode(&self, problem: &ProblemInstance, counts: &Counts) -> Vec<SolutionCandidate> {
        let total = counts.total_shots();
        if total == 0 {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for (bitstring, &count) in counts.sorted() {
            if count == 0 {
                continue;
            }
            let probability = count as f64 / total as f64;
            if probability < self.min_probability {
                match self.mode {
                    DecodeMode::Greedy => break,
                    DecodeMode::Exhaustive => continue,
                }
            }

            // Marker-clear outcomes are not candidates, whatever their count.
            let Some(indices) = decode_bitstring(bitstring, problem.num_values()) else {
                continue;
            };
            if !problem.is_solution(&indices) {
                if self.mode == DecodeMode::Greedy {
                    trace!(bitstring = %bitstring, count, "stopping at first non-solution");
                    break;
                }
                continue;
            }

            candidates.push(SolutionCandidate {
                subset: problem.subset(&indices),
                indices,
                bitstring: bitstring.clone(),
                count,
                probability,
            });
        }
        candidates
    }
}
