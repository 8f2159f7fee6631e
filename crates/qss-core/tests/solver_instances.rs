//! Known instances solved end to end on the statevector simulator.

use std::collections::BTreeSet;

use qss_adapter_sim::SimulatorBackend;
use qss_core::{CoreError, DecodeMode, QuantumSubsetSum, SolverConfig, encode_subset};
use qss_hal::HalError;

const SEED: u64 = 0x5eed;

async fn solve(values: Vec<i64>, target: i64) -> (QuantumSubsetSum, BTreeSet<Vec<i64>>) {
    solve_with(values, target, SolverConfig::default()).await
}

async fn solve_with(
    values: Vec<i64>,
    target: i64,
    config: SolverConfig,
) -> (QuantumSubsetSum, BTreeSet<Vec<i64>>) {
    let mut solver = QuantumSubsetSum::with_config(values, target, config).unwrap();
    let backend = SimulatorBackend::new().with_seed(SEED);
    let subsets = solver
        .execute(&backend)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.subset)
        .collect();
    (solver, subsets)
}

fn set(subsets: &[&[i64]]) -> BTreeSet<Vec<i64>> {
    subsets.iter().map(|s| s.to_vec()).collect()
}

fn exhaustive() -> SolverConfig {
    SolverConfig {
        decode: qss_core::DecodeConfig {
            mode: DecodeMode::Exhaustive,
            min_probability: 0.0,
        },
        ..SolverConfig::default()
    }
}

#[tokio::test]
async fn two_solutions_lead_the_distribution() {
    let (solver, subsets) = solve(vec![5, 7, 8, 9, 1], 16).await;
    assert_eq!(subsets, set(&[&[7, 9], &[7, 8, 1]]));

    let counts = solver.get_measurement_counts().unwrap();
    assert_eq!(counts.total_shots(), 1024);
    let total: f64 = counts.iter().map(|(bits, _)| counts.probability(bits)).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let top: BTreeSet<&str> = counts
        .sorted()
        .into_iter()
        .take(2)
        .map(|(bits, _)| bits.as_str())
        .collect();
    assert_eq!(top, BTreeSet::from(["010101", "011011"]));
}

#[tokio::test]
async fn single_solution() {
    let (_, subsets) = solve(vec![5, 2, 1], 3).await;
    assert_eq!(subsets, set(&[&[2, 1]]));
}

#[tokio::test]
async fn three_solutions() {
    let (_, subsets) = solve(vec![1, 3, 6, 4, 2], 6).await;
    assert_eq!(subsets, set(&[&[6], &[4, 2], &[1, 3, 2]]));
}

#[tokio::test]
async fn negative_value_in_solution() {
    let (_, subsets) = solve(vec![1, -3, 7], 5).await;
    assert_eq!(subsets, set(&[&[1, -3, 7]]));
}

#[tokio::test]
async fn zero_sum_pair_does_not_hide_solutions() {
    // {3, -3} reads zero with the marker clear and ranks with the solutions.
    let (_, subsets) = solve(vec![3, -3, 4], 4).await;
    assert_eq!(subsets, set(&[&[4], &[3, -3, 4]]));
}

#[tokio::test]
async fn zero_target_yields_empty_subset() {
    let (_, subsets) = solve_with(vec![2, 3, 5], 0, exhaustive()).await;
    assert_eq!(subsets, BTreeSet::from([Vec::new()]));
}

#[tokio::test]
async fn negative_target() {
    let (_, subsets) = solve_with(vec![6, -2, 1], -1, exhaustive()).await;
    assert_eq!(subsets, set(&[&[-2, 1]]));
}

#[tokio::test]
async fn no_solution_yields_empty_result() {
    let (solver, subsets) = solve(vec![1, 3, 11], 8).await;
    assert!(subsets.is_empty());
    assert!(solver.classical_solutions().unwrap().is_empty());
}

#[tokio::test]
async fn exhaustive_decode_agrees_with_classical_solutions() {
    let config = SolverConfig {
        shots: 4096,
        ..exhaustive()
    };
    let mut solver = QuantumSubsetSum::with_config(vec![1, 3, 6, 4, 2], 6, config).unwrap();
    let backend = SimulatorBackend::new().with_seed(SEED);
    let found: BTreeSet<Vec<i64>> = solver
        .execute(&backend)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.subset)
        .collect();
    let expected: BTreeSet<Vec<i64>> = solver.classical_solutions().unwrap().into_iter().collect();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn candidates_sorted_by_probability() {
    let mut solver = QuantumSubsetSum::new(vec![1, 3, 6, 4, 2], 6).unwrap();
    let backend = SimulatorBackend::new().with_seed(SEED);
    let candidates = solver.execute(&backend).await.unwrap();

    for pair in candidates.windows(2) {
        assert!(pair[0].probability >= pair[1].probability);
    }
    for candidate in &candidates {
        let expected = candidate.count as f64 / 1024.0;
        assert!((candidate.probability - expected).abs() < 1e-12);
    }
}

#[test]
fn exact_distribution_matches_amplified_solutions() {
    let solver = QuantumSubsetSum::new(vec![5, 7, 8, 9, 1], 16).unwrap();
    let circuit = solver.build().unwrap();
    let probs = SimulatorBackend::new().exact_probabilities(&circuit).unwrap();

    let total: f64 = probs.values().sum();
    assert!((total - 1.0).abs() < 1e-6);

    for indices in [vec![1, 3], vec![1, 2, 4]] {
        let p = probs[&encode_subset(&indices, 5)];
        assert!((p - 0.3331).abs() < 1e-3, "p({indices:?}) = {p}");
    }
}

#[tokio::test]
async fn backend_errors_pass_through() {
    let mut solver = QuantumSubsetSum::new(vec![5, 7, 8, 9, 1], 16).unwrap();
    let narrow = SimulatorBackend::with_max_qubits(8);
    assert!(matches!(
        solver.execute(&narrow).await,
        Err(CoreError::Hal(HalError::CircuitTooLarge(_)))
    ));

    let config = SolverConfig {
        shots: 2_000_000,
        ..SolverConfig::default()
    };
    let mut solver = QuantumSubsetSum::with_config(vec![5, 2, 1], 3, config).unwrap();
    assert!(matches!(
        solver.execute(&SimulatorBackend::new()).await,
        Err(CoreError::Hal(HalError::InvalidShots(_)))
    ));
    assert!(solver.get_measurement_counts().is_none());
}

#[tokio::test]
async fn layout_wider_than_backend_rejected_before_build() {
    // sum 16 gives a 5-qubit register: 5 + 17 + 1 = 23 qubits on a 20-qubit backend.
    let mut solver = QuantumSubsetSum::new(vec![1; 16], 2).unwrap();
    assert_eq!(solver.layout().num_qubits(), 23);
    let err = solver.execute(&SimulatorBackend::new()).await.unwrap_err();
    match err {
        CoreError::Hal(HalError::CircuitTooLarge(msg)) => assert!(msg.contains("23")),
        other => panic!("expected CircuitTooLarge, got {other:?}"),
    }
    assert!(solver.get_measurement_counts().is_none());
}

#[test]
fn out_of_range_target_rejected() {
    assert!(matches!(
        QuantumSubsetSum::new(vec![1, 1], 100),
        Err(CoreError::TargetOutOfRange { target: 100, .. })
    ));
}
