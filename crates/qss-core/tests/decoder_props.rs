//! Property tests for bitstring decoding.

use proptest::prelude::*;
use qss_core::{DecodeMode, Decoder, ProblemInstance, decode_bitstring, encode_subset};
use qss_hal::Counts;

fn instance() -> impl Strategy<Value = ProblemInstance> {
    (prop::collection::vec(1i64..50, 1..10), 0i64..100)
        .prop_map(|(values, target)| ProblemInstance::new(values, target).unwrap())
}

proptest! {
    #[test]
    fn every_classical_solution_decodes_back(problem in instance()) {
        let n = problem.num_values();
        for indices in problem.classical_solutions().unwrap() {
            let bits = encode_subset(&indices, n);
            prop_assert_eq!(decode_bitstring(&bits, n), Some(indices.clone()));

            let counts = Counts::from_pairs([(bits, 1u64)]);
            let decoded = Decoder::new().decode(&problem, &counts);
            prop_assert_eq!(decoded.len(), 1);
            prop_assert_eq!(&decoded[0].indices, &indices);
            prop_assert_eq!(decoded[0].probability, 1.0);
        }
    }

    #[test]
    fn decoding_is_deterministic(
        problem in instance(),
        raw in prop::collection::vec((any::<u16>(), 1u64..500), 0..40),
        exhaustive in any::<bool>(),
    ) {
        let n = problem.num_values();
        let counts: Counts = raw
            .iter()
            .map(|&(mask, count)| {
                let bits: String = (0..=n)
                    .map(|i| if (mask >> (i % 16)) & 1 == 1 { '1' } else { '0' })
                    .collect();
                (bits, count)
            })
            .collect();
        let mode = if exhaustive { DecodeMode::Exhaustive } else { DecodeMode::Greedy };
        let decoder = Decoder::new().with_mode(mode);

        let first = decoder.decode(&problem, &counts);
        let second = decoder.decode(&problem, &counts.clone());
        prop_assert_eq!(&first, &second);

        for candidate in &first {
            prop_assert!(problem.is_solution(&candidate.indices));
            prop_assert!(candidate.bitstring.ends_with('1'));
        }
        let total: f64 = first.iter().map(|c| c.probability).sum();
        prop_assert!(total <= 1.0 + 1e-9);
    }
}
