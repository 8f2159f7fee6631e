//! Phase encoding of value sums.
//!
//! Every index qubit kicks a phase proportional to its value back onto the
//! sum register. Reading the register with an inverse QFT leaves it at zero
//! exactly when the selected values, minus the target when the marker is
//! set, cancel out.

use std::f64::consts::TAU;

use qss_ir::{Circuit, QubitId};
use tracing::debug;

use crate::error::CoreResult;
use crate::layout::RegisterLayout;
use crate::problem::ProblemInstance;

/// Label of the phase-estimation block.
pub const PHASE_ESTIMATION_LABEL: &str = "qpe";

/// Apply `CP(2π · fraction · 2^k)` from sum qubit `k` onto `index`.
pub fn encode_phase(
    circuit: &mut Circuit,
    sums: &[QubitId],
    index: QubitId,
    fraction: f64,
) -> CoreResult<()> {
    for (k, &sum) in sums.iter().enumerate() {
        let angle = TAU * fraction * 2f64.powi(k as i32);
        circuit.cp(angle, sum, index)?;
    }
    Ok(())
}

/// The phase-estimation block over the sum and index registers.
///
/// Block qubit `i` corresponds to `layout.phase_register()[i]`: the sum
/// register first, then the index qubits with the target marker last.
pub fn phase_estimation(problem: &ProblemInstance, layout: &RegisterLayout) -> CoreResult<Circuit> {
    let m = layout.num_sum_qubits();
    let width = m + layout.indices().len() as u32;
    let mut block = Circuit::with_size(PHASE_ESTIMATION_LABEL, width, 0);

    for q in 0..width {
        block.h(QubitId(q))?;
    }

    let sums: Vec<QubitId> = (0..m).map(QubitId).collect();
    for (i, fraction) in problem.normalized_values().into_iter().enumerate() {
        encode_phase(&mut block, &sums, QubitId(m + i as u32), fraction)?;
    }
    let marker = QubitId(width - 1);
    encode_phase(&mut block, &sums, marker, -problem.normalized_target())?;

    block.append(&Circuit::iqft(m)?, &sums)?;

    debug!(
        width,
        ops = block.num_ops(),
        depth = block.depth(),
        "built phase-estimation block"
    );
    Ok(block)
}
