//! Amplitude amplification blocks.
//!
//! Both blocks span every qubit of the layout in [`RegisterLayout::all_qubits`]
//! order, so block qubit `i` is layout qubit `i`.

use qss_ir::{Circuit, QubitId};

use crate::error::CoreResult;
use crate::layout::RegisterLayout;

/// Label of the oracle block.
pub const ORACLE_LABEL: &str = "oracle";
/// Label of the diffuser block.
pub const DIFFUSER_LABEL: &str = "diffuser";

/// `floor(sqrt(2^n))` rounds for `n` values.
pub fn default_iterations(num_values: usize) -> usize {
    let exponent = i32::try_from(num_values).unwrap_or(i32::MAX);
    2f64.powi(exponent).sqrt().floor() as usize
}

/// Flip `flag` when every qubit in `controls` is `|0⟩`.
fn flip_on_zeros(circuit: &mut Circuit, controls: &[QubitId], flag: QubitId) -> CoreResult<()> {
    for &q in controls {
        circuit.x(q)?;
    }
    circuit.mcx(controls, flag)?;
    for &q in controls {
        circuit.x(q)?;
    }
    Ok(())
}

/// Phase-flip states whose sum register reads zero, then un-flip the
/// all-zeros state, which always reads zero.
pub fn oracle(layout: &RegisterLayout) -> CoreResult<Circuit> {
    let mut block = Circuit::with_size(ORACLE_LABEL, layout.num_qubits() as u32, 0);
    flip_on_zeros(&mut block, layout.sums(), layout.flag())?;
    flip_on_zeros(&mut block, &layout.phase_register(), layout.flag())?;
    Ok(block)
}

/// Reflect about the phase-estimated uniform state.
///
/// `qpe` must span [`RegisterLayout::phase_register`].
pub fn diffuser(qpe: &Circuit, layout: &RegisterLayout) -> CoreResult<Circuit> {
    let register = layout.phase_register();
    let mut block = Circuit::with_size(DIFFUSER_LABEL, layout.num_qubits() as u32, 0);

    block.append(&qpe.inverse()?, &register)?;
    flip_on_zeros(&mut block, &register, layout.flag())?;
    block.append(qpe, &register)?;
    Ok(block)
}
