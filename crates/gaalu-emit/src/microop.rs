//! Micro-op lowering.
//!
//! A table entry with coefficient c lowers to |c| repeated accumulate
//! micro-ops (add for c > 0, subtract for c < 0) targeting the entry's
//! result lane. Coefficients in this algebra are ±1 after grade
//! filtering, but lowering supports any small integer magnitude.
//!
//! Ordering is total and deterministic: output lanes in table order,
//! entries within a lane ascending by (operand A, operand B). Emitting
//! the same table twice yields the same sequence.

use gaalu_core::even::{LaneTable, LANES};
use gaalu_core::space::BLADES;
use gaalu_core::Table;

/// Accumulate direction of a multiply-accumulate step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccDir {
    Add,
    Sub,
}

impl AccDir {
    fn of(coeff: i32) -> Self {
        if coeff > 0 {
            AccDir::Add
        } else {
            AccDir::Sub
        }
    }
}

/// One signed multiply-accumulate step: `out ±= a * b`.
///
/// Lane references are indices into the table's own lane space: blade
/// masks (0..32) for a full table, even lane indices (0..16) for a
/// restricted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroOp {
    pub dir: AccDir,
    pub out: usize,
    pub a: usize,
    pub b: usize,
}

fn lower_cell(
    ops: &mut Vec<MicroOp>,
    out: usize,
    entries: impl Iterator<Item = ((usize, usize), i32)>,
) {
    for ((a, b), coeff) in entries {
        let dir = AccDir::of(coeff);
        for _ in 0..coeff.unsigned_abs() {
            ops.push(MicroOp { dir, out, a, b });
        }
    }
}

/// Lower a full 32-lane table. Lanes with no contributions produce no
/// ops — their output stays at the additive identity.
pub fn lower_table(table: &Table) -> Vec<MicroOp> {
    let mut ops = Vec::new();
    for result in 0..BLADES {
        lower_cell(
            &mut ops,
            result,
            table.cell(result).iter().map(|(&k, &c)| (k, c)),
        );
    }
    ops
}

/// Lower an even-restricted 16-lane table.
pub fn lower_lane_table(table: &LaneTable) -> Vec<MicroOp> {
    let mut ops = Vec::new();
    for lane in 0..LANES {
        lower_cell(
            &mut ops,
            lane,
            table.cell(lane).iter().map(|(&k, &c)| (k, c)),
        );
    }
    ops
}
