//! Even-grade sub-algebra restriction and lane layout.
//!
//! The 16 blades of grade 0, 2 and 4 are closed under the geometric
//! product and carry a fixed lane numbering that the hardware unit
//! uses as its register/bus layout: scalar first, then the ten grade-2
//! blades, then the five grade-4 blades, each group ascending by mask.
//! This ordering is a published contract and must be identical across
//! runs and across mul/wedge/dot/norm emissions.

use std::collections::BTreeMap;

use crate::error::GaaluError;
use crate::space::{Blade, BladeSpace, BLADES};
use crate::table::Table;
use crate::Result;

/// Number of even-grade lanes.
pub const LANES: usize = 16;

/// The canonical even-lane enumeration.
#[derive(Debug, Clone)]
pub struct EvenLanes {
    order: Vec<Blade>,
    lane_of: [Option<usize>; BLADES],
}

impl EvenLanes {
    /// Enumerate the even blades in (grade, mask) order.
    pub fn new(space: &BladeSpace) -> Self {
        let mut order: Vec<Blade> =
            (0..BLADES).filter(|&b| space.grade(b) % 2 == 0).collect();
        order.sort_by_key(|&b| (space.grade(b), b));

        let mut lane_of = [None; BLADES];
        for (lane, &blade) in order.iter().enumerate() {
            lane_of[blade] = Some(lane);
        }
        Self { order, lane_of }
    }

    /// Blades in lane order (length 16, scalar at lane 0).
    pub fn order(&self) -> &[Blade] {
        &self.order
    }

    /// Lane index of a blade, or `None` for odd-grade blades.
    pub fn lane_of(&self, blade: Blade) -> Option<usize> {
        self.lane_of[blade]
    }

    /// Blade occupying a lane.
    pub fn blade_at(&self, lane: usize) -> Blade {
        self.order[lane]
    }
}

/// A product table restricted to the even sub-algebra, keyed by lane
/// index instead of raw blade mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneTable {
    cells: Vec<BTreeMap<(usize, usize), i32>>,
}

impl LaneTable {
    /// Contributions to one output lane, ascending by (A lane, B lane).
    pub fn cell(&self, lane: usize) -> &BTreeMap<(usize, usize), i32> {
        &self.cells[lane]
    }

    pub fn entry_count(&self) -> usize {
        self.cells.iter().map(|c| c.len()).sum()
    }
}

/// Project a table onto the even sub-algebra.
///
/// Entries with an odd-grade operand are dropped (they cannot occur in
/// an even-only datapath). An odd-grade *result* from two even-grade
/// operands would mean the even sub-algebra is not closed — that is an
/// algebra defect, never a filter, so it fails instead of dropping.
pub fn restrict_to_even(
    space: &BladeSpace,
    lanes: &EvenLanes,
    table: &Table,
) -> Result<LaneTable> {
    let mut cells = vec![BTreeMap::new(); LANES];

    for result in 0..BLADES {
        for (&(a, b), &coeff) in table.cell(result) {
            let (Some(la), Some(lb)) = (lanes.lane_of(a), lanes.lane_of(b)) else {
                continue;
            };
            let Some(lr) = lanes.lane_of(result) else {
                return Err(GaaluError::invariant(format!(
                    "even operands {} and {} produced odd-grade {} (coeff {})",
                    space.name(a),
                    space.name(b),
                    space.name(result),
                    coeff
                )));
            };
            let cell: &mut BTreeMap<(usize, usize), i32> = &mut cells[lr];
            let entry = cell.entry((la, lb)).or_insert(0);
            *entry += coeff;
            if *entry == 0 {
                cell.remove(&(la, lb));
            }
        }
    }

    Ok(LaneTable { cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{build_geometric_table, make_wedge_table};

    #[test]
    fn test_lane_order_contract() {
        let space = BladeSpace::new();
        let lanes = EvenLanes::new(&space);
        let names: Vec<String> =
            lanes.order().iter().map(|&b| space.name(b)).collect();
        assert_eq!(
            names,
            vec![
                "scalar", "e12", "e13", "e23", "e1o", "e2o", "e3o", "e1i", "e2i",
                "e3i", "eoi", "e123o", "e123i", "e12oi", "e13oi", "e23oi"
            ]
        );
        assert_eq!(lanes.lane_of(0), Some(0)); // scalar is lane 0
        assert_eq!(lanes.order().len(), LANES);
    }

    #[test]
    fn test_lane_of_rejects_odd() {
        let space = BladeSpace::new();
        let lanes = EvenLanes::new(&space);
        for blade in 0..BLADES {
            match lanes.lane_of(blade) {
                Some(lane) => {
                    assert_eq!(space.grade(blade) % 2, 0);
                    assert_eq!(lanes.blade_at(lane), blade);
                }
                None => assert_eq!(space.grade(blade) % 2, 1),
            }
        }
    }

    #[test]
    fn test_even_closure() {
        // Every nonzero geometric-product term of two even blades is
        // even-grade, so restriction succeeds without dropping any.
        let space = BladeSpace::new();
        let lanes = EvenLanes::new(&space);
        let table = build_geometric_table(&space);
        let even = restrict_to_even(&space, &lanes, &table).unwrap();

        let expected: usize = (0..BLADES)
            .map(|r| {
                table
                    .cell(r)
                    .keys()
                    .filter(|&&(a, b)| {
                        space.grade(a) % 2 == 0 && space.grade(b) % 2 == 0
                    })
                    .count()
            })
            .sum();
        assert_eq!(even.entry_count(), expected);
    }

    #[test]
    fn test_scalar_self_product_stays_at_lane_zero() {
        let space = BladeSpace::new();
        let lanes = EvenLanes::new(&space);
        let table = build_geometric_table(&space);
        let wedge = make_wedge_table(&space, &table);

        let even_gp = restrict_to_even(&space, &lanes, &table).unwrap();
        let even_wedge = restrict_to_even(&space, &lanes, &wedge).unwrap();
        assert_eq!(even_gp.cell(0).get(&(0, 0)), Some(&1));
        assert_eq!(even_wedge.cell(0).get(&(0, 0)), Some(&1));
    }

    #[test]
    fn test_restriction_drops_odd_operands() {
        let space = BladeSpace::new();
        let lanes = EvenLanes::new(&space);
        let table = build_geometric_table(&space);
        let even = restrict_to_even(&space, &lanes, &table).unwrap();
        // e1 * e1 = scalar exists in the full table but not the even one
        assert_eq!(table.coefficient(0, 1, 1), 1);
        for lane in 0..LANES {
            for (&(la, lb), _) in even.cell(lane) {
                assert_eq!(space.grade(lanes.blade_at(la)) % 2, 0);
                assert_eq!(space.grade(lanes.blade_at(lb)) % 2, 0);
            }
        }
    }
}
