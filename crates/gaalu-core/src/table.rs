//! Product table construction and grade-filtered derivations.
//!
//! The full geometric table is built once by multiplying every ordered
//! blade pair; the wedge and dot tables are grade filters over it. A
//! table is immutable after construction — derivations always produce
//! a new value.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::error::GaaluError;
use crate::product::geometric_product;
use crate::space::{Blade, BladeSpace, BLADES};
use crate::Result;

/// Contributions to one result blade: (operand A, operand B) → nonzero
/// signed coefficient.
pub type CellMap = BTreeMap<(Blade, Blade), i32>;

/// Dot (inner) product convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotKind {
    /// grade(result) = |grade(A) − grade(B)|
    Hestenes,
    /// grade(A) ≤ grade(B), grade(result) = grade(B) − grade(A)
    LeftContraction,
    /// grade(B) ≤ grade(A), grade(result) = grade(A) − grade(B)
    RightContraction,
}

impl DotKind {
    /// Parse a user-facing kind name. Unknown names are a
    /// configuration error, reported before any table work.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "hestenes" => Ok(DotKind::Hestenes),
            "lcont" => Ok(DotKind::LeftContraction),
            "rcont" => Ok(DotKind::RightContraction),
            other => Err(GaaluError::config("dot kind", other)),
        }
    }
}

/// A blade×blade product table: result blade → contributing operand
/// pairs with exact integer coefficients. Never stores zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    cells: Vec<CellMap>,
}

impl Table {
    fn empty() -> Self {
        Self { cells: vec![CellMap::new(); BLADES] }
    }

    /// Add `coeff` under (result, a, b), summing with any existing
    /// contribution and dropping the entry when the sum is zero.
    fn merge(&mut self, result: Blade, a: Blade, b: Blade, coeff: i32) {
        if coeff == 0 {
            return;
        }
        let cell = &mut self.cells[result];
        let entry = cell.entry((a, b)).or_insert(0);
        *entry += coeff;
        if *entry == 0 {
            cell.remove(&(a, b));
        }
    }

    /// Contributions to one result blade, keyed by operand pair in
    /// ascending (A, B) order.
    pub fn cell(&self, result: Blade) -> &CellMap {
        &self.cells[result]
    }

    /// Coefficient of `result` in the product of blades `a` and `b`.
    pub fn coefficient(&self, result: Blade, a: Blade, b: Blade) -> i32 {
        self.cells[result].get(&(a, b)).copied().unwrap_or(0)
    }

    /// Total number of nonzero entries.
    pub fn entry_count(&self) -> usize {
        self.cells.iter().map(|c| c.len()).sum()
    }

    /// New table keeping only entries whose predicate holds.
    ///
    /// The predicate receives (operand A, operand B, result blade).
    pub fn filter(&self, keep: impl Fn(Blade, Blade, Blade) -> bool) -> Table {
        let mut out = Table::empty();
        for (result, cell) in self.cells.iter().enumerate() {
            for (&(a, b), &coeff) in cell {
                if keep(a, b, result) {
                    out.merge(result, a, b, coeff);
                }
            }
        }
        out
    }
}

/// Build the full 32×32 geometric product table.
///
/// Each operand pair is independent, so pairs are computed in parallel
/// and the partial results merged afterwards; merging is a commutative
/// sum, so completion order does not matter.
pub fn build_geometric_table(space: &BladeSpace) -> Table {
    let pair_terms: Vec<(Blade, Blade, crate::CoeffMap)> = (0..BLADES * BLADES)
        .into_par_iter()
        .map(|idx| {
            let a = idx / BLADES;
            let b = idx % BLADES;
            (a, b, geometric_product(space, a, b))
        })
        .collect();

    let mut table = Table::empty();
    for (a, b, terms) in pair_terms {
        for (&result, &coeff) in terms.iter() {
            table.merge(result, a, b, coeff);
        }
    }
    table
}

/// Sequential reference build, used to cross-check the parallel path.
pub fn build_geometric_table_seq(space: &BladeSpace) -> Table {
    let mut table = Table::empty();
    for a in 0..BLADES {
        for b in 0..BLADES {
            for (&result, &coeff) in geometric_product(space, a, b).iter() {
                table.merge(result, a, b, coeff);
            }
        }
    }
    table
}

/// Outer (wedge) product: the grade-additive part of the geometric
/// product.
pub fn make_wedge_table(space: &BladeSpace, table: &Table) -> Table {
    table.filter(|a, b, r| space.grade(r) == space.grade(a) + space.grade(b))
}

/// Dot (inner) product under the selected convention.
pub fn make_dot_table(space: &BladeSpace, table: &Table, kind: DotKind) -> Table {
    match kind {
        DotKind::Hestenes => table.filter(|a, b, r| {
            let (ga, gb) = (space.grade(a), space.grade(b));
            space.grade(r) == ga.abs_diff(gb)
        }),
        DotKind::LeftContraction => table.filter(|a, b, r| {
            let (ga, gb) = (space.grade(a), space.grade(b));
            ga <= gb && space.grade(r) == gb - ga
        }),
        DotKind::RightContraction => table.filter(|a, b, r| {
            let (ga, gb) = (space.grade(a), space.grade(b));
            gb <= ga && space.grade(r) == ga - gb
        }),
    }
}

/// Verify the known algebraic identities of the fixed metric.
///
/// Runs before any emission unless explicitly suppressed; a failure is
/// fatal and means the metric or the product algorithm is defective.
pub fn sanity_check(space: &BladeSpace) -> Result<()> {
    let scalar_of = |a: Blade, b: Blade| geometric_product(space, a, b).get(0);
    let expect = |detail: &str, got: i32, want: i32| -> Result<()> {
        if got != want {
            return Err(GaaluError::invariant(format!(
                "{}: got {}, want {}",
                detail, got, want
            )));
        }
        Ok(())
    };

    let (e1, e2, e3, eo, ei) = (1, 2, 4, 8, 16);
    for (name, g) in [("e1", e1), ("e2", e2), ("e3", e3)] {
        expect(&format!("{n}*{n} scalar part", n = name), scalar_of(g, g), 1)?;
    }
    expect("eo*ei scalar part", scalar_of(eo, ei), -1)?;
    expect("ei*eo scalar part", scalar_of(ei, eo), -1)?;
    expect("eo*eo scalar part", scalar_of(eo, eo), 0)?;
    expect("ei*ei scalar part", scalar_of(ei, ei), 0)?;
    expect("e12*e12 scalar part", scalar_of(e1 | e2, e1 | e2), -1)?;
    expect(
        "e123*e123 scalar part",
        scalar_of(e1 | e2 | e3, e1 | e2 | e3),
        -1,
    )?;
    Ok(())
}
