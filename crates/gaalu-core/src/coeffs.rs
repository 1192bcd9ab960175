//! Sparse blade → coefficient maps.
//!
//! Coefficients stay exact signed integers while tables are built; a
//! zero coefficient is the same as absence, so the map never stores
//! explicit zeros. BTreeMap-backed so iteration order is the blade
//! mask order, which downstream emission relies on.

use std::collections::BTreeMap;

use crate::space::Blade;

/// Sparse sum of basis blades with exact integer coefficients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoeffMap {
    terms: BTreeMap<Blade, i32>,
}

impl CoeffMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single blade with coefficient 1.
    pub fn unit(blade: Blade) -> Self {
        let mut map = Self::new();
        map.merge(blade, 1);
        map
    }

    /// Add `coeff` to the entry for `blade`, dropping the entry if the
    /// sum reaches zero. This is the only mutation path, so the
    /// no-explicit-zeros invariant holds by construction.
    pub fn merge(&mut self, blade: Blade, coeff: i32) {
        if coeff == 0 {
            return;
        }
        let entry = self.terms.entry(blade).or_insert(0);
        *entry += coeff;
        if *entry == 0 {
            self.terms.remove(&blade);
        }
    }

    /// Merge every term of `other` into `self`. Commutative with
    /// respect to merge order, so parallel partial results can be
    /// combined in any order.
    pub fn merge_all(&mut self, other: &CoeffMap) {
        for (&blade, &coeff) in other.iter() {
            self.merge(blade, coeff);
        }
    }

    pub fn get(&self, blade: Blade) -> i32 {
        self.terms.get(&blade).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Blade, &i32)> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<(Blade, i32)> for CoeffMap {
    fn from_iter<I: IntoIterator<Item = (Blade, i32)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (blade, coeff) in iter {
            map.merge(blade, coeff);
        }
        map
    }
}
