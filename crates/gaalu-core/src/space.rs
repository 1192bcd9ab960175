//! The fixed algebra definition.
//!
//! Five basis generators in the null (conformal) convention:
//! `e1, e2, e3` are Euclidean (square to +1, mutually orthogonal) and
//! `eo, ei` form the null pair (square to 0, cross term −1).
//!
//! A basis blade is a subset of generators encoded as an ascending
//! bitmask over 5 bits, so the algebra has 32 blades and
//! grade(blade) = popcount(blade).

/// Number of basis generators.
pub const GENERATORS: usize = 5;

/// Number of basis blades (2^GENERATORS).
pub const BLADES: usize = 1 << GENERATORS;

/// A basis blade as a bitmask: bit i set means generator i is present.
pub type Blade = usize;

/// The empty blade (scalar).
pub const SCALAR: Blade = 0;

/// Per-generator name suffixes: blade `e1 ∧ eo` prints as "e1o".
const SUFFIX: [char; GENERATORS] = ['1', '2', '3', 'o', 'i'];

/// The fixed algebra: generator count, metric, blade encoding.
///
/// Constructed once and read-only afterwards; every component takes it
/// by reference instead of consulting global state.
#[derive(Debug, Clone)]
pub struct BladeSpace {
    /// Symmetric 5×5 metric. Diagonal entries are generator
    /// self-products, off-diagonal entries are cross terms (nonzero
    /// only for the eo/ei pair).
    metric: [[i32; GENERATORS]; GENERATORS],
}

impl BladeSpace {
    /// The null-basis conformal metric: diag(1,1,1,0,0) with
    /// metric(eo, ei) = metric(ei, eo) = −1.
    pub fn new() -> Self {
        let mut metric = [[0i32; GENERATORS]; GENERATORS];
        for i in 0..3 {
            metric[i][i] = 1;
        }
        metric[3][4] = -1;
        metric[4][3] = -1;
        Self { metric }
    }

    /// Metric entry g(i, j) for generators i and j.
    pub fn metric(&self, i: usize, j: usize) -> i32 {
        self.metric[i][j]
    }

    /// Grade of a blade: number of generators present.
    pub fn grade(&self, blade: Blade) -> usize {
        (blade as u32).count_ones() as usize
    }

    /// Generator indices present in a blade, ascending.
    pub fn positions(&self, blade: Blade) -> Vec<usize> {
        (0..GENERATORS).filter(|&i| (blade >> i) & 1 == 1).collect()
    }

    /// Name of a basis blade: "scalar", or "e" followed by the
    /// per-generator suffixes in ascending order (e.g. "e12", "e1o",
    /// "eoi", "e123o").
    pub fn name(&self, blade: Blade) -> String {
        if blade == SCALAR {
            return "scalar".to_string();
        }
        let mut s = String::from("e");
        for i in 0..GENERATORS {
            if (blade >> i) & 1 == 1 {
                s.push(SUFFIX[i]);
            }
        }
        s
    }

    /// Inverse of [`name`](Self::name). Returns `None` for a string
    /// that names no blade.
    pub fn blade_from_name(&self, name: &str) -> Option<Blade> {
        if name == "scalar" {
            return Some(SCALAR);
        }
        let rest = name.strip_prefix('e')?;
        let mut blade: Blade = 0;
        for ch in rest.chars() {
            let i = SUFFIX.iter().position(|&s| s == ch)?;
            if (blade >> i) & 1 == 1 {
                return None; // repeated generator
            }
            blade |= 1 << i;
        }
        Some(blade)
    }

    /// All blades of a given grade, ascending by mask.
    pub fn blades_of_grade(&self, grade: usize) -> Vec<Blade> {
        (0..BLADES).filter(|&b| self.grade(b) == grade).collect()
    }
}

impl Default for BladeSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert grade-1 coefficients from the non-null (4,1) canonical
/// basis (e1..e3, e4² = +1, e5² = −1) into the null basis used by the
/// core, via eo = (e5 − e4)/2 and ei = e4 + e5.
///
/// Input and output are coefficient arrays indexed by generator.
pub fn vector_to_null(canonical: [f64; GENERATORS]) -> [f64; GENERATORS] {
    let [c1, c2, c3, c4, c5] = canonical;
    [c1, c2, c3, c5 - c4, (c4 + c5) / 2.0]
}

/// Inverse of [`vector_to_null`]: null-basis grade-1 coefficients back
/// to the (4,1) canonical basis.
pub fn vector_from_null(null: [f64; GENERATORS]) -> [f64; GENERATORS] {
    let [c1, c2, c3, co, ci] = null;
    [c1, c2, c3, ci - co / 2.0, ci + co / 2.0]
}
