//! Geometric product of basis blades.
//!
//! A blade is a formal wedge of its generators, so A·B is computed by
//! inserting A's generators into B one at a time, in descending
//! generator order, tracking anticommutation signs and metric
//! contractions exactly. The result is a sparse sum of blades with
//! signed integer coefficients; it is total over all 32×32 pairs.

use crate::coeffs::CoeffMap;
use crate::space::{Blade, BladeSpace, GENERATORS};

/// Number of set bits in `mask` below index `idx`.
fn popcount_below(mask: Blade, idx: usize) -> u32 {
    ((mask & ((1 << idx) - 1)) as u32).count_ones()
}

/// Multiply generator `v` into an existing blade `mask`.
///
/// Contractions are only taken against generator bits that were part
/// of the original B operand (`b_orig`); contracting against a
/// previously inserted A generator would double-count the metric.
fn mul_vec_into_mask(
    space: &BladeSpace,
    v: usize,
    mask: Blade,
    b_orig: Blade,
    out: &mut CoeffMap,
    scale: i32,
) {
    // Contract v against each original-B generator still present.
    // `t` counts the present generators that v must anticommute past
    // to reach position j (every present bit, B-origin or not).
    let mut t = 0u32;
    for j in 0..GENERATORS {
        if (mask >> j) & 1 == 0 {
            continue;
        }
        if (b_orig >> j) & 1 == 1 {
            let gij = space.metric(v, j);
            if gij != 0 {
                let sign = if t & 1 == 1 { -1 } else { 1 };
                out.merge(mask ^ (1 << j), scale * sign * gij);
            }
        }
        t += 1;
    }

    if (mask >> v) & 1 == 0 {
        // Exterior insertion: sign is the parity of the generators v
        // moves past to land in sorted position.
        let p = popcount_below(mask, v);
        let sign = if p & 1 == 1 { -1 } else { 1 };
        out.merge(mask ^ (1 << v), scale * sign);
    } else {
        // v already present: legal only when it came from the original
        // B operand (its contraction was handled above, or the metric
        // self-product is zero and the term vanishes). A repeated
        // A-generator cannot occur under the descending insertion
        // order.
        debug_assert!(
            (b_orig >> v) & 1 == 1,
            "generator {} re-inserted from A into mask {:#07b}",
            v,
            mask
        );
    }
}

/// Geometric product of two basis blades.
///
/// Returns the sparse result as blade → nonzero signed coefficient.
pub fn geometric_product(space: &BladeSpace, a: Blade, b: Blade) -> CoeffMap {
    // Scalar on either side multiplies by 1.
    if a == 0 {
        return CoeffMap::unit(b);
    }
    if b == 0 {
        return CoeffMap::unit(a);
    }

    let b_orig = b;
    let mut terms = CoeffMap::unit(b);

    // Fold A's generators in descending order; each step rewrites the
    // accumulator into a fresh map so aggregation stays auditable.
    for &v in space.positions(a).iter().rev() {
        let mut next = CoeffMap::new();
        for (&mask, &coeff) in terms.iter() {
            mul_vec_into_mask(space, v, mask, b_orig, &mut next, coeff);
        }
        terms = next;
    }

    terms
}
