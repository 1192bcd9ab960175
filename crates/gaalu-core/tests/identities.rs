//! End-to-end algebra identities over the full table pipeline.

use gaalu_core::even::{restrict_to_even, EvenLanes};
use gaalu_core::product::geometric_product;
use gaalu_core::space::{BladeSpace, BLADES};
use gaalu_core::table::{
    build_geometric_table, make_dot_table, make_wedge_table, sanity_check, DotKind,
};

#[test]
fn geometric_table_covers_every_pair() {
    let space = BladeSpace::new();
    let table = build_geometric_table(&space);

    for a in 0..BLADES {
        for b in 0..BLADES {
            let direct = geometric_product(&space, a, b);
            for (&result, &coeff) in direct.iter() {
                assert_eq!(table.coefficient(result, a, b), coeff);
            }
        }
    }
}

#[test]
fn geometric_product_is_associative_on_euclidean_blades() {
    // (a b) c == a (b c) summed over intermediate blades. Restricted
    // to the e1/e2/e3 sub-blades, which are closed under the product.
    let space = BladeSpace::new();
    let samples = 0..8usize;

    for a in samples.clone() {
        for b in samples.clone() {
            for c in samples.clone() {
                let mut left = gaalu_core::CoeffMap::new();
                for (&m, &k) in geometric_product(&space, a, b).iter() {
                    for (&r, &k2) in geometric_product(&space, m, c).iter() {
                        left.merge(r, k * k2);
                    }
                }
                let mut right = gaalu_core::CoeffMap::new();
                for (&m, &k) in geometric_product(&space, b, c).iter() {
                    for (&r, &k2) in geometric_product(&space, a, m).iter() {
                        right.merge(r, k * k2);
                    }
                }
                assert_eq!(left, right, "associativity failed at ({}, {}, {})", a, b, c);
            }
        }
    }
}

#[test]
fn wedge_plus_contractions_partition_vector_products() {
    // For two distinct generators, the geometric product is pure wedge;
    // for equal generators it is pure contraction.
    let space = BladeSpace::new();
    let table = build_geometric_table(&space);
    let wedge = make_wedge_table(&space, &table);
    let dot = make_dot_table(&space, &table, DotKind::Hestenes);

    for i in 0..5 {
        for j in 0..5 {
            let (a, b) = (1 << i, 1 << j);
            for result in 0..BLADES {
                let full = table.coefficient(result, a, b);
                let w = wedge.coefficient(result, a, b);
                let d = dot.coefficient(result, a, b);
                assert_eq!(full, w + d, "a={} b={} r={}", a, b, result);
            }
        }
    }
}

#[test]
fn even_restriction_of_derived_tables_succeeds() {
    let space = BladeSpace::new();
    let lanes = EvenLanes::new(&space);
    let table = build_geometric_table(&space);

    for derived in [
        make_wedge_table(&space, &table),
        make_dot_table(&space, &table, DotKind::Hestenes),
        make_dot_table(&space, &table, DotKind::LeftContraction),
        make_dot_table(&space, &table, DotKind::RightContraction),
    ] {
        restrict_to_even(&space, &lanes, &derived).unwrap();
    }
}

#[test]
fn sanity_check_guards_the_metric() {
    sanity_check(&BladeSpace::new()).unwrap();
}
