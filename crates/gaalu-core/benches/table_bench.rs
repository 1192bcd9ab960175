//! Benchmark: parallel vs sequential 32×32 geometric table build.

use std::time::Instant;

use gaalu_core::space::BladeSpace;
use gaalu_core::table::{build_geometric_table, build_geometric_table_seq};

fn bench<F: Fn() -> gaalu_core::Table>(f: F, iters: usize) -> f64 {
    let start = Instant::now();
    for _ in 0..iters {
        let _ = f();
    }
    start.elapsed().as_secs_f64() / iters as f64
}

fn main() {
    let space = BladeSpace::new();
    let iters = 200;

    let seq = bench(|| build_geometric_table_seq(&space), iters);
    let par = bench(|| build_geometric_table(&space), iters);

    println!("=== GAALU Table Build Benchmark ===");
    println!("{:<14} {:>12} {:>10}", "Variant", "Time (us)", "Speedup");
    println!("{}", "-".repeat(38));
    println!("{:<14} {:>12.1} {:>10}", "sequential", seq * 1e6, "1.00x");
    println!("{:<14} {:>12.1} {:>9.2}x", "rayon", par * 1e6, seq / par);

    let entries = build_geometric_table(&space).entry_count();
    println!("\nTable entries: {}", entries);
}
