//! Enumerate the symbols of a few hand-written chamber systems and print a summary.
//!
//! Shows the read-only derived data (orbits, orbit automorphisms) alongside the
//! symbols themselves.

use delaney::prelude::*;

fn main() {
    let systems = [
        ("single chamber", DSet::new(2, 1, vec![vec![1], vec![1], vec![1]])),
        (
            "mirror pair",
            DSet::new(2, 2, vec![vec![1, 2], vec![1, 2], vec![2, 1]]),
        ),
        ("oriented pair", DSet::from_fn(2, 2, |_, d| 3 - d)),
    ];
    for (name, ds) in systems {
        let ds = ds.expect("hand-written systems are valid");
        let search = BranchingSearch::new(&ds).expect("valid input");
        println!(
            "{name}: orbits={} automorphisms={}",
            search.orbits().len(),
            search.orbit_automorphisms().len()
        );
        for sym in search.symbols() {
            println!(
                "  vs={:?} curvature={} signature={}",
                sym.vs(),
                sym.curvature(),
                sym.signature().unwrap_or("-")
            );
        }
    }
}
