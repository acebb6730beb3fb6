//! Orbifold signature keys for non-hyperbolic symbols.
//!
//! Key layout: cone orders (cycle orbits) descending, `*` if some chamber is fixed by
//! some index function, corner orders (chain orbits) descending, `x` if the system is
//! not weakly oriented. Orbits with `v == 1` contribute nothing.

use crate::orbits::Orbit;

/// Signatures a spherical or Euclidean symbol may carry.
pub const ADMISSIBLE_SIGNATURES: [&str; 31] = [
    "", "*", "x", "532", "432", "332", "422", "322", "222", "44", "33", "22", "*532", "*432",
    "*332", "3*2", "*422", "*322", "*222", "2*4", "2*3", "2*2", "*44", "*33", "*22", "4*",
    "3*", "2*", "4x", "3x", "2x",
];

fn descending(mut values: Vec<usize>) -> String {
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.iter().map(usize::to_string).collect()
}

pub fn orbifold_key(orbits: &[Orbit], vs: &[usize], loopless: bool, weakly_oriented: bool) -> String {
    let (corners, cones): (Vec<_>, Vec<_>) = orbits
        .iter()
        .zip(vs)
        .filter(|(_, &v)| v > 1)
        .partition(|(orb, _)| orb.is_chain);
    let corners = corners.into_iter().map(|(_, &v)| v).collect();
    let cones = cones.into_iter().map(|(_, &v)| v).collect();

    let mut key = descending(cones);
    if !loopless {
        key.push('*');
    }
    key.push_str(&descending(corners));
    if !weakly_oriented {
        key.push('x');
    }
    key
}

pub fn is_admissible(key: &str) -> bool {
    ADMISSIBLE_SIGNATURES.contains(&key)
}
