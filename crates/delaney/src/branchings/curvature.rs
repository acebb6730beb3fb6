//! Exact orbifold curvature of a (partially) labelled chamber system.

use num_rational::Rational64;

use crate::orbits::Orbit;

pub(crate) fn zero() -> Rational64 {
    Rational64::from_integer(0)
}

/// `-size/2 + sum(weight / v)` over all orbits, with `vs` in orbit order.
pub fn curvature(size: usize, orbits: &[Orbit], vs: &[usize]) -> Rational64 {
    orbits
        .iter()
        .zip(vs)
        .fold(Rational64::new(-(size as i64), 2), |acc, (orb, &v)| {
            acc + Rational64::new(orb.weight(), v as i64)
        })
}

/// Curvature after changing one orbit's value from `from` to `to`.
#[inline]
pub(crate) fn shifted(curv: Rational64, orb: &Orbit, from: usize, to: usize) -> Rational64 {
    curv - Rational64::new(orb.weight(), from as i64) + Rational64::new(orb.weight(), to as i64)
}

/// True iff lowering any single value above its orbit minimum by one makes the
/// curvature non-negative.
pub fn is_minimally_hyperbolic(orbits: &[Orbit], vs: &[usize], curv: Rational64) -> bool {
    orbits
        .iter()
        .zip(vs)
        .all(|(orb, &v)| v <= orb.min_branching() || shifted(curv, orb, v, v - 1) >= zero())
}
