//! Orbit decomposition under adjacent pairs of index functions.
//!
//! For each `i in 0..dim` the chambers split into orbits of the group generated by
//! `op(i, ·)` and `op(i + 1, ·)`. An orbit is a chain when one of the two functions fixes
//! one of its chambers, and a cycle otherwise. The concatenation over `i` is the orbit
//! list that the branching search labels.

use crate::cfg::MIN_DEGREE;
use crate::dset::{image, validate, Chamber, DelaneySet};
use crate::error::DsError;

/// One orbit of the pair `(index, index + 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Orbit {
    /// The `i` of the generating pair `(i, i + 1)`.
    pub index: usize,
    /// Chambers in traversal order.
    pub elements: Vec<Chamber>,
    pub is_chain: bool,
}

impl Orbit {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Smallest `r > 0` with `(op(i) op(i+1))^r` fixing the orbit's chambers.
    pub fn rank(&self) -> usize {
        if self.is_chain {
            self.len()
        } else {
            self.len().div_ceil(2)
        }
    }

    /// Smallest branching number keeping `rank * v >= 3`.
    pub fn min_branching(&self) -> usize {
        MIN_DEGREE.div_ceil(self.rank())
    }

    /// Contribution numerator in the curvature sum.
    pub fn weight(&self) -> i64 {
        if self.is_chain {
            1
        } else {
            2
        }
    }

    pub fn contains(&self, d: Chamber) -> bool {
        self.elements.contains(&d)
    }
}

/// Trace the orbit of `d` under `(i, i + 1)`, marking its chambers in `seen`.
fn trace<S: DelaneySet + ?Sized>(ds: &S, i: usize, d: Chamber, seen: &mut [bool]) -> Orbit {
    let mut elements = vec![d];
    seen[d] = true;
    let mut is_chain = false;
    let mut e = d;
    let mut side = 0;
    loop {
        let f = image(ds, i + side, e);
        if f == e {
            is_chain = true;
        } else if !seen[f] {
            seen[f] = true;
            elements.push(f);
        }
        e = f;
        side ^= 1;
        if e == d && side == 0 {
            break;
        }
    }
    Orbit {
        index: i,
        elements,
        is_chain,
    }
}

/// All orbits of all adjacent index pairs, ordered by pair index and then by the
/// smallest unvisited chamber.
///
/// The chamber system is validated first; tracing a non-involution would not terminate.
pub fn decompose<S: DelaneySet + ?Sized>(ds: &S) -> Result<Vec<Orbit>, DsError> {
    validate(ds)?;
    Ok(decompose_valid(ds))
}

pub(crate) fn decompose_valid<S: DelaneySet + ?Sized>(ds: &S) -> Vec<Orbit> {
    let size = ds.size();
    let mut orbits = Vec::new();
    for i in 0..ds.dim() {
        let mut seen = vec![false; size + 1];
        for d in 1..=size {
            if !seen[d] {
                orbits.push(trace(ds, i, d, &mut seen));
            }
        }
    }
    orbits
}

/// Chamber-to-orbit lookup for a decomposed orbit list.
#[derive(Clone, Debug)]
pub struct OrbitIndex {
    /// `table[i][d]` = position in the orbit list of the `(i, i+1)` orbit containing `d`.
    table: Vec<Vec<usize>>,
}

impl OrbitIndex {
    /// Entries outside `dim` pairs or `1..=size` chambers are ignored.
    pub fn new(orbits: &[Orbit], dim: usize, size: usize) -> Self {
        let mut table = vec![vec![usize::MAX; size + 1]; dim];
        for (k, orb) in orbits.iter().enumerate() {
            let Some(row) = table.get_mut(orb.index) else {
                continue;
            };
            for &d in &orb.elements {
                if let Some(slot) = row.get_mut(d) {
                    *slot = k;
                }
            }
        }
        Self { table }
    }

    pub fn orbit_of(&self, i: usize, d: Chamber) -> Option<usize> {
        self.table
            .get(i)
            .and_then(|row| row.get(d))
            .copied()
            .filter(|&k| k != usize::MAX)
    }
}
