//! Automorphisms of a chamber system and the permutations they induce on orbits.
//!
//! An automorphism of a connected chamber system is fixed by the image of chamber 1, so
//! trying every candidate image with a breadth-first extension finds the whole group in
//! `size` passes of `O(size * dim)` each.

use std::collections::{BTreeSet, VecDeque};

use crate::dset::{validate, Chamber, DelaneySet};
use crate::error::DsError;
use crate::orbits::{Orbit, OrbitIndex};

/// Chamber permutation as a lookup table: `map[d]` is the image of `d`; `map[0]` is unused.
pub type ChamberMap = Vec<Chamber>;

/// Permutation of orbit positions: `perm[k]` is the orbit that orbit `k` maps onto.
pub type OrbitPermutation = Vec<usize>;

/// Extend `1 -> d0` to a full automorphism, or `None` on the first conflict.
/// Assumes `ds` passed `validate`.
pub(crate) fn extend_from<S: DelaneySet + ?Sized>(ds: &S, d0: Chamber) -> Option<ChamberMap> {
    let size = ds.size();
    if d0 == 0 || d0 > size {
        return None;
    }
    let mut map = vec![0; size + 1];
    let mut inverse = vec![0; size + 1];
    map[1] = d0;
    inverse[d0] = 1;
    let mut queue = VecDeque::from([(1, d0)]);
    let mut mapped = 1;

    while let Some((d, e)) = queue.pop_front() {
        for i in 0..=ds.dim() {
            match (ds.op(i, d), ds.op(i, e)) {
                (None, None) => {}
                (Some(di), Some(ei)) => {
                    if map[di] == 0 {
                        if inverse[ei] != 0 {
                            return None;
                        }
                        map[di] = ei;
                        inverse[ei] = di;
                        mapped += 1;
                        queue.push_back((di, ei));
                    } else if map[di] != ei {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }

    (mapped == size).then_some(map)
}

/// Every automorphism of `ds`, at most one per image of chamber 1, ordered by that image.
///
/// Only total maps are accepted, so a disconnected system yields none.
pub fn automorphisms<S: DelaneySet + ?Sized>(ds: &S) -> Result<Vec<ChamberMap>, DsError> {
    validate(ds)?;
    Ok(automorphisms_valid(ds))
}

pub(crate) fn automorphisms_valid<S: DelaneySet + ?Sized>(ds: &S) -> Vec<ChamberMap> {
    (1..=ds.size()).filter_map(|d0| extend_from(ds, d0)).collect()
}

/// Orbit permutation induced by a chamber automorphism.
///
/// Fails with `InconsistentOrbitMap` if the members of one orbit land in different orbits,
/// which cannot happen for a genuine automorphism.
pub fn induced_orbit_permutation(
    map: &[Chamber],
    orbits: &[Orbit],
    index: &OrbitIndex,
) -> Result<OrbitPermutation, DsError> {
    orbits
        .iter()
        .enumerate()
        .map(|(k, orb)| {
            let mut targets = orb
                .elements
                .iter()
                .map(|&d| map.get(d).and_then(|&e| index.orbit_of(orb.index, e)));
            let first = targets
                .next()
                .flatten()
                .ok_or(DsError::InconsistentOrbitMap { orbit: k })?;
            if targets.all(|t| t == Some(first)) {
                Ok(first)
            } else {
                Err(DsError::InconsistentOrbitMap { orbit: k })
            }
        })
        .collect()
}

/// Distinct orbit permutations induced by all automorphisms of `ds`.
pub fn orbit_automorphisms<S: DelaneySet + ?Sized>(
    ds: &S,
    orbits: &[Orbit],
) -> Result<Vec<OrbitPermutation>, DsError> {
    validate(ds)?;
    orbit_automorphisms_valid(ds, orbits)
}

pub(crate) fn orbit_automorphisms_valid<S: DelaneySet + ?Sized>(
    ds: &S,
    orbits: &[Orbit],
) -> Result<Vec<OrbitPermutation>, DsError> {
    let index = OrbitIndex::new(orbits, ds.dim(), ds.size());
    let mut perms = BTreeSet::new();
    for map in automorphisms_valid(ds) {
        perms.insert(induced_orbit_permutation(&map, orbits, &index)?);
    }
    Ok(perms.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dset::DSet;
    use crate::orbits::decompose;

    fn check_automorphism(ds: &DSet, map: &[Chamber]) {
        for i in 0..=ds.dim() {
            for d in 1..=ds.size() {
                assert_eq!(ds.op(i, map[d]), ds.op(i, d).map(|e| map[e]));
            }
        }
    }

    #[test]
    fn single_chamber_only_identity() {
        let ds = DSet::new(2, 1, vec![vec![1], vec![1], vec![1]]).unwrap();
        assert_eq!(automorphisms(&ds).unwrap(), vec![vec![0, 1]]);
    }

    #[test]
    fn reflection_pair_swaps_orbits() {
        let ds = DSet::new(2, 2, vec![vec![1, 2], vec![1, 2], vec![2, 1]]).unwrap();
        let maps = automorphisms(&ds).unwrap();
        assert_eq!(maps, vec![vec![0, 1, 2], vec![0, 2, 1]]);
        for m in &maps {
            check_automorphism(&ds, m);
        }
        let orbits = decompose(&ds).unwrap();
        let perms = orbit_automorphisms(&ds, &orbits).unwrap();
        assert_eq!(perms, vec![vec![0, 1, 2], vec![1, 0, 2]]);
    }

    #[test]
    fn rejects_candidate_on_conflict() {
        // chamber 1 is fixed by op0, chamber 2 is not: no automorphism moves 1 to 2
        let ds = DSet::new(1, 3, vec![vec![1, 3, 2], vec![2, 1, 3]]).unwrap();
        assert!(extend_from(&ds, 2).is_none());
        assert!(extend_from(&ds, 4).is_none());
        assert_eq!(automorphisms(&ds).unwrap().len(), 1);
    }

    #[test]
    fn undefined_must_match_undefined() {
        let ds = DSet::new(1, 2, vec![vec![2, 1], vec![0, 2]]).unwrap();
        assert!(extend_from(&ds, 2).is_none());
        assert_eq!(automorphisms(&ds).unwrap(), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn dihedral_symmetry_of_hexagon() {
        // rotations by two steps and the reflections through edge midpoints
        let ds = DSet::new(
            1,
            6,
            vec![vec![2, 1, 4, 3, 6, 5], vec![6, 3, 2, 5, 4, 1]],
        )
        .unwrap();
        let maps = automorphisms(&ds).unwrap();
        assert_eq!(maps.len(), 6);
        for m in &maps {
            check_automorphism(&ds, m);
        }
    }

    #[test]
    fn disconnected_system_has_no_total_maps() {
        let ds = DSet::new(1, 2, vec![vec![1, 2], vec![1, 2]]).unwrap();
        assert!(automorphisms(&ds).unwrap().is_empty());
    }

    #[test]
    fn induced_permutation_detects_split_orbit() {
        let ds = DSet::new(2, 2, vec![vec![1, 2], vec![1, 2], vec![2, 1]]).unwrap();
        let orbits = decompose(&ds).unwrap();
        let index = OrbitIndex::new(&orbits, 2, 2);
        // {1} and {2} are separate (0, 1) orbits, so a list that merges them must fail.
        let merged = vec![Orbit {
            index: 0,
            elements: vec![1, 2],
            is_chain: true,
        }];
        let err = induced_orbit_permutation(&[0, 1, 2], &merged, &index).unwrap_err();
        assert_eq!(err, DsError::InconsistentOrbitMap { orbit: 0 });
        assert!(induced_orbit_permutation(&[0, 2, 1], &orbits, &index).is_ok());
    }

    /// Every index function sends both chambers to 5.
    struct Escaping;

    impl DelaneySet for Escaping {
        fn size(&self) -> usize {
            2
        }

        fn dim(&self) -> usize {
            2
        }

        fn op(&self, _: usize, _: Chamber) -> Option<Chamber> {
            Some(5)
        }
    }

    #[test]
    fn out_of_range_images_are_errors() {
        let expected = DsError::OutOfRange {
            index: 0,
            chamber: 1,
            image: 5,
        };
        assert_eq!(automorphisms(&Escaping), Err(expected.clone()));
        let orbits = vec![Orbit {
            index: 0,
            elements: vec![1, 2],
            is_chain: false,
        }];
        assert_eq!(orbit_automorphisms(&Escaping, &orbits), Err(expected));
    }
}
