//! Property tests over random connected 2D Delaney sets.

use delaney::prelude::*;
use delaney::sample::RandomDSetParams;
use proptest::prelude::*;

fn random_dset(seed: u64) -> DSet {
    let params = RandomDSetParams {
        size_min: 1,
        size_max: 5,
        ..RandomDSetParams::default()
    };
    RandomDSetGenerator::generate_single(&params, seed).expect("generator params are valid")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn orbits_partition_chambers(seed in any::<u64>()) {
        let ds = random_dset(seed);
        let orbits = decompose(&ds).unwrap();
        for i in 0..ds.dim() {
            let mut hits = vec![0usize; ds.size() + 1];
            for orb in orbits.iter().filter(|o| o.index == i) {
                for &d in &orb.elements {
                    hits[d] += 1;
                }
            }
            prop_assert!(hits[1..].iter().all(|&h| h == 1), "pair {} hits {:?}", i, hits);
        }
    }

    #[test]
    fn automorphisms_commute_with_index_functions(seed in any::<u64>()) {
        let ds = random_dset(seed);
        let maps = automorphisms(&ds).unwrap();
        prop_assert!(!maps.is_empty());
        prop_assert_eq!(maps[0].clone(), (0..=ds.size()).collect::<Vec<_>>());
        for m in &maps {
            for i in 0..=ds.dim() {
                for d in 1..=ds.size() {
                    prop_assert_eq!(ds.op(i, m[d]), ds.op(i, d).map(|e| m[e]));
                }
            }
        }
    }

    #[test]
    fn accepted_vectors_are_orbit_maxima(seed in any::<u64>()) {
        let ds = random_dset(seed);
        let search = BranchingSearch::new(&ds).unwrap();
        for sym in search.symbols() {
            let vs = sym.vs();
            for perm in search.orbit_automorphisms() {
                let image: Vec<usize> = perm.iter().map(|&k| vs[k]).collect();
                prop_assert!(image.as_slice() <= vs);
                prop_assert!(search.is_canonical(vs));
            }
        }
    }

    #[test]
    fn symbols_are_admissible_or_minimally_hyperbolic(seed in any::<u64>()) {
        let ds = random_dset(seed);
        let cfg = SearchCfg::default();
        for sym in enumerate_symbols(&ds).unwrap() {
            let orbits = sym.orbits();
            let vs = sym.vs();
            prop_assert_eq!(sym.curvature(), curvature(ds.size(), orbits, vs));
            for (orb, &v) in orbits.iter().zip(vs) {
                prop_assert!(v >= orb.min_branching() && v <= cfg.max_branching);
            }
            if sym.is_hyperbolic() {
                prop_assert!(sym.signature().is_none());
                prop_assert!(is_minimally_hyperbolic(orbits, vs, sym.curvature()));
            } else {
                let key = sym.signature().expect("non-hyperbolic symbols carry a key");
                prop_assert!(is_admissible(key));
            }
        }
    }

    #[test]
    fn symbols_are_distinct(seed in any::<u64>()) {
        let ds = random_dset(seed);
        let mut all: Vec<Vec<usize>> = enumerate_symbols(&ds)
            .unwrap()
            .iter()
            .map(|s| s.vs().to_vec())
            .collect();
        let n = all.len();
        all.sort();
        all.dedup();
        prop_assert_eq!(all.len(), n);
    }

    #[test]
    fn curvature_non_increasing_in_each_value(
        seed in any::<u64>(),
        raw in proptest::collection::vec(1usize..8, 16),
        pick in any::<prop::sample::Index>(),
    ) {
        let ds = random_dset(seed);
        let orbits = decompose(&ds).unwrap();
        let vs: Vec<usize> = raw.into_iter().take(orbits.len()).collect();
        prop_assume!(vs.len() == orbits.len() && !vs.is_empty());
        let k = pick.index(vs.len());
        let mut bumped = vs.clone();
        bumped[k] += 1;
        prop_assert!(curvature(ds.size(), &orbits, &bumped) <= curvature(ds.size(), &orbits, &vs));
    }

    #[test]
    fn symbol_orbits_match_redecomposition(seed in any::<u64>()) {
        let ds = random_dset(seed);
        for sym in enumerate_symbols(&ds).unwrap().into_iter().take(5) {
            let again = decompose(sym.set()).unwrap();
            prop_assert_eq!(again.len(), sym.orbits().len());
            for (a, b) in again.iter().zip(sym.orbits()) {
                prop_assert_eq!(a.is_chain, b.is_chain);
                prop_assert_eq!(a.rank(), b.rank());
            }
        }
    }
}

#[test]
fn single_chamber_curvature_by_hand() {
    let ds = DSet::new(2, 1, vec![vec![1], vec![1], vec![1]]).unwrap();
    let orbits = decompose(&ds).unwrap();
    assert_eq!(orbits.len(), 2);
    assert!(orbits.iter().all(|o| o.is_chain && o.rank() == 1));
    // -1/2 + 1/3 + 1/3 = 1/6
    assert_eq!(curvature(1, &orbits, &[3, 3]), Rational64::new(1, 6));
}

#[test]
fn dset_json_feeds_search() {
    let ds: DSet = serde_json::from_str(r#"{"dim":2,"size":2,"ops":[[1,2],[1,2],[2,1]]}"#).unwrap();
    let keys: Vec<String> = enumerate_symbols(&ds)
        .unwrap()
        .iter()
        .filter_map(|s| s.signature().map(str::to_owned))
        .collect();
    assert_eq!(keys, vec!["*332", "*432", "*532"]);
}
