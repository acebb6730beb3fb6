//! Search state machine and result type.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use num_rational::Rational64;

use super::curvature::{curvature, is_minimally_hyperbolic, shifted, zero};
use super::signature::{is_admissible, orbifold_key};
use crate::backtrack::{Backtrack, Traversal};
use crate::cfg::SearchCfg;
use crate::dset::{connected, loopless, validate, weakly_oriented, Chamber, DelaneySet};
use crate::error::DsError;
use crate::morphisms::{orbit_automorphisms_valid, OrbitPermutation};
use crate::orbits::{decompose_valid, Orbit};

/// Search node: `vs[..next]` is fixed, the rest still holds orbit minima.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branching {
    pub vs: Vec<usize>,
    /// Curvature of `vs` as it stands, unfixed entries included.
    pub curvature: Rational64,
    pub next: usize,
}

/// A chamber system together with a complete branching-number vector.
pub struct DSymbol<'a, S: DelaneySet + ?Sized> {
    set: &'a S,
    orbits: Rc<[Orbit]>,
    vs: Vec<usize>,
    curvature: Rational64,
    signature: Option<String>,
}

impl<'a, S: DelaneySet + ?Sized> DSymbol<'a, S> {
    pub fn set(&self) -> &'a S {
        self.set
    }

    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// Branching numbers in orbit order.
    pub fn vs(&self) -> &[usize] {
        &self.vs
    }

    pub fn curvature(&self) -> Rational64 {
        self.curvature
    }

    /// Orbifold signature key; `None` for hyperbolic symbols.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn is_spherical(&self) -> bool {
        self.curvature > zero()
    }

    pub fn is_euclidean(&self) -> bool {
        self.curvature == zero()
    }

    pub fn is_hyperbolic(&self) -> bool {
        self.curvature < zero()
    }

    fn orbit_position(&self, i: usize, d: Chamber) -> Option<usize> {
        self.orbits
            .iter()
            .position(|orb| orb.index == i && orb.contains(d))
    }

    /// Branching number of the `(i, i + 1)` orbit through `d`.
    pub fn v(&self, i: usize, d: Chamber) -> Option<usize> {
        self.orbit_position(i, d).map(|k| self.vs[k])
    }

    /// Face or vertex degree `rank * v` of the `(i, i + 1)` orbit through `d`.
    pub fn m(&self, i: usize, d: Chamber) -> Option<usize> {
        self.orbit_position(i, d)
            .map(|k| self.vs[k] * self.orbits[k].rank())
    }
}

impl<S: DelaneySet + ?Sized> Clone for DSymbol<'_, S> {
    fn clone(&self) -> Self {
        Self {
            set: self.set,
            orbits: Rc::clone(&self.orbits),
            vs: self.vs.clone(),
            curvature: self.curvature,
            signature: self.signature.clone(),
        }
    }
}

impl<S: DelaneySet + ?Sized> fmt::Debug for DSymbol<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DSymbol")
            .field("size", &self.set.size())
            .field("dim", &self.set.dim())
            .field("vs", &self.vs)
            .field("curvature", &self.curvature)
            .field("signature", &self.signature)
            .finish()
    }
}

/// Branching-number search for one chamber system.
///
/// Orbits, orbit automorphisms and the loop/orientation flags are computed once in the
/// constructor; [`BranchingSearch::symbols`] then walks the search tree lazily.
pub struct BranchingSearch<'a, S: DelaneySet + ?Sized> {
    ds: &'a S,
    cfg: SearchCfg,
    orbits: Rc<[Orbit]>,
    orbit_perms: Vec<OrbitPermutation>,
    loopless: bool,
    weakly_oriented: bool,
}

impl<'a, S: DelaneySet + ?Sized> BranchingSearch<'a, S> {
    pub fn new(ds: &'a S) -> Result<Self, DsError> {
        Self::with_cfg(ds, SearchCfg::default())
    }

    pub fn with_cfg(ds: &'a S, cfg: SearchCfg) -> Result<Self, DsError> {
        validate(ds)?;
        if ds.dim() != 2 {
            tracing::warn!(
                dim = ds.dim(),
                max_branching = cfg.max_branching,
                "curvature and branching cap are calibrated for surfaces"
            );
        }
        if !connected(ds) {
            tracing::warn!(
                size = ds.size(),
                "disconnected chamber system; isomorph rejection is disabled"
            );
        }
        let orbits = decompose_valid(ds);
        let orbit_perms = orbit_automorphisms_valid(ds, &orbits)?;
        tracing::debug!(
            size = ds.size(),
            orbits = orbits.len(),
            automorphisms = orbit_perms.len(),
            "branching search ready"
        );
        Ok(Self {
            ds,
            cfg,
            orbits: orbits.into(),
            orbit_perms,
            loopless: loopless(ds),
            weakly_oriented: weakly_oriented(ds),
        })
    }

    pub fn cfg(&self) -> SearchCfg {
        self.cfg
    }

    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// Distinct orbit permutations induced by the chamber automorphisms.
    pub fn orbit_automorphisms(&self) -> &[OrbitPermutation] {
        &self.orbit_perms
    }

    /// Fresh lazy sequence of symbols; each call restarts from the root.
    pub fn symbols(&self) -> Traversal<'_, Self> {
        Traversal::new(self)
    }

    /// True iff no orbit automorphism maps `vs` to a lexicographically larger vector.
    pub fn is_canonical(&self, vs: &[usize]) -> bool {
        self.orbit_perms.iter().all(|perm| {
            perm.iter().map(|&k| vs[k]).cmp(vs.iter().copied()) != Ordering::Greater
        })
    }

    /// Signature key if `curvature >= 0` and the key is admissible, `Ok(None)` if
    /// hyperbolic, `Err(key)` for an inadmissible key.
    fn signature_for(&self, vs: &[usize], curvature: Rational64) -> Result<Option<String>, String> {
        if curvature < zero() {
            return Ok(None);
        }
        let key = orbifold_key(&self.orbits, vs, self.loopless, self.weakly_oriented);
        if is_admissible(&key) {
            Ok(Some(key))
        } else {
            Err(key)
        }
    }
}

impl<'a, S: DelaneySet + ?Sized> Backtrack for BranchingSearch<'a, S> {
    type State = Branching;
    type Output = DSymbol<'a, S>;

    fn root(&self) -> Branching {
        let vs: Vec<usize> = self.orbits.iter().map(Orbit::min_branching).collect();
        Branching {
            curvature: curvature(self.ds.size(), &self.orbits, &vs),
            vs,
            next: 0,
        }
    }

    fn children(&self, state: &Branching) -> Vec<Branching> {
        let n = self.orbits.len();
        if state.next >= n {
            return Vec::new();
        }
        if state.curvature < zero() {
            // Already hyperbolic: larger values only push further down.
            return vec![Branching {
                vs: state.vs.clone(),
                curvature: state.curvature,
                next: n,
            }];
        }

        let orb = &self.orbits[state.next];
        let current = state.vs[state.next];
        let mut out = Vec::new();
        for v in orb.min_branching()..=self.cfg.max_branching {
            let curv = shifted(state.curvature, orb, current, v);
            let mut vs = state.vs.clone();
            vs[state.next] = v;
            let hyperbolic = curv < zero();
            if !hyperbolic || is_minimally_hyperbolic(&self.orbits, &vs, curv) {
                out.push(Branching {
                    vs,
                    curvature: curv,
                    next: state.next + 1,
                });
            }
            if hyperbolic {
                break;
            }
        }
        out
    }

    fn extract(&self, state: &Branching) -> Option<DSymbol<'a, S>> {
        if state.next < self.orbits.len() {
            return None;
        }
        let signature = self.signature_for(&state.vs, state.curvature).ok()?;
        if !self.is_canonical(&state.vs) {
            return None;
        }
        Some(DSymbol {
            set: self.ds,
            orbits: Rc::clone(&self.orbits),
            vs: state.vs.clone(),
            curvature: state.curvature,
            signature,
        })
    }
}

/// Convenience: all symbols for `ds` with the default configuration.
pub fn enumerate_symbols<S: DelaneySet + ?Sized>(ds: &S) -> Result<Vec<DSymbol<'_, S>>, DsError> {
    enumerate_symbols_with(ds, SearchCfg::default())
}

pub fn enumerate_symbols_with<S: DelaneySet + ?Sized>(
    ds: &S,
    cfg: SearchCfg,
) -> Result<Vec<DSymbol<'_, S>>, DsError> {
    let search = BranchingSearch::with_cfg(ds, cfg)?;
    let symbols = search.symbols().collect();
    Ok(symbols)
}
