//! Enumeration of two-dimensional Delaney symbols.
//!
//! Given a chamber system (Delaney set), find every assignment of branching numbers to
//! its orbits that yields a spherical or Euclidean symbol with an admissible orbifold
//! signature, or a minimally hyperbolic one, up to automorphisms of the chamber system.
//!
//! Pipeline
//! - `orbits`: split chambers into orbits of adjacent index pairs, chains vs cycles.
//! - `morphisms`: find all automorphisms and the orbit permutations they induce.
//! - `branchings`: search branching-number vectors with exact curvature pruning and
//!   canonical-form isomorph rejection, driven by the lazy engine in `backtrack`.
//!
//! The chamber system is only read through [`DelaneySet`]; [`DSet`] is the owned
//! implementation used by the CLI and the tests.

pub mod backtrack;
pub mod branchings;
pub mod cfg;
pub mod dset;
pub mod error;
pub mod morphisms;
pub mod orbits;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use backtrack::{Backtrack, Traversal};
pub use branchings::{enumerate_symbols, enumerate_symbols_with, BranchingSearch, DSymbol};
pub use cfg::SearchCfg;
pub use dset::{DSet, DelaneySet};
pub use error::DsError;
pub use num_rational::Rational64;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::backtrack::{Backtrack, Traversal};
    pub use crate::branchings::{
        curvature, enumerate_symbols, enumerate_symbols_with, is_admissible,
        is_minimally_hyperbolic, orbifold_key, Branching, BranchingSearch, DSymbol,
    };
    pub use crate::cfg::SearchCfg;
    pub use crate::dset::{
        is_connected, is_loopless, is_weakly_oriented, validate, Chamber, DSet, DelaneySet,
    };
    pub use crate::error::DsError;
    pub use crate::morphisms::{automorphisms, orbit_automorphisms, OrbitPermutation};
    pub use crate::orbits::{decompose, Orbit, OrbitIndex};
    pub use crate::sample::{DSetGenerator, RandomDSetGenerator, RandomDSetParams};
    pub use num_rational::Rational64;
}
