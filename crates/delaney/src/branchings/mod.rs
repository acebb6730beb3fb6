//! Branching-number search over the orbits of a chamber system.
//!
//! Purpose
//! - Assign a branching number `v >= ceil(3 / rank)` to every orbit so that the
//!   resulting Delaney symbol is either non-hyperbolic with an admissible orbifold
//!   signature, or just barely hyperbolic.
//! - Emit exactly one representative per class of vectors related by an automorphism
//!   of the chamber system (the lexicographically largest one).
//!
//! Layout
//! - `curvature.rs`: exact curvature and the minimal-hyperbolicity test.
//! - `signature.rs`: orbifold signature keys and the admissible whitelist.
//! - `search.rs`: the search state machine driven by [`crate::backtrack::Traversal`].

mod curvature;
mod search;
mod signature;

pub use curvature::{curvature, is_minimally_hyperbolic};
pub use search::{
    enumerate_symbols, enumerate_symbols_with, Branching, BranchingSearch, DSymbol,
};
pub use signature::{is_admissible, orbifold_key, ADMISSIBLE_SIGNATURES};
