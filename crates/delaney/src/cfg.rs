//! Search configuration and fixed constants.
//!
//! Policy
//! - `MIN_DEGREE` is part of the model (every face and vertex has degree at
//!   least three) and stays a constant.
//! - The branching cap is empirical. It suffices for the admissible orbifold
//!   whitelist on surfaces, which is why it is exposed in `SearchCfg`.

/// Smallest admissible product `rank * v` for any orbit.
pub(crate) const MIN_DEGREE: usize = 3;

/// Default upper bound for a single branching number.
pub const DEFAULT_MAX_BRANCHING: usize = 7;

/// Branching-number search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchCfg {
    /// Largest value tried for any single orbit.
    /// Only validated empirically for `dim == 2`; revisit for higher dimensions.
    pub max_branching: usize,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            max_branching: DEFAULT_MAX_BRANCHING,
        }
    }
}
