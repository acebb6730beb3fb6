//! Reproducible random two-dimensional Delaney sets.
//!
//! Purpose
//! - Feed benches, property tests and the CLI with connected chamber systems that
//!   satisfy the surface relation `(op0 op2)^2 = id`.
//! - Not an exhaustive enumerator; exhaustive generation of chamber systems lives
//!   outside this crate.
//!
//! Every sample carries its params and a seed replay token, so a stream can be
//! regenerated element by element.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::dset::{connected, DSet};
use crate::error::DsError;

/// One chamber system plus replay metadata.
#[derive(Clone, Debug)]
pub struct DSetSample<P, R> {
    pub dset: DSet,
    pub params: P,
    pub replay: R,
}

/// Common trait for reproducible chamber-system sources.
pub trait DSetGenerator {
    type Params: Clone;
    type Replay: Clone;

    fn params(&self) -> &Self::Params;

    fn generate_next(&mut self)
        -> Result<Option<DSetSample<Self::Params, Self::Replay>>, DsError>;

    fn regenerate(&self, replay: &Self::Replay) -> Result<DSet, DsError>;
}

/// Parameters for random connected 2D Delaney sets.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDSetParams {
    pub size_min: usize,
    pub size_max: usize,
    /// Chance that a chamber (or a pair of chambers, for `op2`) is left fixed.
    pub fixed_point_prob: f64,
    pub max_attempts: u32,
}

impl Default for RandomDSetParams {
    fn default() -> Self {
        Self {
            size_min: 1,
            size_max: 6,
            fixed_point_prob: 0.3,
            max_attempts: 64,
        }
    }
}

impl RandomDSetParams {
    fn validate(&self) -> Result<(), DsError> {
        if self.size_min == 0 {
            return Err(DsError::invalid("size_min must be >= 1"));
        }
        if self.size_min > self.size_max {
            return Err(DsError::invalid("size_min <= size_max required"));
        }
        if !(0.0..=1.0).contains(&self.fixed_point_prob) {
            return Err(DsError::invalid("fixed_point_prob must lie in [0, 1]"));
        }
        if self.max_attempts == 0 {
            return Err(DsError::invalid("max_attempts must be > 0"));
        }
        Ok(())
    }
}

/// Replay token storing the seed that regenerates a sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedReplay {
    pub seed: u64,
}

/// Random involution on `1..=size` as an image row (`row[d - 1]`).
fn random_involution(rng: &mut StdRng, size: usize, fixed_prob: f64) -> Vec<usize> {
    let mut row = vec![0; size];
    let mut pending: Vec<usize> = (1..=size).collect();
    pending.shuffle(rng);
    while let Some(a) = pending.pop() {
        let partner = if rng.gen_bool(fixed_prob) {
            None
        } else {
            pending.pop()
        };
        match partner {
            Some(b) => {
                row[a - 1] = b;
                row[b - 1] = a;
            }
            None => row[a - 1] = a,
        }
    }
    row
}

/// Random involution commuting with `s0` (given as an image row).
///
/// `s0`-orbits are permuted as blocks: fixed points among themselves, pairs among
/// pairs; a pair left in place is either fixed pointwise or swapped.
fn commuting_involution(rng: &mut StdRng, s0: &[usize], fixed_prob: f64) -> Vec<usize> {
    let size = s0.len();
    let mut row = vec![0; size];
    let mut singles = Vec::new();
    let mut pairs = Vec::new();
    for d in 1..=size {
        let e = s0[d - 1];
        if e == d {
            singles.push(d);
        } else if d < e {
            pairs.push([d, e]);
        }
    }
    singles.shuffle(rng);
    pairs.shuffle(rng);

    while let Some(a) = singles.pop() {
        let partner = if rng.gen_bool(fixed_prob) {
            None
        } else {
            singles.pop()
        };
        match partner {
            Some(b) => {
                row[a - 1] = b;
                row[b - 1] = a;
            }
            None => row[a - 1] = a,
        }
    }
    while let Some([a, b]) = pairs.pop() {
        let partner = if rng.gen_bool(fixed_prob) {
            None
        } else {
            pairs.pop()
        };
        match partner {
            Some([c, d]) => {
                let (c, d) = if rng.gen_bool(0.5) { (c, d) } else { (d, c) };
                row[a - 1] = c;
                row[c - 1] = a;
                row[b - 1] = d;
                row[d - 1] = b;
            }
            None if rng.gen_bool(0.5) => {
                row[a - 1] = b;
                row[b - 1] = a;
            }
            None => {
                row[a - 1] = a;
                row[b - 1] = b;
            }
        }
    }
    row
}

/// Generator of connected 2D Delaney sets with uniformly drawn sizes.
pub struct RandomDSetGenerator {
    params: RandomDSetParams,
    master_rng: StdRng,
}

impl RandomDSetGenerator {
    pub fn new(params: RandomDSetParams, seed: u64) -> Result<Self, DsError> {
        params.validate()?;
        Ok(Self {
            params,
            master_rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn generate_single(params: &RandomDSetParams, seed: u64) -> Result<DSet, DsError> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let p = params.fixed_point_prob;
        for _ in 0..params.max_attempts {
            let size = rng.gen_range(params.size_min..=params.size_max);
            let s0 = random_involution(&mut rng, size, p);
            let s1 = random_involution(&mut rng, size, p);
            let s2 = commuting_involution(&mut rng, &s0, p);
            let ds = DSet::new(2, size, vec![s0, s1, s2])?;
            if connected(&ds) {
                return Ok(ds);
            }
        }
        Err(DsError::degenerate(format!(
            "no connected chamber system after {} attempts",
            params.max_attempts
        )))
    }
}

impl DSetGenerator for RandomDSetGenerator {
    type Params = RandomDSetParams;
    type Replay = SeedReplay;

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn generate_next(
        &mut self,
    ) -> Result<Option<DSetSample<Self::Params, Self::Replay>>, DsError> {
        let sample_seed = self.master_rng.next_u64();
        let dset = Self::generate_single(&self.params, sample_seed)?;
        Ok(Some(DSetSample {
            dset,
            params: self.params.clone(),
            replay: SeedReplay { seed: sample_seed },
        }))
    }

    fn regenerate(&self, replay: &Self::Replay) -> Result<DSet, DsError> {
        Self::generate_single(&self.params, replay.seed)
    }
}
