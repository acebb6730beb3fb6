//! Chamber systems (Delaney sets): the read-only query trait and an owned implementation.
//!
//! Chambers are numbered `1..=size`. Index function `i` ranges over `0..=dim` and may be
//! undefined at a chamber; an undefined value behaves like a fixed point everywhere in
//! this crate (orbit tracing, loops, orientation).

use serde::{Deserialize, Serialize};

use crate::error::DsError;

/// Chamber identifier in `1..=size`.
pub type Chamber = usize;

/// Narrow query interface consumed by the decomposer, the automorphism finder and the search.
///
/// Implementors promise that every `op(i, ·)` is an involution on its defined values;
/// [`validate`] checks this.
pub trait DelaneySet {
    fn size(&self) -> usize;
    fn dim(&self) -> usize;
    /// Image of `d` under index function `i`; `None` where undefined.
    fn op(&self, i: usize, d: Chamber) -> Option<Chamber>;
}

/// Image of `d` under `op(i, ·)`, with undefined treated as fixed.
#[inline]
pub(crate) fn image<S: DelaneySet + ?Sized>(ds: &S, i: usize, d: Chamber) -> Chamber {
    ds.op(i, d).unwrap_or(d)
}

/// Check range and involution properties of every index function.
pub fn validate<S: DelaneySet + ?Sized>(ds: &S) -> Result<(), DsError> {
    let size = ds.size();
    if size == 0 {
        return Err(DsError::shape("chamber system has no chambers"));
    }
    for i in 0..=ds.dim() {
        for d in 1..=size {
            let Some(e) = ds.op(i, d) else { continue };
            if e == 0 || e > size {
                return Err(DsError::OutOfRange {
                    index: i,
                    chamber: d,
                    image: e,
                });
            }
            if ds.op(i, e) != Some(d) {
                return Err(DsError::NotAnInvolution {
                    index: i,
                    chamber: d,
                    image: e,
                });
            }
        }
    }
    Ok(())
}

/// True iff no index function fixes (or is undefined at) any chamber.
pub fn is_loopless<S: DelaneySet + ?Sized>(ds: &S) -> Result<bool, DsError> {
    validate(ds)?;
    Ok(loopless(ds))
}

/// True iff the chambers admit a two-colouring in which every index function that moves
/// a chamber swaps colours. Each connected component is coloured from its own seed.
pub fn is_weakly_oriented<S: DelaneySet + ?Sized>(ds: &S) -> Result<bool, DsError> {
    validate(ds)?;
    Ok(weakly_oriented(ds))
}

/// True iff every chamber is reachable from chamber 1.
pub fn is_connected<S: DelaneySet + ?Sized>(ds: &S) -> Result<bool, DsError> {
    validate(ds)?;
    Ok(connected(ds))
}

// The unchecked forms below index by chamber and assume `validate` passed.

pub(crate) fn loopless<S: DelaneySet + ?Sized>(ds: &S) -> bool {
    (0..=ds.dim()).all(|i| (1..=ds.size()).all(|d| image(ds, i, d) != d))
}

pub(crate) fn weakly_oriented<S: DelaneySet + ?Sized>(ds: &S) -> bool {
    let size = ds.size();
    let mut colour: Vec<Option<bool>> = vec![None; size + 1];
    for seed in 1..=size {
        if colour[seed].is_some() {
            continue;
        }
        colour[seed] = Some(true);
        let mut queue = vec![seed];
        while let Some(d) = queue.pop() {
            let cd = colour[d];
            for i in 0..=ds.dim() {
                let e = image(ds, i, d);
                if e == d {
                    continue;
                }
                match colour[e] {
                    None => {
                        colour[e] = cd.map(|c| !c);
                        queue.push(e);
                    }
                    Some(ce) if Some(ce) == cd => return false,
                    Some(_) => {}
                }
            }
        }
    }
    true
}

pub(crate) fn connected<S: DelaneySet + ?Sized>(ds: &S) -> bool {
    let size = ds.size();
    let mut seen = vec![false; size + 1];
    seen[1] = true;
    let mut queue = vec![1];
    let mut count = 1;
    while let Some(d) = queue.pop() {
        for i in 0..=ds.dim() {
            let e = image(ds, i, d);
            if !seen[e] {
                seen[e] = true;
                count += 1;
                queue.push(e);
            }
        }
    }
    count == size
}

/// Owned chamber system. `ops[i][d - 1]` is the image of chamber `d` under index
/// function `i`, with `0` for undefined.
///
/// Always valid: both [`DSet::new`] and deserialization run [`validate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DSetRepr", into = "DSetRepr")]
pub struct DSet {
    dim: usize,
    size: usize,
    ops: Vec<Vec<usize>>,
}

#[derive(Serialize, Deserialize)]
struct DSetRepr {
    dim: usize,
    size: usize,
    ops: Vec<Vec<usize>>,
}

impl DSet {
    pub fn new(dim: usize, size: usize, ops: Vec<Vec<usize>>) -> Result<Self, DsError> {
        if ops.len() != dim + 1 {
            return Err(DsError::shape(format!(
                "expected {} index functions, got {}",
                dim + 1,
                ops.len()
            )));
        }
        if let Some((i, row)) = ops.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(DsError::shape(format!(
                "index function {i} has {} entries, expected {size}",
                row.len()
            )));
        }
        let ds = Self { dim, size, ops };
        validate(&ds)?;
        Ok(ds)
    }

    /// Build from a closure `(i, d) -> image` (0 for undefined).
    pub fn from_fn(
        dim: usize,
        size: usize,
        f: impl Fn(usize, Chamber) -> usize,
    ) -> Result<Self, DsError> {
        let ops = (0..=dim)
            .map(|i| (1..=size).map(|d| f(i, d)).collect())
            .collect();
        Self::new(dim, size, ops)
    }

    /// Copy any implementor into an owned set.
    pub fn from_set<S: DelaneySet + ?Sized>(ds: &S) -> Result<Self, DsError> {
        Self::from_fn(ds.dim(), ds.size(), |i, d| ds.op(i, d).unwrap_or(0))
    }
}

impl DelaneySet for DSet {
    fn size(&self) -> usize {
        self.size
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn op(&self, i: usize, d: Chamber) -> Option<Chamber> {
        let e = *self.ops.get(i)?.get(d.checked_sub(1)?)?;
        (e != 0).then_some(e)
    }
}

impl TryFrom<DSetRepr> for DSet {
    type Error = DsError;

    fn try_from(raw: DSetRepr) -> Result<Self, Self::Error> {
        Self::new(raw.dim, raw.size, raw.ops)
    }
}

impl From<DSet> for DSetRepr {
    fn from(ds: DSet) -> Self {
        Self {
            dim: ds.dim,
            size: ds.size,
            ops: ds.ops,
        }
    }
}
