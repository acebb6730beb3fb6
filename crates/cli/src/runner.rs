//! Glue between JSON files and the enumeration core.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use delaney::sample::{DSetGenerator, RandomDSetGenerator, RandomDSetParams};
use delaney::{BranchingSearch, DSet, SearchCfg};
use serde::Serialize;

/// One enumerated symbol, flattened for export.
#[derive(Debug, Serialize)]
pub struct SymbolRecord {
    /// Position of the chamber system in the input.
    pub system: usize,
    pub set: DSet,
    pub vs: Vec<usize>,
    /// Exact curvature as `p/q`.
    pub curvature: String,
    pub signature: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub systems: usize,
    pub symbols: usize,
    pub spherical: usize,
    pub euclidean: usize,
    pub hyperbolic: usize,
}

pub fn read_sets(path: &Path) -> Result<Vec<DSet>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn sample_sets(params: RandomDSetParams, seed: u64, count: usize) -> Result<Vec<DSet>> {
    let mut gen = RandomDSetGenerator::new(params, seed)?;
    let mut sets = Vec::with_capacity(count);
    while sets.len() < count {
        match gen.generate_next()? {
            Some(sample) => sets.push(sample.dset),
            None => break,
        }
    }
    Ok(sets)
}

pub fn enumerate(sets: &[DSet], cfg: SearchCfg) -> Result<(Vec<SymbolRecord>, Summary)> {
    let mut records = Vec::new();
    let mut summary = Summary {
        systems: sets.len(),
        ..Summary::default()
    };
    for (k, ds) in sets.iter().enumerate() {
        let search = BranchingSearch::with_cfg(ds, cfg)
            .with_context(|| format!("chamber system #{k}"))?;
        for sym in search.symbols() {
            if sym.is_hyperbolic() {
                summary.hyperbolic += 1;
            } else if sym.is_euclidean() {
                summary.euclidean += 1;
            } else {
                summary.spherical += 1;
            }
            records.push(SymbolRecord {
                system: k,
                set: ds.clone(),
                vs: sym.vs().to_vec(),
                curvature: sym.curvature().to_string(),
                signature: sym.signature().map(str::to_owned),
            });
        }
    }
    summary.symbols = records.len();
    Ok((records, summary))
}

pub fn write_records(path: &Path, records: &[SymbolRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(records)?)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn enumerate_counts_by_geometry() {
        let ds = DSet::new(2, 1, vec![vec![1], vec![1], vec![1]]).unwrap();
        let (records, summary) = enumerate(&[ds], SearchCfg::default()).unwrap();
        assert_eq!(summary.systems, 1);
        assert_eq!(summary.symbols, 6);
        assert_eq!(summary.spherical, 1);
        assert_eq!(summary.euclidean, 1);
        assert_eq!(summary.hyperbolic, 4);
        assert_eq!(records[0].curvature, "1/6");
        assert_eq!(records[0].signature.as_deref(), Some("*33"));
        assert_eq!(records[2].curvature, "0");
    }

    #[test]
    fn json_roundtrip_through_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sets.json");
        fs::write(
            &input,
            r#"[{"dim":2,"size":2,"ops":[[1,2],[1,2],[2,1]]}]"#,
        )
        .unwrap();
        let sets = read_sets(&input).unwrap();
        let (records, _) = enumerate(&sets, SearchCfg::default()).unwrap();
        let out = dir.path().join("nested/out.json");
        write_records(&out, &records).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(out).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 7);
        assert_eq!(parsed[0]["vs"], serde_json::json!([3, 3, 2]));
        assert_eq!(parsed[0]["set"]["size"], 2);
    }

    #[test]
    fn malformed_input_is_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, r#"[{"dim":0,"size":3,"ops":[[2,3,1]]}]"#).unwrap();
        let err = read_sets(&input).unwrap_err();
        assert!(format!("{err:#}").contains("not an involution"));
    }

    #[test]
    fn sampling_is_reproducible() {
        let a = sample_sets(RandomDSetParams::default(), 11, 5).unwrap();
        let b = sample_sets(RandomDSetParams::default(), 11, 5).unwrap();
        assert_eq!(a.len(), 5);
        assert_eq!(a, b);
    }
}
