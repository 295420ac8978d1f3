//! Runtime id tables for blocks and items.
//!
//! The bundled tables are parsed once, on first use, and never change afterwards. Custom tables
//! (other protocol versions, tests) can be built with `from_json`.

use crate::error::{CodecError, Result};
use crate::logger::{log, LogSeverity};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

static BLOCK_RUNTIMES: Lazy<BlockRuntimes> = Lazy::new(|| {
    BlockRuntimes::from_json(include_str!("../data/block_mapping.json"))
        .expect("bundled block_mapping.json is malformed")
});

static ITEM_RUNTIMES: Lazy<ItemRuntimes> = Lazy::new(|| {
    ItemRuntimes::from_json(include_str!("../data/item_mapping.json"))
        .expect("bundled item_mapping.json is malformed")
});

/// The process-wide block table.
pub fn block_runtimes() -> &'static BlockRuntimes {
    &BLOCK_RUNTIMES
}

/// The process-wide item table.
pub fn item_runtimes() -> &'static ItemRuntimes {
    &ITEM_RUNTIMES
}

#[derive(Debug, Clone, Deserialize)]
struct BlockEntry {
    nid: String,
    meta: u16,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockMapping {
    to_namespaced: HashMap<i32, BlockEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemMapping {
    to_namespaced: HashMap<i32, String>,
}

/// Block runtime ids. One namespaced identifier fans out to one runtime id per meta variant.
#[derive(Debug)]
pub struct BlockRuntimes {
    to_namespaced: HashMap<i32, BlockEntry>,
    to_runtime: HashMap<String, Vec<i32>>,
}

impl BlockRuntimes {
    /// Parses `{"toNamespaced": {"<rid>": {"nid": "...", "meta": n}}}`. The meta variants of each
    /// identifier must be contiguous from 0.
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping: BlockMapping = serde_json::from_str(json)
            .map_err(|e| CodecError::invalid_data(format!("Bad block mapping: {}", e)))?;

        let mut variants: HashMap<String, Vec<Option<i32>>> = HashMap::new();
        let mut to_namespaced = HashMap::with_capacity(mapping.to_namespaced.len());
        for (rid, mut entry) in mapping.to_namespaced {
            entry.nid = entry.nid.to_lowercase();
            let slots = variants.entry(entry.nid.clone()).or_default();
            let meta = entry.meta as usize;
            if slots.len() <= meta {
                slots.resize(meta + 1, None);
            }
            if slots[meta].replace(rid).is_some() {
                return Err(CodecError::invalid_data(format!(
                    "Duplicate block variant {}:{}",
                    entry.nid, meta
                )));
            }
            to_namespaced.insert(rid, entry);
        }

        let mut to_runtime = HashMap::with_capacity(variants.len());
        for (nid, slots) in variants {
            let rids = slots
                .into_iter()
                .collect::<Option<Vec<i32>>>()
                .ok_or_else(|| {
                    CodecError::invalid_data(format!("Gap in meta variants of {}", nid))
                })?;
            to_runtime.insert(nid, rids);
        }

        Ok(Self {
            to_namespaced,
            to_runtime,
        })
    }

    pub fn get_nid(&self, rid: i32) -> Result<&str> {
        self.to_namespaced
            .get(&rid)
            .map(|entry| entry.nid.as_str())
            .ok_or(CodecError::UnknownRuntimeId(rid))
    }

    /// Meta variant a runtime id stands for.
    pub fn get_meta(&self, rid: i32) -> Result<u16> {
        self.to_namespaced
            .get(&rid)
            .map(|entry| entry.meta)
            .ok_or(CodecError::UnknownRuntimeId(rid))
    }

    /// Runtime ids of every meta variant of `nid`, indexed by meta. Empty if the block is unknown.
    pub fn get_rids(&self, nid: &str) -> &[i32] {
        self.to_runtime
            .get(&nid.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Runtime id of `nid` at `meta`. An unknown meta degrades to the meta 0 state; `None` only
    /// when the block itself is unknown.
    pub fn get_rid(&self, nid: &str, meta: i32) -> Option<i32> {
        let rids = self.get_rids(nid);
        let exact = usize::try_from(meta).ok().and_then(|meta| rids.get(meta));
        match exact {
            Some(rid) => Some(*rid),
            None if meta != 0 => {
                let fallback = rids.first().copied();
                if fallback.is_some() {
                    log(
                        format!("No runtime id for {}:{}, using meta 0", nid, meta),
                        LogSeverity::Debug,
                    );
                }
                fallback
            }
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.to_namespaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_namespaced.is_empty()
    }
}

/// Item runtime ids. A plain bijection, items have no meta dimension here.
#[derive(Debug)]
pub struct ItemRuntimes {
    to_namespaced: HashMap<i32, String>,
    to_runtime: HashMap<String, i32>,
}

impl ItemRuntimes {
    /// Parses `{"toNamespaced": {"<rid>": "<nid>"}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping: ItemMapping = serde_json::from_str(json)
            .map_err(|e| CodecError::invalid_data(format!("Bad item mapping: {}", e)))?;

        let mut to_runtime = HashMap::with_capacity(mapping.to_namespaced.len());
        for (rid, nid) in &mapping.to_namespaced {
            if to_runtime.insert(nid.clone(), *rid).is_some() {
                return Err(CodecError::invalid_data(format!(
                    "Item {} mapped to more than one runtime id",
                    nid
                )));
            }
        }

        Ok(Self {
            to_namespaced: mapping.to_namespaced,
            to_runtime,
        })
    }

    pub fn get_nid(&self, rid: i32) -> Result<&str> {
        self.to_namespaced
            .get(&rid)
            .map(String::as_str)
            .ok_or(CodecError::UnknownRuntimeId(rid))
    }

    pub fn get_rid(&self, nid: &str) -> Result<i32> {
        self.to_runtime
            .get(nid)
            .copied()
            .ok_or_else(|| CodecError::UnknownIdentifier(nid.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.to_namespaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_namespaced.is_empty()
    }
}
