//! Run fingerprints
//!
//! `module_hash` covers one generated file; `catalog_hash` covers the ordered
//! definitions behind the index. Equal inputs give equal fingerprints.

use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::definition::EffectDefinition;

/// Lower-case hex SHA-256 of raw bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    to_hex(&Sha256::digest(data))
}

/// Fingerprint of a rendered effect module.
pub fn module_hash(module_text: &str) -> String {
    sha256_hex(module_text.as_bytes())
}

/// JSON with object keys sorted at every depth, no whitespace.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(value)?;
    sort_keys(&mut value);
    serde_json::to_string(&value)
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, mut child) in entries {
                sort_keys(&mut child);
                map.insert(key, child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}

/// Fingerprint of the catalog in index order.
///
/// Each definition is fed as `position:canonical-json\n`, so reordering
/// effects changes the hash even when the set is the same.
pub fn catalog_hash(definitions: &[EffectDefinition]) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    for (position, def) in definitions.iter().enumerate() {
        hasher.update(format!("{}:", position).as_bytes());
        hasher.update(canonical_json(def)?.as_bytes());
        hasher.update(b"\n");
    }
    Ok(to_hex(&hasher.finalize()))
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}
