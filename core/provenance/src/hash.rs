//! Canonical hashing used to derive stable artefact identifiers.

use sha2::Digest;
use sha2::Sha256;

/// Renders `value` into a canonical string for hashing.
///
/// `serde_json::Map` is `BTreeMap`-backed without the `preserve_order`
/// feature, so ordinary `Display` already serialises every object, at every
/// nesting depth, with sorted keys.
pub fn canonical(value: &serde_json::Value) -> String {
    value.to_string()
}

/// The first 16 hex characters of the SHA-256 digest of `data`.
pub fn hash16(data: &str) -> String {
    let digest = Sha256::digest(data.as_bytes());
    digest.iter().take(8).map(|byte| format!("{byte:02x}")).collect()
}

/// Bit-pattern key for an `f64` so it can index a `HashMap` without relying
/// on `Eq`/`Hash` for floats; two values hash and compare equal iff their
/// underlying bits are identical (NaN is never produced by this crate).
pub fn value_key(value: f64) -> String {
    format!("{:016x}", value.to_bits())
}

#[cfg(test)]
#[path = "hash.test.rs"]
mod tests;
