//! Placement fingerprints for reproducibility checks.

use serde::{Serialize, Serializer};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// XXH3-128 digest of a placement; equal placements give equal fingerprints.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Fingerprint(u128);

impl Fingerprint {
    /// Starts a streaming fingerprint.
    pub fn builder() -> FingerprintBuilder {
        FingerprintBuilder(Xxh3::new())
    }

    /// Raw digest value.
    pub fn as_u128(self) -> u128 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Feeds fixed-width little-endian fields into an XXH3 state.
pub struct FingerprintBuilder(Xxh3);

impl FingerprintBuilder {
    /// Adds an unsigned id.
    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.0.update(&value.to_le_bytes());
        self
    }

    /// Adds a signed coordinate.
    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.0.update(&value.to_le_bytes());
        self
    }

    /// Adds a flag as a single byte.
    pub fn flag(&mut self, value: bool) -> &mut Self {
        self.0.update(&[value as u8]);
        self
    }

    /// Finishes the digest.
    pub fn finish(&self) -> Fingerprint {
        Fingerprint(self.0.digest128())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_at(x: i32, y: i32) -> Fingerprint {
        Fingerprint::builder().u32(0).i32(x).i32(y).flag(true).finish()
    }

    #[test]
    fn same_fields_same_digest() {
        assert_eq!(cell_at(4, 2), cell_at(4, 2));
    }

    #[test]
    fn moved_cell_changes_digest() {
        assert_ne!(cell_at(4, 2), cell_at(5, 2));
        assert_ne!(cell_at(4, 2), cell_at(2, 4));
    }

    #[test]
    fn matches_one_shot_hash() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&4i32.to_le_bytes());
        bytes.extend_from_slice(&2i32.to_le_bytes());
        bytes.push(1);
        assert_eq!(cell_at(4, 2).as_u128(), xxhash_rust::xxh3::xxh3_128(&bytes));
    }

    #[test]
    fn displays_as_fixed_width_hex() {
        let s = Fingerprint::builder().finish().to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn serializes_as_hex_string() {
        let fp = cell_at(1, 1);
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"{fp}\""));
    }
}
