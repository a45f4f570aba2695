//! Canonical record signing
//!
//! A record's semantic fields are canonicalized by sorting field names
//! lexicographically and concatenating each name immediately followed by its
//! value, with no separator, then hashing the result. The digest is an
//! integrity check against corruption of stored records; it is not a keyed
//! MAC and offers no protection against a deliberate adversary who can also
//! rewrite the digest.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Produce the canonical hex digest over a field set.
///
/// The same logical field set always yields the same digest, regardless of
/// the order fields were inserted in.
pub fn sign(fields: &BTreeMap<String, String>) -> String {
    let mut canonical = String::new();
    for (name, value) in fields {
        canonical.push_str(name);
        canonical.push_str(value);
    }
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Recompute the digest and compare against an expected value in constant
/// time.
pub fn verify(fields: &BTreeMap<String, String>, expected: &str) -> bool {
    let actual = sign(fields);
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}
