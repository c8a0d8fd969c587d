use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compares a presented secret with the expected one in constant time.
///
/// Both sides are hashed first so the comparison does not leak the expected
/// secret's length.
pub fn secrets_match(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    presented.as_slice().ct_eq(expected.as_slice()).into()
}
