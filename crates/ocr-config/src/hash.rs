//! Keccak-256 hashing
//!
//! The Ethereum variant of Keccak (original padding), which is not the same
//! function as standardized SHA3-256. Used for the secret hash, for deriving
//! per-recipient AES keys and for ABI function selectors.

use sha3::{Digest, Keccak256};

/// Keccak-256 digest (32 bytes)
pub type Keccak256Hash = [u8; 32];

/// Compute the Keccak-256 hash of the input data
#[inline]
pub fn keccak256(data: &[u8]) -> Keccak256Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
