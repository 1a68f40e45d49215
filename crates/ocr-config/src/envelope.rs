//! Shared-secret envelope encryption
//!
//! Every oracle in the committee must recover the same 128-bit shared secret
//! using only its own X25519 private key. The sender picks a fresh ephemeral
//! scalar `e` and publishes `E = X25519(e, basepoint)`. For recipient key `K_i`:
//!
//! ```text
//! p_i   = X25519(e, K_i)                     // == X25519(k_i, E) on the recipient
//! key_i = Keccak256(p_i)[0..16]
//! enc_i = AES-128-ECB(key_i, shared_secret)  // exactly one block
//! ```
//!
//! plus `Keccak256(shared_secret)` so recipients can check the decryption.
//! The construction must match the on-chain verifier byte for byte.
//!
//! ECB is sound here only because each `key_i` is unique per recipient and the
//! plaintext is a single block.

use crate::effects::{gen_random_bytes, RandomSource};
use crate::hash::keccak256;
use crate::hex_codec::{hex_array, hex_array_vec};
use crate::{OcrConfigError, Result};
use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;
use curve25519_dalek::constants::X25519_BASEPOINT;
use curve25519_dalek::montgomery::MontgomeryPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

/// Length of the shared secret (one AES block)
pub const SHARED_SECRET_LEN: usize = 16;
/// Length of the ephemeral X25519 scalar
pub const EPHEMERAL_SECRET_LEN: usize = 32;
/// Length of a recipient X25519 public key
pub const RECIPIENT_KEY_LEN: usize = 32;
/// Length of one encrypted copy of the shared secret
pub const ENCRYPTED_SECRET_LEN: usize = 16;

/// Encrypted shared secret for an ordered set of recipients
///
/// `encryptions[i]` belongs to the i-th recipient key passed to
/// [`encrypt_for_recipients`]; the assembler relies on that positional link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedSecretEnvelope {
    /// Sender's ephemeral X25519 public value
    #[serde(with = "hex_array")]
    pub ephemeral_public_point: [u8; 32],
    /// Keccak-256 of the plaintext shared secret
    #[serde(with = "hex_array")]
    pub secret_hash: [u8; 32],
    /// One ciphertext per recipient, in recipient order
    #[serde(with = "hex_array_vec")]
    pub encryptions: Vec<[u8; ENCRYPTED_SECRET_LEN]>,
}

impl SharedSecretEnvelope {
    /// Number of recipients
    pub fn len(&self) -> usize {
        self.encryptions.len()
    }

    /// True when there are no recipients
    pub fn is_empty(&self) -> bool {
        self.encryptions.is_empty()
    }

    /// Check a candidate plaintext against the published hash
    pub fn verify_secret(&self, secret: &[u8]) -> bool {
        keccak256(secret) == self.secret_hash
    }

    /// Recover the shared secret as recipient `index`
    ///
    /// Fails if the index is out of range, the key is not 32 bytes, or the
    /// decrypted value does not hash to `secret_hash` (wrong key or index).
    pub fn decrypt_for(
        &self,
        index: usize,
        private_key: &[u8],
    ) -> Result<Zeroizing<[u8; SHARED_SECRET_LEN]>> {
        let ciphertext = self.encryptions.get(index).ok_or_else(|| {
            OcrConfigError::recipient(
                index,
                format!("no encryption for recipient ({} recipients)", self.len()),
            )
        })?;
        let private_key: Zeroizing<[u8; 32]> =
            Zeroizing::new(private_key.try_into().map_err(|_| {
                OcrConfigError::recipient(
                    index,
                    format!(
                        "private key must be {RECIPIENT_KEY_LEN} bytes, got {}",
                        private_key.len()
                    ),
                )
            })?);

        let key = derive_recipient_key(&private_key, &self.ephemeral_public_point);
        let secret = Zeroizing::new(aes_decrypt_block(&key, ciphertext));

        if !self.verify_secret(secret.as_slice()) {
            return Err(OcrConfigError::recipient(
                index,
                "decrypted secret does not match secret hash",
            ));
        }
        Ok(secret)
    }
}

/// Encrypt `shared_secret` for every recipient key, in order
///
/// Byte lengths are checked before any curve arithmetic: the shared secret must
/// be 16 bytes, the ephemeral secret 32 bytes, and there must be at least one
/// recipient whose key is 32 bytes. A bad recipient key is reported by index.
pub fn encrypt_for_recipients<K: AsRef<[u8]>>(
    recipient_public_keys: &[K],
    shared_secret: &[u8],
    ephemeral_secret: &[u8],
) -> Result<SharedSecretEnvelope> {
    let shared_secret: Zeroizing<[u8; SHARED_SECRET_LEN]> =
        Zeroizing::new(shared_secret.try_into().map_err(|_| {
            OcrConfigError::envelope(format!(
                "shared secret must be {SHARED_SECRET_LEN} bytes, got {}",
                shared_secret.len()
            ))
        })?);
    let ephemeral_secret: Zeroizing<[u8; EPHEMERAL_SECRET_LEN]> =
        Zeroizing::new(ephemeral_secret.try_into().map_err(|_| {
            OcrConfigError::envelope(format!(
                "ephemeral secret must be {EPHEMERAL_SECRET_LEN} bytes, got {}",
                ephemeral_secret.len()
            ))
        })?);
    if recipient_public_keys.is_empty() {
        return Err(OcrConfigError::envelope(
            "recipient public keys cannot be empty",
        ));
    }

    let recipients = recipient_public_keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let key = key.as_ref();
            <[u8; RECIPIENT_KEY_LEN]>::try_from(key).map_err(|_| {
                OcrConfigError::recipient(
                    i,
                    format!(
                        "public key must be {RECIPIENT_KEY_LEN} bytes, got {}",
                        key.len()
                    ),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let ephemeral_public_point = X25519_BASEPOINT.mul_clamped(*ephemeral_secret).to_bytes();

    let encryptions = recipients
        .iter()
        .map(|public_key| {
            let key = derive_recipient_key(&ephemeral_secret, public_key);
            aes_encrypt_block(&key, &shared_secret)
        })
        .collect::<Vec<_>>();

    debug!(
        recipients = encryptions.len(),
        "Encrypted shared secret for recipients"
    );

    Ok(SharedSecretEnvelope {
        ephemeral_public_point,
        secret_hash: keccak256(shared_secret.as_slice()),
        encryptions,
    })
}

/// Encrypt a freshly generated shared secret under a fresh ephemeral key
///
/// Returns the envelope together with the generated plaintext secret.
pub fn encrypt_with_random_secrets<K: AsRef<[u8]>>(
    recipient_public_keys: &[K],
    random: &dyn RandomSource,
) -> Result<(SharedSecretEnvelope, Zeroizing<[u8; SHARED_SECRET_LEN]>)> {
    let shared_secret: Zeroizing<[u8; SHARED_SECRET_LEN]> =
        Zeroizing::new(gen_random_bytes(random));
    let ephemeral_secret: Zeroizing<[u8; EPHEMERAL_SECRET_LEN]> =
        Zeroizing::new(gen_random_bytes(random));

    let envelope = encrypt_for_recipients(
        recipient_public_keys,
        shared_secret.as_slice(),
        ephemeral_secret.as_slice(),
    )?;
    Ok((envelope, shared_secret))
}

/// Free-function form of [`SharedSecretEnvelope::decrypt_for`]
pub fn decrypt_shared_secret(
    envelope: &SharedSecretEnvelope,
    index: usize,
    private_key: &[u8],
) -> Result<Zeroizing<[u8; SHARED_SECRET_LEN]>> {
    envelope.decrypt_for(index, private_key)
}

/// X25519 public key for a private scalar
pub fn recipient_public_key(private_key: &[u8; 32]) -> [u8; RECIPIENT_KEY_LEN] {
    X25519_BASEPOINT.mul_clamped(*private_key).to_bytes()
}

/// `Keccak256(X25519(scalar, point))[0..16]`
///
/// Symmetric in the two parties: the sender calls it with the ephemeral secret
/// and the recipient's key, the recipient with its own secret and the
/// ephemeral public point.
fn derive_recipient_key(scalar: &[u8; 32], point: &[u8; 32]) -> Zeroizing<[u8; 16]> {
    let shared_point = Zeroizing::new(MontgomeryPoint(*point).mul_clamped(*scalar).to_bytes());
    let digest = Zeroizing::new(keccak256(shared_point.as_slice()));

    let mut key = Zeroizing::new([0u8; 16]);
    key.copy_from_slice(&digest[..16]);
    key
}

// Single-block ECB: no IV is involved and a 16-byte plaintext needs no padding.
fn aes_encrypt_block(key: &[u8; 16], plaintext: &[u8; 16]) -> [u8; 16] {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut block = GenericArray::clone_from_slice(plaintext);
    cipher.encrypt_block(&mut block);

    let mut out = [0u8; 16];
    out.copy_from_slice(&block);
    out
}

fn aes_decrypt_block(key: &[u8; 16], ciphertext: &[u8; 16]) -> [u8; 16] {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut block = GenericArray::clone_from_slice(ciphertext);
    cipher.decrypt_block(&mut block);

    let mut out = [0u8; 16];
    out.copy_from_slice(&block);
    out
}
