//! Property Tests: Shared-Secret Envelope
//!
//! Checks the laws every envelope must satisfy regardless of key material:
//! fixed output sizes, per-recipient recovery, and independence of each
//! recipient's ciphertext from the rest of the list.

use ocr_config::envelope::{ENCRYPTED_SECRET_LEN, RECIPIENT_KEY_LEN};
use ocr_config::hash::keccak256;
use ocr_config::{decrypt_shared_secret, encrypt_for_recipients, recipient_public_key};
use proptest::prelude::*;

fn arb_scalar() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

fn arb_secret() -> impl Strategy<Value = [u8; 16]> {
    prop::array::uniform16(any::<u8>())
}

fn arb_private_keys() -> impl Strategy<Value = Vec<[u8; 32]>> {
    prop::collection::vec(arb_scalar(), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: Output sizes are fixed and there is one ciphertext per key
    #[test]
    fn prop_envelope_sizes(
        private_keys in arb_private_keys(),
        secret in arb_secret(),
        ephemeral in arb_scalar(),
    ) {
        let public_keys: Vec<_> = private_keys.iter().map(recipient_public_key).collect();
        let envelope = encrypt_for_recipients(&public_keys, &secret, &ephemeral).unwrap();

        prop_assert_eq!(envelope.ephemeral_public_point.len(), RECIPIENT_KEY_LEN);
        prop_assert_eq!(envelope.secret_hash.len(), 32);
        prop_assert_eq!(envelope.encryptions.len(), public_keys.len());
        prop_assert!(envelope.encryptions.iter().all(|e| e.len() == ENCRYPTED_SECRET_LEN));
        prop_assert_eq!(envelope.secret_hash, keccak256(&secret));
    }

    /// Property: Every recipient recovers the secret with its own key
    #[test]
    fn prop_each_recipient_recovers_secret(
        private_keys in arb_private_keys(),
        secret in arb_secret(),
        ephemeral in arb_scalar(),
    ) {
        let public_keys: Vec<_> = private_keys.iter().map(recipient_public_key).collect();
        let envelope = encrypt_for_recipients(&public_keys, &secret, &ephemeral).unwrap();

        for (i, private_key) in private_keys.iter().enumerate() {
            let recovered = decrypt_shared_secret(&envelope, i, private_key).unwrap();
            prop_assert_eq!(*recovered, secret);
            prop_assert_eq!(keccak256(recovered.as_slice()), envelope.secret_hash);
        }
    }

    /// Property: Permuting the keys permutes the ciphertexts identically
    #[test]
    fn prop_ciphertexts_follow_key_order(
        private_keys in arb_private_keys(),
        secret in arb_secret(),
        ephemeral in arb_scalar(),
        rotation in 0usize..8,
    ) {
        let public_keys: Vec<_> = private_keys.iter().map(recipient_public_key).collect();
        let mut rotated = public_keys.clone();
        rotated.rotate_left(rotation % public_keys.len());

        let original = encrypt_for_recipients(&public_keys, &secret, &ephemeral).unwrap();
        let permuted = encrypt_for_recipients(&rotated, &secret, &ephemeral).unwrap();

        let mut expected = original.encryptions.clone();
        expected.rotate_left(rotation % public_keys.len());
        prop_assert_eq!(permuted.encryptions, expected);
        prop_assert_eq!(permuted.ephemeral_public_point, original.ephemeral_public_point);
        prop_assert_eq!(permuted.secret_hash, original.secret_hash);
    }

    /// Property: Wrong-length secrets are rejected before any encryption
    #[test]
    fn prop_wrong_secret_length_rejected(
        secret in prop::collection::vec(any::<u8>(), 0..40),
        ephemeral in arb_scalar(),
    ) {
        prop_assume!(secret.len() != 16);
        let keys = [recipient_public_key(&[1u8; 32])];
        let err = encrypt_for_recipients(&keys, &secret, &ephemeral).unwrap_err();
        prop_assert!(err.is_envelope());
    }
}
