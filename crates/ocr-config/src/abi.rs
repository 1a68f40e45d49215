//! Solidity ABI encoding of configuration records
//!
//! The contract takes a single tuple argument:
//!
//! ```text
//! (uint64 deltaProgress, uint64 deltaResend, uint64 deltaRound, uint64 deltaGrace,
//!  uint64 deltaC, uint64 alphaPPB, uint64 deltaStage, uint8 rMax, uint8[] s,
//!  bytes32[] offchainPublicKeys, string peerIDs,
//!  (bytes32 diffieHellmanPoint, bytes32 sharedSecretHash, bytes16[] encryptions))
//! ```
//!
//! Field order is part of the contract interface. Static values occupy one
//! 32-byte word in the head; dynamic values get an offset word in the head and
//! their contents in the tail, with offsets relative to the start of the
//! enclosing tuple.

use crate::assembler::ConfigurationRecord;
use crate::envelope::SharedSecretEnvelope;
use crate::hash::keccak256;

/// Size of one ABI word
pub const WORD: usize = 32;

/// Canonical signature of the configuration call
pub const SET_CONFIG_SIGNATURE: &str = "setConfigEncodedComponents((uint64,uint64,uint64,uint64,uint64,uint64,uint64,uint8,uint8[],bytes32[],string,(bytes32,bytes32,bytes16[])))";

/// First four bytes of the Keccak-256 of a function signature
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[0..4]);
    selector
}

/// Selector of [`SET_CONFIG_SIGNATURE`]
pub fn set_config_selector() -> [u8; 4] {
    function_selector(SET_CONFIG_SIGNATURE)
}

/// Encode a u64 for ABI output
pub fn encode_u64(value: u64) -> [u8; WORD] {
    let mut result = [0u8; WORD];
    result[24..32].copy_from_slice(&value.to_be_bytes());
    result
}

/// Encode a u8 for ABI output
pub fn encode_u8(value: u8) -> [u8; WORD] {
    let mut result = [0u8; WORD];
    result[31] = value;
    result
}

/// Encode a length or offset for ABI output
pub fn encode_usize(value: usize) -> [u8; WORD] {
    encode_u64(value as u64)
}

/// Encode a `bytes16` value (left-aligned, zero padded)
pub fn encode_bytes16(value: &[u8; 16]) -> [u8; WORD] {
    let mut result = [0u8; WORD];
    result[..16].copy_from_slice(value);
    result
}

/// Encode a dynamic `string`/`bytes` value: length word then padded data
pub fn encode_bytes(value: &[u8]) -> Vec<u8> {
    let padded = value.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&encode_usize(value.len()));
    out.extend_from_slice(value);
    out.resize(WORD + padded, 0);
    out
}

/// Encode a dynamic array of single-word elements
fn encode_word_array<I>(words: I) -> Vec<u8>
where
    I: ExactSizeIterator<Item = [u8; WORD]>,
{
    let mut out = Vec::with_capacity(WORD * (words.len() + 1));
    out.extend_from_slice(&encode_usize(words.len()));
    for word in words {
        out.extend_from_slice(&word);
    }
    out
}

/// Head/tail layout for one tuple
enum Slot {
    Static([u8; WORD]),
    Dynamic(Vec<u8>),
}

fn encode_tuple(slots: Vec<Slot>) -> Vec<u8> {
    let head_len = slots.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for slot in slots {
        match slot {
            Slot::Static(word) => head.extend_from_slice(&word),
            Slot::Dynamic(data) => {
                head.extend_from_slice(&encode_usize(head_len + tail.len()));
                tail.extend_from_slice(&data);
            }
        }
    }
    head.extend_from_slice(&tail);
    head
}

fn encode_envelope(envelope: &SharedSecretEnvelope) -> Vec<u8> {
    encode_tuple(vec![
        Slot::Static(envelope.ephemeral_public_point),
        Slot::Static(envelope.secret_hash),
        Slot::Dynamic(encode_word_array(
            envelope.encryptions.iter().map(encode_bytes16),
        )),
    ])
}

fn encode_record_tuple(record: &ConfigurationRecord) -> Vec<u8> {
    let mut slots: Vec<Slot> = record
        .params
        .packed()
        .iter()
        .map(|v| Slot::Static(encode_u64(*v)))
        .collect();
    slots.push(Slot::Static(encode_u8(record.r_max)));
    slots.push(Slot::Dynamic(encode_word_array(
        record.weights.iter().map(|w| encode_u8(*w)),
    )));
    slots.push(Slot::Dynamic(encode_word_array(
        record.offchain_public_keys.iter().copied(),
    )));
    slots.push(Slot::Dynamic(encode_bytes(record.peer_ids.as_bytes())));
    slots.push(Slot::Dynamic(encode_envelope(
        &record.shared_secret_encryptions,
    )));
    encode_tuple(slots)
}

/// `abi.encode(record)` with the record as a single tuple value
///
/// The tuple is dynamic, so the output starts with its offset (always 0x20).
pub fn encode_components(record: &ConfigurationRecord) -> Vec<u8> {
    encode_tuple(vec![Slot::Dynamic(encode_record_tuple(record))])
}

/// Call data for `setConfigEncodedComponents`: selector then encoded tuple
pub fn set_config_call_data(record: &ConfigurationRecord) -> Vec<u8> {
    let encoded = encode_components(record);
    let mut out = Vec::with_capacity(4 + encoded.len());
    out.extend_from_slice(&set_config_selector());
    out.extend_from_slice(&encoded);
    out
}
