//! Typed accessors mapping chain artifacts onto store keys.
//!
//! Readers take any [`KeyValueReader`](crate::KeyValueReader) and return
//! `Ok(None)` for absent entries. Writers queue their changes on a
//! [`WriteBatch`](crate::WriteBatch) so callers decide what is committed
//! together.
//!
//! Key layout (numbers are 8 byte big endian):
//!
//! | key                                   | value                 |
//! |---------------------------------------|-----------------------|
//! | `h` ‖ number ‖ hash                   | header RLP            |
//! | `h` ‖ number ‖ `n`                    | canonical hash        |
//! | `H` ‖ hash                            | header number         |
//! | `b` ‖ number ‖ hash                   | body RLP              |
//! | `r` ‖ number ‖ hash                   | receipts RLP          |
//! | `B` ‖ bit (2 bytes) ‖ section ‖ head   | compressed bloom bits |
//! | `bltRoot-` ‖ section ‖ head           | bloom trie root       |
//! | `lumen-config-` ‖ genesis hash        | chain config JSON     |

mod chain;
pub use chain::{
    delete_canonical_hash, read_body_rlp, read_canonical_hash, read_header, read_header_number,
    write_body, write_body_rlp, write_canonical_hash, write_header,
};

mod receipts;
pub use receipts::{delete_receipts, has_receipts, read_raw_receipts, write_receipts};

mod bloom;
pub use bloom::{read_bloom_bits, read_bloom_trie_root, write_bloom_bits, write_bloom_trie_root};

mod config;
pub use config::{read_chain_config, write_chain_config};

use alloy_primitives::B256;

pub(crate) const HEADER_PREFIX: &[u8] = b"h";
pub(crate) const HEADER_HASH_SUFFIX: &[u8] = b"n";
pub(crate) const HEADER_NUMBER_PREFIX: &[u8] = b"H";
pub(crate) const BLOCK_BODY_PREFIX: &[u8] = b"b";
pub(crate) const BLOCK_RECEIPTS_PREFIX: &[u8] = b"r";
pub(crate) const BLOOM_BITS_PREFIX: &[u8] = b"B";
pub(crate) const BLOOM_TRIE_ROOT_PREFIX: &[u8] = b"bltRoot-";
pub(crate) const CONFIG_PREFIX: &[u8] = b"lumen-config-";

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

pub(crate) fn header_key(number: u64, hash: B256) -> Vec<u8> {
    concat(&[HEADER_PREFIX, &number.to_be_bytes(), hash.as_slice()])
}

pub(crate) fn header_hash_key(number: u64) -> Vec<u8> {
    concat(&[HEADER_PREFIX, &number.to_be_bytes(), HEADER_HASH_SUFFIX])
}

pub(crate) fn header_number_key(hash: B256) -> Vec<u8> {
    concat(&[HEADER_NUMBER_PREFIX, hash.as_slice()])
}

pub(crate) fn block_body_key(number: u64, hash: B256) -> Vec<u8> {
    concat(&[BLOCK_BODY_PREFIX, &number.to_be_bytes(), hash.as_slice()])
}

pub(crate) fn block_receipts_key(number: u64, hash: B256) -> Vec<u8> {
    concat(&[BLOCK_RECEIPTS_PREFIX, &number.to_be_bytes(), hash.as_slice()])
}

pub(crate) fn bloom_bits_key(bit: u16, section: u64, head: B256) -> Vec<u8> {
    concat(&[BLOOM_BITS_PREFIX, &bit.to_be_bytes(), &section.to_be_bytes(), head.as_slice()])
}

pub(crate) fn bloom_trie_root_key(section: u64, head: B256) -> Vec<u8> {
    concat(&[BLOOM_TRIE_ROOT_PREFIX, &section.to_be_bytes(), head.as_slice()])
}

pub(crate) fn config_key(genesis: B256) -> Vec<u8> {
    concat(&[CONFIG_PREFIX, genesis.as_slice()])
}
