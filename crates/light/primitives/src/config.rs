//! Chain and indexer configuration.

use alloy_primitives::{B256, b256};

/// Chain parameters needed to interpret chain artifacts.
///
/// Stored in the local database keyed by the genesis hash, so every network
/// carries its own configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChainConfig {
    /// Replay-protection domain of the chain.
    pub chain_id: u64,
}

impl ChainConfig {
    /// Creates a configuration for the given chain id.
    pub const fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }
}

/// Sizing of the bloom-bits and bloom-trie index sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct IndexerConfig {
    /// Number of blocks covered by one bloom-bits section.
    pub bloom_size: u64,
    /// Number of blocks covered by one bloom-trie section.
    pub bloom_trie_size: u64,
}

impl IndexerConfig {
    /// Section sizes used on public networks.
    pub const MAINNET: Self = Self { bloom_size: 4096, bloom_trie_size: 32768 };

    /// Small section sizes used by tests and local networks.
    pub const TEST: Self = Self { bloom_size: 16, bloom_trie_size: 16 };

    /// Returns the height of the last block of the given bloom-bits section.
    pub const fn bloom_section_head(&self, section: u64) -> u64 {
        (section + 1) * self.bloom_size - 1
    }

    /// Returns the height of the last block covered by `count` bloom-trie sections.
    ///
    /// `count` must be nonzero.
    pub const fn bloom_trie_head(&self, count: u64) -> u64 {
        count * self.bloom_trie_size - 1
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self::MAINNET
    }
}

/// Genesis hash of the main network.
pub const MAINNET_GENESIS_HASH: B256 =
    b256!("0xf82fd9c0c8a53474c9e40e4f1c0583a94609eaf88dae01a5496da459398485c6");

/// Genesis hash of the test network.
pub const TESTNET_GENESIS_HASH: B256 =
    b256!("0x4ab1748c057b744de202d6ebea64e8d3a0b2ec4c19abbc59e8639967b14b7c96");

/// Genesis hash of the development network.
pub const DEVNET_GENESIS_HASH: B256 =
    b256!("0xdf819f11beead767f91a6c05d74e5f902fc2988e9039a969a023bc75e467cdeb");

static TRUSTED_CHECKPOINTS: [(B256, TrustedCheckpoint); 3] = [
    (MAINNET_GENESIS_HASH, TrustedCheckpoint::MAINNET),
    (TESTNET_GENESIS_HASH, TrustedCheckpoint::TESTNET),
    (DEVNET_GENESIS_HASH, TrustedCheckpoint::DEVNET),
];

/// A hard-coded or configured checkpoint the light client starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrustedCheckpoint {
    /// Index of the last section covered by the checkpoint.
    pub section_index: u64,
    /// Hash of the last block of that section.
    pub section_head: B256,
    /// Root of the canonical hash trie at the section.
    pub cht_root: B256,
    /// Root of the bloom trie at the section.
    pub bloom_root: B256,
}

impl TrustedCheckpoint {
    /// Bloom-trie checkpoint of the main network.
    pub const MAINNET: Self = Self {
        section_index: 227,
        section_head: b256!("0xa2e0b25d72c2fc6e35a7f853cdacb193b4b4f95c606accf7f8fa8415283582c7"),
        cht_root: b256!("0xf69bdd4053b95b61a27b106a0e86103d791edd8574950dc96aa351ab9b9f1aa0"),
        bloom_root: b256!("0xec1b454d4c6322c78ccedf76ac922a8698c3cac4d98748a84af4995b7bd3d744"),
    };

    /// Bloom-trie checkpoint of the test network.
    pub const TESTNET: Self = Self {
        section_index: 161,
        section_head: b256!("0x5378afa734e1feafb34bcca1534c4d96952b754579b96a4afb23d5301ecececc"),
        cht_root: b256!("0x1cf2b071e7443a62914362486b613ff30f60cea0d9c268ed8c545f876a3ee60c"),
        bloom_root: b256!("0x5ac25c84bd18a9cbe878d4609a80220f57f85037a112644532412ba0d498a31b"),
    };

    /// Bloom-trie checkpoint of the development network.
    pub const DEVNET: Self = Self {
        section_index: 2,
        section_head: b256!("0x9cd5e2ec8a8505dd5b8dc7bc248daceafbb135a84e68e23ba0d9b12e1be2651a"),
        cht_root: b256!("0x1a91e78eb6772ed586a1a31b5058876b664d96bddbf5d9f2942ea302da403d2d"),
        bloom_root: b256!("0x5ac25c84bd18a9cbe878d4609a80220f57f85037a112644532412ba0d498a31b"),
    };

    /// Returns the built-in checkpoint of the network with the given genesis hash.
    pub fn for_genesis(genesis: B256) -> Option<&'static Self> {
        TRUSTED_CHECKPOINTS
            .iter()
            .find(|(hash, _)| *hash == genesis)
            .map(|(_, checkpoint)| checkpoint)
    }

    /// Returns the number of sections the checkpoint vouches for.
    pub const fn section_count(&self) -> u64 {
        self.section_index + 1
    }
}
