//! Genesis block references for the built-in networks
//!
//! The registry never interprets these values; they are carried so that
//! block validation and sync code can anchor the chain.

use crate::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A block hash in internal byte order.
///
/// Displayed and parsed as byte-reversed hex, matching node RPC output.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Raw bytes in internal order
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BlockHash").field(&self.to_string()).finish()
    }
}

impl FromStr for BlockHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidHex(format!("{s}: {e}")))?;
        let mut hash = <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
            Error::InvalidHex(format!("{s}: expected 32 bytes, got {}", bytes.len()))
        })?;
        hash.reverse();
        Ok(Self(hash))
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Opaque reference to a network's first block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisInfo {
    /// Genesis block hash
    pub hash: BlockHash,
    /// Merkle root of the genesis coinbase
    pub merkle_root: BlockHash,
    /// Header timestamp (Unix epoch)
    pub timestamp: u32,
    /// Header difficulty bits
    pub bits: u32,
    /// Header nonce
    pub nonce: u32,
}

/// Merkle root shared by the mainnet, testnet4 and simnet genesis blocks
const MAIN_MERKLE_ROOT: BlockHash = BlockHash([
    0x9b, 0x6f, 0xc2, 0x3c, 0xbe, 0x22, 0xf4, 0x97, 0x66, 0x60, 0x5c, 0xa8, 0xcb, 0x5d, 0x44, 0x05,
    0xf0, 0x9d, 0x6b, 0x3e, 0x60, 0xcf, 0x2a, 0x35, 0xe4, 0x2e, 0x01, 0x76, 0x87, 0x7e, 0xe4, 0xb3,
]);

/// Mainnet genesis block
pub const MAINNET_GENESIS: GenesisInfo = GenesisInfo {
    hash: BlockHash([
        0x4b, 0xd9, 0xae, 0x11, 0x46, 0x71, 0x8f, 0x86, 0x42, 0x7b, 0xeb, 0x97, 0x5b, 0x3b, 0x30,
        0x84, 0xf9, 0x03, 0x5f, 0x84, 0x1c, 0xff, 0x60, 0xf8, 0x06, 0xac, 0xb8, 0xb7, 0x4b, 0x20,
        0x56, 0x4e,
    ]),
    merkle_root: MAIN_MERKLE_ROOT,
    timestamp: 1_392_841_423,
    bits: 0x1e0ffff0,
    nonce: 3_236_648,
};

/// Regression test network genesis block
pub const REGTEST_GENESIS: GenesisInfo = GenesisInfo {
    hash: BlockHash([
        0xf9, 0x16, 0xc4, 0x56, 0xfc, 0x51, 0xdf, 0x62, 0x78, 0x85, 0xd7, 0xd6, 0x74, 0xed, 0x02,
        0xdc, 0x88, 0xa2, 0x25, 0xad, 0xb3, 0xf0, 0x2a, 0xd1, 0x3e, 0xb4, 0x93, 0x8f, 0xf3, 0x27,
        0x08, 0x53,
    ]),
    merkle_root: BlockHash([
        0xd9, 0xce, 0xd4, 0xed, 0x11, 0x30, 0xf7, 0xb7, 0xfa, 0xad, 0x9b, 0xe2, 0x53, 0x23, 0xff,
        0xaf, 0xa3, 0x32, 0x32, 0xa1, 0x7c, 0x3e, 0xdf, 0x6c, 0xfd, 0x97, 0xbe, 0xe6, 0xba, 0xfb,
        0xdd, 0x97,
    ]),
    timestamp: 1_296_688_602,
    bits: 0x207fffff,
    nonce: 0,
};

/// Test network (version 4) genesis block
pub const TESTNET4_GENESIS: GenesisInfo = GenesisInfo {
    hash: BlockHash([
        0xee, 0x6b, 0x40, 0x9e, 0x82, 0x15, 0x46, 0x57, 0xbe, 0xaf, 0xb4, 0xf2, 0x55, 0x7a, 0x9a,
        0x1e, 0x74, 0x54, 0xd4, 0x76, 0x3a, 0x18, 0xe7, 0xc3, 0x92, 0x00, 0xe6, 0xb5, 0x88, 0x18,
        0x27, 0xa4,
    ]),
    merkle_root: MAIN_MERKLE_ROOT,
    timestamp: 1_494_757_042,
    bits: 0x1e0ffff0,
    nonce: 2_231_829,
};

/// Simulation test network genesis block
pub const SIMNET_GENESIS: GenesisInfo = GenesisInfo {
    hash: BlockHash([
        0xf6, 0x7a, 0xd7, 0x69, 0x5d, 0x9b, 0x66, 0x2a, 0x72, 0xff, 0x3d, 0x8e, 0xdb, 0xbb, 0x2d,
        0xe0, 0xbf, 0xa6, 0x7b, 0x13, 0x97, 0x4b, 0xb9, 0x91, 0x0d, 0x11, 0x6d, 0x5c, 0xbd, 0x86,
        0x3e, 0x68,
    ]),
    merkle_root: MAIN_MERKLE_ROOT,
    timestamp: 1_401_292_357,
    bits: 0x207fffff,
    nonce: 2,
};
