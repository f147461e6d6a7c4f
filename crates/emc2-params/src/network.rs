//! Network identifiers and HD key magics

use crate::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Network type enumeration for the built-in networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Mainnet
    Mainnet,
    /// Public test network (version 4)
    Testnet4,
    /// Regression test network
    Regtest,
    /// Private simulation test network
    Simnet,
}

impl NetworkType {
    /// All built-in network types, in default registration order
    pub const ALL: [NetworkType; 4] = [
        NetworkType::Mainnet,
        NetworkType::Testnet4,
        NetworkType::Regtest,
        NetworkType::Simnet,
    ];

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet4 => "testnet4",
            Self::Regtest => "regtest",
            Self::Simnet => "simnet",
        }
    }

    /// Wire magic identifying the network
    pub const fn net(&self) -> NetworkId {
        match self {
            Self::Mainnet => magics::MAINNET,
            Self::Testnet4 => magics::TESTNET4,
            Self::Regtest => magics::REGTEST,
            Self::Simnet => magics::SIMNET,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        NetworkType::ALL
            .into_iter()
            .find(|ty| ty.name() == lower)
            .ok_or_else(|| Error::InvalidNetwork(s.to_string()))
    }
}

/// Magic value distinguishing one network from another on the wire.
///
/// The value is the little-endian `u32` prefixed to every peer message; it is
/// displayed and serialized big-endian as `0x` plus eight hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkId(pub u32);

impl NetworkId {
    /// Bytes as they appear in a message header
    pub const fn to_wire_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Read a network id from message header bytes
    pub const fn from_wire_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }
}

impl fmt::Debug for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NetworkId")
            .field(&format_args!("{:#010x}", self.0))
            .finish()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl FromStr for NetworkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = decode_magic(s)?;
        Ok(Self(u32::from_be_bytes(bytes)))
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Magic numbers used to identify the built-in networks.
pub mod magics {
    use super::NetworkId;

    /// The production mainnet.
    pub const MAINNET: NetworkId = NetworkId(0xdbb6c0fb);
    /// The public test network (version 4).
    pub const TESTNET4: NetworkId = NetworkId(0xf1c8d2fd);
    /// The regression test network.
    pub const REGTEST: NetworkId = NetworkId(0xdab5bffa);
    /// The simulation test network.
    pub const SIMNET: NetworkId = NetworkId(0x12141c16);
}

/// Four-byte version prefix of a serialized HD extended key
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HdKeyId(pub [u8; 4]);

impl HdKeyId {
    /// Raw magic bytes
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Debug for HdKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HdKeyId").field(&hex::encode(self.0)).finish()
    }
}

impl fmt::Display for HdKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for HdKeyId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode_magic(s).map(Self)
    }
}

impl TryFrom<&[u8]> for HdKeyId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        <[u8; 4]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::UnknownHdKeyId(hex::encode(bytes)))
    }
}

impl From<[u8; 4]> for HdKeyId {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl Serialize for HdKeyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HdKeyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Decode eight hex digits, with or without a `0x` prefix
fn decode_magic(s: &str) -> Result<[u8; 4]> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|e| Error::InvalidHex(format!("{s}: {e}")))?;
    <[u8; 4]>::try_from(bytes.as_slice())
        .map_err(|_| Error::InvalidHex(format!("{s}: expected 4 bytes, got {}", bytes.len())))
}
