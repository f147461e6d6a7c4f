//! Per-network parameter sets
//!
//! A [`NetworkParams`] value is built fully-formed, either from the built-in
//! tables below or from configuration, and is never mutated once it has been
//! handed to a [`Registry`](crate::Registry).

use crate::checkpoints::CheckpointList;
use crate::consensus::{ConsensusDeployment, DeploymentId, Deployments};
use crate::genesis::{
    GenesisInfo, MAINNET_GENESIS, REGTEST_GENESIS, SIMNET_GENESIS, TESTNET4_GENESIS,
};
use crate::network::{HdKeyId, NetworkId, NetworkType};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Separator between the human-readable part and the data of a Bech32 string
pub const BECH32_SEPARATOR: char = '1';

/// A DNS seed used for peer discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSeed {
    /// Hostname of the seed
    pub host: String,
    /// Whether the seed supports filtering by service flags
    #[serde(default)]
    pub has_filtering: bool,
}

impl fmt::Display for DnsSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

/// Parameters identifying one network and its consensus constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParams {
    /// Human-readable name
    pub name: String,
    /// Magic value identifying the network
    pub net: NetworkId,
    /// Default peer-to-peer port
    pub default_port: u16,
    /// DNS seeds for peer discovery
    #[serde(default)]
    pub dns_seeds: Vec<DnsSeed>,

    /// Genesis block reference
    pub genesis: GenesisInfo,
    /// Highest allowed proof of work in compact form
    pub pow_limit_bits: u32,
    /// Height at which BIP 34 became active
    pub bip0034_height: u32,
    /// Height at which BIP 65 became active
    pub bip0065_height: u32,
    /// Height at which BIP 66 became active
    pub bip0066_height: u32,
    /// Blocks before a coinbase output can be spent
    pub coinbase_maturity: u16,
    /// Blocks between subsidy reductions
    pub subsidy_reduction_interval: u32,
    /// Time that should elapse between difficulty retargets
    #[serde(with = "duration_secs")]
    pub target_timespan: Duration,
    /// Desired time to generate each block
    #[serde(with = "duration_secs")]
    pub target_time_per_block: Duration,
    /// Bound on the adjustment applied at each retarget
    pub retarget_adjustment_factor: i64,
    /// Lower bound override of the retarget factor, zero when unused
    #[serde(default)]
    pub retarget_adjustment_factor_min: i64,
    /// Upper bound override of the retarget factor, zero when unused
    #[serde(default)]
    pub retarget_adjustment_factor_max: i64,
    /// Whether the minimum difficulty drops after a long gap between blocks
    pub reduce_min_difficulty: bool,
    /// Gap after which the minimum difficulty drops
    #[serde(with = "duration_secs")]
    pub min_diff_reduction_time: Duration,
    /// Whether CPU mining is allowed
    pub generate_supported: bool,

    /// Checkpoints ordered from oldest to newest
    #[serde(default)]
    pub checkpoints: CheckpointList,

    /// Blocks in a retarget window that must signal to lock in a rule change
    pub rule_change_activation_threshold: u32,
    /// Blocks in each threshold state retarget window
    pub miner_confirmation_window: u32,
    /// Rule changes being voted on
    pub deployments: Deployments,

    /// Whether non-standard transactions are relayed
    #[serde(default)]
    pub relay_non_std_txs: bool,

    /// Human-readable part for Bech32 segwit addresses (BIP 173)
    pub bech32_hrp_segwit: String,

    /// First byte of a P2PKH address
    pub pub_key_hash_addr_id: u8,
    /// First byte of a P2SH address
    pub script_hash_addr_id: u8,
    /// First byte of a WIF private key
    pub private_key_id: u8,
    /// First byte of a P2WPKH address
    pub witness_pub_key_hash_addr_id: u8,
    /// First byte of a P2WSH address
    pub witness_script_hash_addr_id: u8,

    /// BIP 32 extended private key magic
    pub hd_private_key_id: HdKeyId,
    /// BIP 32 extended public key magic
    pub hd_public_key_id: HdKeyId,
    /// BIP 44 coin type
    pub hd_coin_type: u32,

    /// Charity output public key (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charity_pub_key: Option<String>,
}

impl NetworkParams {
    /// Get mainnet parameters
    pub fn mainnet() -> Self {
        Self {
            name: NetworkType::Mainnet.name().to_string(),
            net: NetworkType::Mainnet.net(),
            default_port: 41888,
            dns_seeds: Vec::new(),
            genesis: MAINNET_GENESIS,
            pow_limit_bits: 504_365_055,
            bip0034_height: 1,
            bip0065_height: 0,
            bip0066_height: 0,
            coinbase_maturity: 100,
            subsidy_reduction_interval: 840_000,
            target_timespan: Duration::from_secs(60),
            target_time_per_block: Duration::from_secs(60),
            retarget_adjustment_factor: 4,
            retarget_adjustment_factor_min: 4,
            retarget_adjustment_factor_max: 2,
            reduce_min_difficulty: false,
            min_diff_reduction_time: Duration::ZERO,
            generate_supported: false,
            checkpoints: CheckpointList::default(),
            // 75% of a two week window
            rule_change_activation_threshold: 15_120,
            miner_confirmation_window: 20_160,
            deployments: Deployments {
                test_dummy: ConsensusDeployment::new(28, 1_199_145_601, 1_230_767_999),
                csv: ConsensusDeployment::new(0, 1_485_561_600, 1_517_356_801),
                segwit: ConsensusDeployment::new(1, 1_485_561_600, 1_517_356_801),
            },
            relay_non_std_txs: false,
            bech32_hrp_segwit: "mil".to_string(),
            pub_key_hash_addr_id: 0x32,
            script_hash_addr_id: 0x30,
            private_key_id: 0xef,
            witness_pub_key_hash_addr_id: 0x06,
            witness_script_hash_addr_id: 0x0a,
            hd_private_key_id: HdKeyId([0x04, 0x88, 0xad, 0xe4]),
            hd_public_key_id: HdKeyId([0x04, 0x88, 0xb2, 0x1e]),
            hd_coin_type: 2,
            charity_pub_key: None,
        }
    }

    /// Get test network (version 4) parameters
    pub fn testnet4() -> Self {
        Self {
            name: NetworkType::Testnet4.name().to_string(),
            net: NetworkType::Testnet4.net(),
            default_port: 31878,
            dns_seeds: Vec::new(),
            genesis: TESTNET4_GENESIS,
            pow_limit_bits: 504_365_055,
            bip0034_height: 1,
            bip0065_height: 0,
            bip0066_height: 0,
            coinbase_maturity: 100,
            subsidy_reduction_interval: 840_000,
            target_timespan: Duration::from_secs(60),
            target_time_per_block: Duration::from_secs(60),
            retarget_adjustment_factor: 4,
            retarget_adjustment_factor_min: 4,
            retarget_adjustment_factor_max: 2,
            reduce_min_difficulty: false,
            min_diff_reduction_time: Duration::ZERO,
            generate_supported: false,
            checkpoints: CheckpointList::default(),
            rule_change_activation_threshold: 15,
            miner_confirmation_window: 15,
            deployments: Deployments {
                test_dummy: ConsensusDeployment::new(28, 1_199_145_601, 1_230_767_999),
                csv: ConsensusDeployment::new(0, 1_483_228_800, 1_546_300_800),
                segwit: ConsensusDeployment::new(1, 1_483_228_800, 1_546_300_800),
            },
            relay_non_std_txs: true,
            bech32_hrp_segwit: "temc2".to_string(),
            pub_key_hash_addr_id: 0x6f,
            script_hash_addr_id: 0xc4,
            private_key_id: 0xef,
            witness_pub_key_hash_addr_id: 0x52,
            witness_script_hash_addr_id: 0x31,
            hd_private_key_id: HdKeyId([0x04, 0x35, 0x83, 0x94]),
            hd_public_key_id: HdKeyId([0x04, 0x35, 0x87, 0xcf]),
            hd_coin_type: 1,
            charity_pub_key: None,
        }
    }

    /// Get regression test network parameters
    pub fn regtest() -> Self {
        Self {
            name: NetworkType::Regtest.name().to_string(),
            net: NetworkType::Regtest.net(),
            default_port: 31880,
            dns_seeds: Vec::new(),
            genesis: REGTEST_GENESIS,
            pow_limit_bits: 0x207fffff,
            // Not active, permits version 1 blocks
            bip0034_height: 100_000_000,
            bip0065_height: 1351,
            bip0066_height: 1251,
            coinbase_maturity: 100,
            subsidy_reduction_interval: 150,
            target_timespan: Duration::from_secs(84 * 60 * 60),
            target_time_per_block: Duration::from_secs(150),
            retarget_adjustment_factor: 4,
            retarget_adjustment_factor_min: 0,
            retarget_adjustment_factor_max: 0,
            reduce_min_difficulty: true,
            min_diff_reduction_time: Duration::from_secs(150),
            generate_supported: true,
            checkpoints: CheckpointList::default(),
            rule_change_activation_threshold: 108,
            miner_confirmation_window: 144,
            deployments: always_available_deployments(),
            relay_non_std_txs: true,
            bech32_hrp_segwit: "remc2".to_string(),
            pub_key_hash_addr_id: 0x6f,
            script_hash_addr_id: 0xc4,
            private_key_id: 0xef,
            witness_pub_key_hash_addr_id: 0x31,
            witness_script_hash_addr_id: 0x3a,
            hd_private_key_id: HdKeyId([0x04, 0x35, 0x83, 0x94]),
            hd_public_key_id: HdKeyId([0x04, 0x35, 0x87, 0xcf]),
            hd_coin_type: 1,
            charity_pub_key: Some(
                "0377ba3117d776b40b49a910e869cd32adee4d33578f7bf52e1879ea739c9796ca".to_string(),
            ),
        }
    }

    /// Get simulation test network parameters
    pub fn simnet() -> Self {
        Self {
            name: NetworkType::Simnet.name().to_string(),
            net: NetworkType::Simnet.net(),
            default_port: 18555,
            // Simnet must never have seeds
            dns_seeds: Vec::new(),
            genesis: SIMNET_GENESIS,
            pow_limit_bits: 0x207fffff,
            bip0034_height: 0,
            bip0065_height: 0,
            bip0066_height: 0,
            coinbase_maturity: 100,
            subsidy_reduction_interval: 210_000,
            target_timespan: Duration::from_secs(14 * 24 * 60 * 60),
            target_time_per_block: Duration::from_secs(10 * 60),
            retarget_adjustment_factor: 4,
            retarget_adjustment_factor_min: 0,
            retarget_adjustment_factor_max: 0,
            reduce_min_difficulty: true,
            min_diff_reduction_time: Duration::from_secs(20 * 60),
            generate_supported: true,
            checkpoints: CheckpointList::default(),
            rule_change_activation_threshold: 75,
            miner_confirmation_window: 100,
            deployments: always_available_deployments(),
            relay_non_std_txs: true,
            bech32_hrp_segwit: "sltc".to_string(),
            pub_key_hash_addr_id: 0x3f,
            script_hash_addr_id: 0x7b,
            private_key_id: 0x64,
            witness_pub_key_hash_addr_id: 0x19,
            witness_script_hash_addr_id: 0x28,
            hd_private_key_id: HdKeyId([0x04, 0x20, 0xb9, 0x00]),
            hd_public_key_id: HdKeyId([0x04, 0x20, 0xbd, 0x3a]),
            // ASCII 's'
            hd_coin_type: 115,
            charity_pub_key: None,
        }
    }

    /// Get parameters by network type
    pub fn from_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet4 => Self::testnet4(),
            NetworkType::Regtest => Self::regtest(),
            NetworkType::Simnet => Self::simnet(),
        }
    }

    /// Built-in network type these parameters belong to, if any
    pub fn network_type(&self) -> Option<NetworkType> {
        NetworkType::ALL.into_iter().find(|ty| ty.net() == self.net)
    }

    /// Prefix every Bech32 segwit address on this network starts with
    pub fn bech32_segwit_prefix(&self) -> String {
        let mut prefix = self.bech32_hrp_segwit.to_lowercase();
        prefix.push(BECH32_SEPARATOR);
        prefix
    }

    /// Look up a deployment window by name
    pub fn deployment(&self, id: DeploymentId) -> &ConsensusDeployment {
        &self.deployments[id]
    }
}

fn always_available_deployments() -> Deployments {
    Deployments {
        test_dummy: ConsensusDeployment::always_available(28),
        csv: ConsensusDeployment::always_available(0),
        segwit: ConsensusDeployment::always_available(1),
    }
}

/// Built-in networks in default registration order
pub fn default_networks() -> &'static [NetworkParams] {
    static CELL: OnceCell<Vec<NetworkParams>> = OnceCell::new();
    CELL.get_or_init(|| {
        NetworkType::ALL
            .into_iter()
            .map(NetworkParams::from_type)
            .collect()
    })
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_params() {
        let params = NetworkParams::mainnet();
        assert_eq!(params.net, NetworkId(0xdbb6c0fb));
        assert_eq!(params.pub_key_hash_addr_id, 0x32);
        assert_eq!(params.bech32_segwit_prefix(), "mil1");
        assert_eq!(params.network_type(), Some(NetworkType::Mainnet));
        assert_eq!(params.deployment(DeploymentId::Segwit).bit_number, 1);
    }

    #[test]
    fn test_default_networks_order() {
        let names: Vec<_> = default_networks().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["mainnet", "testnet4", "regtest", "simnet"]);
    }

    #[test]
    fn test_default_networks_share_test_bytes() {
        // testnet4 and regtest deliberately reuse the same address bytes
        let testnet4 = NetworkParams::testnet4();
        let regtest = NetworkParams::regtest();
        assert_eq!(testnet4.pub_key_hash_addr_id, regtest.pub_key_hash_addr_id);
        assert_eq!(testnet4.hd_private_key_id, regtest.hd_private_key_id);
        assert_ne!(testnet4.net, regtest.net);
    }

    #[test]
    fn test_hrp_prefix_is_lowercased() {
        let mut params = NetworkParams::simnet();
        params.bech32_hrp_segwit = "SLTC".to_string();
        assert_eq!(params.bech32_segwit_prefix(), "sltc1");
    }

    #[test]
    fn test_custom_network_has_no_type() {
        let mut params = NetworkParams::regtest();
        params.net = NetworkId(0x0102_0304);
        assert_eq!(params.network_type(), None);
    }

    #[test]
    fn test_serde_roundtrip_preserves_durations() {
        let params = NetworkParams::simnet();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["target_timespan"], 1_209_600);
        assert_eq!(json["net"], "0x12141c16");
        assert_eq!(json["hd_private_key_id"], "0420b900");

        let back: NetworkParams = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }
}
