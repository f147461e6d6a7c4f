//! Property-based tests for the network registry
//!
//! Uses proptest to verify registry invariants across randomized networks

use emc2_params::{Error, HdKeyId, NetworkId, NetworkParams, Registry};
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Magic values a generated network is registered with
#[derive(Debug, Clone)]
struct NetworkMagics {
    net: u32,
    pub_key_hash_addr_id: u8,
    script_hash_addr_id: u8,
    hrp: String,
    hd_public_key_id: [u8; 4],
}

impl NetworkMagics {
    /// Private magics are derived from the id so they never collide
    fn hd_private_key_id(&self) -> HdKeyId {
        HdKeyId(self.net.to_be_bytes())
    }

    fn to_params(&self) -> NetworkParams {
        let mut params = NetworkParams::mainnet();
        params.name = format!("net-{:08x}", self.net);
        params.net = NetworkId(self.net);
        params.pub_key_hash_addr_id = self.pub_key_hash_addr_id;
        params.script_hash_addr_id = self.script_hash_addr_id;
        params.bech32_hrp_segwit = self.hrp.clone();
        params.hd_private_key_id = self.hd_private_key_id();
        params.hd_public_key_id = HdKeyId(self.hd_public_key_id);
        params
    }
}

/// Generate lower-case Bech32 human-readable parts
fn hrp_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,10}").unwrap()
}

/// Generate 1-8 networks with distinct ids
fn networks_strategy() -> impl Strategy<Value = Vec<NetworkMagics>> {
    prop::collection::hash_set(any::<u32>(), 1..=8).prop_flat_map(|ids| {
        let ids: Vec<u32> = ids.into_iter().collect();
        let count = ids.len();
        (
            Just(ids),
            prop::collection::vec(
                (any::<u8>(), any::<u8>(), hrp_strategy(), any::<[u8; 4]>()),
                count,
            ),
        )
            .prop_map(|(ids, magics)| {
                ids.into_iter()
                    .zip(magics)
                    .map(|(net, (pkh, sh, hrp, hd_pub))| NetworkMagics {
                        net,
                        pub_key_hash_addr_id: pkh,
                        script_hash_addr_id: sh,
                        hrp,
                        hd_public_key_id: hd_pub,
                    })
                    .collect()
            })
    })
}

fn registry_of(networks: &[NetworkMagics]) -> Registry {
    let registry = Registry::new();
    for network in networks {
        registry.register(network.to_params()).expect("Distinct ids");
    }
    registry
}

// ============================================================================
// Classification Properties
// ============================================================================

proptest! {
    /// Property: Every registered address byte is classified, in any order
    #[test]
    fn prop_classification_independent_of_order(
        networks in networks_strategy().prop_shuffle()
    ) {
        let registry = registry_of(&networks);

        for network in &networks {
            prop_assert!(registry.is_pub_key_hash_addr_id(network.pub_key_hash_addr_id));
            prop_assert!(registry.is_script_hash_addr_id(network.script_hash_addr_id));
        }
    }

    /// Property: A byte no network registered is never classified
    #[test]
    fn prop_unregistered_byte_not_classified(
        networks in networks_strategy(),
        byte in any::<u8>()
    ) {
        prop_assume!(networks.iter().all(|n| n.pub_key_hash_addr_id != byte));

        let registry = registry_of(&networks);
        prop_assert!(!registry.is_pub_key_hash_addr_id(byte));
    }

    /// Property: Registered prefixes match regardless of case
    #[test]
    fn prop_bech32_prefix_case_insensitive(networks in networks_strategy()) {
        let registry = registry_of(&networks);

        for network in &networks {
            let prefix = format!("{}1", network.hrp);
            prop_assert!(registry.is_bech32_segwit_prefix(&prefix));
            prop_assert!(registry.is_bech32_segwit_prefix(&prefix.to_uppercase()));
        }
    }
}

// ============================================================================
// HD Key Magic Properties
// ============================================================================

proptest! {
    /// Property: Each private magic maps back to its network's public magic
    #[test]
    fn prop_hd_magic_roundtrip(networks in networks_strategy()) {
        let registry = registry_of(&networks);

        for network in &networks {
            let public = registry
                .hd_private_key_to_public_key_id(network.hd_private_key_id().as_bytes())
                .expect("Registered private magic");
            prop_assert_eq!(public, HdKeyId(network.hd_public_key_id));
        }
    }

    /// Property: Unknown private magics are rejected
    #[test]
    fn prop_unknown_hd_magic_rejected(
        networks in networks_strategy(),
        id in any::<[u8; 4]>()
    ) {
        prop_assume!(networks.iter().all(|n| n.hd_private_key_id().0 != id));

        let registry = registry_of(&networks);
        let result = registry.hd_private_key_to_public_key_id(&id);
        prop_assert!(matches!(result, Err(Error::UnknownHdKeyId(_))));

        // Truncated magics never match, even when the full magic would
        let truncated = networks[0].hd_private_key_id();
        let result = registry.hd_private_key_to_public_key_id(&truncated.as_bytes()[..3]);
        prop_assert!(matches!(result, Err(Error::UnknownHdKeyId(_))));
    }
}

// ============================================================================
// Registration Properties
// ============================================================================

proptest! {
    /// Property: A duplicate id fails and leaves the registry unchanged
    #[test]
    fn prop_duplicate_registration_is_atomic(
        networks in networks_strategy(),
        pick in any::<prop::sample::Index>(),
        pkh in any::<u8>(),
        hrp in hrp_strategy()
    ) {
        let registry = registry_of(&networks);
        let before = registry.snapshot();

        let mut dup = pick.get(&networks).to_params();
        dup.pub_key_hash_addr_id = pkh;
        dup.bech32_hrp_segwit = hrp;
        dup.hd_private_key_id = HdKeyId([0xff; 4]);

        let result = registry.register(dup);
        prop_assert!(matches!(result, Err(Error::DuplicateNetwork(_))));
        prop_assert_eq!(registry.snapshot(), before);
        prop_assert_eq!(registry.len(), networks.len());
    }

    /// Property: Networks sharing an address byte all register successfully
    #[test]
    fn prop_shared_address_byte_tolerated(
        networks in networks_strategy(),
        shared in any::<u8>()
    ) {
        let registry = Registry::new();
        for network in &networks {
            let mut params = network.to_params();
            params.pub_key_hash_addr_id = shared;
            prop_assert!(registry.register(params).is_ok());
            prop_assert!(registry.is_pub_key_hash_addr_id(shared));
        }
        prop_assert_eq!(registry.len(), networks.len());
    }
}
