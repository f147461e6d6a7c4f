//! Registry of known networks and classification of their magic values
//!
//! A [`Registry`] starts empty and grows through [`Registry::register`]. Once
//! populated, address and extended-key parsers query it to decide whether a
//! version byte, Bech32 prefix or HD key magic belongs to any known network
//! before attempting a full decode.
//!
//! Address version bytes are classified across *all* registered networks:
//! several networks legitimately share the same byte, so a query answers
//! "is this used by any network", never "which network". Callers that need
//! the network disambiguate with their own context.

use crate::network::{HdKeyId, NetworkId};
use crate::params::{default_networks, NetworkParams};
use crate::{Error, Result};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Lookup tables derived from the registered networks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryIndex {
    nets: HashSet<NetworkId>,
    pub_key_hash_addr_ids: HashSet<u8>,
    script_hash_addr_ids: HashSet<u8>,
    bech32_segwit_prefixes: HashSet<String>,
    hd_priv_to_pub_key_ids: HashMap<HdKeyId, HdKeyId>,
}

impl RegistryIndex {
    /// Number of registered network ids
    pub fn network_count(&self) -> usize {
        self.nets.len()
    }

    /// Number of distinct HD private key magics
    pub fn hd_key_id_count(&self) -> usize {
        self.hd_priv_to_pub_key_ids.len()
    }

    /// Copy the magic values of `params` into the tables.
    ///
    /// Returns the public magic previously mapped to the same private magic.
    fn insert(&mut self, params: &NetworkParams) -> Option<HdKeyId> {
        self.nets.insert(params.net);
        self.pub_key_hash_addr_ids.insert(params.pub_key_hash_addr_id);
        self.script_hash_addr_ids.insert(params.script_hash_addr_id);
        self.bech32_segwit_prefixes
            .insert(params.bech32_segwit_prefix());
        self.hd_priv_to_pub_key_ids
            .insert(params.hd_private_key_id, params.hd_public_key_id)
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    index: RegistryIndex,
    networks: Vec<Arc<NetworkParams>>,
}

/// Set of registered networks.
///
/// All tables sit behind one lock, so a query never observes a partially
/// applied registration and networks may be registered after start-up.
#[derive(Debug, Default)]
pub struct Registry {
    inner: RwLock<RegistryInner>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in networks
    pub fn with_default_networks() -> Self {
        let registry = Self::new();
        for params in default_networks() {
            registry.must_register(params.clone());
        }
        tracing::debug!("Registered {} default networks", registry.len());
        registry
    }

    /// Register the parameters of a network.
    ///
    /// Fails with [`Error::DuplicateNetwork`] if a network with the same id is
    /// already registered, leaving the registry untouched. Address bytes and
    /// prefixes shared with other networks are accepted. An HD private key
    /// magic that is already known is remapped to this network's public magic.
    pub fn register(&self, params: NetworkParams) -> Result<()> {
        let mut inner = self.inner.write();

        if inner.index.nets.contains(&params.net) {
            tracing::warn!(
                "Rejected duplicate registration of network {} ({})",
                params.name,
                params.net
            );
            return Err(Error::DuplicateNetwork(params.net));
        }

        if let Some(previous) = inner.index.insert(&params) {
            if previous != params.hd_public_key_id {
                tracing::debug!(
                    "HD private key id {} remapped from {} to {}",
                    params.hd_private_key_id,
                    previous,
                    params.hd_public_key_id
                );
            }
        }

        tracing::debug!("Registered network {} ({})", params.name, params.net);
        inner.networks.push(Arc::new(params));
        Ok(())
    }

    /// Register the parameters of a network, panicking on failure.
    ///
    /// Only for hard-coded, known-good networks during start-up; a failure
    /// means the built-in tables are inconsistent.
    pub fn must_register(&self, params: NetworkParams) {
        let name = params.name.clone();
        if let Err(e) = self.register(params) {
            tracing::error!("Failed to register network {}: {}", name, e);
            panic!("failed to register network {name}: {e}");
        }
    }

    /// Whether `id` prefixes a pay-to-pubkey-hash address on any registered
    /// network.
    ///
    /// Check [`Registry::is_script_hash_addr_id`] as well: a byte may be
    /// known as both, in which case the address type is undeterminable.
    pub fn is_pub_key_hash_addr_id(&self, id: u8) -> bool {
        self.inner.read().index.pub_key_hash_addr_ids.contains(&id)
    }

    /// Whether `id` prefixes a pay-to-script-hash address on any registered
    /// network.
    pub fn is_script_hash_addr_id(&self, id: u8) -> bool {
        self.inner.read().index.script_hash_addr_ids.contains(&id)
    }

    /// Whether `prefix` (human-readable part plus the `1` separator) is a
    /// segwit address prefix on any registered network. Case-insensitive.
    pub fn is_bech32_segwit_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_lowercase();
        self.inner
            .read()
            .index
            .bech32_segwit_prefixes
            .contains(&prefix)
    }

    /// Map an HD extended private key magic to its public counterpart.
    ///
    /// Fails with [`Error::UnknownHdKeyId`] if `id` is not exactly four bytes
    /// or is not a registered private magic.
    pub fn hd_private_key_to_public_key_id(&self, id: &[u8]) -> Result<HdKeyId> {
        let key = HdKeyId::try_from(id)?;
        self.inner
            .read()
            .index
            .hd_priv_to_pub_key_ids
            .get(&key)
            .copied()
            .ok_or_else(|| Error::UnknownHdKeyId(key.to_string()))
    }

    /// Whether a network with this id is registered
    pub fn contains(&self, net: NetworkId) -> bool {
        self.inner.read().index.nets.contains(&net)
    }

    /// Parameters of a registered network
    pub fn get(&self, net: NetworkId) -> Option<Arc<NetworkParams>> {
        self.inner
            .read()
            .networks
            .iter()
            .find(|params| params.net == net)
            .cloned()
    }

    /// Parameters of a registered network by name, ignoring ASCII case
    pub fn by_name(&self, name: &str) -> Option<Arc<NetworkParams>> {
        self.inner
            .read()
            .networks
            .iter()
            .find(|params| params.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Registered networks in registration order
    pub fn networks(&self) -> Vec<Arc<NetworkParams>> {
        self.inner.read().networks.clone()
    }

    /// Number of registered networks
    pub fn len(&self) -> usize {
        self.inner.read().networks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().networks.is_empty()
    }

    /// Copy of the current lookup tables
    pub fn snapshot(&self) -> RegistryIndex {
        self.inner.read().index.clone()
    }
}
