//! Registry configuration
//!
//! Lets an embedding application describe private or custom networks in
//! JSON and build a [`Registry`] from them alongside the built-ins.

use crate::params::NetworkParams;
use crate::registry::Registry;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Networks to register at start-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Register mainnet, testnet4, regtest and simnet first
    #[serde(default = "default_true")]
    pub include_default_networks: bool,
    /// Additional networks, registered in order
    #[serde(default)]
    pub networks: Vec<NetworkParams>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_default_networks: true,
            networks: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl RegistryConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading registry config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize the configuration as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the custom networks for values the registry cannot index
    pub fn validate(&self) -> Result<()> {
        for params in &self.networks {
            if params.name.trim().is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "network {} has an empty name",
                    params.net
                )));
            }
            let hrp = &params.bech32_hrp_segwit;
            if hrp.is_empty() || !hrp.is_ascii() {
                return Err(Error::InvalidConfig(format!(
                    "network {} has an invalid bech32 human-readable part {:?}",
                    params.name, hrp
                )));
            }
        }
        Ok(())
    }

    /// Build a registry from this configuration.
    ///
    /// Custom networks go through the fallible registration path, so an id
    /// clashing with a built-in or an earlier entry is reported as
    /// [`Error::DuplicateNetwork`].
    pub fn build_registry(&self) -> Result<Registry> {
        self.validate()?;

        let registry = if self.include_default_networks {
            Registry::with_default_networks()
        } else {
            Registry::new()
        };

        for params in &self.networks {
            registry.register(params.clone())?;
        }

        tracing::info!(
            "Network registry ready with {} networks ({} custom)",
            registry.len(),
            self.networks.len()
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{magics, NetworkId};

    fn custom_json(net: &str, hrp: &str) -> String {
        let mut params = serde_json::to_value(NetworkParams::regtest()).unwrap();
        params["name"] = "private".into();
        params["net"] = net.into();
        params["bech32_hrp_segwit"] = hrp.into();
        serde_json::json!({ "networks": [params] }).to_string()
    }

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert!(config.include_default_networks);
        assert!(config.networks.is_empty());

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = RegistryConfig::from_json_str("{}").unwrap();
        assert!(config.include_default_networks);
    }

    #[test]
    fn test_custom_network_registered() {
        let config = RegistryConfig::from_json_str(&custom_json("0xabcdef01", "prv")).unwrap();
        let registry = config.build_registry().unwrap();

        assert_eq!(registry.len(), 5);
        assert!(registry.contains(NetworkId(0xabcdef01)));
        assert!(registry.is_bech32_segwit_prefix("PRV1"));
    }

    #[test]
    fn test_duplicate_of_builtin_is_error() {
        let json = custom_json(&magics::MAINNET.to_string(), "prv");
        let config = RegistryConfig::from_json_str(&json).unwrap();
        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, Error::DuplicateNetwork(id) if id == magics::MAINNET));
    }

    #[test]
    fn test_custom_only_registry() {
        let mut config = RegistryConfig::from_json_str(&custom_json("00000001", "prv")).unwrap();
        config.include_default_networks = false;
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_bech32_segwit_prefix("mil1"));
    }

    #[test]
    fn test_empty_hrp_rejected() {
        let err = RegistryConfig::from_json_str(&custom_json("00000001", "")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_magic_rejected() {
        let err = RegistryConfig::from_json_str(&custom_json("0x0102", "prv")).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_to_json_roundtrip() {
        let config = RegistryConfig {
            include_default_networks: false,
            networks: vec![NetworkParams::simnet()],
        };
        let back = RegistryConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert!(!back.include_default_networks);
        assert_eq!(back.networks, config.networks);
    }
}
