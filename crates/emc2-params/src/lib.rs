//! Einsteinium network parameters and magic-value registry
//!
//! This crate provides the per-network parameter sets (genesis reference,
//! address and HD key magics, Bech32 prefixes, deployment windows and
//! checkpoints) together with a [`Registry`] that classifies raw magic values
//! back to the networks registered with it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod checkpoints;
pub mod config;
pub mod consensus;
pub mod genesis;
pub mod network;
pub mod params;
pub mod registry;

pub use checkpoints::{Checkpoint, CheckpointList};
pub use config::RegistryConfig;
pub use consensus::{ConsensusDeployment, DeploymentId, Deployments};
pub use genesis::{BlockHash, GenesisInfo};
pub use network::{HdKeyId, NetworkId, NetworkType};
pub use params::{default_networks, DnsSeed, NetworkParams};
pub use registry::{Registry, RegistryIndex};

/// Error types for parameter and registry operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A network with the same id is already registered
    #[error("Duplicate network: {0}")]
    DuplicateNetwork(NetworkId),

    /// HD private key id is malformed or not registered
    #[error("Unknown HD private extended key id: {0}")]
    UnknownHdKeyId(String),

    /// Invalid network specified
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Checkpoint not found
    #[error("No checkpoint found for height {0}")]
    CheckpointNotFound(u32),

    /// Malformed hex value
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Configuration rejected during validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error is an expected lookup or registration outcome
    /// rather than a fault in the caller's environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::DuplicateNetwork(_)
                | Error::UnknownHdKeyId(_)
                | Error::InvalidNetwork(_)
                | Error::CheckpointNotFound(_)
        )
    }
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
