//! Soft-fork deployment windows (BIP 9)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Expire time used by deployments that never time out
pub const NEVER_EXPIRES: u64 = i64::MAX as u64;

/// Named consensus rule change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentId {
    /// Dummy deployment used for testing
    TestDummy,
    /// CSV soft-fork package (BIPs 68, 112 and 113)
    Csv,
    /// Segregated witness soft-fork package (BIPs 141, 142, 144, 145, 147 and 173)
    Segwit,
}

impl DeploymentId {
    /// Every defined deployment, in table order
    pub const ALL: [DeploymentId; 3] = [
        DeploymentId::TestDummy,
        DeploymentId::Csv,
        DeploymentId::Segwit,
    ];

    /// Number of defined deployments
    pub const COUNT: usize = Self::ALL.len();

    /// Display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TestDummy => "testdummy",
            Self::Csv => "csv",
            Self::Segwit => "segwit",
        }
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Voting window for one rule change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusDeployment {
    /// Bit within the block version signalling this deployment
    pub bit_number: u8,
    /// Median block time after which voting starts
    pub start_time: u64,
    /// Median block time after which the deployment expires
    pub expire_time: u64,
}

impl ConsensusDeployment {
    /// Create a deployment window
    pub const fn new(bit_number: u8, start_time: u64, expire_time: u64) -> Self {
        Self {
            bit_number,
            start_time,
            expire_time,
        }
    }

    /// A deployment open for voting from genesis that never expires
    pub const fn always_available(bit_number: u8) -> Self {
        Self::new(bit_number, 0, NEVER_EXPIRES)
    }

    /// Start of the voting window, if it fits a calendar date
    pub fn start_datetime(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.start_time)
    }

    /// End of the voting window, if it fits a calendar date
    pub fn expire_datetime(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.expire_time)
    }
}

fn to_datetime(secs: u64) -> Option<DateTime<Utc>> {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Deployment table addressed by [`DeploymentId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments {
    /// [`DeploymentId::TestDummy`]
    pub test_dummy: ConsensusDeployment,
    /// [`DeploymentId::Csv`]
    pub csv: ConsensusDeployment,
    /// [`DeploymentId::Segwit`]
    pub segwit: ConsensusDeployment,
}

impl Deployments {
    /// Iterate the table in [`DeploymentId::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (DeploymentId, &ConsensusDeployment)> + '_ {
        DeploymentId::ALL.into_iter().map(move |id| (id, &self[id]))
    }
}

impl Index<DeploymentId> for Deployments {
    type Output = ConsensusDeployment;

    fn index(&self, id: DeploymentId) -> &ConsensusDeployment {
        match id {
            DeploymentId::TestDummy => &self.test_dummy,
            DeploymentId::Csv => &self.csv,
            DeploymentId::Segwit => &self.segwit,
        }
    }
}

impl IndexMut<DeploymentId> for Deployments {
    fn index_mut(&mut self, id: DeploymentId) -> &mut ConsensusDeployment {
        match id {
            DeploymentId::TestDummy => &mut self.test_dummy,
            DeploymentId::Csv => &mut self.csv,
            DeploymentId::Segwit => &mut self.segwit,
        }
    }
}
