//! Known-good blocks used to skip work during initial download

use crate::genesis::BlockHash;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A blockchain checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Block height
    pub height: u32,
    /// Block hash
    pub hash: BlockHash,
}

/// List of checkpoints, ordered from oldest to newest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Checkpoint>", into = "Vec<Checkpoint>")]
pub struct CheckpointList {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointList {
    /// Create a new checkpoint list
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        let mut cp = Self { checkpoints };
        cp.sort();
        cp
    }

    /// Sort checkpoints by height
    fn sort(&mut self) {
        self.checkpoints.sort_by_key(|cp| cp.height);
    }

    /// Get checkpoint at or before given height
    pub fn checkpoint_at_height(&self, height: u32) -> Result<&Checkpoint> {
        self.checkpoints
            .iter()
            .rev()
            .find(|cp| cp.height <= height)
            .ok_or(Error::CheckpointNotFound(height))
    }

    /// Get all checkpoints
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Get latest checkpoint
    pub fn latest(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// Get checkpoint count
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

impl From<Vec<Checkpoint>> for CheckpointList {
    fn from(checkpoints: Vec<Checkpoint>) -> Self {
        Self::new(checkpoints)
    }
}

impl From<CheckpointList> for Vec<Checkpoint> {
    fn from(list: CheckpointList) -> Self {
        list.checkpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(height: u32, fill: u8) -> Checkpoint {
        Checkpoint {
            height,
            hash: BlockHash([fill; 32]),
        }
    }

    fn sample() -> CheckpointList {
        CheckpointList::new(vec![
            checkpoint(20_000, 2),
            checkpoint(1, 0),
            checkpoint(10_000, 1),
        ])
    }

    #[test]
    fn test_checkpoints_sorted() {
        let checkpoints = sample();
        let heights: Vec<_> = checkpoints.checkpoints().iter().map(|cp| cp.height).collect();
        assert_eq!(heights, vec![1, 10_000, 20_000]);
        assert_eq!(checkpoints.latest().unwrap().height, 20_000);
    }

    #[test]
    fn test_checkpoint_at_height() {
        let checkpoints = sample();

        let cp = checkpoints.checkpoint_at_height(15_000).unwrap();
        assert_eq!(cp.height, 10_000);

        let cp = checkpoints.checkpoint_at_height(20_000).unwrap();
        assert_eq!(cp.height, 20_000);
    }

    #[test]
    fn test_checkpoint_not_found() {
        let checkpoints = CheckpointList::new(vec![checkpoint(100, 0)]);
        let result = checkpoints.checkpoint_at_height(99);
        assert!(matches!(result, Err(Error::CheckpointNotFound(99))));

        assert!(CheckpointList::default().is_empty());
    }

    #[test]
    fn test_deserialize_sorts() {
        let json = serde_json::to_string(&vec![checkpoint(5, 5), checkpoint(2, 2)]).unwrap();
        let list: CheckpointList = serde_json::from_str(&json).unwrap();
        assert_eq!(list.checkpoints()[0].height, 2);
        assert_eq!(list.len(), 2);
    }
}
