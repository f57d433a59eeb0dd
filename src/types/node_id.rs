use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a single node (precinct, block, grid cell) of a plan's graph.
///
/// Ids are chosen by the caller and need not be contiguous. Their total order
/// decides which node roots each district: the smallest id in a part wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    #[inline] fn from(id: u64) -> Self { Self(id) }
}
