use crate::types::NodeId;

/// Errors raised while building graphs, partitions, and flows.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// A district's induced subgraph is not connected.
    #[error("district {district} is not contiguous ({components} components)")]
    DisconnectedPart { district: u32, components: usize },

    /// A node has no district and no assigned neighbor to inherit one from.
    #[error("{node} has no district and cannot inherit one from a neighbor")]
    InvalidAssignment { node: NodeId },

    /// District 0 is reserved for unassigned nodes.
    #[error("{node} is assigned to district {district}, districts must be positive")]
    InvalidDistrict { node: NodeId, district: u32 },

    #[error("assignment has {found} entries, graph has {expected} nodes")]
    AssignmentLength { expected: usize, found: usize },

    #[error("{0} does not exist in the graph")]
    UnknownNode(NodeId),

    #[error("{0} appears more than once in the node list")]
    DuplicateNode(NodeId),

    #[error("edge ({0}, {1}) appears more than once")]
    DuplicateEdge(NodeId, NodeId),

    #[error("edge ({0}, {0}) is a self loop")]
    SelfLoop(NodeId),

    /// A per-node or per-edge series has the wrong length.
    #[error("series '{series}' has {found} values, expected {expected}")]
    SeriesLength { series: String, expected: usize, found: usize },

    #[error("series '{0}' does not exist")]
    UnknownSeries(String),

    /// A district's total strays too far from the ideal.
    #[error("district {district} deviates {deviation:.4} from ideal (threshold {threshold:.4})")]
    PopulationImbalance { district: u32, deviation: f64, threshold: f64 },

    /// A flow matrix failed its feasibility check.
    #[error("infeasible flow in district {district} at {node}: {reason}")]
    InfeasibleFlow { district: u32, node: NodeId, reason: String },
}

pub type Result<T, E = FlowError> = std::result::Result<T, E>;
