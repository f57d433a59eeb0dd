use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    error::{FlowError, Result},
    graph::Graph,
    partition::Partition,
    types::NodeId,
};

/// Directed flow values on a `2m`-wide edge set, one populated row per
/// district root.
#[derive(Clone, Debug)]
pub struct Flows {
    pub(crate) matrix: Array2<f64>,    // (n, 2m)
    pub(crate) roots: Vec<(u32, usize)>, // (district, root row), ascending district
}

impl Flows {
    /// The dense `n x 2m` flow matrix.
    #[inline] pub fn matrix(&self) -> &Array2<f64> { &self.matrix }

    #[inline] pub fn into_matrix(self) -> Array2<f64> { self.matrix }

    #[inline] pub fn value(&self, row: usize, column: usize) -> f64 { self.matrix[[row, column]] }

    /// `(district, root row)` pairs in ascending district order.
    #[inline] pub fn roots(&self) -> &[(u32, usize)] { &self.roots }

    /// Row holding the flows of `district`.
    pub fn root_of(&self, district: u32) -> Option<usize> {
        self.roots.iter().find(|&&(d, _)| d == district).map(|&(_, r)| r)
    }

    /// Number of nonzero entries in the matrix.
    pub fn nonzero_count(&self) -> usize {
        self.matrix.iter().filter(|&&x| x != 0.0).count()
    }

    /// Total flow in row `row` leaving `node`.
    pub fn outflow(&self, graph: &Graph, row: usize, node: usize) -> f64 {
        graph.edges(node)
            .filter_map(|v| graph.directed_column(node, v))
            .map(|c| self.matrix[[row, c]])
            .sum()
    }

    /// Total flow in row `row` entering `node`.
    pub fn inflow(&self, graph: &Graph, row: usize, node: usize) -> f64 {
        graph.edges(node)
            .filter_map(|v| graph.directed_column(v, node))
            .map(|c| self.matrix[[row, c]])
            .sum()
    }

    /// Inflow minus outflow at `node` in row `row`.
    #[inline]
    pub fn net_inflow(&self, graph: &Graph, row: usize, node: usize) -> f64 {
        self.inflow(graph, row, node) - self.outflow(graph, row, node)
    }

    /// Flow leaving the root of `district` in its own row.
    pub fn root_outflow(&self, graph: &Graph, district: u32) -> Option<f64> {
        self.root_of(district).map(|root| self.outflow(graph, root, root))
    }

    /// Check that every district row is a feasible flow for its part: the root
    /// sends `size - 1` units and receives none, every other node keeps one
    /// unit, and no flow touches a node outside the part.
    pub fn verify(&self, partition: &Partition) -> Result<()> {
        let graph = partition.graph();
        let infeasible = |district: u32, node: usize, reason: String| {
            FlowError::InfeasibleFlow { district, node: graph.node_id(node), reason }
        };

        for &(district, root) in &self.roots {
            let nodes = partition.part(district).unwrap_or(&[]);

            let outflow = self.outflow(graph, root, root);
            if outflow != (nodes.len() - 1) as f64 {
                return Err(infeasible(district, root, format!("root sends {outflow}, expected {}", nodes.len() - 1)))
            }
            let inflow = self.inflow(graph, root, root);
            if inflow != 0.0 {
                return Err(infeasible(district, root, format!("root receives {inflow}")))
            }

            let mut total = outflow;
            for &u in nodes.iter().filter(|&&u| u != root) {
                let net = self.net_inflow(graph, root, u);
                if net != 1.0 {
                    return Err(infeasible(district, u, format!("net inflow {net}, expected 1")))
                }
                total += self.outflow(graph, root, u);
            }

            // Whatever the part's nodes do not send was sent from outside the part.
            let row_total = self.matrix.row(root).sum();
            if row_total != total {
                return Err(infeasible(district, root, format!("{} units flow outside the district", row_total - total)))
            }
        }
        Ok(())
    }

    /// Sparse, id-keyed view of the flows for serialization.
    pub fn to_output(&self, graph: &Graph) -> FlowsOutput {
        let mut entries = Vec::with_capacity(self.roots.len() * 4);
        for &(_, row) in &self.roots {
            for (column, &value) in self.matrix.row(row).indexed_iter() {
                if value != 0.0 { entries.push(FlowEntry { row, column, value }) }
            }
        }

        FlowsOutput {
            nodes: graph.node_ids().to_vec(),
            edges: (0..graph.edge_count())
                .map(|e| { let (u, v) = graph.edge(e); (graph.node_id(u), graph.node_id(v)) })
                .collect(),
            roots: self.roots.iter().map(|&(district, row)| RootOutput { district, node: graph.node_id(row), row }).collect(),
            shape: (self.matrix.nrows(), self.matrix.ncols()),
            entries,
        }
    }
}

/// Serializable flow matrix: row `i` belongs to `nodes[i]`, columns `2e` and
/// `2e + 1` to the forward and reverse orientation of `edges[e]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowsOutput {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub roots: Vec<RootOutput>,
    pub shape: (usize, usize),
    pub entries: Vec<FlowEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RootOutput {
    pub district: u32,
    pub node: NodeId,
    pub row: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowEntry {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

impl FlowsOutput {
    /// Rebuild the dense matrix.
    pub fn to_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros(self.shape);
        for entry in &self.entries { matrix[[entry.row, entry.column]] = entry.value }
        matrix
    }
}
