use std::{collections::{BTreeMap, HashMap}, fs::File, io::{BufReader, BufWriter}, path::Path, sync::Arc};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    graph::{Graph, WeightMatrix},
    partition::Partition,
    types::NodeId,
};

/// JSON description of a districting plan: graph, node series, and a
/// (possibly partial) district assignment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionDocument {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_weights: Option<Vec<f64>>,
    #[serde(default)]
    pub weights: BTreeMap<String, Vec<f64>>,
    pub assignment: BTreeMap<NodeId, u32>,
}

impl PartitionDocument {
    /// Describe an existing partition.
    pub fn from_partition(partition: &Partition) -> Self {
        let graph = partition.graph();
        let weights = graph.node_weights();

        Self {
            nodes: graph.node_ids().to_vec(),
            edges: (0..graph.edge_count())
                .map(|e| { let (u, v) = graph.edge(e); (graph.node_id(u), graph.node_id(v)) })
                .collect(),
            edge_weights: Some((0..graph.edge_count()).map(|e| graph.edge_weight(e)).collect())
                .filter(|w: &Vec<f64>| w.iter().any(|&x| x != 1.0)),
            weights: weights.names().iter()
                .filter_map(|name| weights.series(name).ok().map(|column| (name.clone(), column.to_vec())))
                .collect(),
            assignment: partition.assignments().into_iter().enumerate()
                .map(|(u, district)| (graph.node_id(u), district))
                .collect(),
        }
    }

    /// Build the graph and resolve the assignment.
    pub fn to_partition(&self) -> crate::Result<Partition> {
        let weights = WeightMatrix::new(self.nodes.len(), self.weights.clone())?;
        let graph = Graph::from_edges(&self.nodes, &self.edges, self.edge_weights.as_deref(), weights)?;
        let assignment = self.assignment.iter().map(|(&id, &d)| (id, d)).collect::<HashMap<_, _>>();
        Partition::from_map(Arc::new(graph), &assignment)
    }

    /// Reads a partition document from a JSON file at `path`.
    pub fn read_from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse partition document: {}", path.display()))
    }

    /// Writes the document as JSON to `path`.
    pub fn write_to_json_file(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }
}

/// Writes any serializable value as pretty JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}
