use ahash::{AHashMap, AHashSet};

use crate::{
    error::{FlowError, Result},
    graph::WeightMatrix,
    types::NodeId,
};

/// An undirected simple graph in compressed sparse row format.
///
/// Every adjacency entry carries the index of the undirected edge it belongs
/// to, so that directed flow columns can be resolved without searching the
/// edge list.
#[derive(Debug, Default)]
pub struct Graph {
    ids: Vec<NodeId>,                // ids[i] = caller id of node i
    index: AHashMap<NodeId, usize>,  // inverse of ids
    offsets: Vec<u32>,
    neighbors: Vec<u32>,
    edge_ids: Vec<u32>,              // edge_ids[k] = undirected edge of neighbors[k]
    endpoints: Vec<(u32, u32)>,      // endpoints[e] = forward orientation of edge e
    edge_weights: Vec<f64>,          // one weight per undirected edge
    node_weights: WeightMatrix,
}

impl Graph {
    /// Construct a graph from node ids, an undirected edge list, optional edge
    /// weights (uniform 1.0 when None), and node attribute series.
    pub fn from_edges(
        ids: &[NodeId],
        edges: &[(NodeId, NodeId)],
        edge_weights: Option<&[f64]>,
        node_weights: WeightMatrix,
    ) -> Result<Self> {
        let mut index = AHashMap::with_capacity(ids.len());
        for (i, &id) in ids.iter().enumerate() {
            if index.insert(id, i).is_some() { return Err(FlowError::DuplicateNode(id)) }
        }

        if let Some(weights) = edge_weights.filter(|w| w.len() != edges.len()) {
            return Err(FlowError::SeriesLength { series: "edge_weights".into(), expected: edges.len(), found: weights.len() })
        }
        if node_weights.num_nodes() != ids.len() {
            return Err(FlowError::SeriesLength { series: "node_weights".into(), expected: ids.len(), found: node_weights.num_nodes() })
        }

        // Resolve endpoints and reject loops and repeats.
        let mut seen = AHashSet::with_capacity(edges.len());
        let mut endpoints = Vec::with_capacity(edges.len());
        for &(a, b) in edges {
            let u = *index.get(&a).ok_or(FlowError::UnknownNode(a))?;
            let v = *index.get(&b).ok_or(FlowError::UnknownNode(b))?;
            if u == v { return Err(FlowError::SelfLoop(a)) }
            if !seen.insert((u.min(v), u.max(v))) { return Err(FlowError::DuplicateEdge(a, b)) }
            endpoints.push((u as u32, v as u32));
        }

        // Adjacency lists in edge insertion order.
        let mut adjacency = vec![Vec::new(); ids.len()];
        for (e, &(u, v)) in endpoints.iter().enumerate() {
            adjacency[u as usize].push((v, e as u32));
            adjacency[v as usize].push((u, e as u32));
        }

        Ok(Self {
            ids: ids.to_vec(),
            index,
            offsets: std::iter::once(0u32).chain(
                adjacency.iter()
                    .map(|v| v.len() as u32)
                    .scan(0u32, |acc, len| {*acc += len; Some(*acc)})
            ).collect::<Vec<u32>>(),
            neighbors: adjacency.iter().flatten().map(|&(v, _)| v).collect(),
            edge_ids: adjacency.iter().flatten().map(|&(_, e)| e).collect(),
            endpoints,
            edge_weights: edge_weights.map_or_else(|| vec![1.0; edges.len()], <[f64]>::to_vec),
            node_weights,
        })
    }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.ids.len() }

    /// Get the number of undirected edges in the graph.
    #[inline] pub fn edge_count(&self) -> usize { self.endpoints.len() }

    /// Get a reference to the node weights matrix.
    #[inline] pub fn node_weights(&self) -> &WeightMatrix { &self.node_weights }

    /// Caller id of node `i`.
    #[inline] pub fn node_id(&self, node: usize) -> NodeId { self.ids[node] }

    /// All node ids in positional order.
    #[inline] pub fn node_ids(&self) -> &[NodeId] { &self.ids }

    /// Position of the node with the given id.
    #[inline] pub fn index_of(&self, id: NodeId) -> Option<usize> { self.index.get(&id).copied() }

    /// Get the range of adjacency entries for a given node.
    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Get an iterator over the neighbors of a given node.
    #[inline]
    pub fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |k| self.neighbors[k] as usize)
    }

    /// Get an iterator over `(neighbor, edge index)` pairs of a given node.
    #[inline]
    pub fn edges_with_ids(&self, node: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.range(node).map(move |k| (self.neighbors[k] as usize, self.edge_ids[k] as usize))
    }

    /// Endpoints `(u, v)` of edge `e` in its forward orientation.
    #[inline]
    pub fn edge(&self, e: usize) -> (usize, usize) {
        let (u, v) = self.endpoints[e];
        (u as usize, v as usize)
    }

    /// Weight of undirected edge `e`.
    #[inline] pub fn edge_weight(&self, e: usize) -> f64 { self.edge_weights[e] }

    /// Index of the undirected edge joining `u` and `v`, if any.
    pub fn find_edge(&self, u: usize, v: usize) -> Option<usize> {
        let (from, to) = if self.degree(u) <= self.degree(v) { (u, v) } else { (v, u) };
        self.edges_with_ids(from).find(|&(w, _)| w == to).map(|(_, e)| e)
    }

    /// Column of the directed edge `u -> v` in a `2m`-wide flow matrix:
    /// `2e` for the forward orientation of edge `e`, `2e + 1` for the reverse.
    pub fn directed_column(&self, u: usize, v: usize) -> Option<usize> {
        let e = self.find_edge(u, v)?;
        Some(if self.edge(e).0 == u { 2 * e } else { 2 * e + 1 })
    }

    /// Tail and head of the directed column `c`.
    #[inline]
    pub fn column_endpoints(&self, column: usize) -> (usize, usize) {
        let (u, v) = self.edge(column / 2);
        if column % 2 == 0 { (u, v) } else { (v, u) }
    }
}
